//! Census survey form state.
//!
//! The survey form walks a cascading selection: district, then a
//! residential square inside that district, then a building code drawn
//! from the square's code list. Changing an upstream selection clears
//! everything downstream so a stale square or building can never be
//! submitted against the wrong parent.

use chrono::{DateTime, Utc};

use crate::models::{District, NewCensusRecord, ResidentialSquare};

/// Fields of the census form that accept text input, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CensusField {
    ApartmentNumber,
    HeadOfHousehold,
    PhoneNumber,
    VotersWithCards,
    VotersWithoutCards,
    Notes,
}

impl CensusField {
    pub fn next(self) -> Self {
        match self {
            Self::ApartmentNumber => Self::HeadOfHousehold,
            Self::HeadOfHousehold => Self::PhoneNumber,
            Self::PhoneNumber => Self::VotersWithCards,
            Self::VotersWithCards => Self::VotersWithoutCards,
            Self::VotersWithoutCards => Self::Notes,
            Self::Notes => Self::ApartmentNumber,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ApartmentNumber => "Apartment",
            Self::HeadOfHousehold => "Head of household",
            Self::PhoneNumber => "Phone",
            Self::VotersWithCards => "Voters with cards",
            Self::VotersWithoutCards => "Voters without cards",
            Self::Notes => "Notes",
        }
    }
}

/// In-progress census survey entry.
#[derive(Debug, Default, Clone)]
pub struct CensusForm {
    pub district_id: Option<String>,
    pub square_id: Option<String>,
    pub building_code: Option<String>,
    /// Codes offered by the currently selected square.
    building_codes: Vec<String>,
    pub apartment_number: String,
    pub head_of_household: String,
    pub phone_number: String,
    pub voters_with_cards: String,
    pub voters_without_cards: String,
    pub notes: String,
    pub active_field: Option<CensusField>,
}

impl CensusForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a district, clearing the square and building selections.
    pub fn select_district(&mut self, district: &District) {
        if self.district_id.as_deref() == Some(district.id.as_str()) {
            return;
        }
        self.district_id = Some(district.id.clone());
        self.square_id = None;
        self.building_code = None;
        self.building_codes.clear();
    }

    /// Select a square within the current district, clearing the building
    /// selection and replacing the offered building codes.
    pub fn select_square(&mut self, square: &ResidentialSquare) {
        if self.square_id.as_deref() == Some(square.id.as_str()) {
            return;
        }
        self.square_id = Some(square.id.clone());
        self.building_code = None;
        self.building_codes = square.building_codes.clone();
    }

    pub fn select_building_code(&mut self, code: &str) {
        if self.building_codes.iter().any(|c| c == code) {
            self.building_code = Some(code.to_string());
        }
    }

    /// Building codes available under the selected square. Empty until a
    /// square is chosen.
    pub fn available_buildings(&self) -> &[String] {
        &self.building_codes
    }

    fn with_cards(&self) -> i64 {
        self.voters_with_cards.trim().parse().unwrap_or(0)
    }

    fn without_cards(&self) -> i64 {
        self.voters_without_cards.trim().parse().unwrap_or(0)
    }

    /// Derived total shown next to the card count fields.
    pub fn total_potential_voters(&self) -> i64 {
        self.with_cards() + self.without_cards()
    }

    /// True once every required field is filled: the full location cascade,
    /// a head of household name, and both card counts.
    pub fn ready_to_submit(&self) -> bool {
        self.district_id.is_some()
            && self.square_id.is_some()
            && self.building_code.is_some()
            && !self.head_of_household.trim().is_empty()
            && !self.voters_with_cards.trim().is_empty()
            && !self.voters_without_cards.trim().is_empty()
            && self.voters_with_cards.trim().parse::<i64>().is_ok()
            && self.voters_without_cards.trim().parse::<i64>().is_ok()
    }

    /// Build the record to submit. Returns None until the form is complete.
    pub fn to_new_record(
        &self,
        surveyor_profile_id: &str,
        now: DateTime<Utc>,
    ) -> Option<NewCensusRecord> {
        if !self.ready_to_submit() {
            return None;
        }
        let optional = |s: &str| {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };
        Some(NewCensusRecord {
            residential_square_id: self.square_id.clone()?,
            building_code: self.building_code.clone()?,
            apartment_number: optional(&self.apartment_number),
            head_of_household: self.head_of_household.trim().to_string(),
            phone_number: optional(&self.phone_number),
            voters_with_cards: self.with_cards(),
            voters_without_cards: self.without_cards(),
            total_potential_voters: self.total_potential_voters(),
            notes: optional(&self.notes),
            surveyed_by: surveyor_profile_id.to_string(),
            surveyed_at: now.to_rfc3339(),
            survey_status: "completed".to_string(),
        })
    }

    /// Reset everything after a successful submit, keeping the location
    /// cascade so consecutive entries in the same building are fast.
    pub fn clear_household_fields(&mut self) {
        self.apartment_number.clear();
        self.head_of_household.clear();
        self.phone_number.clear();
        self.voters_with_cards.clear();
        self.voters_without_cards.clear();
        self.notes.clear();
    }

    pub fn field_value_mut(&mut self, field: CensusField) -> &mut String {
        match field {
            CensusField::ApartmentNumber => &mut self.apartment_number,
            CensusField::HeadOfHousehold => &mut self.head_of_household,
            CensusField::PhoneNumber => &mut self.phone_number,
            CensusField::VotersWithCards => &mut self.voters_with_cards,
            CensusField::VotersWithoutCards => &mut self.voters_without_cards,
            CensusField::Notes => &mut self.notes,
        }
    }

    pub fn field_value(&self, field: CensusField) -> &str {
        match field {
            CensusField::ApartmentNumber => &self.apartment_number,
            CensusField::HeadOfHousehold => &self.head_of_household,
            CensusField::PhoneNumber => &self.phone_number,
            CensusField::VotersWithCards => &self.voters_with_cards,
            CensusField::VotersWithoutCards => &self.voters_without_cards,
            CensusField::Notes => &self.notes,
        }
    }
}

/// One text field of an [`EditorForm`].
#[derive(Debug, Clone)]
pub struct EditorField {
    pub label: &'static str,
    pub value: String,
    pub required: bool,
    /// Parsed as a number on submit; non-numeric input blocks submission.
    pub numeric: bool,
}

impl EditorField {
    pub fn required(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            required: true,
            numeric: false,
        }
    }

    pub fn optional(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            required: false,
            numeric: false,
        }
    }

    pub fn numeric(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            required: false,
            numeric: true,
        }
    }

    fn is_valid(&self) -> bool {
        let trimmed = self.value.trim();
        if self.required && trimmed.is_empty() {
            return false;
        }
        if self.numeric && !trimmed.is_empty() && trimmed.parse::<f64>().is_err() {
            return false;
        }
        true
    }
}

/// Generic new-record form shown as an overlay on the admin tabs. The app
/// constructs one per entity; field order is fixed by the constructor so
/// submission can read values by index.
#[derive(Debug, Clone)]
pub struct EditorForm {
    pub title: &'static str,
    pub fields: Vec<EditorField>,
    pub active: usize,
}

impl EditorForm {
    pub fn new(title: &'static str, fields: Vec<EditorField>) -> Self {
        Self {
            title,
            fields,
            active: 0,
        }
    }

    pub fn next_field(&mut self) {
        self.active = (self.active + 1) % self.fields.len();
    }

    pub fn prev_field(&mut self) {
        self.active = (self.active + self.fields.len() - 1) % self.fields.len();
    }

    pub fn active_value_mut(&mut self) -> &mut String {
        &mut self.fields[self.active].value
    }

    /// Trimmed value of the field at `index`, or None when empty.
    pub fn value(&self, index: usize) -> Option<String> {
        let trimmed = self.fields.get(index)?.value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    pub fn number(&self, index: usize) -> Option<f64> {
        self.value(index)?.parse().ok()
    }

    pub fn ready(&self) -> bool {
        self.fields.iter().all(|f| f.is_valid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn district(id: &str) -> District {
        District {
            id: id.to_string(),
            name_ar: "المنارة".to_string(),
            name_fr: Some("Menara".to_string()),
            coordinator_name: None,
            target_votes: None,
            priority_level: None,
            status: None,
        }
    }

    fn square(id: &str, district_id: &str, codes: &[&str]) -> ResidentialSquare {
        ResidentialSquare {
            id: id.to_string(),
            square_number: 12,
            district_id: Some(district_id.to_string()),
            assigned_representative_id: None,
            building_codes: codes.iter().map(|c| c.to_string()).collect(),
            surveyed_buildings: None,
            total_buildings: None,
        }
    }

    fn filled_form() -> CensusForm {
        let mut form = CensusForm::new();
        form.select_district(&district("d1"));
        form.select_square(&square("s1", "d1", &["A-1", "A-2"]));
        form.select_building_code("A-1");
        form.head_of_household = "Fatima Zahra".to_string();
        form.voters_with_cards = "3".to_string();
        form.voters_without_cards = "2".to_string();
        form
    }

    #[test]
    fn test_district_change_clears_square_and_building() {
        let mut form = filled_form();
        form.select_district(&district("d2"));
        assert_eq!(form.square_id, None);
        assert_eq!(form.building_code, None);
        assert!(form.available_buildings().is_empty());
    }

    #[test]
    fn test_square_change_clears_building_and_swaps_codes() {
        let mut form = filled_form();
        form.select_square(&square("s2", "d1", &["B-1"]));
        assert_eq!(form.building_code, None);
        assert_eq!(form.available_buildings(), ["B-1".to_string()]);
    }

    #[test]
    fn test_reselecting_same_district_keeps_downstream() {
        let mut form = filled_form();
        form.select_district(&district("d1"));
        assert_eq!(form.square_id.as_deref(), Some("s1"));
        assert_eq!(form.building_code.as_deref(), Some("A-1"));
    }

    #[test]
    fn test_building_code_must_come_from_square() {
        let mut form = filled_form();
        form.select_building_code("Z-9");
        assert_eq!(form.building_code.as_deref(), Some("A-1"));
    }

    #[test]
    fn test_total_is_derived_from_card_counts() {
        let form = filled_form();
        assert_eq!(form.total_potential_voters(), 5);
    }

    #[test]
    fn test_submit_blocked_until_required_fields_present() {
        let mut form = CensusForm::new();
        assert!(!form.ready_to_submit());
        form.select_district(&district("d1"));
        form.select_square(&square("s1", "d1", &["A-1"]));
        assert!(!form.ready_to_submit());
        form.select_building_code("A-1");
        assert!(!form.ready_to_submit());
        form.head_of_household = "Fatima Zahra".to_string();
        assert!(!form.ready_to_submit());
        form.voters_with_cards = "3".to_string();
        form.voters_without_cards = "0".to_string();
        assert!(form.ready_to_submit());
    }

    #[test]
    fn test_non_numeric_counts_block_submit() {
        let mut form = filled_form();
        form.voters_with_cards = "three".to_string();
        assert!(!form.ready_to_submit());
    }

    #[test]
    fn test_submitted_record_is_marked_completed() {
        let form = filled_form();
        let now = Utc::now();
        let record = form.to_new_record("profile-9", now).expect("form complete");
        assert_eq!(record.survey_status, "completed");
        assert_eq!(record.surveyed_by, "profile-9");
        assert_eq!(record.total_potential_voters, 5);
        assert_eq!(record.apartment_number, None);
    }

    fn editor() -> EditorForm {
        EditorForm::new(
            " New Budget Item ",
            vec![
                EditorField::required("Category"),
                EditorField::optional("Description"),
                EditorField::numeric("Allocated"),
            ],
        )
    }

    #[test]
    fn test_editor_requires_required_fields() {
        let mut form = editor();
        assert!(!form.ready());
        form.fields[0].value = "Printing".to_string();
        assert!(form.ready());
    }

    #[test]
    fn test_editor_numeric_field_blocks_bad_input() {
        let mut form = editor();
        form.fields[0].value = "Printing".to_string();
        form.fields[2].value = "lots".to_string();
        assert!(!form.ready());
        form.fields[2].value = "1500.50".to_string();
        assert!(form.ready());
        assert_eq!(form.number(2), Some(1500.5));
    }

    #[test]
    fn test_editor_field_cycling_wraps() {
        let mut form = editor();
        form.next_field();
        form.next_field();
        assert_eq!(form.active, 2);
        form.next_field();
        assert_eq!(form.active, 0);
        form.prev_field();
        assert_eq!(form.active, 2);
    }

    #[test]
    fn test_editor_empty_values_read_as_none() {
        let mut form = editor();
        form.fields[1].value = "  ".to_string();
        assert_eq!(form.value(1), None);
        form.fields[1].value = " flyers ".to_string();
        assert_eq!(form.value(1).as_deref(), Some("flyers"));
    }

    #[test]
    fn test_clear_household_fields_keeps_location() {
        let mut form = filled_form();
        form.clear_household_fields();
        assert_eq!(form.building_code.as_deref(), Some("A-1"));
        assert!(form.head_of_household.is_empty());
        assert!(!form.ready_to_submit());
    }
}
