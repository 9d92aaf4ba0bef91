use serde::{Deserialize, Serialize};

/// One surveyed household, attributed to the representative who entered it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CensusRecord {
    pub id: String,
    pub residential_square_id: String,
    pub building_code: String,
    pub apartment_number: Option<String>,
    pub head_of_household: String,
    pub phone_number: Option<String>,
    pub voters_with_cards: Option<i64>,
    pub voters_without_cards: Option<i64>,
    pub total_potential_voters: Option<i64>,
    pub notes: Option<String>,
    pub survey_status: Option<String>,
    pub surveyed_by: Option<String>,
    pub surveyed_at: Option<String>,
}

impl CensusRecord {
    pub fn card_summary(&self) -> String {
        format!(
            "{} with / {} without",
            self.voters_with_cards.unwrap_or(0),
            self.voters_without_cards.unwrap_or(0)
        )
    }
}

/// Insert payload for the voter_census table. Built by the census form;
/// `surveyed_at` and `survey_status` are always set on submission.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewCensusRecord {
    pub residential_square_id: String,
    pub building_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apartment_number: Option<String>,
    pub head_of_household: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub voters_with_cards: i64,
    pub voters_without_cards: i64,
    pub total_potential_voters: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub surveyed_by: String,
    pub surveyed_at: String,
    pub survey_status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_census_row() {
        let json = r#"{
            "id": "c-1",
            "residential_square_id": "sq-7",
            "building_code": "A2",
            "apartment_number": "4",
            "head_of_household": "Karim Bensaid",
            "phone_number": null,
            "voters_with_cards": 2,
            "voters_without_cards": 1,
            "total_potential_voters": 3,
            "notes": null,
            "survey_status": "completed",
            "surveyed_by": "p-9",
            "surveyed_at": "2025-06-11T14:30:00Z",
            "created_at": "2025-06-11T14:30:01Z",
            "updated_at": "2025-06-11T14:30:01Z"
        }"#;
        let record: CensusRecord = serde_json::from_str(json).expect("Failed to parse census");
        assert_eq!(record.building_code, "A2");
        assert_eq!(record.card_summary(), "2 with / 1 without");
    }
}
