use serde::{Deserialize, Serialize};

use super::null_as_empty;

/// A residential square: the administrative grouping of buildings used as
/// the unit of assignment and survey-progress tracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResidentialSquare {
    pub id: String,
    pub square_number: i64,
    pub district_id: Option<String>,
    pub assigned_representative_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub building_codes: Vec<String>,
    pub surveyed_buildings: Option<i64>,
    pub total_buildings: Option<i64>,
}

impl ResidentialSquare {
    pub fn display_name(&self) -> String {
        format!("Square {}", self.square_number)
    }

    /// Survey progress as "surveyed/total".
    pub fn progress_display(&self) -> String {
        format!(
            "{}/{}",
            self.surveyed_buildings.unwrap_or(0),
            self.total_buildings.unwrap_or(0)
        )
    }

    pub fn is_fully_surveyed(&self) -> bool {
        match (self.surveyed_buildings, self.total_buildings) {
            (Some(done), Some(total)) => total > 0 && done >= total,
            _ => false,
        }
    }

    pub fn remaining_buildings(&self) -> i64 {
        (self.total_buildings.unwrap_or(0) - self.surveyed_buildings.unwrap_or(0)).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_square_row_with_codes() {
        let json = r#"{
            "id": "sq-7",
            "square_number": 7,
            "district_id": "d1",
            "assigned_representative_id": null,
            "building_codes": ["A1", "A2", "B1"],
            "surveyed_buildings": 2,
            "total_buildings": 3,
            "city_id": null,
            "building_id": null
        }"#;
        let square: ResidentialSquare =
            serde_json::from_str(json).expect("Failed to parse square");
        assert_eq!(square.building_codes, vec!["A1", "A2", "B1"]);
        assert_eq!(square.progress_display(), "2/3");
        assert!(!square.is_fully_surveyed());
        assert_eq!(square.remaining_buildings(), 1);
    }

    #[test]
    fn test_null_building_codes_default_to_empty() {
        let json = r#"{"id": "sq-8", "square_number": 8, "district_id": null,
            "assigned_representative_id": null, "building_codes": null,
            "surveyed_buildings": null, "total_buildings": null}"#;
        let square: ResidentialSquare =
            serde_json::from_str(json).expect("Failed to parse square");
        assert!(square.building_codes.is_empty());
        assert_eq!(square.progress_display(), "0/0");
        assert!(!square.is_fully_surveyed());
    }

    #[test]
    fn test_fully_surveyed() {
        let square = ResidentialSquare {
            id: "sq-9".to_string(),
            square_number: 9,
            district_id: None,
            assigned_representative_id: None,
            building_codes: vec!["C1".to_string()],
            surveyed_buildings: Some(1),
            total_buildings: Some(1),
        };
        assert!(square.is_fully_surveyed());
        assert_eq!(square.remaining_buildings(), 0);
    }
}
