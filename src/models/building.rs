use serde::{Deserialize, Serialize};

/// A building that can be assigned to at most one representative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    pub building_number: i64,
    pub address: Option<String>,
    pub assigned_representative_id: Option<String>,
    pub surveyed_apartments: Option<i64>,
    pub total_apartments: Option<i64>,
}

impl Building {
    pub fn is_assigned(&self) -> bool {
        self.assigned_representative_id.is_some()
    }

    /// Survey progress as "surveyed/total", or "-" when unknown.
    pub fn progress_display(&self) -> String {
        match (self.surveyed_apartments, self.total_apartments) {
            (Some(done), Some(total)) => format!("{}/{}", done, total),
            _ => "-".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_building_row() {
        let json = r#"{
            "id": "b-42",
            "building_number": 17,
            "address": "Rue des Oliviers 12",
            "assigned_representative_id": null,
            "city_id": null,
            "surveyed_apartments": 3,
            "total_apartments": 10,
            "created_at": "2025-05-02T08:00:00Z",
            "updated_at": "2025-05-02T08:00:00Z"
        }"#;
        let building: Building = serde_json::from_str(json).expect("Failed to parse building");
        assert_eq!(building.building_number, 17);
        assert!(!building.is_assigned());
        assert_eq!(building.progress_display(), "3/10");
    }

    #[test]
    fn test_progress_unknown() {
        let building = Building {
            id: "b1".to_string(),
            building_number: 1,
            address: None,
            assigned_representative_id: Some("rep-1".to_string()),
            surveyed_apartments: None,
            total_apartments: None,
        };
        assert!(building.is_assigned());
        assert_eq!(building.progress_display(), "-");
    }
}
