use serde::{Deserialize, Serialize};

/// A campaign district with its bilingual name and targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct District {
    pub id: String,
    pub name_ar: String,
    pub name_fr: Option<String>,
    pub coordinator_name: Option<String>,
    pub target_votes: Option<i64>,
    pub priority_level: Option<String>,
    pub status: Option<String>,
}

impl District {
    /// Primary display name: the Arabic name, with the French name
    /// appended when present.
    pub fn display_name(&self) -> String {
        match self.name_fr.as_deref() {
            Some(fr) if !fr.is_empty() => format!("{} ({})", self.name_ar, fr),
            _ => self.name_ar.clone(),
        }
    }

    pub fn coordinator_display(&self) -> &str {
        self.coordinator_name.as_deref().unwrap_or("Unassigned")
    }
}

/// Insert/update payload for the districts table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewDistrict {
    pub name_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_fr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinator_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_votes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_bilingual() {
        let district = District {
            id: "d1".to_string(),
            name_ar: "حي السلام".to_string(),
            name_fr: Some("Quartier Essalam".to_string()),
            coordinator_name: None,
            target_votes: Some(1200),
            priority_level: Some("high".to_string()),
            status: Some("active".to_string()),
        };
        assert_eq!(district.display_name(), "حي السلام (Quartier Essalam)");
        assert_eq!(district.coordinator_display(), "Unassigned");
    }

    #[test]
    fn test_new_district_omits_unset_fields() {
        let new = NewDistrict {
            name_ar: "حي النور".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&new).unwrap();
        assert_eq!(json, r#"{"name_ar":"حي النور"}"#);
    }
}
