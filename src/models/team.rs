use serde::{Deserialize, Serialize};

use super::null_as_empty;

/// A campaign team member (distinct from a representative profile).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub role: String,
    pub team_type: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub responsibilities: Vec<String>,
}

/// Insert payload for the team_members table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewTeamMember {
    pub name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responsibilities: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_team_member() {
        let json = r#"{
            "id": "tm-1",
            "name": "Nadia",
            "role": "Coordinator",
            "team_type": "field",
            "status": "active",
            "responsibilities": ["door-knocking", "phone bank"]
        }"#;
        let member: TeamMember = serde_json::from_str(json).expect("Failed to parse member");
        assert_eq!(member.responsibilities, ["door-knocking", "phone bank"]);
    }

    #[test]
    fn test_null_responsibilities() {
        let json = r#"{"id": "tm-2", "name": "Omar", "role": "Driver",
            "team_type": null, "status": null, "responsibilities": null}"#;
        let member: TeamMember = serde_json::from_str(json).expect("Failed to parse member");
        assert!(member.responsibilities.is_empty());
    }
}
