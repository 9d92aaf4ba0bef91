use serde::{Deserialize, Serialize};

/// Role of a signed-in user. Anything unrecognized is treated as a
/// plain representative; roles are never invented client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Representative,
}

impl Role {
    pub fn from_str(s: &str) -> Self {
        match s {
            "admin" => Role::Admin,
            _ => Role::Representative,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Representative => "Representative",
        }
    }
}

/// A representative or coordinator profile row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub user_id: String,
    pub full_name: String,
    #[serde(default)]
    pub role: String,
    pub assigned_district: Option<String>,
    pub phone: Option<String>,
}

impl Profile {
    pub fn role(&self) -> Role {
        Role::from_str(&self.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile_row() {
        let json = r#"{
            "id": "8f0b2a4e-1111-4c8e-9d8a-000000000001",
            "user_id": "22b210e3-d325-41be-b761-31e18bfe2c73",
            "full_name": "Amina Haddad",
            "role": "representative",
            "assigned_district": null,
            "phone": "0612345678",
            "created_at": "2025-04-01T09:00:00Z",
            "updated_at": "2025-04-01T09:00:00Z"
        }"#;
        let profile: Profile = serde_json::from_str(json).expect("Failed to parse profile");
        assert_eq!(profile.full_name, "Amina Haddad");
        assert_eq!(profile.role(), Role::Representative);
        assert!(!profile.is_admin());
    }

    #[test]
    fn test_unknown_role_is_not_admin() {
        assert_eq!(Role::from_str("superuser"), Role::Representative);
        assert_eq!(Role::from_str(""), Role::Representative);
        assert_eq!(Role::from_str("admin"), Role::Admin);
    }
}
