//! Role-based gating for admin-only views.
//!
//! The gate is re-evaluated every time the profile state changes. While the
//! profile is still being resolved nothing is rendered; once resolved, a
//! mismatched role yields a denial carrying the redirect target and a
//! user-visible notice.

use crate::models::{Profile, Role};

/// Outcome of evaluating a gated view against the current profile state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Profile still loading; withhold the view entirely.
    Pending,
    Granted,
    /// Role mismatch: bounce to the fallback view and show the notice.
    Denied { notice: String },
}

#[derive(Debug, Clone, Copy)]
pub struct RoleGate {
    required: Role,
}

impl RoleGate {
    pub fn admin_only() -> Self {
        Self {
            required: Role::Admin,
        }
    }

    pub fn evaluate(&self, profile: Option<&Profile>, loading: bool) -> Access {
        if loading {
            return Access::Pending;
        }
        match profile {
            Some(p) if p.role() == self.required => Access::Granted,
            _ => Access::Denied {
                notice: "Access denied: you do not have permission to view this page"
                    .to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(role: &str) -> Profile {
        Profile {
            id: "p1".to_string(),
            user_id: "u1".to_string(),
            full_name: "Test Rep".to_string(),
            role: role.to_string(),
            assigned_district: None,
            phone: None,
        }
    }

    #[test]
    fn test_admin_granted() {
        let gate = RoleGate::admin_only();
        let p = profile("admin");
        assert_eq!(gate.evaluate(Some(&p), false), Access::Granted);
    }

    #[test]
    fn test_representative_denied_with_notice() {
        let gate = RoleGate::admin_only();
        let p = profile("representative");
        match gate.evaluate(Some(&p), false) {
            Access::Denied { notice } => assert!(notice.contains("Access denied")),
            other => panic!("expected denial, got {:?}", other),
        }
    }

    #[test]
    fn test_loading_withholds_rendering_even_for_admin() {
        // No protected content may render during the loading phase.
        let gate = RoleGate::admin_only();
        let p = profile("admin");
        assert_eq!(gate.evaluate(Some(&p), true), Access::Pending);
        assert_eq!(gate.evaluate(None, true), Access::Pending);
    }

    #[test]
    fn test_missing_profile_denied() {
        let gate = RoleGate::admin_only();
        assert!(matches!(
            gate.evaluate(None, false),
            Access::Denied { .. }
        ));
    }
}
