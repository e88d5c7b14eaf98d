//! Well-known staff role name constants.
//!
//! These must match the seed data in the `create_roles_table` migration.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CSM: &str = "csm";
pub const ROLE_TEAM_LEAD: &str = "team_lead";
pub const ROLE_OPERATOR: &str = "operator";
pub const ROLE_RESUME_WRITER: &str = "resume_writer";
pub const ROLE_LINKEDIN_SPECIALIST: &str = "linkedin_specialist";

/// Roles permitted to move an onboarding job between any two statuses,
/// bypassing the transition table (plan gating still applies).
pub const CAN_MOVE_ANY: &[&str] = &[ROLE_ADMIN, ROLE_CSM, ROLE_TEAM_LEAD];

/// True if the role may bypass the onboarding transition table.
pub fn can_move_any(role: &str) -> bool {
    CAN_MOVE_ANY.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privileged_roles_can_move_any() {
        assert!(can_move_any(ROLE_ADMIN));
        assert!(can_move_any(ROLE_CSM));
        assert!(can_move_any(ROLE_TEAM_LEAD));
    }

    #[test]
    fn test_line_roles_cannot_move_any() {
        assert!(!can_move_any(ROLE_OPERATOR));
        assert!(!can_move_any(ROLE_RESUME_WRITER));
        assert!(!can_move_any(ROLE_LINKEDIN_SPECIALIST));
        assert!(!can_move_any("unknown"));
    }
}
