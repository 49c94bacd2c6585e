//! Role-derived capabilities.
//!
//! Every function here is a pure projection of a [`Session`] snapshot and is
//! meant to be recomputed whenever the snapshot changes; results must not be
//! cached across session transitions.

use super::model::Session;
use crate::portal::InstitutionRole;

/// Global operator role check.
pub fn is_operator(session: &Session) -> bool {
    session
        .portal_info
        .as_ref()
        .is_some_and(|info| info.is_operator)
}

/// Operator, or at least one institution membership.
pub fn has_institution_access(session: &Session) -> bool {
    is_operator(session)
        || session
            .portal_info
            .as_ref()
            .is_some_and(|info| !info.institutions.is_empty())
}

/// Same rule as [`has_institution_access`].
pub fn can_manage_portfolios(session: &Session) -> bool {
    has_institution_access(session)
}

/// Operator, or admin of the given institution.
pub fn is_institution_admin(session: &Session, institution_id: &str) -> bool {
    is_operator(session)
        || session
            .portal_info
            .as_ref()
            .and_then(|info| info.membership(institution_id))
            .is_some_and(|m| m.role == InstitutionRole::Admin)
}

/// Institution ids reachable through memberships. Operators see every
/// institution through the API, so this only lists explicit memberships.
pub fn accessible_institution_ids(session: &Session) -> Vec<String> {
    session
        .portal_info
        .as_ref()
        .map(|info| {
            info.institutions
                .iter()
                .map(|m| m.institution_id.clone())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::{InstitutionMembership, PortalInfo};

    fn session_with(info: Option<PortalInfo>) -> Session {
        Session {
            portal_info: info,
            is_hydrated: true,
            is_initialized: true,
            ..Default::default()
        }
    }

    fn teacher_of(institution_id: &str) -> PortalInfo {
        PortalInfo {
            is_operator: false,
            institutions: vec![InstitutionMembership {
                institution_id: institution_id.to_string(),
                institution_name: None,
                role: InstitutionRole::Teacher,
            }],
        }
    }

    #[test]
    fn test_no_portal_info_grants_nothing() {
        let session = session_with(None);
        assert!(!is_operator(&session));
        assert!(!has_institution_access(&session));
        assert!(!can_manage_portfolios(&session));
        assert!(accessible_institution_ids(&session).is_empty());
    }

    #[test]
    fn test_operator_has_access_without_memberships() {
        let session = session_with(Some(PortalInfo {
            is_operator: true,
            institutions: vec![],
        }));
        assert!(is_operator(&session));
        assert!(has_institution_access(&session));
        assert!(can_manage_portfolios(&session));
        assert!(is_institution_admin(&session, "any"));
    }

    #[test]
    fn test_membership_grants_access_but_not_admin() {
        let session = session_with(Some(teacher_of("i-1")));
        assert!(!is_operator(&session));
        assert!(has_institution_access(&session));
        assert!(!is_institution_admin(&session, "i-1"));
        assert_eq!(accessible_institution_ids(&session), vec!["i-1".to_string()]);
    }

    #[test]
    fn test_capabilities_follow_snapshot_changes() {
        let mut session = session_with(Some(teacher_of("i-1")));
        assert!(can_manage_portfolios(&session));
        session.clear_identity();
        assert!(!can_manage_portfolios(&session));
    }
}
