//! Error handling integration tests
//!
//! Tests for error types and their HTTP mapping. These tests verify that
//! errors raised by the registries surface with the right status codes.

#[cfg(test)]
mod tests {
    use crate::common::{PrincipalFactory, sample_auth_system};
    use actix_web::ResponseError;
    use module_rbac::RbacError;
    use module_rbac::auth::{NewRole, RoleKind, RoleUpdate};
    use uuid::Uuid;

    // ==================== Registry errors ====================

    /// Test that system role edits map to 409
    #[test]
    fn test_system_role_immutable_flow() {
        let auth = sample_auth_system();
        let root = PrincipalFactory::super_admin();
        let admin = auth.rbac().system_role(RoleKind::Admin).unwrap();

        let err = auth.rbac().delete_role(&root, admin.id()).unwrap_err();
        assert!(matches!(err, RbacError::SystemRoleImmutable(_)));
        assert_eq!(err.error_response().status().as_u16(), 409);
    }

    /// Test that non super admin actors map to 403
    #[test]
    fn test_forbidden_flow() {
        let auth = sample_auth_system();
        let admin = PrincipalFactory::admin(&["Blog"]);

        let err = auth
            .rbac()
            .create_role(&admin, NewRole::new("mine", RoleKind::Admin))
            .unwrap_err();
        assert!(matches!(err, RbacError::Forbidden(_)));
        assert_eq!(err.error_response().status().as_u16(), 403);
    }

    /// Test that missing roles map to 404
    #[test]
    fn test_not_found_flow() {
        let auth = sample_auth_system();
        let root = PrincipalFactory::super_admin();

        let err = auth
            .rbac()
            .update_role(&root, Uuid::new_v4(), RoleUpdate::default(), None)
            .unwrap_err();
        assert!(matches!(err, RbacError::NotFound(_)));
        assert_eq!(err.error_response().status().as_u16(), 404);
    }

    /// Test that stale versions map to 409
    #[test]
    fn test_conflict_flow() {
        let auth = sample_auth_system();
        let root = PrincipalFactory::super_admin();
        let role = auth
            .rbac()
            .create_role(&root, NewRole::new("editors", RoleKind::Admin))
            .unwrap();

        let update = || RoleUpdate {
            description: Some("changed".to_string()),
            ..Default::default()
        };
        auth.rbac()
            .update_role(&root, role.id(), update(), Some(1))
            .unwrap();
        let err = auth
            .rbac()
            .update_role(&root, role.id(), update(), Some(1))
            .unwrap_err();
        assert!(matches!(err, RbacError::Conflict(_)));
        assert_eq!(err.status_code().as_u16(), 409);
    }

    /// Test that integrity errors are internal errors
    #[test]
    fn test_integrity_errors_are_internal() {
        for err in [
            RbacError::UnknownModule("Gallery".to_string()),
            RbacError::UnknownRoleKind("owner".to_string()),
            RbacError::UnknownAction("publish".to_string()),
            RbacError::config("bad route table"),
        ] {
            assert!(err.is_integrity_error());
            assert_eq!(err.error_response().status().as_u16(), 500);
        }
    }

    /// Test that unknown routes map to 404
    #[test]
    fn test_error_display() {
        let err = RbacError::UnknownRoute("gallery.page".to_string());
        assert!(err.to_string().contains("gallery.page"));
        assert_eq!(err.error_response().status().as_u16(), 404);
    }
}
