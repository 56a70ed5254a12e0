//! Authorization integration tests
//!
//! Role administration, claims resolution and module decisions working
//! together through `AuthSystem`.

#[cfg(test)]
mod tests {
    use crate::common::assertions::DecisionAssertions;
    use crate::common::{ClaimsFactory, PrincipalFactory, sample_auth_system};
    use crate::{assert_err, assert_ok};
    use module_rbac::RbacError;
    use module_rbac::auth::{
        DenyReason, ModulePermission, NewModule, NewRole, PermissionAction, RoleKind, RoleUpdate,
    };

    // ==================== Role shortcuts ====================

    #[test]
    fn test_admin_claims_get_full_access_to_assigned_modules() {
        let auth = sample_auth_system();
        let principal = assert_ok!(auth.resolve(&ClaimsFactory::create("admin", &["Blog"])));

        for action in PermissionAction::ALL {
            assert_ok!(auth.guard().authorize(Some(&principal), "Blog", action)).assert_allowed();
        }
        assert_ok!(
            auth.guard()
                .authorize(Some(&principal), "YouTube", PermissionAction::View)
        )
        .assert_denied_with(DenyReason::ModuleNotAssigned);
    }

    #[test]
    fn test_viewer_claims_are_read_only() {
        let auth = sample_auth_system();
        let principal = assert_ok!(auth.resolve(&ClaimsFactory::create("viewer", &["Blog"])));

        assert_ok!(
            auth.guard()
                .authorize(Some(&principal), "Blog", PermissionAction::View)
        )
        .assert_allowed();
        assert_ok!(
            auth.guard()
                .authorize(Some(&principal), "Blog", PermissionAction::Edit)
        )
        .assert_denied_with(DenyReason::ReadOnlyRole);
    }

    #[test]
    fn test_normal_user_claims_reach_personal_pages_only() {
        let auth = sample_auth_system();
        let principal = assert_ok!(auth.resolve(&ClaimsFactory::create("normal_user", &["Blog"])));

        assert_ok!(
            auth.guard()
                .authorize(Some(&principal), "Settings", PermissionAction::Edit)
        )
        .assert_allowed();
        assert_ok!(
            auth.guard()
                .authorize(Some(&principal), "Blog", PermissionAction::View)
        )
        .assert_denied_with(DenyReason::NormalUserRestricted);
    }

    #[test]
    fn test_super_admin_still_blocked_by_disabled_module() {
        let auth = sample_auth_system();
        let root = PrincipalFactory::super_admin();

        assert_ok!(
            auth.guard()
                .authorize(Some(&root), "YouTube", PermissionAction::Delete)
        )
        .assert_allowed();
        assert_ok!(
            auth.guard()
                .authorize(Some(&root), "Podcasts", PermissionAction::View)
        )
        .assert_denied_with(DenyReason::ModuleDisabled);
    }

    // ==================== Custom roles ====================

    #[test]
    fn test_custom_role_narrows_admin_after_resolution() {
        let auth = sample_auth_system();
        let root = PrincipalFactory::super_admin();
        let blog = auth.modules().get_by_name("Blog").unwrap();

        let role = assert_ok!(auth.rbac().create_role(
            &root,
            NewRole::new("blog_reviewers", RoleKind::Admin).with_permission(
                ModulePermission::new(blog.id(), "Blog", [PermissionAction::View])
            ),
        ));

        let claims = ClaimsFactory::with_custom_role("admin", &["Blog"], role.id());
        let principal = assert_ok!(auth.resolve(&claims));

        assert_ok!(
            auth.guard()
                .authorize(Some(&principal), "Blog", PermissionAction::Delete)
        )
        .assert_denied_with(DenyReason::MissingModulePermission);
        assert_ok!(
            auth.guard()
                .authorize(Some(&principal), "Blog", PermissionAction::View)
        )
        .assert_allowed();
    }

    #[test]
    fn test_grant_changes_apply_to_newly_resolved_principals() {
        let auth = sample_auth_system();
        let root = PrincipalFactory::super_admin();
        let blog = auth.modules().get_by_name("Blog").unwrap();

        let role = assert_ok!(auth.rbac().create_role(
            &root,
            NewRole::new("blog_team", RoleKind::Admin).with_permission(ModulePermission::new(
                blog.id(),
                "Blog",
                [PermissionAction::View]
            )),
        ));
        let claims = ClaimsFactory::with_custom_role("admin", &["Blog"], role.id());
        let before = assert_ok!(auth.resolve(&claims));

        assert_ok!(auth.rbac().add_module_permission(
            &root,
            role.id(),
            ModulePermission::new(blog.id(), "Blog", [PermissionAction::Edit]),
        ));
        let after = assert_ok!(auth.resolve(&claims));

        // A principal keeps the snapshot it was resolved with
        assert_ok!(
            auth.guard()
                .authorize(Some(&before), "Blog", PermissionAction::Edit)
        )
        .assert_denied_with(DenyReason::MissingModulePermission);
        assert_ok!(
            auth.guard()
                .authorize(Some(&after), "Blog", PermissionAction::Edit)
        )
        .assert_allowed();

        assert_ok!(auth.rbac().revoke(&root, role.id(), blog.id()));
        let revoked = assert_ok!(auth.resolve(&claims));
        assert_ok!(
            auth.guard()
                .authorize(Some(&revoked), "Blog", PermissionAction::Delete)
        )
        .assert_allowed();
    }

    #[test]
    fn test_custom_role_kind_overrides_claimed_role() {
        let auth = sample_auth_system();
        let root = PrincipalFactory::super_admin();
        let role = assert_ok!(
            auth.rbac()
                .create_role(&root, NewRole::new("guests", RoleKind::Viewer))
        );

        let claims = ClaimsFactory::with_custom_role("admin", &["Blog"], role.id());
        let principal = assert_ok!(auth.resolve(&claims));
        assert_eq!(principal.role_kind, RoleKind::Viewer);

        assert_ok!(
            auth.guard()
                .authorize(Some(&principal), "Blog", PermissionAction::Edit)
        )
        .assert_denied_with(DenyReason::ReadOnlyRole);
    }

    #[test]
    fn test_system_role_reference_keeps_claimed_kind() {
        let auth = sample_auth_system();
        let admin_role = assert_ok!(auth.rbac().system_role(RoleKind::Admin));

        let claims = ClaimsFactory::with_custom_role("admin", &["Blog"], admin_role.id());
        let principal = assert_ok!(auth.resolve(&claims));
        assert!(principal.module_permissions.is_none());
        assert_ok!(
            auth.guard()
                .authorize(Some(&principal), "Blog", PermissionAction::Delete)
        )
        .assert_allowed();
    }

    #[test]
    fn test_deactivated_and_deleted_roles_fail_resolution() {
        let auth = sample_auth_system();
        let root = PrincipalFactory::super_admin();
        let role = assert_ok!(
            auth.rbac()
                .create_role(&root, NewRole::new("seasonal", RoleKind::Admin))
        );
        let claims = ClaimsFactory::with_custom_role("admin", &["Blog"], role.id());

        assert_ok!(auth.rbac().update_role(
            &root,
            role.id(),
            RoleUpdate {
                is_active: Some(false),
                ..Default::default()
            },
            None,
        ));
        let err = assert_err!(auth.resolve(&claims));
        assert!(matches!(err, RbacError::RoleInactive(_)));

        assert_ok!(auth.rbac().delete_role(&root, role.id()));
        let err = assert_err!(auth.resolve(&claims));
        assert!(matches!(err, RbacError::NotFound(_)));
    }

    #[test]
    fn test_unknown_module_is_an_error() {
        let auth = sample_auth_system();
        let admin = PrincipalFactory::admin(&["Gallery"]);
        let err = assert_err!(
            auth.guard()
                .authorize(Some(&admin), "Gallery", PermissionAction::View)
        );
        assert!(matches!(err, RbacError::UnknownModule(_)));
        assert!(err.is_integrity_error());
    }

    // ==================== Catalog changes ====================

    #[test]
    fn test_disabling_a_module_blocks_assigned_users() {
        let auth = sample_auth_system();
        let root = PrincipalFactory::super_admin();
        let admin = PrincipalFactory::admin(&["Blog"]);
        let blog = auth.modules().get_by_name("Blog").unwrap();

        assert!(assert_ok!(auth.guard().is_reachable(&admin, "Blog")));
        assert_ok!(auth.modules().disable(&root, blog.id()));

        assert!(!assert_ok!(auth.guard().is_reachable(&admin, "Blog")));
        assert_ok!(
            auth.guard()
                .authorize(Some(&admin), "Blog", PermissionAction::View)
        )
        .assert_denied_with(DenyReason::ModuleDisabled);

        assert_ok!(auth.modules().enable(&root, blog.id()));
        assert_ok!(
            auth.guard()
                .authorize(Some(&admin), "Blog", PermissionAction::View)
        )
        .assert_allowed();
    }

    #[test]
    fn test_recreated_module_keeps_custom_grant_narrowing() {
        let auth = sample_auth_system();
        let root = PrincipalFactory::super_admin();
        let blog = auth.modules().get_by_name("Blog").unwrap();

        let role = assert_ok!(auth.rbac().create_role(
            &root,
            NewRole::new("blog_reviewers", RoleKind::Admin).with_permission(
                ModulePermission::new(blog.id(), "Blog", [PermissionAction::View])
            ),
        ));
        let claims = ClaimsFactory::with_custom_role("admin", &["Blog"], role.id());

        // Catalog-only re-creation leaves the row under the old id
        assert_ok!(auth.modules().delete_module(&root, blog.id()));
        let recreated = assert_ok!(auth.modules().create_module(&root, NewModule::new("Blog")));
        assert_ne!(recreated.id(), blog.id());

        let principal = assert_ok!(auth.resolve(&claims));
        assert_ok!(
            auth.guard()
                .authorize(Some(&principal), "Blog", PermissionAction::Delete)
        )
        .assert_denied_with(DenyReason::MissingModulePermission);
        assert_ok!(
            auth.guard()
                .authorize(Some(&principal), "Blog", PermissionAction::View)
        )
        .assert_allowed();

        // Going through the auth system moves the row to the new id
        assert_ok!(auth.modules().delete_module(&root, recreated.id()));
        let current = assert_ok!(auth.create_module(&root, NewModule::new("Blog")));
        let role = auth.rbac().get_role(role.id()).unwrap();
        assert_eq!(role.module_permissions.len(), 1);
        assert_eq!(role.module_permissions[0].module_id, current.id());

        let principal = assert_ok!(auth.resolve(&claims));
        assert_ok!(
            auth.guard()
                .authorize(Some(&principal), "Blog", PermissionAction::Edit)
        )
        .assert_denied_with(DenyReason::MissingModulePermission);
    }

    #[test]
    fn test_renamed_module_grants_stay_with_the_module() {
        let auth = sample_auth_system();
        let root = PrincipalFactory::super_admin();
        let blog = auth.modules().get_by_name("Blog").unwrap();

        let role = assert_ok!(auth.rbac().create_role(
            &root,
            NewRole::new("blog_reviewers", RoleKind::Admin).with_permission(
                ModulePermission::new(blog.id(), "Blog", [PermissionAction::View])
            ),
        ));
        assert_ok!(auth.rename_module(&root, blog.id(), "Articles", None));
        let fresh = assert_ok!(auth.create_module(&root, NewModule::new("Blog")));

        let role = auth.rbac().get_role(role.id()).unwrap();
        assert_eq!(role.module_permissions.len(), 1);
        assert_eq!(role.module_permissions[0].module_id, blog.id());
        assert_eq!(role.module_permissions[0].module_name, "Articles");
        assert!(role.permission_for(fresh.id()).is_none());

        let claims = ClaimsFactory::with_custom_role("admin", &["Articles", "Blog"], role.id());
        let principal = assert_ok!(auth.resolve(&claims));
        assert_ok!(
            auth.guard()
                .authorize(Some(&principal), "Articles", PermissionAction::Delete)
        )
        .assert_denied_with(DenyReason::MissingModulePermission);
        assert_ok!(
            auth.guard()
                .authorize(Some(&principal), "Blog", PermissionAction::Delete)
        )
        .assert_allowed();
    }
}
