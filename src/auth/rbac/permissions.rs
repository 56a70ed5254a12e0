//! Permission checking and module grant management

use crate::auth::principal::Principal;
use crate::utils::error::{RbacError, Result};
use tracing::{debug, info};
use uuid::Uuid;

use super::helpers::{ensure_super_admin, merge_duplicate_rows};
use super::system::RbacSystem;
use super::types::{ModulePermission, PermissionAction, Role, RoleKind};

/// How a grant row is looked up
#[derive(Debug, Clone, Copy)]
pub enum ModuleRef<'a> {
    Id(Uuid),
    Name(&'a str),
}

impl ModuleRef<'_> {
    fn matches(&self, row: &ModulePermission) -> bool {
        match self {
            ModuleRef::Id(id) => row.module_id == *id,
            ModuleRef::Name(name) => row.module_name == *name,
        }
    }
}

/// Find the grant row for `module` among `grants`
pub fn find_grant<'g>(
    grants: &'g [ModulePermission],
    module: ModuleRef<'_>,
) -> Option<&'g ModulePermission> {
    grants.iter().find(|row| module.matches(row))
}

/// Explicit-grant check with the role-level shortcuts for SuperAdmin and Viewer.
///
/// Missing rows deny.
pub fn has_permission(
    kind: RoleKind,
    grants: &[ModulePermission],
    module: ModuleRef<'_>,
    action: PermissionAction,
) -> bool {
    match kind {
        RoleKind::SuperAdmin => true,
        RoleKind::Viewer => action == PermissionAction::View,
        RoleKind::Admin | RoleKind::NormalUser => {
            find_grant(grants, module).is_some_and(|row| row.allows(action))
        }
    }
}

impl Role {
    /// Check a module grant on this role
    pub fn has_permission(&self, module_id: Uuid, action: PermissionAction) -> bool {
        has_permission(
            self.kind,
            &self.module_permissions,
            ModuleRef::Id(module_id),
            action,
        )
    }

    /// The grant row for `module_id`, if any
    pub fn permission_for(&self, module_id: Uuid) -> Option<&ModulePermission> {
        find_grant(&self.module_permissions, ModuleRef::Id(module_id))
    }

    /// Upsert a row, replacing the action set of an existing one
    pub fn grant(&mut self, permission: ModulePermission) {
        match self
            .module_permissions
            .iter_mut()
            .find(|row| row.module_id == permission.module_id)
        {
            Some(row) => {
                row.module_name = permission.module_name;
                row.actions = permission.actions;
            }
            None => self.module_permissions.push(permission),
        }
    }

    /// Upsert a row, unioning into the action set of an existing one
    pub fn add_module_permission(&mut self, permission: ModulePermission) {
        match self
            .module_permissions
            .iter_mut()
            .find(|row| row.module_id == permission.module_id)
        {
            Some(row) => {
                row.module_name = permission.module_name;
                row.actions.extend(permission.actions);
            }
            None => self.module_permissions.push(permission),
        }
    }

    /// Remove the row for `module_id`. Returns whether a row existed.
    pub fn revoke(&mut self, module_id: Uuid) -> bool {
        let before = self.module_permissions.len();
        self.module_permissions.retain(|row| row.module_id != module_id);
        before != self.module_permissions.len()
    }

    /// Point rows naming `module_name` under a deleted id at `module_id`.
    ///
    /// When the role already holds a row for `module_id`, the stale rows are
    /// dropped instead. Returns whether anything changed.
    pub fn rekey_module(
        &mut self,
        module_name: &str,
        module_id: Uuid,
        is_deleted: impl Fn(Uuid) -> bool,
    ) -> bool {
        let is_stale = |row: &ModulePermission| {
            row.module_name == module_name
                && row.module_id != module_id
                && is_deleted(row.module_id)
        };
        if !self.module_permissions.iter().any(&is_stale) {
            return false;
        }
        if self.permission_for(module_id).is_some() {
            self.module_permissions.retain(|row| !is_stale(row));
        } else {
            for row in self.module_permissions.iter_mut() {
                if is_stale(&*row) {
                    row.module_id = module_id;
                }
            }
            self.module_permissions =
                merge_duplicate_rows(std::mem::take(&mut self.module_permissions));
        }
        true
    }

    /// Update the recorded name on the row for `module_id`
    pub fn rename_module(&mut self, module_id: Uuid, module_name: &str) -> bool {
        match self
            .module_permissions
            .iter_mut()
            .find(|row| row.module_id == module_id && row.module_name != module_name)
        {
            Some(row) => {
                row.module_name = module_name.to_string();
                true
            }
            None => false,
        }
    }
}

impl RbacSystem {
    /// Replace the action set of a role's grant for one module
    pub fn grant(
        &self,
        actor: &Principal,
        role_id: Uuid,
        permission: ModulePermission,
    ) -> Result<Role> {
        ensure_super_admin(actor, "grant module permission")?;
        debug!(
            "Granting {:?} on {} to role {}",
            permission.actions, permission.module_name, role_id
        );
        self.with_role_mut(role_id, None, |role| {
            role.grant(permission);
            Ok(())
        })?;
        self.role_or_not_found(role_id)
    }

    /// Merge actions into a role's grant for one module
    pub fn add_module_permission(
        &self,
        actor: &Principal,
        role_id: Uuid,
        permission: ModulePermission,
    ) -> Result<Role> {
        ensure_super_admin(actor, "add module permission")?;
        debug!(
            "Adding {:?} on {} to role {}",
            permission.actions, permission.module_name, role_id
        );
        self.with_role_mut(role_id, None, |role| {
            role.add_module_permission(permission);
            Ok(())
        })?;
        self.role_or_not_found(role_id)
    }

    /// Bulk assignment: each listed row replaces the existing row for its module
    pub fn assign_module_permissions(
        &self,
        actor: &Principal,
        role_id: Uuid,
        permissions: Vec<ModulePermission>,
        expected_version: Option<i64>,
    ) -> Result<Role> {
        ensure_super_admin(actor, "assign module permissions")?;
        let count = permissions.len();
        self.with_role_mut(role_id, expected_version, |role| {
            for permission in permissions {
                role.grant(permission);
            }
            Ok(())
        })?;
        info!(
            "Assigned {} module permission(s) to role {} by {}",
            count, role_id, actor.user_id
        );
        self.role_or_not_found(role_id)
    }

    /// Remove a role's grant for one module. Idempotent.
    pub fn revoke(&self, actor: &Principal, role_id: Uuid, module_id: Uuid) -> Result<Role> {
        ensure_super_admin(actor, "revoke module permission")?;
        let removed = self.with_role_mut(role_id, None, |role| Ok(role.revoke(module_id)))?;
        if removed {
            debug!("Revoked module {} from role {}", module_id, role_id);
        }
        self.role_or_not_found(role_id)
    }

    /// Re-key grant rows left behind by a deleted module of the same name.
    ///
    /// `is_deleted` tells whether a row's module id is gone from the catalog.
    /// Returns the number of roles updated.
    pub fn rekey_module_grants(
        &self,
        actor: &Principal,
        module_name: &str,
        module_id: Uuid,
        is_deleted: impl Fn(Uuid) -> bool,
    ) -> Result<usize> {
        ensure_super_admin(actor, "re-key module permissions")?;
        let updated = self.update_matching_roles(
            |row| row.module_name == module_name && row.module_id != module_id,
            |role| role.rekey_module(module_name, module_id, &is_deleted),
        )?;
        if updated > 0 {
            info!(
                "Re-keyed {} grants in {} role(s) to module {}",
                module_name, updated, module_id
            );
        }
        Ok(updated)
    }

    /// Record a module's new name on every grant row for it.
    ///
    /// Returns the number of roles updated.
    pub fn rename_module_grants(
        &self,
        actor: &Principal,
        module_id: Uuid,
        module_name: &str,
    ) -> Result<usize> {
        ensure_super_admin(actor, "rename module permissions")?;
        let updated = self.update_matching_roles(
            |row| row.module_id == module_id && row.module_name != module_name,
            |role| role.rename_module(module_id, module_name),
        )?;
        if updated > 0 {
            debug!(
                "Renamed grants for module {} to {} in {} role(s)",
                module_id, module_name, updated
            );
        }
        Ok(updated)
    }

    /// Apply `update` to every role holding a row that satisfies `candidate`.
    /// Roles deleted in between are skipped.
    fn update_matching_roles(
        &self,
        candidate: impl Fn(&ModulePermission) -> bool,
        update: impl Fn(&mut Role) -> bool,
    ) -> Result<usize> {
        let role_ids: Vec<Uuid> = self
            .roles
            .iter()
            .filter(|entry| entry.module_permissions.iter().any(&candidate))
            .map(|entry| *entry.key())
            .collect();

        let mut updated = 0;
        for role_id in role_ids {
            match self.with_role_mut(role_id, None, |role| Ok(update(role))) {
                Ok(true) => updated += 1,
                Ok(false) | Err(RbacError::NotFound(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(updated)
    }

    /// Check a module grant on a stored role
    pub fn role_has_permission(
        &self,
        role_id: Uuid,
        module_id: Uuid,
        action: PermissionAction,
    ) -> Result<bool> {
        Ok(self
            .role_or_not_found(role_id)?
            .has_permission(module_id, action))
    }

    pub(super) fn role_or_not_found(&self, role_id: Uuid) -> Result<Role> {
        self.get_role(role_id)
            .ok_or_else(|| RbacError::not_found(format!("Role {}", role_id)))
    }
}
