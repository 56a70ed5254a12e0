//! Role registry: shortcut policies and role lifecycle

use crate::auth::principal::Principal;
use crate::core::models::Metadata;
use crate::utils::error::{RbacError, Result};
use dashmap::mapref::entry::Entry;
use tracing::{info, warn};
use uuid::Uuid;

use super::helpers::{ensure_super_admin, merge_duplicate_rows, normalize_name};
use super::system::RbacSystem;
use super::types::{ModulePermission, PermissionAction, Role, RoleKind, ShortcutPolicy};

/// Pseudo-modules a NormalUser may view and edit
pub const PERSONAL_EDITABLE_MODULES: [&str; 2] = ["Profile", "Settings"];

/// Pseudo-modules a NormalUser may view
pub const PERSONAL_VIEW_MODULES: [&str; 2] = ["Dashboard", "Personal Dashboard"];

/// Shortcut policy baked in for a role kind
pub fn role_shortcut(kind: RoleKind) -> ShortcutPolicy {
    match kind {
        RoleKind::SuperAdmin => ShortcutPolicy::Bypass,
        RoleKind::Admin => ShortcutPolicy::AssignedFullAccess,
        RoleKind::Viewer => ShortcutPolicy::AssignedReadOnly,
        RoleKind::NormalUser => ShortcutPolicy::PersonalOnly,
    }
}

/// Whether `module` is one of the fixed personal pseudo-modules
pub fn is_personal_module(module: &str) -> bool {
    PERSONAL_EDITABLE_MODULES.contains(&module) || PERSONAL_VIEW_MODULES.contains(&module)
}

/// The fixed allow-list applied to NormalUser principals
pub fn personal_access_allows(module: &str, action: PermissionAction) -> bool {
    if PERSONAL_EDITABLE_MODULES.contains(&module) {
        matches!(action, PermissionAction::View | PermissionAction::Edit)
    } else if PERSONAL_VIEW_MODULES.contains(&module) {
        action == PermissionAction::View
    } else {
        false
    }
}

/// Input for creating a custom role
#[derive(Debug, Clone)]
pub struct NewRole {
    pub name: String,
    pub kind: RoleKind,
    pub description: String,
    pub module_permissions: Vec<ModulePermission>,
}

impl NewRole {
    pub fn new(name: impl Into<String>, kind: RoleKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: String::new(),
            module_permissions: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_permission(mut self, permission: ModulePermission) -> Self {
        self.module_permissions.push(permission);
        self
    }
}

/// Partial update of a role's descriptive fields
#[derive(Debug, Clone, Default)]
pub struct RoleUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl RbacSystem {
    /// Get role by id
    pub fn get_role(&self, role_id: Uuid) -> Option<Role> {
        self.roles.get(&role_id).map(|role| role.value().clone())
    }

    /// Get role by name
    pub fn get_role_by_name(&self, name: &str) -> Option<Role> {
        let id = *self.names.get(name)?;
        self.get_role(id)
    }

    /// The seeded system role for `kind`
    pub fn system_role(&self, kind: RoleKind) -> Result<Role> {
        self.get_role_by_name(kind.as_str())
            .filter(|role| role.is_system)
            .ok_or_else(|| RbacError::not_found(format!("System role {}", kind)))
    }

    /// Create a custom role
    pub fn create_role(&self, actor: &Principal, new_role: NewRole) -> Result<Role> {
        ensure_super_admin(actor, "create role")?;
        let name = normalize_name(&new_role.name, "Role")?;

        let role = Role {
            metadata: Metadata::new(),
            name: name.clone(),
            kind: new_role.kind,
            description: new_role.description,
            module_permissions: merge_duplicate_rows(new_role.module_permissions),
            is_system: false,
            is_active: true,
        };

        match self.names.entry(name.clone()) {
            Entry::Occupied(_) => {
                return Err(RbacError::conflict(format!("Role name {} already exists", name)));
            }
            Entry::Vacant(slot) => {
                slot.insert(role.id());
            }
        }
        self.roles.insert(role.id(), role.clone());

        info!("Created role {} ({}) by {}", role.name, role.kind, actor.user_id);
        Ok(role)
    }

    /// Update a role's name, description or active flag
    pub fn update_role(
        &self,
        actor: &Principal,
        role_id: Uuid,
        update: RoleUpdate,
        expected_version: Option<i64>,
    ) -> Result<Role> {
        ensure_super_admin(actor, "update role")?;
        let current = self.role_or_not_found(role_id)?;

        let new_name = match update.name.as_deref() {
            Some(name) => Some(normalize_name(name, "Role")?).filter(|n| *n != current.name),
            None => None,
        };

        if current.is_system {
            if new_name.is_some() {
                warn!("Rejected rename of system role {} by {}", current.name, actor.user_id);
                return Err(RbacError::system_role_immutable(format!(
                    "cannot rename system role {}",
                    current.name
                )));
            }
            if update.is_active == Some(false) {
                warn!("Rejected deactivation of system role {} by {}", current.name, actor.user_id);
                return Err(RbacError::system_role_immutable(format!(
                    "cannot deactivate system role {}",
                    current.name
                )));
            }
        }

        if let Some(name) = &new_name {
            match self.names.entry(name.clone()) {
                Entry::Occupied(_) => {
                    return Err(RbacError::conflict(format!("Role name {} already exists", name)));
                }
                Entry::Vacant(slot) => {
                    slot.insert(role_id);
                }
            }
        }

        let result = self.with_role_mut(role_id, expected_version, |role| {
            let previous_name = role.name.clone();
            if let Some(name) = &new_name {
                role.name = name.clone();
            }
            if let Some(description) = update.description {
                role.description = description;
            }
            if let Some(is_active) = update.is_active {
                role.is_active = is_active;
            }
            Ok(previous_name)
        });

        match result {
            Ok(previous_name) => {
                if new_name.is_some() {
                    self.names.remove(&previous_name);
                }
                let role = self.role_or_not_found(role_id)?;
                info!("Updated role {} by {}", role.name, actor.user_id);
                Ok(role)
            }
            Err(e) => {
                if let Some(name) = &new_name {
                    self.names.remove(name);
                }
                Err(e)
            }
        }
    }

    /// Delete a custom role. System roles are never deleted.
    pub fn delete_role(&self, actor: &Principal, role_id: Uuid) -> Result<Role> {
        ensure_super_admin(actor, "delete role")?;

        let removed = self.roles.remove_if(&role_id, |_, role| !role.is_system);
        match removed {
            Some((_, role)) => {
                self.names.remove(&role.name);
                info!("Deleted role {} by {}", role.name, actor.user_id);
                Ok(role)
            }
            None => match self.get_role(role_id) {
                Some(role) => {
                    warn!("Rejected deletion of system role {} by {}", role.name, actor.user_id);
                    Err(RbacError::system_role_immutable(format!(
                        "cannot delete system role {}",
                        role.name
                    )))
                }
                None => Err(RbacError::not_found(format!("Role {}", role_id))),
            },
        }
    }
}
