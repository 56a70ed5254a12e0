//! RBAC type definitions

use crate::core::models::Metadata;
use crate::utils::error::RbacError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Built-in role category. Every user carries exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleKind {
    /// Bypasses every check
    SuperAdmin,
    /// Full access to assigned modules
    Admin,
    /// Personal pages only
    NormalUser,
    /// Read-only access to assigned modules
    Viewer,
}

impl RoleKind {
    /// Every role kind, in seeding order
    pub const ALL: [RoleKind; 4] = [
        RoleKind::SuperAdmin,
        RoleKind::Admin,
        RoleKind::NormalUser,
        RoleKind::Viewer,
    ];

    /// Canonical identifier, also used as the seeded system role name
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleKind::SuperAdmin => "super_admin",
            RoleKind::Admin => "admin",
            RoleKind::NormalUser => "normal_user",
            RoleKind::Viewer => "viewer",
        }
    }
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleKind {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(RoleKind::SuperAdmin),
            "admin" => Ok(RoleKind::Admin),
            "normal_user" => Ok(RoleKind::NormalUser),
            "viewer" => Ok(RoleKind::Viewer),
            _ => Err(RbacError::UnknownRoleKind(s.to_string())),
        }
    }
}

/// Action a permission grant can allow. Actions are independent bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionAction {
    View,
    Create,
    Edit,
    Delete,
}

impl PermissionAction {
    /// Every action
    pub const ALL: [PermissionAction; 4] = [
        PermissionAction::View,
        PermissionAction::Create,
        PermissionAction::Edit,
        PermissionAction::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionAction::View => "view",
            PermissionAction::Create => "create",
            PermissionAction::Edit => "edit",
            PermissionAction::Delete => "delete",
        }
    }
}

impl fmt::Display for PermissionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionAction {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(PermissionAction::View),
            "create" => Ok(PermissionAction::Create),
            "edit" => Ok(PermissionAction::Edit),
            "delete" => Ok(PermissionAction::Delete),
            _ => Err(RbacError::UnknownAction(s.to_string())),
        }
    }
}

/// Explicit grant of actions on one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulePermission {
    /// Module identifier
    pub module_id: Uuid,
    /// Module name at the time of the grant
    pub module_name: String,
    /// Allowed actions
    pub actions: BTreeSet<PermissionAction>,
}

impl ModulePermission {
    /// Create a new module permission row
    pub fn new(
        module_id: Uuid,
        module_name: impl Into<String>,
        actions: impl IntoIterator<Item = PermissionAction>,
    ) -> Self {
        Self {
            module_id,
            module_name: module_name.into(),
            actions: actions.into_iter().collect(),
        }
    }

    /// Whether the row allows `action`
    pub fn allows(&self, action: PermissionAction) -> bool {
        self.actions.contains(&action)
    }
}

/// Role definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    /// Role metadata
    #[serde(flatten)]
    pub metadata: Metadata,
    /// Role name (unique)
    pub name: String,
    /// Built-in category this role belongs to
    pub kind: RoleKind,
    /// Role description
    pub description: String,
    /// Explicit module grants, at most one row per module id
    #[serde(default)]
    pub module_permissions: Vec<ModulePermission>,
    /// Whether this is a seeded system role
    pub is_system: bool,
    /// Whether the role can currently be attached to principals
    pub is_active: bool,
}

impl Role {
    /// Role identifier
    pub fn id(&self) -> Uuid {
        self.metadata.id
    }
}

/// Hard-coded behavior attached to a role kind, applied before explicit grants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutPolicy {
    /// Every module, every action
    Bypass,
    /// Every action on assigned modules; custom grants may narrow it
    AssignedFullAccess,
    /// View only, on assigned modules
    AssignedReadOnly,
    /// Fixed personal pseudo-modules only
    PersonalOnly,
}
