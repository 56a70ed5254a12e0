//! Role-Based Access Control (RBAC) system
//!
//! Role registry, module grants and the authorization decision engine.

mod decision;
mod helpers;
mod permissions;
mod roles;
mod system;
mod types;

pub(crate) use helpers::{ensure_super_admin, normalize_name};

pub use decision::{Decision, DenyReason, authorize};
pub use permissions::{ModuleRef, find_grant, has_permission};
pub use roles::{
    NewRole, PERSONAL_EDITABLE_MODULES, PERSONAL_VIEW_MODULES, RoleUpdate, is_personal_module,
    personal_access_allows, role_shortcut,
};
pub use system::RbacSystem;
pub use types::{ModulePermission, PermissionAction, Role, RoleKind, ShortcutPolicy};
