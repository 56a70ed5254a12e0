//! Module reachability: whether a principal may navigate to a module at all,
//! regardless of the action it will attempt there

use crate::auth::principal::Principal;
use crate::auth::rbac::RoleKind;

use super::types::ModuleTarget;

/// Route-level module gate
pub fn is_reachable(principal: &Principal, target: &ModuleTarget) -> bool {
    is_reachable_with(principal, target, false)
}

/// Route-level module gate, optionally also requiring the principal's role
/// kind to be eligible for the module
pub fn is_reachable_with(
    principal: &Principal,
    target: &ModuleTarget,
    enforce_role_eligibility: bool,
) -> bool {
    if !target.enabled {
        return false;
    }
    if principal.role_kind == RoleKind::SuperAdmin {
        return true;
    }
    if principal.role_kind == RoleKind::NormalUser && target.is_personal() {
        return true;
    }
    if !principal.is_assigned(&target.name) {
        return false;
    }
    match (&target.allowed_role_kinds, enforce_role_eligibility) {
        (Some(kinds), true) => kinds.contains(&principal.role_kind),
        _ => true,
    }
}
