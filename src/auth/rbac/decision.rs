//! Authorization decision engine
//!
//! `authorize` is a pure function over an already-resolved principal, the
//! module it targets and the requested action. It performs no I/O and keeps
//! no state, so it is safe to call from any number of request handlers.

use crate::auth::modules::ModuleTarget;
use crate::auth::principal::Principal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::permissions::{ModuleRef, find_grant};
use super::roles::{personal_access_allows, role_shortcut};
use super::types::{PermissionAction, ShortcutPolicy};

/// Why a request was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DenyReason {
    /// Administratively disabled; no role can bypass
    ModuleDisabled,
    /// Viewer attempted a non-View action
    ReadOnlyRole,
    /// Module not in the principal's assigned set
    ModuleNotAssigned,
    /// NormalUser attempted anything outside their fixed allowed set
    NormalUserRestricted,
    /// Admin's custom-role grant excludes this action
    MissingModulePermission,
    /// No principal resolved
    Unauthenticated,
}

impl DenyReason {
    /// Stable machine-readable code for response bodies
    pub fn code(&self) -> &'static str {
        match self {
            DenyReason::ModuleDisabled => "MODULE_DISABLED",
            DenyReason::ReadOnlyRole => "READ_ONLY_ROLE",
            DenyReason::ModuleNotAssigned => "MODULE_NOT_ASSIGNED",
            DenyReason::NormalUserRestricted => "NORMAL_USER_RESTRICTED",
            DenyReason::MissingModulePermission => "MISSING_MODULE_PERMISSION",
            DenyReason::Unauthenticated => "UNAUTHENTICATED",
        }
    }

    /// Reasons a front end turns into a redirect on navigation routes
    pub fn is_redirectable(&self) -> bool {
        matches!(
            self,
            DenyReason::ModuleNotAssigned | DenyReason::NormalUserRestricted
        )
    }

    pub fn message(&self) -> &'static str {
        match self {
            DenyReason::ModuleDisabled => "Module is disabled",
            DenyReason::ReadOnlyRole => "Role is read-only",
            DenyReason::ModuleNotAssigned => "Module is not assigned to this user",
            DenyReason::NormalUserRestricted => "Only personal pages are available to this user",
            DenyReason::MissingModulePermission => "Role does not grant this action on the module",
            DenyReason::Unauthenticated => "Authentication required",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of an authorization check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "reason", rename_all = "snake_case")]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn deny_reason(&self) -> Option<DenyReason> {
        match self {
            Decision::Allow => None,
            Decision::Deny(reason) => Some(*reason),
        }
    }
}

/// Decide whether `principal` may perform `action` on `target`.
///
/// Checks run in a fixed order and short-circuit: disabled module, missing
/// principal, then the role-kind shortcut. SuperAdmin, Viewer and NormalUser
/// shortcuts ignore custom grants entirely; for Admin a custom grant row on
/// the target module can only narrow the default full access.
pub fn authorize(
    principal: Option<&Principal>,
    target: &ModuleTarget,
    action: PermissionAction,
) -> Decision {
    if !target.enabled {
        return Decision::Deny(DenyReason::ModuleDisabled);
    }

    let Some(principal) = principal else {
        return Decision::Deny(DenyReason::Unauthenticated);
    };
    let module = target.name.as_str();

    match role_shortcut(principal.role_kind) {
        ShortcutPolicy::Bypass => Decision::Allow,
        ShortcutPolicy::AssignedReadOnly => {
            if action != PermissionAction::View {
                Decision::Deny(DenyReason::ReadOnlyRole)
            } else if principal.is_assigned(module) {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::ModuleNotAssigned)
            }
        }
        ShortcutPolicy::PersonalOnly => {
            if personal_access_allows(module, action) {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::NormalUserRestricted)
            }
        }
        ShortcutPolicy::AssignedFullAccess => {
            if !principal.is_assigned(module) {
                return Decision::Deny(DenyReason::ModuleNotAssigned);
            }
            let Some(snapshot) = principal.module_permissions.as_deref() else {
                return Decision::Allow;
            };
            // Rows keyed by a stale id still narrow a module of the same name
            let row = target
                .id
                .and_then(|id| find_grant(snapshot, ModuleRef::Id(id)))
                .or_else(|| find_grant(snapshot, ModuleRef::Name(module)));
            match row {
                None => Decision::Allow,
                Some(row) if row.allows(action) => Decision::Allow,
                Some(_) => Decision::Deny(DenyReason::MissingModulePermission),
            }
        }
    }
}
