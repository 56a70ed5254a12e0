//! Helper methods for RBAC operations

use crate::auth::principal::Principal;
use crate::utils::error::{RbacError, Result};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::types::{ModulePermission, RoleKind};

/// Reject administrative operations from anyone but a SuperAdmin
pub(crate) fn ensure_super_admin(actor: &Principal, operation: &str) -> Result<()> {
    if actor.role_kind == RoleKind::SuperAdmin {
        Ok(())
    } else {
        Err(RbacError::forbidden(format!(
            "{} requires super_admin, actor {} is {}",
            operation, actor.user_id, actor.role_kind
        )))
    }
}

/// Trim a name and reject it when empty
pub(crate) fn normalize_name(name: &str, what: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RbacError::validation(format!("{} name cannot be empty", what)));
    }
    Ok(name.to_string())
}

/// Collapse duplicate module rows into one, merging their action sets
pub(super) fn merge_duplicate_rows(rows: Vec<ModulePermission>) -> Vec<ModulePermission> {
    let mut merged: BTreeMap<Uuid, ModulePermission> = BTreeMap::new();
    let mut order = Vec::new();
    for row in rows {
        match merged.get_mut(&row.module_id) {
            Some(existing) => existing.actions.extend(row.actions),
            None => {
                order.push(row.module_id);
                merged.insert(row.module_id, row);
            }
        }
    }
    order
        .into_iter()
        .filter_map(|id| merged.remove(&id))
        .collect()
}
