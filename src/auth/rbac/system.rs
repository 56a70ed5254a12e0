//! RBAC system core functionality

use crate::core::models::Metadata;
use crate::utils::error::{RbacError, Result};
use dashmap::DashMap;
use tracing::{debug, info};
use uuid::Uuid;

use super::types::{Role, RoleKind};

/// RBAC system holding the role registry
///
/// Roles are independent aggregates. Each mutation runs its read-modify-write
/// while holding the entry lock of the role it targets, so concurrent edits of
/// one role are serialized and edits of different roles never contend.
#[derive(Debug)]
pub struct RbacSystem {
    /// Role definitions keyed by id
    pub(super) roles: DashMap<Uuid, Role>,
    /// Unique name index
    pub(super) names: DashMap<String, Uuid>,
}

impl Default for RbacSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl RbacSystem {
    /// Create a new RBAC system with one seeded system role per kind
    pub fn new() -> Self {
        info!("Initializing RBAC system");

        let rbac = Self {
            roles: DashMap::new(),
            names: DashMap::new(),
        };
        rbac.initialize_system_roles();

        info!("RBAC system initialized successfully");
        rbac
    }

    /// Seed the system roles
    fn initialize_system_roles(&self) {
        debug!("Initializing system roles");

        for kind in RoleKind::ALL {
            let role = Role {
                metadata: Metadata::new(),
                name: kind.as_str().to_string(),
                kind,
                description: system_role_description(kind).to_string(),
                module_permissions: Vec::new(),
                is_system: true,
                is_active: true,
            };
            self.names.insert(role.name.clone(), role.id());
            self.roles.insert(role.id(), role);
        }

        debug!("Initialized {} system roles", self.roles.len());
    }

    /// List all roles, ordered by name
    pub fn list_roles(&self) -> Vec<Role> {
        let mut roles: Vec<Role> = self.roles.iter().map(|entry| entry.value().clone()).collect();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        roles
    }

    /// Apply `f` to a draft of the role and commit it only if `f` succeeds.
    ///
    /// The entry lock is held for the whole read-modify-write.
    pub(super) fn with_role_mut<T>(
        &self,
        role_id: Uuid,
        expected_version: Option<i64>,
        f: impl FnOnce(&mut Role) -> Result<T>,
    ) -> Result<T> {
        let mut entry = self
            .roles
            .get_mut(&role_id)
            .ok_or_else(|| RbacError::not_found(format!("Role {}", role_id)))?;

        entry.metadata.check_version(expected_version).map_err(|current| {
            RbacError::conflict(format!(
                "Role {} was modified concurrently (expected version {}, found {})",
                role_id,
                expected_version.unwrap_or_default(),
                current
            ))
        })?;

        let mut draft = entry.value().clone();
        let output = f(&mut draft)?;
        draft.metadata.touch();
        *entry = draft;
        Ok(output)
    }
}

fn system_role_description(kind: RoleKind) -> &'static str {
    match kind {
        RoleKind::SuperAdmin => "Super administrator with unrestricted access",
        RoleKind::Admin => "Administrator with full access to assigned modules",
        RoleKind::NormalUser => "Regular user limited to personal pages",
        RoleKind::Viewer => "Read-only access to assigned modules",
    }
}
