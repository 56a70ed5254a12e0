//! Request principal and its construction from verified token claims
//!
//! A principal is built once per request and never mutated afterwards. All
//! module assignments are normalized to plain names here, so the decision
//! engine only ever sees strings.

use crate::auth::rbac::{ModulePermission, RbacSystem, Role, RoleKind};
use crate::utils::error::{RbacError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Resolved identity attached to one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    /// User identifier from the token subject
    pub user_id: String,
    /// Role kind in effect for this request
    pub role_kind: RoleKind,
    /// Names of the modules assigned to the user
    pub assigned_module_names: BTreeSet<String>,
    /// Custom role the user is attached to, if any
    pub custom_role_id: Option<Uuid>,
    /// Grants copied from the custom role at resolution time
    pub module_permissions: Option<Vec<ModulePermission>>,
}

impl Principal {
    pub fn new(user_id: impl Into<String>, role_kind: RoleKind) -> Self {
        Self {
            user_id: user_id.into(),
            role_kind,
            assigned_module_names: BTreeSet::new(),
            custom_role_id: None,
            module_permissions: None,
        }
    }

    /// Attach assigned modules, normalizing the names
    pub fn with_modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.assigned_module_names
            .extend(modules.into_iter().filter_map(|m| normalize_module_name(m.as_ref())));
        self
    }

    /// Attach a custom role: its kind becomes authoritative and its grants
    /// become the permission snapshot
    pub fn with_custom_role(mut self, role: &Role) -> Self {
        self.role_kind = role.kind;
        self.custom_role_id = Some(role.id());
        self.module_permissions = Some(role.module_permissions.clone());
        self
    }

    pub fn with_module_permissions(mut self, permissions: Vec<ModulePermission>) -> Self {
        self.module_permissions = Some(permissions);
        self
    }

    pub fn is_assigned(&self, module: &str) -> bool {
        self.assigned_module_names.contains(module)
    }
}

fn normalize_module_name(name: &str) -> Option<String> {
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// Module assignment as it appears in token payloads: either a bare name or a
/// populated module document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssignedModule {
    Name(String),
    Populated(PopulatedModule),
}

/// Populated module document; only the name is used
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulatedModule {
    pub name: String,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl AssignedModule {
    pub fn name(&self) -> &str {
        match self {
            AssignedModule::Name(name) => name,
            AssignedModule::Populated(module) => &module.name,
        }
    }
}

/// Claims of a verified token, as handed over by the token verifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user id)
    pub sub: String,
    /// Role kind identifier
    pub role: String,
    /// Assigned modules
    #[serde(default)]
    pub modules: Vec<AssignedModule>,
    /// Custom role id
    #[serde(default)]
    pub custom_role_id: Option<Uuid>,
}

/// Builds principals from verified claims and the role registry
#[derive(Debug, Clone)]
pub struct PrincipalResolver {
    rbac: Arc<RbacSystem>,
}

impl PrincipalResolver {
    pub fn new(rbac: Arc<RbacSystem>) -> Self {
        Self { rbac }
    }

    /// Resolve a principal for one request
    pub fn resolve(&self, claims: &TokenClaims) -> Result<Principal> {
        let role_kind: RoleKind = claims.role.parse()?;
        let mut principal = Principal::new(claims.sub.clone(), role_kind)
            .with_modules(claims.modules.iter().map(AssignedModule::name));

        if let Some(role_id) = claims.custom_role_id {
            let role = self
                .rbac
                .get_role(role_id)
                .ok_or_else(|| RbacError::not_found(format!("Role {}", role_id)))?;
            if !role.is_active {
                return Err(RbacError::RoleInactive(role.name));
            }
            if !role.is_system {
                principal = principal.with_custom_role(&role);
            }
        }

        debug!(
            "Resolved principal {} as {} with {} module(s)",
            principal.user_id,
            principal.role_kind,
            principal.assigned_module_names.len()
        );
        Ok(principal)
    }
}
