//! Authorization system
//!
//! This module ties the role registry, the module catalog, principal
//! resolution and the route guard together.

pub mod guard;
pub mod modules;
pub mod principal;
pub mod rbac;
pub mod routes;

pub use guard::{AccessDenied, AccessGuard, GuardOutcome};
pub use modules::{Module, ModuleRegistry, ModuleTarget, NewModule, is_reachable};
pub use principal::{AssignedModule, Principal, PrincipalResolver, TokenClaims};
pub use rbac::{
    Decision, DenyReason, ModulePermission, NewRole, PermissionAction, RbacSystem, Role,
    RoleKind, RoleUpdate, ShortcutPolicy, authorize, role_shortcut,
};
pub use routes::{RouteRequirement, RouteTable};

use crate::config::Config;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Main authorization system
#[derive(Debug, Clone)]
pub struct AuthSystem {
    /// Role registry
    rbac: Arc<RbacSystem>,
    /// Principal resolver
    resolver: PrincipalResolver,
    /// Route guard, owning the module catalog and route table
    guard: AccessGuard,
}

impl AuthSystem {
    /// Create a new authorization system from configuration
    pub fn new(config: &Config) -> Result<Self> {
        info!("Initializing authorization system");

        let rbac = Arc::new(RbacSystem::new());
        let modules = Arc::new(ModuleRegistry::from_seeds(config.modules())?);
        let routes = Arc::new(RouteTable::from_bindings(config.routes())?);
        let guard = AccessGuard::new(modules, routes, config.guard().clone())?;
        let resolver = PrincipalResolver::new(rbac.clone());

        info!("Authorization system initialized successfully");
        Ok(Self {
            rbac,
            resolver,
            guard,
        })
    }

    pub fn rbac(&self) -> &RbacSystem {
        &self.rbac
    }

    pub fn modules(&self) -> &ModuleRegistry {
        self.guard.modules()
    }

    pub fn guard(&self) -> &AccessGuard {
        &self.guard
    }

    /// Add a module to the catalog and re-key role grants that still name it
    /// under the id of a previously deleted module
    pub fn create_module(&self, actor: &Principal, new_module: NewModule) -> Result<Module> {
        let module = self.modules().create_module(actor, new_module)?;
        self.rbac
            .rekey_module_grants(actor, &module.name, module.id(), |id| {
                self.modules().get(id).is_none()
            })?;
        Ok(module)
    }

    /// Rename a catalog module and record the new name on role grants
    pub fn rename_module(
        &self,
        actor: &Principal,
        module_id: Uuid,
        new_name: &str,
        expected_version: Option<i64>,
    ) -> Result<Module> {
        let module = self
            .modules()
            .rename_module(actor, module_id, new_name, expected_version)?;
        self.rbac
            .rename_module_grants(actor, module.id(), &module.name)?;
        Ok(module)
    }

    /// Build the principal for one request
    pub fn resolve(&self, claims: &TokenClaims) -> Result<Principal> {
        self.resolver.resolve(claims)
    }

    /// Resolve the caller and guard `route` in one step. Missing claims are
    /// treated as an unauthenticated caller.
    pub fn authorize_request(
        &self,
        claims: Option<&TokenClaims>,
        route: &str,
    ) -> Result<GuardOutcome> {
        let principal = claims.map(|c| self.resolve(c)).transpose()?;
        self.guard.check_route(principal.as_ref(), route)
    }
}
