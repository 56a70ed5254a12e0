//! Route permission table
//!
//! Maps route identifiers to the module and action they require. The table is
//! built once at startup and never changes afterwards.

use crate::auth::modules::ModuleRegistry;
use crate::auth::rbac::PermissionAction;
use crate::config::RouteBinding;
use crate::utils::error::{RbacError, Result};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::debug;

/// Permission requirement declared for a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequirement {
    pub module: String,
    pub action: PermissionAction,
    /// Page navigation rather than an API call
    pub navigation: bool,
}

/// Immutable lookup from route id to requirement
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: HashMap<String, RouteRequirement>,
}

impl RouteTable {
    /// Build the table from configured bindings
    pub fn from_bindings(bindings: &[RouteBinding]) -> Result<Self> {
        let mut routes = HashMap::with_capacity(bindings.len());
        for binding in bindings {
            let requirement = RouteRequirement {
                module: binding.module.clone(),
                action: binding.action,
                navigation: binding.navigation,
            };
            match routes.entry(binding.route.clone()) {
                Entry::Occupied(_) => {
                    return Err(RbacError::config(format!(
                        "Duplicate route id: {}",
                        binding.route
                    )));
                }
                Entry::Vacant(slot) => {
                    slot.insert(requirement);
                }
            }
        }
        debug!("Route table built with {} route(s)", routes.len());
        Ok(Self { routes })
    }

    /// Build the table from a static `(route, module, action)` list of API routes
    pub fn from_static(entries: &[(&str, &str, PermissionAction)]) -> Result<Self> {
        let bindings: Vec<RouteBinding> = entries
            .iter()
            .map(|(route, module, action)| RouteBinding {
                route: route.to_string(),
                module: module.to_string(),
                action: *action,
                navigation: false,
            })
            .collect();
        Self::from_bindings(&bindings)
    }

    pub fn requirement(&self, route: &str) -> Option<&RouteRequirement> {
        self.routes.get(route)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Routes ordered by id
    pub fn entries(&self) -> Vec<(&str, &RouteRequirement)> {
        let mut entries: Vec<_> = self
            .routes
            .iter()
            .map(|(route, requirement)| (route.as_str(), requirement))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Every route must target a catalog module or a personal pseudo-module
    pub fn check_modules(&self, modules: &ModuleRegistry) -> Result<()> {
        for (route, requirement) in self.entries() {
            if !modules.is_known(&requirement.module) {
                return Err(RbacError::config(format!(
                    "Route {} references unknown module {}",
                    route, requirement.module
                )));
            }
        }
        Ok(())
    }
}
