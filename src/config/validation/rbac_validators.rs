//! RBAC configuration validators

use super::trait_def::Validate;
use crate::auth::rbac::is_personal_module;
use crate::config::models::*;
use std::collections::HashSet;
use tracing::debug;

impl Validate for RbacConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating RBAC configuration");

        self.guard.validate()?;

        let mut module_names = HashSet::new();
        for module in &self.modules {
            module.validate()?;
            if !module_names.insert(module.name.as_str()) {
                return Err(format!("Duplicate module name: {}", module.name));
            }
        }

        let mut route_ids = HashSet::new();
        for route in &self.routes {
            route.validate()?;
            if !route_ids.insert(route.route.as_str()) {
                return Err(format!("Duplicate route id: {}", route.route));
            }
            if !module_names.contains(route.module.as_str()) && !is_personal_module(&route.module)
            {
                return Err(format!(
                    "Route {} references unknown module {}",
                    route.route, route.module
                ));
            }
        }

        Ok(())
    }
}

impl Validate for GuardConfig {
    fn validate(&self) -> Result<(), String> {
        if self.redirect_restricted_navigation && !self.personal_dashboard_path.starts_with('/') {
            return Err(format!(
                "Personal dashboard path must be absolute, got: {}",
                self.personal_dashboard_path
            ));
        }
        Ok(())
    }
}

impl Validate for ModuleSeed {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Module name cannot be empty".to_string());
        }
        if self.name.trim() != self.name {
            return Err(format!(
                "Module name must not have surrounding whitespace: {:?}",
                self.name
            ));
        }
        Ok(())
    }
}

impl Validate for RouteBinding {
    fn validate(&self) -> Result<(), String> {
        if self.route.trim().is_empty() {
            return Err("Route id cannot be empty".to_string());
        }
        if self.module.trim().is_empty() {
            return Err(format!("Route {} has an empty module name", self.route));
        }
        Ok(())
    }
}
