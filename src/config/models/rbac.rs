//! RBAC configuration

use super::*;
use crate::auth::rbac::{PermissionAction, RoleKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level RBAC configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RbacConfig {
    /// Guard behavior flags
    #[serde(default)]
    pub guard: GuardConfig,
    /// Modules seeded into the catalog at startup
    #[serde(default)]
    pub modules: Vec<ModuleSeed>,
    /// Route id to module/action bindings
    #[serde(default)]
    pub routes: Vec<RouteBinding>,
}

/// Guard behavior flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Turn redirectable denials on navigation routes into redirects
    #[serde(default = "default_true")]
    pub redirect_restricted_navigation: bool,
    /// Redirect target for restricted navigation
    #[serde(default = "default_personal_dashboard_path")]
    pub personal_dashboard_path: String,
    /// Also require the principal's role kind to be eligible for the module
    #[serde(default)]
    pub enforce_role_eligibility: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            redirect_restricted_navigation: true,
            personal_dashboard_path: default_personal_dashboard_path(),
            enforce_role_eligibility: false,
        }
    }
}

/// Module seeded into the catalog at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleSeed {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_allowed_role_kinds")]
    pub allowed_role_kinds: Vec<RoleKind>,
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
}

impl ModuleSeed {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            enabled: true,
            allowed_role_kinds: default_allowed_role_kinds(),
            properties: HashMap::new(),
        }
    }
}

/// Static permission requirement of one route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteBinding {
    /// Route identifier, e.g. `blog.delete`
    pub route: String,
    /// Module the route belongs to
    pub module: String,
    /// Action the route performs
    pub action: PermissionAction,
    /// Whether the route is a page navigation rather than an API call
    #[serde(default)]
    pub navigation: bool,
}

fn default_allowed_role_kinds() -> Vec<RoleKind> {
    RoleKind::ALL.to_vec()
}
