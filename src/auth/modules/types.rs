//! Module catalog type definitions

use crate::auth::rbac::{RoleKind, is_personal_module};
use crate::core::models::Metadata;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

/// Installable content or feature area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    /// Module metadata
    #[serde(flatten)]
    pub metadata: Metadata,
    /// Module name (unique), used in route bindings and assignments
    pub name: String,
    /// Human readable name
    pub display_name: String,
    /// Disabled modules are unreachable for every principal
    pub enabled: bool,
    /// Role kinds eligible for assignment to this module
    pub allowed_role_kinds: BTreeSet<RoleKind>,
    /// Free-form module settings (icon, route prefix, ...)
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
}

impl Module {
    pub fn id(&self) -> Uuid {
        self.metadata.id
    }

    pub fn allows_role(&self, kind: RoleKind) -> bool {
        self.allowed_role_kinds.contains(&kind)
    }

    /// The view of this module fed into the decision functions
    pub fn target(&self) -> ModuleTarget {
        ModuleTarget {
            id: Some(self.id()),
            name: self.name.clone(),
            enabled: self.enabled,
            allowed_role_kinds: Some(self.allowed_role_kinds.clone()),
        }
    }
}

/// Input for creating a module
#[derive(Debug, Clone)]
pub struct NewModule {
    pub name: String,
    pub display_name: String,
    pub enabled: bool,
    pub allowed_role_kinds: BTreeSet<RoleKind>,
    pub properties: HashMap<String, serde_json::Value>,
}

impl NewModule {
    /// Enabled module open to every role kind
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            enabled: true,
            allowed_role_kinds: RoleKind::ALL.into_iter().collect(),
            properties: HashMap::new(),
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn with_allowed_role_kinds(mut self, kinds: impl IntoIterator<Item = RoleKind>) -> Self {
        self.allowed_role_kinds = kinds.into_iter().collect();
        self
    }
}

/// Resolved state of the module a request targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleTarget {
    /// Catalog id; `None` for personal pseudo-modules outside the catalog
    pub id: Option<Uuid>,
    pub name: String,
    pub enabled: bool,
    /// Eligible role kinds; `None` when the module has no eligibility list
    pub allowed_role_kinds: Option<BTreeSet<RoleKind>>,
}

impl ModuleTarget {
    /// Enabled target without catalog data
    pub fn enabled(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            enabled: true,
            allowed_role_kinds: None,
        }
    }

    /// Disabled target without catalog data
    pub fn disabled(name: impl Into<String>) -> Self {
        Self {
            enabled: false,
            ..Self::enabled(name)
        }
    }

    pub fn is_personal(&self) -> bool {
        is_personal_module(&self.name)
    }
}
