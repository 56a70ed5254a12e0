//! Module registry: catalog management and module-level checks

use crate::auth::principal::Principal;
use crate::auth::rbac::{
    Decision, PermissionAction, RoleKind, authorize, ensure_super_admin, is_personal_module,
    normalize_name,
};
use crate::config::ModuleSeed;
use crate::core::models::Metadata;
use crate::utils::error::{RbacError, Result};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::collections::BTreeSet;
use tracing::{debug, info};
use uuid::Uuid;

use super::reachability::is_reachable_with;
use super::types::{Module, ModuleTarget, NewModule};

/// Catalog of installable modules
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    /// Modules keyed by id
    modules: DashMap<Uuid, Module>,
    /// Unique name index
    names: DashMap<String, Uuid>,
}

impl ModuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the catalog from configured seeds
    pub fn from_seeds(seeds: &[ModuleSeed]) -> Result<Self> {
        let registry = Self::new();
        for seed in seeds {
            let module = NewModule {
                name: seed.name.clone(),
                display_name: seed
                    .display_name
                    .clone()
                    .unwrap_or_else(|| seed.name.clone()),
                enabled: seed.enabled,
                allowed_role_kinds: seed.allowed_role_kinds.iter().copied().collect(),
                properties: seed.properties.clone(),
            };
            registry
                .insert_module(module)
                .map_err(|e| RbacError::config(format!("Invalid module seed {}: {}", seed.name, e)))?;
        }
        info!("Module registry seeded with {} module(s)", registry.modules.len());
        Ok(registry)
    }

    fn insert_module(&self, new_module: NewModule) -> Result<Module> {
        let name = normalize_name(&new_module.name, "Module")?;
        let module = Module {
            metadata: Metadata::new(),
            display_name: if new_module.display_name.trim().is_empty() {
                name.clone()
            } else {
                new_module.display_name
            },
            name: name.clone(),
            enabled: new_module.enabled,
            allowed_role_kinds: new_module.allowed_role_kinds,
            properties: new_module.properties,
        };

        match self.names.entry(name.clone()) {
            Entry::Occupied(_) => {
                return Err(RbacError::conflict(format!("Module name {} already exists", name)));
            }
            Entry::Vacant(slot) => {
                slot.insert(module.id());
            }
        }
        self.modules.insert(module.id(), module.clone());
        Ok(module)
    }

    /// Apply `f` to a draft of the module under its entry lock and commit on success
    fn with_module_mut<T>(
        &self,
        module_id: Uuid,
        expected_version: Option<i64>,
        f: impl FnOnce(&mut Module) -> Result<T>,
    ) -> Result<T> {
        let mut entry = self
            .modules
            .get_mut(&module_id)
            .ok_or_else(|| RbacError::not_found(format!("Module {}", module_id)))?;

        entry.metadata.check_version(expected_version).map_err(|current| {
            RbacError::conflict(format!(
                "Module {} was modified concurrently (expected version {}, found {})",
                module_id,
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

    fn module_or_not_found(&self, module_id: Uuid) -> Result<Module> {
        self.get(module_id)
            .ok_or_else(|| RbacError::not_found(format!("Module {}", module_id)))
    }

    /// Create a module
    pub fn create_module(&self, actor: &Principal, new_module: NewModule) -> Result<Module> {
        ensure_super_admin(actor, "create module")?;
        let module = self.insert_module(new_module)?;
        info!("Created module {} by {}", module.name, actor.user_id);
        Ok(module)
    }

    /// Rename a module
    pub fn rename_module(
        &self,
        actor: &Principal,
        module_id: Uuid,
        new_name: &str,
        expected_version: Option<i64>,
    ) -> Result<Module> {
        ensure_super_admin(actor, "rename module")?;
        let new_name = normalize_name(new_name, "Module")?;
        let current = self.module_or_not_found(module_id)?;
        if current.name == new_name {
            return Ok(current);
        }

        match self.names.entry(new_name.clone()) {
            Entry::Occupied(_) => {
                return Err(RbacError::conflict(format!(
                    "Module name {} already exists",
                    new_name
                )));
            }
            Entry::Vacant(slot) => {
                slot.insert(module_id);
            }
        }

        let result = self.with_module_mut(module_id, expected_version, |module| {
            Ok(std::mem::replace(&mut module.name, new_name.clone()))
        });
        match result {
            Ok(previous_name) => {
                self.names.remove(&previous_name);
                info!(
                    "Renamed module {} to {} by {}",
                    previous_name, new_name, actor.user_id
                );
                self.module_or_not_found(module_id)
            }
            Err(e) => {
                self.names.remove(&new_name);
                Err(e)
            }
        }
    }

    /// Change the display name of a module
    pub fn set_display_name(
        &self,
        actor: &Principal,
        module_id: Uuid,
        display_name: &str,
    ) -> Result<Module> {
        ensure_super_admin(actor, "update module")?;
        let display_name = normalize_name(display_name, "Module display")?;
        self.with_module_mut(module_id, None, |module| {
            module.display_name = display_name;
            Ok(())
        })?;
        self.module_or_not_found(module_id)
    }

    /// Enable or disable a module
    pub fn set_enabled(
        &self,
        actor: &Principal,
        module_id: Uuid,
        enabled: bool,
        expected_version: Option<i64>,
    ) -> Result<Module> {
        ensure_super_admin(actor, "toggle module")?;
        self.with_module_mut(module_id, expected_version, |module| {
            module.enabled = enabled;
            Ok(())
        })?;
        let module = self.module_or_not_found(module_id)?;
        info!(
            "Module {} {} by {}",
            module.name,
            if enabled { "enabled" } else { "disabled" },
            actor.user_id
        );
        Ok(module)
    }

    pub fn enable(&self, actor: &Principal, module_id: Uuid) -> Result<Module> {
        self.set_enabled(actor, module_id, true, None)
    }

    pub fn disable(&self, actor: &Principal, module_id: Uuid) -> Result<Module> {
        self.set_enabled(actor, module_id, false, None)
    }

    /// Replace the role kinds eligible for a module
    pub fn set_allowed_role_kinds(
        &self,
        actor: &Principal,
        module_id: Uuid,
        kinds: impl IntoIterator<Item = RoleKind>,
    ) -> Result<Module> {
        ensure_super_admin(actor, "update module eligibility")?;
        let kinds: BTreeSet<RoleKind> = kinds.into_iter().collect();
        self.with_module_mut(module_id, None, |module| {
            module.allowed_role_kinds = kinds;
            Ok(())
        })?;
        self.module_or_not_found(module_id)
    }

    /// Remove a module from the catalog
    pub fn delete_module(&self, actor: &Principal, module_id: Uuid) -> Result<Module> {
        ensure_super_admin(actor, "delete module")?;
        let (_, module) = self
            .modules
            .remove(&module_id)
            .ok_or_else(|| RbacError::not_found(format!("Module {}", module_id)))?;
        self.names.remove(&module.name);
        info!("Deleted module {} by {}", module.name, actor.user_id);
        Ok(module)
    }

    pub fn get(&self, module_id: Uuid) -> Option<Module> {
        self.modules.get(&module_id).map(|m| m.value().clone())
    }

    pub fn get_by_name(&self, name: &str) -> Option<Module> {
        let id = *self.names.get(name)?;
        self.get(id)
    }

    /// All modules, ordered by name
    pub fn list(&self) -> Vec<Module> {
        let mut modules: Vec<Module> = self.modules.iter().map(|m| m.value().clone()).collect();
        modules.sort_by(|a, b| a.name.cmp(&b.name));
        modules
    }

    pub fn list_enabled(&self) -> Vec<Module> {
        self.list().into_iter().filter(|m| m.enabled).collect()
    }

    /// Enabled modules a role kind is eligible for
    pub fn modules_for_role(&self, kind: RoleKind) -> Vec<Module> {
        self.list_enabled()
            .into_iter()
            .filter(|m| m.allows_role(kind))
            .collect()
    }

    /// Whether `name` is in the catalog or is a personal pseudo-module
    pub fn is_known(&self, name: &str) -> bool {
        self.names.contains_key(name) || is_personal_module(name)
    }

    /// Resolve the state of a module for the decision functions.
    ///
    /// Personal pseudo-modules absent from the catalog resolve as enabled.
    pub fn target(&self, name: &str) -> Result<ModuleTarget> {
        if let Some(module) = self.get_by_name(name) {
            return Ok(module.target());
        }
        if is_personal_module(name) {
            return Ok(ModuleTarget::enabled(name));
        }
        Err(RbacError::UnknownModule(name.to_string()))
    }

    /// Reject assignments of modules the role kind is not eligible for
    pub fn validate_assignment<I, S>(&self, kind: RoleKind, module_names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in module_names {
            let name = name.as_ref();
            let module = self
                .get_by_name(name)
                .ok_or_else(|| RbacError::UnknownModule(name.to_string()))?;
            if !module.allows_role(kind) {
                return Err(RbacError::validation(format!(
                    "Module {} cannot be assigned to role kind {}",
                    name, kind
                )));
            }
        }
        Ok(())
    }

    /// Route-level module gate by name
    pub fn is_reachable(
        &self,
        principal: &Principal,
        name: &str,
        enforce_role_eligibility: bool,
    ) -> Result<bool> {
        let target = self.target(name)?;
        let reachable = is_reachable_with(principal, &target, enforce_role_eligibility);
        if !reachable {
            debug!("Module {} unreachable for {}", name, principal.user_id);
        }
        Ok(reachable)
    }

    /// Action-level check by module name
    pub fn authorize(
        &self,
        principal: Option<&Principal>,
        name: &str,
        action: PermissionAction,
    ) -> Result<Decision> {
        let target = self.target(name)?;
        Ok(authorize(principal, &target, action))
    }
}
