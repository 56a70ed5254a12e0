//! Module registry
//!
//! The catalog of installable modules, their enabled state and role
//! eligibility, plus the route-level reachability gate.

mod reachability;
mod registry;
mod types;

pub use reachability::{is_reachable, is_reachable_with};
pub use registry::ModuleRegistry;
pub use types::{Module, ModuleTarget, NewModule};
