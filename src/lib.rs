//! # module-rbac
//!
//! Role-based access control core for a multi-module content dashboard.
//!
//! ## Features
//!
//! - **Role registry**: four built-in role kinds with seeded, immutable system roles
//!   and freely editable custom roles
//! - **Module grants**: per-role, per-module action sets with replace and merge semantics
//! - **Decision engine**: a pure `authorize` function returning `Allow` or `Deny(reason)`
//! - **Module catalog**: enable/disable switches and a route-level reachability gate
//! - **Route guard**: static route table, redirect-or-forbid outcomes, actix-web responses
//!
//! ## Quick Start
//!
//! ```rust
//! use module_rbac::auth::{ModuleTarget, PermissionAction, Principal, RoleKind, authorize};
//! use module_rbac::auth::{Decision, DenyReason};
//!
//! let editor = Principal::new("u-17", RoleKind::Admin).with_modules(["Blog"]);
//!
//! let blog = ModuleTarget::enabled("Blog");
//! assert_eq!(authorize(Some(&editor), &blog, PermissionAction::Delete), Decision::Allow);
//!
//! let youtube = ModuleTarget::enabled("YouTube");
//! assert_eq!(
//!     authorize(Some(&editor), &youtube, PermissionAction::View),
//!     Decision::Deny(DenyReason::ModuleNotAssigned)
//! );
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use auth::AuthSystem;
pub use config::Config;
pub use utils::error::{RbacError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
