//! Configuration data models
//!
//! This module defines all configuration structures used by the RBAC core.

#![allow(missing_docs)]

pub mod rbac;

// Re-export all configuration types
pub use rbac::*;

/// Default personal dashboard location for redirected navigation
pub fn default_personal_dashboard_path() -> String {
    "/dashboard/personal".to_string()
}

fn default_true() -> bool {
    true
}
