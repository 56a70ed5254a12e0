//! Core error type definitions

use thiserror::Error;

/// Result type alias for the RBAC core
pub type Result<T> = std::result::Result<T, RbacError>;

/// Main error type for the RBAC core
#[derive(Error, Debug)]
pub enum RbacError {
    /// Attempt to rename, deactivate or delete a seeded system role
    #[error("System role is immutable: {0}")]
    SystemRoleImmutable(String),

    /// Role kind string that does not name one of the built-in kinds
    #[error("Unknown role kind: {0}")]
    UnknownRoleKind(String),

    /// Permission action string that does not name a known action
    #[error("Unknown permission action: {0}")]
    UnknownAction(String),

    /// Module name absent from the catalog
    #[error("Unknown module: {0}")]
    UnknownModule(String),

    /// Route id absent from the route table
    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    /// Custom role attached to a principal has been deactivated
    #[error("Role is inactive: {0}")]
    RoleInactive(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate names and stale versions
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Administrative operation attempted by a non-SuperAdmin actor
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
