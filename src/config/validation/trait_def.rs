//! Validation trait for configuration sections

/// Structural checks run once when configuration is loaded.
///
/// Errors are plain messages; `Config::validate` wraps them into
/// `RbacError::Config`.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
