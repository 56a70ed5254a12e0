//! Helper functions for creating specific error types

use super::types::RbacError;

/// Helper functions for creating specific errors
impl RbacError {
    pub fn system_role_immutable<S: Into<String>>(message: S) -> Self {
        Self::SystemRoleImmutable(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict(message.into())
    }

    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Whether the error signals corrupted configuration or a caller bug,
    /// as opposed to a rejected administrative request
    pub fn is_integrity_error(&self) -> bool {
        matches!(
            self,
            Self::SystemRoleImmutable(_)
                | Self::UnknownRoleKind(_)
                | Self::UnknownAction(_)
                | Self::UnknownModule(_)
                | Self::UnknownRoute(_)
                | Self::Config(_)
        )
    }
}
