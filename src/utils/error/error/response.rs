//! HTTP response handling for errors

use super::types::RbacError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl ResponseError for RbacError {
    fn status_code(&self) -> StatusCode {
        match self {
            RbacError::SystemRoleImmutable(_) | RbacError::Conflict(_) => StatusCode::CONFLICT,
            RbacError::NotFound(_) | RbacError::UnknownRoute(_) => StatusCode::NOT_FOUND,
            RbacError::Forbidden(_) => StatusCode::FORBIDDEN,
            RbacError::RoleInactive(_) => StatusCode::UNAUTHORIZED,
            RbacError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message) = match self {
            RbacError::SystemRoleImmutable(_) => ("SYSTEM_ROLE_IMMUTABLE", self.to_string()),
            RbacError::UnknownRoleKind(_) => ("UNKNOWN_ROLE_KIND", self.to_string()),
            RbacError::UnknownAction(_) => ("UNKNOWN_ACTION", self.to_string()),
            RbacError::UnknownModule(_) => ("UNKNOWN_MODULE", self.to_string()),
            RbacError::UnknownRoute(_) => ("UNKNOWN_ROUTE", self.to_string()),
            RbacError::RoleInactive(_) => ("ROLE_INACTIVE", self.to_string()),
            RbacError::NotFound(_) => ("NOT_FOUND", self.to_string()),
            RbacError::Conflict(_) => ("CONFLICT", self.to_string()),
            RbacError::Forbidden(_) => ("FORBIDDEN", self.to_string()),
            RbacError::Validation(_) => ("VALIDATION_ERROR", self.to_string()),
            RbacError::Config(_) => ("CONFIG_ERROR", self.to_string()),
            RbacError::Serialization(_) | RbacError::Yaml(_) | RbacError::Io(_) => (
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                reason: None,
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(self.status_code()).json(error_response)
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    /// Deny reason surfaced for debugging, set only for access denials
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub timestamp: i64,
}
