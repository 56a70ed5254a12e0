//! Two-layer access guard for route dispatch
//!
//! A guarded request first passes the module reachability gate, then the
//! action-level decision. Both layers read only the principal and the module
//! catalog, so a single guard is shared by all request handlers.

use crate::auth::modules::{ModuleRegistry, is_reachable_with};
use crate::auth::principal::Principal;
use crate::auth::rbac::{Decision, DenyReason, PermissionAction, authorize};
use crate::auth::routes::RouteTable;
use crate::config::GuardConfig;
use crate::utils::error::{ErrorDetail, ErrorResponse, RbacError, Result};
use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// What the dispatch layer should do with a guarded request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GuardOutcome {
    Allow,
    /// Send the user to their personal dashboard instead of an error page
    Redirect { location: String, reason: DenyReason },
    Forbidden { reason: DenyReason },
}

impl GuardOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardOutcome::Allow)
    }

    /// Turn a non-allow outcome into an error the HTTP layer can return
    pub fn into_result(self) -> std::result::Result<(), AccessDenied> {
        match self {
            GuardOutcome::Allow => Ok(()),
            GuardOutcome::Redirect { location, reason } => Err(AccessDenied {
                reason,
                redirect_to: Some(location),
            }),
            GuardOutcome::Forbidden { reason } => Err(AccessDenied {
                reason,
                redirect_to: None,
            }),
        }
    }
}

/// Access guard combining reachability and authorization
#[derive(Debug, Clone)]
pub struct AccessGuard {
    modules: Arc<ModuleRegistry>,
    routes: Arc<RouteTable>,
    config: GuardConfig,
}

impl AccessGuard {
    /// Create a guard; every route must target a known module
    pub fn new(
        modules: Arc<ModuleRegistry>,
        routes: Arc<RouteTable>,
        config: GuardConfig,
    ) -> Result<Self> {
        routes.check_modules(&modules)?;
        Ok(Self {
            modules,
            routes,
            config,
        })
    }

    pub fn modules(&self) -> &ModuleRegistry {
        &self.modules
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Route-level module gate
    pub fn is_reachable(&self, principal: &Principal, module: &str) -> Result<bool> {
        self.modules
            .is_reachable(principal, module, self.config.enforce_role_eligibility)
    }

    /// Action-level check
    pub fn authorize(
        &self,
        principal: Option<&Principal>,
        module: &str,
        action: PermissionAction,
    ) -> Result<Decision> {
        self.modules.authorize(principal, module, action)
    }

    /// Run both layers for an explicit module/action requirement
    pub fn check(
        &self,
        principal: Option<&Principal>,
        module: &str,
        action: PermissionAction,
        navigation: bool,
    ) -> Result<GuardOutcome> {
        let target = self.modules.target(module)?;
        let decision = authorize(principal, &target, action);

        let decision = match (principal, decision) {
            (Some(principal), Decision::Allow)
                if !is_reachable_with(principal, &target, self.config.enforce_role_eligibility) =>
            {
                Decision::Deny(DenyReason::ModuleNotAssigned)
            }
            (_, decision) => decision,
        };

        let outcome = match decision {
            Decision::Allow => GuardOutcome::Allow,
            Decision::Deny(reason)
                if navigation
                    && self.config.redirect_restricted_navigation
                    && reason.is_redirectable() =>
            {
                GuardOutcome::Redirect {
                    location: self.config.personal_dashboard_path.clone(),
                    reason,
                }
            }
            Decision::Deny(reason) => GuardOutcome::Forbidden { reason },
        };

        if !outcome.is_allowed() {
            debug!(
                "Denied {} on {} for {}: {:?}",
                action,
                module,
                principal.map(|p| p.user_id.as_str()).unwrap_or("<anonymous>"),
                outcome
            );
        }
        Ok(outcome)
    }

    /// Run both layers for the requirement declared on `route`
    pub fn check_route(&self, principal: Option<&Principal>, route: &str) -> Result<GuardOutcome> {
        let requirement = self
            .routes
            .requirement(route)
            .ok_or_else(|| RbacError::UnknownRoute(route.to_string()))?;
        self.check(
            principal,
            &requirement.module,
            requirement.action,
            requirement.navigation,
        )
    }
}

/// Denied request, ready to be returned from a handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDenied {
    pub reason: DenyReason,
    pub redirect_to: Option<String>,
}

impl fmt::Display for AccessDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Access denied: {}", self.reason)
    }
}

impl std::error::Error for AccessDenied {}

impl ResponseError for AccessDenied {
    fn status_code(&self) -> StatusCode {
        match self.redirect_to {
            Some(_) => StatusCode::SEE_OTHER,
            None => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let Some(location) = &self.redirect_to {
            return HttpResponse::build(self.status_code())
                .insert_header((LOCATION, location.as_str()))
                .finish();
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.reason.code().to_string(),
                message: self.reason.message().to_string(),
                reason: Some(format!("{:?}", self.reason)),
                timestamp: chrono::Utc::now().timestamp(),
            },
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
