//! Custom test assertions
//!
//! Provides domain-specific assertions for decisions and guard outcomes.

use module_rbac::auth::{Decision, DenyReason, GuardOutcome};

/// Assertions for decisions
pub trait DecisionAssertions {
    fn assert_allowed(&self);

    fn assert_denied_with(&self, reason: DenyReason);
}

impl DecisionAssertions for Decision {
    fn assert_allowed(&self) {
        assert!(self.is_allowed(), "Expected Allow, got {:?}", self);
    }

    fn assert_denied_with(&self, reason: DenyReason) {
        assert_eq!(
            self.deny_reason(),
            Some(reason),
            "Expected Deny({:?}), got {:?}",
            reason,
            self
        );
    }
}

/// Assertions for guard outcomes
pub trait GuardOutcomeAssertions {
    fn assert_redirected_to(&self, location: &str);

    fn assert_forbidden_with(&self, reason: DenyReason);
}

impl GuardOutcomeAssertions for GuardOutcome {
    fn assert_redirected_to(&self, expected: &str) {
        match self {
            GuardOutcome::Redirect { location, .. } => assert_eq!(location, expected),
            other => panic!("Expected redirect to {}, got {:?}", expected, other),
        }
    }

    fn assert_forbidden_with(&self, expected: DenyReason) {
        match self {
            GuardOutcome::Forbidden { reason } => assert_eq!(*reason, expected),
            other => panic!("Expected Forbidden({:?}), got {:?}", expected, other),
        }
    }
}
