//! Common test utilities for module-rbac
//!
//! This module provides shared test infrastructure for all tests:
//! - Principal, claims and configuration fixtures
//! - Custom assertions on decisions and guard outcomes
//!
//! # Usage
//!
//! ```rust
//! use crate::common::fixtures::{PrincipalFactory, sample_auth_system};
//!
//! #[test]
//! fn my_test() {
//!     let auth = sample_auth_system();
//!     let editor = PrincipalFactory::admin(&["Blog"]);
//!     // ...
//! }
//! ```

pub mod assertions;

// Re-export commonly used items
pub use fixtures::{ClaimsFactory, PrincipalFactory, sample_auth_system, sample_config};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
