//! Integration tests for module-rbac
//!
//! These tests verify the interaction between multiple components
//! and test real system behavior without mocking.

pub mod authorization_tests;
pub mod error_handling_tests;
