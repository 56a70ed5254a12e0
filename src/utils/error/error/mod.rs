//! Error handling for the RBAC core
//!
//! This module defines the error types raised by administrative operations,
//! configuration loading and principal resolution. Ordinary access denials are
//! not errors; they are returned as `Decision::Deny`.

#![allow(missing_docs)]

mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{RbacError, Result};
