//! Utility modules
//!
//! - **error**: Error types and their HTTP representation
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;

pub use logging::{LogLevel, init_logging};
