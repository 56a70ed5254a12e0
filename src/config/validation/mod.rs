//! Configuration validation
//!
//! - `trait_def`: the `Validate` trait
//! - `rbac_validators`: checks for guard flags, module seeds and route bindings
//! - `tests`: validator test suite

mod rbac_validators;
mod trait_def;

pub use trait_def::Validate;
