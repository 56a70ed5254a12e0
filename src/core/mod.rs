//! Core shared models

pub mod models;
