//! Core data models shared by the registries
//!
//! This module defines the bookkeeping carried by every persisted aggregate.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity and optimistic-locking state of a role or module
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Unique identifier
    pub id: Uuid,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Last update timestamp
    pub updated_at: chrono::DateTime<chrono::Utc>,
    /// Starts at 1, bumped by every committed mutation
    pub version: i64,
}

impl Default for Metadata {
    fn default() -> Self {
        let now = chrono::Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            version: 1,
        }
    }
}

impl Metadata {
    /// Fresh metadata with a new id
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a committed mutation
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now();
        self.version += 1;
    }

    /// Fail with the current version when `expected` is set and stale
    pub fn check_version(&self, expected: Option<i64>) -> Result<(), i64> {
        match expected {
            Some(version) if version != self.version => Err(self.version),
            _ => Ok(()),
        }
    }
}
