//! crates/frontdesk_core/src/ports.rs
//!
//! Defines the contracts (traits) the core depends on but does not implement.
//! Persistence and time both sit behind these ports, so the services can run
//! against PostgreSQL in production and against in-memory doubles in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external backends (e.g., a database).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Storage is unavailable: {0}")]
    Unavailable(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Ports (Traits)
//=========================================================================================

/// A key-value backend holding one serialized collection per key.
///
/// Values are opaque strings to the backend; the entity store decides the
/// encoding. A missing key is `Ok(None)`, not an error.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> PortResult<Option<String>>;

    /// Replaces the whole value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> PortResult<()>;
}

/// Source of the current instant, used for timestamps and "as of" queries.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
