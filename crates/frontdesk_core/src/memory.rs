//! crates/frontdesk_core/src/memory.rs
//!
//! An in-process `KeyValueStore`. Backs the test suites and the api service
//! when no database is configured.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::ports::{KeyValueStore, PortError, PortResult};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> PortResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| PortError::Unavailable(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> PortResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| PortError::Unavailable(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A store that hands control back to the runtime before every access, so
/// concurrent tasks interleave at each storage call.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct YieldingStore {
    inner: InMemoryStore,
}

#[cfg(test)]
#[async_trait]
impl KeyValueStore for YieldingStore {
    async fn get(&self, key: &str) -> PortResult<Option<String>> {
        tokio::task::yield_now().await;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> PortResult<()> {
        tokio::task::yield_now().await;
        self.inner.set(key, value).await
    }
}
