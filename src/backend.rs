//! Pluggable store backends.
//!
//! Implement [`StoreBackend`] to bring your own hierarchical key-value
//! store. The crate addresses values by `/`-joined path strings and only
//! ever reads or writes whole paths, so any map from full path to JSON
//! value satisfies the contract. In-memory implementations are provided
//! for ShardMap, `RwLock<HashMap>`, and DashMap (feature-gated) — handy
//! for tests and local development in place of a real remote store.

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

/// Trait a key-value store must satisfy to hold deploy configuration.
///
/// Absent paths read as `Ok(None)` rather than failing; errors are for
/// connectivity and permission problems. Timeouts and retries are the
/// backend's responsibility — callers see a failed operation as soon as
/// the backend reports one.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    /// Read the value at `path`, `None` when nothing is stored there.
    async fn read(&self, path: &str) -> Result<Option<Value>>;

    /// Write `value` at `path`, replacing whatever was there.
    async fn write(&self, path: &str, value: Value) -> Result<()>;
}

// ---- ShardMap ----------------------------------------------------------------

#[async_trait]
impl StoreBackend for shardmap::ShardMap<String, Value> {
    async fn read(&self, path: &str) -> Result<Option<Value>> {
        Ok(self.get(&path.to_string()).map(|arc| arc.clone()))
    }

    async fn write(&self, path: &str, value: Value) -> Result<()> {
        self.insert(path.to_string(), value);
        Ok(())
    }
}

// ---- RwLock<HashMap> ---------------------------------------------------------

#[async_trait]
impl StoreBackend for parking_lot::RwLock<HashMap<String, Value>> {
    async fn read(&self, path: &str) -> Result<Option<Value>> {
        Ok(self.read().get(path).cloned())
    }

    async fn write(&self, path: &str, value: Value) -> Result<()> {
        self.write().insert(path.to_string(), value);
        Ok(())
    }
}

// ---- DashMap (feature-gated) -------------------------------------------------

#[cfg(feature = "dashmap")]
#[async_trait]
impl StoreBackend for dashmap::DashMap<String, Value> {
    async fn read(&self, path: &str) -> Result<Option<Value>> {
        Ok(self.get(path).map(|r| r.value().clone()))
    }

    async fn write(&self, path: &str, value: Value) -> Result<()> {
        self.insert(path.to_string(), value);
        Ok(())
    }
}
