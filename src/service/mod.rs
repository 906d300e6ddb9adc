//! Store facade
//!
//! Provides the narrow interface the HTTP layer talks to through the
//! `KvService` trait. Callers never see the storage engine's type, so a
//! test double can replace it without touching them.

use crate::error::Result;
use crate::store::{normalize, MemoryStore, Value};
use std::sync::Arc;

/// Key-value operations exposed to callers
pub trait KvService: Send + Sync {
    /// Normalize a raw payload and store it under `key`
    fn put(&self, key: &str, raw: &[u8]) -> Result<()>;

    /// Get the value stored under `key`
    fn get(&self, key: &str) -> Result<Value>;

    /// Remove `key`
    fn delete(&self, key: &str) -> Result<()>;

    /// List all stored keys, in no particular order
    fn list_keys(&self) -> Vec<String>;
}

/// Facade over the in-memory storage engine
#[derive(Clone)]
pub struct KvStore {
    store: Arc<MemoryStore>,
}

impl KvStore {
    /// Create a facade over a fresh, empty store
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Create a facade over an existing store
    pub fn with_store(store: Arc<MemoryStore>) -> Self {
        KvStore { store }
    }
}

impl Default for KvStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvService for KvStore {
    fn put(&self, key: &str, raw: &[u8]) -> Result<()> {
        let value = normalize(raw)?;
        self.store.put(key, &value)
    }

    fn get(&self, key: &str) -> Result<Value> {
        self.store.get(key)
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.store.delete(key)
    }

    fn list_keys(&self) -> Vec<String> {
        self.store.keys()
    }
}
