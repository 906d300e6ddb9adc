//! In-memory storage implementation

use super::value::{self, Value};
use crate::error::{Result, StoreError};
use bytes::Bytes;
use siphasher::sip::SipHasher13;
use std::collections::HashMap;
use std::hash::BuildHasherDefault;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Type alias for our hash map with SipHasher
type StoreMap = HashMap<String, Bytes, BuildHasherDefault<SipHasher13>>;

/// In-memory key-value store
///
/// This is the core storage engine. Values are kept in their encoded form
/// behind a single reader/writer lock; there is no other synchronization
/// layered on top of it. Encoding and decoding happen outside the lock, and
/// the stored `Bytes` are immutable, so a reader can never observe a value
/// that is only partially written.
pub struct MemoryStore {
    store: RwLock<StoreMap>,
}

impl MemoryStore {
    /// Create a new memory store with default capacity
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Create a new memory store with specified initial capacity
    pub fn with_capacity(capacity: usize) -> Self {
        MemoryStore {
            store: RwLock::new(HashMap::with_capacity_and_hasher(
                capacity,
                BuildHasherDefault::<SipHasher13>::default(),
            )),
        }
    }

    // A poisoned lock only means another thread panicked while holding it.
    // Every mutation is a single insert/remove, so the map is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, StoreMap> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreMap> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a value, replacing any existing entry for the key
    pub fn put(&self, key: impl Into<String>, value: &Value) -> Result<()> {
        let key = key.into();
        let encoded = value::encode(value)?;
        debug!("PUT {} ({} bytes)", key, encoded.len());

        self.write().insert(key, encoded);
        Ok(())
    }

    /// Get the decoded value for a key
    pub fn get(&self, key: &str) -> Result<Value> {
        let encoded = self
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;

        debug!("GET {} ({} bytes)", key, encoded.len());
        value::decode(&encoded)
    }

    /// Delete a key
    ///
    /// The existence check and the removal happen in the same critical section,
    /// so of two concurrent deletes of one key exactly one succeeds.
    pub fn delete(&self, key: &str) -> Result<()> {
        match self.write().remove(key) {
            Some(_) => {
                debug!("DEL {}", key);
                Ok(())
            }
            None => Err(StoreError::NotFound(key.to_string())),
        }
    }

    /// Snapshot of all keys
    ///
    /// The order is unspecified: it is whatever the map iterates in.
    pub fn keys(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// Check if a key exists
    pub fn contains(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    /// Get the number of stored keys
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
