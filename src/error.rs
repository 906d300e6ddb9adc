//! Error types shared by the store and its callers

use thiserror::Error;

/// Failures reported by the storage engine, the value normalizer and the facade.
///
/// None of these carry transport semantics: the HTTP layer decides which
/// status code each one maps to.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The key has never been stored, or was already deleted
    #[error("key not found: {0}")]
    NotFound(String),

    /// Empty payload, or structured input that could not be interpreted
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The canonical value could not be serialized
    #[error("failed to encode value: {0}")]
    Encode(#[source] serde_json::Error),

    /// The stored bytes could not be deserialized
    #[error("failed to decode stored value: {0}")]
    Decode(#[source] serde_json::Error),
}

impl StoreError {
    /// Check if this is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
