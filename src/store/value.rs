//! Canonical value representation and payload normalization
//!
//! Every stored value is a `serde_json::Value` tree. Round-trip equality is
//! defined over this tree, not over the types the payload was written with.

use crate::error::{Result, StoreError};
use base64::{engine::general_purpose, Engine as _};
use bytes::Bytes;
use serde::de::IgnoredAny;
use tracing::debug;

pub use serde_json::Value;

/// Convert a raw inbound payload into its canonical value
///
/// - empty payloads are rejected
/// - payloads that are not JSON are kept as an opaque string
/// - JSON payloads are parsed into a value tree; a payload that passes the
///   grammar scan but cannot be materialized is rejected as malformed
pub fn normalize(raw: &[u8]) -> Result<Value> {
    if raw.is_empty() {
        return Err(StoreError::MalformedInput("empty payload".to_string()));
    }

    // Grammar scan only, numbers are not materialized here
    if serde_json::from_slice::<IgnoredAny>(raw).is_err() {
        return Ok(opaque_string(raw));
    }

    serde_json::from_slice::<Value>(raw)
        .map_err(|e| StoreError::MalformedInput(format!("invalid structured payload: {}", e)))
}

/// Interpret a payload as a plain string value
fn opaque_string(raw: &[u8]) -> Value {
    match std::str::from_utf8(raw) {
        Ok(s) => Value::String(s.to_string()),
        Err(_) => {
            let b64 = general_purpose::STANDARD.encode(raw);
            debug!("Payload is not valid UTF-8, storing lossy string. Raw bytes (B64): {}", b64);
            Value::String(String::from_utf8_lossy(raw).into_owned())
        }
    }
}

/// Serialize a canonical value into its stored form
pub fn encode(value: &Value) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(StoreError::Encode)
}

/// Deserialize a stored value
pub fn decode(stored: &[u8]) -> Result<Value> {
    serde_json::from_slice(stored).map_err(StoreError::Decode)
}
