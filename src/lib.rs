//! kvstore - A lightweight in-memory key-value store served over HTTP
//!
//! The crate is split along clear responsibilities:
//! - `store`: the concurrency-safe storage engine and value normalization
//! - `service`: the narrow facade callers depend on
//! - `web`: HTTP routing, middleware and status code translation
//! - `config`: process configuration, loaded once at startup

pub mod config;
pub mod error;
pub mod service;
pub mod store;
pub mod web;

/// Re-export commonly used types
pub use config::Config;
pub use error::StoreError;
pub use service::{KvService, KvStore};
pub use store::{MemoryStore, Value};
