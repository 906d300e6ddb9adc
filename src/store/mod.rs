//! In-memory storage module
//!
//! Provides the storage engine and the canonical value representation.
//! This module is independent of the HTTP layer (loose coupling).

mod memory;
pub mod value;

pub use memory::MemoryStore;
pub use value::{normalize, Value};
