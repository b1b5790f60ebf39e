//! Persistence backends: a string-keyed key-value store with synchronous access.

pub mod json_backend;
pub mod memory;

use crate::errors::Result;

/// Abstraction over durable key-value stores the ledger writes through to.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
