//! Key-value persistence collaborator.
//!
//! The cart survives process restarts through an external string-keyed,
//! JSON-serialized store with local-storage semantics: `get`/`set`/`remove`,
//! no TTL. Two implementations are provided: [`MemoryStore`] for tests and
//! ephemeral sessions, [`JsonFileStore`] for an on-disk session.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Fixed keys used by the cart store.
pub mod keys {
    /// Serialized cart line collection (JSON array).
    pub const CART_ITEMS: &str = "cartItems";
    /// Derived line count, stored alongside the collection.
    pub const CART_COUNT: &str = "cartCount";
}

/// Errors raised by the persistence collaborator.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be deserialized.
    #[error("corrupt value under key {key}: {source}")]
    Corrupt {
        key: String,
        source: serde_json::Error,
    },

    /// A value could not be serialized for storage.
    #[error("could not serialize value for key {key}: {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },
}

/// String-keyed store with local-storage semantics.
///
/// Implementations must be safe to share across tasks; values are opaque
/// strings (the cart store writes JSON).
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`; absent keys are a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
