//! Key/value persistence port.
//!
//! The storefront keeps its client-side state (cart, theme, speaker flag)
//! in a flat string-to-string store, the same shape as browser local
//! storage. The cart store and preferences only see this trait, so tests
//! substitute [`MemoryStore`] and the terminal front-end uses [`FileStore`].
//!
//! Writes are best effort: there is a single writer and no transactional
//! guarantee, the last write wins.

use std::sync::Arc;

use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage keys shared by every component that persists state.
pub mod keys {
    /// JSON-encoded cart mapping.
    pub const CART: &str = "cart";

    /// Presentation theme token (`light-mode` / `dark-mode`).
    pub const THEME: &str = "theme";

    /// Read-aloud flag (`true` / `false`).
    pub const SPEAKER_ACTIVE: &str = "speakerActive";
}

/// Errors that can occur when reading or writing the store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file could not be encoded.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A synchronous string key/value store.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. Absent keys yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value. Deleting an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
