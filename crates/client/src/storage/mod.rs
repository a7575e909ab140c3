//! Key/value persistence medium.
//!
//! The session store and local cache both sit on top of a [`Storage`]: a
//! synchronous string-to-string map with the semantics of browser local
//! storage. Reads never fail (an unreadable slot is reported as absent);
//! writes report their errors.
//!
//! - [`MemoryStorage`] keeps slots in process memory (tests, embedders)
//! - [`FileStorage`] keeps one file per slot inside a directory (CLI)

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Errors that can occur when writing to a [`Storage`].
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key contains characters the medium cannot represent.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// A synchronous key/value persistence medium.
///
/// Implementations serialize writes issued from the same process, so callers
/// need no extra locking around a single slot.
pub trait Storage: Send + Sync + std::fmt::Debug {
    /// Read a slot. Absent or unreadable slots yield `None`.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Write a slot, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium rejects the key or the write fails.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a slot. Removing an absent slot succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium rejects the key or the removal fails.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
