//! Namespaced local cache for UI state.
//!
//! Values are stored as JSON under `shop_front_cache_<key>`, a prefix that
//! cannot overlap the session slot. A missing or undecodable entry silently
//! yields the caller's fallback, and a damaged entry never affects other
//! keys. Unlike the session store, writes emit no notification.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::storage::{Storage, StorageError};

/// Prefix applied to every cache key.
pub const CACHE_PREFIX: &str = "shop_front_cache_";

/// Errors that can occur when writing to the cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Value could not be serialized to JSON.
    #[error("Cache serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Underlying storage write failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Namespaced key/value cache over a [`Storage`].
#[derive(Debug, Clone)]
pub struct LocalCache {
    storage: Arc<dyn Storage>,
}

impl LocalCache {
    /// Create a cache over a persistence medium.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Read `key`, or return `fallback` if it is absent or fails to decode.
    pub fn get<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        let Some(raw) = self.storage.get_item(&namespaced(key)) else {
            return fallback;
        };
        if raw.is_empty() {
            return fallback;
        }
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                debug!(key, error = %e, "Cache entry unreadable, using fallback");
                fallback
            }
        }
    }

    /// Serialize `value` and store it under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the storage write fails.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value)?;
        self.storage.set_item(&namespaced(key), &raw)?;
        Ok(())
    }

    /// Remove `key` from the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage removal fails.
    pub fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.storage.remove_item(&namespaced(key))?;
        Ok(())
    }
}

fn namespaced(key: &str) -> String {
    format!("{CACHE_PREFIX}{key}")
}
