//! Persisted session store.
//!
//! One well-known storage slot holds the [`SessionRecord`] written by the
//! login flow. Reading is infallible: the persisted text goes through a
//! two-tier decode (strict JSON, then a lenient scan for the access token)
//! and anything unrecoverable reads as "no session".
//!
//! Writers notify subscribers through a broadcast channel. Every subscriber
//! receives every [`SessionChange`]; a subscriber that falls more than
//! [`CHANGE_CHANNEL_CAPACITY`] notifications behind observes
//! `RecvError::Lagged` and should simply re-read the store.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde_json::Value;
use shop_front_core::SessionRecord;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::storage::{Storage, StorageError};

/// Storage slot holding the session record.
pub const SESSION_KEY: &str = "shop_front_auth";

/// Buffered notifications per subscriber.
pub const CHANGE_CHANNEL_CAPACITY: usize = 16;

static ACCESS_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""access_token"\s*:\s*"([^"]+)""#).expect("Invalid regex")
});

/// Kind of change applied to the persisted session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionChange {
    /// A record was written (login or refresh).
    Written,
    /// The record was removed (logout).
    Cleared,
}

/// Injectable handle to the persisted session.
///
/// Cloning is cheap; clones share the storage and the subscriber list.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

#[derive(Debug)]
struct SessionStoreInner {
    storage: Arc<dyn Storage>,
    changes: broadcast::Sender<SessionChange>,
}

impl SessionStore {
    /// Create a session store over a persistence medium.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(SessionStoreInner { storage, changes }),
        }
    }

    /// Read the current session.
    ///
    /// Returns `None` when nothing is stored or the stored text cannot be
    /// recovered. Never fails.
    #[must_use]
    pub fn read(&self) -> Option<SessionRecord> {
        let raw = self.inner.storage.get_item(SESSION_KEY)?;
        decode_session(&raw)
    }

    /// Persist a session record and notify subscribers.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails; subscribers are not
    /// notified in that case.
    pub fn write(&self, record: &SessionRecord) -> Result<(), StorageError> {
        let raw = Value::Object(record.claims().clone()).to_string();
        self.inner.storage.set_item(SESSION_KEY, &raw)?;
        info!(
            user_id = ?record.user_id(),
            role = ?record.role(),
            "Session written"
        );
        self.notify(SessionChange::Written);
        Ok(())
    }

    /// Remove the persisted session and notify subscribers.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage removal fails; subscribers are not
    /// notified in that case.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.inner.storage.remove_item(SESSION_KEY)?;
        info!("Session cleared");
        self.notify(SessionChange::Cleared);
        Ok(())
    }

    /// Register a new subscriber for session changes.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionChange> {
        self.inner.changes.subscribe()
    }

    /// Current number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.changes.receiver_count()
    }

    fn notify(&self, change: SessionChange) {
        // No subscribers is a normal state, not an error.
        let delivered = self.inner.changes.send(change).unwrap_or(0);
        debug!(?change, delivered, "Session change broadcast");
    }
}

/// Decode persisted session text: strict parse, then lenient extraction.
///
/// A leading byte-order mark and surrounding whitespace are ignored. Valid
/// JSON that is not an object (for example `null`) is not a session.
#[must_use]
pub fn decode_session(raw: &str) -> Option<SessionRecord> {
    let cleaned = raw.trim_start_matches('\u{feff}').trim();
    if cleaned.is_empty() {
        return None;
    }

    match try_strict_decode(cleaned) {
        Ok(record) => record,
        Err(e) => {
            let recovered = try_lenient_extract(raw);
            warn!(
                error = %e,
                recovered = recovered.is_some(),
                "Persisted session is not valid JSON"
            );
            recovered
        }
    }
}

/// Parse the text as JSON. `Ok(None)` means well-formed but not an object.
fn try_strict_decode(text: &str) -> Result<Option<SessionRecord>, serde_json::Error> {
    let value: Value = serde_json::from_str(text)?;
    Ok(SessionRecord::try_from(value).ok())
}

/// Recover only the access token from damaged text.
fn try_lenient_extract(text: &str) -> Option<SessionRecord> {
    ACCESS_TOKEN_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|token| SessionRecord::from_access_token(token.as_str()))
}
