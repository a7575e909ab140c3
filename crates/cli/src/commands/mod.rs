//! Command implementations.
//!
//! Every command runs against one [`Context`]: a file-backed storage shared by
//! the session store and the local cache, and an API client reading that
//! session.

pub mod auth;
pub mod cache;
pub mod cart;
pub mod navigate;
pub mod orders;
pub mod shops;

use std::sync::Arc;

use serde::Serialize;
use shop_front_client::services::AuthError;
use shop_front_client::{
    ApiClient, ApiError, CacheError, ClientConfig, FileStorage, LocalCache, SessionStore, Storage,
    StorageError,
};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The remote service rejected the call or could not be reached.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Login, logout or refresh failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Local storage could not be opened or written.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Local cache write failed.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Output or argument JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A command argument could not be interpreted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Shared state for one command invocation.
#[derive(Debug)]
pub struct Context {
    pub api: ApiClient,
    pub session: SessionStore,
    pub cache: LocalCache,
}

impl Context {
    /// Open the storage directory and wire the client components over it.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::Storage` if the storage directory cannot be created.
    pub fn open(config: ClientConfig) -> Result<Self, CommandError> {
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(&config.storage_dir)?);
        tracing::debug!(dir = %config.storage_dir.display(), "Storage opened");

        let session = SessionStore::new(Arc::clone(&storage));
        let cache = LocalCache::new(storage);
        let api = ApiClient::new(&config, session.clone());

        Ok(Self {
            api,
            session,
            cache,
        })
    }
}

/// Print a value as pretty JSON on stdout.
#[allow(clippy::print_stdout)]
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CommandError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
