//! Authentication flow error types.

use thiserror::Error;

use crate::api::ApiError;
use crate::storage::StorageError;

/// Errors that can occur during login, logout or refresh.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The remote service rejected the call or could not be reached.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The session could not be persisted.
    #[error("failed to persist session: {0}")]
    Storage(#[from] StorageError),

    /// No refresh token is stored.
    #[error("not signed in")]
    MissingRefreshToken,
}
