//! Normalized request error.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Message used when a failed response carries no `error` field.
pub const FALLBACK_MESSAGE: &str = "Request failed";

/// The single error shape surfaced by the request layer.
///
/// Transport failures and application-reported failures both end up here;
/// `Display` is exactly the human-readable message, so the UI can render it
/// as-is. [`ApiError::status`] tells the two apart when a caller cares.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    message: String,
    status: Option<StatusCode>,
    #[source]
    source: Option<Cause>,
}

/// Underlying failure kept for `Error::source` chains.
#[derive(Debug, Error)]
enum Cause {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// Error for a non-success response, taking the message from the body's
    /// `error` field when it is a non-empty string.
    #[must_use]
    pub fn from_response(status: StatusCode, body: &Value) -> Self {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(FALLBACK_MESSAGE);
        Self {
            message: message.to_string(),
            status: Some(status),
            source: None,
        }
    }

    /// Error for a call that never produced a response.
    #[must_use]
    pub fn transport(err: reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
            status: None,
            source: Some(err.into()),
        }
    }

    /// Error for a successful response whose body does not match the
    /// expected shape.
    #[must_use]
    pub fn unexpected_response(status: StatusCode, err: serde_json::Error) -> Self {
        Self {
            message: format!("Unexpected response: {err}"),
            status: Some(status),
            source: Some(err.into()),
        }
    }

    /// Error for a request body that could not be encoded.
    #[must_use]
    pub fn invalid_body(err: serde_json::Error) -> Self {
        Self {
            message: format!("Invalid request body: {err}"),
            status: None,
            source: Some(err.into()),
        }
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Whether the service rejected the credentials (stale or missing token).
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(StatusCode::UNAUTHORIZED)
    }
}
