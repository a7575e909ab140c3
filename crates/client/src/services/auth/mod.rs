//! Authentication service.
//!
//! Logs in against the remote service and persists the returned tokens,
//! refreshes them, and signs out.

mod error;

pub use error::AuthError;

use secrecy::ExposeSecret;
use shop_front_core::SessionRecord;
use tracing::{info, instrument, warn};

use crate::api::ApiClient;
use crate::api::types::{LoginRequest, RefreshRequest};
use crate::session::SessionStore;

/// Authentication service.
///
/// Writes go through the client's own [`SessionStore`], so the request layer
/// picks up new tokens on its next call.
#[derive(Debug, Clone, Copy)]
pub struct AuthService<'a> {
    api: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    fn session(&self) -> &'a SessionStore {
        self.api.session()
    }

    /// Sign in and persist the issued tokens, replacing any previous session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Api` if the credentials are rejected.
    /// Returns `AuthError::Storage` if the session cannot be written.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionRecord, AuthError> {
        let tokens = self
            .api
            .login(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .await?;

        let record = SessionRecord::from(tokens);
        self.session().write(&record)?;
        info!(user_id = ?record.user_id(), "Signed in");
        Ok(record)
    }

    /// Sign out.
    ///
    /// The remote logout is best effort: whatever it answers, the local
    /// session is cleared.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the session cannot be removed.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), AuthError> {
        let signed_in = self
            .session()
            .read()
            .is_some_and(|record| record.has_access_token());

        if signed_in && let Err(e) = self.api.logout().await {
            warn!(error = %e, "Remote logout failed, clearing local session anyway");
        }

        self.session().clear()?;
        Ok(())
    }

    /// Exchange the stored refresh token for new tokens.
    ///
    /// The new tokens are merged into the stored record, so claims the
    /// refresh response omits (`user_id`, `role`) are kept.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingRefreshToken` if no refresh token is stored.
    /// Returns `AuthError::Api` if the refresh token is rejected.
    /// Returns `AuthError::Storage` if the session cannot be written.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<SessionRecord, AuthError> {
        let mut record = self.session().read().unwrap_or_default();
        let refresh_token = record
            .refresh_token()
            .ok_or(AuthError::MissingRefreshToken)?;

        let tokens = self
            .api
            .refresh_token(&RefreshRequest {
                refresh_token: refresh_token.expose_secret().to_string(),
            })
            .await?;

        record.merge(SessionRecord::from(tokens));
        self.session().write(&record)?;
        info!("Session refreshed");
        Ok(record)
    }
}
