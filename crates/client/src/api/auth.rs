//! Account and authentication endpoints (`/api/v0`).
//!
//! These calls only talk to the service; persisting the returned tokens is
//! the job of [`crate::services::AuthService`].

use tracing::instrument;

use super::types::{
    AuthTokens, LoginRequest, LogoutResponse, RefreshRequest, RegisterResponse, RegisterUser,
};
use super::{ApiClient, ApiError, RequestDescriptor};

impl ApiClient {
    /// Register a customer, merchant or admin account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    #[instrument(skip(self, payload), fields(username = %payload.username, role = %payload.role))]
    pub async fn register_user(&self, payload: &RegisterUser) -> Result<RegisterResponse, ApiError> {
        self.request(RequestDescriptor::post("/api/v0/users").json(payload)?)
            .await
    }

    /// Exchange credentials for tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the credentials are rejected.
    #[instrument(skip(self, payload), fields(username = %payload.username))]
    pub async fn login(&self, payload: &LoginRequest) -> Result<AuthTokens, ApiError> {
        self.request(RequestDescriptor::post("/api/v0/auth/login").json(payload)?)
            .await
    }

    /// Exchange a refresh token for a new token pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the refresh token is rejected.
    #[instrument(skip_all)]
    pub async fn refresh_token(&self, payload: &RefreshRequest) -> Result<AuthTokens, ApiError> {
        self.request(RequestDescriptor::post("/api/v0/auth/refresh").json(payload)?)
            .await
    }

    /// Revoke the current access token on the service.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<LogoutResponse, ApiError> {
        self.request(RequestDescriptor::post("/api/v0/auth/logout"))
            .await
    }
}
