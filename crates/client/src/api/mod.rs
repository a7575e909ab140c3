//! Authenticated request layer over the remote service.
//!
//! Every typed operation (see `auth`, `shops`, `orders`, `cart`) builds a
//! [`RequestDescriptor`] and hands it to [`ApiClient::request`], the shared
//! primitive that:
//!
//! 1. reads the current session,
//! 2. builds headers (`Content-Type: application/json`, caller extras, and
//!    `Authorization: Bearer <token>` when a token exists),
//! 3. issues exactly one HTTP call against the configured base address,
//! 4. decodes the body as JSON, treating an unparseable body as `{}`,
//! 5. turns a non-success status into an [`ApiError`].
//!
//! List operations read a `null` body (the service's encoding of an empty
//! collection) and the `{}` stand-in for an unparseable body as an empty list.
//!
//! There is no retry, no timeout and no automatic token refresh; callers
//! that want any of these wrap the call themselves.

mod auth;
mod cart;
mod error;
mod orders;
mod shops;
pub mod types;

pub use error::{ApiError, FALLBACK_MESSAGE};

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;
use crate::session::SessionStore;

/// Method, path, optional JSON body and optional extra headers of one call.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: Method,
    /// Path appended to the base address (e.g. `/api/v1/cart`).
    pub path: String,
    /// JSON body, if any.
    pub body: Option<Value>,
    /// Extra headers merged over the defaults.
    pub headers: HeaderMap,
}

impl RequestDescriptor {
    /// A request without body or extra headers.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: HeaderMap::new(),
        }
    }

    /// `GET path`.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// `POST path`.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// `PATCH path`.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// `DELETE path`.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if `body` cannot be represented as JSON.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body).map_err(ApiError::invalid_body)?);
        Ok(self)
    }

    /// Add an extra header, replacing a default of the same name.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Client for the marketplace's remote service.
///
/// Cloning is cheap; clones share the connection pool and session store.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    api_base: String,
    session: SessionStore,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_base", &self.inner.api_base)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for the configured base address.
    #[must_use]
    pub fn new(config: &ClientConfig, session: SessionStore) -> Self {
        Self::with_http_client(reqwest::Client::new(), &config.api_base, session)
    }

    /// Create a client around an existing `reqwest::Client`.
    #[must_use]
    pub fn with_http_client(client: reqwest::Client, api_base: &str, session: SessionStore) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                client,
                api_base: api_base.trim_end_matches('/').to_string(),
                session,
            }),
        }
    }

    /// The base address requests are issued against.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.inner.api_base
    }

    /// The session store consulted before each call.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Issue one request and decode the JSON response into `T`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the call fails in transit, the service
    /// answers with a non-success status, or a successful body does not match
    /// `T`.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        request: RequestDescriptor,
    ) -> Result<T, ApiError> {
        let RequestDescriptor {
            method,
            path,
            body,
            headers: extra_headers,
        } = request;

        let session = self.inner.session.read();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.extend(extra_headers);
        if let Some(token) = session.as_ref().and_then(|s| s.access_token()) {
            match HeaderValue::from_str(&format!("Bearer {}", token.expose_secret())) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("Stored access token is not a valid header value, sending anonymously"),
            }
        }

        let url = format!("{}{}", self.inner.api_base, path);
        let mut builder = self.inner.client.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body.to_string());
        }

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, "Request failed in transit");
            ApiError::transport(e)
        })?;
        let status = response.status();

        let payload = match response.bytes().await {
            Ok(bytes) => serde_json::from_slice::<Value>(&bytes).unwrap_or_else(|_| empty_object()),
            Err(e) => {
                debug!(error = %e, "Failed to read response body");
                empty_object()
            }
        };

        if !status.is_success() {
            let err = ApiError::from_response(status, &payload);
            warn!(%status, message = err.message(), "Request rejected");
            return Err(err);
        }

        debug!(%status, "Request succeeded");
        serde_json::from_value(payload).map_err(|e| ApiError::unexpected_response(status, e))
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Body of a list endpoint: an array, with `null` and `{}` read as empty.
struct ListBody<T>(Vec<T>);

impl<'de, T: DeserializeOwned> Deserialize<'de> for ListBody<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Self(Vec::new())),
            Value::Object(map) if map.is_empty() => Ok(Self(Vec::new())),
            other => Vec::<T>::deserialize(other)
                .map(Self)
                .map_err(serde::de::Error::custom),
        }
    }
}

impl ApiClient {
    /// [`ApiClient::request`] for endpoints that answer with a collection.
    async fn request_list<T: DeserializeOwned>(
        &self,
        request: RequestDescriptor,
    ) -> Result<Vec<T>, ApiError> {
        let ListBody(items) = self.request(request).await?;
        Ok(items)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_descriptor_builders() {
        let req = RequestDescriptor::patch("/api/v1/orders/3/status")
            .json(&json!({"status": "paid"}))
            .unwrap()
            .header(
                HeaderName::from_static("x-request-id"),
                HeaderValue::from_static("abc"),
            );

        assert_eq!(req.method, Method::PATCH);
        assert_eq!(req.path, "/api/v1/orders/3/status");
        assert_eq!(req.body, Some(json!({"status": "paid"})));
        assert_eq!(req.headers.get("x-request-id").unwrap(), "abc");
    }

    #[test]
    fn test_base_address_trailing_slash_is_dropped() {
        let session = SessionStore::new(Arc::new(crate::storage::MemoryStorage::new()));
        let client =
            ApiClient::with_http_client(reqwest::Client::new(), "http://localhost:8080/", session);
        assert_eq!(client.api_base(), "http://localhost:8080");
        assert!(format!("{client:?}").contains("localhost:8080"));
    }
}
