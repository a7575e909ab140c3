//! Integration tests for Shop Front.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shop-front-integration-tests
//! ```
//!
//! No external service is needed: [`MockService`] runs an in-process `axum`
//! stand-in for the remote service on an ephemeral port, records every
//! request it receives and answers with canned responses.
//!
//! # Test Categories
//!
//! - `request_layer` - Headers, error normalization, transport failures
//! - `endpoints` - Method, path and body of every typed operation
//! - `session_flow` - Login/refresh/logout against file-backed storage,
//!   navigation guard

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use axum::Router;
use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use shop_front_client::{ApiClient, FileStorage, MemoryStorage, SessionStore, Storage};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// One request as received by the mock.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl RecordedRequest {
    /// The `Authorization` header, if sent.
    #[must_use]
    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
    }

    /// The `Content-Type` header, if sent.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    /// The body parsed as JSON (`null` when empty or not JSON).
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Default)]
struct MockState {
    responses: Mutex<HashMap<(Method, String), (StatusCode, String)>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// In-process stand-in for the remote service.
pub struct MockService {
    addr: SocketAddr,
    state: Arc<MockState>,
    task: JoinHandle<()>,
}

impl MockService {
    /// Start the mock on an ephemeral localhost port.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock service");
        let addr = listener.local_addr().expect("Mock service has no address");
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state, task }
    }

    /// Base address to configure the client with.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Answer `method path` with a raw body.
    pub fn respond(&self, method: Method, path: &str, status: StatusCode, body: impl Into<String>) {
        self.state
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((method, path.to_string()), (status, body.into()));
    }

    /// Answer `method path` with a JSON body.
    pub fn respond_json(&self, method: Method, path: &str, status: StatusCode, body: &Value) {
        self.respond(method, path, status, body.to_string());
    }

    /// Every request received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent request.
    #[must_use]
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests().pop()
    }

    /// A client over fresh in-memory storage pointed at this mock.
    #[must_use]
    pub fn memory_client(&self) -> ApiClient {
        client_over(Arc::new(MemoryStorage::new()), &self.url())
    }

    /// A client over file storage in `dir` pointed at this mock.
    ///
    /// # Panics
    ///
    /// Panics if the directory cannot be created.
    #[must_use]
    pub fn file_client(&self, dir: &Path) -> ApiClient {
        let storage = FileStorage::open(dir).expect("Failed to open file storage");
        client_over(Arc::new(storage), &self.url())
    }
}

impl Drop for MockService {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// A client over `storage` for `api_base`.
#[must_use]
pub fn client_over(storage: Arc<dyn Storage>, api_base: &str) -> ApiClient {
    ApiClient::with_http_client(reqwest::Client::new(), api_base, SessionStore::new(storage))
}

/// Base address of a port nothing listens on.
///
/// # Panics
///
/// Panics if no local port can be bound.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("Probe listener has no address");
    drop(listener);
    format!("http://{addr}")
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path = uri.path().to_string();
    state
        .requests
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            headers,
            body,
        });

    let canned = state
        .responses
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&(method, path))
        .cloned();

    match canned {
        Some((status, body)) => (status, [(CONTENT_TYPE, "application/json")], body).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            [(CONTENT_TYPE, "application/json")],
            r#"{"error":"no canned response"}"#,
        )
            .into_response(),
    }
}
