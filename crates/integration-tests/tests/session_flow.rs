//! Login, refresh and logout against file-backed storage, and the
//! navigation guard reading the resulting session.

#![allow(clippy::unwrap_used)]

use axum::http::{Method, StatusCode};
use secrecy::ExposeSecret;
use serde_json::json;
use shop_front_client::router::LOGIN_ROUTE;
use shop_front_client::services::{AuthError, AuthService};
use shop_front_client::{GuardState, Layout, Navigator, SessionChange};
use shop_front_core::{UserId, UserRole};
use shop_front_integration_tests::MockService;

fn login_response() -> serde_json::Value {
    json!({
        "access_token": "access-1",
        "refresh_token": "refresh-1",
        "user_id": 4,
        "role": 5
    })
}

#[tokio::test]
async fn test_login_persists_session_and_authenticates_next_call() {
    let mock = MockService::start().await;
    mock.respond_json(
        Method::POST,
        "/api/v0/auth/login",
        StatusCode::OK,
        &login_response(),
    );
    mock.respond_json(Method::GET, "/api/v1/orders", StatusCode::OK, &json!([]));
    let dir = tempfile::tempdir().unwrap();
    let api = mock.file_client(dir.path());
    let mut changes = api.session().subscribe();

    let record = AuthService::new(&api).login("ann", "pw").await.unwrap();
    assert_eq!(record.user_id(), Some(UserId::new(4)));
    assert_eq!(record.role(), Some(UserRole::Merchant));
    assert_eq!(changes.recv().await.unwrap(), SessionChange::Written);

    // The first call carried no token; the next one does.
    assert_eq!(mock.last_request().unwrap().authorization(), None);
    api.list_orders().await.unwrap();
    assert_eq!(
        mock.last_request().unwrap().authorization(),
        Some("Bearer access-1")
    );

    // A second process over the same directory sees the session.
    let reopened = mock.file_client(dir.path());
    let stored = reopened.session().read().unwrap();
    assert_eq!(stored, record);
    assert_eq!(stored.refresh_token().unwrap().expose_secret(), "refresh-1");
}

#[tokio::test]
async fn test_rejected_login_does_not_write_session() {
    let mock = MockService::start().await;
    mock.respond_json(
        Method::POST,
        "/api/v0/auth/login",
        StatusCode::UNAUTHORIZED,
        &json!({"error": "invalid credentials"}),
    );
    let dir = tempfile::tempdir().unwrap();
    let api = mock.file_client(dir.path());

    let err = AuthService::new(&api).login("ann", "nope").await.unwrap_err();

    assert_eq!(err.to_string(), "invalid credentials");
    assert!(api.session().read().is_none());
}

#[tokio::test]
async fn test_refresh_keeps_identity_claims() {
    let mock = MockService::start().await;
    mock.respond_json(
        Method::POST,
        "/api/v0/auth/login",
        StatusCode::OK,
        &login_response(),
    );
    mock.respond_json(
        Method::POST,
        "/api/v0/auth/refresh",
        StatusCode::OK,
        &json!({"access_token": "access-2", "refresh_token": "refresh-2"}),
    );
    let dir = tempfile::tempdir().unwrap();
    let api = mock.file_client(dir.path());
    let auth = AuthService::new(&api);

    auth.login("ann", "pw").await.unwrap();
    let refreshed = auth.refresh().await.unwrap();

    assert_eq!(
        mock.last_request().unwrap().json(),
        json!({"refresh_token": "refresh-1"})
    );
    assert_eq!(refreshed.access_token().unwrap().expose_secret(), "access-2");
    assert_eq!(refreshed.user_id(), Some(UserId::new(4)));
    assert_eq!(api.session().read(), Some(refreshed));
}

#[tokio::test]
async fn test_refresh_without_session_makes_no_call() {
    let mock = MockService::start().await;
    let api = mock.memory_client();

    let err = AuthService::new(&api).refresh().await.unwrap_err();

    assert!(matches!(err, AuthError::MissingRefreshToken));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_logout_calls_service_and_clears() {
    let mock = MockService::start().await;
    mock.respond_json(
        Method::POST,
        "/api/v0/auth/login",
        StatusCode::OK,
        &login_response(),
    );
    mock.respond_json(
        Method::POST,
        "/api/v0/auth/logout",
        StatusCode::OK,
        &json!({"ok": true}),
    );
    let dir = tempfile::tempdir().unwrap();
    let api = mock.file_client(dir.path());
    let auth = AuthService::new(&api);
    auth.login("ann", "pw").await.unwrap();
    let mut changes = api.session().subscribe();

    auth.logout().await.unwrap();

    let request = mock.last_request().unwrap();
    assert_eq!(request.path, "/api/v0/auth/logout");
    assert_eq!(request.authorization(), Some("Bearer access-1"));
    assert!(api.session().read().is_none());
    assert_eq!(changes.recv().await.unwrap(), SessionChange::Cleared);
}

#[tokio::test]
async fn test_guard_follows_login_and_logout() {
    let mock = MockService::start().await;
    mock.respond_json(
        Method::POST,
        "/api/v0/auth/login",
        StatusCode::OK,
        &login_response(),
    );
    mock.respond_json(
        Method::POST,
        "/api/v0/auth/logout",
        StatusCode::OK,
        &json!({"ok": true}),
    );
    let dir = tempfile::tempdir().unwrap();
    let api = mock.file_client(dir.path());
    let mut navigator = Navigator::new(api.session().clone());

    let nav = navigator.navigate("/merchant/home").clone();
    assert_eq!(nav.path, LOGIN_ROUTE);
    assert_eq!(nav.state, GuardState::Redirected);
    assert_eq!(navigator.title(), "Shop System - User Login");

    AuthService::new(&api).login("ann", "pw").await.unwrap();
    let nav = navigator.navigate("/merchant/home").clone();
    assert_eq!(nav.state, GuardState::Allowed);
    assert_eq!(navigator.layout(), Layout::Merchant);
    assert_eq!(navigator.title(), "Shop System - Merchant Console");

    AuthService::new(&api).logout().await.unwrap();
    assert_eq!(navigator.navigate("/cart").path, LOGIN_ROUTE);
}
