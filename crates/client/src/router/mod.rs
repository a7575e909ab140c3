//! Navigation guard and document title for the portals.
//!
//! A [`Navigator`] plays the part of the host router's hooks: every call to
//! [`Navigator::navigate`] resolves the target against the route table,
//! runs the authentication guard, and updates the current layout and
//! document title. Each transition is synchronous and goes
//! `Idle -> Evaluating -> Allowed | Redirected`.

mod guard;
mod routes;

pub use guard::{GuardDecision, LOGIN_ROUTE, PROTECTED_PREFIXES, evaluate, requires_auth};
pub use routes::{
    CATCH_ALL, Layout, NOT_FOUND, REDIRECTS, ROUTES, ResolvedRoute, RouteDescriptor, normalize_path,
    resolve,
};

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::session::SessionStore;

/// Product name shown in every document title.
pub const PRODUCT_NAME: &str = "Shop System";

/// Format the document title for a route title.
#[must_use]
pub fn document_title(title: Option<&str>) -> String {
    match title {
        Some(title) if !title.is_empty() => format!("{PRODUCT_NAME} - {title}"),
        _ => PRODUCT_NAME.to_string(),
    }
}

/// Guard state of the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardState {
    /// No transition has run yet.
    #[default]
    Idle,
    /// The guard is deciding the current transition.
    Evaluating,
    /// The requested route was entered.
    Allowed,
    /// The requested route was protected and the login route was entered instead.
    Redirected,
}

/// Result of one completed transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Path as requested by the caller.
    pub requested: String,
    /// Path actually entered.
    pub path: String,
    /// Values of the `:name` segments of the matched pattern.
    pub params: BTreeMap<String, String>,
    /// Frame of the entered route.
    pub layout: Layout,
    /// Full document title.
    pub title: String,
    /// Guard outcome of this transition.
    pub state: GuardState,
}

/// Current route, guard state and title of one portal window.
#[derive(Debug)]
pub struct Navigator {
    session: SessionStore,
    state: GuardState,
    current: Option<Navigation>,
}

impl Navigator {
    /// Create a navigator that has not entered any route yet.
    #[must_use]
    pub const fn new(session: SessionStore) -> Self {
        Self {
            session,
            state: GuardState::Idle,
            current: None,
        }
    }

    /// Run one transition to `target`.
    pub fn navigate(&mut self, target: &str) -> &Navigation {
        self.state = GuardState::Evaluating;
        let resolved = resolve(target);
        debug!(target, path = %resolved.path, "Evaluating transition");

        let (resolved, state) = match evaluate(&resolved.path, &self.session) {
            GuardDecision::Allow => (resolved, GuardState::Allowed),
            GuardDecision::Redirect(to) => {
                info!(from = %resolved.path, to, "Redirecting unauthenticated visitor");
                (resolve(to), GuardState::Redirected)
            }
        };
        self.state = state;

        let ResolvedRoute {
            path,
            descriptor,
            params,
        } = resolved;
        self.current.insert(Navigation {
            requested: target.to_string(),
            path,
            params,
            layout: descriptor.layout,
            title: document_title(descriptor.title),
            state,
        })
    }

    /// Guard state after the latest transition.
    #[must_use]
    pub const fn state(&self) -> GuardState {
        self.state
    }

    /// The latest completed transition, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&Navigation> {
        self.current.as_ref()
    }

    /// Current document title. Before the first transition this is the bare
    /// product name.
    #[must_use]
    pub fn title(&self) -> &str {
        self.current
            .as_ref()
            .map_or(PRODUCT_NAME, |nav| nav.title.as_str())
    }

    /// Frame the shell should render. Neutral before the first transition.
    #[must_use]
    pub fn layout(&self) -> Layout {
        self.current
            .as_ref()
            .map_or(Layout::Neutral, |nav| nav.layout)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use shop_front_core::SessionRecord;

    use super::*;
    use crate::storage::{MemoryStorage, Storage, StorageError};

    /// Storage that counts reads, to prove which routes consult the session.
    #[derive(Debug, Default)]
    struct CountingStorage {
        inner: MemoryStorage,
        reads: AtomicUsize,
    }

    impl Storage for CountingStorage {
        fn get_item(&self, key: &str) -> Option<String> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.inner.set_item(key, value)
        }

        fn remove_item(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove_item(key)
        }
    }

    fn navigator() -> (Navigator, Arc<CountingStorage>) {
        let storage = Arc::new(CountingStorage::default());
        let session = SessionStore::new(storage.clone());
        (Navigator::new(session), storage)
    }

    #[test]
    fn test_document_title() {
        assert_eq!(document_title(Some("Chat")), "Shop System - Chat");
        assert_eq!(document_title(None), "Shop System");
        assert_eq!(document_title(Some("")), "Shop System");
    }

    #[test]
    fn test_initial_state() {
        let (nav, _) = navigator();
        assert_eq!(nav.state(), GuardState::Idle);
        assert_eq!(nav.title(), PRODUCT_NAME);
        assert_eq!(nav.layout(), Layout::Neutral);
        assert!(nav.current().is_none());
    }

    #[test]
    fn test_protected_routes_redirect_without_session() {
        for path in ["/cart", "/user/home", "/merchant/home"] {
            let (mut nav, _) = navigator();
            let result = nav.navigate(path).clone();
            assert_eq!(result.path, LOGIN_ROUTE, "{path}");
            assert_eq!(result.requested, path);
            assert_eq!(result.state, GuardState::Redirected);
            assert_eq!(result.title, "Shop System - User Login");
            assert_eq!(nav.state(), GuardState::Redirected);
        }
    }

    #[test]
    fn test_protected_routes_proceed_with_token() {
        let (mut nav, storage) = navigator();
        SessionStore::new(storage)
            .write(&SessionRecord::from_access_token("T"))
            .unwrap();

        let result = nav.navigate("/merchant/home");
        assert_eq!(result.path, "/merchant/home");
        assert_eq!(result.state, GuardState::Allowed);
        assert_eq!(result.layout, Layout::Merchant);
        assert_eq!(result.title, "Shop System - Merchant Console");
    }

    #[test]
    fn test_unprotected_routes_never_read_session() {
        let (mut nav, storage) = navigator();
        for path in ["/user", "/merchant", "/chat", "/no/such/page", "/", "/shops/7"] {
            let result = nav.navigate(path);
            assert_eq!(result.state, GuardState::Allowed, "{path}");
        }
        assert_eq!(storage.reads.load(Ordering::SeqCst), 0);

        nav.navigate("/cart");
        assert_eq!(storage.reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_title_and_layout_follow_navigation() {
        let (mut nav, _) = navigator();
        nav.navigate("/chat");
        assert_eq!(nav.title(), "Shop System - Chat");
        assert_eq!(nav.layout(), Layout::Neutral);

        nav.navigate("/products/9?ref=home");
        assert_eq!(nav.title(), "Shop System - Product Details");
        assert_eq!(nav.layout(), Layout::User);
        assert_eq!(nav.current().unwrap().params.get("id").unwrap(), "9");

        nav.navigate("/missing");
        assert_eq!(nav.title(), "Shop System - Page Not Found");
    }

    #[test]
    fn test_redirect_follows_logout() {
        let (mut nav, storage) = navigator();
        let session = SessionStore::new(storage);
        session
            .write(&SessionRecord::from_access_token("T"))
            .unwrap();
        assert_eq!(nav.navigate("/cart").state, GuardState::Allowed);

        session.clear().unwrap();
        assert_eq!(nav.navigate("/cart").path, LOGIN_ROUTE);
    }
}
