//! Authentication guard for protected routes.

use tracing::debug;

use crate::session::SessionStore;

/// Path prefixes that require a session with a non-empty access token.
///
/// Matching is a plain string prefix test, so `/cart/anything` and
/// `/user/homepage` are protected too.
pub const PROTECTED_PREFIXES: [&str; 3] = ["/cart", "/user/home", "/merchant/home"];

/// Where unauthenticated visitors of a protected route are sent.
pub const LOGIN_ROUTE: &str = "/user/login";

/// Outcome of evaluating one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Enter the requested path.
    Allow,
    /// Enter this path instead.
    Redirect(&'static str),
}

/// Whether entering `path` requires a session.
#[must_use]
pub fn requires_auth(path: &str) -> bool {
    PROTECTED_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

/// Decide whether a transition to `path` may proceed.
///
/// The session store is consulted only for protected paths.
#[must_use]
pub fn evaluate(path: &str, session: &SessionStore) -> GuardDecision {
    if !requires_auth(path) {
        return GuardDecision::Allow;
    }

    let authenticated = session
        .read()
        .is_some_and(|record| record.has_access_token());
    debug!(path, authenticated, "Protected route evaluated");

    if authenticated {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect(LOGIN_ROUTE)
    }
}
