//! Flows that combine the request layer with the session store.
//!
//! # Services
//!
//! - `auth` - Login, logout and token refresh; the only writers of the
//!   persisted session besides direct callers of [`crate::SessionStore`]

pub mod auth;

pub use auth::{AuthError, AuthService};
