//! Shop Front client library.
//!
//! The data-access and session layer shared by the user and merchant portals:
//!
//! - [`storage`] - Key/value persistence medium (in-memory or file-backed)
//! - [`session`] - Persisted session store with change notifications
//! - [`cache`] - Namespaced local cache for UI state
//! - [`api`] - Authenticated request layer over the remote service
//! - [`router`] - Route table and navigation guard
//! - [`services`] - Login/logout/refresh flows that write the session
//! - [`config`] - Environment-driven configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cache;
pub mod config;
pub mod router;
pub mod services;
pub mod session;
pub mod storage;

pub use api::{ApiClient, ApiError, RequestDescriptor};
pub use cache::{CacheError, LocalCache};
pub use config::{ClientConfig, ConfigError};
pub use router::{GuardState, Layout, Navigation, Navigator};
pub use session::{SessionChange, SessionStore};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
