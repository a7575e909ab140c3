//! Shop Front Core - Shared types library.
//!
//! This crate provides common types used across all Shop Front components:
//! - `client` - Session store, local cache, request layer and navigation guard
//! - `cli` - Command-line front end driving the client
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no persistence,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, statuses
//!   and the persisted session record

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
