//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOP_FRONT_API_BASE` - Remote service base address (default: `http://localhost:8080`)
//! - `SHOP_FRONT_STORAGE_DIR` - Directory for file-backed storage (default: `.shop-front`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Environment name reported to Sentry

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Base address used when `SHOP_FRONT_API_BASE` is unset.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// Storage directory used when `SHOP_FRONT_STORAGE_DIR` is unset.
pub const DEFAULT_STORAGE_DIR: &str = ".shop-front";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Remote service base address, without a trailing slash
    pub api_base: String,
    /// Directory for file-backed storage
    pub storage_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Environment name reported to Sentry
    pub sentry_environment: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base = normalize_api_base(
            "SHOP_FRONT_API_BASE",
            &get_env_or_default("SHOP_FRONT_API_BASE", DEFAULT_API_BASE),
        )?;
        let storage_dir =
            PathBuf::from(get_env_or_default("SHOP_FRONT_STORAGE_DIR", DEFAULT_STORAGE_DIR));
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");

        Ok(Self {
            api_base,
            storage_dir,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Override the base address.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `api_base` is not an HTTP(S) URL.
    pub fn with_api_base(mut self, api_base: &str) -> Result<Self, ConfigError> {
        self.api_base = normalize_api_base("api_base", api_base)?;
        Ok(self)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Validate a base address and strip trailing slashes so request paths can be
/// appended verbatim.
fn normalize_api_base(var_name: &str, value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(value.trim_end_matches('/').to_string())
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}
