//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `FAKESTORE_API_URL` - Catalog API root (default: `https://fakestoreapi.com`)
//! - `FAKESTORE_DATA_DIR` - Directory holding the persistent store (default: `.fakestore`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default catalog API root.
pub const DEFAULT_API_URL: &str = "https://fakestoreapi.com";

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = ".fakestore";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog API root
    pub api_url: Url,
    /// Directory holding the persistent key-value store
    pub data_dir: PathBuf,
}

impl StorefrontConfig {
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

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("FAKESTORE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = parse_api_url(&api_url)?;

        let data_dir = lookup("FAKESTORE_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());

        Ok(Self {
            api_url,
            data_dir: PathBuf::from(data_dir),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse the catalog API root; only `http` and `https` are accepted.
fn parse_api_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar("FAKESTORE_API_URL".to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "FAKESTORE_API_URL".to_string(),
            format!("unsupported scheme {}", url.scheme()),
        ));
    }

    Ok(url)
}
