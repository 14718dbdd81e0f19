//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SHOPEASY_DATA_DIR` - Directory holding cart/wishlist/session snapshots (default: .shopeasy)
//! - `SHOPEASY_CATALOG_URL` - Product catalog base URL (default: <https://fakestoreapi.com>)
//! - `SHOPEASY_CATALOG_CACHE_TTL_SECS` - Catalog response cache lifetime (default: 300)
//! - `SHOPEASY_CATALOG_CACHE_CAPACITY` - Maximum cached catalog responses (default: 1000)
//! - `SHOPEASY_HTTP_TIMEOUT_SECS` - Catalog request timeout (default: 10)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_DATA_DIR: &str = ".shopeasy";
const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com";
const DEFAULT_CACHE_TTL_SECS: &str = "300";
const DEFAULT_CACHE_CAPACITY: &str = "1000";
const DEFAULT_HTTP_TIMEOUT_SECS: &str = "10";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory for durable client-side snapshots
    pub data_dir: PathBuf,
    /// Product catalog API configuration
    pub catalog: CatalogConfig,
}

/// Product catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog REST API
    pub base_url: Url,
    /// How long fetched products and categories stay cached
    pub cache_ttl: Duration,
    /// Maximum number of cached responses
    pub cache_capacity: u64,
    /// Per-request timeout
    pub timeout: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let data_dir = PathBuf::from(get("SHOPEASY_DATA_DIR", DEFAULT_DATA_DIR));

        let base_url = Url::parse(&get("SHOPEASY_CATALOG_URL", DEFAULT_CATALOG_URL))
            .map_err(|e| invalid("SHOPEASY_CATALOG_URL", &e))?;
        let cache_ttl = parse_secs(
            "SHOPEASY_CATALOG_CACHE_TTL_SECS",
            &get("SHOPEASY_CATALOG_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS),
        )?;
        let cache_capacity = get("SHOPEASY_CATALOG_CACHE_CAPACITY", DEFAULT_CACHE_CAPACITY)
            .parse::<u64>()
            .map_err(|e| invalid("SHOPEASY_CATALOG_CACHE_CAPACITY", &e))?;
        let timeout = parse_secs(
            "SHOPEASY_HTTP_TIMEOUT_SECS",
            &get("SHOPEASY_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS),
        )?;

        Ok(Self {
            data_dir,
            catalog: CatalogConfig {
                base_url,
                cache_ttl,
                cache_capacity,
                timeout,
            },
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn invalid(key: &str, err: &impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), err.to_string())
}

/// Parse a whole number of seconds.
fn parse_secs(key: &str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| invalid(key, &e))
}
