//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `SHOP_DATA_DIR` - Directory for the persisted cart (default: `.mini-shop`)
//! - `SHOP_SEARCH_DEBOUNCE_MS` - Search debounce window in ms (default: 300)
//! - `SHOP_PRIMARY_CATALOG_URL` - DummyJSON products endpoint
//! - `SHOP_FALLBACK_CATALOG_URL` - FakeStore products endpoint
//! - `SHOP_CATALOG_LIMIT` - Maximum records taken from a catalog source (default: 20)
//! - `SHOP_FETCH_TIMEOUT_SECS` - HTTP timeout for catalog requests (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_DATA_DIR: &str = ".mini-shop";
const DEFAULT_SEARCH_DEBOUNCE_MS: &str = "300";
const DEFAULT_PRIMARY_CATALOG_URL: &str = "https://dummyjson.com/products";
const DEFAULT_FALLBACK_CATALOG_URL: &str = "https://fakestoreapi.com/products";
const DEFAULT_CATALOG_LIMIT: &str = "20";
const DEFAULT_FETCH_TIMEOUT_SECS: &str = "10";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding the persisted cart
    pub data_dir: PathBuf,
    /// Quiet period before a search term takes effect
    pub search_debounce: Duration,
    /// Upstream catalog endpoints
    pub catalog: CatalogSourceConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Upstream catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogSourceConfig {
    /// DummyJSON products endpoint, tried first
    pub primary_url: Url,
    /// FakeStore products endpoint, tried when the primary fails
    pub fallback_url: Url,
    /// Maximum number of upstream records to take
    pub limit: usize,
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
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = PathBuf::from(get_or_default(&lookup, "SHOP_DATA_DIR", DEFAULT_DATA_DIR));
        let search_debounce = Duration::from_millis(parse_var(
            &lookup,
            "SHOP_SEARCH_DEBOUNCE_MS",
            DEFAULT_SEARCH_DEBOUNCE_MS,
        )?);
        let catalog = CatalogSourceConfig::from_lookup(&lookup)?;
        let sentry_dsn = lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty());

        Ok(Self {
            data_dir,
            search_debounce,
            catalog,
            sentry_dsn,
        })
    }
}

impl CatalogSourceConfig {
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let limit: usize = parse_var(&lookup, "SHOP_CATALOG_LIMIT", DEFAULT_CATALOG_LIMIT)?;
        if limit == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "SHOP_CATALOG_LIMIT".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            primary_url: parse_var(&lookup, "SHOP_PRIMARY_CATALOG_URL", DEFAULT_PRIMARY_CATALOG_URL)?,
            fallback_url: parse_var(
                &lookup,
                "SHOP_FALLBACK_CATALOG_URL",
                DEFAULT_FALLBACK_CATALOG_URL,
            )?,
            limit,
            timeout: Duration::from_secs(parse_var(
                &lookup,
                "SHOP_FETCH_TIMEOUT_SECS",
                DEFAULT_FETCH_TIMEOUT_SECS,
            )?),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a variable with a default value.
fn get_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

/// Get a variable (or its default) and parse it.
fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_or_default(lookup, key, default)
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
