//! Product catalog sources.
//!
//! # Architecture
//!
//! - [`ProductSource`] is the boundary: a single async fetch returning
//!   validated [`Product`]s or an error
//! - [`HttpProductSource`] reads DummyJSON and falls back to FakeStore
//! - [`StaticProductSource`] serves a fixed list (or a fixed failure) for
//!   tests and offline use
//!
//! Upstream records are normalised and validated here, so nothing past this
//! module needs defensive field checks.

mod conversions;
mod http;

use std::future::Future;
use std::time::Duration;

use mini_shop_core::Product;
use thiserror::Error;

pub use http::HttpProductSource;

/// Errors that can occur when fetching the catalog.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Every configured upstream failed.
    #[error("All catalog sources failed")]
    AllSourcesFailed,

    /// Source is unavailable for another reason.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// A zero-argument async supplier of the product catalog.
pub trait ProductSource: Send + Sync {
    /// Fetch the full catalog, in display order.
    fn fetch_products(&self) -> impl Future<Output = Result<Vec<Product>, SourceError>> + Send;
}

/// A source with a canned answer.
#[derive(Debug, Clone)]
pub struct StaticProductSource {
    outcome: Result<Vec<Product>, String>,
    delay: Duration,
}

impl StaticProductSource {
    /// Always returns `products`.
    #[must_use]
    pub const fn products(products: Vec<Product>) -> Self {
        Self {
            outcome: Ok(products),
            delay: Duration::ZERO,
        }
    }

    /// Always fails with [`SourceError::Unavailable`].
    #[must_use]
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            outcome: Err(reason.into()),
            delay: Duration::ZERO,
        }
    }

    /// Answer only after `delay`, to simulate network latency.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl ProductSource for StaticProductSource {
    async fn fetch_products(&self) -> Result<Vec<Product>, SourceError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.outcome.clone().map_err(SourceError::Unavailable)
    }
}
