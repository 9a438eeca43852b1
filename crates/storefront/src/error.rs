//! Unified error handling.
//!
//! Nothing in the cart or catalog core is fatal: fetch failures, unreadable
//! carts and stale product ids all degrade to safe defaults where they occur.
//! `AppError` exists for the edges that can still refuse to start, such as
//! configuration and command-line input.

use mini_shop_core::SortOrderError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::source::SourceError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog source failed.
    #[error("Catalog error: {0}")]
    Source(#[from] SourceError),

    /// Unrecognised sort order.
    #[error("Invalid sort order: {0}")]
    SortOrder(#[from] SortOrderError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Log the error so the tracing pipeline (and Sentry, when enabled)
    /// records it.
    pub fn report(&self) {
        match self {
            Self::NotFound(_) | Self::SortOrder(_) => {
                tracing::warn!(error = %self, "Request rejected");
            }
            _ => tracing::error!(error = %self, "Storefront error"),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
