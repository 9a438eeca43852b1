//! Mini Shop storefront engine.
//!
//! The state behind a small storefront: a product catalog fetched once at
//! startup, a persisted stock-aware cart, and a filtered catalog view with a
//! debounced search box. Everything is driven through [`Controller`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod source;
pub mod storage;

pub use cart::{CART_STORAGE_KEY, CartStore, compute_totals};
pub use catalog::{CatalogView, category_label, derive_categories, derive_filtered_products};
pub use config::{CatalogSourceConfig, StorefrontConfig};
pub use controller::{CatalogStatus, Controller, StoreEvent};
pub use error::{AppError, Result};
pub use source::{HttpProductSource, ProductSource, SourceError, StaticProductSource};
pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};
