//! Core types for Mini Shop.
//!
//! This module provides type-safe wrappers for the storefront's domain concepts.

pub mod cart;
pub mod filter;
pub mod id;
pub mod price;
pub mod product;

pub use cart::{CartItem, CartTotals};
pub use filter::{FilterState, SortOrder, SortOrderError};
pub use id::*;
pub use price::Price;
pub use product::{Product, ProductDraft, ProductError};
