//! Integration tests for Mini Shop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mini-shop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Cart behaviour through the controller, with persistence
//! - `catalog_scenarios` - Startup fetch, debounced search, filters and sorting
//!
//! Everything runs against [`StaticProductSource`] and in-memory or
//! temp-dir storage, so no network is needed.

use std::time::Duration;

use mini_shop_core::{Price, Product, ProductDraft, ProductId};
use mini_shop_storefront::{CartStorage, Controller, StaticProductSource};

/// Debounce window used by the scenarios.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Build a valid product.
///
/// # Panics
///
/// Panics if the fields do not form a valid product.
#[must_use]
pub fn product(id: i64, title: &str, rupees: i64, category: &str, stock: i64) -> Product {
    ProductDraft {
        id: ProductId::new(id),
        title: title.to_string(),
        price: Price::from_rupees(rupees),
        category: category.to_string(),
        stock,
        image: None,
        description: None,
    }
    .validate()
    .expect("fixture product is valid")
}

/// A small mixed catalog.
#[must_use]
pub fn sample_catalog() -> Vec<Product> {
    vec![
        product(1, "Red Shirt", 500, "clothing", 2),
        product(2, "Phone", 14_999, "electronics", 5),
        product(3, "Blue Shirt", 799, "clothing", 0),
        product(4, "Desk Lamp", 1_499, "home", 10),
        product(5, "Red Mug", 299, "home", 3),
    ]
}

/// A controller over `storage` with `products` already loaded.
pub async fn loaded_controller<S: CartStorage>(storage: S, products: Vec<Product>) -> Controller<S> {
    let mut controller = Controller::new(storage, SEARCH_DEBOUNCE);
    controller.start(StaticProductSource::products(products));
    controller.settle().await;
    controller
}
