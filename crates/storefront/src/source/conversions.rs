//! Upstream record conversion functions.
//!
//! Both upstreams price in dollars on a rough 1-200 scale. Prices are mapped
//! onto rupee price points between 299 and 19999.

use std::sync::LazyLock;

use mini_shop_core::{Price, Product, ProductDraft, ProductId};
use regex::Regex;
use serde::Deserialize;

const MIN_UPSTREAM_PRICE: f64 = 1.0;
const MAX_UPSTREAM_PRICE: f64 = 200.0;
const MIN_RUPEES: i64 = 299;
const MAX_RUPEES: i64 = 19_999;

/// Products mentioning any of these are not listed.
static NON_VEGETARIAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)meat|chicken|beef|pork|mutton|lamb|fish|seafood|prawn|shrimp|crab|lobster|turkey|duck|bacon|sausage|ham|pepperoni|non-veg|non veg|nonveg",
    )
    .expect("non-vegetarian keyword pattern is valid")
});

// =============================================================================
// Upstream Shapes
// =============================================================================

/// DummyJSON `/products` response envelope.
#[derive(Debug, Deserialize)]
pub(super) struct DummyJsonResponse {
    pub products: Vec<DummyJsonProduct>,
}

/// DummyJSON product record (only the fields we read).
#[derive(Debug, Deserialize)]
pub(super) struct DummyJsonProduct {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub stock: i64,
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub description: Option<String>,
}

/// FakeStore product record. FakeStore has no stock field.
#[derive(Debug, Deserialize)]
pub(super) struct FakeStoreProduct {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub category: String,
    pub image: Option<String>,
    pub description: Option<String>,
}

// =============================================================================
// Conversions
// =============================================================================

pub(super) fn convert_dummyjson_product(product: DummyJsonProduct) -> ProductDraft {
    let image = product
        .thumbnail
        .filter(|t| !t.trim().is_empty())
        .or_else(|| product.images.into_iter().next());

    ProductDraft {
        id: ProductId::new(product.id),
        title: product.title,
        price: to_rupee_price(product.price),
        category: product.category,
        stock: product.stock,
        image,
        description: product.description,
    }
}

pub(super) fn convert_fakestore_product(product: FakeStoreProduct, stock: i64) -> ProductDraft {
    ProductDraft {
        id: ProductId::new(product.id),
        title: product.title,
        price: to_rupee_price(product.price),
        category: product.category,
        stock,
        image: product.image,
        description: product.description,
    }
}

/// Map an upstream dollar price onto a rupee price point.
///
/// The price is clamped to 1-200, mapped linearly onto 299-19999, then
/// rounded to the nearest 100 (below 1000), 500 (below 5000) or 1000, minus
/// one.
pub(super) fn to_rupee_price(upstream: f64) -> Price {
    let clamped = upstream.clamp(MIN_UPSTREAM_PRICE, MAX_UPSTREAM_PRICE);
    let normalized = (clamped - MIN_UPSTREAM_PRICE) / (MAX_UPSTREAM_PRICE - MIN_UPSTREAM_PRICE);
    #[allow(clippy::cast_precision_loss)] // Both bounds are small integers
    let rupees = MIN_RUPEES as f64 + normalized * (MAX_RUPEES - MIN_RUPEES) as f64;

    let step = if rupees < 1000.0 {
        100.0
    } else if rupees < 5000.0 {
        500.0
    } else {
        1000.0
    };

    // NaN upstream prices fall through as 0 and end up at the floor.
    #[allow(clippy::cast_possible_truncation)] // Bounded by the clamp above
    let point = ((rupees / step).round() * step) as i64 - 1;
    Price::from_rupees(point.clamp(MIN_RUPEES, MAX_RUPEES))
}

/// Whether the record mentions a non-vegetarian keyword in its title,
/// category or description.
pub(super) fn is_non_vegetarian(draft: &ProductDraft) -> bool {
    NON_VEGETARIAN.is_match(&draft.title)
        || NON_VEGETARIAN.is_match(&draft.category)
        || draft
            .description
            .as_deref()
            .is_some_and(|d| NON_VEGETARIAN.is_match(d))
}

/// Drop non-vegetarian records and validate the rest.
///
/// Invalid records are skipped with a warning rather than failing the whole
/// catalog.
pub(super) fn finalize(drafts: impl IntoIterator<Item = ProductDraft>) -> Vec<Product> {
    drafts
        .into_iter()
        .filter(|draft| !is_non_vegetarian(draft))
        .filter_map(|draft| match draft.validate() {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping invalid catalog record");
                None
            }
        })
        .collect()
}
