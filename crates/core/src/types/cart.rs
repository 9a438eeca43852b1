//! Cart line items and derived totals.

use serde::{Deserialize, Serialize};

use super::price::Price;
use super::product::Product;

/// A product in the cart with a purchase quantity.
///
/// Serialized flat: the product fields plus `quantity`, one JSON object per
/// line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Snapshot of the product as of the last cart update.
    #[serde(flatten)]
    pub product: Product,
    /// Units in the cart, always within `1..=product.stock()`.
    pub quantity: u32,
}

impl CartItem {
    /// A fresh line holding a single unit.
    #[must_use]
    pub const fn single(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// `price × quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price().times(self.quantity)
    }

    /// Whether one more unit would still fit within the snapshot stock.
    #[must_use]
    pub const fn can_increment(&self) -> bool {
        self.quantity < self.product.stock()
    }
}

/// Aggregates over the whole cart. Derived, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CartTotals {
    /// Sum of quantities.
    pub total_items: u64,
    /// Sum of line totals.
    pub total_price: Price,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{ProductDraft, ProductId};

    fn shirt(stock: i64) -> Product {
        ProductDraft {
            id: ProductId::new(1),
            title: "Red Shirt".to_string(),
            price: Price::from_rupees(500),
            category: "clothing".to_string(),
            stock,
            image: None,
            description: None,
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn test_line_total() {
        let item = CartItem {
            product: shirt(5),
            quantity: 3,
        };
        assert_eq!(item.line_total(), Price::from_rupees(1500));
    }

    #[test]
    fn test_can_increment_stops_at_stock() {
        let mut item = CartItem::single(shirt(2));
        assert!(item.can_increment());
        item.quantity = 2;
        assert!(!item.can_increment());
    }

    #[test]
    fn test_serialized_shape_is_flat() {
        let item = CartItem::single(shirt(2));
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["title"], "Red Shirt");
        assert_eq!(value["quantity"], 1);

        let back: CartItem = serde_json::from_value(value).unwrap();
        assert_eq!(back, item);
    }
}
