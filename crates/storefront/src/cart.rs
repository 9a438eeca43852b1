//! Cart store.
//!
//! Owns the cart lines exclusively. Every operation that changes the cart
//! serializes the whole cart and writes it to the injected [`CartStorage`]
//! under [`CART_STORAGE_KEY`] before returning, so the persisted value always
//! matches the state produced by the triggering operation.
//!
//! Quantities always satisfy `1 <= quantity <= stock`, where `stock` is the
//! product snapshot taken at the line's last update.

use std::collections::HashSet;

use mini_shop_core::{CartItem, CartTotals, Product, ProductId};
use tracing::{debug, warn};

use crate::storage::{CartStorage, StorageError};

/// Storage key the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "cart";

/// Stock-aware shopping cart with write-through persistence.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    items: Vec<CartItem>,
}

impl<S: CartStorage> CartStore<S> {
    /// Build a store from whatever `storage` holds.
    ///
    /// Absent, unreadable or malformed data yields an empty cart. Stored
    /// lines that violate the quantity invariant are repaired.
    pub fn load(storage: S) -> Self {
        let items = match storage.load(CART_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<CartItem>>(&raw) {
                Ok(items) => sanitize(items),
                Err(e) => {
                    warn!(error = %e, "Stored cart is malformed, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read stored cart, starting empty");
                Vec::new()
            }
        };

        debug!(lines = items.len(), "Cart loaded");
        Self { storage, items }
    }

    /// Cart lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// The line for `product_id`, if any.
    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product.id() == product_id)
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Add one unit of `product`.
    ///
    /// Increments an existing line while it is below the product's stock, or
    /// inserts a new line of one when the product has stock. Anything else is
    /// a silent no-op. Returns whether the cart changed.
    pub fn add_to_cart(&mut self, product: &Product) -> bool {
        let id = product.id();

        if let Some(item) = self.items.iter_mut().find(|item| item.product.id() == id) {
            if item.quantity >= product.stock() {
                debug!(product_id = %id, quantity = item.quantity, "Add ignored, at stock limit");
                return false;
            }
            item.product = product.clone();
            item.quantity += 1;
            debug!(product_id = %id, quantity = item.quantity, "Cart line incremented");
        } else {
            if product.is_out_of_stock() {
                debug!(product_id = %id, "Add ignored, out of stock");
                return false;
            }
            self.items.push(CartItem::single(product.clone()));
            debug!(product_id = %id, "Cart line added");
        }

        self.persist();
        true
    }

    /// Remove the line for `product_id`. Absent ids are a no-op.
    pub fn remove_from_cart(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product.id() != product_id);
        if self.items.len() == before {
            return false;
        }

        debug!(product_id = %product_id, "Cart line removed");
        self.persist();
        true
    }

    /// Set the quantity of a line, clamped to `1..=stock`.
    ///
    /// Stock comes from the live `catalog`, not the cart snapshot. If the
    /// product is no longer in the catalog, is out of stock, or is not in the
    /// cart, nothing changes. Requests of zero or less clamp to one; this
    /// never removes a line.
    pub fn update_quantity(
        &mut self,
        catalog: &[Product],
        product_id: ProductId,
        requested: i64,
    ) -> bool {
        let Some(live) = catalog.iter().find(|p| p.id() == product_id) else {
            debug!(product_id = %product_id, "Quantity update ignored, product not in catalog");
            return false;
        };
        let Some(quantity) = clamp_quantity(requested, live.stock()) else {
            debug!(product_id = %product_id, "Quantity update ignored, product out of stock");
            return false;
        };
        let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product.id() == product_id)
        else {
            return false;
        };

        if item.quantity == quantity && item.product == *live {
            return false;
        }
        item.product = live.clone();
        item.quantity = quantity;
        debug!(product_id = %product_id, requested, quantity, "Cart quantity updated");

        self.persist();
        true
    }

    /// Totals for the current cart.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        compute_totals(&self.items)
    }

    fn persist(&self) {
        if let Err(e) = self.try_persist() {
            warn!(error = %e, "Failed to persist cart");
        }
    }

    fn try_persist(&self) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&self.items)?;
        self.storage.save(CART_STORAGE_KEY, &raw)
    }
}

/// Sum of quantities and of `price × quantity` over `items`.
#[must_use]
pub fn compute_totals(items: &[CartItem]) -> CartTotals {
    CartTotals {
        total_items: items.iter().map(|item| u64::from(item.quantity)).sum(),
        total_price: items.iter().map(CartItem::line_total).sum(),
    }
}

/// Clamp `requested` into `1..=stock`, or `None` when `stock` is zero.
fn clamp_quantity(requested: i64, stock: u32) -> Option<u32> {
    if stock == 0 {
        return None;
    }
    let clamped = requested.clamp(1, i64::from(stock));
    u32::try_from(clamped).ok()
}

/// Repair lines read back from storage.
///
/// Drops duplicate ids (first wins) and out-of-stock lines, and clamps
/// quantities into `1..=stock`.
fn sanitize(items: Vec<CartItem>) -> Vec<CartItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter_map(|mut item| {
            let id = item.product.id();
            if !seen.insert(id) {
                warn!(product_id = %id, "Dropping duplicate stored cart line");
                return None;
            }
            let quantity = clamp_quantity(i64::from(item.quantity), item.product.stock())?;
            if quantity != item.quantity {
                warn!(product_id = %id, stored = item.quantity, quantity, "Clamping stored cart quantity");
                item.quantity = quantity;
            }
            Some(item)
        })
        .collect()
}
