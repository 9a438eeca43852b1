//! Storefront controller.
//!
//! Owns the product list, the [`CartStore`] and the [`CatalogView`], and is
//! the single logic thread every state change runs on. Asynchronous work (the
//! startup catalog fetch and the search debounce timer) runs as spawned tasks
//! that only post a [`StoreEvent`] back; the controller applies events one at
//! a time via [`Controller::handle_event`], so each transition runs to
//! completion before the next begins.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut controller = Controller::new(FileStorage::new(&config.data_dir), config.search_debounce);
//! controller.start(HttpProductSource::new(&config.catalog)?);
//! controller.settle().await;
//!
//! controller.set_search_term("shirt");
//! controller.settle().await;
//! for product in controller.filtered_products() {
//!     println!("{} {}", product.title(), product.price());
//! }
//! ```

use std::time::Duration;

use mini_shop_core::{CartItem, CartTotals, FilterState, Product, ProductId, SortOrder};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info};

use crate::cart::CartStore;
use crate::catalog::{CatalogView, derive_categories};
use crate::source::{ProductSource, SourceError};
use crate::storage::CartStorage;

/// Results of asynchronous work, delivered to the logic thread.
#[derive(Debug)]
pub enum StoreEvent {
    /// The startup catalog fetch finished.
    CatalogLoaded(Result<Vec<Product>, SourceError>),
    /// A debounced search term is ready to be committed.
    SearchSettled { generation: u64, term: String },
}

/// Where the catalog fetch stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogStatus {
    /// No fetch has been started.
    #[default]
    Idle,
    /// The startup fetch is in flight.
    Loading,
    /// The catalog was loaded with this many products.
    Loaded(usize),
    /// The fetch failed; the catalog is empty.
    Failed(String),
}

/// Application-level orchestrator.
#[derive(Debug)]
pub struct Controller<S> {
    products: Vec<Product>,
    cart: CartStore<S>,
    catalog: CatalogView,
    status: CatalogStatus,
    events_tx: UnboundedSender<StoreEvent>,
    events_rx: UnboundedReceiver<StoreEvent>,
}

impl<S: CartStorage> Controller<S> {
    /// Create a controller with the cart restored from `storage` and an
    /// empty catalog.
    pub fn new(storage: S, search_debounce: Duration) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            products: Vec::new(),
            cart: CartStore::load(storage),
            catalog: CatalogView::new(search_debounce, events_tx.clone()),
            status: CatalogStatus::Idle,
            events_tx,
            events_rx,
        }
    }

    /// Kick off the one-time catalog fetch.
    ///
    /// The fetch runs to completion in the background and posts
    /// [`StoreEvent::CatalogLoaded`]. Calls after the first are ignored.
    /// Must be called from within a Tokio runtime.
    pub fn start<P>(&mut self, source: P)
    where
        P: ProductSource + 'static,
    {
        if self.status != CatalogStatus::Idle {
            debug!("Catalog fetch already started");
            return;
        }

        self.status = CatalogStatus::Loading;
        let events = self.events_tx.clone();
        let fetch = tokio::spawn(async move { source.fetch_products().await });
        tokio::spawn(async move {
            // A panicking source still has to settle the fetch.
            let result = fetch.await.unwrap_or_else(|e| {
                Err(SourceError::Unavailable(format!("catalog fetch task failed: {e}")))
            });
            let _ = events.send(StoreEvent::CatalogLoaded(result));
        });
        info!("Catalog fetch started");
    }

    // =========================================================================
    // Event loop
    // =========================================================================

    /// Apply one event. Returns whether it changed state.
    pub fn handle_event(&mut self, event: StoreEvent) -> bool {
        match event {
            StoreEvent::CatalogLoaded(Ok(products)) => {
                info!(products = products.len(), "Catalog loaded");
                self.status = CatalogStatus::Loaded(products.len());
                self.products = products;
                true
            }
            StoreEvent::CatalogLoaded(Err(e)) => {
                error!(error = %e, "Catalog fetch failed, continuing with an empty catalog");
                self.status = CatalogStatus::Failed(e.to_string());
                self.products.clear();
                true
            }
            StoreEvent::SearchSettled { generation, term } => {
                self.catalog.commit_search(generation, term)
            }
        }
    }

    /// Wait for the next event and apply it.
    pub async fn next_event(&mut self) -> bool {
        match self.events_rx.recv().await {
            Some(event) => self.handle_event(event),
            None => false,
        }
    }

    /// Apply every event that is already queued, without waiting.
    pub fn drain_ready(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            if self.handle_event(event) {
                applied += 1;
            }
        }
        applied
    }

    /// Whether a fetch or a debounce timer is still outstanding.
    #[must_use]
    pub const fn has_pending_work(&self) -> bool {
        matches!(self.status, CatalogStatus::Loading) || self.catalog.has_pending_search()
    }

    /// Process events until no fetch or debounce is outstanding. Returns the
    /// number of events that changed state.
    pub async fn settle(&mut self) -> usize {
        let mut applied = 0;
        while self.has_pending_work() {
            let Some(event) = self.events_rx.recv().await else {
                break;
            };
            if self.handle_event(event) {
                applied += 1;
            }
        }
        applied
    }

    // =========================================================================
    // Cart operations
    // =========================================================================

    /// Add one unit of a catalog product. Unknown ids are a no-op.
    pub fn add_to_cart(&mut self, product_id: ProductId) -> bool {
        let Some(product) = self.products.iter().find(|p| p.id() == product_id) else {
            debug!(product_id = %product_id, "Add ignored, product not in catalog");
            return false;
        };
        self.cart.add_to_cart(product)
    }

    pub fn remove_from_cart(&mut self, product_id: ProductId) -> bool {
        self.cart.remove_from_cart(product_id)
    }

    /// Set a line's quantity, clamped against the live catalog stock.
    pub fn update_quantity(&mut self, product_id: ProductId, requested: i64) -> bool {
        self.cart
            .update_quantity(&self.products, product_id, requested)
    }

    // =========================================================================
    // Filter operations
    // =========================================================================

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.catalog.set_search_term(term);
    }

    pub fn set_selected_category(&mut self, category: Option<String>) {
        self.catalog.set_selected_category(category);
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.catalog.set_sort_order(order);
    }

    pub fn clear_filters(&mut self) {
        self.catalog.clear_filters();
    }

    // =========================================================================
    // Derived views
    // =========================================================================

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub const fn catalog_status(&self) -> &CatalogStatus {
        &self.status
    }

    #[must_use]
    pub const fn filter_state(&self) -> &FilterState {
        self.catalog.filter_state()
    }

    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        self.catalog.has_active_filters()
    }

    /// Filtered and sorted products for the current inputs.
    #[must_use]
    pub fn filtered_products(&self) -> Vec<&Product> {
        self.catalog.filtered(&self.products)
    }

    /// Sorted unique categories in the catalog.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        derive_categories(&self.products)
    }

    #[must_use]
    pub fn cart_items(&self) -> &[CartItem] {
        self.cart.items()
    }

    #[must_use]
    pub fn cart_totals(&self) -> CartTotals {
        self.cart.totals()
    }

    /// Units of `product_id` currently in the cart.
    #[must_use]
    pub fn quantity_in_cart(&self, product_id: ProductId) -> u32 {
        self.cart.get(product_id).map_or(0, |item| item.quantity)
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore<S> {
        &self.cart
    }
}
