//! Catalog view: search, category and sort state plus the derivations that
//! turn a product list into what is shown.
//!
//! Category and sort changes take effect immediately. Search terms are
//! debounced: the live term updates on every keystroke, while the term used
//! for filtering is only committed once input has been quiet for the
//! debounce window.

use std::collections::BTreeSet;
use std::time::Duration;

use mini_shop_core::{FilterState, Product, SortOrder};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::controller::StoreEvent;
use crate::debounce::Debouncer;

/// Filter state owner with a debounced search term.
#[derive(Debug)]
pub struct CatalogView {
    filter: FilterState,
    search: Debouncer<StoreEvent>,
}

impl CatalogView {
    /// Create a view whose search commits arrive on `events` after `debounce`.
    #[must_use]
    pub fn new(debounce: Duration, events: UnboundedSender<StoreEvent>) -> Self {
        Self {
            filter: FilterState::default(),
            search: Debouncer::new(debounce, events),
        }
    }

    #[must_use]
    pub const fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    /// Update the live search term and restart the debounce window.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        self.filter.search_term.clone_from(&term);
        let generation = self.search.schedule(|generation| StoreEvent::SearchSettled {
            generation,
            term,
        });
        debug!(generation, term = %self.filter.search_term, "Search term scheduled");
    }

    /// Commit a settled search term. Stale generations are ignored.
    pub fn commit_search(&mut self, generation: u64, term: String) -> bool {
        if !self.search.accept(generation) {
            debug!(generation, "Dropping stale search commit");
            return false;
        }
        debug!(generation, term = %term, "Search term committed");
        self.filter.debounced_search_term = term;
        true
    }

    #[must_use]
    pub const fn has_pending_search(&self) -> bool {
        self.search.is_pending()
    }

    /// Select a category. `None` or a blank string means all categories.
    pub fn set_selected_category(&mut self, category: Option<String>) {
        self.filter.selected_category = category.filter(|c| !c.trim().is_empty());
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.filter.sort_order = order;
    }

    /// Reset search, category and sort in one step.
    ///
    /// The committed search term is reset too and any pending commit is
    /// cancelled, so the full catalog shows immediately.
    pub fn clear_filters(&mut self) {
        self.search.cancel();
        self.filter = FilterState::default();
        debug!("Filters cleared");
    }

    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        self.filter.has_active_filters()
    }

    /// The current filtered and sorted view of `products`.
    #[must_use]
    pub fn filtered<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        derive_filtered_products(products, &self.filter)
    }
}

/// Unique categories present in `products`, sorted ascending.
#[must_use]
pub fn derive_categories(products: &[Product]) -> Vec<&str> {
    products
        .iter()
        .map(Product::category)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Apply search, category and sort, in that order.
///
/// 1. Case-insensitive substring match of the committed search term against
///    the title, skipped when the term is empty.
/// 2. Exact category match, skipped when no category is selected.
/// 3. Stable sort by price, skipped for [`SortOrder::Unsorted`].
#[must_use]
pub fn derive_filtered_products<'a>(
    products: &'a [Product],
    filter: &FilterState,
) -> Vec<&'a Product> {
    let needle = filter.debounced_search_term.to_lowercase();

    let mut filtered: Vec<&Product> = products
        .iter()
        .filter(|p| needle.is_empty() || p.title().to_lowercase().contains(&needle))
        .filter(|p| {
            filter
                .selected_category
                .as_deref()
                .is_none_or(|category| p.category() == category)
        })
        .collect();

    match filter.sort_order {
        SortOrder::Unsorted => {}
        SortOrder::LowToHigh => filtered.sort_by_key(|p| p.price()),
        SortOrder::HighToLow => filtered.sort_by(|a, b| b.price().cmp(&a.price())),
    }

    filtered
}

/// Display label for a category: first letter upper-cased.
#[must_use]
pub fn category_label(category: &str) -> String {
    let mut chars = category.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mini_shop_core::{Price, ProductDraft, ProductId};
    use tokio::sync::mpsc;

    use super::*;

    fn product(id: i64, title: &str, price: i64, category: &str) -> Product {
        ProductDraft {
            id: ProductId::new(id),
            title: title.to_string(),
            price: Price::from_rupees(price),
            category: category.to_string(),
            stock: 5,
            image: None,
            description: None,
        }
        .validate()
        .unwrap()
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Red Shirt", 500, "clothing"),
            product(2, "Phone", 14999, "electronics"),
            product(3, "Blue Shirt", 500, "clothing"),
            product(4, "Lamp", 1499, "home"),
        ]
    }

    fn ids(products: &[&Product]) -> Vec<i64> {
        products.iter().map(|p| p.id().as_i64()).collect()
    }

    #[test]
    fn test_categories_are_unique_and_sorted() {
        let products = catalog();
        assert_eq!(
            derive_categories(&products),
            vec!["clothing", "electronics", "home"]
        );
        assert!(derive_categories(&[]).is_empty());
    }

    #[test]
    fn test_default_filter_keeps_catalog_order() {
        let products = catalog();
        let filtered = derive_filtered_products(&products, &FilterState::default());
        assert_eq!(ids(&filtered), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_search_is_case_insensitive_on_title() {
        let products = catalog();
        let filter = FilterState {
            debounced_search_term: "SHIRT".to_string(),
            ..FilterState::default()
        };
        assert_eq!(ids(&derive_filtered_products(&products, &filter)), vec![1, 3]);
    }

    #[test]
    fn test_live_search_term_does_not_filter() {
        let products = catalog();
        let filter = FilterState {
            search_term: "lamp".to_string(),
            ..FilterState::default()
        };
        assert_eq!(derive_filtered_products(&products, &filter).len(), 4);
    }

    #[test]
    fn test_category_filter_is_exact() {
        let products = catalog();
        let filter = FilterState {
            selected_category: Some("clothing".to_string()),
            ..FilterState::default()
        };
        assert_eq!(ids(&derive_filtered_products(&products, &filter)), vec![1, 3]);

        let filter = FilterState {
            selected_category: Some("cloth".to_string()),
            ..FilterState::default()
        };
        assert!(derive_filtered_products(&products, &filter).is_empty());
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let products = catalog();
        let ascending = FilterState {
            sort_order: SortOrder::LowToHigh,
            ..FilterState::default()
        };
        assert_eq!(
            ids(&derive_filtered_products(&products, &ascending)),
            vec![1, 3, 4, 2]
        );

        let descending = FilterState {
            sort_order: SortOrder::HighToLow,
            ..FilterState::default()
        };
        assert_eq!(
            ids(&derive_filtered_products(&products, &descending)),
            vec![2, 4, 1, 3]
        );
    }

    #[test]
    fn test_stages_compose() {
        let products = catalog();
        let filter = FilterState {
            debounced_search_term: "shirt".to_string(),
            selected_category: Some("clothing".to_string()),
            sort_order: SortOrder::HighToLow,
            ..FilterState::default()
        };
        assert_eq!(ids(&derive_filtered_products(&products, &filter)), vec![1, 3]);
    }

    #[test]
    fn test_category_label() {
        assert_eq!(category_label("clothing"), "Clothing");
        assert_eq!(category_label("men's clothing"), "Men's clothing");
        assert_eq!(category_label(""), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_category_means_all() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut view = CatalogView::new(Duration::from_millis(300), tx);
        view.set_selected_category(Some("  ".to_string()));
        assert!(view.filter_state().selected_category.is_none());
        assert!(!view.has_active_filters());
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_commits_after_quiet_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut view = CatalogView::new(Duration::from_millis(300), tx);

        view.set_search_term("r");
        view.set_search_term("re");
        view.set_search_term("red");
        assert_eq!(view.filter_state().search_term, "red");
        assert_eq!(view.filter_state().debounced_search_term, "");
        assert!(view.has_pending_search());

        let Some(StoreEvent::SearchSettled { generation, term }) = rx.recv().await else {
            panic!("expected a search commit");
        };
        assert!(view.commit_search(generation, term));
        assert_eq!(view.filter_state().debounced_search_term, "red");
        assert!(!view.has_pending_search());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_filters_resets_everything_at_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut view = CatalogView::new(Duration::from_millis(300), tx);

        view.set_search_term("shirt");
        let Some(StoreEvent::SearchSettled { generation, term }) = rx.recv().await else {
            panic!("expected a search commit");
        };
        view.commit_search(generation, term);
        view.set_selected_category(Some("clothing".to_string()));
        view.set_sort_order(SortOrder::LowToHigh);
        view.set_search_term("shirts");
        assert!(view.has_active_filters());

        view.clear_filters();
        assert!(!view.has_active_filters());
        assert!(!view.has_pending_search());
        assert_eq!(view.filter_state(), &FilterState::default());

        let products = catalog();
        assert_eq!(view.filtered(&products).len(), products.len());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }
}
