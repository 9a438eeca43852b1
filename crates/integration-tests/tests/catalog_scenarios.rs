//! Catalog scenarios: startup fetch, debounced search, category and sort.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use mini_shop_core::{Product, SortOrder};
use mini_shop_integration_tests::{SEARCH_DEBOUNCE, loaded_controller, sample_catalog};
use mini_shop_storefront::{CatalogStatus, Controller, MemoryStorage, StaticProductSource};

fn titles(products: &[&Product]) -> Vec<String> {
    products.iter().map(|p| p.title().to_string()).collect()
}

#[tokio::test(start_paused = true)]
async fn test_catalog_is_empty_until_fetch_completes() {
    let mut controller = Controller::new(MemoryStorage::new(), SEARCH_DEBOUNCE);
    controller.start(
        StaticProductSource::products(sample_catalog()).with_delay(Duration::from_millis(800)),
    );

    assert!(controller.filtered_products().is_empty());
    assert!(controller.categories().is_empty());
    assert_eq!(controller.catalog_status(), &CatalogStatus::Loading);

    controller.settle().await;
    assert_eq!(controller.catalog_status(), &CatalogStatus::Loaded(5));
    assert_eq!(controller.filtered_products().len(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_failed_fetch_is_not_fatal() {
    let mut controller = Controller::new(MemoryStorage::new(), SEARCH_DEBOUNCE);
    controller.start(StaticProductSource::failing("timeout"));
    controller.settle().await;

    assert!(matches!(controller.catalog_status(), CatalogStatus::Failed(reason) if reason.contains("timeout")));
    assert!(controller.filtered_products().is_empty());

    controller.set_search_term("shirt");
    controller.settle().await;
    assert!(controller.filtered_products().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_typing_burst_filters_once_after_pause() {
    let mut controller = loaded_controller(MemoryStorage::new(), sample_catalog()).await;

    for term in ["s", "sh", "shi", "shir", "shirt"] {
        controller.set_search_term(term);
        tokio::time::advance(Duration::from_millis(50)).await;
        assert_eq!(controller.drain_ready(), 0);
    }
    assert_eq!(controller.filter_state().search_term, "shirt");
    assert_eq!(controller.filtered_products().len(), 5);

    tokio::time::advance(SEARCH_DEBOUNCE).await;
    assert_eq!(controller.settle().await + controller.drain_ready(), 1);
    assert_eq!(
        titles(&controller.filtered_products()),
        vec!["Red Shirt", "Blue Shirt"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_search_is_case_insensitive() {
    let mut controller = loaded_controller(MemoryStorage::new(), sample_catalog()).await;
    controller.set_search_term("RED");
    controller.settle().await;
    assert_eq!(
        titles(&controller.filtered_products()),
        vec!["Red Shirt", "Red Mug"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_category_and_sort_apply_immediately() {
    let mut controller = loaded_controller(MemoryStorage::new(), sample_catalog()).await;

    controller.set_selected_category(Some("home".to_string()));
    assert_eq!(
        titles(&controller.filtered_products()),
        vec!["Desk Lamp", "Red Mug"]
    );

    controller.set_sort_order(SortOrder::LowToHigh);
    assert_eq!(
        titles(&controller.filtered_products()),
        vec!["Red Mug", "Desk Lamp"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_sort_orders_over_whole_catalog() {
    let mut controller = loaded_controller(MemoryStorage::new(), sample_catalog()).await;

    controller.set_sort_order("high-low".parse().unwrap());
    let prices: Vec<_> = controller
        .filtered_products()
        .iter()
        .map(|p| p.price())
        .collect();
    assert!(prices.windows(2).all(|w| w[0] >= w[1]));

    controller.set_sort_order(SortOrder::LowToHigh);
    let prices: Vec<_> = controller
        .filtered_products()
        .iter()
        .map(|p| p.price())
        .collect();
    assert!(prices.windows(2).all(|w| w[0] <= w[1]));

    controller.set_sort_order(SortOrder::Unsorted);
    assert_eq!(
        titles(&controller.filtered_products()),
        vec!["Red Shirt", "Phone", "Blue Shirt", "Desk Lamp", "Red Mug"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_categories_are_sorted_and_unique() {
    let controller = loaded_controller(MemoryStorage::new(), sample_catalog()).await;
    assert_eq!(controller.categories(), vec!["clothing", "electronics", "home"]);
}

#[tokio::test(start_paused = true)]
async fn test_clear_filters_restores_full_list() {
    let mut controller = loaded_controller(MemoryStorage::new(), sample_catalog()).await;

    controller.set_search_term("lamp");
    controller.settle().await;
    controller.set_selected_category(Some("home".to_string()));
    controller.set_sort_order(SortOrder::HighToLow);
    controller.set_search_term("lamps");
    assert!(controller.has_active_filters());

    controller.clear_filters();
    assert!(!controller.has_active_filters());
    assert!(!controller.has_pending_work());
    assert_eq!(controller.filtered_products().len(), 5);

    // A timer cancelled by the clear never lands.
    tokio::time::advance(Duration::from_secs(1)).await;
    assert_eq!(controller.drain_ready(), 0);
    assert_eq!(controller.filter_state().debounced_search_term, "");
}

#[tokio::test(start_paused = true)]
async fn test_clearing_search_term_shows_everything_after_debounce() {
    let mut controller = loaded_controller(MemoryStorage::new(), sample_catalog()).await;
    controller.set_search_term("phone");
    controller.settle().await;
    assert_eq!(controller.filtered_products().len(), 1);

    controller.set_search_term("");
    assert_eq!(controller.filtered_products().len(), 1);
    controller.settle().await;
    assert_eq!(controller.filtered_products().len(), 5);
}
