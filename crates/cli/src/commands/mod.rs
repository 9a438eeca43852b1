//! CLI command implementations.

pub mod cart;
pub mod catalog;

use mini_shop_storefront::{
    CatalogStatus, Controller, FileStorage, HttpProductSource, StorefrontConfig,
};

/// Restore the cart, fetch the catalog and wait for it to arrive.
pub async fn start(config: &StorefrontConfig) -> mini_shop_storefront::Result<Controller<FileStorage>> {
    let storage = FileStorage::new(config.data_dir.clone());
    let mut controller = Controller::new(storage, config.search_debounce);

    controller.start(HttpProductSource::new(&config.catalog)?);
    controller.settle().await;

    if let CatalogStatus::Failed(reason) = controller.catalog_status() {
        tracing::warn!(reason = %reason, "Catalog unavailable, showing an empty catalog");
    }
    Ok(controller)
}
