//! Catalog listing commands.

#![allow(clippy::print_stdout)]

use mini_shop_core::SortOrder;
use mini_shop_storefront::{CartStorage, Controller, category_label};

/// Print the filtered product list.
pub async fn products<S: CartStorage>(
    controller: &mut Controller<S>,
    search: Option<String>,
    category: Option<String>,
    sort: Option<String>,
) -> mini_shop_storefront::Result<()> {
    if let Some(sort) = sort {
        controller.set_sort_order(sort.parse::<SortOrder>()?);
    }
    controller.set_selected_category(category);
    if let Some(term) = search {
        controller.set_search_term(term);
        controller.settle().await;
    }

    let products = controller.filtered_products();
    if products.is_empty() {
        if controller.has_active_filters() {
            println!("No products match your filters.");
        } else {
            println!("No products available.");
        }
        return Ok(());
    }

    for product in &products {
        let availability = if product.is_out_of_stock() {
            "Out of stock".to_string()
        } else {
            format!("{} in stock", product.stock())
        };
        let in_cart = controller.quantity_in_cart(product.id());

        print!(
            "{:>5}  {:<40}  {:>12}  {:<20}  {}",
            product.id(),
            product.title(),
            product.price().to_string(),
            category_label(product.category()),
            availability,
        );
        if in_cart > 0 {
            print!("  ({in_cart} in cart)");
        }
        println!();
    }

    println!();
    println!(
        "{} of {} products",
        products.len(),
        controller.products().len()
    );
    Ok(())
}

/// Print the catalog's categories.
pub fn categories<S: CartStorage>(controller: &Controller<S>) {
    let categories = controller.categories();
    if categories.is_empty() {
        println!("No categories available.");
        return;
    }
    for category in categories {
        println!("{:<24}  {}", category, category_label(category));
    }
}
