//! Cart commands.
//!
//! Changes are persisted by the cart store itself; these only report.

#![allow(clippy::print_stdout)]

use mini_shop_core::ProductId;
use mini_shop_storefront::{AppError, CartStorage, Controller};

/// Print cart lines and totals.
pub fn show<S: CartStorage>(controller: &Controller<S>) {
    let items = controller.cart_items();
    if items.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for item in items {
        let product = &item.product;
        println!(
            "{:>5}  {:<40}  {:>12} x {:<3} {:>12}",
            product.id(),
            product.title(),
            product.price().to_string(),
            item.quantity,
            item.line_total().to_string(),
        );
    }

    let totals = controller.cart_totals();
    println!();
    println!("Items: {}", totals.total_items);
    println!("Total: {}", totals.total_price);
}

/// Add one unit of a catalog product.
pub fn add<S: CartStorage>(
    controller: &mut Controller<S>,
    id: ProductId,
) -> mini_shop_storefront::Result<()> {
    let product = controller
        .products()
        .iter()
        .find(|p| p.id() == id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    if product.is_out_of_stock() {
        println!("{} is out of stock.", product.title());
        return Ok(());
    }
    let title = product.title().to_string();

    if controller.add_to_cart(id) {
        println!("Added {title} ({} in cart).", controller.quantity_in_cart(id));
    } else {
        println!(
            "{title} is already at the stock limit ({} in cart).",
            controller.quantity_in_cart(id)
        );
    }
    show(controller);
    Ok(())
}

/// Remove a product's line.
pub fn remove<S: CartStorage>(
    controller: &mut Controller<S>,
    id: ProductId,
) -> mini_shop_storefront::Result<()> {
    if !controller.remove_from_cart(id) {
        return Err(AppError::NotFound(format!("product {id} in cart")));
    }
    println!("Removed product {id}.");
    show(controller);
    Ok(())
}

/// Set a line's quantity, clamped against the live stock.
pub fn update<S: CartStorage>(
    controller: &mut Controller<S>,
    id: ProductId,
    quantity: i64,
) -> mini_shop_storefront::Result<()> {
    if controller.cart().get(id).is_none() {
        return Err(AppError::NotFound(format!("product {id} in cart")));
    }

    if controller.update_quantity(id, quantity) {
        println!(
            "Product {id} now at {} in cart.",
            controller.quantity_in_cart(id)
        );
    } else {
        println!(
            "Product {id} unchanged ({} in cart).",
            controller.quantity_in_cart(id)
        );
    }
    show(controller);
    Ok(())
}
