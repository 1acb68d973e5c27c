//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! dariy cart add dress-01 --size M --qty 2
//! dariy cart inc dress-01 --size M
//! dariy cart dec dress-01 --size M
//! dariy cart remove dress-01 --size M
//! dariy cart clear
//! dariy cart show
//! ```

use dariy_core::CurrencyCode;
use dariy_storefront::Storefront;
use dariy_storefront::actions::{AddToCart, AddToCartError};
use dariy_storefront::store::LineKey;

use super::CommandError;

/// Print the cart lines and totals.
pub fn show(shop: &Storefront) {
    let summary = shop.summary();
    let currency = CurrencyCode::default();

    #[allow(clippy::print_stdout)]
    {
        if summary.is_empty() {
            println!("Корзина пуста");
            return;
        }
        for line in &summary.lines {
            let caption = line
                .variant_caption()
                .map(|c| format!(" ({c})"))
                .unwrap_or_default();
            println!(
                "{}{caption} × {}  {}",
                line.product.title,
                line.qty,
                line.line_total.display(currency)
            );
            println!("    key: {}", line.key);
        }
        println!();
        println!("{}", summary.heading());
    }
}

/// Add a product to the cart.
///
/// # Errors
///
/// Returns an error if the product or the selected variant is invalid.
pub fn add(
    shop: &mut Storefront,
    id: &str,
    size: Option<String>,
    color: Option<String>,
    qty: u32,
) -> Result<(), AddToCartError> {
    shop.add_to_cart(id, AddToCart { size, color, qty })?;
    tracing::info!(product_id = id, qty, "Added to cart");
    badge(shop);
    Ok(())
}

/// Increase a line's quantity by one.
///
/// # Errors
///
/// Returns an error if the line is not in the cart.
pub fn increment(shop: &mut Storefront, key: &LineKey) -> Result<(), CommandError> {
    ensure_in_cart(shop, key)?;
    shop.increment_line(key);
    badge(shop);
    Ok(())
}

/// Decrease a line's quantity by one.
///
/// # Errors
///
/// Returns an error if the line is not in the cart.
pub fn decrement(shop: &mut Storefront, key: &LineKey) -> Result<(), CommandError> {
    ensure_in_cart(shop, key)?;
    shop.decrement_line(key);
    badge(shop);
    Ok(())
}

/// Remove a line.
///
/// # Errors
///
/// Returns an error if the line is not in the cart.
pub fn remove(shop: &mut Storefront, key: &LineKey) -> Result<(), CommandError> {
    ensure_in_cart(shop, key)?;
    shop.remove_line(key);
    badge(shop);
    Ok(())
}

/// Remove every line.
pub fn clear(shop: &mut Storefront) {
    shop.clear_cart();
    badge(shop);
}

fn ensure_in_cart(shop: &Storefront, key: &LineKey) -> Result<(), CommandError> {
    if shop.cart().line(key).is_none() {
        return Err(CommandError::NotInCart(key.clone()));
    }
    Ok(())
}

fn badge(shop: &Storefront) {
    let badge = shop.summary().badge();

    #[allow(clippy::print_stdout)]
    {
        if badge.is_empty() {
            println!("Корзина пуста");
        } else {
            println!("В корзине: {badge}");
        }
    }
}
