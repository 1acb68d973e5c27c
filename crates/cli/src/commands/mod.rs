//! Subcommand implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod favorites;

use dariy_storefront::Storefront;
use dariy_storefront::store::LineKey;
use thiserror::Error;

use crate::LineArgs;

/// Errors raised by the CLI itself rather than the storefront.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The cart has no line with this product and variant.
    #[error("Not in cart: {0}")]
    NotInCart(LineKey),
}

/// Cart line key from command-line arguments.
pub fn line_key(line: &LineArgs) -> LineKey {
    LineKey::new(line.id.as_str(), line.size.as_deref(), line.color.as_deref())
}

/// Print the toast raised by the last action, then dismiss it.
pub fn print_toast(shop: &mut Storefront) {
    let Some(message) = shop.toast().message().map(str::to_string) else {
        return;
    };

    #[allow(clippy::print_stdout)]
    {
        println!();
        println!("» {message}");
    }
    shop.toast_mut().clear();
}
