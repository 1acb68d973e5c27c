//! Checkout command.
//!
//! Prints the order text and a link that opens the chosen channel with the
//! order pre-filled. Nothing is sent and the cart is left as is.

use dariy_storefront::Storefront;
use dariy_storefront::checkout::Channel;

/// Print the order and the link for `channel`.
///
/// # Errors
///
/// Returns an error if the channel is unknown or the cart is empty.
pub fn run(shop: &Storefront, channel: &str) -> Result<(), Box<dyn std::error::Error>> {
    let channel: Channel = channel.parse()?;
    let (message, link) = shop.checkout(channel)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{message}");
        println!();
        println!("{link}");
    }
    Ok(())
}
