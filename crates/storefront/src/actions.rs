//! User actions dispatched by the presentation layer.
//!
//! The stores accept anything; the checks a product page makes before
//! adding to the cart (known product, fixed price, valid size) live here,
//! together with the toast each action shows.

use dariy_core::ProductId;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::catalog::Product;
use crate::checkout::{self, Channel, CheckoutError, OrderMessage};
use crate::state::Storefront;
use crate::store::{AddOptions, LineKey};
use crate::totals::{self, CartSummary};

/// Toast shown after a successful add to cart.
pub const TOAST_ADDED_TO_CART: &str = "Добавлено в корзину";
/// Toast shown after a line is removed.
pub const TOAST_REMOVED_FROM_CART: &str = "Товар удалён из корзины";
/// Toast shown after the cart is cleared.
pub const TOAST_CART_CLEARED: &str = "Корзина очищена";
/// Toast shown after a product is liked.
pub const TOAST_ADDED_TO_FAVORITES: &str = "Добавлено в избранное";
/// Toast shown after a product is unliked.
pub const TOAST_REMOVED_FROM_FAVORITES: &str = "Удалено из избранного";

/// Reasons a product cannot be added to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddToCartError {
    #[error("product {0} is not in the catalog")]
    UnknownProduct(ProductId),
    #[error("product {0} has no fixed price; contact the shop to order")]
    PriceOnRequest(ProductId),
    #[error("choose a size first")]
    SizeRequired,
    #[error("size {0} is not available")]
    UnknownSize(String),
    #[error("color {0} is not available")]
    UnknownColor(String),
    #[error("quantity must be at least 1")]
    ZeroQuantity,
}

/// What the customer picked on a product page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddToCart {
    pub size: Option<String>,
    pub color: Option<String>,
    pub qty: u32,
}

impl AddToCart {
    /// Check the selection against `product`.
    ///
    /// # Errors
    ///
    /// Returns the first rule the selection breaks.
    pub fn validate(&self, product: &Product) -> Result<(), AddToCartError> {
        if product.is_price_on_request() {
            return Err(AddToCartError::PriceOnRequest(product.id.clone()));
        }
        if self.qty == 0 {
            return Err(AddToCartError::ZeroQuantity);
        }
        match self.size.as_deref() {
            None if product.requires_size() => return Err(AddToCartError::SizeRequired),
            Some(size) if !product.offers_size(size) => {
                return Err(AddToCartError::UnknownSize(size.to_string()));
            }
            _ => {}
        }
        match self.color.as_deref() {
            Some(color) if !product.offers_color(color) => {
                Err(AddToCartError::UnknownColor(color.to_string()))
            }
            _ => Ok(()),
        }
    }
}

impl Storefront {
    /// Validate a product-page selection and add it to the cart.
    ///
    /// # Errors
    ///
    /// Returns `AddToCartError` if the product is unknown or the selection
    /// is invalid. The cart is left untouched in that case.
    #[instrument(skip(self, request), fields(qty = request.qty))]
    pub fn add_to_cart(&mut self, id: &str, request: AddToCart) -> Result<(), AddToCartError> {
        let product = self
            .catalog
            .get(id)
            .ok_or_else(|| AddToCartError::UnknownProduct(ProductId::new(id)))?;
        request.validate(product)?;

        let product_id = product.id.clone();
        self.cart.add(
            product_id,
            AddOptions {
                size: request.size,
                color: request.color,
                qty: request.qty,
            },
        );
        self.toast.show(TOAST_ADDED_TO_CART);
        Ok(())
    }

    /// The "+" button on a cart row.
    #[instrument(skip(self), fields(line = %key))]
    pub fn increment_line(&mut self, key: &LineKey) {
        if let Some(qty) = self.cart.line(key).map(|line| line.qty) {
            self.cart.set_quantity(key, qty.saturating_add(1));
        }
    }

    /// The "−" button on a cart row. At quantity 1 the line is removed.
    #[instrument(skip(self), fields(line = %key))]
    pub fn decrement_line(&mut self, key: &LineKey) {
        match self.cart.line(key).map(|line| line.qty) {
            Some(qty) if qty <= 1 => self.cart.remove(key),
            Some(qty) => self.cart.set_quantity(key, qty - 1),
            None => {}
        }
    }

    /// A quantity typed into a cart row. Zero removes the line.
    #[instrument(skip(self), fields(line = %key))]
    pub fn set_line_quantity(&mut self, key: &LineKey, qty: u32) {
        self.cart.set_quantity(key, qty);
    }

    /// The trash button on a cart row.
    #[instrument(skip(self), fields(line = %key))]
    pub fn remove_line(&mut self, key: &LineKey) {
        self.cart.remove(key);
        self.toast.show(TOAST_REMOVED_FROM_CART);
    }

    /// The "clear cart" button.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.toast.show(TOAST_CART_CLEARED);
    }

    /// The heart button. Returns `true` if the product is now a favorite.
    #[instrument(skip(self))]
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        let liked = self.favorites.toggle(id);
        self.toast.show(if liked {
            TOAST_ADDED_TO_FAVORITES
        } else {
            TOAST_REMOVED_FROM_FAVORITES
        });
        liked
    }

    /// Favorite products in catalog order. IDs no longer in the catalog
    /// are skipped.
    #[must_use]
    pub fn favorite_products(&self) -> Vec<&Product> {
        self.catalog
            .products()
            .iter()
            .filter(|p| self.favorites.has(p.id.as_str()))
            .collect()
    }

    /// Header badge text for the favorites icon.
    #[must_use]
    pub fn favorites_badge(&self) -> String {
        totals::badge(u64::try_from(self.favorites.count()).unwrap_or(u64::MAX))
    }

    /// Current cart totals.
    #[must_use]
    pub fn summary(&self) -> CartSummary<'_> {
        CartSummary::compute(self.cart.state(), &self.catalog)
    }

    /// Prepare the checkout hand-off for `channel`.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if nothing in the cart resolves
    /// against the catalog, or an error if the contact link is invalid.
    pub fn checkout(&self, channel: Channel) -> Result<(OrderMessage, Url), CheckoutError> {
        let message = OrderMessage::from_summary(&self.summary())?;
        let link = checkout::checkout_link(channel, &self.config.contact, &message)?;
        Ok((message, link))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::catalog::Catalog;
    use crate::config::StorefrontConfig;
    use crate::storage::MemoryStorage;

    fn storefront() -> Storefront {
        let catalog = Catalog::from_json(
            r#"[
                {"id": "dress", "title": "Платье", "price": 500, "sizes": ["S", "M"], "colors": ["red"]},
                {"id": "hoodie", "title": "Худи", "price": 1200},
                {"id": "coat", "title": "Пальто", "price": 0, "sizes": ["L"]}
            ]"#,
        )
        .unwrap();
        let config = StorefrontConfig::from_lookup(|_| None).unwrap();
        Storefront::new(config, catalog, Rc::new(MemoryStorage::new()))
    }

    fn pick(size: Option<&str>, qty: u32) -> AddToCart {
        AddToCart {
            size: size.map(str::to_string),
            color: None,
            qty,
        }
    }

    #[test]
    fn test_add_to_cart_shows_toast() {
        let mut shop = storefront();
        shop.add_to_cart("dress", pick(Some("M"), 2)).unwrap();

        assert_eq!(shop.cart().total_items(), 2);
        assert_eq!(shop.toast().message(), Some(TOAST_ADDED_TO_CART));
    }

    #[test]
    fn test_add_to_cart_validation() {
        let mut shop = storefront();
        assert_eq!(
            shop.add_to_cart("nope", pick(None, 1)),
            Err(AddToCartError::UnknownProduct(ProductId::new("nope")))
        );
        assert_eq!(
            shop.add_to_cart("coat", pick(Some("L"), 1)),
            Err(AddToCartError::PriceOnRequest(ProductId::new("coat")))
        );
        assert_eq!(
            shop.add_to_cart("dress", pick(None, 1)),
            Err(AddToCartError::SizeRequired)
        );
        assert_eq!(
            shop.add_to_cart("dress", pick(Some("XXL"), 1)),
            Err(AddToCartError::UnknownSize("XXL".to_string()))
        );
        assert_eq!(
            shop.add_to_cart("dress", pick(Some("S"), 0)),
            Err(AddToCartError::ZeroQuantity)
        );
        assert_eq!(
            shop.add_to_cart(
                "hoodie",
                AddToCart {
                    color: Some("green".to_string()),
                    qty: 1,
                    ..AddToCart::default()
                }
            ),
            Err(AddToCartError::UnknownColor("green".to_string()))
        );

        assert!(shop.cart().is_empty());
        assert_eq!(shop.toast().message(), None);
    }

    #[test]
    fn test_decrement_to_zero_removes() {
        let mut shop = storefront();
        shop.add_to_cart("hoodie", pick(None, 2)).unwrap();
        let key = LineKey::new("hoodie", None, None);

        shop.decrement_line(&key);
        assert_eq!(shop.cart().line(&key).unwrap().qty, 1);
        shop.decrement_line(&key);
        assert!(shop.cart().is_empty());
        shop.decrement_line(&key);
        assert!(shop.cart().is_empty());
    }

    #[test]
    fn test_increment_missing_line_does_not_create() {
        let mut shop = storefront();
        shop.increment_line(&LineKey::new("hoodie", None, None));
        assert!(shop.cart().is_empty());

        shop.add_to_cart("hoodie", pick(None, 1)).unwrap();
        shop.increment_line(&LineKey::new("hoodie", None, None));
        assert_eq!(shop.cart().total_items(), 2);
    }

    #[test]
    fn test_remove_and_clear_toasts() {
        let mut shop = storefront();
        shop.add_to_cart("dress", pick(Some("S"), 1)).unwrap();
        shop.add_to_cart("hoodie", pick(None, 1)).unwrap();

        shop.remove_line(&LineKey::new("dress", Some("S"), None));
        assert_eq!(shop.toast().message(), Some(TOAST_REMOVED_FROM_CART));
        assert_eq!(shop.cart().total_items(), 1);

        shop.clear_cart();
        assert_eq!(shop.toast().message(), Some(TOAST_CART_CLEARED));
        assert!(shop.cart().is_empty());
    }

    #[test]
    fn test_toggle_favorite_toasts() {
        let mut shop = storefront();
        assert!(shop.toggle_favorite("hoodie"));
        assert_eq!(shop.toast().message(), Some(TOAST_ADDED_TO_FAVORITES));
        assert!(!shop.toggle_favorite("hoodie"));
        assert_eq!(shop.toast().message(), Some(TOAST_REMOVED_FROM_FAVORITES));
    }

    #[test]
    fn test_favorite_products_in_catalog_order() {
        let mut shop = storefront();
        shop.toggle_favorite("hoodie");
        shop.toggle_favorite("gone");
        shop.toggle_favorite("dress");

        let titles: Vec<&str> = shop
            .favorite_products()
            .iter()
            .map(|p| p.title.as_str())
            .collect();
        assert_eq!(titles, ["Платье", "Худи"]);
        assert_eq!(shop.favorites().count(), 3);
    }

    #[test]
    fn test_favorites_badge() {
        let mut shop = storefront();
        assert_eq!(shop.favorites_badge(), "");
        shop.toggle_favorite("dress");
        assert_eq!(shop.favorites_badge(), "1");
        for n in 0..100 {
            shop.toggle_favorite(&format!("gone-{n}"));
        }
        assert_eq!(shop.favorites_badge(), "99+");
    }

    #[test]
    fn test_checkout() {
        let mut shop = storefront();
        assert!(matches!(
            shop.checkout(Channel::WhatsApp),
            Err(CheckoutError::EmptyCart)
        ));

        shop.add_to_cart("hoodie", pick(None, 1)).unwrap();
        let (message, link) = shop.checkout(Channel::WhatsApp).unwrap();
        assert!(message.as_str().contains("Худи"));
        assert_eq!(link.host_str(), Some("wa.me"));
    }
}
