//! Favorites commands.

use dariy_core::CurrencyCode;
use dariy_storefront::Storefront;

/// Print favorite products in catalog order.
pub fn list(shop: &Storefront) {
    let products = shop.favorite_products();

    #[allow(clippy::print_stdout)]
    {
        if products.is_empty() {
            println!("В избранном пока ничего нет");
            return;
        }
        for product in products {
            println!(
                "♥ {:<16} {:<32} {}",
                product.id.as_str(),
                product.title,
                product.price.display(CurrencyCode::default())
            );
        }
    }
}

/// Add or remove a product from favorites.
pub fn toggle(shop: &mut Storefront, id: &str) {
    if shop.catalog().get(id).is_none() {
        tracing::warn!(product_id = id, "Toggling favorite for a product not in the catalog");
    }
    let liked = shop.toggle_favorite(id);
    tracing::info!(product_id = id, liked, "Favorite toggled");
}
