//! Storefront context shared by the presentation layer.

use std::rc::Rc;

use crate::catalog::{Catalog, Product};
use crate::config::StorefrontConfig;
use crate::error::{Result, StorefrontError};
use crate::storage::{FileStorage, Storage};
use crate::store::{CartStore, FavoritesStore, ToastDisplay, ToastStore};

/// Owns the catalog and one instance of each store.
///
/// Front-ends build one `Storefront` and pass it around explicitly; tests
/// build as many isolated ones as they like.
#[derive(Debug)]
pub struct Storefront {
    pub(crate) config: StorefrontConfig,
    pub(crate) catalog: Catalog,
    pub(crate) cart: CartStore,
    pub(crate) favorites: FavoritesStore,
    pub(crate) toast: ToastStore,
}

impl Storefront {
    /// Assemble a storefront over an already loaded catalog.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Product catalog
    /// * `storage` - Backend for the cart and favorites slots
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog, storage: Rc<dyn Storage>) -> Self {
        let cart = CartStore::open(Rc::clone(&storage));
        let favorites = FavoritesStore::open(storage);
        Self {
            config,
            catalog,
            cart,
            favorites,
            toast: ToastStore::new(),
        }
    }

    /// Load the catalog and open file-backed stores as configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub async fn open(config: StorefrontConfig) -> Result<Self> {
        let catalog = Catalog::load(&config.catalog_path).await?;
        let storage: Rc<dyn Storage> = Rc::new(FileStorage::new(&config.storage_dir));
        tracing::info!(storage_dir = %config.storage_dir.display(), "Storefront opened");
        Ok(Self::new(config, catalog, storage))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Look up a product for its detail page.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::NotFound` if the ID is not in the catalog.
    pub fn product(&self, id: &str) -> Result<&Product> {
        self.catalog
            .get(id)
            .ok_or_else(|| StorefrontError::NotFound(format!("product {id}")))
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Get a reference to the favorites store.
    #[must_use]
    pub const fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    /// Get a reference to the toast store.
    #[must_use]
    pub const fn toast(&self) -> &ToastStore {
        &self.toast
    }

    /// Get a mutable reference to the toast store, for the display layer.
    pub const fn toast_mut(&mut self) -> &mut ToastStore {
        &mut self.toast
    }

    /// A toast display controller using the configured timings.
    #[must_use]
    pub fn toast_display(&self) -> ToastDisplay {
        ToastDisplay::new(self.config.toast)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn storefront(storage: Rc<dyn Storage>) -> Storefront {
        let catalog =
            Catalog::from_json(r#"[{"id": "p1", "title": "Платье", "price": 500}]"#).unwrap();
        let config = StorefrontConfig::from_lookup(|_| None).unwrap();
        Storefront::new(config, catalog, storage)
    }

    #[test]
    fn test_product_lookup() {
        let shop = storefront(Rc::new(MemoryStorage::new()));
        assert_eq!(shop.product("p1").unwrap().title, "Платье");
        assert!(matches!(
            shop.product("p2"),
            Err(StorefrontError::NotFound(_))
        ));
    }

    #[test]
    fn test_stores_share_storage() {
        let storage: Rc<dyn Storage> = Rc::new(MemoryStorage::new());
        {
            let mut shop = storefront(Rc::clone(&storage));
            shop.toggle_favorite("p1");
            shop.set_line_quantity(&crate::store::LineKey::new("p1", None, None), 3);
        }

        let shop = storefront(storage);
        assert!(shop.favorites().has("p1"));
        // set_quantity never creates lines
        assert!(shop.cart().is_empty());
        assert_eq!(shop.toast().message(), None);
    }
}
