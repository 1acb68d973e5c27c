//! Integration tests for the DARIY storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p dariy-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flows` - Cart actions, totals and persistence through files
//! - `favorites_flows` - Favorites toggling and listing
//! - `toast_flows` - Notifications raised by actions and their dismissal
//! - `checkout_flows` - Order message and contact links
//!
//! Every test builds its own [`Storefront`] over a temporary directory, so
//! tests never share state.

use std::path::Path;
use std::rc::Rc;

use dariy_storefront::Storefront;
use dariy_storefront::catalog::Catalog;
use dariy_storefront::config::StorefrontConfig;
use dariy_storefront::storage::FileStorage;

/// Catalog used across the integration tests.
///
/// Mirrors the shape of the bundled `data/products.json`.
pub const CATALOG_JSON: &str = r#"[
    {
        "id": "dress-01",
        "title": "Платье миди",
        "price": 500,
        "images": ["/images/dress-01.jpg"],
        "sizes": ["S", "M", "L"],
        "colors": ["red", "black"],
        "gender": "female",
        "category": "dresses"
    },
    {
        "id": "hoodie-01",
        "title": "Худи оверсайз",
        "price": 1200,
        "images": ["/images/hoodie-01a.jpg", "/images/hoodie-01b.jpg"],
        "gender": "unisex",
        "category": "hoodies"
    },
    {
        "id": "coat-01",
        "title": "Пальто",
        "price": 0,
        "sizes": ["M"],
        "gender": "female",
        "category": "outerwear"
    }
]"#;

/// Parse [`CATALOG_JSON`].
///
/// # Panics
///
/// Panics if the fixture is invalid.
#[must_use]
pub fn catalog() -> Catalog {
    Catalog::from_json(CATALOG_JSON).expect("fixture catalog is valid")
}

/// Configuration with defaults and storage under `dir`.
///
/// # Panics
///
/// Panics if the default configuration is invalid.
#[must_use]
pub fn config(dir: &Path) -> StorefrontConfig {
    let mut config = StorefrontConfig::from_lookup(|_| None).expect("defaults are valid");
    config.catalog_path = dir.join("products.json");
    config.storage_dir = dir.join("state");
    config
}

/// Open a storefront persisting to files under `dir`.
///
/// Opening twice over the same `dir` simulates a page reload.
#[must_use]
pub fn storefront(dir: &Path) -> Storefront {
    let config = config(dir);
    let storage = Rc::new(FileStorage::new(&config.storage_dir));
    Storefront::new(config, catalog(), storage)
}
