//! Unified error handling.
//!
//! Each concern has its own error enum next to the code that produces it;
//! `StorefrontError` gathers them for callers such as the CLI that just want
//! to report a failure.

use thiserror::Error;

use crate::actions::AddToCartError;
use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The product catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A storage slot could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// An add-to-cart request was rejected.
    #[error("Cannot add to cart: {0}")]
    AddToCart(#[from] AddToCartError),

    /// The checkout hand-off could not be prepared.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storefront_error_display() {
        let err = StorefrontError::NotFound("product p-404".to_string());
        assert_eq!(err.to_string(), "Not found: product p-404");

        let err = StorefrontError::from(CheckoutError::EmptyCart);
        assert_eq!(err.to_string(), "Checkout error: cart is empty");
    }
}
