//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! dariy catalog list
//! dariy catalog list --collection kids
//! dariy catalog show dress-01
//! dariy catalog facets
//! ```

use dariy_core::CurrencyCode;
use dariy_storefront::catalog::{Collection, Product};
use dariy_storefront::{Storefront, StorefrontError};

/// List products, or one collection's products.
///
/// # Errors
///
/// Returns an error if the collection slug is unknown.
pub fn list(shop: &Storefront, collection: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let products: Vec<&Product> = match collection {
        Some(slug) => {
            let collection: Collection = slug.parse()?;
            #[allow(clippy::print_stdout)]
            {
                println!("{collection}");
            }
            shop.catalog().collection(collection).collect()
        }
        None => shop.catalog().products().iter().collect(),
    };

    #[allow(clippy::print_stdout)]
    {
        for product in &products {
            let liked = if shop.favorites().has(product.id.as_str()) {
                "♥"
            } else {
                " "
            };
            println!(
                "{liked} {:<16} {:<32} {}",
                product.id.as_str(),
                product.title,
                price_label(product)
            );
        }
    }
    tracing::debug!(count = products.len(), "Listed products");
    Ok(())
}

/// Show one product with its options.
///
/// # Errors
///
/// Returns an error if the product is not in the catalog.
pub fn show(shop: &Storefront, id: &str) -> Result<(), StorefrontError> {
    let product = shop.product(id)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", product.title);
        println!("  id:       {}", product.id);
        println!("  price:    {}", price_label(product));
        if let Some(gender) = &product.gender {
            println!("  for:      {}", gender.audience());
        }
        if let Some(category) = &product.category {
            println!("  category: {category}");
        }
        if !product.sizes.is_empty() {
            println!("  sizes:    {}", product.sizes.join(", "));
        }
        if !product.colors.is_empty() {
            println!("  colors:   {}", product.colors.join(", "));
        }
        for image in product.card_images() {
            println!("  image:    {image}");
        }
        if shop.favorites().has(id) {
            println!("  ♥ in favorites");
        }
    }
    Ok(())
}

/// List the filter values present in the catalog.
pub fn facets(shop: &Storefront) {
    let catalog = shop.catalog();

    #[allow(clippy::print_stdout)]
    {
        println!("sizes:      {}", catalog.all_sizes().join(", "));
        println!("colors:     {}", catalog.all_colors().join(", "));
        println!("genders:    {}", catalog.all_genders().join(", "));
        println!("categories: {}", catalog.all_categories().join(", "));
    }
}

fn price_label(product: &Product) -> String {
    if product.is_price_on_request() {
        "по запросу".to_string()
    } else {
        product.price.display(CurrencyCode::default())
    }
}
