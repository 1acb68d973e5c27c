//! Static product catalog.
//!
//! The catalog is an ordered list of products bundled with the site. It is
//! loaded once at start-up and never mutated; the stores only hold product
//! IDs and join against the catalog when they need prices or titles.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use dariy_core::{Price, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),
    #[error("unknown collection: {0}")]
    UnknownCollection(String),
}

/// Who a product is made for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Female,
    Male,
    Unisex,
    /// A tag this build does not know about, kept verbatim.
    Other(String),
}

impl Gender {
    /// Tag as written in the catalog data.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
            Self::Unisex => "unisex",
            Self::Other(tag) => tag,
        }
    }

    /// Audience phrase for product details ("для женщин").
    #[must_use]
    pub const fn audience(&self) -> &'static str {
        match self {
            Self::Female => "для женщин",
            Self::Male => "для мужчин",
            Self::Unisex | Self::Other(_) => "для всех",
        }
    }
}

impl From<String> for Gender {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "female" => Self::Female,
            "male" => Self::Male,
            "unisex" => Self::Unisex,
            _ => Self::Other(tag),
        }
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Whole-unit price; zero means "price on request".
    pub price: Price,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Product {
    /// Returns `true` when the product has no fixed price and cannot be
    /// added to the cart.
    #[must_use]
    pub const fn is_price_on_request(&self) -> bool {
        self.price.is_on_request()
    }

    /// Returns `true` when a size must be picked before adding to the cart.
    #[must_use]
    pub fn requires_size(&self) -> bool {
        !self.sizes.is_empty()
    }

    /// Returns `true` if `size` is one of the product's sizes.
    #[must_use]
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// Returns `true` if `color` is one of the product's colors.
    #[must_use]
    pub fn offers_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// Images for the product card carousel.
    ///
    /// A single image is repeated three times so the carousel still has
    /// something to page through.
    #[must_use]
    pub fn card_images(&self) -> Vec<&str> {
        match self.images.as_slice() {
            [] => Vec::new(),
            [only] => vec![only.as_str(); 3],
            many => many.iter().map(String::as_str).collect(),
        }
    }
}

/// Curated product collections linked from the catalog header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Men,
    Women,
    Kids,
}

impl Collection {
    /// All collections in display order.
    pub const ALL: [Self; 3] = [Self::Men, Self::Women, Self::Kids];

    /// URL slug.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Men => "men",
            Self::Women => "women",
            Self::Kids => "kids",
        }
    }

    /// Display title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Men => "Мужское",
            Self::Women => "Женское",
            Self::Kids => "Детское",
        }
    }

    /// Returns `true` if the product belongs to this collection.
    ///
    /// The shop has no dedicated men's or kids' lines yet, so those
    /// collections show the unisex range.
    #[must_use]
    pub fn contains(&self, product: &Product) -> bool {
        match (self, &product.gender) {
            (Self::Women, Some(Gender::Female)) | (_, Some(Gender::Unisex)) => true,
            _ => false,
        }
    }
}

impl FromStr for Collection {
    type Err = CatalogError;

    fn from_str(slug: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.slug() == slug)
            .ok_or_else(|| CatalogError::UnknownCollection(slug.to_string()))
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// The bundled, read-only product catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from an ordered product list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two products share an ID.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if index.insert(product.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products, index })
    }

    /// Parse a catalog from its JSON array form.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or IDs repeat.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::from_products(products)
    }

    /// Load the catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = tokio::fs::read_to_string(path).await?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            products = catalog.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.index
            .get(id)
            .and_then(|&position| self.products.get(position))
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns `true` if the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products of a collection, in catalog order.
    pub fn collection(&self, collection: Collection) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(move |p| collection.contains(p))
    }

    /// Every size offered by any product, sorted.
    #[must_use]
    pub fn all_sizes(&self) -> Vec<&str> {
        self.facet(|p| p.sizes.iter().map(String::as_str).collect())
    }

    /// Every color offered by any product, sorted.
    #[must_use]
    pub fn all_colors(&self) -> Vec<&str> {
        self.facet(|p| p.colors.iter().map(String::as_str).collect())
    }

    /// Every gender tag in the catalog, sorted.
    #[must_use]
    pub fn all_genders(&self) -> Vec<&str> {
        self.facet(|p| p.gender.iter().map(Gender::as_str).collect())
    }

    /// Every category in the catalog, sorted.
    #[must_use]
    pub fn all_categories(&self) -> Vec<&str> {
        self.facet(|p| p.category.iter().map(String::as_str).collect())
    }

    fn facet<'a>(&'a self, values: impl Fn(&'a Product) -> Vec<&'a str>) -> Vec<&'a str> {
        self.products
            .iter()
            .flat_map(values)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    const CATALOG_JSON: &str = r#"[
        {"id": "p1", "title": "Платье", "price": 500, "images": ["/img/p1.jpg"],
         "sizes": ["S", "M"], "colors": ["red"], "gender": "female", "category": "Платья"},
        {"id": "p2", "title": "Худи", "price": 1200, "sizes": ["L", "M"],
         "colors": ["black", "red"], "gender": "unisex", "category": "Худи"},
        {"id": "p3", "title": "Шарф", "price": 0, "gender": "kids"}
    ]"#;

    #[test]
    fn test_from_json_preserves_order_and_indexes() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        assert_eq!(catalog.len(), 3);
        let ids: Vec<&str> = catalog.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p1", "p2", "p3"]);
        assert_eq!(catalog.get("p2").unwrap().title, "Худи");
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn test_optional_fields_default() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        let scarf = catalog.get("p3").unwrap();
        assert!(scarf.images.is_empty());
        assert!(!scarf.requires_size());
        assert!(scarf.is_price_on_request());
        assert_eq!(scarf.gender, Some(Gender::Other("kids".to_string())));
        assert!(scarf.category.is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"[{"id": "a", "title": "A", "price": 1}, {"id": "a", "title": "B", "price": 2}]"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id.as_str() == "a"));
    }

    #[test]
    fn test_facets_are_sorted_and_deduplicated() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        assert_eq!(catalog.all_sizes(), ["L", "M", "S"]);
        assert_eq!(catalog.all_colors(), ["black", "red"]);
        assert_eq!(catalog.all_genders(), ["female", "kids", "unisex"]);
        assert_eq!(catalog.all_categories(), ["Платья", "Худи"]);
    }

    #[test]
    fn test_collections() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        let ids = |c: Collection| -> Vec<String> {
            catalog.collection(c).map(|p| p.id.to_string()).collect()
        };
        assert_eq!(ids(Collection::Women), ["p1", "p2"]);
        assert_eq!(ids(Collection::Men), ["p2"]);
        assert_eq!(ids(Collection::Kids), ["p2"]);
    }

    #[test]
    fn test_collection_slugs() {
        assert_eq!("women".parse::<Collection>().unwrap(), Collection::Women);
        assert!(matches!(
            "sale".parse::<Collection>(),
            Err(CatalogError::UnknownCollection(slug)) if slug == "sale"
        ));
        assert_eq!(Collection::Kids.to_string(), "Детское");
    }

    #[test]
    fn test_card_images() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        assert_eq!(catalog.get("p1").unwrap().card_images(), ["/img/p1.jpg"; 3]);
        assert!(catalog.get("p3").unwrap().card_images().is_empty());
    }

    #[test]
    fn test_gender_round_trips_unknown_tags() {
        let json = serde_json::to_string(&Gender::Other("kids".to_string())).unwrap();
        assert_eq!(json, "\"kids\"");
        assert_eq!(serde_json::to_string(&Gender::Unisex).unwrap(), "\"unisex\"");
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, CATALOG_JSON).unwrap();

        let catalog = Catalog::load(&path).await.unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load(&dir.path().join("nope.json")).await.unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
