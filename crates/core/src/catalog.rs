//! Products and the read-only catalog.
//!
//! The catalog is a static JSON array of product records, loaded once and
//! never mutated. Field names are English; the Spanish names used by the
//! shop's original data file are accepted as aliases.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Errors that can occur when building a [`Catalog`].
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    /// The document is not a valid JSON array of products.
    #[error("invalid catalog document: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two products share the same ID.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
    /// A product has a blank name.
    #[error("product {0} has an empty name")]
    EmptyName(ProductId),
}

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(alias = "precio")]
    pub price: Price,
    #[serde(alias = "imagen")]
    pub image: String,
    #[serde(alias = "categoria")]
    pub category: String,
    #[serde(default, alias = "tallas")]
    pub sizes: Vec<String>,
    #[serde(default, alias = "destacado")]
    pub featured: bool,
}

/// The static product list, in catalog order.
///
/// ## Examples
///
/// ```
/// use vitrina_core::{Catalog, ProductId};
///
/// let catalog = Catalog::from_json(
///     r#"[{"id": 1, "nombre": "Vestido", "precio": 1200, "imagen": "a.jpg", "categoria": "Vestidos"}]"#,
/// )
/// .unwrap();
///
/// assert_eq!(catalog.len(), 1);
/// assert_eq!(catalog.find(ProductId::new(1)).unwrap().name, "Vestido");
/// assert!(catalog.find(ProductId::new(2)).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from products, validating identity and names.
    ///
    /// # Errors
    ///
    /// Returns an error if two products share an ID or a name is blank.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if product.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(product.id));
            }
        }
        Ok(Self { products })
    }

    /// Parse and validate a catalog from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, a price is negative, or
    /// validation fails.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(json)?)
    }

    /// Parse and validate a catalog from raw JSON bytes.
    ///
    /// # Errors
    ///
    /// Same as [`Catalog::from_json`].
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_slice(bytes)?)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// The first `limit` featured products, in catalog order.
    pub fn featured(&self, limit: usize) -> impl Iterator<Item = &Product> {
        self.products
            .iter()
            .filter(|product| product.featured)
            .take(limit)
    }

    /// Distinct categories in the order they first appear.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(&product.category);
            }
        }
        categories
    }

    /// Whether any product belongs to `category`.
    #[must_use]
    pub fn has_category(&self, category: &str) -> bool {
        self.products.iter().any(|product| product.category == category)
    }

    /// The highest price in the catalog, or zero when empty.
    #[must_use]
    pub fn max_price(&self) -> Price {
        self.products
            .iter()
            .map(|product| product.price)
            .max()
            .unwrap_or(Price::ZERO)
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    /// Build a product for tests.
    pub(crate) fn product(id: i32, name: &str, price: u32, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Price::from_whole(price),
            image: format!("/img/{id}.jpg"),
            category: category.to_string(),
            sizes: vec!["S".to_string(), "M".to_string()],
            featured: false,
        }
    }

    #[test]
    fn test_parses_spanish_field_names() {
        let json = r#"[
            {"id": 1, "nombre": "Vestido Floral", "precio": 1200, "imagen": "v.jpg",
             "categoria": "Vestidos", "tallas": ["S", "M"], "destacado": true}
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        let product = catalog.find(ProductId::new(1)).unwrap();
        assert_eq!(product.name, "Vestido Floral");
        assert_eq!(product.price, Price::from_whole(1200));
        assert_eq!(product.sizes, vec!["S", "M"]);
        assert!(product.featured);
    }

    #[test]
    fn test_sizes_and_featured_default() {
        let json = r#"[{"id": 3, "name": "Top", "price": 600, "image": "t.jpg", "category": "Blusas"}]"#;
        let catalog = Catalog::from_json(json).unwrap();
        let product = catalog.find(ProductId::new(3)).unwrap();
        assert!(product.sizes.is_empty());
        assert!(!product.featured);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = Catalog::new(vec![
            product(1, "A", 10, "X"),
            product(1, "B", 20, "Y"),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == ProductId::new(1)));
    }

    #[test]
    fn test_blank_name_rejected() {
        let result = Catalog::new(vec![product(4, "   ", 10, "X")]);
        assert!(matches!(result, Err(CatalogError::EmptyName(_))));
    }

    #[test]
    fn test_negative_price_rejected() {
        let json = r#"[{"id": 1, "name": "A", "price": -1, "image": "", "category": "X"}]"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_featured_limited_in_order() {
        let mut products: Vec<Product> = (1..=6)
            .map(|i| product(i, &format!("P{i}"), 100, "X"))
            .collect();
        for p in &mut products {
            p.featured = p.id.as_i32() != 2;
        }
        let catalog = Catalog::new(products).unwrap();
        let ids: Vec<i32> = catalog.featured(4).map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 3, 4, 5]);
    }

    #[test]
    fn test_categories_first_seen_order() {
        let catalog = Catalog::new(vec![
            product(1, "A", 10, "Vestidos"),
            product(2, "B", 10, "Blusas"),
            product(3, "C", 10, "Vestidos"),
            product(4, "D", 10, "Jeans"),
        ])
        .unwrap();
        assert_eq!(catalog.categories(), vec!["Vestidos", "Blusas", "Jeans"]);
        assert!(catalog.has_category("Jeans"));
        assert!(!catalog.has_category("jeans"));
    }

    #[test]
    fn test_max_price() {
        assert_eq!(Catalog::default().max_price(), Price::ZERO);
        let catalog = Catalog::new(vec![
            product(1, "A", 500, "X"),
            product(2, "B", 15_000, "X"),
            product(3, "C", 999, "X"),
        ])
        .unwrap();
        assert_eq!(catalog.max_price(), Price::from_whole(15_000));
    }
}
