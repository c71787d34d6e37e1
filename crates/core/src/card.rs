//! Product card view-model.

use serde::Serialize;

use crate::catalog::Product;
use crate::types::ProductId;

/// Display-ready fields for one product card.
///
/// Pure data: the storefront's `partials/product_card.html` turns this into
/// markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub category: String,
    /// Formatted price, e.g. `RD$ 1,200`.
    pub price: String,
    /// Comma-joined size list, e.g. `S, M, L`.
    pub sizes: String,
    pub featured: bool,
}

impl ProductCard {
    /// Whether the card has a size list to show.
    #[must_use]
    pub fn has_sizes(&self) -> bool {
        !self.sizes.is_empty()
    }
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            image: product.image.clone(),
            category: product.category.clone(),
            price: product.price.display(),
            sizes: product.sizes.join(", "),
            featured: product.featured,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::product;

    #[test]
    fn test_card_formats_price_and_sizes() {
        let mut source = product(9, "Vestido Largo", 12_500, "Vestidos");
        source.sizes = vec!["S".to_string(), "M".to_string(), "L".to_string()];
        source.featured = true;

        let card = ProductCard::from(&source);

        assert_eq!(card.id, ProductId::new(9));
        assert_eq!(card.price, "RD$ 12,500");
        assert_eq!(card.sizes, "S, M, L");
        assert!(card.featured);
        assert!(card.has_sizes());
    }

    #[test]
    fn test_card_without_sizes() {
        let mut source = product(1, "Cartera", 800, "Accesorios");
        source.sizes.clear();
        let card = ProductCard::from(&source);
        assert!(!card.has_sizes());
        assert!(!card.featured);
    }
}
