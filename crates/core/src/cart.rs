//! Cart lines, merging and totals.
//!
//! A cart holds at most one line per product. Adding a product that is
//! already in the cart bumps its quantity; lines are removed outright, never
//! left at zero.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Product};
use crate::types::{Price, ProductId};

/// A product snapshot plus how many of it the visitor wants.
///
/// The product fields are copied when the line is created, so the line keeps
/// rendering even if the catalog changes between visits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    #[serde(alias = "cantidad")]
    pub quantity: NonZeroU32,
}

impl CartLine {
    /// A fresh line with quantity one.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self {
            product,
            quantity: NonZeroU32::MIN,
        }
    }

    /// The product this line refers to.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product.price.times(self.quantity.get())
    }
}

/// The visitor's selection, unique by product ID.
///
/// ## Examples
///
/// ```
/// use vitrina_core::{Cart, Catalog, Price, ProductId};
///
/// let catalog = Catalog::from_json(
///     r#"[{"id": 1, "name": "Dress", "price": 1200, "image": "", "category": "Vestidos"},
///         {"id": 2, "name": "Top", "price": 600, "image": "", "category": "Blusas"}]"#,
/// )
/// .unwrap();
///
/// let mut cart = Cart::new();
/// cart.add(&catalog, ProductId::new(1));
/// cart.add(&catalog, ProductId::new(1));
/// cart.add(&catalog, ProductId::new(2));
///
/// assert_eq!(cart.len(), 2);
/// assert_eq!(cart.item_count(), 3);
/// assert_eq!(cart.total(), Price::from_whole(3000));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Lines in the order products were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `id`, if any.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// Add one unit of the catalog product `id`.
    ///
    /// Returns the affected line, or `None` (leaving the cart untouched) when
    /// the catalog has no such product.
    pub fn add(&mut self, catalog: &Catalog, id: ProductId) -> Option<&CartLine> {
        let product = catalog.find(id)?;
        let index = match self.lines.iter().position(|line| line.id() == id) {
            Some(index) => {
                let line = self.lines.get_mut(index)?;
                line.quantity = line.quantity.saturating_add(1);
                index
            }
            None => {
                self.lines.push(CartLine::new(product.clone()));
                self.lines.len() - 1
            }
        };
        self.lines.get(index)
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id() != id);
        self.lines.len() != before
    }

    /// Remove every line. Returns whether anything was removed.
    pub fn clear(&mut self) -> bool {
        let had_lines = !self.lines.is_empty();
        self.lines.clear();
        had_lines
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Total number of units across lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |acc, line| acc.saturating_add(line.quantity.get()))
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<Vec<CartLine>> for Cart {
    /// Rebuild a cart from stored lines, merging lines that share an ID.
    fn from(stored: Vec<CartLine>) -> Self {
        let mut lines: Vec<CartLine> = Vec::with_capacity(stored.len());
        for line in stored {
            match lines.iter_mut().find(|existing| existing.id() == line.id()) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity.get());
                }
                None => lines.push(line),
            }
        }
        Self { lines }
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::catalog::tests::product;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            product(1, "Dress", 1200, "Vestidos"),
            product(2, "Top", 600, "Blusas"),
        ])
        .unwrap()
    }

    fn quantities(cart: &Cart) -> Vec<(i32, u32)> {
        cart.lines()
            .iter()
            .map(|line| (line.id().as_i32(), line.quantity.get()))
            .collect()
    }

    #[test]
    fn test_add_same_product_twice_merges() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, ProductId::new(1));
        let line = cart.add(&catalog, ProductId::new(1)).unwrap();
        assert_eq!(line.quantity.get(), 2);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_add_scenario_totals() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, ProductId::new(1));
        cart.add(&catalog, ProductId::new(1));
        cart.add(&catalog, ProductId::new(2));

        assert_eq!(quantities(&cart), vec![(1, 2), (2, 1)]);
        assert_eq!(cart.total(), Price::from_whole(3000));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_add_unknown_product_is_noop() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, ProductId::new(1));
        let before = cart.clone();

        assert!(cart.add(&catalog, ProductId::new(99)).is_none());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_add_copies_product_snapshot() {
        let catalog = catalog();
        let mut cart = Cart::new();
        let line = cart.add(&catalog, ProductId::new(2)).unwrap();
        assert_eq!(&line.product, catalog.find(ProductId::new(2)).unwrap());
    }

    #[test]
    fn test_remove_missing_leaves_cart_unchanged() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, ProductId::new(1));
        let before = cart.clone();

        assert!(!cart.remove(ProductId::new(2)));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_deletes_whole_line() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, ProductId::new(1));
        cart.add(&catalog, ProductId::new(1));
        cart.add(&catalog, ProductId::new(2));

        assert!(cart.remove(ProductId::new(1)));
        assert_eq!(quantities(&cart), vec![(2, 1)]);
        assert_eq!(cart.total(), Price::from_whole(600));
    }

    #[test]
    fn test_empty_cart_totals_zero() {
        let cart = Cart::new();
        assert_eq!(cart.total(), Price::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_clear_reports_change() {
        let catalog = catalog();
        let mut cart = Cart::new();
        assert!(!cart.clear());
        cart.add(&catalog, ProductId::new(2));
        assert!(cart.clear());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_json_round_trip_keeps_lines() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, ProductId::new(1));
        cart.add(&catalog, ProductId::new(2));
        cart.add(&catalog, ProductId::new(2));

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_stored_duplicates_are_merged() {
        let json = r#"[
            {"id": 1, "nombre": "Dress", "precio": 1200, "imagen": "d.jpg", "categoria": "Vestidos", "tallas": [], "cantidad": 2},
            {"id": 1, "nombre": "Dress", "precio": 1200, "imagen": "d.jpg", "categoria": "Vestidos", "tallas": [], "cantidad": 3}
        ]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(quantities(&cart), vec![(1, 5)]);
    }

    #[test]
    fn test_huge_prices_total_without_overflow() {
        let catalog = Catalog::from_json(
            r#"[{"id": 1, "name": "Gown", "price": "50000000000000000000000000000", "image": "", "category": "V"}]"#,
        )
        .unwrap();
        let mut cart = Cart::new();
        cart.add(&catalog, ProductId::new(1));
        cart.add(&catalog, ProductId::new(1));

        assert_eq!(cart.total().amount(), Decimal::MAX);
    }

    #[test]
    fn test_stored_zero_quantity_rejected() {
        let json = r#"[{"id": 1, "name": "Dress", "price": 1200, "image": "", "category": "V", "quantity": 0}]"#;
        assert!(serde_json::from_str::<Cart>(json).is_err());
    }
}
