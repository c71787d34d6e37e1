//! Search/category/price/sort filter engine.
//!
//! Filtering is a pure function of the filter state and the catalog: results
//! are recomputed on every request and never stored.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::Price;

/// Result ordering for the catalog grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Catalog order.
    #[default]
    Default,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
}

impl SortMode {
    /// Every mode, in the order the sort selector lists them.
    pub const ALL: [Self; 3] = [Self::Default, Self::PriceAsc, Self::PriceDesc];

    /// The value used in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
        }
    }

    /// Label shown in the sort selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Default => "Destacados",
            Self::PriceAsc => "Precio: menor a mayor",
            Self::PriceDesc => "Precio: mayor a menor",
        }
    }

    /// Parse a query-string value, accepting the shop's legacy Spanish values.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "" | "default" | "defecto" => Some(Self::Default),
            "price-asc" | "precio-menor" => Some(Self::PriceAsc),
            "price-desc" | "precio-mayor" => Some(Self::PriceDesc),
            _ => None,
        }
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid sort mode: {s}"))
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The combined criteria applied to the catalog view.
///
/// `ceiling` is the top of the price slider; the price filter can never
/// exceed it and [`FilterState::reset`] returns to it.
///
/// ## Examples
///
/// ```
/// use vitrina_core::{Catalog, FilterState, Price, SortMode};
///
/// let catalog = Catalog::from_json(
///     r#"[{"id": 1, "name": "Vestido", "price": 1500, "image": "", "category": "Vestidos"},
///         {"id": 2, "name": "Blusa", "price": 500, "image": "", "category": "Blusas"}]"#,
/// )
/// .unwrap();
///
/// let mut filter = FilterState::new(Price::from_whole(10_000));
/// filter.set_sort(SortMode::PriceAsc);
/// let names: Vec<&str> = filter
///     .apply(catalog.products())
///     .iter()
///     .map(|p| p.name.as_str())
///     .collect();
/// assert_eq!(names, ["Blusa", "Vestido"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    search: String,
    categories: BTreeSet<String>,
    max_price: Price,
    ceiling: Price,
    sort: SortMode,
}

impl FilterState {
    /// Default criteria: no search, no categories, price at `ceiling`,
    /// catalog order.
    #[must_use]
    pub const fn new(ceiling: Price) -> Self {
        Self {
            search: String::new(),
            categories: BTreeSet::new(),
            max_price: ceiling,
            ceiling,
            sort: SortMode::Default,
        }
    }

    /// Restore every control to its default.
    pub fn reset(&mut self) {
        *self = Self::new(self.ceiling);
    }

    /// Set the search text. Surrounding whitespace is ignored.
    pub fn set_search(&mut self, search: &str) {
        search.trim().clone_into(&mut self.search);
    }

    /// Activate a category. Blank names are ignored.
    pub fn add_category(&mut self, category: &str) {
        let category = category.trim();
        if !category.is_empty() {
            self.categories.insert(category.to_owned());
        }
    }

    /// Set the price limit, clamped to the ceiling.
    pub fn set_max_price(&mut self, max_price: Price) {
        self.max_price = max_price.min(self.ceiling);
    }

    /// Set the result ordering.
    pub const fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
    }

    /// Current search text.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Active categories.
    #[must_use]
    pub const fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    /// Whether `category` is active.
    #[must_use]
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.contains(category)
    }

    /// Current price limit.
    #[must_use]
    pub const fn max_price(&self) -> Price {
        self.max_price
    }

    /// Top of the price range.
    #[must_use]
    pub const fn ceiling(&self) -> Price {
        self.ceiling
    }

    /// Current ordering.
    #[must_use]
    pub const fn sort(&self) -> SortMode {
        self.sort
    }

    /// Whether every control is at its default.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::new(self.ceiling)
    }

    /// Whether `product` passes every predicate.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_with(&self.search.to_lowercase(), product)
    }

    /// Filter `products`, then sort the survivors.
    ///
    /// Price sorts are stable, so products with equal prices keep catalog
    /// order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let needle = self.search.to_lowercase();
        let mut results: Vec<&Product> = products
            .iter()
            .filter(|product| self.matches_with(&needle, product))
            .collect();

        match self.sort {
            SortMode::Default => {}
            SortMode::PriceAsc => results.sort_by(|a, b| a.price.cmp(&b.price)),
            SortMode::PriceDesc => results.sort_by(|a, b| b.price.cmp(&a.price)),
        }

        results
    }

    fn matches_with(&self, needle: &str, product: &Product) -> bool {
        let passes_search = needle.is_empty() || product.name.to_lowercase().contains(needle);
        let passes_category =
            self.categories.is_empty() || self.categories.contains(&product.category);
        let passes_price = product.price <= self.max_price;
        passes_search && passes_category && passes_price
    }
}
