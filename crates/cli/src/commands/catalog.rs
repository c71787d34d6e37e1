//! Catalog commands.
//!
//! # Usage
//!
//! ```bash
//! vitrina catalog check productos.json
//! vitrina catalog list productos.json --search vestido --max-price 2000 --json
//! ```

use rust_decimal::Decimal;
use vitrina_core::{Catalog, FilterState, Price, Product, SortMode};
use vitrina_storefront::{catalog::load_catalog, config::CatalogSource};

use super::CliError;

/// Filter criteria given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub search: String,
    pub categories: Vec<String>,
    pub max_price: Option<String>,
    pub sort: SortMode,
}

impl ListQuery {
    /// Build the filter for `catalog`.
    ///
    /// The ceiling is the catalog's highest price, so an absent
    /// `--max-price` keeps every product.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidPrice`] if `--max-price` is not a
    /// non-negative amount.
    pub fn filter(&self, catalog: &Catalog) -> Result<FilterState, CliError> {
        let mut filter = FilterState::new(catalog.max_price());
        filter.set_search(&self.search);
        for category in &self.categories {
            filter.add_category(category);
        }
        if let Some(max_price) = &self.max_price {
            filter.set_max_price(parse_price(max_price)?);
        }
        filter.set_sort(self.sort);
        Ok(filter)
    }
}

fn parse_price(value: &str) -> Result<Price, CliError> {
    value
        .trim()
        .parse::<Decimal>()
        .ok()
        .and_then(|amount| Price::new(amount).ok())
        .ok_or_else(|| CliError::InvalidPrice(value.to_owned()))
}

/// Load and validate a catalog, reporting what it holds.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or fails validation.
pub async fn check(source: &CatalogSource) -> Result<(), CliError> {
    tracing::info!("Loading catalog from {source}...");
    let catalog = load_catalog(source).await?;

    let featured = catalog.featured(usize::MAX).count();
    tracing::info!("Catalog is valid!");
    tracing::info!("  Products: {}", catalog.len());
    tracing::info!("  Featured: {}", featured);
    tracing::info!("  Categories: {}", catalog.categories().join(", "));
    tracing::info!("  Highest price: {}", catalog.max_price());
    Ok(())
}

/// Print the products matching `query`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the query is invalid.
#[allow(clippy::print_stdout)]
pub async fn list(source: &CatalogSource, query: &ListQuery, json: bool) -> Result<(), CliError> {
    let catalog = load_catalog(source).await?;
    let filter = query.filter(&catalog)?;
    let products = filter.apply(catalog.products());

    if json {
        println!("{}", serde_json::to_string_pretty(&products)?);
        return Ok(());
    }

    for product in &products {
        println!("{}", format_row(product));
    }
    tracing::info!("{} of {} products", products.len(), catalog.len());
    Ok(())
}

/// One table row: id, name, price, category.
fn format_row(product: &Product) -> String {
    format!(
        "{:>4}  {:<32}  {:>12}  {}",
        product.id.as_i32(),
        product.name,
        product.price.display(),
        product.category
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"[
                {"id": 1, "name": "Vestido", "price": 1500, "image": "", "category": "Vestidos"},
                {"id": 2, "name": "Blusa", "price": 500, "image": "", "category": "Blusas"},
                {"id": 3, "name": "Vestido Corto", "price": 999, "image": "", "category": "Vestidos"}
            ]"#,
        )
        .unwrap()
    }

    fn names(query: &ListQuery) -> Vec<String> {
        let catalog = catalog();
        let filter = query.filter(&catalog).unwrap();
        filter
            .apply(catalog.products())
            .iter()
            .map(|product| product.name.clone())
            .collect()
    }

    #[test]
    fn test_default_query_lists_everything() {
        assert_eq!(names(&ListQuery::default()), ["Vestido", "Blusa", "Vestido Corto"]);
    }

    #[test]
    fn test_query_combines_criteria() {
        let query = ListQuery {
            search: "vestido".to_string(),
            max_price: Some("1000".to_string()),
            ..ListQuery::default()
        };
        assert_eq!(names(&query), ["Vestido Corto"]);

        let query = ListQuery {
            categories: vec!["Vestidos".to_string()],
            sort: SortMode::PriceAsc,
            ..ListQuery::default()
        };
        assert_eq!(names(&query), ["Vestido Corto", "Vestido"]);
    }

    #[test]
    fn test_invalid_price_is_rejected() {
        let query = ListQuery {
            max_price: Some("barato".to_string()),
            ..ListQuery::default()
        };
        assert!(matches!(
            query.filter(&catalog()),
            Err(CliError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_format_row() {
        let catalog = catalog();
        let row = format_row(&catalog.products()[0]);
        assert!(row.contains("Vestido"));
        assert!(row.contains("RD$ 1,500"));
        assert!(row.trim_start().starts_with('1'));
    }
}
