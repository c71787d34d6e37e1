//! Display data for templates.
//!
//! Templates only read fields; everything that needs a lookup, a format or
//! a comparison is computed here.

use vitrina_core::{
    Cart, CartLine, Catalog, FilterState, PageKind, Product, ProductCard, ProductId, SortMode,
};

use crate::config::StorefrontConfig;
use crate::models::Flash;

/// A link in the site navigation.
#[derive(Clone)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Shared chrome for every full page.
#[derive(Clone)]
pub struct Layout {
    pub shop_name: String,
    pub nav: Vec<NavLink>,
    pub flash: Option<Flash>,
}

impl Layout {
    /// Build the page chrome, highlighting `page` in the navigation.
    #[must_use]
    pub fn new(config: &StorefrontConfig, page: Option<PageKind>, flash: Option<Flash>) -> Self {
        let nav = [
            (PageKind::Home, "Inicio"),
            (PageKind::Catalog, "Catálogo"),
            (PageKind::Contact, "Contacto"),
        ]
        .into_iter()
        .map(|(kind, label)| NavLink {
            href: kind.path(),
            label,
            active: page == Some(kind),
        })
        .collect();

        Self {
            shop_name: config.shop_name.clone(),
            nav,
            flash,
        }
    }
}

/// Cart line display data.
#[derive(Clone)]
pub struct CartItemView {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub sizes: String,
    pub quantity: u32,
    pub price: String,
    pub subtotal: String,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id(),
            name: line.product.name.clone(),
            image: line.product.image.clone(),
            sizes: line.product.sizes.join(", "),
            quantity: line.quantity.get(),
            price: line.product.price.display(),
            subtotal: line.subtotal().display(),
        }
    }
}

/// Cart badge and panel display data.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
    pub is_empty: bool,
    /// Animate the badge (set right after a mutation).
    pub pulse: bool,
    /// Where non-JS cart forms send the visitor back to.
    pub return_to: String,
}

impl CartView {
    #[must_use]
    pub fn new(cart: &Cart, return_to: impl Into<String>) -> Self {
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            total: cart.total().display(),
            item_count: cart.item_count(),
            is_empty: cart.is_empty(),
            pulse: false,
            return_to: return_to.into(),
        }
    }

    #[must_use]
    pub const fn pulsing(mut self) -> Self {
        self.pulse = true;
        self
    }
}

/// A grid of product cards.
#[derive(Clone)]
pub struct GridView {
    pub cards: Vec<ProductCard>,
    pub count: usize,
    /// Current price ceiling, e.g. `RD$ 10,000`.
    pub price_label: String,
    pub return_to: String,
}

impl GridView {
    #[must_use]
    pub fn new<'a>(
        products: impl IntoIterator<Item = &'a Product>,
        return_to: impl Into<String>,
    ) -> Self {
        let cards: Vec<ProductCard> = products.into_iter().map(ProductCard::from).collect();
        Self {
            count: cards.len(),
            cards,
            price_label: String::new(),
            return_to: return_to.into(),
        }
    }

    /// Run `filter` over the catalog.
    #[must_use]
    pub fn filtered(
        catalog: &Catalog,
        filter: &FilterState,
        return_to: impl Into<String>,
    ) -> Self {
        let mut grid = Self::new(filter.apply(catalog.products()), return_to);
        grid.price_label = filter.max_price().display();
        grid
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// A category checkbox.
#[derive(Clone)]
pub struct CategoryOption {
    pub name: String,
    pub checked: bool,
}

/// A sort selector entry.
#[derive(Clone)]
pub struct SortOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// A carousel link that opens the catalog on one category.
#[derive(Clone)]
pub struct CategoryLink {
    pub name: String,
    pub href: String,
}

impl CategoryLink {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            href: format!("/categorias/{}", urlencoding::encode(name)),
        }
    }
}

/// Catalog filter controls, pre-filled from the current criteria.
#[derive(Clone)]
pub struct FilterControls {
    pub search: String,
    pub categories: Vec<CategoryOption>,
    /// Slider position in whole units.
    pub max_price: String,
    /// Slider maximum in whole units.
    pub ceiling: String,
    pub sorts: Vec<SortOption>,
    pub is_default: bool,
}

impl FilterControls {
    #[must_use]
    pub fn new(filter: &FilterState, catalog: &Catalog) -> Self {
        Self {
            search: filter.search().to_owned(),
            categories: catalog
                .categories()
                .into_iter()
                .map(|name| CategoryOption {
                    name: name.to_owned(),
                    checked: filter.has_category(name),
                })
                .collect(),
            max_price: filter.max_price().whole_units().to_string(),
            ceiling: filter.ceiling().whole_units().to_string(),
            sorts: SortMode::ALL
                .into_iter()
                .map(|mode| SortOption {
                    value: mode.as_str(),
                    label: mode.label(),
                    selected: mode == filter.sort(),
                })
                .collect(),
            is_default: filter.is_default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use vitrina_core::Price;

    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"[
                {"id": 1, "name": "Dress", "price": 1200, "image": "d.jpg", "category": "Vestidos", "sizes": ["S", "M"]},
                {"id": 2, "name": "Top", "price": 600, "image": "t.jpg", "category": "Blusas"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_cart_view_totals() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, ProductId::new(1));
        cart.add(&catalog, ProductId::new(1));
        cart.add(&catalog, ProductId::new(2));

        let view = CartView::new(&cart, "/catalogo");
        assert_eq!(view.item_count, 3);
        assert_eq!(view.total, "RD$ 3,000");
        assert_eq!(view.items[0].quantity, 2);
        assert_eq!(view.items[0].subtotal, "RD$ 2,400");
        assert_eq!(view.items[0].sizes, "S, M");
        assert!(!view.pulse);
        assert!(view.pulsing().pulse);
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::new(&Cart::new(), "/");
        assert!(view.is_empty);
        assert_eq!(view.total, "RD$ 0");
    }

    #[test]
    fn test_filter_controls_reflect_state() {
        let catalog = catalog();
        let mut filter = FilterState::new(Price::from_whole(10_000));
        filter.add_category("Blusas");
        filter.set_sort(SortMode::PriceDesc);

        let controls = FilterControls::new(&filter, &catalog);
        let checked: Vec<&str> = controls
            .categories
            .iter()
            .filter(|option| option.checked)
            .map(|option| option.name.as_str())
            .collect();
        assert_eq!(checked, ["Blusas"]);
        assert_eq!(controls.ceiling, "10000");
        assert!(!controls.is_default);
        assert!(
            controls
                .sorts
                .iter()
                .any(|option| option.selected && option.value == SortMode::PriceDesc.as_str())
        );
    }

    #[test]
    fn test_category_link_is_encoded() {
        let link = CategoryLink::new("Ropa de Baño");
        assert_eq!(link.href, "/categorias/Ropa%20de%20Ba%C3%B1o");
    }

    #[test]
    fn test_nav_marks_active_page() {
        let config = crate::config::tests::config();
        let layout = Layout::new(&config, Some(PageKind::Catalog), None);
        let active: Vec<&str> = layout
            .nav
            .iter()
            .filter(|link| link.active)
            .map(|link| link.href)
            .collect();
        assert_eq!(active, ["/catalogo"]);
    }
}
