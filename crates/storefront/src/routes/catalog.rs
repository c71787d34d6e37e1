//! Catalog page route handlers.
//!
//! The filter controls submit as a plain GET form, so every combination of
//! criteria has a URL. htmx re-requests the same URL on input and swaps just
//! the results grid.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, RawQuery, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use tracing::instrument;
use url::form_urlencoded;
use vitrina_core::{FilterState, PageKind, PendingFilter, Price, SortMode};

use crate::error::Result;
use crate::filters;
use crate::routes::is_htmx;
use crate::services::{CartSession, signals};
use crate::state::AppState;
use crate::views::{CartView, FilterControls, GridView, Layout};

/// Query parameter names used by the filter form.
mod params {
    pub const SEARCH: &str = "q";
    pub const CATEGORY: &str = "category";
    pub const MAX_PRICE: &str = "max_price";
    pub const SORT: &str = "sort";
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/index.html")]
pub struct CatalogTemplate {
    pub layout: Layout,
    pub cart: CartView,
    pub controls: FilterControls,
    pub grid: GridView,
}

/// Results grid fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/catalog_grid.html")]
pub struct CatalogGridTemplate {
    pub grid: GridView,
}

/// Build filter criteria from a query string.
///
/// Unknown keys and unparseable values are ignored, leaving that control at
/// its default.
pub fn parse_filter(query: Option<&str>, ceiling: Price) -> FilterState {
    let mut filter = FilterState::new(ceiling);

    for (key, value) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
        match key.as_ref() {
            params::SEARCH => filter.set_search(&value),
            params::CATEGORY => filter.add_category(&value),
            params::MAX_PRICE => match value.trim().parse::<Decimal>().map(Price::new) {
                Ok(Ok(price)) => filter.set_max_price(price),
                _ => tracing::debug!(value = %value, "Ignoring unparseable max_price"),
            },
            params::SORT => match SortMode::parse(&value) {
                Some(sort) => filter.set_sort(sort),
                None => tracing::debug!(value = %value, "Ignoring unknown sort mode"),
            },
            _ => {}
        }
    }

    filter
}

/// The catalog URL that reproduces `filter`.
pub fn filter_path(filter: &FilterState) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());

    if !filter.search().is_empty() {
        query.append_pair(params::SEARCH, filter.search());
    }
    for category in filter.categories() {
        query.append_pair(params::CATEGORY, category);
    }
    if filter.max_price() != filter.ceiling() {
        query.append_pair(params::MAX_PRICE, &filter.max_price().amount().to_string());
    }
    if filter.sort() != SortMode::Default {
        query.append_pair(params::SORT, filter.sort().as_str());
    }

    let query = query.finish();
    let path = PageKind::Catalog.path();
    if query.is_empty() {
        path.to_owned()
    } else {
        format!("{path}?{query}")
    }
}

/// Display the catalog page, or just the results grid for htmx.
///
/// A full page load also takes the pending category marker left by the home
/// page carousel and applies it if the category exists.
#[instrument(skip(state, headers, cart))]
pub async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
    cart: CartSession,
    RawQuery(query): RawQuery,
) -> Result<Response> {
    let catalog = state.catalog()?;
    let mut filter = parse_filter(query.as_deref(), state.price_ceiling());

    if is_htmx(&headers) {
        let grid = GridView::filtered(catalog, &filter, filter_path(&filter));
        return Ok(CatalogGridTemplate { grid }.into_response());
    }

    if let Some(pending) = signals::take_pending_filter(cart.session()).await? {
        match pending.resolve(catalog) {
            Some(category) => {
                tracing::debug!(category, "Applying pending category filter");
                filter.add_category(category);
            }
            None => tracing::debug!(
                category = %pending.category,
                "Dropping pending filter for unknown category"
            ),
        }
    }

    let flash = signals::take_flash(cart.session()).await?;
    let return_to = filter_path(&filter);

    Ok(CatalogTemplate {
        layout: Layout::new(state.config(), Some(PageKind::Catalog), flash),
        cart: CartView::new(cart.cart(), return_to.clone()),
        controls: FilterControls::new(&filter, catalog),
        grid: GridView::filtered(catalog, &filter, return_to),
    }
    .into_response())
}

/// Open the catalog on one category.
///
/// Leaves a pending filter in the session and redirects; the catalog page
/// picks it up on its next full load.
#[instrument(skip(state, cart))]
pub async fn category(
    State(state): State<AppState>,
    Path(category): Path<String>,
    cart: CartSession,
) -> Result<Redirect> {
    state.catalog()?;
    if let Some(pending) = PendingFilter::new(&category) {
        signals::set_pending_filter(cart.session(), &pending).await?;
    }
    Ok(Redirect::to(PageKind::Catalog.path()))
}
