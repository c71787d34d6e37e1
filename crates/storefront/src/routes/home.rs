//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;
use vitrina_core::PageKind;

use crate::error::Result;
use crate::filters;
use crate::services::{CartSession, signals};
use crate::state::AppState;
use crate::views::{CartView, CategoryLink, GridView, Layout};

/// Maximum number of featured products on the home page.
pub const FEATURED_LIMIT: usize = 4;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
    pub cart: CartView,
    /// Featured products.
    pub grid: GridView,
    /// Category carousel.
    pub categories: Vec<CategoryLink>,
}

/// Display the home page.
#[instrument(skip_all)]
pub async fn home(State(state): State<AppState>, cart: CartSession) -> Result<HomeTemplate> {
    let catalog = state.catalog()?;
    let path = PageKind::Home.path();
    let flash = signals::take_flash(cart.session()).await?;

    Ok(HomeTemplate {
        layout: Layout::new(state.config(), Some(PageKind::Home), flash),
        cart: CartView::new(cart.cart(), path),
        grid: GridView::new(catalog.featured(FEATURED_LIMIT), path),
        categories: catalog
            .categories()
            .into_iter()
            .map(CategoryLink::new)
            .collect(),
    })
}
