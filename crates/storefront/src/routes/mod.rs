//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (featured products, category carousel)
//! GET  /catalogo               - Catalog page (grid fragment for HTMX)
//! GET  /categorias/{category}  - Leave a pending category filter, redirect to catalog
//! GET  /contacto               - Contact page
//! POST /contacto               - Contact acknowledgment
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart panel (fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//! POST /cart/add               - Add to cart (204 + HX-Trigger, or 303 back)
//! POST /cart/remove            - Remove line (204 + HX-Trigger, or 303 back)
//! GET  /cart/clear             - Clear confirmation page
//! POST /cart/clear             - Clear cart (requires confirm=yes)
//!
//! # Order
//! POST /pedido                 - Redirect to the pre-filled order message link
//! ```

pub mod cart;
pub mod catalog;
pub mod contact;
pub mod home;
pub mod order;
pub mod pages;

use std::fmt::Write;

use axum::{
    Router,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};

use crate::state::AppState;

/// Header set by htmx on every request it issues.
const HX_REQUEST: &str = "hx-request";
/// Header set by htmx when restoring a page missing from its history cache.
const HX_HISTORY_RESTORE_REQUEST: &str = "hx-history-restore-request";
/// Header carrying the browser URL on htmx requests.
const HX_CURRENT_URL: &str = "hx-current-url";
/// Response header that fires client-side events.
const HX_TRIGGER: &str = "hx-trigger";

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/clear", get(cart::confirm_clear).post(cart::clear))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/catalogo", get(catalog::index))
        .route("/categorias/{category}", get(catalog::category))
        .route("/contacto", get(contact::show).post(contact::submit))
        .nest("/cart", cart_routes())
        .route("/pedido", post(order::place))
}

/// Whether the request wants an htmx fragment rather than a full page.
///
/// History restores ask for the whole page even though they come from htmx.
pub(crate) fn is_htmx(headers: &HeaderMap) -> bool {
    headers.contains_key(HX_REQUEST) && !headers.contains_key(HX_HISTORY_RESTORE_REQUEST)
}

/// Local path to send a visitor back to after a form post.
///
/// Only same-site absolute paths are honoured; anything else goes home.
pub(crate) fn safe_return_to(return_to: Option<&str>) -> String {
    match return_to.map(str::trim) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_owned()
        }
        _ => "/".to_owned(),
    }
}

/// Path and query of the page an htmx request was issued from.
pub(crate) fn hx_current_path(headers: &HeaderMap) -> String {
    let path = headers
        .get(HX_CURRENT_URL)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| url::Url::parse(value).ok())
        .map(|url| match url.query() {
            Some(query) => format!("{}?{query}", url.path()),
            None => url.path().to_owned(),
        });
    safe_return_to(path.as_deref())
}

/// Answer a cart mutation.
///
/// htmx callers get `204 No Content` with the events to fire; plain form
/// posts are sent back where they came from.
pub(crate) fn mutation_response(
    headers: &HeaderMap,
    return_to: &str,
    events: Option<serde_json::Value>,
) -> Response {
    if !is_htmx(headers) {
        return Redirect::to(return_to).into_response();
    }

    let Some(events) = events else {
        return StatusCode::NO_CONTENT.into_response();
    };

    match HeaderValue::from_str(&ascii_json(&events)) {
        Ok(value) => (StatusCode::NO_CONTENT, [(HX_TRIGGER, value)]).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Dropping unrepresentable HX-Trigger header");
            StatusCode::NO_CONTENT.into_response()
        }
    }
}

/// Serialize to JSON with every non-ASCII character `\u`-escaped, so the
/// result is a valid header value.
fn ascii_json(value: &serde_json::Value) -> String {
    let json = value.to_string();
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                let _ = write!(out, "\\u{unit:04x}");
            }
        }
    }
    out
}
