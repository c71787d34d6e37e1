//! Cart route handlers.
//!
//! Mutations answer htmx with `204 No Content` plus an `HX-Trigger` header;
//! the badge and panel then refresh themselves on `cart-updated`. Plain form
//! posts get a redirect back and a flash notice instead.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;
use vitrina_core::ProductId;

use crate::error::{AppError, Result};
use crate::filters;
use crate::models::Flash;
use crate::routes::{hx_current_path, is_htmx, mutation_response, safe_return_to};
use crate::services::{CartSession, signals};
use crate::state::AppState;
use crate::views::{CartView, Layout};

/// Add/remove form data.
#[derive(Debug, Deserialize)]
pub struct CartLineForm {
    pub product_id: String,
    #[serde(default)]
    pub return_to: Option<String>,
}

impl CartLineForm {
    fn product_id(&self) -> Result<ProductId> {
        self.product_id
            .parse()
            .map_err(|_| AppError::BadRequest("Producto no válido.".to_string()))
    }
}

/// Clear form data.
#[derive(Debug, Deserialize)]
pub struct ClearCartForm {
    #[serde(default)]
    pub confirm: Option<String>,
    #[serde(default)]
    pub return_to: Option<String>,
}

impl ClearCartForm {
    fn confirmed(&self) -> bool {
        self.confirm.as_deref().map(str::trim) == Some("yes")
    }
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub cart: CartView,
}

/// Clear confirmation page.
#[derive(Template, WebTemplate)]
#[template(path = "cart/confirm_clear.html")]
pub struct ConfirmClearTemplate {
    pub layout: Layout,
    pub cart: CartView,
}

/// Cart panel fragment.
#[instrument(skip_all)]
pub async fn show(
    State(state): State<AppState>,
    headers: HeaderMap,
    cart: CartSession,
) -> Result<CartItemsTemplate> {
    state.catalog()?;
    Ok(CartItemsTemplate {
        cart: CartView::new(cart.cart(), hx_current_path(&headers)),
    })
}

/// Cart badge fragment.
///
/// Only fetched after a mutation, so it always pulses.
#[instrument(skip_all)]
pub async fn count(
    State(state): State<AppState>,
    cart: CartSession,
) -> Result<CartCountTemplate> {
    state.catalog()?;
    Ok(CartCountTemplate {
        cart: CartView::new(cart.cart(), "/").pulsing(),
    })
}

/// Add one unit of a product to the cart.
///
/// Unknown products are ignored.
#[instrument(skip(state, headers, cart), fields(product_id = %form.product_id))]
pub async fn add(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut cart: CartSession,
    Form(form): Form<CartLineForm>,
) -> Result<Response> {
    let catalog = state.catalog()?;
    let id = form.product_id()?;
    let return_to = safe_return_to(form.return_to.as_deref());

    let Some(line) = cart.add(catalog, id).await? else {
        return Ok(mutation_response(&headers, &return_to, None));
    };

    let message = format!("{} añadido", line.product.name);
    tracing::info!(
        product_id = %id,
        quantity = line.quantity.get(),
        items = cart.cart().item_count(),
        "Added to cart"
    );

    if !is_htmx(&headers) {
        signals::push_flash(cart.session(), &Flash::success(&message)).await?;
    }

    Ok(mutation_response(
        &headers,
        &return_to,
        Some(json!({
            "cart-updated": {},
            "toast": {"level": "success", "message": message},
        })),
    ))
}

/// Remove a product's line from the cart.
#[instrument(skip(state, headers, cart), fields(product_id = %form.product_id))]
pub async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut cart: CartSession,
    Form(form): Form<CartLineForm>,
) -> Result<Response> {
    state.catalog()?;
    let id = form.product_id()?;
    let return_to = safe_return_to(form.return_to.as_deref());

    let events = if cart.remove(id).await? {
        tracing::info!(product_id = %id, "Removed from cart");
        Some(json!({"cart-updated": {}}))
    } else {
        None
    };

    Ok(mutation_response(&headers, &return_to, events))
}

/// Confirmation page for emptying the cart (no-JS path).
#[instrument(skip_all)]
pub async fn confirm_clear(
    State(state): State<AppState>,
    cart: CartSession,
) -> Result<Response> {
    state.catalog()?;
    if cart.cart().is_empty() {
        return Ok(Redirect::to("/").into_response());
    }

    let flash = signals::take_flash(cart.session()).await?;
    Ok(ConfirmClearTemplate {
        layout: Layout::new(state.config(), None, flash),
        cart: CartView::new(cart.cart(), "/cart/clear"),
    }
    .into_response())
}

/// Empty the cart.
///
/// Requires `confirm=yes`; without it the confirmation page is shown and the
/// cart is left alone.
#[instrument(skip_all)]
pub async fn clear(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut cart: CartSession,
    Form(form): Form<ClearCartForm>,
) -> Result<Response> {
    state.catalog()?;
    let return_to = safe_return_to(form.return_to.as_deref());

    if cart.cart().is_empty() {
        return Ok(mutation_response(&headers, &return_to, None));
    }

    if !form.confirmed() {
        if is_htmx(&headers) {
            return Ok(mutation_response(&headers, &return_to, None));
        }
        return Ok(ConfirmClearTemplate {
            layout: Layout::new(state.config(), None, None),
            cart: CartView::new(cart.cart(), "/cart/clear"),
        }
        .into_response());
    }

    cart.clear().await?;
    tracing::info!("Cart cleared");

    let message = "Carrito vaciado";
    if !is_htmx(&headers) {
        signals::push_flash(cart.session(), &Flash::info(message)).await?;
    }

    Ok(mutation_response(
        &headers,
        &return_to,
        Some(json!({
            "cart-updated": {},
            "toast": {"level": "info", "message": message},
        })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_requires_exact_confirmation() {
        let form = |confirm: Option<&str>| ClearCartForm {
            confirm: confirm.map(String::from),
            return_to: None,
        };

        assert!(form(Some("yes")).confirmed());
        assert!(!form(Some("no")).confirmed());
        assert!(!form(None).confirmed());
    }

    #[test]
    fn test_malformed_product_id_is_bad_request() {
        let form = CartLineForm {
            product_id: "vestido".to_string(),
            return_to: None,
        };
        assert!(matches!(form.product_id(), Err(AppError::BadRequest(_))));
    }
}
