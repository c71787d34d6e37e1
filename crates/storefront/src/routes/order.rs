//! Order handoff route handler.
//!
//! There is no checkout: the cart is turned into a pre-written message and
//! the visitor is sent to the messaging link to finish the conversation.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;
use vitrina_core::{OrderError, OrderMessage};

use crate::error::{AppError, NoticeTemplate, Result, add_breadcrumb};
use crate::services::CartSession;
use crate::state::AppState;

/// Redirect to the pre-filled order message, or explain why not.
///
/// The cart is left as is: the visitor may come back and adjust it.
#[instrument(skip_all)]
pub async fn place(State(state): State<AppState>, cart: CartSession) -> Result<Response> {
    state.catalog()?;
    let config = state.config();

    let message = match OrderMessage::from_cart(cart.cart(), &config.shop_name) {
        Ok(message) => message,
        Err(OrderError::EmptyCart) => {
            tracing::debug!("Refusing order for empty cart");
            return Ok(empty_cart_notice(&config.shop_name));
        }
        Err(e) => return Err(AppError::Internal(e.to_string())),
    };

    let link = message
        .link(&config.order_phone)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    add_breadcrumb(
        "order",
        "Order handed off",
        Some(&[("total", &message.total().display())]),
    );
    tracing::info!(
        lines = cart.cart().len(),
        items = cart.cart().item_count(),
        total = %message.total(),
        "Order handed off"
    );

    Ok(Redirect::to(link.as_str()).into_response())
}

fn empty_cart_notice(shop_name: &str) -> Response {
    let notice = NoticeTemplate {
        shop_name: shop_name.to_owned(),
        title: "Carrito Vacío".to_string(),
        message: "Agrega productos a tu carrito antes de realizar el pedido.".to_string(),
        back_url: "/catalogo".to_string(),
    };
    (StatusCode::UNPROCESSABLE_ENTITY, notice).into_response()
}
