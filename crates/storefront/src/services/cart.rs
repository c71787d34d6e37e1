//! Session-backed cart store.
//!
//! The cart is rehydrated from the session once per request, mutated as an
//! owned value, and written back whole after every change. Last write wins.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;
use vitrina_core::{Cart, CartLine, Catalog, ProductId};

use crate::error::{AppError, add_breadcrumb};
use crate::models::session_keys;

/// The visitor's cart, bound to their session.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(cart: CartSession) -> impl IntoResponse {
///     format!("{} items", cart.cart().item_count())
/// }
/// ```
pub struct CartSession {
    session: Session,
    cart: Cart,
}

impl CartSession {
    /// Rehydrate the cart stored in `session`.
    ///
    /// A payload that no longer deserializes is logged and treated as an
    /// empty cart; the next mutation overwrites it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Session`] if the session store fails.
    pub async fn load(session: Session) -> Result<Self, AppError> {
        let cart = match session.get::<Cart>(session_keys::CART).await {
            Ok(cart) => cart.unwrap_or_default(),
            Err(tower_sessions::session::Error::SerdeJson(e)) => {
                tracing::warn!(error = %e, "Discarding unreadable persisted cart");
                Cart::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self { session, cart })
    }

    /// The current cart contents.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The underlying session, for other visitor state.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Add one unit of `id` and persist.
    ///
    /// Returns a snapshot of the affected line, or `None` if the catalog has
    /// no such product (nothing is written in that case).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Session`] if the cart cannot be written back.
    pub async fn add(
        &mut self,
        catalog: &Catalog,
        id: ProductId,
    ) -> Result<Option<CartLine>, AppError> {
        let Some(line) = self.cart.add(catalog, id).cloned() else {
            tracing::debug!(product_id = %id, "Ignoring add of unknown product");
            return Ok(None);
        };

        add_breadcrumb(
            "cart",
            "Added to cart",
            Some(&[
                ("product_id", &id.to_string()),
                ("quantity", &line.quantity.to_string()),
            ]),
        );
        self.persist().await?;
        Ok(Some(line))
    }

    /// Remove the line for `id` and persist if anything changed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Session`] if the cart cannot be written back.
    pub async fn remove(&mut self, id: ProductId) -> Result<bool, AppError> {
        if !self.cart.remove(id) {
            return Ok(false);
        }

        add_breadcrumb(
            "cart",
            "Removed from cart",
            Some(&[("product_id", &id.to_string())]),
        );
        self.persist().await?;
        Ok(true)
    }

    /// Empty the cart and persist if it held anything.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Session`] if the cart cannot be written back.
    pub async fn clear(&mut self) -> Result<bool, AppError> {
        if !self.cart.clear() {
            return Ok(false);
        }

        add_breadcrumb("cart", "Cleared cart", None);
        self.persist().await?;
        Ok(true)
    }

    /// Write the whole cart back to the session.
    async fn persist(&self) -> Result<(), AppError> {
        self.session.insert(session_keys::CART, &self.cart).await?;
        tracing::debug!(
            lines = self.cart.len(),
            items = self.cart.item_count(),
            "Cart persisted"
        );
        Ok(())
    }
}

impl<S> FromRequestParts<S> for CartSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer not installed".to_string()))?;

        Self::load(session).await
    }
}
