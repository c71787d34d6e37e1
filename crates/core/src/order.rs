//! Order message formatting and the messaging link.
//!
//! Checkout is a hand-off: the cart is rendered as a plain-text message and
//! the visitor is sent to a `wa.me` link with that message pre-filled. Nothing
//! is submitted anywhere by the shop.

use core::fmt;
use std::fmt::Write as _;

use url::Url;

use crate::cart::Cart;
use crate::types::Price;

/// Base of the external messaging link.
const MESSAGE_LINK_BASE: &str = "https://wa.me/";

/// Separator framing the total.
const RULE: &str = "━━━━━━━━━━━━━━━";

/// Errors from building an order hand-off.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,
    /// The destination number is not usable.
    #[error("invalid order phone number: {0}")]
    InvalidPhone(String),
    /// The link could not be assembled.
    #[error("invalid order link: {0}")]
    Link(#[from] url::ParseError),
}

/// Destination number for order messages: digits only, country code
/// included, no `+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPhone(String);

impl OrderPhone {
    /// Shortest accepted number.
    pub const MIN_DIGITS: usize = 8;
    /// Longest accepted number (E.164).
    pub const MAX_DIGITS: usize = 15;

    /// Parse a phone number. Spaces, dashes and a leading `+` are stripped.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidPhone`] if anything other than digits
    /// remains or the length is out of range.
    pub fn parse(s: &str) -> Result<Self, OrderError> {
        let digits: String = s
            .trim()
            .trim_start_matches('+')
            .chars()
            .filter(|c| !matches!(c, ' ' | '-'))
            .collect();

        let valid_length = (Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits.len());
        if !valid_length || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(OrderError::InvalidPhone(s.to_owned()));
        }
        Ok(Self(digits))
    }

    /// The digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderPhone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A formatted order summary ready to hand off.
///
/// ## Examples
///
/// ```
/// use vitrina_core::{Cart, Catalog, OrderError, OrderMessage, OrderPhone, ProductId};
///
/// let catalog = Catalog::from_json(
///     r#"[{"id": 1, "name": "Dress", "price": 1200, "image": "", "category": "Vestidos"}]"#,
/// )
/// .unwrap();
///
/// assert_eq!(
///     OrderMessage::from_cart(&Cart::new(), "Rosa's Shop").unwrap_err(),
///     OrderError::EmptyCart
/// );
///
/// let mut cart = Cart::new();
/// cart.add(&catalog, ProductId::new(1));
/// let message = OrderMessage::from_cart(&cart, "Rosa's Shop").unwrap();
/// assert!(message.text().contains("*1x* Dress - RD$ 1,200"));
///
/// let link = message.link(&OrderPhone::parse("18095550100").unwrap()).unwrap();
/// assert_eq!(link.host_str(), Some("wa.me"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderMessage {
    text: String,
    total: Price,
}

impl OrderMessage {
    /// Render the cart as an order message addressed to `shop_name`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::EmptyCart`] if the cart has no lines.
    pub fn from_cart(cart: &Cart, shop_name: &str) -> Result<Self, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let mut text =
            format!("¡Hola {shop_name}! 👋 Me gustaría realizar el siguiente pedido:\n\n");
        for line in cart.lines() {
            let sizes = if line.product.sizes.is_empty() {
                String::new()
            } else {
                format!(" (Tallas: {})", line.product.sizes.join(", "))
            };
            // Writing to a String cannot fail.
            let _ = writeln!(
                text,
                "• *{}x* {}{sizes} - {}",
                line.quantity,
                line.product.name,
                line.subtotal().display()
            );
        }

        let total = cart.total();
        let _ = write!(
            text,
            "\n{RULE}\n*TOTAL: {}*\n{RULE}\n\n_Por favor, confírmenme disponibilidad para coordinar el pago y envío._",
            total.display()
        );

        Ok(Self { text, total })
    }

    /// The message body.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Grand total of the order.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    /// The messaging link with this message pre-filled.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Link`] if the link cannot be parsed.
    pub fn link(&self, phone: &OrderPhone) -> Result<Url, OrderError> {
        let link = format!(
            "{MESSAGE_LINK_BASE}{phone}?text={}",
            urlencoding::encode(&self.text)
        );
        Ok(Url::parse(&link)?)
    }
}
