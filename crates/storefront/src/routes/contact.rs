//! Contact form route handlers.
//!
//! Submissions are acknowledged on the page; nothing is sent anywhere. The
//! visitor is pointed at the order message link for real conversations.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;
use vitrina_core::PageKind;

use crate::error::Result;
use crate::filters;
use crate::services::{CartSession, signals};
use crate::state::AppState;
use crate::views::{CartView, Layout};

/// Contact form data.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    /// Problems to show next to the form, empty when the submission is fine.
    fn validate(&self) -> Vec<&'static str> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push("Por favor, indica tu nombre.");
        }

        let email = self.email.trim();
        if !email.is_empty() && !is_valid_email(email) {
            errors.push("Por favor, introduce un correo electrónico válido.");
        }

        if self.message.trim().is_empty() {
            errors.push("Por favor, escribe tu mensaje.");
        }

        errors
    }
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub layout: Layout,
    pub cart: CartView,
    pub form: ContactForm,
    pub errors: Vec<&'static str>,
    pub sent: bool,
}

/// Display the contact page.
#[instrument(skip_all)]
pub async fn show(State(state): State<AppState>, cart: CartSession) -> Result<ContactTemplate> {
    state.catalog()?;
    let flash = signals::take_flash(cart.session()).await?;

    Ok(ContactTemplate {
        layout: Layout::new(state.config(), Some(PageKind::Contact), flash),
        cart: CartView::new(cart.cart(), PageKind::Contact.path()),
        form: ContactForm::default(),
        errors: Vec::new(),
        sent: false,
    })
}

/// Acknowledge a contact submission.
///
/// Blank name or message re-renders the form with a 400.
#[instrument(skip(state, cart, form), fields(name = %form.name.trim()))]
pub async fn submit(
    State(state): State<AppState>,
    cart: CartSession,
    Form(form): Form<ContactForm>,
) -> Result<Response> {
    state.catalog()?;
    let errors = form.validate();
    let layout = Layout::new(state.config(), Some(PageKind::Contact), None);
    let cart = CartView::new(cart.cart(), PageKind::Contact.path());

    if !errors.is_empty() {
        tracing::debug!(?errors, "Rejected contact submission");
        return Ok((
            StatusCode::BAD_REQUEST,
            ContactTemplate {
                layout,
                cart,
                form,
                errors,
                sent: false,
            },
        )
            .into_response());
    }

    tracing::info!(
        has_email = !form.email.trim().is_empty(),
        message_len = form.message.trim().chars().count(),
        "Contact message acknowledged"
    );

    Ok(ContactTemplate {
        layout,
        cart,
        form: ContactForm::default(),
        errors: Vec::new(),
        sent: true,
    }
    .into_response())
}

/// Basic email validation.
fn is_valid_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let Some(local) = parts.next() else {
        return false;
    };
    let Some(domain) = parts.next() else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && domain.contains('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_valid_submission() {
        assert!(form("Ana", "ana@example.com", "¿Tienen talla L?").validate().is_empty());
        assert!(form("Ana", "", "¿Tienen talla L?").validate().is_empty());
    }

    #[test]
    fn test_blank_fields_rejected() {
        assert_eq!(form("  ", "", "hola").validate().len(), 1);
        assert_eq!(form("", "", "   ").validate().len(), 2);
    }

    #[test]
    fn test_bad_email_rejected() {
        assert_eq!(form("Ana", "ana-at-example", "hola").validate().len(), 1);
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("ana@example.com"));
        assert!(!is_valid_email("ana@localhost"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ana"));
    }
}
