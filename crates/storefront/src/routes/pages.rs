//! Fallback handler: legacy page paths and 404s.
//!
//! Old links such as `/index.html` or `/catalogo.html?q=top` are recognised
//! by [`PageKind::detect`] and permanently redirected to the canonical route,
//! keeping the query string.

use axum::{
    http::Uri,
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;
use vitrina_core::PageKind;

use crate::error::AppError;

/// Where a legacy path should go, if anywhere.
fn legacy_redirect(uri: &Uri) -> Option<String> {
    let kind = PageKind::detect(uri.path())?;
    let target = kind.path();
    if uri.path() == target {
        return None;
    }

    Some(match uri.query() {
        Some(query) if !query.is_empty() => format!("{target}?{query}"),
        _ => target.to_owned(),
    })
}

/// Redirect recognised legacy paths, 404 everything else.
#[instrument]
pub async fn fallback(uri: Uri) -> Response {
    match legacy_redirect(&uri) {
        Some(target) => {
            tracing::debug!(from = %uri, to = %target, "Redirecting legacy page path");
            Redirect::permanent(&target).into_response()
        }
        None => AppError::NotFound(uri.path().to_owned()).into_response(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn redirect(uri: &str) -> Option<String> {
        legacy_redirect(&uri.parse().unwrap())
    }

    #[test]
    fn test_legacy_paths_redirect() {
        assert_eq!(redirect("/index.html").as_deref(), Some("/"));
        assert_eq!(redirect("/catalogo.html?q=top").as_deref(), Some("/catalogo?q=top"));
        assert_eq!(redirect("/contacto.html").as_deref(), Some("/contacto"));
        assert_eq!(redirect("/tienda/").as_deref(), Some("/"));
    }

    #[test]
    fn test_unknown_paths_do_not_redirect() {
        assert_eq!(redirect("/blog"), None);
        assert_eq!(redirect("/cart/nope"), None);
    }
}
