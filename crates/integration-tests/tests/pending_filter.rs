//! Integration tests for the category shortcut used by the home carousel.

use reqwest::StatusCode;
use vitrina_integration_tests::{TestContext, card_names};

#[tokio::test]
async fn test_pending_filter_applies_once() {
    let ctx = TestContext::new().await;

    let resp = ctx.get("/categorias/Blusas").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/catalogo");

    let body = ctx.get("/catalogo").await.text().await.unwrap();
    assert_eq!(card_names(&body), ["Blusa Blanca"]);
    assert!(body.contains(r#"value="Blusas" checked"#));

    // Marker was consumed: the next visit is unfiltered.
    let body = ctx.get("/catalogo").await.text().await.unwrap();
    assert_eq!(card_names(&body).len(), 6);
}

#[tokio::test]
async fn test_pending_filter_with_encoded_category() {
    let ctx = TestContext::new().await;

    ctx.get("/categorias/Accesorios%20").await;
    let body = ctx.get("/catalogo").await.text().await.unwrap();
    assert_eq!(card_names(&body), ["Bufanda"]);
}

#[tokio::test]
async fn test_unknown_category_is_dropped() {
    let ctx = TestContext::new().await;

    ctx.get("/categorias/Zapatos").await;
    let body = ctx.get("/catalogo").await.text().await.unwrap();
    assert_eq!(card_names(&body).len(), 6);
}

#[tokio::test]
async fn test_htmx_requests_leave_marker_alone() {
    let ctx = TestContext::new().await;

    ctx.get("/categorias/Faldas").await;

    let fragment = ctx.htmx_get("/catalogo").await.text().await.unwrap();
    assert_eq!(card_names(&fragment).len(), 6);

    let body = ctx.get("/catalogo").await.text().await.unwrap();
    assert_eq!(card_names(&body), ["Falda Plisada"]);
}
