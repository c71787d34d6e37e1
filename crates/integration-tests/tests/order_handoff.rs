//! Integration tests for the order hand-off and catalog failure handling.

use reqwest::StatusCode;
use vitrina_integration_tests::{ORDER_PHONE, TestContext};

#[tokio::test]
async fn test_empty_cart_order_is_refused() {
    let ctx = TestContext::new().await;

    let resp = ctx.post_form("/pedido", &[]).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.text().await.unwrap().contains("Carrito Vacío"));
}

#[tokio::test]
async fn test_order_redirects_to_prefilled_message() {
    let ctx = TestContext::new().await;
    ctx.add_to_cart("1").await;
    ctx.add_to_cart("1").await;
    ctx.add_to_cart("2").await;

    let resp = ctx.post_form("/pedido", &[]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let location = resp.headers()["location"].to_str().unwrap();
    let link = url::Url::parse(location).unwrap();
    assert_eq!(link.host_str(), Some("wa.me"));
    assert_eq!(link.path(), format!("/{ORDER_PHONE}"));

    let text = link
        .query_pairs()
        .find(|(key, _)| key == "text")
        .map(|(_, value)| value.into_owned())
        .unwrap();
    assert!(text.starts_with("¡Hola Tienda Prueba!"));
    assert!(text.contains("• *2x* Vestido Rojo (Tallas: S, M) - RD$ 2,400"));
    assert!(text.contains("• *1x* Blusa Blanca - RD$ 600"));
    assert!(text.contains("*TOTAL: RD$ 3,000*"));

    // Handing off does not empty the cart.
    assert_eq!(ctx.cart_count().await, 3);
}

#[tokio::test]
async fn test_failed_catalog_blocks_pages() {
    let ctx = TestContext::with_failed_catalog().await;

    let pages = [
        "/",
        "/catalogo",
        "/contacto",
        "/categorias/Vestidos",
        "/cart",
        "/cart/clear",
    ];
    for path in pages {
        let resp = ctx.get(path).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE, "GET {path}");
        assert!(resp.text().await.unwrap().contains("Error de carga"));
    }

    let posts: [(&str, &[(&str, &str)]); 5] = [
        ("/cart/add", &[("product_id", "1")]),
        ("/cart/remove", &[("product_id", "1")]),
        ("/cart/clear", &[("confirm", "yes")]),
        ("/pedido", &[]),
        ("/contacto", &[("name", "Ana"), ("message", "Hola")]),
    ];
    for (path, form) in posts {
        let resp = ctx.post_form(path, form).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE, "POST {path}");
        assert!(resp.text().await.unwrap().contains("Error de carga"));
    }
}

#[tokio::test]
async fn test_health_endpoints() {
    let ctx = TestContext::new().await;
    assert_eq!(ctx.get("/health").await.status(), StatusCode::OK);
    assert_eq!(ctx.get("/health/ready").await.status(), StatusCode::OK);

    let failed = TestContext::with_failed_catalog().await;
    assert_eq!(failed.get("/health").await.status(), StatusCode::OK);
    assert_eq!(
        failed.get("/health/ready").await.status(),
        StatusCode::SERVICE_UNAVAILABLE
    );
}
