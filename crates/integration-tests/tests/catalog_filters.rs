//! Integration tests for the catalog page and its filter controls.

use reqwest::StatusCode;
use vitrina_integration_tests::{TestContext, card_names};

const ALL: [&str; 6] = [
    "Vestido Rojo",
    "Blusa Blanca",
    "Vestido Largo",
    "Bufanda",
    "Falda Plisada",
    "Chaqueta",
];

async fn names(ctx: &TestContext, path: &str) -> Vec<String> {
    let resp = ctx.get(path).await;
    assert_eq!(resp.status(), StatusCode::OK, "GET {path}");
    card_names(&resp.text().await.unwrap())
}

#[tokio::test]
async fn test_unfiltered_catalog_keeps_order() {
    let ctx = TestContext::new().await;
    assert_eq!(names(&ctx, "/catalogo").await, ALL);
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let ctx = TestContext::new().await;
    assert_eq!(
        names(&ctx, "/catalogo?q=%20VESTIDO%20").await,
        ["Vestido Rojo", "Vestido Largo"]
    );
}

#[tokio::test]
async fn test_categories_combine_with_price() {
    let ctx = TestContext::new().await;
    assert_eq!(
        names(&ctx, "/catalogo?category=Vestidos&category=Blusas&max_price=1500").await,
        ["Vestido Rojo", "Blusa Blanca"]
    );
}

#[tokio::test]
async fn test_sort_by_price() {
    let ctx = TestContext::new().await;
    assert_eq!(
        names(&ctx, "/catalogo?sort=price-asc").await,
        [
            "Bufanda",
            "Blusa Blanca",
            "Falda Plisada",
            "Vestido Rojo",
            "Chaqueta",
            "Vestido Largo"
        ]
    );
    assert_eq!(
        names(&ctx, "/catalogo?sort=price-desc&category=Vestidos").await,
        ["Vestido Largo", "Vestido Rojo"]
    );
}

#[tokio::test]
async fn test_zero_results_shows_empty_state() {
    let ctx = TestContext::new().await;
    let body = ctx.get("/catalogo?q=pijama").await.text().await.unwrap();
    assert!(card_names(&body).is_empty());
    assert!(body.contains("No se encontraron productos"));
    assert!(body.contains("0 productos"));
}

#[tokio::test]
async fn test_garbage_query_falls_back_to_defaults() {
    let ctx = TestContext::new().await;
    assert_eq!(
        names(&ctx, "/catalogo?max_price=mucho&sort=random").await,
        ALL
    );
}

#[tokio::test]
async fn test_reset_link_only_when_filtered() {
    let ctx = TestContext::new().await;

    let body = ctx.get("/catalogo").await.text().await.unwrap();
    assert!(!body.contains("Restablecer filtros"));

    let body = ctx.get("/catalogo?sort=price-desc").await.text().await.unwrap();
    assert!(body.contains("Restablecer filtros"));
}

#[tokio::test]
async fn test_htmx_gets_grid_fragment_only() {
    let ctx = TestContext::new().await;

    let body = ctx
        .htmx_get("/catalogo?max_price=700")
        .await
        .text()
        .await
        .unwrap();
    assert!(!body.contains("<html"));
    assert!(body.contains(r#"id="catalog-results""#));
    assert!(body.contains("Hasta RD$ 700"));
    assert_eq!(card_names(&body), ["Blusa Blanca", "Bufanda"]);
}

#[tokio::test]
async fn test_home_shows_four_featured_products() {
    let ctx = TestContext::new().await;

    let body = ctx.get("/").await.text().await.unwrap();
    assert_eq!(
        card_names(&body),
        ["Vestido Rojo", "Blusa Blanca", "Bufanda", "Falda Plisada"]
    );
    assert!(body.contains(r#"href="/categorias/Vestidos""#));
    assert!(body.contains("DESTACADO"));
}

#[tokio::test]
async fn test_legacy_paths_redirect() {
    let ctx = TestContext::new().await;

    let resp = ctx.get("/catalogo.html?q=blusa").await;
    assert_eq!(resp.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(resp.headers()["location"], "/catalogo?q=blusa");

    let resp = ctx.get("/index.html").await;
    assert_eq!(resp.headers()["location"], "/");
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let ctx = TestContext::new().await;

    let resp = ctx.get("/blog").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(resp.text().await.unwrap().contains("Página no encontrada"));
}

#[tokio::test]
async fn test_security_headers_present() {
    let ctx = TestContext::new().await;

    let resp = ctx.get("/catalogo").await;
    let headers = resp.headers();
    assert_eq!(headers["x-frame-options"], "DENY");
    assert!(headers.contains_key("content-security-policy"));
    assert!(headers.contains_key("x-request-id"));
}
