//! Integration tests for Vitrina.
//!
//! Each test spawns the storefront router in-process on an ephemeral port
//! and drives it over HTTP with a cookie-keeping client, so the session
//! (and with it the cart) survives between requests exactly as in a
//! browser.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vitrina-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Adding, removing and clearing cart lines
//! - `catalog_filters` - Search, category, price and sort controls
//! - `pending_filter` - Category shortcut from the home carousel
//! - `order_handoff` - Order message link and empty-cart refusal
//! - `contact_form` - Contact acknowledgment and validation

#![allow(clippy::missing_panics_doc)]

use std::path::PathBuf;

use reqwest::{Client, Response, redirect::Policy};
use tokio::net::TcpListener;
use vitrina_core::{Catalog, OrderPhone, Price};
use vitrina_storefront::{
    catalog::{CatalogLoadError, load_catalog},
    config::{CatalogSource, LogFormat, StorefrontConfig},
    state::AppState,
};

/// Destination number configured for every test server.
pub const ORDER_PHONE: &str = "18095550100";

/// Catalog used by most tests.
///
/// Five products are featured; the home page shows only the first four.
pub const TEST_CATALOG: &str = r#"[
    {"id": 1, "nombre": "Vestido Rojo", "precio": 1200, "imagen": "https://img.example/1.jpg", "categoria": "Vestidos", "tallas": ["S", "M"], "destacado": true},
    {"id": 2, "nombre": "Blusa Blanca", "precio": 600, "imagen": "https://img.example/2.jpg", "categoria": "Blusas", "destacado": true},
    {"id": 3, "nombre": "Vestido Largo", "precio": 5000, "imagen": "https://img.example/3.jpg", "categoria": "Vestidos", "tallas": ["M", "L"]},
    {"id": 4, "nombre": "Bufanda", "precio": 250, "imagen": "https://img.example/4.jpg", "categoria": "Accesorios", "destacado": true},
    {"id": 5, "nombre": "Falda Plisada", "precio": 900, "imagen": "https://img.example/5.jpg", "categoria": "Faldas", "destacado": true},
    {"id": 6, "nombre": "Chaqueta", "precio": 2500, "imagen": "https://img.example/6.jpg", "categoria": "Abrigos", "destacado": true}
]"#;

/// A running storefront and a client bound to one visitor session.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Spawn a storefront serving [`TEST_CATALOG`].
    pub async fn new() -> Self {
        let catalog = Catalog::from_json(TEST_CATALOG).expect("test catalog is valid");
        Self::spawn(Ok(catalog)).await
    }

    /// Spawn a storefront whose catalog failed to load.
    pub async fn with_failed_catalog() -> Self {
        let missing = CatalogSource::File(PathBuf::from("/nonexistent/vitrina/productos.json"));
        let result = load_catalog(&missing).await;
        assert!(result.is_err(), "catalog load should fail");
        Self::spawn(result).await
    }

    async fn spawn(catalog: Result<Catalog, CatalogLoadError>) -> Self {
        let state = AppState::new(test_config(), catalog);
        let app = vitrina_storefront::app(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server error");
        });

        Self {
            client: Self::visitor(),
            base_url: format!("http://{addr}"),
        }
    }

    /// A fresh client: its own cookie jar, redirects not followed.
    #[must_use]
    pub fn visitor() -> Client {
        Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .expect("Failed to create HTTP client")
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    /// GET as htmx would issue it.
    pub async fn htmx_get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .header("HX-Request", "true")
            .header("HX-Current-URL", self.url("/catalogo"))
            .send()
            .await
            .expect("htmx GET request failed")
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request failed")
    }

    /// POST as htmx would issue it.
    pub async fn htmx_post(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url(path))
            .header("HX-Request", "true")
            .form(form)
            .send()
            .await
            .expect("htmx POST request failed")
    }

    /// Add one unit of `id` through the htmx endpoint.
    pub async fn add_to_cart(&self, id: &str) {
        let resp = self.htmx_post("/cart/add", &[("product_id", id)]).await;
        assert_eq!(resp.status(), reqwest::StatusCode::NO_CONTENT);
    }

    /// Body of the cart panel fragment.
    pub async fn cart_panel(&self) -> String {
        self.htmx_get("/cart").await.text().await.expect("cart body")
    }

    /// Badge value from the cart count fragment.
    pub async fn cart_count(&self) -> u32 {
        let body = self.htmx_get("/cart/count").await.text().await.expect("count body");
        let start = body.find('>').expect("badge markup") + 1;
        let end = body.rfind("</span>").expect("badge markup");
        body.get(start..end)
            .and_then(|count| count.trim().parse().ok())
            .expect("badge value")
    }
}

/// Product card names in document order.
#[must_use]
pub fn card_names(body: &str) -> Vec<String> {
    const MARKER: &str = r#"class="product-card__name">"#;

    body.match_indices(MARKER)
        .filter_map(|(start, _)| {
            let rest = body.get(start + MARKER.len()..)?;
            let end = rest.find("</h3>")?;
            rest.get(..end).map(str::to_owned)
        })
        .collect()
}

fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().expect("valid host"),
        port: 0,
        base_url: "http://localhost".to_string(),
        catalog_source: CatalogSource::File(PathBuf::from("unused.json")),
        static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront/static")),
        shop_name: "Tienda Prueba".to_string(),
        order_phone: OrderPhone::parse(ORDER_PHONE).expect("valid phone"),
        price_ceiling: Price::from_whole(10_000),
        log_format: LogFormat::Pretty,
        sentry_dsn: None,
        sentry_environment: None,
    }
}
