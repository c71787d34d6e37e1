//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_ORDER_PHONE` - Destination number for order messages (digits, country code first)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (default: <http://localhost:3000>)
//! - `STOREFRONT_CATALOG_SOURCE` - Catalog file path or http(s) URL
//!   (default: crates/storefront/static/data/productos.json)
//! - `STOREFRONT_STATIC_DIR` - Static asset directory (default: crates/storefront/static)
//! - `STOREFRONT_SHOP_NAME` - Shop name used in titles and order messages (default: Rosa's Shop)
//! - `STOREFRONT_PRICE_CEILING` - Default top of the price filter (default: 10000)
//! - `STOREFRONT_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;
use url::Url;
use vitrina_core::{OrderPhone, Price};

const DEFAULT_CATALOG_SOURCE: &str = "crates/storefront/static/data/productos.json";
const DEFAULT_STATIC_DIR: &str = "crates/storefront/static";
const DEFAULT_SHOP_NAME: &str = "Rosa's Shop";
const DEFAULT_PRICE_CEILING: &str = "10000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the product catalog is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// A JSON file on local disk.
    File(PathBuf),
    /// A JSON document fetched over HTTP(S).
    Url(Url),
}

impl FromStr for CatalogSource {
    type Err = url::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(Self::Url(Url::parse(s)?))
        } else {
            Ok(Self::File(PathBuf::from(s)))
        }
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `pretty` or `json`, got `{other}`")),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Catalog document location
    pub catalog_source: CatalogSource,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Shop name for page titles and the order greeting
    pub shop_name: String,
    /// Destination number for order messages
    pub order_phone: OrderPhone,
    /// Default top of the price filter
    pub price_ceiling: Price,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or_default::<IpAddr>("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env_or_default::<u16>("STOREFRONT_PORT", "3000")?;
        let base_url = get_env_or_default("STOREFRONT_BASE_URL", "http://localhost:3000");
        let catalog_source = parse_env_or_default::<CatalogSource>(
            "STOREFRONT_CATALOG_SOURCE",
            DEFAULT_CATALOG_SOURCE,
        )?;
        let static_dir = PathBuf::from(get_env_or_default(
            "STOREFRONT_STATIC_DIR",
            DEFAULT_STATIC_DIR,
        ));
        let shop_name = get_env_or_default("STOREFRONT_SHOP_NAME", DEFAULT_SHOP_NAME);

        let order_phone = OrderPhone::parse(&get_required_env("STOREFRONT_ORDER_PHONE")?)
            .map_err(|e| invalid("STOREFRONT_ORDER_PHONE", &e))?;

        let price_ceiling = parse_price_ceiling(&get_env_or_default(
            "STOREFRONT_PRICE_CEILING",
            DEFAULT_PRICE_CEILING,
        ))?;

        let log_format = parse_env_or_default::<LogFormat>("STOREFRONT_LOG_FORMAT", "pretty")?;

        Ok(Self {
            host,
            port,
            base_url,
            catalog_source,
            static_dir,
            shop_name,
            order_phone,
            price_ceiling,
            log_format,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS (secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| invalid(key, &e))
}

fn invalid(key: &str, error: &impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), error.to_string())
}

/// Parse the price ceiling: a positive decimal amount.
fn parse_price_ceiling(value: &str) -> Result<Price, ConfigError> {
    const KEY: &str = "STOREFRONT_PRICE_CEILING";

    let amount = value.trim().parse::<Decimal>().map_err(|e| invalid(KEY, &e))?;
    if amount <= Decimal::ZERO {
        return Err(invalid(KEY, &"must be greater than zero"));
    }
    Price::new(amount).map_err(|e| invalid(KEY, &e))
}
