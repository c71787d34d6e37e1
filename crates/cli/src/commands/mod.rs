//! CLI subcommands.

pub mod catalog;
pub mod order;

use thiserror::Error;
use vitrina_core::OrderError;
use vitrina_storefront::catalog::CatalogLoadError;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The catalog could not be loaded or is invalid.
    #[error(transparent)]
    Catalog(#[from] CatalogLoadError),

    /// A price argument is not a non-negative amount.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// The order message could not be built.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// JSON output failed.
    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}
