//! Catalog loading.
//!
//! The catalog is read exactly once, before the server starts listening.
//! There is no retry: a failed load leaves the storefront showing a blocking
//! notice until the process is restarted.

use std::path::PathBuf;

use thiserror::Error;
use tracing::instrument;
use vitrina_core::{Catalog, CatalogError};

use crate::config::CatalogSource;

/// Errors that can occur while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// The catalog file could not be read.
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog URL could not be fetched.
    #[error("failed to fetch catalog: {0}")]
    Http(#[from] reqwest::Error),

    /// The document is not a valid catalog.
    #[error("invalid catalog: {0}")]
    Invalid(#[from] CatalogError),
}

/// Load and validate the catalog from `source`.
///
/// # Errors
///
/// Returns an error if the source cannot be read or the document is invalid.
#[instrument(fields(source = %source))]
pub async fn load_catalog(source: &CatalogSource) -> Result<Catalog, CatalogLoadError> {
    let bytes = match source {
        CatalogSource::File(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|source| CatalogLoadError::Io {
                    path: path.clone(),
                    source,
                })?
        }
        CatalogSource::Url(url) => reqwest::get(url.clone())
            .await?
            .error_for_status()?
            .bytes()
            .await?
            .to_vec(),
    };

    let catalog = Catalog::from_slice(&bytes)?;
    tracing::info!(
        products = catalog.len(),
        categories = catalog.categories().len(),
        "Catalog loaded"
    );
    Ok(catalog)
}
