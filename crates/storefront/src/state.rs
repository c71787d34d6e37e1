//! Application state shared across handlers.

use std::sync::Arc;

use vitrina_core::{Catalog, FilterState, Price};

use crate::catalog::CatalogLoadError;
use crate::config::StorefrontConfig;
use crate::error::AppError;

/// Outcome of the startup catalog load.
#[derive(Debug)]
enum CatalogStatus {
    Ready(Catalog),
    Failed,
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the read-only catalog.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogStatus,
}

impl AppState {
    /// Create a new application state from the startup catalog load.
    ///
    /// A failed load is kept rather than returned: the server still starts
    /// and every page shows the blocking catalog notice.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Result<Catalog, CatalogLoadError>) -> Self {
        let catalog = match catalog {
            Ok(catalog) => CatalogStatus::Ready(catalog),
            Err(e) => {
                tracing::error!(error = %e, source = %config.catalog_source, "Catalog load failed");
                CatalogStatus::Failed
            }
        };

        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CatalogUnavailable`] if the startup load failed.
    pub fn catalog(&self) -> Result<&Catalog, AppError> {
        match &self.inner.catalog {
            CatalogStatus::Ready(catalog) => Ok(catalog),
            CatalogStatus::Failed => Err(AppError::CatalogUnavailable),
        }
    }

    /// Whether the catalog loaded successfully.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self.inner.catalog, CatalogStatus::Ready(_))
    }

    /// Top of the price filter: the configured ceiling, raised to the most
    /// expensive product (rounded up to whole units) so that a reset always
    /// shows the whole catalog.
    #[must_use]
    pub fn price_ceiling(&self) -> Price {
        let configured = self.inner.config.price_ceiling;
        let Ok(catalog) = self.catalog() else {
            return configured;
        };

        let top = catalog.max_price();
        configured.max(Price::new(top.whole_units()).unwrap_or(top))
    }

    /// Filter state with every control at its default.
    #[must_use]
    pub fn default_filter(&self) -> FilterState {
        FilterState::new(self.price_ceiling())
    }
}
