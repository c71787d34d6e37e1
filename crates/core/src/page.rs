//! Page detection and the cross-page filter signal.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

/// The storefront's pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Home,
    Catalog,
    Contact,
}

impl PageKind {
    /// Work out which page a request path refers to.
    ///
    /// Matching is by substring so that `/catalogo`, `/catalogo.html` and
    /// `/tienda/catalogo/` all resolve to the catalog. `catalogo` and
    /// `contacto` are checked before the trailing-slash rule. This
    /// deliberately reverses the legacy site's order, where the home rule
    /// came first and `/catalogo/` resolved to home.
    ///
    /// ```
    /// use vitrina_core::PageKind;
    ///
    /// assert_eq!(PageKind::detect("/"), Some(PageKind::Home));
    /// assert_eq!(PageKind::detect("/index.html"), Some(PageKind::Home));
    /// assert_eq!(PageKind::detect("/catalogo.html"), Some(PageKind::Catalog));
    /// assert_eq!(PageKind::detect("/blog"), None);
    /// ```
    #[must_use]
    pub fn detect(path: &str) -> Option<Self> {
        if path.contains("catalogo") {
            Some(Self::Catalog)
        } else if path.contains("contacto") {
            Some(Self::Contact)
        } else if path.contains("index") || path == "/" || path.ends_with('/') {
            Some(Self::Home)
        } else {
            None
        }
    }

    /// Canonical route for the page.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Catalog => "/catalogo",
            Self::Contact => "/contacto",
        }
    }
}

/// A one-shot request, left by a referring page, to open the catalog with a
/// category already selected.
///
/// The catalog page is the single consumer: it takes the marker (removing it
/// from storage) on load, whether or not the category still exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingFilter {
    pub category: String,
}

impl PendingFilter {
    /// A marker for `category`, or `None` if it is blank.
    #[must_use]
    pub fn new(category: &str) -> Option<Self> {
        let category = category.trim();
        (!category.is_empty()).then(|| Self {
            category: category.to_owned(),
        })
    }

    /// The category to activate, if the catalog offers it.
    #[must_use]
    pub fn resolve(&self, catalog: &Catalog) -> Option<&str> {
        catalog
            .has_category(&self.category)
            .then_some(self.category.as_str())
    }
}
