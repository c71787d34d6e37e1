//! Session-related types.
//!
//! Everything a visitor carries between page loads lives under one of the
//! fixed keys below.

use serde::{Deserialize, Serialize};

/// Severity of a flash notice, mirrored by the toast styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    #[default]
    Success,
    Info,
    Error,
}

impl FlashLevel {
    /// CSS modifier / htmx event level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

/// One-shot notice shown on the next full page render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Info,
            message: message.into(),
        }
    }
}

/// Session keys for visitor state.
pub mod keys {
    /// Key for the persisted cart (serialized line array).
    pub const CART: &str = "cart";

    /// Key for the cross-page category marker.
    pub const PENDING_FILTER: &str = "pending_filter";

    /// Key for the one-shot flash notice.
    pub const FLASH: &str = "flash";
}
