//! Session-stored models for storefront.

pub mod session;

pub use session::{Flash, FlashLevel, keys as session_keys};
