//! Business logic services for storefront.
//!
//! # Services
//!
//! - `cart` - Session-backed cart store
//! - `signals` - Take-once session values (pending filter, flash notices)

pub mod cart;
pub mod signals;

pub use cart::CartSession;
