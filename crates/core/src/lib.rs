//! Vitrina Core - catalog, cart and filter logic.
//!
//! This crate holds everything about the storefront that can be reasoned about
//! without a browser or a server:
//! - `storefront` - axum server rendering pages from these types
//! - `cli` - catalog validation and order previews from the command line
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no sessions,
//! no HTTP clients. Persistence and rendering live in the storefront crate.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs and prices
//! - [`catalog`] - Products and the read-only catalog
//! - [`cart`] - Cart lines, merging and totals
//! - [`filter`] - Search/category/price/sort filter engine
//! - [`card`] - Product card view-model
//! - [`order`] - Order message formatting and the messaging link
//! - [`page`] - Page detection and the cross-page filter signal

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod card;
pub mod cart;
pub mod catalog;
pub mod filter;
pub mod order;
pub mod page;
pub mod types;

pub use card::ProductCard;
pub use cart::{Cart, CartLine};
pub use catalog::{Catalog, CatalogError, Product};
pub use filter::{FilterState, SortMode};
pub use order::{OrderError, OrderMessage, OrderPhone};
pub use page::{PageKind, PendingFilter};
pub use types::*;
