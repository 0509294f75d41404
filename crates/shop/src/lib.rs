//! `shopfront` — the customer-facing service layer.
//!
//! [`Shop`] is the context object that owns the catalog and the order book;
//! create one per process (or per test) instead of relying on global state.

pub mod config;
pub mod context;
pub mod listing;
pub mod seed;
pub mod session;

pub use config::{ConfigError, ShopConfig};
pub use context::Shop;
pub use listing::{Listing, ListingField, ListingRow};
pub use seed::default_catalog;
pub use session::Session;
