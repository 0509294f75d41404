//! Catalog domain module.
//!
//! Owns the [`Product`] entity and the [`Catalog`] registry that every live
//! product unit belongs to. Stock moves between catalog units and cart
//! reservations only through the registry, so quantities stay conserved.

pub mod catalog;
pub mod product;

pub use catalog::{Catalog, CatalogEntry, StockChange};
pub use product::{NewProduct, Product};
