//! Orders domain module.
//!
//! A customer's cart ([`Order`]) reserves stock out of the catalog and is frozen
//! at checkout. Every registered order lives in an [`OrderBook`].

pub mod book;
pub mod order;

pub use book::OrderBook;
pub use order::{CheckoutOutcome, Order, OrderLine, OrderStatus, OrderSummary};
