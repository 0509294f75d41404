//! `shopfront-core` — shared domain building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no logging setup):
//! the error model, sequential identifiers and the money value object.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{IdSequence, OrderId, ProductId};
pub use value_object::{Money, ValueObject};
