//! Strongly-typed identifiers used across the domain.
//!
//! Identifiers are sequential numbers handed out by an [`IdSequence`] owned by
//! the registry that creates the entity, so every id is unique per registry
//! and never reused.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a product unit (catalog or cart-reserved).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

/// Identifier of an order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

macro_rules! impl_sequential_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap a raw identifier value.
            ///
            /// Prefer ids handed out by an [`IdSequence`]; this exists for tests
            /// and for parsing.
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            pub const fn value(&self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u64> for $t {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for u64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| DomainError::invalid(format!("{}: {}", $name, e)))?;
                Ok(Self(value))
            }
        }
    };
}

impl_sequential_newtype!(ProductId, "ProductId");
impl_sequential_newtype!(OrderId, "OrderId");

/// Monotonically increasing id source.
///
/// The first id handed out is `base`; each call to [`IdSequence::next_id`]
/// advances by one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    pub fn starting_at(base: u64) -> Self {
        Self { next: base }
    }

    /// Hand out the next id.
    pub fn next_id<T: From<u64>>(&mut self) -> T {
        let id = self.next;
        self.next += 1;
        T::from(id)
    }

    /// The id the next call will return, without consuming it.
    pub fn peek(&self) -> u64 {
        self.next
    }
}
