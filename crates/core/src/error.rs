//! Domain error model.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::id::{OrderId, ProductId};

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Validation failures (bad arguments, mismatched lineages) and business-rule
/// failures (stock, order state, missing records) share one enum so callers can
/// match on a single type. Stock exhaustion is not an error; see
/// `StockChange::Exhausted` in the catalog crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. empty name, zero quantity).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Two products of different lineages were combined.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// More units were requested than the source holds.
    #[error("insufficient stock: requested {requested}, only {available} available")]
    InsufficientStock { requested: u32, available: u32 },

    /// The order has been checked out and is frozen.
    #[error("order is already checked out (checkout date: {})", .checked_out_at.format("%Y-%m-%d"))]
    OrderClosed { checked_out_at: DateTime<Utc> },

    /// The order is not (or no longer) registered.
    #[error("order {0} does not exist")]
    OrderMissing(OrderId),

    /// A requested record was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// No unreserved catalog unit remains for a cart line's lineage.
    #[error("product {0} not found in catalog inventory; cannot validate stock")]
    InventoryMissing(ProductId),
}

impl DomainError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn mismatch(msg: impl Into<String>) -> Self {
        Self::TypeMismatch(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn insufficient(requested: u32, available: u32) -> Self {
        Self::InsufficientStock {
            requested,
            available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn order_closed_reports_checkout_date() {
        let at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
        let err = DomainError::OrderClosed { checked_out_at: at };
        assert_eq!(
            err.to_string(),
            "order is already checked out (checkout date: 2025-03-14)"
        );
    }

    #[test]
    fn insufficient_stock_names_both_quantities() {
        let err = DomainError::insufficient(51, 50);
        assert_eq!(
            err.to_string(),
            "insufficient stock: requested 51, only 50 available"
        );
    }

    #[test]
    fn missing_records_display_their_ids() {
        assert_eq!(
            DomainError::OrderMissing(OrderId::new(10000)).to_string(),
            "order 10000 does not exist"
        );
        assert!(
            DomainError::InventoryMissing(ProductId::new(100002))
                .to_string()
                .contains("100002")
        );
    }
}
