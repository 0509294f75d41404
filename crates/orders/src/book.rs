//! Registry of all orders.

use chrono::{DateTime, Utc};

use shopfront_core::{DomainError, DomainResult, IdSequence, OrderId};

use crate::order::Order;

/// Every registered order, in creation order.
///
/// An order that is not in the book "does not exist": lookups fail with
/// [`DomainError::OrderMissing`].
#[derive(Debug, Clone)]
pub struct OrderBook {
    orders: Vec<Order>,
    ids: IdSequence,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::with_id_base(Self::DEFAULT_ID_BASE)
    }
}

impl OrderBook {
    pub const DEFAULT_ID_BASE: u64 = 10_000;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id_base(base: u64) -> Self {
        Self {
            orders: Vec::new(),
            ids: IdSequence::starting_at(base),
        }
    }

    /// Register a new, empty order.
    pub fn open(&mut self, created_at: DateTime<Utc>) -> OrderId {
        let id = self.ids.next_id();
        self.orders.push(Order::new(id, created_at));
        tracing::info!(order_id = %id, "order opened");
        id
    }

    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id_typed() == id)
    }

    pub fn order(&self, id: OrderId) -> DomainResult<&Order> {
        self.get(id).ok_or(DomainError::OrderMissing(id))
    }

    pub fn order_mut(&mut self, id: OrderId) -> DomainResult<&mut Order> {
        self.orders
            .iter_mut()
            .find(|o| o.id_typed() == id)
            .ok_or(DomainError::OrderMissing(id))
    }

    pub fn contains(&self, id: OrderId) -> bool {
        self.get(id).is_some()
    }

    /// Remove an open order from the book.
    ///
    /// Checked-out orders are frozen and cannot be deleted.
    pub fn delete(&mut self, id: OrderId) -> DomainResult<Order> {
        self.order(id)?.ensure_open()?;
        let idx = self
            .orders
            .iter()
            .position(|o| o.id_typed() == id)
            .ok_or(DomainError::OrderMissing(id))?;
        let removed = self.orders.remove(idx);
        tracing::info!(order_id = %id, "order deleted");
        Ok(removed)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shopfront_catalog::{Catalog, NewProduct};
    use shopfront_core::Money;

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn open_hands_out_sequential_ids() {
        let mut book = OrderBook::new();
        let a = book.open(test_time());
        let b = book.open(test_time());

        assert_eq!(a, OrderId::new(10_000));
        assert_eq!(b, OrderId::new(10_001));
        assert_eq!(book.len(), 2);
        assert!(book.order(a).unwrap().is_empty());
    }

    #[test]
    fn deleted_order_no_longer_exists() {
        let mut book = OrderBook::new();
        let id = book.open(test_time());

        book.delete(id).unwrap();

        assert!(!book.contains(id));
        assert_eq!(book.order(id).unwrap_err(), DomainError::OrderMissing(id));
        assert_eq!(book.delete(id).unwrap_err(), DomainError::OrderMissing(id));
    }

    #[test]
    fn checked_out_order_cannot_be_deleted() {
        let mut catalog = Catalog::new();
        let mouse = catalog
            .add(NewProduct::new("Mouse", "Electronics", Money::from_cents(3000), 50))
            .unwrap();
        let mut book = OrderBook::new();
        let id = book.open(test_time());
        let order = book.order_mut(id).unwrap();
        order.add_product(&mut catalog, mouse, 1).unwrap();
        order.checkout(&catalog, test_time()).unwrap();

        assert!(matches!(
            book.delete(id),
            Err(DomainError::OrderClosed { .. })
        ));
        assert!(book.contains(id));
    }
}
