//! A customer's shopping session.

use shopfront_catalog::product::title_case;
use shopfront_core::{DomainError, DomainResult, OrderId, ProductId};
use shopfront_orders::{CheckoutOutcome, OrderLine, OrderStatus, OrderSummary};

use crate::context::Shop;
use crate::listing::{Listing, ListingField};

/// A named customer and their current order.
///
/// The session owns no state besides the order id; everything else is read
/// from the [`Shop`] on each call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    customer: String,
    order: OrderId,
}

impl Session {
    /// Start a session with a fresh, empty order.
    pub fn start(shop: &mut Shop, customer: &str) -> DomainResult<Self> {
        let customer = customer.trim();
        if customer.is_empty() {
            return Err(DomainError::invalid("missing customer name"));
        }
        let customer = title_case(customer);
        let order = shop.open_order();
        tracing::info!(customer = %customer, order_id = %order, "session started");
        Ok(Self { customer, order })
    }

    pub fn customer(&self) -> &str {
        &self.customer
    }

    pub fn order_id(&self) -> OrderId {
        self.order
    }

    pub fn browse(&self, shop: &Shop) -> Listing {
        shop.listing()
    }

    pub fn search(&self, shop: &Shop, field: ListingField, needle: &str) -> Listing {
        shop.listing().filter(field, needle)
    }

    pub fn add_to_cart(
        &self,
        shop: &mut Shop,
        product: ProductId,
        quantity: u32,
    ) -> DomainResult<ProductId> {
        shop.add_to_order(self.order, product, quantity)
    }

    pub fn view_cart(&self, shop: &Shop) -> DomainResult<Vec<OrderLine>> {
        shop.cart(self.order)
    }

    pub fn checkout(&self, shop: &mut Shop) -> DomainResult<CheckoutOutcome> {
        shop.checkout(self.order)
    }

    /// Replace the current order with a new one.
    ///
    /// Only allowed once the current order is checked out (or gone).
    pub fn start_new_order(&mut self, shop: &mut Shop) -> DomainResult<OrderId> {
        if let Some(current) = shop.orders().get(self.order) {
            if current.status() == OrderStatus::Open {
                return Err(DomainError::invalid(format!(
                    "order {} has not been checked out yet",
                    self.order
                )));
            }
        }
        self.order = shop.open_order();
        Ok(self.order)
    }

    /// Summary of the current order, e.g. after checkout.
    pub fn review(&self, shop: &Shop) -> DomainResult<OrderSummary> {
        shop.summary(self.order)
    }
}
