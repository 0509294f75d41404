use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopfront_catalog::Catalog;
use shopfront_core::{DomainError, DomainResult, Entity, Money, OrderId, ProductId};

/// Order status lifecycle. `CheckedOut` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Open,
    CheckedOut,
}

impl OrderStatus {
    /// Customer-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Open => "Pending",
            OrderStatus::CheckedOut => "Order completed",
        }
    }
}

/// Result of a checkout attempt that did not hard-fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Completed {
        order_id: OrderId,
        total: Money,
        checked_out_at: DateTime<Utc>,
    },
    /// Nothing to check out; the order is unchanged.
    EmptyCart,
}

/// One cart line with its computed total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

/// Point-in-time view of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub total: Money,
    pub line_count: usize,
    pub created_at: DateTime<Utc>,
    pub checked_out_at: Option<DateTime<Utc>>,
}

impl core::fmt::Display for OrderSummary {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Order: {}, {}, {}",
            self.total,
            self.status.label(),
            self.created_at.format("%Y-%m-%d")
        )
    }
}

/// A customer's cart.
///
/// Holds the ids of reserved product units; the units themselves live in the
/// [`Catalog`]. Mutators take the catalog explicitly and check
/// [`Order::ensure_open`] before touching anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: OrderId,
    lines: Vec<ProductId>,
    created_at: DateTime<Utc>,
    checked_out_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn new(id: OrderId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            lines: Vec::new(),
            created_at,
            checked_out_at: None,
        }
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn status(&self) -> OrderStatus {
        match self.checked_out_at {
            Some(_) => OrderStatus::CheckedOut,
            None => OrderStatus::Open,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn checked_out_at(&self) -> Option<DateTime<Utc>> {
        self.checked_out_at
    }

    /// Reserved unit ids in the order they were added.
    pub fn product_ids(&self) -> &[ProductId] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn contains(&self, unit: ProductId) -> bool {
        self.lines.contains(&unit)
    }

    pub fn is_modifiable(&self) -> bool {
        matches!(self.status(), OrderStatus::Open)
    }

    /// Precondition shared by every mutator.
    pub fn ensure_open(&self) -> DomainResult<()> {
        match self.checked_out_at {
            Some(checked_out_at) => Err(DomainError::OrderClosed { checked_out_at }),
            None => Ok(()),
        }
    }

    /// Reserve `quantity` units of a catalog product into this order.
    ///
    /// Returns the id of the new reserved unit.
    pub fn add_product(
        &mut self,
        catalog: &mut Catalog,
        product_id: ProductId,
        quantity: u32,
    ) -> DomainResult<ProductId> {
        self.ensure_open()?;

        let product = catalog.product(product_id)?;
        if product.is_reserved() {
            return Err(DomainError::invalid(format!(
                "product {product_id} is already reserved by a cart"
            )));
        }
        if quantity > product.quantity() {
            return Err(DomainError::insufficient(quantity, product.quantity()));
        }

        let unit = catalog.split(product_id, quantity).inspect_err(|err| {
            tracing::warn!(order_id = %self.id, product_id = %product_id, error = %err, "unable to add product");
        })?;
        catalog.set_reserved(unit, true)?;
        self.lines.push(unit);

        tracing::info!(order_id = %self.id, product_id = %product_id, unit_id = %unit, quantity, "product added to order");
        Ok(unit)
    }

    /// Drop a reserved unit from the order and hand its stock back.
    ///
    /// The unit is merged into the unreserved unit of its lineage when one
    /// exists; otherwise it becomes that lineage's catalog unit again.
    pub fn remove_product(&mut self, catalog: &mut Catalog, unit: ProductId) -> DomainResult<()> {
        self.ensure_open()?;

        let idx = self.position(unit)?;
        let parent_id = catalog.product(unit)?.parent_id();

        catalog.set_reserved(unit, false)?;
        self.lines.remove(idx);

        let sibling = catalog
            .available()
            .find(|p| p.parent_id() == parent_id && p.id_typed() != unit)
            .map(|p| p.id_typed());
        if let Some(sibling) = sibling {
            catalog.merge(sibling, unit)?;
        }

        tracing::info!(order_id = %self.id, unit_id = %unit, "product removed from order");
        Ok(())
    }

    /// Set a cart line to `new_quantity`, moving the difference to or from the
    /// unreserved unit of the same lineage.
    pub fn update_quantity(
        &mut self,
        catalog: &mut Catalog,
        unit: ProductId,
        new_quantity: u32,
    ) -> DomainResult<u32> {
        self.ensure_open()?;
        self.position(unit)?;

        let line = catalog.product(unit)?;
        let current = line.quantity();
        if new_quantity == 0 || new_quantity == current {
            return Err(DomainError::invalid(format!(
                "enter a valid quantity (current: {current}, requested: {new_quantity})"
            )));
        }

        let sibling = catalog
            .find_sibling_unreserved(line.parent_id())
            .ok_or(DomainError::InventoryMissing(line.parent_id()))?;
        if new_quantity > sibling.quantity() {
            return Err(DomainError::insufficient(new_quantity, sibling.quantity()));
        }
        let sibling = sibling.id_typed();

        // Credit before debit; the debit is bounded by the sibling check.
        if new_quantity > current {
            let delta = new_quantity - current;
            catalog.increase_quantity(unit, delta)?;
            catalog.decrease_quantity(sibling, delta)?;
        } else {
            let delta = current - new_quantity;
            catalog.increase_quantity(sibling, delta)?;
            catalog.decrease_quantity(unit, delta)?;
        }

        tracing::debug!(order_id = %self.id, unit_id = %unit, from = current, to = new_quantity, "cart quantity updated");
        Ok(new_quantity)
    }

    /// Empty the cart.
    ///
    /// Reserved units stay in the catalog, still reserved; their stock is not
    /// returned. Returns the number of units abandoned this way.
    pub fn clear_products(&mut self, catalog: &Catalog) -> DomainResult<u64> {
        self.ensure_open()?;

        let abandoned: u64 = self
            .lines
            .iter()
            .filter_map(|id| catalog.get(*id))
            .map(|p| u64::from(p.quantity()))
            .sum();
        self.lines.clear();

        if abandoned > 0 {
            tracing::warn!(order_id = %self.id, abandoned, "cart cleared without returning reserved stock");
        }
        Ok(abandoned)
    }

    /// Σ quantity × price over the current lines.
    pub fn total_price(&self, catalog: &Catalog) -> Money {
        self.lines
            .iter()
            .filter_map(|id| catalog.get(*id))
            .map(|p| p.line_total())
            .sum()
    }

    /// Freeze the order.
    ///
    /// A second checkout fails with the original timestamp; an empty cart is
    /// a soft failure that leaves the order open.
    pub fn checkout(&mut self, catalog: &Catalog, at: DateTime<Utc>) -> DomainResult<CheckoutOutcome> {
        self.ensure_open()?;

        if self.lines.is_empty() {
            tracing::warn!(order_id = %self.id, "unable to checkout: no product in cart");
            return Ok(CheckoutOutcome::EmptyCart);
        }

        self.checked_out_at = Some(at);
        let total = self.total_price(catalog);
        tracing::info!(order_id = %self.id, total = %total, "checkout successful");

        Ok(CheckoutOutcome::Completed {
            order_id: self.id,
            total,
            checked_out_at: at,
        })
    }

    pub fn lines(&self, catalog: &Catalog) -> Vec<OrderLine> {
        self.lines
            .iter()
            .filter_map(|id| catalog.get(*id))
            .map(|p| OrderLine {
                product_id: p.id_typed(),
                name: p.name().to_string(),
                category: p.category().to_string(),
                quantity: p.quantity(),
                unit_price: p.price(),
                line_total: p.line_total(),
            })
            .collect()
    }

    pub fn summary(&self, catalog: &Catalog) -> OrderSummary {
        OrderSummary {
            order_id: self.id,
            status: self.status(),
            total: self.total_price(catalog),
            line_count: self.lines.len(),
            created_at: self.created_at,
            checked_out_at: self.checked_out_at,
        }
    }

    fn position(&self, unit: ProductId) -> DomainResult<usize> {
        self.lines
            .iter()
            .position(|id| *id == unit)
            .ok_or_else(|| DomainError::not_found(format!("product {unit} not in order cart")))
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
