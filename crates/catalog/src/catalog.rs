//! The product registry.

use serde::{Deserialize, Serialize};

use shopfront_core::{DomainError, DomainResult, IdSequence, ProductId};

use crate::product::{NewProduct, Product};

/// Outcome of removing stock from a unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StockChange {
    /// The unit is still registered with this many units left.
    Remaining(u32),
    /// The unit hit zero and was removed from the catalog.
    Exhausted,
}

/// Name/category pair of a live unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub category: String,
}

/// Ordered registry of every live product unit, catalog and cart-reserved.
///
/// Units are kept in registration order; listings rely on it.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    ids: IdSequence,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::with_id_base(Self::DEFAULT_ID_BASE)
    }
}

impl Catalog {
    pub const DEFAULT_ID_BASE: u64 = 100_000;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id_base(base: u64) -> Self {
        Self {
            products: Vec::new(),
            ids: IdSequence::starting_at(base),
        }
    }

    /// Hand out a fresh product id.
    pub fn generate_id(&mut self) -> ProductId {
        self.ids.next_id()
    }

    /// Validate and register a new catalog unit.
    ///
    /// An id is only consumed when validation succeeds.
    pub fn add(&mut self, input: NewProduct) -> DomainResult<ProductId> {
        let product = Product::create(ProductId::new(self.ids.peek()), input)?;
        let id = self.generate_id();
        debug_assert_eq!(id, product.id_typed());
        self.register(product)?;
        Ok(id)
    }

    /// Append a unit to the live list.
    pub fn register(&mut self, product: Product) -> DomainResult<()> {
        if self.contains(product.id_typed()) {
            return Err(DomainError::invalid(format!(
                "product {} is already registered",
                product.id_typed()
            )));
        }
        tracing::info!(
            product_id = %product.id_typed(),
            parent_id = %product.parent_id(),
            name = product.name(),
            quantity = product.quantity(),
            "product registered"
        );
        self.products.push(product);
        Ok(())
    }

    /// Remove a unit by identity.
    pub fn delete(&mut self, id: ProductId) -> DomainResult<Product> {
        let idx = self
            .position(id)
            .ok_or_else(|| DomainError::not_found(format!("product {id} does not exist")))?;
        let removed = self.products.remove(idx);
        tracing::debug!(product_id = %id, "product removed from catalog");
        Ok(removed)
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id_typed() == id)
    }

    /// Like [`Catalog::get`] but missing units are a `NotFound` error.
    pub fn product(&self, id: ProductId) -> DomainResult<&Product> {
        self.get(id)
            .ok_or_else(|| DomainError::not_found(format!("product {id} does not exist")))
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.position(id).is_some()
    }

    /// The unreserved unit of the given lineage, if any.
    pub fn find_sibling_unreserved(&self, parent_id: ProductId) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.parent_id() == parent_id && !p.is_reserved())
    }

    /// Carve `quantity` units off `id` into a new linked unit.
    ///
    /// The new unit is unreserved; callers building a cart mark it with
    /// [`Catalog::set_reserved`]. The source is removed when the split takes
    /// all of its stock. On error nothing changes.
    pub fn split(&mut self, id: ProductId, quantity: u32) -> DomainResult<ProductId> {
        let source = self.product(id)?;
        if quantity == 0 {
            tracing::warn!(product_id = %id, "split rejected: quantity must be positive");
            return Err(DomainError::invalid("split quantity must be positive"));
        }
        if quantity > source.quantity() {
            tracing::warn!(
                product_id = %id,
                requested = quantity,
                available = source.quantity(),
                "split rejected: not enough stock"
            );
            return Err(DomainError::insufficient(quantity, source.quantity()));
        }

        let new_id = self.generate_id();
        let part = self.product(id)?.split_off(new_id, quantity);

        self.decrease_quantity(id, quantity)?;
        self.products.push(part);

        tracing::debug!(source_id = %id, new_id = %new_id, quantity, "product split");
        Ok(new_id)
    }

    /// Add `delta` units to a unit's stock.
    pub fn increase_quantity(&mut self, id: ProductId, delta: u32) -> DomainResult<u32> {
        if delta == 0 {
            return Err(DomainError::invalid("quantity delta must be positive"));
        }
        self.unit_mut(id)?.add_units(delta)
    }

    /// Remove `delta` units; removing the last unit deletes the product.
    pub fn decrease_quantity(&mut self, id: ProductId, delta: u32) -> DomainResult<StockChange> {
        if delta == 0 {
            return Err(DomainError::invalid("quantity delta must be positive"));
        }
        let available = self.product(id)?.quantity();
        if delta > available {
            return Err(DomainError::insufficient(delta, available));
        }
        if delta == available {
            self.delete(id)?;
            return Ok(StockChange::Exhausted);
        }
        Ok(StockChange::Remaining(self.unit_mut(id)?.remove_units(delta)))
    }

    pub fn set_reserved(&mut self, id: ProductId, reserved: bool) -> DomainResult<()> {
        self.unit_mut(id)?.set_reserved(reserved);
        Ok(())
    }

    /// Move all of `source`'s stock into `target` and remove `source`.
    ///
    /// Both units must share a lineage. Returns the target's new quantity.
    pub fn merge(&mut self, target: ProductId, source: ProductId) -> DomainResult<u32> {
        if target == source {
            return Err(DomainError::invalid("cannot merge a product into itself"));
        }
        let moved = {
            let t = self.product(target)?;
            let s = self.product(source)?;
            if !t.same_lineage(s) {
                return Err(DomainError::mismatch(format!(
                    "cannot combine product {source} with product {target} of a different lineage"
                )));
            }
            s.quantity()
        };

        let quantity = self.unit_mut(target)?.add_units(moved)?;
        self.delete(source)?;
        tracing::debug!(target_id = %target, source_id = %source, moved, "products merged");
        Ok(quantity)
    }

    /// Decrease `target` by `other`'s quantity; both must share a lineage.
    pub fn reduce_by(&mut self, target: ProductId, other: ProductId) -> DomainResult<StockChange> {
        let delta = {
            let t = self.product(target)?;
            let o = self.product(other)?;
            if !t.same_lineage(o) {
                return Err(DomainError::mismatch(format!(
                    "cannot subtract product {other} from product {target} of a different lineage"
                )));
            }
            o.quantity()
        };
        self.decrease_quantity(target, delta)
    }

    /// Unreserved units in registration order.
    pub fn available(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| !p.is_reserved())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Name and category of every live unit.
    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.products
            .iter()
            .map(|p| CatalogEntry {
                name: p.name().to_string(),
                category: p.category().to_string(),
            })
            .collect()
    }

    /// Total units across a lineage, reserved or not.
    pub fn lineage_quantity(&self, parent_id: ProductId) -> u64 {
        self.products
            .iter()
            .filter(|p| p.parent_id() == parent_id)
            .map(|p| u64::from(p.quantity()))
            .sum()
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.products.iter().position(|p| p.id_typed() == id)
    }

    fn unit_mut(&mut self, id: ProductId) -> DomainResult<&mut Product> {
        self.products
            .iter_mut()
            .find(|p| p.id_typed() == id)
            .ok_or_else(|| DomainError::not_found(format!("product {id} does not exist")))
    }
}
