use serde::{Deserialize, Serialize};

use shopfront_core::{DomainError, DomainResult, Entity, Money, ProductId};

/// Input for registering a product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: Money,
    pub quantity: u32,
}

impl NewProduct {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: Money,
        quantity: u32,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
            quantity,
        }
    }
}

/// An inventory-bearing product unit.
///
/// Every unit carries the id of its lineage root, the catalog unit first
/// registered for the item. A root has `parent_id == id`; splits, cart
/// reservations and reservations handed back to the catalog keep the root's
/// id even after the root itself is gone.
/// Quantity is always positive; a unit whose stock reaches zero is removed
/// from the [`Catalog`](crate::Catalog) instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    parent_id: ProductId,
    name: String,
    category: String,
    price: Money,
    quantity: u32,
    reserved: bool,
}

impl Product {
    /// Validate `input` and build an unreserved catalog unit with the given id.
    pub(crate) fn create(id: ProductId, input: NewProduct) -> DomainResult<Self> {
        let name = normalize_label(&input.name, "product name")?;
        let category = normalize_label(&input.category, "product category")?;

        if input.price.is_zero() {
            return Err(DomainError::invalid("product price must be positive"));
        }
        if input.quantity == 0 {
            return Err(DomainError::invalid("product quantity must be a positive integer"));
        }

        Ok(Self {
            id,
            parent_id: id,
            name,
            category,
            price: input.price,
            quantity: input.quantity,
            reserved: false,
        })
    }

    /// Build a new unit of `quantity` in the same lineage as `self`.
    ///
    /// Does not touch `self`; the catalog deducts the stock afterwards.
    pub(crate) fn split_off(&self, id: ProductId, quantity: u32) -> Self {
        Self {
            id,
            parent_id: self.parent_id,
            name: self.name.clone(),
            category: self.category.clone(),
            price: self.price,
            quantity,
            reserved: false,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn parent_id(&self) -> ProductId {
        self.parent_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Whether this unit currently represents a cart reservation.
    pub fn is_reserved(&self) -> bool {
        self.reserved
    }

    /// `quantity × price`.
    pub fn line_total(&self) -> Money {
        self.price.times(self.quantity)
    }

    /// Same physical unit (ids match).
    pub fn same_unit(&self, other: &Product) -> bool {
        self.id == other.id
    }

    /// Same lineage (parent ids match).
    ///
    /// A catalog unit and every reservation split from it share a lineage,
    /// and so do two different reservations of the same catalog item.
    pub fn same_lineage(&self, other: &Product) -> bool {
        self.parent_id == other.parent_id
    }

    pub(crate) fn set_reserved(&mut self, reserved: bool) {
        self.reserved = reserved;
    }

    pub(crate) fn add_units(&mut self, delta: u32) -> DomainResult<u32> {
        self.quantity = self
            .quantity
            .checked_add(delta)
            .ok_or_else(|| DomainError::invalid("quantity overflow"))?;
        Ok(self.quantity)
    }

    /// Caller guarantees `delta < quantity`.
    pub(crate) fn remove_units(&mut self, delta: u32) -> u32 {
        debug_assert!(delta < self.quantity);
        self.quantity -= delta;
        self.quantity
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} - {}, {}pcs", self.name, self.price, self.quantity)
    }
}

/// Trim and title-case a label; empty labels are rejected.
pub(crate) fn normalize_label(raw: &str, what: &str) -> DomainResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid(format!("missing {what}")));
    }
    Ok(title_case(trimmed))
}

/// Upper-case the first letter of every word, lower-case the rest.
///
/// A "word" starts after any non-alphabetic character, so `o'neil` becomes
/// `O'Neil` and `usb-c hub` becomes `Usb-C Hub`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse() -> NewProduct {
        NewProduct::new("mouse", "electronics", Money::from_cents(3000), 50)
    }

    #[test]
    fn create_normalizes_labels() {
        let input = NewProduct::new("  desk CHAIR ", "furniture", Money::from_cents(15_000), 5);
        let product = Product::create(ProductId::new(1), input).unwrap();
        assert_eq!(product.name(), "Desk Chair");
        assert_eq!(product.category(), "Furniture");
        assert_eq!(product.parent_id(), product.id_typed());
        assert!(!product.is_reserved());
    }

    #[test]
    fn create_rejects_blank_name_and_category() {
        let blank_name = NewProduct::new("   ", "Electronics", Money::from_cents(100), 1);
        let err = Product::create(ProductId::new(1), blank_name).unwrap_err();
        assert_eq!(err, DomainError::invalid("missing product name"));

        let blank_category = NewProduct::new("Mouse", "", Money::from_cents(100), 1);
        let err = Product::create(ProductId::new(1), blank_category).unwrap_err();
        assert_eq!(err, DomainError::invalid("missing product category"));
    }

    #[test]
    fn create_rejects_zero_price_and_quantity() {
        let free = NewProduct::new("Mouse", "Electronics", Money::ZERO, 1);
        assert!(matches!(
            Product::create(ProductId::new(1), free),
            Err(DomainError::InvalidArgument(_))
        ));

        let empty = NewProduct::new("Mouse", "Electronics", Money::from_cents(100), 0);
        assert!(matches!(
            Product::create(ProductId::new(1), empty),
            Err(DomainError::InvalidArgument(_))
        ));
    }

    #[test]
    fn split_off_links_back_to_source() {
        let source = Product::create(ProductId::new(7), mouse()).unwrap();
        let part = source.split_off(ProductId::new(8), 5);
        assert_eq!(Entity::id(&part), ProductId::new(8));
        assert_eq!(part.parent_id(), ProductId::new(7));
        assert_eq!(part.quantity(), 5);
        assert_eq!(part.price(), source.price());
        assert_eq!(source.quantity(), 50);
    }

    #[test]
    fn split_of_a_split_keeps_the_root_lineage() {
        let root = Product::create(ProductId::new(7), mouse()).unwrap();
        let returned = root.split_off(ProductId::new(8), 50);
        let again = returned.split_off(ProductId::new(9), 5);

        assert_eq!(again.parent_id(), ProductId::new(7));
        assert!(again.same_lineage(&root));
        assert!(again.same_lineage(&returned));
    }

    #[test]
    fn unit_and_lineage_relations_differ() {
        let source = Product::create(ProductId::new(7), mouse()).unwrap();
        let a = source.split_off(ProductId::new(8), 1);
        let b = source.split_off(ProductId::new(9), 2);

        assert!(!a.same_unit(&b));
        assert!(a.same_lineage(&b));
        assert!(a.same_unit(&a));
        // A catalog unit is its own parent, so it shares a lineage with its splits.
        assert!(!source.same_unit(&a));
        assert!(source.same_lineage(&a));
    }

    #[test]
    fn display_matches_listing_shorthand() {
        let product = Product::create(ProductId::new(1), mouse()).unwrap();
        assert_eq!(product.to_string(), "Mouse - $30.00, 50pcs");
        assert_eq!(product.line_total(), Money::from_cents(150_000));
    }

    #[test]
    fn title_case_handles_punctuation() {
        assert_eq!(title_case("o'neil"), "O'Neil");
        assert_eq!(title_case("usb-c hub"), "Usb-C Hub");
        assert_eq!(title_case("LAPTOP"), "Laptop");
    }
}
