//! Browsable listings of available products.

use serde::{Deserialize, Serialize};

use shopfront_catalog::Catalog;
use shopfront_core::{DomainError, DomainResult, ProductId};

/// Column a listing can be searched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingField {
    Name,
    Category,
}

impl core::str::FromStr for ListingField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(ListingField::Name),
            "category" => Ok(ListingField::Category),
            other => Err(DomainError::invalid(format!(
                "{other} does not exist in the product listing"
            ))),
        }
    }
}

/// One available product with its display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRow {
    /// Position in the unfiltered listing; stable across filtering.
    pub position: usize,
    pub product_id: ProductId,
    pub name: String,
    pub category: String,
    /// Formatted unit price, e.g. `$1,200.00`.
    pub price: String,
    pub quantity: u32,
}

impl ListingRow {
    fn field(&self, field: ListingField) -> &str {
        match field {
            ListingField::Name => &self.name,
            ListingField::Category => &self.category,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    rows: Vec<ListingRow>,
}

impl Listing {
    /// Snapshot of every unreserved unit, in catalog order.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let rows = catalog
            .available()
            .enumerate()
            .map(|(position, p)| ListingRow {
                position,
                product_id: p.id_typed(),
                name: p.name().to_string(),
                category: p.category().to_string(),
                price: p.price().to_string(),
                quantity: p.quantity(),
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[ListingRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose `field` contains `needle`, ignoring case.
    ///
    /// The needle is matched literally. Positions are kept so a selection made
    /// from a filtered listing still refers to the same row.
    pub fn filter(&self, field: ListingField, needle: &str) -> Listing {
        let needle = needle.to_lowercase();
        let rows = self
            .rows
            .iter()
            .filter(|row| row.field(field).to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Listing { rows }
    }

    /// Product at a displayed position.
    pub fn select(&self, position: usize) -> DomainResult<ProductId> {
        self.rows
            .iter()
            .find(|row| row.position == position)
            .map(|row| row.product_id)
            .ok_or_else(|| {
                DomainError::not_found(format!("product index '{position}' not in the current listing"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_catalog;

    fn seeded() -> Catalog {
        let mut catalog = Catalog::new();
        for item in default_catalog() {
            catalog.add(item).unwrap();
        }
        catalog
    }

    #[test]
    fn listing_shows_formatted_prices_in_order() {
        let listing = Listing::from_catalog(&seeded());
        let names: Vec<_> = listing.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Laptop", "Keyboard", "Mouse", "Desk Chair"]);
        assert_eq!(listing.rows()[0].price, "$1,200.00");
        assert_eq!(listing.rows()[3].quantity, 5);
    }

    #[test]
    fn reserved_units_are_not_listed() {
        let mut catalog = seeded();
        let mouse = catalog.available().nth(2).unwrap().id_typed();
        let part = catalog.split(mouse, 5).unwrap();
        catalog.set_reserved(part, true).unwrap();

        let listing = Listing::from_catalog(&catalog);
        assert_eq!(listing.len(), 4);
        assert_eq!(listing.rows()[2].quantity, 45);
    }

    #[test]
    fn filter_is_case_insensitive_and_literal() {
        let listing = Listing::from_catalog(&seeded());

        let electronics = listing.filter(ListingField::Category, "ELEC");
        assert_eq!(electronics.len(), 3);

        let chairs = listing.filter(ListingField::Name, "chair");
        assert_eq!(chairs.len(), 1);
        assert_eq!(chairs.rows()[0].position, 3);

        assert!(listing.filter(ListingField::Name, ".*").is_empty());
    }

    #[test]
    fn select_uses_listing_positions() {
        let listing = Listing::from_catalog(&seeded());
        let chairs = listing.filter(ListingField::Name, "desk");

        assert_eq!(chairs.select(3).unwrap(), listing.select(3).unwrap());
        assert!(matches!(chairs.select(0), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn listing_field_parses_known_columns() {
        assert_eq!("Name".parse::<ListingField>().unwrap(), ListingField::Name);
        assert_eq!("category".parse::<ListingField>().unwrap(), ListingField::Category);
        assert!("price".parse::<ListingField>().is_err());
    }
}
