//! Starting stock.

use shopfront_catalog::NewProduct;
use shopfront_core::Money;

/// The store's stock on a fresh start.
pub fn default_catalog() -> Vec<NewProduct> {
    vec![
        NewProduct::new("Laptop", "Electronics", Money::from_cents(120_000), 10),
        NewProduct::new("Keyboard", "Electronics", Money::from_cents(7_500), 25),
        NewProduct::new("Mouse", "Electronics", Money::from_cents(3_000), 50),
        NewProduct::new("Desk Chair", "Furniture", Money::from_cents(15_000), 5),
    ]
}
