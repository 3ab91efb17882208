//! Fixtures
//!
//! Shared builders for tests and demos.

use rust_decimal::Decimal;

use crate::products::ProductSnapshot;

/// A purchasable snapshot with a generated name.
#[must_use]
pub fn product(id: u64, unit_price: i64, stock: u32) -> ProductSnapshot {
    ProductSnapshot::new(id, format!("Product {id}"), Decimal::from(unit_price), stock)
}

/// A snapshot whose availability flag is off.
#[must_use]
pub fn unavailable_product(id: u64, unit_price: i64, stock: u32) -> ProductSnapshot {
    let mut snapshot = product(id, unit_price, stock);
    snapshot.available = false;
    snapshot
}
