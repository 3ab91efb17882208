//! Products

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Read-only snapshot of a catalog product.
///
/// Snapshots are owned by the catalog provider and copied into cart items.
/// A cart's copy is only refreshed through an explicit catalog sync, never
/// behind the cart's back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    /// Unique product identifier
    pub id: u64,

    /// Product name
    pub name: String,

    /// Price per unit, non-negative
    pub unit_price: Decimal,

    /// Units currently in stock
    pub available_quantity: u32,

    /// Whether the product can be purchased at all
    #[serde(rename = "availability")]
    pub available: bool,
}

impl ProductSnapshot {
    /// Create a purchasable snapshot with the given identity, price and stock.
    #[must_use]
    pub fn new(
        id: u64,
        name: impl Into<String>,
        unit_price: Decimal,
        available_quantity: u32,
    ) -> Self {
        ProductSnapshot {
            id,
            name: name.into(),
            unit_price,
            available_quantity,
            available: true,
        }
    }

    /// Whether a persisted snapshot is structurally sound (non-negative unit
    /// price). Snapshots failing this check are discarded at load time.
    pub(crate) fn is_well_formed(&self) -> bool {
        self.unit_price >= Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn new_snapshot_is_available() {
        let product = ProductSnapshot::new(1, "Lamp", Decimal::from(1000), 5);

        assert!(product.available);
        assert_eq!(product.available_quantity, 5);
    }

    #[test]
    fn negative_price_is_malformed() {
        let mut product = ProductSnapshot::new(1, "Lamp", Decimal::from(1000), 5);
        product.unit_price = Decimal::from(-1);

        assert!(!product.is_well_formed());
    }

    #[test]
    fn serializes_with_storefront_keys() -> TestResult {
        let product = ProductSnapshot::new(7, "Lamp", Decimal::from(250), 3);

        let json = serde_json::to_value(&product)?;

        assert_eq!(json["unitPrice"], serde_json::json!("250"));
        assert_eq!(json["availableQuantity"], serde_json::json!(3));
        assert_eq!(json["availability"], serde_json::json!(true));

        Ok(())
    }
}
