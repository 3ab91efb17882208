//! Items

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::ProductSnapshot;

/// A cart line: a product snapshot copy, a positive quantity, and the
/// derived line subtotal.
///
/// The subtotal is recomputed on every mutation so that
/// `subtotal == quantity * product.unit_price` always holds once a public
/// cart operation has returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    product: ProductSnapshot,

    #[serde(rename = "quantite")]
    quantity: u32,

    #[serde(rename = "sousTotal")]
    subtotal: Decimal,
}

impl CartItem {
    /// Create a line for the given product and quantity, with the subtotal
    /// derived from the snapshot's unit price.
    #[must_use]
    pub fn new(product: ProductSnapshot, quantity: u32) -> Self {
        let subtotal = line_subtotal(&product, quantity);

        CartItem {
            product,
            quantity,
            subtotal,
        }
    }

    /// The embedded product snapshot.
    #[must_use]
    pub fn product(&self) -> &ProductSnapshot {
        &self.product
    }

    /// Identifier of the referenced product.
    #[must_use]
    pub fn product_id(&self) -> u64 {
        self.product.id
    }

    /// Units of the product in this line.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Derived line subtotal.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Replace the quantity and rederive the subtotal.
    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.subtotal = line_subtotal(&self.product, quantity);
    }

    /// Replace the embedded snapshot and rederive the subtotal against the
    /// new unit price. The quantity is preserved.
    pub(crate) fn refresh_product(&mut self, product: ProductSnapshot) {
        self.product = product;
        self.subtotal = line_subtotal(&self.product, self.quantity);
    }

    /// Whether a persisted line is structurally sound: positive quantity, a
    /// well-formed product, and nothing else worth keeping to decide on.
    pub(crate) fn is_well_formed(&self) -> bool {
        self.quantity > 0 && self.product.is_well_formed()
    }

    /// Rebuild a sanitized line from persisted parts, discarding the stored
    /// subtotal in favour of the derived one.
    pub(crate) fn rederived(self) -> Self {
        CartItem::new(self.product, self.quantity)
    }
}

/// Derive the subtotal for `quantity` units of `product`.
fn line_subtotal(product: &ProductSnapshot, quantity: u32) -> Decimal {
    product.unit_price * Decimal::from(quantity)
}
