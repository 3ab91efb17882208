//! Cart

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::{items::CartItem, products::ProductSnapshot};

/// Errors rejected at the cart boundary. All are validation failures: the
/// cart is left untouched whenever one is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A zero quantity was requested on an add operation. Negative
    /// quantities are unrepresentable at this boundary.
    #[error("requested quantity must be at least 1")]
    InvalidQuantity,

    /// The target product's availability flag is off.
    #[error("product \"{name}\" is not available")]
    ProductUnavailable {
        /// Name of the unavailable product
        name: String,
    },

    /// The requested quantity, merged with any quantity already in the cart,
    /// exceeds the product's available stock.
    #[error("requested {requested} of \"{name}\", but only {in_stock} in stock")]
    InsufficientStock {
        /// Name of the product short on stock
        name: String,

        /// Total quantity that was asked for, existing included
        requested: u32,

        /// Units currently in stock
        in_stock: u32,
    },

    /// No cart line references the given product identifier.
    #[error("product {0} is not in the cart")]
    ItemNotFound(u64),
}

/// Outcome of the read-only pre-checkout gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Whether the cart can proceed to checkout
    pub valid: bool,

    /// One human-readable entry per violated constraint
    pub errors: Vec<String>,
}

/// The cart aggregate: an ordered list of lines, unique by product
/// identifier, with totals always rederived from the lines.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartItem>,
    total_items: u32,
    total_price: Decimal,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Cart::default()
    }

    /// Rebuild a cart from already-sanitized lines, rederiving both totals.
    /// Duplicate product identifiers keep the first line only.
    pub(crate) fn from_sanitized_items(items: Vec<CartItem>) -> Self {
        let mut cart = Cart::default();

        for item in items {
            if cart.get(item.product_id()).is_none() {
                cart.items.push(item);
            }
        }

        cart.recompute_totals();
        cart
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.total_items
    }

    /// Sum of all line subtotals, rounded to 2 decimal places.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.total_price
    }

    /// Number of distinct lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the line for the given product, if present.
    #[must_use]
    pub fn get(&self, product_id: u64) -> Option<&CartItem> {
        self.items
            .iter()
            .find(|item| item.product_id() == product_id)
    }

    /// Add `quantity` units of `product`, merging with any existing line for
    /// the same product. On a merge the stored snapshot is refreshed to the
    /// one supplied here.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` is zero.
    /// - [`CartError::ProductUnavailable`]: the product cannot be purchased.
    /// - [`CartError::InsufficientStock`]: the merged quantity exceeds the
    ///   product's stock. The existing line is left untouched.
    pub fn add(&mut self, product: ProductSnapshot, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        if !product.available {
            return Err(CartError::ProductUnavailable { name: product.name });
        }

        let existing = self.get(product.id).map_or(0, CartItem::quantity);
        let merged = existing.saturating_add(quantity);

        if merged > product.available_quantity {
            return Err(CartError::InsufficientStock {
                name: product.name,
                requested: merged,
                in_stock: product.available_quantity,
            });
        }

        match self
            .items
            .iter_mut()
            .find(|item| item.product_id() == product.id)
        {
            Some(item) => {
                item.refresh_product(product);
                item.set_quantity(merged);
            }
            None => self.items.push(CartItem::new(product, quantity)),
        }

        self.recompute_totals();

        Ok(())
    }

    /// Remove the line for the given product. Returns whether a line was
    /// actually removed; removing an absent product is a no-op.
    pub fn remove(&mut self, product_id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product_id() != product_id);

        let removed = self.items.len() != before;

        if removed {
            self.recompute_totals();
        }

        removed
    }

    /// Set the quantity of an existing line. Callers handle `new_quantity`
    /// of zero by removing the line instead.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `new_quantity` is zero.
    /// - [`CartError::ItemNotFound`]: no line references `product_id`.
    /// - [`CartError::InsufficientStock`]: `new_quantity` exceeds the stock
    ///   recorded on the line's snapshot.
    pub fn set_quantity(&mut self, product_id: u64, new_quantity: u32) -> Result<(), CartError> {
        if new_quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let item = self
            .items
            .iter_mut()
            .find(|item| item.product_id() == product_id)
            .ok_or(CartError::ItemNotFound(product_id))?;

        if new_quantity > item.product().available_quantity {
            return Err(CartError::InsufficientStock {
                name: item.product().name.clone(),
                requested: new_quantity,
                in_stock: item.product().available_quantity,
            });
        }

        item.set_quantity(new_quantity);
        self.recompute_totals();

        Ok(())
    }

    /// Empty the cart and zero both totals.
    pub fn clear(&mut self) {
        self.items.clear();
        self.recompute_totals();
    }

    /// Read-only pre-checkout gate: reports one error per violated
    /// constraint without mutating any state.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let mut errors = Vec::new();

        if self.is_empty() {
            errors.push("the cart is empty".to_owned());
        }

        for item in &self.items {
            let product = item.product();

            if !product.available {
                errors.push(format!("\"{}\" is no longer available", product.name));
            } else if item.quantity() > product.available_quantity {
                errors.push(format!(
                    "\"{}\": requested {}, but only {} in stock",
                    product.name,
                    item.quantity(),
                    product.available_quantity
                ));
            }
        }

        ValidationReport {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Mutable access to the lines for catalog reconciliation.
    pub(crate) fn items_mut(&mut self) -> &mut Vec<CartItem> {
        &mut self.items
    }

    /// Rederive both totals from the line list.
    pub(crate) fn recompute_totals(&mut self) {
        self.total_items = self
            .items
            .iter()
            .fold(0, |acc, item| acc.saturating_add(item.quantity()));

        self.total_price = self
            .items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc + item.subtotal())
            .round_dp(2);
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn lamp() -> ProductSnapshot {
        ProductSnapshot::new(1, "Lamp", Decimal::from(1000), 5)
    }

    fn rug() -> ProductSnapshot {
        ProductSnapshot::new(2, "Rug", Decimal::new(2550, 2), 10)
    }

    #[test]
    fn add_new_product_appends_line() -> TestResult {
        let mut cart = Cart::new();

        cart.add(lamp(), 2)?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.total_price(), Decimal::from(2000));

        Ok(())
    }

    #[test]
    fn add_same_product_merges_quantities() -> TestResult {
        let mut cart = Cart::new();

        cart.add(lamp(), 2)?;
        cart.add(lamp(), 3)?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), 5);

        Ok(())
    }

    #[test]
    fn add_zero_quantity_is_rejected() {
        let mut cart = Cart::new();

        let result = cart.add(lamp(), 0);

        assert_eq!(result, Err(CartError::InvalidQuantity));
        assert!(cart.is_empty());
    }

    #[test]
    fn add_unavailable_product_is_rejected() {
        let mut product = lamp();
        product.available = false;

        let mut cart = Cart::new();
        let result = cart.add(product, 1);

        assert!(matches!(result, Err(CartError::ProductUnavailable { .. })));
        assert!(cart.is_empty());
    }

    #[test]
    fn add_over_stock_is_rejected() {
        let mut cart = Cart::new();

        let result = cart.add(lamp(), 6);

        assert_eq!(
            result,
            Err(CartError::InsufficientStock {
                name: "Lamp".to_owned(),
                requested: 6,
                in_stock: 5,
            })
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn merged_add_over_stock_leaves_existing_line_untouched() -> TestResult {
        let mut cart = Cart::new();
        cart.add(lamp(), 2)?;

        let result = cart.add(lamp(), 4);

        assert!(matches!(result, Err(CartError::InsufficientStock { .. })));
        assert_eq!(cart.total_items(), 2);

        Ok(())
    }

    #[test]
    fn merge_refreshes_stored_snapshot() -> TestResult {
        let mut cart = Cart::new();
        cart.add(lamp(), 1)?;

        let mut repriced = lamp();
        repriced.unit_price = Decimal::from(1200);
        cart.add(repriced, 1)?;

        let item = cart.get(1).ok_or("line missing")?;
        assert_eq!(item.product().unit_price, Decimal::from(1200));
        assert_eq!(cart.total_price(), Decimal::from(2400));

        Ok(())
    }

    #[test]
    fn remove_absent_product_is_a_noop() {
        let mut cart = Cart::new();

        assert!(!cart.remove(99));
        assert!(cart.is_empty());
    }

    #[test]
    fn remove_is_idempotent() -> TestResult {
        let mut cart = Cart::new();
        cart.add(lamp(), 2)?;

        assert!(cart.remove(1));
        let after_first = cart.clone();

        assert!(!cart.remove(1));
        assert_eq!(cart, after_first);

        Ok(())
    }

    #[test]
    fn set_quantity_updates_totals() -> TestResult {
        let mut cart = Cart::new();
        cart.add(lamp(), 2)?;

        cart.set_quantity(1, 4)?;

        assert_eq!(cart.total_items(), 4);
        assert_eq!(cart.total_price(), Decimal::from(4000));

        Ok(())
    }

    #[test]
    fn set_quantity_over_stock_is_rejected() -> TestResult {
        let mut cart = Cart::new();
        cart.add(lamp(), 2)?;

        let result = cart.set_quantity(1, 6);

        assert!(matches!(result, Err(CartError::InsufficientStock { .. })));
        assert_eq!(cart.total_items(), 2);

        Ok(())
    }

    #[test]
    fn set_quantity_on_absent_product_errors() {
        let mut cart = Cart::new();

        assert_eq!(cart.set_quantity(1, 2), Err(CartError::ItemNotFound(1)));
    }

    #[test]
    fn clear_zeroes_totals() -> TestResult {
        let mut cart = Cart::new();
        cart.add(lamp(), 2)?;
        cart.add(rug(), 1)?;

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn total_price_is_rounded_to_two_places() -> TestResult {
        let mut cart = Cart::new();
        let odd = ProductSnapshot::new(3, "Washer", Decimal::new(3333, 3), 10);

        cart.add(odd, 3)?;

        // 3 x 3.333 = 9.999, rounded to 10.00
        assert_eq!(cart.total_price(), Decimal::from(10));

        Ok(())
    }

    #[test]
    fn validate_empty_cart_fails() {
        let cart = Cart::new();

        let report = cart.validate();

        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn validate_reports_one_error_per_violation() -> TestResult {
        let mut cart = Cart::new();
        cart.add(lamp(), 2)?;
        cart.add(rug(), 1)?;

        // Simulate stale snapshots after a catalog change.
        for item in cart.items_mut() {
            let mut product = item.product().clone();
            if product.id == 1 {
                product.available = false;
            } else {
                product.available_quantity = 0;
            }
            item.refresh_product(product);
        }

        let report = cart.validate();

        assert!(!report.valid);
        assert_eq!(report.errors.len(), 2);

        Ok(())
    }

    #[test]
    fn validate_healthy_cart_passes() -> TestResult {
        let mut cart = Cart::new();
        cart.add(lamp(), 2)?;

        let report = cart.validate();

        assert!(report.valid);
        assert!(report.errors.is_empty());

        Ok(())
    }

    #[test]
    fn from_sanitized_items_drops_duplicate_ids() {
        let cart = Cart::from_sanitized_items(vec![
            CartItem::new(lamp(), 2),
            CartItem::new(lamp(), 3),
            CartItem::new(rug(), 1),
        ]);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total_items(), 3);
    }
}
