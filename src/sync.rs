//! Catalog synchronization

use rustc_hash::FxHashMap;

use crate::{cart::Cart, products::ProductSnapshot};

/// What a catalog reconciliation pass did to the cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Lines whose snapshot was replaced by a fresh one
    pub refreshed: usize,

    /// Refreshed lines whose unit price changed
    pub repriced: usize,

    /// Names of lines dropped because their product became unavailable
    pub dropped: Vec<String>,
}

impl SyncOutcome {
    /// Whether the pass changed the cart at all.
    #[must_use]
    pub fn changed_anything(&self) -> bool {
        self.refreshed > 0 || !self.dropped.is_empty()
    }
}

/// Reconcile a cart against a batch of fresh catalog snapshots.
///
/// Lines matching a fresh snapshot get it embedded in place of their stale
/// copy, with the subtotal rederived against the new unit price and the
/// quantity preserved. Lines whose refreshed product is no longer available
/// are dropped. Lines absent from the batch are left untouched: the batch is
/// not assumed to cover the whole catalog.
///
/// Totals are rederived once, after the whole pass.
pub fn sync_with_catalog(cart: &mut Cart, fresh: &[ProductSnapshot]) -> SyncOutcome {
    let by_id: FxHashMap<u64, &ProductSnapshot> =
        fresh.iter().map(|product| (product.id, product)).collect();

    let mut outcome = SyncOutcome::default();

    cart.items_mut().retain_mut(|item| {
        let Some(fresh_product) = by_id.get(&item.product_id()) else {
            return true;
        };

        if !fresh_product.available {
            outcome.dropped.push(fresh_product.name.clone());
            return false;
        }

        if fresh_product.unit_price != item.product().unit_price {
            outcome.repriced += 1;
        }

        item.refresh_product((*fresh_product).clone());
        outcome.refreshed += 1;

        true
    });

    cart.recompute_totals();

    outcome
}
