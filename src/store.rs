//! Cart store

use std::fmt;

use tracing::warn;

use crate::{
    cart::{Cart, CartError, ValidationReport},
    notify::{NotificationSink, Severity},
    observer::CartObserver,
    products::ProductSnapshot,
    storage::{CartStorage, load_cart, persist_cart},
    sync::{SyncOutcome, sync_with_catalog},
};

/// The cart service object: owns the session's cart aggregate and runs every
/// public operation to completion as validate, mutate, recompute, persist,
/// notify.
///
/// Constructed once per session with its storage and notification ports
/// injected; external code never mutates the cart directly. Single-threaded
/// by design — the host environment serializes UI event handlers, so there
/// is exactly one writer and no locking.
pub struct CartStore<S, N> {
    cart: Cart,
    storage: S,
    sink: N,
    observers: Vec<Box<dyn CartObserver>>,
}

impl<S: fmt::Debug, N: fmt::Debug> fmt::Debug for CartStore<S, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("storage", &self.storage)
            .field("sink", &self.sink)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<S: CartStorage, N: NotificationSink> CartStore<S, N> {
    /// Create a store for a new session, reconstructing the cart from
    /// durable storage. Loading is lenient and never fails; a missing,
    /// unreadable or malformed record yields an empty cart.
    pub fn load(storage: S, sink: N) -> Self {
        let cart = load_cart(&storage);

        CartStore {
            cart,
            storage,
            sink,
            observers: Vec::new(),
        }
    }

    /// The current cart state.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The injected storage port.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The injected notification port.
    #[must_use]
    pub fn sink(&self) -> &N {
        &self.sink
    }

    /// Register an observer, notified synchronously after each successful
    /// mutation, in registration order.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Add one unit of `product` to the cart.
    ///
    /// # Errors
    ///
    /// See [`CartStore::add_item`].
    pub fn add_one(&mut self, product: ProductSnapshot) -> Result<(), CartError> {
        self.add_item(product, 1)
    }

    /// Add `quantity` units of `product`, merging with any existing line.
    /// The outcome, success or failure, is reported through the
    /// notification sink; on success the new state is persisted and emitted
    /// to observers.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` is zero.
    /// - [`CartError::ProductUnavailable`]: the product cannot be purchased.
    /// - [`CartError::InsufficientStock`]: the merged quantity exceeds the
    ///   product's stock; the cart is left untouched.
    pub fn add_item(&mut self, product: ProductSnapshot, quantity: u32) -> Result<(), CartError> {
        let name = product.name.clone();

        match self.cart.add(product, quantity) {
            Ok(()) => {
                self.sink
                    .notify(Severity::Success, "Added to cart", Some(&name));
                self.commit();
                Ok(())
            }
            Err(err) => {
                self.report_rejection(&err);
                Err(err)
            }
        }
    }

    /// Remove the line for the given product. Idempotent: removing an
    /// absent product is a silent no-op, with no notification and no
    /// persistence. A notification is emitted only when a line was actually
    /// removed.
    pub fn remove_item(&mut self, product_id: u64) -> bool {
        let name = self
            .cart
            .get(product_id)
            .map(|item| item.product().name.clone());

        if !self.cart.remove(product_id) {
            return false;
        }

        self.sink
            .notify(Severity::Info, "Removed from cart", name.as_deref());
        self.commit();

        true
    }

    /// Set the quantity of an existing line. A `new_quantity` of zero
    /// behaves exactly as [`CartStore::remove_item`].
    ///
    /// # Errors
    ///
    /// - [`CartError::ItemNotFound`]: no line references `product_id`. Not
    ///   reported through the sink — this is a caller bug, not a user
    ///   mistake.
    /// - [`CartError::InsufficientStock`]: `new_quantity` exceeds the stock
    ///   recorded on the line's snapshot; the cart is left untouched.
    pub fn update_quantity(&mut self, product_id: u64, new_quantity: u32) -> Result<(), CartError> {
        if new_quantity == 0 {
            self.remove_item(product_id);
            return Ok(());
        }

        match self.cart.set_quantity(product_id, new_quantity) {
            Ok(()) => {
                self.sink.notify(Severity::Success, "Cart updated", None);
                self.commit();
                Ok(())
            }
            Err(err) => {
                self.report_rejection(&err);
                Err(err)
            }
        }
    }

    /// Unconditionally empty the cart, persist the empty state and notify.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.sink.notify(Severity::Info, "Cart cleared", None);
        self.commit();
    }

    /// Read-only pre-checkout gate. Does not mutate, persist or notify.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        self.cart.validate()
    }

    /// Reconcile the cart against a batch of fresh catalog snapshots:
    /// refresh embedded products, reprice lines whose unit price changed,
    /// and drop lines whose product became unavailable.
    ///
    /// If any lines were dropped a single aggregate warning is emitted;
    /// price-only changes produce no notification. State is persisted
    /// exactly once regardless of how many lines changed.
    pub fn sync_with_catalog(&mut self, fresh: &[ProductSnapshot]) -> SyncOutcome {
        let outcome = sync_with_catalog(&mut self.cart, fresh);

        if !outcome.dropped.is_empty() {
            self.sink.notify(
                Severity::Warning,
                "Some items were removed from your cart",
                Some(&format!("No longer available: {}", outcome.dropped.join(", "))),
            );
        }

        self.commit();

        outcome
    }

    /// Persist the cart and emit the new state to observers. A persistence
    /// failure is logged and swallowed: the in-memory cart remains the
    /// source of truth for the session even while durability is broken.
    fn commit(&mut self) {
        if let Err(err) = persist_cart(&mut self.storage, &self.cart) {
            warn!(error = %err, "failed to persist cart; in-memory state kept");
        }

        for observer in &mut self.observers {
            observer.cart_changed(&self.cart);
        }
    }

    /// Report a validation rejection through the sink. [`CartError::ItemNotFound`]
    /// is deliberately silent: it signals a caller bug, not a user-correctable
    /// condition.
    fn report_rejection(&mut self, err: &CartError) {
        let title = match err {
            CartError::InvalidQuantity => "Invalid quantity",
            CartError::ProductUnavailable { .. } => "Product unavailable",
            CartError::InsufficientStock { .. } => "Insufficient stock",
            CartError::ItemNotFound(_) => return,
        };

        self.sink
            .notify(Severity::Error, title, Some(&err.to_string()));
    }
}
