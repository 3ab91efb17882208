//! Observers

use crate::cart::Cart;

/// Observer of cart state, notified synchronously after each successful
/// mutation.
///
/// Observers receive the post-mutation cart in the exact order mutations
/// were invoked; the store never reorders or batches emissions across
/// distinct operations. Observers schedule their own re-rendering — the
/// callback must return promptly and must not call back into the store.
pub trait CartObserver {
    /// Called once per successful mutation with the new cart state.
    fn cart_changed(&mut self, cart: &Cart);
}

impl<F: FnMut(&Cart)> CartObserver for F {
    fn cart_changed(&mut self, cart: &Cart) {
        self(cart);
    }
}
