//! Trolley prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, ValidationReport},
    items::CartItem,
    notify::{NotificationSink, NullSink, RecordingSink, Severity},
    observer::CartObserver,
    products::ProductSnapshot,
    storage::{CART_STORAGE_KEY, CartStorage, MemoryStorage, PersistError, StorageError},
    store::CartStore,
    sync::SyncOutcome,
};
