//! Durable storage

use mockall::automock;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{cart::Cart, items::CartItem};

/// Key under which the serialized cart is persisted.
pub const CART_STORAGE_KEY: &str = "storefront.cart";

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend rejected a write, e.g. because its quota is exhausted.
    #[error("storage quota exceeded")]
    QuotaExceeded,

    /// The backend could not be reached at all.
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while persisting the cart.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The cart could not be serialized.
    #[error("failed to serialize cart: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The backend rejected the write.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Synchronous string-keyed durable store, the browser local-storage analog.
///
/// Write-only on the hot path, read-only at startup; the cart store is its
/// single reader and single writer.
#[automock]
pub trait CartStorage {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejects the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejects the removal.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory [`CartStorage`] backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    records: FxHashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    /// Create a store preloaded with a single record, for seeding sessions.
    #[must_use]
    pub fn with_record(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut storage = MemoryStorage::default();
        storage.records.insert(key.into(), value.into());
        storage
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.records.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.records.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.records.remove(key);
        Ok(())
    }
}

/// Serialize the cart and write it under [`CART_STORAGE_KEY`].
///
/// # Errors
///
/// Returns a [`PersistError`] if serialization fails or the backend rejects
/// the write. Callers on the mutation hot path log and swallow this: the
/// in-memory cart stays authoritative even when durability is broken.
pub(crate) fn persist_cart<S: CartStorage>(storage: &mut S, cart: &Cart) -> Result<(), PersistError> {
    let serialized = serde_json::to_string(cart)?;
    storage.set(CART_STORAGE_KEY, &serialized)?;

    debug!(bytes = serialized.len(), "cart persisted");

    Ok(())
}

/// Reconstruct the cart persisted under [`CART_STORAGE_KEY`].
///
/// Loading is lenient and never fails: an unreadable backend, a missing
/// record or an unparseable envelope all yield an empty cart, and individual
/// lines failing structural validation (missing or malformed product,
/// non-numeric or non-positive quantity) are discarded silently. Persisted
/// totals and subtotals are never trusted; everything derived is recomputed
/// from the surviving lines.
pub(crate) fn load_cart<S: CartStorage>(storage: &S) -> Cart {
    let raw = match storage.get(CART_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Cart::new(),
        Err(err) => {
            warn!(error = %err, "could not read persisted cart; starting empty");
            return Cart::new();
        }
    };

    let Ok(envelope) = serde_json::from_str::<serde_json::Value>(&raw) else {
        warn!("persisted cart is not valid JSON; starting empty");
        return Cart::new();
    };

    let Some(raw_items) = envelope.get("items").and_then(serde_json::Value::as_array) else {
        warn!("persisted cart has no item list; starting empty");
        return Cart::new();
    };

    let mut items = Vec::with_capacity(raw_items.len());
    let mut discarded = 0_usize;

    for raw_item in raw_items {
        match serde_json::from_value::<CartItem>(raw_item.clone()) {
            Ok(item) if item.is_well_formed() => items.push(item.rederived()),
            _ => discarded += 1,
        }
    }

    if discarded > 0 {
        debug!(discarded, "discarded malformed cart lines at load");
    }

    Cart::from_sanitized_items(items)
}
