//! Trolley
//!
//! Trolley is the client-side shopping cart engine of an e-commerce
//! storefront: a single-writer in-process state store with quantity and
//! stock reconciliation, derived-total recomputation, durable key-value
//! persistence, catalog synchronization and a synchronous publish/subscribe
//! contract toward UI observers.

pub mod cart;
pub mod fixtures;
pub mod items;
pub mod notify;
pub mod observer;
pub mod prelude;
pub mod products;
pub mod storage;
pub mod store;
pub mod sync;
