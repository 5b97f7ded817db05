//! Core types and traits for interleave
//!
//! This crate defines the foundational types used throughout the harness:
//! - TxnId: Opaque, monotonically increasing transaction identifier
//! - Key / Value: The scalar key and value types of the store
//! - IsolationLevel: Isolation level requested at `begin_tx`
//! - StoreSnapshot: Serializable point-in-time view of a store, for debugging
//! - Error: Error type for store calls
//! - Traits: The `TransactionalStore` capability consumed by the executor

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::TransactionalStore;
pub use types::{IsolationLevel, Key, StoreSnapshot, TxnId, Value};
