//! The transactional store capability
//!
//! This module defines the `TransactionalStore` trait consumed by the
//! executor. It lets the same scripts run against stores with different
//! write-isolation behavior without changing the scripts.

use crate::error::Result;
use crate::types::{IsolationLevel, Key, StoreSnapshot, TxnId, Value};

/// A transactional key-value store
///
/// Thread safety: every method may be called concurrently from any number
/// of worker threads (requires Send + Sync). Implementations may block the
/// calling thread, for example while waiting on a row lock held by another
/// transaction; blocking is a valid outcome, never an error.
pub trait TransactionalStore: Send + Sync {
    /// Begin a new transaction and return its identifier
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedIsolation` if the store does not implement
    /// `isolation`.
    fn begin_tx(&self, isolation: IsolationLevel) -> Result<TxnId>;

    /// Write `value` under `key` on behalf of `txn`
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotActive` if `txn` is not active.
    fn set(&self, txn: TxnId, key: Key, value: Value) -> Result<()>;

    /// Read the current value of `key`
    ///
    /// An absent key reads as zero.
    fn get(&self, txn: TxnId, key: Key) -> Result<Value>;

    /// Remove `key` on behalf of `txn`
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotActive` if `txn` is not active.
    fn delete(&self, txn: TxnId, key: Key) -> Result<()>;

    /// Make the writes of `txn` permanent and end it
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotActive` if `txn` is not active.
    fn commit(&self, txn: TxnId) -> Result<()>;

    /// Undo every write of `txn`, newest first, and end it
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotActive` if `txn` is not active.
    fn rollback(&self, txn: TxnId) -> Result<()>;

    /// Full state of the store, for trace output
    fn snapshot(&self) -> StoreSnapshot;
}
