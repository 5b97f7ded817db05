//! Core types for the interleave harness
//!
//! This module defines the foundational types:
//! - TxnId: Transaction identifier issued by a store at `begin_tx`
//! - Key / Value: Fixed scalar key and value types
//! - IsolationLevel: Isolation level requested by a transaction
//! - StoreSnapshot: Debug view of a store's full state

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Key type of the store
pub type Key = i64;

/// Value type of the store
///
/// An absent key reads as `Value::default()` (zero), never as an error.
pub type Value = i64;

/// Unique identifier for a store transaction
///
/// Issued by the store at `begin_tx`. Identifiers are monotonically
/// increasing within one store and start at 1. Once a transaction commits
/// or rolls back its identifier must not be used again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TxnId(u64);

impl TxnId {
    /// The first identifier a fresh store hands out
    pub const FIRST: TxnId = TxnId(1);

    /// Create a TxnId from its raw value
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The identifier that follows this one
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TxnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "txn-{}", self.0)
    }
}

/// Isolation level requested when a transaction begins
///
/// Both reference stores only implement `ReadUncommitted`; the other levels
/// exist so that scripts and configuration can name them and get a clear
/// `UnsupportedIsolation` error instead of silently weaker behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IsolationLevel {
    /// Reads observe uncommitted writes of other transactions
    #[default]
    ReadUncommitted,
    /// Reads observe only committed data
    ReadCommitted,
    /// Repeated reads of a key return the same value
    RepeatableRead,
    /// Equivalent to some serial execution
    Serializable,
}

impl IsolationLevel {
    /// Canonical name, as accepted by `FromStr` and configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            IsolationLevel::ReadUncommitted => "read_uncommitted",
            IsolationLevel::ReadCommitted => "read_committed",
            IsolationLevel::RepeatableRead => "repeatable_read",
            IsolationLevel::Serializable => "serializable",
        }
    }
}

impl fmt::Display for IsolationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IsolationLevel {
    type Err = Error;

    /// Accepts snake_case, SQL-style upper case with underscores or spaces
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "read_uncommitted" => Ok(IsolationLevel::ReadUncommitted),
            "read_committed" => Ok(IsolationLevel::ReadCommitted),
            "repeatable_read" => Ok(IsolationLevel::RepeatableRead),
            "serializable" => Ok(IsolationLevel::Serializable),
            _ => Err(Error::InvalidIsolationLevel(s.to_string())),
        }
    }
}

/// Point-in-time view of a store's full state
///
/// Produced by `TransactionalStore::snapshot` for trace output. Maps are
/// ordered so that serialized snapshots are stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Current contents of the key map, committed or not
    pub data: BTreeMap<Key, Value>,
    /// Number of pending undo actions per active transaction
    pub undo_log_lengths: BTreeMap<TxnId, usize>,
    /// Identifier the next `begin_tx` will hand out
    pub next_txn_id: u64,
    /// Row locks currently held, key -> owner (empty without row locking)
    pub row_locks: BTreeMap<Key, TxnId>,
}

impl StoreSnapshot {
    /// Value for a key as a reader would see it
    pub fn value(&self, key: Key) -> Value {
        self.data.get(&key).copied().unwrap_or_default()
    }

    /// Number of transactions that have begun but not finished
    pub fn active_transactions(&self) -> usize {
        self.undo_log_lengths.len()
    }
}
