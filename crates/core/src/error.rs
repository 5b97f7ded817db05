//! Error types for store calls
//!
//! Store errors are never fatal to a running script: the executor logs them
//! and moves on to the next operation.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::types::{IsolationLevel, TxnId};
use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for transactional store calls
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The transaction was never begun, or already committed or rolled back
    #[error("Transaction {0} is not active")]
    TransactionNotActive(TxnId),

    /// The store does not implement the requested isolation level
    #[error("Isolation level {0} is not supported by this store")]
    UnsupportedIsolation(IsolationLevel),

    /// An isolation level name could not be parsed
    #[error("Invalid isolation level: {0:?}")]
    InvalidIsolationLevel(String),

    /// A script issued a store operation before its `begin_tx`
    #[error("No active transaction in script {script}")]
    NoActiveTransaction {
        /// Name of the script that issued the operation
        script: String,
    },
}
