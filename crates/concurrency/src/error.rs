//! Error types for barrier usage
//!
//! Both variants indicate a malformed scenario rather than a runtime
//! condition. Callers are expected to treat them as fatal.

use thiserror::Error;

/// Result type alias for barrier operations
pub type Result<T> = std::result::Result<T, BarrierError>;

/// Barrier misuse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BarrierError {
    /// The barrier was already signaled once
    #[error("Barrier {0:?} signaled more than once")]
    AlreadySignaled(String),

    /// No barrier with this name was registered
    #[error("Barrier {0:?} is not registered")]
    Unknown(String),
}
