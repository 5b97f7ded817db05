//! Error types for script execution.
//!
//! Only usage errors surface here. A store call that fails during execution
//! is logged by its worker and captured in the result store; it never aborts
//! the run.
//!
//! | Category | Variants | Raised |
//! |----------|----------|--------|
//! | Script usage | `DuplicateScript`, `DuplicateSignal`, `UnknownBarrier` | before any worker starts |
//! | System | `Spawn` | while starting workers |
//! | Configuration | `Config` | loading `ExecutorConfig` |

/// Executor errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Two scripts were created with the same name
    #[error("duplicate script name: {name}")]
    DuplicateScript {
        /// The repeated script name
        name: String,
    },

    /// A barrier is signaled by more than one operation
    #[error("barrier '{barrier}' is signaled by both '{first}' and '{second}'")]
    DuplicateSignal {
        /// The barrier signaled more than once
        barrier: String,
        /// Script holding the first signal
        first: String,
        /// Script holding the repeated signal
        second: String,
    },

    /// A script waits on a barrier nobody signals
    #[error("script '{script}' waits for barrier '{barrier}' which is never signaled")]
    UnknownBarrier {
        /// The awaited barrier
        barrier: String,
        /// Script that waits on it
        script: String,
    },

    /// The OS refused to start a worker thread
    #[error("failed to spawn worker for script '{script}': {reason}")]
    Spawn {
        /// Script whose worker failed to start
        script: String,
        /// Error reported by the OS
        reason: String,
    },

    /// Configuration could not be loaded
    #[error("config error: {0}")]
    Config(String),
}

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
