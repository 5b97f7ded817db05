//! Operations a script can record.
//!
//! Operations are pure data until a worker executes them. They fall into
//! two groups that mirror how a worker treats them:
//!
//! | Group | Variants | On failure |
//! |-------|----------|------------|
//! | Store | `BeginTx`, `Set`, `SetComputed`, `Get`, `Delete`, `Commit`, `Rollback` | logged, worker continues |
//! | Control | `Signal`, `WaitFor`, `DumpState` | usage error, worker panics |

use std::fmt;
use std::time::Duration;

use interleave_core::{Key, Value};

use crate::results::ResultStore;

/// Closure that computes a value to write from earlier reads.
///
/// Invoked by the worker when the operation executes, never at recording time.
pub type ComputeFn = Box<dyn FnOnce(&ResultStore) -> Value + Send + 'static>;

/// A call into the transactional store.
pub(crate) enum StoreOp {
    BeginTx,
    Set { key: Key, value: Value },
    SetComputed { key: Key, compute: ComputeFn },
    Get { key: Key },
    Delete { key: Key },
    Commit,
    Rollback,
}

/// One recorded step of a script.
pub(crate) enum Operation {
    Store(StoreOp),
    Signal {
        barrier: String,
    },
    WaitFor {
        barrier: String,
        timeout: Option<Duration>,
    },
    DumpState,
}

impl Operation {
    /// Barrier this operation signals, if any
    pub(crate) fn signaled_barrier(&self) -> Option<&str> {
        match self {
            Operation::Signal { barrier } => Some(barrier),
            _ => None,
        }
    }

    /// Barrier this operation waits on, if any
    pub(crate) fn awaited_barrier(&self) -> Option<&str> {
        match self {
            Operation::WaitFor { barrier, .. } => Some(barrier),
            _ => None,
        }
    }
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreOp::BeginTx => write!(f, "BEGIN_TX"),
            StoreOp::Set { key, value } => write!(f, "SET {} = {}", key, value),
            StoreOp::SetComputed { key, .. } => write!(f, "SET_COMPUTED {} = <computed>", key),
            StoreOp::Get { key } => write!(f, "GET {}", key),
            StoreOp::Delete { key } => write!(f, "DELETE {}", key),
            StoreOp::Commit => write!(f, "COMMIT"),
            StoreOp::Rollback => write!(f, "ROLLBACK"),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Store(op) => fmt::Display::fmt(op, f),
            Operation::Signal { barrier } => write!(f, "SIGNAL {}", barrier),
            Operation::WaitFor {
                barrier,
                timeout: None,
            } => write!(f, "WAIT_FOR {}", barrier),
            Operation::WaitFor {
                barrier,
                timeout: Some(timeout),
            } => write!(f, "WAIT_FOR {} (timeout {}ms)", barrier, timeout.as_millis()),
            Operation::DumpState => write!(f, "DUMP_STATE"),
        }
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Operation({})", self)
    }
}
