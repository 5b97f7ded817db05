//! # Interleave Executor
//!
//! Records transaction scripts and runs them concurrently, one OS thread per
//! script, against any [`TransactionalStore`]. Named barriers make the
//! interleaving deterministic, so a test can force the exact schedule that
//! exposes an isolation anomaly and then assert on what each read observed.
//!
//! ## Quick Start
//!
//! ```text
//! use interleave_executor::Executor;
//!
//! let mut executor = Executor::new(store.clone());
//! let t1 = executor.new_txn("txn1");
//! let t2 = executor.new_txn("txn2");
//!
//! t1.begin_tx().set(1, 100).signal("t1_wrote").wait_for("t2_read").rollback();
//! t2.begin_tx().wait_for("t1_wrote");
//! let dirty = t2.get(1);
//! t2.signal("t2_read").commit();
//!
//! let results = executor.execute(false)?;
//! assert_eq!(results.value(&dirty), 100);
//! ```
//!
//! ## Operations
//!
//! | Recorded with | Effect |
//! |---------------|--------|
//! | `begin_tx`, `commit`, `rollback` | Transaction boundaries |
//! | `set`, `set_computed`, `delete` | Writes |
//! | `get` | Read, captured under the returned [`ResultHandle`] |
//! | `signal`, `wait_for`, `wait_for_timeout` | Barrier scheduling |
//! | `dump_state` | Log a store snapshot |

#![warn(missing_docs)]

mod config;
mod error;
mod executor;
mod operation;
mod results;
mod script;

#[cfg(test)]
mod tests;

pub use config::{ExecutorConfig, CONFIG_FILE_NAME};
pub use error::{Error, Result};
pub use executor::Executor;
pub use operation::ComputeFn;
pub use results::{FailedOp, ResultHandle, ResultStore};
pub use script::Script;

// Store-facing types, so callers need only this crate to write scenarios
pub use interleave_core::{IsolationLevel, Key, StoreSnapshot, TransactionalStore, TxnId, Value};
