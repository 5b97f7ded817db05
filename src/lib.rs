//! Interleave - deterministic interleavings for transactional stores
//!
//! Interleave runs several transaction scripts at once, one OS thread each,
//! and uses named barriers to force a chosen interleaving. That makes
//! isolation anomalies (dirty writes, dirty reads, lost updates, write
//! cycles) reproducible as ordinary tests.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use interleave::{Executor, RowLockedStore};
//!
//! let store = Arc::new(RowLockedStore::new());
//! let mut executor = Executor::new(store.clone());
//!
//! let t1 = executor.new_txn("txn1");
//! let t2 = executor.new_txn("txn2");
//! t1.begin_tx().set(1, 100).signal("t1_wrote").commit();
//! t2.begin_tx().wait_for("t1_wrote");
//! let seen = t2.get(1);
//! t2.commit();
//!
//! let results = executor.execute(false)?;
//! assert_eq!(results.value(&seen), 100);
//! ```
//!
//! # Stores
//!
//! | Store | Writes | Rules out |
//! |-------|--------|-----------|
//! | [`ReadUncommittedStore`] | unsynchronized | nothing |
//! | [`RowLockedStore`] | exclusive per-key lock until commit/rollback | dirty writes |
//!
//! Any type implementing [`TransactionalStore`] can be driven the same way.

pub use interleave_executor::*;

pub use interleave_concurrency::{Barrier, BarrierError, BarrierRegistry};
pub use interleave_storage::{ReadUncommittedStore, RowLockTable, RowLockedStore, UndoAction, UndoLog};

/// Store error type, re-exported under a distinct name from the executor's `Error`
pub use interleave_core::Error as StoreError;
