//! Storage layer for interleave
//!
//! This crate implements the two reference transactional stores:
//! - ReadUncommittedStore: one RwLock around the key map, no write isolation.
//!   Concurrent writers race freely, so dirty reads and dirty writes surface.
//! - RowLockedStore: the same store plus per-key exclusive write locks held
//!   until commit or rollback. Prevents dirty writes; reads stay uncommitted.
//!
//! Both keep a per-transaction undo log of tagged compensating actions
//! (`UndoAction`) that rollback replays newest-first.
//!
//! # Lock Ordering
//!
//! The row-locked store always takes a row lock before the global lock and
//! releases row locks before taking the global lock at commit/rollback.
//! Blocking on a row lock while holding the global lock would keep the
//! holder from committing, turning a transient block into a permanent hang.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod read_uncommitted;
pub mod row_lock;
pub mod row_locked;
pub mod undo;

pub use read_uncommitted::ReadUncommittedStore;
pub use row_lock::RowLockTable;
pub use row_locked::RowLockedStore;
pub use undo::{UndoAction, UndoLog};
