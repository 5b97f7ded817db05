//! Shared helpers for the integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::sync::{Arc, Once};
use std::time::Duration;

pub use interleave::{
    Executor, Key, ReadUncommittedStore, ResultStore, RowLockedStore, TransactionalStore, Value,
};

/// How long a script waits for a peer that may be blocked on a row lock.
///
/// Long enough that an unblocked peer always signals first, short enough
/// to keep the row-locked runs quick.
pub const LOCK_WAIT: Duration = Duration::from_millis(300);

static INIT_TRACING: Once = Once::new();

/// Route logs through the test writer so `cargo test -- --nocapture` shows them.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::INFO)
            .try_init();
    });
}

/// The two bundled store variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// No write synchronization
    Unsynchronized,
    /// Exclusive per-key write locks held until commit or rollback
    RowLocked,
}

/// Build a store of `kind` with `initial` already committed
pub fn create_store(kind: StoreKind, initial: &[(Key, Value)]) -> Arc<dyn TransactionalStore> {
    let initial = initial.iter().copied();
    match kind {
        StoreKind::Unsynchronized => Arc::new(ReadUncommittedStore::with_data(initial)),
        StoreKind::RowLocked => Arc::new(RowLockedStore::with_data(initial)),
    }
}

/// Executor over a fresh store, with the store kept for final-state checks
pub fn create_executor(
    kind: StoreKind,
    initial: &[(Key, Value)],
) -> (Arc<dyn TransactionalStore>, Executor) {
    init_tracing();
    let store = create_store(kind, initial);
    let executor = Executor::new(Arc::clone(&store));
    (store, executor)
}

/// Committed value of `key` once every script has finished
pub fn final_value(store: &Arc<dyn TransactionalStore>, key: Key) -> Value {
    store.snapshot().value(key)
}
