//! Test modules for the executor crate.

use std::sync::Arc;

use interleave_storage::ReadUncommittedStore;

use crate::Executor;


/// Executor over a fresh store, with the store kept for inspection.
fn executor_with(store: ReadUncommittedStore) -> (Arc<ReadUncommittedStore>, Executor) {
    let store = Arc::new(store);
    let executor = Executor::new(store.clone());
    (store, executor)
}

fn create_test_executor() -> (Arc<ReadUncommittedStore>, Executor) {
    executor_with(ReadUncommittedStore::new())
}
