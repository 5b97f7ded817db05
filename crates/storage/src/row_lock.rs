//! Row-level exclusive write locks
//!
//! A row lock is an ownership token for one key, held by at most one live
//! transaction from its first write to that key until it commits or rolls
//! back. Per key:
//!
//! ```text
//! free ──first write by tx──▶ held(tx) ──commit/rollback of tx──▶ free
//! ```
//!
//! A write by any other transaction blocks on a condition variable until
//! the key is free. Re-acquiring a lock the transaction already holds
//! returns immediately.
//!
//! The table's own mutex is never held while a caller is parked: the
//! condition variable releases it for the duration of the wait.

use interleave_core::{Key, TxnId};
use parking_lot::{Condvar, Mutex};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeMap;
use tracing::{debug, trace};

#[derive(Debug, Default)]
struct LockState {
    /// key -> owning transaction
    owners: FxHashMap<Key, TxnId>,
    /// transaction -> keys it owns
    held: FxHashMap<TxnId, FxHashSet<Key>>,
}

/// Table of per-key exclusive locks
#[derive(Debug, Default)]
pub struct RowLockTable {
    state: Mutex<LockState>,
    released: Condvar,
}

impl RowLockTable {
    /// Create an empty lock table
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock on `key` for `txn`, blocking while another
    /// transaction holds it
    ///
    /// Returns immediately if `txn` already holds the lock.
    pub fn acquire(&self, txn: TxnId, key: Key) {
        let mut state = self.state.lock();

        let mut logged_wait = false;
        loop {
            match state.owners.get(&key).copied() {
                None => break,
                Some(owner) if owner == txn => {
                    trace!(target: "interleave::lock", txn_id = %txn, key, "Row lock already held");
                    return;
                }
                Some(owner) => {
                    if !logged_wait {
                        debug!(
                            target: "interleave::lock",
                            txn_id = %txn,
                            key,
                            holder = %owner,
                            "Blocking on row lock"
                        );
                        logged_wait = true;
                    }
                    self.released.wait(&mut state);
                }
            }
        }

        state.owners.insert(key, txn);
        state.held.entry(txn).or_default().insert(key);

        if logged_wait {
            debug!(target: "interleave::lock", txn_id = %txn, key, "Row lock acquired after wait");
        } else {
            trace!(target: "interleave::lock", txn_id = %txn, key, "Row lock acquired");
        }
    }

    /// Release every lock held by `txn` and wake all blocked writers
    ///
    /// Returns the number of locks released.
    pub fn release_all(&self, txn: TxnId) -> usize {
        let mut state = self.state.lock();
        let keys = state.held.remove(&txn).unwrap_or_default();
        for key in &keys {
            state.owners.remove(key);
        }
        drop(state);

        if !keys.is_empty() {
            self.released.notify_all();
            debug!(target: "interleave::lock", txn_id = %txn, released = keys.len(), "Row locks released");
        }
        keys.len()
    }

    /// Transaction currently holding the lock on `key`, if any
    pub fn holder(&self, key: Key) -> Option<TxnId> {
        self.state.lock().owners.get(&key).copied()
    }

    /// Keys locked by `txn`, in ascending order
    pub fn held_by(&self, txn: TxnId) -> Vec<Key> {
        let state = self.state.lock();
        let mut keys: Vec<Key> = state
            .held
            .get(&txn)
            .map(|keys| keys.iter().copied().collect())
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }

    /// All held locks, key -> owner
    pub fn snapshot(&self) -> BTreeMap<Key, TxnId> {
        let state = self.state.lock();
        state.owners.iter().map(|(k, t)| (*k, *t)).collect()
    }
}
