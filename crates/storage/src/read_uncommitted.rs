//! Read-uncommitted store without write isolation
//!
//! A single `RwLock` guards the key map, the transaction id counter and the
//! undo logs. Writes are applied in place and are visible to every reader
//! immediately, committed or not. Nothing tracks which transaction owns a
//! key, so two transactions may overwrite each other's uncommitted writes.
//!
//! | Operation | Lock | Blocks on other transactions |
//! |-----------|------|------------------------------|
//! | `begin_tx` | write | no |
//! | `set` / `delete` | write | no |
//! | `get` | read | no |
//! | `commit` / `rollback` | write | no |

use interleave_core::{
    Error, IsolationLevel, Key, Result, StoreSnapshot, TransactionalStore, TxnId, Value,
};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::undo::UndoLog;

/// State guarded by the store's global lock
#[derive(Debug)]
struct KvState {
    data: FxHashMap<Key, Value>,
    next_txn_id: TxnId,
    /// Undo log per active transaction. Presence means "active".
    undo_logs: FxHashMap<TxnId, UndoLog>,
}

impl KvState {
    fn undo_log_mut(&mut self, txn: TxnId) -> Result<&mut UndoLog> {
        self.undo_logs
            .get_mut(&txn)
            .ok_or(Error::TransactionNotActive(txn))
    }
}

/// Transactional store with no write isolation
///
/// Used to let anomalies manifest: concurrent `set`s to the same key race
/// freely, which is the precondition for dirty writes.
///
/// Transactions that begin but never commit or roll back keep their undo
/// log until the store is dropped. `StoreSnapshot::active_transactions`
/// makes such abandoned transactions visible.
#[derive(Debug)]
pub struct ReadUncommittedStore {
    state: RwLock<KvState>,
}

impl ReadUncommittedStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::with_data(std::iter::empty())
    }

    /// Create a store whose key map starts with `initial`, already committed
    pub fn with_data(initial: impl IntoIterator<Item = (Key, Value)>) -> Self {
        ReadUncommittedStore {
            state: RwLock::new(KvState {
                data: initial.into_iter().collect(),
                next_txn_id: TxnId::FIRST,
                undo_logs: FxHashMap::default(),
            }),
        }
    }

    /// Check whether `txn` has begun and not yet committed or rolled back
    pub fn is_active(&self, txn: TxnId) -> bool {
        self.state.read().undo_logs.contains_key(&txn)
    }

    /// Number of transactions that have begun and not finished
    pub fn active_transactions(&self) -> usize {
        self.state.read().undo_logs.len()
    }

    /// Current value of `key`, outside of any transaction
    pub fn value(&self, key: Key) -> Value {
        self.state.read().data.get(&key).copied().unwrap_or_default()
    }
}

impl Default for ReadUncommittedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionalStore for ReadUncommittedStore {
    fn begin_tx(&self, isolation: IsolationLevel) -> Result<TxnId> {
        if isolation != IsolationLevel::ReadUncommitted {
            return Err(Error::UnsupportedIsolation(isolation));
        }

        let mut state = self.state.write();
        let txn = state.next_txn_id;
        state.next_txn_id = txn.next();
        state.undo_logs.insert(txn, UndoLog::new());

        debug!(target: "interleave::store", txn_id = %txn, %isolation, "Transaction started");
        Ok(txn)
    }

    fn set(&self, txn: TxnId, key: Key, value: Value) -> Result<()> {
        let mut state = self.state.write();
        let previous = state.data.get(&key).copied();
        state.undo_log_mut(txn)?.record_set(key, previous);
        state.data.insert(key, value);

        trace!(target: "interleave::store", txn_id = %txn, key, value, ?previous, "set");
        Ok(())
    }

    fn get(&self, txn: TxnId, key: Key) -> Result<Value> {
        let value = self.state.read().data.get(&key).copied().unwrap_or_default();

        trace!(target: "interleave::store", txn_id = %txn, key, value, "get");
        Ok(value)
    }

    fn delete(&self, txn: TxnId, key: Key) -> Result<()> {
        let mut state = self.state.write();
        let previous = state.data.get(&key).copied();
        state.undo_log_mut(txn)?.record_delete(key, previous);
        state.data.remove(&key);

        trace!(target: "interleave::store", txn_id = %txn, key, ?previous, "delete");
        Ok(())
    }

    fn commit(&self, txn: TxnId) -> Result<()> {
        let mut state = self.state.write();
        let log = state
            .undo_logs
            .remove(&txn)
            .ok_or(Error::TransactionNotActive(txn))?;

        debug!(target: "interleave::store", txn_id = %txn, writes = log.len(), "Transaction committed");
        Ok(())
    }

    fn rollback(&self, txn: TxnId) -> Result<()> {
        let mut state = self.state.write();
        let log = state
            .undo_logs
            .remove(&txn)
            .ok_or(Error::TransactionNotActive(txn))?;
        let undone = log.replay(&mut state.data);

        debug!(target: "interleave::store", txn_id = %txn, undone, "Transaction rolled back");
        Ok(())
    }

    fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.read();
        StoreSnapshot {
            data: state.data.iter().map(|(k, v)| (*k, *v)).collect(),
            undo_log_lengths: state
                .undo_logs
                .iter()
                .map(|(txn, log)| (*txn, log.len()))
                .collect(),
            next_txn_id: state.next_txn_id.as_u64(),
            row_locks: Default::default(),
        }
    }
}
