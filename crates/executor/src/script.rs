//! Transaction script recorder.
//!
//! A [`Script`] is a named, ordered list of operations. Recording never
//! touches the store; the list is handed to a worker thread when the
//! executor runs.

use std::sync::Arc;
use std::time::Duration;

use interleave_core::{Key, Value};
use parking_lot::Mutex;
use tracing::warn;

use crate::operation::{Operation, StoreOp};
use crate::results::{ResultHandle, ResultStore};

#[derive(Default)]
struct ScriptState {
    ops: Vec<Operation>,
    next_index: usize,
    sealed: bool,
}

/// Handle for recording one transaction's operations.
///
/// Cloning is cheap; every clone records into the same list.
///
/// # Example
///
/// ```ignore
/// let t1 = executor.new_txn("txn1");
/// t1.begin_tx().set(1, 100).signal("txn1_wrote").commit();
/// let seen = t1.get(1);
/// ```
#[derive(Clone)]
pub struct Script {
    name: Arc<str>,
    state: Arc<Mutex<ScriptState>>,
}

impl Script {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            state: Arc::new(Mutex::new(ScriptState::default())),
        }
    }

    /// Name the script was created with
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of recorded operations
    pub fn len(&self) -> usize {
        self.state.lock().ops.len()
    }

    /// Check if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.state.lock().ops.is_empty()
    }

    /// One line per recorded operation, prefixed with its index
    pub fn describe(&self) -> Vec<String> {
        self.state
            .lock()
            .ops
            .iter()
            .enumerate()
            .map(|(i, op)| format!("{}: {}", i, op))
            .collect()
    }

    /// Start the script's transaction
    pub fn begin_tx(&self) -> &Self {
        self.push(Operation::Store(StoreOp::BeginTx));
        self
    }

    /// Write `value` under `key`
    pub fn set(&self, key: Key, value: Value) -> &Self {
        self.push(Operation::Store(StoreOp::Set { key, value }));
        self
    }

    /// Write a value computed when this operation executes
    ///
    /// `compute` receives the live result store, so it can resolve handles
    /// returned by earlier `get` calls on any script.
    pub fn set_computed<F>(&self, key: Key, compute: F) -> &Self
    where
        F: FnOnce(&ResultStore) -> Value + Send + 'static,
    {
        self.push(Operation::Store(StoreOp::SetComputed {
            key,
            compute: Box::new(compute),
        }));
        self
    }

    /// Read `key`; the returned handle resolves to the observed value
    pub fn get(&self, key: Key) -> ResultHandle {
        let op_index = self.push(Operation::Store(StoreOp::Get { key }));
        ResultHandle::new(Arc::clone(&self.name), op_index)
    }

    /// Delete `key`
    pub fn delete(&self, key: Key) -> &Self {
        self.push(Operation::Store(StoreOp::Delete { key }));
        self
    }

    /// Commit the script's transaction
    pub fn commit(&self) -> &Self {
        self.push(Operation::Store(StoreOp::Commit));
        self
    }

    /// Roll back the script's transaction
    pub fn rollback(&self) -> &Self {
        self.push(Operation::Store(StoreOp::Rollback));
        self
    }

    /// Satisfy the barrier `barrier`
    pub fn signal(&self, barrier: &str) -> &Self {
        self.push(Operation::Signal {
            barrier: barrier.to_string(),
        });
        self
    }

    /// Block until `barrier` is signaled
    pub fn wait_for(&self, barrier: &str) -> &Self {
        self.push(Operation::WaitFor {
            barrier: barrier.to_string(),
            timeout: None,
        });
        self
    }

    /// Block until `barrier` is signaled or `timeout` elapses
    ///
    /// The script continues either way.
    pub fn wait_for_timeout(&self, barrier: &str, timeout: Duration) -> &Self {
        self.push(Operation::WaitFor {
            barrier: barrier.to_string(),
            timeout: Some(timeout),
        });
        self
    }

    /// Log a snapshot of the store
    pub fn dump_state(&self) -> &Self {
        self.push(Operation::DumpState);
        self
    }

    /// Append `op` and return its index
    ///
    /// Once sealed the operation is dropped. Indices keep counting, so a late
    /// `get` yields a handle that never resolves.
    fn push(&self, op: Operation) -> usize {
        let mut state = self.state.lock();
        let op_index = state.next_index;
        state.next_index += 1;
        if state.sealed {
            warn!(
                target: "interleave::executor",
                script = %self.name,
                op = %op,
                "Script already taken by the executor, operation ignored"
            );
            return op_index;
        }
        state.ops.push(op);
        op_index
    }

    /// Hand the recorded operations to a worker and seal the script
    pub(crate) fn take_operations(&self) -> Vec<Operation> {
        let mut state = self.state.lock();
        state.sealed = true;
        std::mem::take(&mut state.ops)
    }

    /// Visit recorded operations without taking them
    pub(crate) fn with_operations<R>(&self, f: impl FnOnce(&[Operation]) -> R) -> R {
        f(&self.state.lock().ops)
    }
}

impl std::fmt::Debug for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Script")
            .field("name", &self.name)
            .field("len", &self.len())
            .finish()
    }
}
