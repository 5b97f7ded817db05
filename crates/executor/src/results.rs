//! Captured observations of an execution.
//!
//! Every `Get` recorded on a script hands back a [`ResultHandle`] naming
//! (script, operation index). Workers write the value they read under that
//! handle; assertions resolve the handle after `execute()` returns, so they
//! never depend on the order in which workers happened to run.

use std::fmt;
use std::sync::Arc;

use interleave_core::{Error as StoreError, Value};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Reference to the value a recorded `Get` will observe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResultHandle {
    script: Arc<str>,
    op_index: usize,
}

impl ResultHandle {
    pub(crate) fn new(script: Arc<str>, op_index: usize) -> Self {
        Self { script, op_index }
    }

    /// Name of the script that performs the read
    pub fn script(&self) -> &str {
        &self.script
    }

    /// Position of the read within its script
    pub fn op_index(&self) -> usize {
        self.op_index
    }
}

impl fmt::Display for ResultHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.script, self.op_index)
    }
}

/// A store call that returned an error during execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedOp {
    /// Script that issued the call
    pub script: String,
    /// Position of the call within its script
    pub op_index: usize,
    /// Description of the operation, e.g. `SET 1 = 100`
    pub operation: String,
    /// Error the store returned
    pub error: StoreError,
}

#[derive(Debug, Default)]
struct Captured {
    values: FxHashMap<ResultHandle, Value>,
    failures: Vec<FailedOp>,
}

/// Values observed by reads, plus store calls that failed.
///
/// Cheap to clone; clones share the same underlying data. Written by
/// workers during execution and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    inner: Arc<RwLock<Captured>>,
}

impl ResultStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&self, handle: ResultHandle, value: Value) {
        self.inner.write().values.insert(handle, value);
    }

    pub(crate) fn record_failure(&self, failure: FailedOp) {
        self.inner.write().failures.push(failure);
    }

    /// Value observed by the read behind `handle`
    ///
    /// Returns zero if the read never ran or failed; use
    /// [`try_value`](Self::try_value) to tell those cases apart.
    pub fn value(&self, handle: &ResultHandle) -> Value {
        self.try_value(handle).unwrap_or_default()
    }

    /// Value observed by the read behind `handle`, if it was captured
    pub fn try_value(&self, handle: &ResultHandle) -> Option<Value> {
        self.inner.read().values.get(handle).copied()
    }

    /// Number of captured reads
    pub fn len(&self) -> usize {
        self.inner.read().values.len()
    }

    /// Check if no read was captured
    pub fn is_empty(&self) -> bool {
        self.inner.read().values.is_empty()
    }

    /// Store calls that returned an error, in the order they failed
    pub fn failed_ops(&self) -> Vec<FailedOp> {
        self.inner.read().failures.clone()
    }
}
