//! The Executor runs recorded scripts against a transactional store.
//!
//! Each script gets its own OS thread. Within a thread operations run
//! strictly in recorded order; across threads the only ordering is the one
//! imposed by barriers (and, for the row-locked store, by row locks).
//!
//! ## Phases
//!
//! 1. Validate: script names are unique, every barrier has exactly one
//!    signaler, every awaited barrier is signaled somewhere.
//! 2. Register every barrier before the first worker starts.
//! 3. Spawn one worker per script.
//! 4. Join every worker. A worker panic is re-raised on the caller.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use interleave_concurrency::{BarrierRegistry, Result as BarrierResult};
use interleave_core::{Error as StoreError, IsolationLevel, Result as StoreResult};
use interleave_core::{TransactionalStore, TxnId};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, error, info, warn};

use crate::config::ExecutorConfig;
use crate::error::{Error, Result};
use crate::operation::{Operation, StoreOp};
use crate::results::{FailedOp, ResultHandle, ResultStore};
use crate::script::Script;

/// Runs a set of transaction scripts concurrently.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(RowLockedStore::new());
/// let mut executor = Executor::new(store.clone());
///
/// let t1 = executor.new_txn("txn1");
/// let t2 = executor.new_txn("txn2");
/// t1.begin_tx().set(1, 100).signal("t1_wrote").commit();
/// t2.begin_tx().wait_for("t1_wrote");
/// let seen = t2.get(1);
/// t2.commit();
///
/// let results = executor.execute(false)?;
/// assert_eq!(results.value(&seen), 100);
/// ```
pub struct Executor {
    store: Arc<dyn TransactionalStore>,
    config: ExecutorConfig,
    scripts: Vec<Script>,
}

impl Executor {
    /// Create an executor over `store` with the default configuration
    pub fn new(store: Arc<dyn TransactionalStore>) -> Self {
        Self::with_config(store, ExecutorConfig::default())
    }

    /// Create an executor over `store` with an explicit configuration
    pub fn with_config(store: Arc<dyn TransactionalStore>, config: ExecutorConfig) -> Self {
        Self {
            store,
            config,
            scripts: Vec::new(),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Store the scripts run against
    pub fn store(&self) -> &Arc<dyn TransactionalStore> {
        &self.store
    }

    /// Create a new, empty script named `name`
    ///
    /// Names must be unique within one executor; a duplicate is reported by
    /// [`execute`](Self::execute).
    pub fn new_txn(&mut self, name: &str) -> Script {
        let script = Script::new(name);
        self.scripts.push(script.clone());
        script
    }

    /// Number of scripts created so far
    pub fn script_count(&self) -> usize {
        self.scripts.len()
    }

    /// Run every script to completion
    ///
    /// Blocks until each worker has executed its whole list. Store errors
    /// do not fail the run; they are logged and listed in
    /// [`ResultStore::failed_ops`]. `debug` traces every step at INFO on
    /// target `interleave::trace`; `ExecutorConfig::debug` does the same.
    ///
    /// # Errors
    ///
    /// Returns a usage error before any worker starts if the scripts are
    /// inconsistent, or `Error::Spawn` if a worker thread cannot be started.
    /// On `Error::Spawn` the workers already started are not joined: they
    /// keep running detached, may still write to the store, and may block
    /// forever on barriers only the unstarted scripts would signal.
    ///
    /// # Panics
    ///
    /// Re-raises the panic of any worker.
    pub fn execute(self, debug: bool) -> Result<ResultStore> {
        let barriers = Arc::new(self.validate()?);
        let results = ResultStore::new();
        let trace = debug || self.config.debug;

        info!(
            target: "interleave::executor",
            scripts = self.scripts.len(),
            barriers = barriers.len(),
            trace,
            "Starting execution"
        );

        // Seal every script before any worker runs so late recording is
        // rejected uniformly.
        let plans: Vec<(Script, Vec<Operation>)> = self
            .scripts
            .iter()
            .map(|script| (script.clone(), script.take_operations()))
            .collect();

        // Workers log through the caller's subscriber, not just the global one
        let dispatch = tracing::dispatcher::get_default(|current| current.clone());

        let mut handles: Vec<(String, JoinHandle<()>)> = Vec::with_capacity(plans.len());
        for (script, ops) in plans {
            let worker = Worker {
                script: Arc::from(script.name()),
                store: Arc::clone(&self.store),
                barriers: Arc::clone(&barriers),
                results: results.clone(),
                isolation: self.config.isolation,
                trace,
                txn: None,
            };
            let dispatch = dispatch.clone();
            let handle = thread::Builder::new()
                .name(format!("interleave-{}", script.name()))
                .spawn(move || tracing::dispatcher::with_default(&dispatch, || worker.run(ops)))
                .map_err(|e| {
                    // Workers started so far are left detached, see `# Errors`
                    error!(
                        target: "interleave::executor",
                        script = %script.name(),
                        error = %e,
                        "Failed to spawn worker"
                    );
                    Error::Spawn {
                        script: script.name().to_string(),
                        reason: e.to_string(),
                    }
                })?;
            handles.push((script.name().to_string(), handle));
        }

        let mut first_panic = None;
        for (script, handle) in handles {
            if let Err(payload) = handle.join() {
                error!(target: "interleave::executor", script = %script, "Worker panicked");
                first_panic.get_or_insert(payload);
            }
        }
        if let Some(payload) = first_panic {
            std::panic::resume_unwind(payload);
        }

        info!(
            target: "interleave::executor",
            reads = results.len(),
            failed = results.failed_ops().len(),
            "Execution finished"
        );
        Ok(results)
    }

    /// Check the scripts for usage errors and register their barriers
    fn validate(&self) -> Result<BarrierRegistry> {
        let mut names = FxHashSet::default();
        for script in &self.scripts {
            if !names.insert(script.name()) {
                return Err(Error::DuplicateScript {
                    name: script.name().to_string(),
                });
            }
        }

        // barrier -> script that signals it
        let mut signalers: FxHashMap<String, String> = FxHashMap::default();
        for script in &self.scripts {
            script.with_operations(|ops| {
                for barrier in ops.iter().filter_map(Operation::signaled_barrier) {
                    if let Some(first) = signalers.get(barrier) {
                        return Err(Error::DuplicateSignal {
                            barrier: barrier.to_string(),
                            first: first.clone(),
                            second: script.name().to_string(),
                        });
                    }
                    signalers.insert(barrier.to_string(), script.name().to_string());
                }
                Ok(())
            })?;
        }

        for script in &self.scripts {
            script.with_operations(|ops| {
                match ops
                    .iter()
                    .filter_map(Operation::awaited_barrier)
                    .find(|barrier| !signalers.contains_key(*barrier))
                {
                    Some(barrier) => Err(Error::UnknownBarrier {
                        barrier: barrier.to_string(),
                        script: script.name().to_string(),
                    }),
                    None => Ok(()),
                }
            })?;
        }

        let mut registry = BarrierRegistry::new();
        for barrier in signalers.keys() {
            registry.register(barrier);
        }
        Ok(registry)
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("config", &self.config)
            .field("scripts", &self.scripts)
            .finish()
    }
}

/// Per-script execution state, owned by one worker thread
struct Worker {
    script: Arc<str>,
    store: Arc<dyn TransactionalStore>,
    barriers: Arc<BarrierRegistry>,
    results: ResultStore,
    isolation: IsolationLevel,
    trace: bool,
    /// Transaction started by the most recent BEGIN_TX
    txn: Option<TxnId>,
}

impl Worker {
    fn run(mut self, ops: Vec<Operation>) {
        debug!(
            target: "interleave::executor",
            script = %self.script,
            ops = ops.len(),
            "Worker started"
        );

        for (op_index, op) in ops.into_iter().enumerate() {
            let description = op.to_string();
            match op {
                Operation::Store(store_op) => {
                    if let Err(e) = self.apply(op_index, store_op) {
                        warn!(
                            target: "interleave::executor",
                            script = %self.script,
                            op_index,
                            op = %description,
                            error = %e,
                            "Store operation failed"
                        );
                        self.results.record_failure(FailedOp {
                            script: self.script.to_string(),
                            op_index,
                            operation: description.clone(),
                            error: e,
                        });
                    }
                }
                Operation::DumpState => {
                    info!(
                        target: "interleave::executor",
                        script = %self.script,
                        op_index,
                        state = %self.render_snapshot(),
                        "DUMP_STATE"
                    );
                }
                control => {
                    if let Err(e) = self.control(control) {
                        panic!(
                            "script '{}' op {} ({}): {}",
                            self.script, op_index, description, e
                        );
                    }
                }
            }

            if self.trace {
                info!(
                    target: "interleave::trace",
                    script = %self.script,
                    op_index,
                    op = %description,
                    state = %self.render_snapshot(),
                    "Step executed"
                );
            }
        }

        debug!(target: "interleave::executor", script = %self.script, "Worker finished");
    }

    /// Run one store call on behalf of this script
    fn apply(&mut self, op_index: usize, op: StoreOp) -> StoreResult<()> {
        match op {
            StoreOp::BeginTx => {
                let txn = self.store.begin_tx(self.isolation)?;
                debug!(target: "interleave::executor", script = %self.script, txn_id = %txn, "Transaction begun");
                self.txn = Some(txn);
            }
            StoreOp::Set { key, value } => self.store.set(self.active()?, key, value)?,
            StoreOp::SetComputed { key, compute } => {
                let txn = self.active()?;
                let value = compute(&self.results);
                self.store.set(txn, key, value)?;
            }
            StoreOp::Get { key } => {
                let value = self.store.get(self.active()?, key)?;
                self.results.record(
                    ResultHandle::new(Arc::clone(&self.script), op_index),
                    value,
                );
            }
            StoreOp::Delete { key } => self.store.delete(self.active()?, key)?,
            StoreOp::Commit => self.store.commit(self.active()?)?,
            StoreOp::Rollback => self.store.rollback(self.active()?)?,
        }
        Ok(())
    }

    /// Run a barrier operation
    ///
    /// Errors here mean the scripts are inconsistent, which validation
    /// should already have ruled out.
    fn control(&self, op: Operation) -> BarrierResult<()> {
        match op {
            Operation::Signal { barrier } => self.barriers.signal(&barrier),
            Operation::WaitFor {
                barrier,
                timeout: None,
            } => self.barriers.wait(&barrier),
            Operation::WaitFor {
                barrier,
                timeout: Some(timeout),
            } => {
                if !self.barriers.wait_timeout(&barrier, timeout)? {
                    debug!(
                        target: "interleave::executor",
                        script = %self.script,
                        barrier = %barrier,
                        "Continuing after barrier timeout"
                    );
                }
                Ok(())
            }
            Operation::Store(_) | Operation::DumpState => Ok(()),
        }
    }

    fn active(&self) -> StoreResult<TxnId> {
        self.txn.ok_or_else(|| StoreError::NoActiveTransaction {
            script: self.script.to_string(),
        })
    }

    fn render_snapshot(&self) -> String {
        let snapshot = self.store.snapshot();
        serde_json::to_string(&snapshot).unwrap_or_else(|_| format!("{:?}", snapshot))
    }
}
