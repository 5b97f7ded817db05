//! Registry of named barriers for one execution
//!
//! Barriers are registered up front, before any worker starts, so a fast
//! worker can never wait on a barrier that does not exist yet. After
//! registration the table is read-only and shared by all workers.

use rustc_hash::FxHashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::barrier::Barrier;
use crate::error::{BarrierError, Result};

/// Named barriers, keyed by name
#[derive(Debug, Default)]
pub struct BarrierRegistry {
    barriers: FxHashMap<String, Arc<Barrier>>,
}

impl BarrierRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a barrier under `name`
    ///
    /// Idempotent: registering an existing name keeps the existing barrier.
    pub fn register(&mut self, name: &str) -> Arc<Barrier> {
        Arc::clone(
            self.barriers
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(Barrier::new(name))),
        )
    }

    /// Look up a barrier by name
    pub fn get(&self, name: &str) -> Result<&Arc<Barrier>> {
        self.barriers
            .get(name)
            .ok_or_else(|| BarrierError::Unknown(name.to_string()))
    }

    /// Check whether `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.barriers.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.barriers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered barriers
    pub fn len(&self) -> usize {
        self.barriers.len()
    }

    /// Check if no barrier is registered
    pub fn is_empty(&self) -> bool {
        self.barriers.is_empty()
    }

    /// Signal the barrier `name`
    pub fn signal(&self, name: &str) -> Result<()> {
        self.get(name)?.signal()
    }

    /// Block until the barrier `name` is signaled
    pub fn wait(&self, name: &str) -> Result<()> {
        self.get(name)?.wait();
        Ok(())
    }

    /// Block until the barrier `name` is signaled or `timeout` elapses
    ///
    /// Returns `true` if the barrier was signaled, `false` on timeout.
    pub fn wait_timeout(&self, name: &str, timeout: Duration) -> Result<bool> {
        Ok(self.get(name)?.wait_timeout(timeout))
    }
}
