//! One-shot named barrier
//!
//! ```text
//! unsignaled ──signal()──▶ signaled
//!      │                      │
//!   wait() parks          wait() returns immediately
//! ```
//!
//! `signal` flips the state and wakes every parked waiter at once. A second
//! `signal` is rejected. Waits are real blocking waits on a condition
//! variable, never polling.

use parking_lot::{Condvar, Mutex};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::error::{BarrierError, Result};

/// A named signal that is satisfied at most once
#[derive(Debug)]
pub struct Barrier {
    name: String,
    signaled: Mutex<bool>,
    released: Condvar,
}

impl Barrier {
    /// Create an unsignaled barrier
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signaled: Mutex::new(false),
            released: Condvar::new(),
        }
    }

    /// Name of this barrier
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check whether the barrier has been signaled
    pub fn is_signaled(&self) -> bool {
        *self.signaled.lock()
    }

    /// Mark the barrier satisfied and release every waiter
    ///
    /// # Errors
    ///
    /// Returns `AlreadySignaled` if the barrier was signaled before.
    pub fn signal(&self) -> Result<()> {
        let mut signaled = self.signaled.lock();
        if *signaled {
            return Err(BarrierError::AlreadySignaled(self.name.clone()));
        }
        *signaled = true;
        // Notify while holding the lock: a waiter between its state check
        // and its park holds this lock, so it cannot miss the wakeup.
        self.released.notify_all();
        drop(signaled);

        debug!(target: "interleave::barrier", barrier = %self.name, "Barrier signaled");
        Ok(())
    }

    /// Block until the barrier is signaled
    ///
    /// Returns immediately if it already was.
    pub fn wait(&self) {
        let mut signaled = self.signaled.lock();
        if *signaled {
            trace!(target: "interleave::barrier", barrier = %self.name, "Barrier already signaled");
            return;
        }
        while !*signaled {
            self.released.wait(&mut signaled);
        }
    }

    /// Block until the barrier is signaled or `timeout` elapses
    ///
    /// Returns `true` if the barrier was signaled, `false` on timeout.
    /// A timeout too large to express as a deadline waits without one.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = match Instant::now().checked_add(timeout) {
            Some(deadline) => deadline,
            None => {
                self.wait();
                return true;
            }
        };
        let mut signaled = self.signaled.lock();
        while !*signaled {
            if self
                .released
                .wait_until(&mut signaled, deadline)
                .timed_out()
            {
                if !*signaled {
                    debug!(
                        target: "interleave::barrier",
                        barrier = %self.name,
                        timeout_ms = timeout.as_millis() as u64,
                        "Barrier wait timed out"
                    );
                }
                return *signaled;
            }
        }
        true
    }
}
