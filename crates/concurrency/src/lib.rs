//! Synchronization layer for interleave
//!
//! This crate implements the named one-shot barriers that script workers
//! coordinate through:
//! - Barrier: a single signal, satisfied at most once, any number of waiters
//! - BarrierRegistry: the table of barriers for one execution, keyed by name
//!
//! Barriers are the only cross-worker signal. A signal happens-before every
//! wait on the same name that returns because of it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod barrier;
pub mod error;
pub mod registry;

pub use barrier::Barrier;
pub use error::{BarrierError, Result};
pub use registry::BarrierRegistry;
