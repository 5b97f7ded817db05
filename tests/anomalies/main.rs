//! Isolation Anomaly Scenarios
//!
//! Each module forces one anomaly's interleaving with barriers and runs it
//! against both bundled stores:
//! - Dirty write (P0 / G0): only the row-locked store prevents it
//! - Dirty read (G1a, G1b): allowed by both at read-uncommitted
//! - Circular information flow (G1c): allowed by both
//! - Lost update: allowed by both, row locks serialize writes but not reads

#[path = "../common/mod.rs"]
mod common;

mod circular_flow;
mod dirty_read;
mod dirty_write;
mod lost_update;
mod write_cycle;
