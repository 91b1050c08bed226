//! Test utilities for littoral development.
//!
//! Grid fixtures for the common coastline shapes, a scripted wave climate
//! and a one-line tracing setup for tests that want to see the engine's log output.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod climate;
pub mod fixtures;

pub use climate::ScriptedClimate;
pub use fixtures::{
    grid_from_rows, island_grid, spit_grid, strip_grid, strip_occupancy, total_occupancy,
};

/// Install a `fmt` subscriber filtered by `RUST_LOG`, once per process.
///
/// Later calls, and calls after another test installed a subscriber, are
/// no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
