//! Occupancy repair for the littoral coastline model.
//!
//! After the sediment budget has produced a net volume change for every
//! shoreline node, this crate applies it to cell occupancy and restores
//! the grid to a consistent state:
//!
//! - out-of-range cells are fixed by an overflow/underflow cascade that
//!   moves the excess or deficit into 4-neighbours,
//! - lonely corner cells are smoothed into their neighbours,
//! - inset corners are cut out of their chains,
//! - every cell whose land status changes is re-spliced locally.
//!
//! The passes repeat until nothing changes or the pass limit is hit. When
//! a local re-splice fails the [`RepairReport`] is flagged
//! `topology_dirty` and the caller is expected to re-trace the whole
//! shoreline.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod cascade;
mod corners;
pub mod driver;
pub mod report;

pub use driver::{apply_and_repair, apply_volume_changes, repair};
pub use report::{RepairParams, RepairReport};
