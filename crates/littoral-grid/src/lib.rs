//! Occupancy grid for the littoral coastline model.
//!
//! [`Grid`] owns one [`Cell`] per position, the physical cell dimensions
//! and the simulation timestep counter used to invalidate per-node
//! caches. Row 0 is the offshore edge; everything above it is open sea.
//! Columns can be bounded ([`EdgeBehavior::Absorb`]) or periodic
//! ([`EdgeBehavior::Wrap`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod edge;
pub mod error;
pub mod grid;
pub mod neighbours;

pub use edge::{EdgeBehavior, GridEdge, Probe};
pub use error::GridError;
pub use grid::{Cell, Grid};
pub use neighbours::{landmass, neighbours4, open_water, Neighbour, OpenWater};
