//! Shoreline topology for the littoral coastline model.
//!
//! A shoreline is a set of chains of [`Node`]s stored in one
//! generation-checked [`NodeArena`]. Open chains run from one grid edge
//! to another and are capped by boundary sentinels; closed chains ring a
//! fully interior landmass.
//!
//! - [`tracer::trace_all`] rebuilds every chain from the occupancy grid
//!   with a Moore-neighbour boundary trace.
//! - [`splice::replace_node`] re-traces one chain locally around a node.
//! - [`geometry`] derives edge angles and sentinel positions on demand,
//!   cached per timestep on each node.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod geometry;
pub mod node;
pub mod shoreline;
pub mod splice;
pub mod tracer;

pub use arena::NodeArena;
pub use geometry::{
    angle_difference, edge_angle, next_angle, node_position, normalize_angle, prev_angle,
    surrounding_angle,
};
pub use node::{Cached, Node, NodeKind, NodeProps};
pub use shoreline::{Chain, Shoreline};
pub use splice::replace_node;
pub use tracer::{trace_all, Rotation, TraceEnd};
