//! Core types and traits for the littoral coastline model.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! vocabulary shared by every other crate in the workspace: identifiers,
//! transport directions, named numeric tolerances, error types and the
//! wave-climate collaborator interface.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod flow;
pub mod id;
pub mod tolerance;
pub mod wave;

pub use error::{StepError, TopologyError};
pub use flow::{FlowDirection, TransportDir};
pub use id::{CellPos, ChainId, NodeId, Timestep};
pub use wave::{WaveClimate, WaveConditions};
