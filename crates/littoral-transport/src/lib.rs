//! Longshore sediment transport for the littoral coastline model.
//!
//! One step of transport runs in two passes over the shoreline:
//!
//! 1. [`wave_transform`] picks a shore angle for every interior node with
//!    the upwind/downwind [`differencing`] scheme (consulting the
//!    [`shadow`] test), refracts the deep-water wave to its breaking
//!    point and stores the resulting transport potential.
//! 2. [`sediment_budget`] classifies each node's net flow, clips the
//!    potentials to the sediment actually available and records each
//!    node's net volume change and depth of closure.
//!
//! Applying those volume changes to the grid is left to the repair crate.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod budget;
pub mod closure;
pub mod constants;
pub mod differencing;
pub mod params;
pub mod refraction;
pub mod shadow;
pub mod transform;

pub use budget::{sediment_budget, BudgetStats};
pub use closure::{cell_behind, closure_depth, derived_closure_depth};
pub use differencing::{shore_angle, ShoreAngle};
pub use params::{ClosurePolicy, ParamError, ShelfProfile, SupplyLookup, TransportParams, TransportParamsBuilder};
pub use refraction::{shoal, transport_potential, wavelength, BreakingWave};
pub use shadow::is_shadowed;
pub use transform::{wave_transform, WaveStats};
