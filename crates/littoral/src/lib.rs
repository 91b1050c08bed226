//! Littoral: a cellular coastline evolution model.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all littoral sub-crates. For most users, adding `littoral` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use littoral::prelude::*;
//!
//! // A straight coast: two rows of sea over three rows of sand.
//! let (rows, cols) = (5, 6);
//! let occupancy: Vec<f64> = (0..rows * cols)
//!     .map(|i| if i / cols >= 2 { 1.0 } else { 0.0 })
//!     .collect();
//! let config = CoastConfig::new(rows, cols, occupancy);
//!
//! // Oblique waves from the left, forever.
//! let waves = WaveConditions::new(0.3, 8.0, 1.2);
//! let mut coast = Coast::new(config, waves).unwrap();
//!
//! let report = coast.step().unwrap();
//! assert!(report.total_potential() > 0.0);
//! assert_eq!(coast.occupancy().len(), rows * cols);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `littoral-core` | IDs, errors, transport directions, tolerances, wave climate trait |
//! | [`grid`] | `littoral-grid` | Occupancy grid, edges, neighbourhoods |
//! | [`shoreline`] | `littoral-shoreline` | Node arena, chains, geometry, tracer, re-splice |
//! | [`transport`] | `littoral-transport` | Wave transform, shadowing, closure depth, budget |
//! | [`repair`] | `littoral-repair` | Transport application and repair cascade |
//! | [`engine`] | `littoral-engine` | `Coast`, configuration, step reports, text snapshots |
//! | [`climate`] | `littoral-climate` | Recorded and stochastic wave climates |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, errors and the wave-climate trait (`littoral-core`).
pub use littoral_core as types;

/// The occupancy grid (`littoral-grid`).
pub use littoral_grid as grid;

/// Shoreline topology and geometry (`littoral-shoreline`).
///
/// [`shoreline::trace_all`] discovers chains from scratch and
/// [`shoreline::replace_node`] re-splices one node locally.
pub use littoral_shoreline as shoreline;

/// Wave transform and sediment budget (`littoral-transport`).
pub use littoral_transport as transport;

/// Transport application and occupancy repair (`littoral-repair`).
pub use littoral_repair as repair;

/// The coastline world (`littoral-engine`).
///
/// [`engine::Coast`] is the main entry point.
pub use littoral_engine as engine;

/// Wave climates (`littoral-climate`).
///
/// [`climate::WaveSeries`] replays recorded waves,
/// [`climate::StochasticClimate`] draws them from a seeded stream.
pub use littoral_climate as climate;

/// Common imports for typical littoral usage.
///
/// ```rust
/// use littoral::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use littoral_core::{CellPos, Timestep, WaveClimate, WaveConditions};

    // Errors
    pub use littoral_core::{StepError, TopologyError};

    // Grid
    pub use littoral_grid::{EdgeBehavior, Grid};

    // Transport
    pub use littoral_transport::{ClosurePolicy, SupplyLookup, TransportParams};

    // Engine
    pub use littoral_engine::{Coast, CoastConfig, ConfigError, StepReport};

    // Climates
    pub use littoral_climate::{StochasticClimate, WaveSeries};
}
