//! Wave-climate collaborators for the littoral coastline model.
//!
//! Both types implement [`littoral_core::WaveClimate`]:
//!
//! - [`WaveSeries`] replays recorded angle/period/height arrays, cycling
//!   when the run outlasts the record.
//! - [`StochasticClimate`] draws waves from a seeded ChaCha8 stream whose
//!   asymmetry and stability drift as bounded random walks.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod series;
pub mod stochastic;

pub use error::ClimateError;
pub use series::WaveSeries;
pub use stochastic::{HeightModel, StochasticClimate, StochasticClimateBuilder};
