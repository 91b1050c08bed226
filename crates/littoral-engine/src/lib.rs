//! Coastline world for the littoral model.
//!
//! [`Coast`] ties the workspace together: it validates a [`CoastConfig`],
//! traces the initial shoreline and then advances the model one step at
//! a time (wave transform, sediment budget, application and repair),
//! returning a [`StepReport`] for each step.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coast;
pub mod config;
pub mod metrics;
pub mod snapshot;

pub use coast::Coast;
pub use config::{CoastConfig, ConfigError};
pub use metrics::StepReport;
pub use snapshot::{grid_text, shoreline_text};
