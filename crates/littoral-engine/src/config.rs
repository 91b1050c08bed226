//! Coast configuration, validation, and error types.
//!
//! [`CoastConfig`] is the plain-data input for building a [`Coast`](crate::Coast).
//! [`validate()`](CoastConfig::validate) checks every value at startup so
//! that stepping never has to.

use littoral_core::TopologyError;
use littoral_grid::{EdgeBehavior, Grid, GridError};
use littoral_repair::RepairParams;
use littoral_transport::{ParamError, TransportParams};
use thiserror::Error;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating a [`CoastConfig`] or initializing a
/// coast from it.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Grid dimensions, cell sizes or initial occupancy are invalid.
    #[error("grid: {0}")]
    Grid(#[from] GridError),
    /// Transport coefficients are invalid.
    #[error("transport: {0}")]
    Transport(#[from] ParamError),
    /// The initial shoreline could not be traced.
    #[error("initial shoreline: {0}")]
    Topology(#[from] TopologyError),
    /// `timestep_length` is NaN, infinite, zero, or negative.
    #[error("timestep_length must be finite and positive, got {value}")]
    InvalidTimestep {
        /// The invalid value.
        value: f64,
    },
    /// `max_repair_passes` is zero.
    #[error("max_repair_passes must be at least 1")]
    NoRepairPasses,
    /// `max_cell_visits` is zero.
    #[error("max_cell_visits must be at least 1")]
    NoCellVisits,
}

// ── CoastConfig ────────────────────────────────────────────────────

/// Everything needed to build a [`Coast`](crate::Coast) apart from its
/// wave climate.
#[derive(Clone, Debug, PartialEq)]
pub struct CoastConfig {
    /// Number of rows (cross-shore). At least 2.
    pub rows: usize,
    /// Number of columns (alongshore). At least 1.
    pub cols: usize,
    /// Alongshore cell size in metres. Default: 300.
    pub cell_width: f64,
    /// Cross-shore cell size in metres. Default: 300.
    pub cell_length: f64,
    /// Column edge behavior. Default: [`EdgeBehavior::Absorb`].
    pub edge: EdgeBehavior,
    /// Initial occupancy, row-major, each value in `[0, 1]`.
    pub occupancy: Vec<f64>,
    /// Length of one step; scales every transport potential. Default: 1.
    pub timestep_length: f64,
    /// Upper bound on repair passes per step. Default: 8.
    pub max_repair_passes: usize,
    /// How often one cell may be fixed within a repair run. Default: 16.
    pub max_cell_visits: u32,
    /// Wave transform and budget coefficients.
    pub transport: TransportParams,
}

impl CoastConfig {
    /// A config with default physics for the given occupancy.
    pub fn new(rows: usize, cols: usize, occupancy: Vec<f64>) -> Self {
        let repair = RepairParams::default();
        Self {
            rows,
            cols,
            cell_width: 300.0,
            cell_length: 300.0,
            edge: EdgeBehavior::Absorb,
            occupancy,
            timestep_length: 1.0,
            max_repair_passes: repair.max_passes,
            max_cell_visits: repair.max_cell_visits,
            transport: TransportParams::default(),
        }
    }

    /// Check structural invariants.
    ///
    /// # Errors
    ///
    /// The first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build_grid().map(|_| ())
    }

    /// The repair limits this config asks for.
    pub fn repair_params(&self) -> RepairParams {
        RepairParams {
            max_passes: self.max_repair_passes,
            max_cell_visits: self.max_cell_visits,
        }
    }

    /// Validate and build the initial grid.
    pub(crate) fn build_grid(&self) -> Result<Grid, ConfigError> {
        if !(self.timestep_length > 0.0 && self.timestep_length.is_finite()) {
            return Err(ConfigError::InvalidTimestep {
                value: self.timestep_length,
            });
        }
        if self.max_repair_passes == 0 {
            return Err(ConfigError::NoRepairPasses);
        }
        if self.max_cell_visits == 0 {
            return Err(ConfigError::NoCellVisits);
        }
        self.transport.validate()?;
        let grid = Grid::from_occupancy(
            self.rows,
            self.cols,
            self.cell_width,
            self.cell_length,
            &self.occupancy,
        )?
        .with_edge(self.edge);
        Ok(grid)
    }
}
