//! Per-step metrics for the coastline engine.
//!
//! [`StepReport`] gathers the counters of every stage of one step so that
//! callers can monitor sediment balance and repair activity without
//! inspecting the grid.

use littoral_core::{Timestep, WaveConditions};
use littoral_repair::RepairReport;
use littoral_transport::{BudgetStats, WaveStats};

/// What happened during a single [`Coast::step`](crate::Coast::step).
#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    /// Zero-based index of the step.
    pub timestep: Timestep,
    /// Deep-water conditions drawn from the climate.
    pub waves: WaveConditions,
    /// Shoreline chains after the step.
    pub chains: usize,
    /// Shoreline nodes, sentinels included, after the step.
    pub nodes: usize,
    /// Wave transform counters, including the total transport potential.
    pub wave: WaveStats,
    /// Sediment budget totals, including the boundary outflux.
    pub budget: BudgetStats,
    /// Application and repair counters, including off-grid exchange.
    pub repair: RepairReport,
    /// Whether this step fell back to a full re-trace.
    pub retraced: bool,
    /// Full re-traces since the coast was built.
    pub full_retraces: u64,
    /// Wall-clock time for the step, in microseconds.
    pub total_us: u64,
}

impl StepReport {
    /// Sum of transport potentials over the shoreline (m³).
    pub fn total_potential(&self) -> f64 {
        self.wave.total_potential
    }

    /// Net volume carried off the grid through chain ends (m³).
    pub fn boundary_outflux(&self) -> f64 {
        self.budget.boundary_outflux
    }

    /// Plan-view area drawn from virtual off-grid cells (m²).
    pub fn off_grid_exchange(&self) -> f64 {
        self.repair.off_grid_exchange
    }
}
