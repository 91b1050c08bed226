//! Repair limits and the per-run report.

/// Limits for one repair run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepairParams {
    /// Maximum number of full repair passes before giving up on a fixed
    /// point. Must be at least 1.
    pub max_passes: usize,
    /// How often a single cell may be fixed within one cascade before it
    /// is clamped in place.
    pub max_cell_visits: u32,
}

impl Default for RepairParams {
    fn default() -> Self {
        Self {
            max_passes: 8,
            max_cell_visits: 16,
        }
    }
}

/// Counters and residuals from one repair run.
///
/// Areas are plan-view: occupancy times cell area, in square metres.
/// Together they close the occupancy balance:
///
/// ```text
/// area_after = area_before + applied + off_grid_exchange + clamped_residual
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RepairReport {
    /// Cells brought down to full occupancy.
    pub overflows: usize,
    /// Cells brought up to zero occupancy.
    pub underflows: usize,
    /// Corner cells whose sediment was moved to neighbours.
    pub smoothed_corners: usize,
    /// Inset-corner nodes unlinked from their chains.
    pub insets_removed: usize,
    /// Successful local re-splices.
    pub splices: usize,
    /// Local re-splices that failed and left the topology dirty.
    pub failed_splices: usize,
    /// Repair passes run.
    pub passes: usize,
    /// Whether the last pass changed nothing.
    pub converged: bool,
    /// Area added by applying the nodes' net volume changes.
    pub applied: f64,
    /// Area drawn from (positive) or pushed to (negative) virtual
    /// off-grid cells.
    pub off_grid_exchange: f64,
    /// Area created (positive) or destroyed (negative) by clamping cells
    /// that had no donor or receiver left.
    pub clamped_residual: f64,
    /// The shoreline no longer matches the grid; a full re-trace is due.
    pub topology_dirty: bool,
}

impl RepairReport {
    /// Whether any cell, chain or node changed.
    pub fn changed_anything(&self) -> bool {
        self.overflows
            + self.underflows
            + self.smoothed_corners
            + self.insets_removed
            + self.splices
            + self.failed_splices
            > 0
    }
}
