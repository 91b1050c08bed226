//! Entry points: apply the budget, then repair to a fixed point.

use littoral_core::CellPos;
use littoral_grid::Grid;
use littoral_shoreline::Shoreline;
use tracing::{debug, warn};

use crate::cascade::{out_of_range, Repairer};
use crate::report::{RepairParams, RepairReport};

/// Apply every interior node's net volume change to its cell, settling
/// any cell that leaves `[0, 1]` before moving on.
///
/// Changes are read up front and keyed by cell, so re-splices triggered
/// along the way do not disturb the remaining updates. Nodes without a
/// positive closure depth are skipped.
pub fn apply_volume_changes(
    grid: &mut Grid,
    shore: &mut Shoreline,
    params: RepairParams,
) -> RepairReport {
    let mut repairer = Repairer::new(grid, shore, params);
    repairer.apply();
    repairer.into_report()
}

/// Repair out-of-range cells, lonely corners and inset corners until a
/// pass changes nothing or `params.max_passes` is reached.
pub fn repair(grid: &mut Grid, shore: &mut Shoreline, params: RepairParams) -> RepairReport {
    let mut repairer = Repairer::new(grid, shore, params);
    repairer.run_passes();
    repairer.into_report()
}

/// [`apply_volume_changes`] followed by [`repair`], sharing one report.
pub fn apply_and_repair(
    grid: &mut Grid,
    shore: &mut Shoreline,
    params: RepairParams,
) -> RepairReport {
    let mut repairer = Repairer::new(grid, shore, params);
    repairer.apply();
    repairer.run_passes();
    repairer.into_report()
}

impl Repairer<'_> {
    fn apply(&mut self) {
        let area = self.grid.cell_area();
        let changes: Vec<(CellPos, f64)> = self
            .shore
            .interior_nodes()
            .into_iter()
            .filter_map(|id| {
                let node = self.shore.get(id)?;
                let pos = node.pos()?;
                let depth = node.props.closure_depth;
                (depth > 0.0 && depth.is_finite())
                    .then(|| (pos, node.props.net_volume_change / depth / area))
            })
            .filter(|&(_, delta)| delta != 0.0 && delta.is_finite())
            .collect();

        for (pos, delta) in changes {
            let now = self.grid.add_occupancy(pos, delta);
            self.report.applied += delta * area;
            if out_of_range(now) {
                self.settle(pos);
            } else if now == 0.0 {
                self.resplice(pos);
            }
        }
        debug!(
            applied = self.report.applied,
            overflows = self.report.overflows,
            underflows = self.report.underflows,
            "volume changes applied"
        );
    }

    fn run_passes(&mut self) {
        let limit = self.params.max_passes.max(1);
        self.report.converged = false;
        for _ in 0..limit {
            self.report.passes += 1;
            let mut changed = self.sweep_range();
            changed |= self.smooth_corners();
            changed |= self.remove_insets();
            if !changed {
                self.report.converged = true;
                break;
            }
        }
        if !self.report.converged {
            warn!(
                passes = self.report.passes,
                "repair stopped at the pass limit before reaching a fixed point"
            );
        }
    }

    /// Settle every enrolled cell that is out of range.
    fn sweep_range(&mut self) -> bool {
        let mut changed = false;
        for id in self.shore.interior_nodes() {
            let Some(pos) = self.shore.position(id) else {
                continue;
            };
            if out_of_range(self.grid.occupancy(pos)) {
                self.settle(pos);
                changed = true;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use littoral_shoreline::trace_all;
    use littoral_test_utils::{strip_grid, total_occupancy};

    fn traced(mut grid: Grid) -> (Grid, Shoreline) {
        let mut shore = Shoreline::new();
        trace_all(&mut grid, &mut shore).expect("trace");
        (grid, shore)
    }

    fn set_net(shore: &mut Shoreline, pos: CellPos, net: f64, depth: f64) {
        let id = shore
            .interior_nodes()
            .into_iter()
            .find(|&id| shore.position(id) == Some(pos))
            .expect("node at pos");
        let node = shore.get_mut(id).expect("live node");
        node.props.net_volume_change = net;
        node.props.closure_depth = depth;
    }

    // ── Application ─────────────────────────────────────────────

    #[test]
    fn net_change_is_scaled_by_depth_and_area() {
        let (mut grid, mut shore) = traced(strip_grid(4, 5, 2));
        set_net(&mut shore, CellPos::new(2, 1), -2.5, 10.0);
        let report = apply_volume_changes(&mut grid, &mut shore, RepairParams::default());
        assert!((grid.occupancy(CellPos::new(2, 1)) - 0.75).abs() < 1e-12);
        assert!((report.applied + 0.25).abs() < 1e-12);
        assert_eq!(report.underflows + report.overflows, 0);
    }

    #[test]
    fn missing_closure_depth_skips_the_node() {
        let (mut grid, mut shore) = traced(strip_grid(4, 5, 2));
        set_net(&mut shore, CellPos::new(2, 1), -2.5, 0.0);
        let report = apply_volume_changes(&mut grid, &mut shore, RepairParams::default());
        assert_eq!(grid.occupancy(CellPos::new(2, 1)), 1.0);
        assert_eq!(report.applied, 0.0);
    }

    #[test]
    fn full_erosion_respliced_the_node() {
        let (mut grid, mut shore) = traced(strip_grid(4, 5, 2));
        set_net(&mut shore, CellPos::new(2, 2), -10.0, 10.0);
        let report = apply_volume_changes(&mut grid, &mut shore, RepairParams::default());
        assert_eq!(grid.occupancy(CellPos::new(2, 2)), 0.0);
        assert_eq!(grid.node_at(CellPos::new(2, 2)), None);
        assert_eq!(report.splices + report.failed_splices, 1);
        assert!(shore.validate(&grid).is_ok() || report.topology_dirty);
    }

    // ── Fixed point ─────────────────────────────────────────────

    #[test]
    fn overfull_cell_spills_its_excess_upward() {
        let (mut grid, mut shore) = traced(strip_grid(4, 5, 2));
        grid.set_occupancy(CellPos::new(2, 2), 1.2);
        let report = repair(&mut grid, &mut shore, RepairParams::default());
        assert_eq!(grid.occupancy(CellPos::new(2, 2)), 1.0);
        assert!((grid.occupancy(CellPos::new(1, 2)) - 0.2).abs() < 1e-12);
        assert_eq!(report.overflows, 1);
        assert!(report.converged);
        assert!(!report.topology_dirty);
        assert!(shore.validate(&grid).is_ok());
        assert!(grid.node_at(CellPos::new(1, 2)).is_some());
    }

    #[test]
    fn repair_is_idempotent() {
        let (mut grid, mut shore) = traced(strip_grid(4, 5, 2));
        grid.set_occupancy(CellPos::new(2, 2), 1.2);
        grid.set_occupancy(CellPos::new(2, 3), 0.5);
        repair(&mut grid, &mut shore, RepairParams::default());
        let settled = grid.occupancy_row_major();
        let nodes = shore.node_count();

        let again = repair(&mut grid, &mut shore, RepairParams::default());
        assert!(!again.changed_anything());
        assert_eq!(again.passes, 1);
        assert_eq!(grid.occupancy_row_major(), settled);
        assert_eq!(shore.node_count(), nodes);
    }

    #[test]
    fn report_closes_the_area_balance() {
        let (mut grid, mut shore) = traced(strip_grid(4, 5, 2));
        let before = total_occupancy(&grid);
        set_net(&mut shore, CellPos::new(2, 0), -14.0, 10.0);
        set_net(&mut shore, CellPos::new(2, 3), 6.0, 10.0);
        let report = apply_and_repair(&mut grid, &mut shore, RepairParams::default());
        let after = total_occupancy(&grid);
        let booked = report.applied + report.off_grid_exchange + report.clamped_residual;
        assert!((after - before - booked).abs() < 1e-9);
    }
}
