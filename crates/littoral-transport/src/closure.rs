//! Depth of closure and the landward supply cell.

use std::f64::consts::FRAC_PI_2;

use littoral_core::{CellPos, NodeId};
use littoral_grid::{Grid, Probe};
use littoral_shoreline::{next_angle, Shoreline};

use crate::params::{ClosurePolicy, ShelfProfile, SupplyLookup, TransportParams};

/// Depth below which the shoreface does not move, at cross-shore `row`
/// for a shore at `shore_angle` (m).
///
/// The shelf deepens linearly offshore from the reference row; the
/// shoreface meets it where the two profiles cross. Clipped below at
/// `shelf.minimum_closure_depth`.
pub fn derived_closure_depth(shelf: &ShelfProfile, row: usize, shore_angle: f64, cell_length: f64) -> f64 {
    let reference = shelf.cross_shore_reference as f64;
    let row = row as f64;
    let cos = shore_angle.cos();
    let local_shelf_depth =
        shelf.shelf_depth_at_reference + (reference - row) * cell_length * shelf.shelf_slope;
    let distance_to_closure = local_shelf_depth / (shelf.shoreface_slope - cos * shelf.shelf_slope);
    let closure_row = row + cos * distance_to_closure / cell_length;
    let depth =
        shelf.shelf_depth_at_reference + (closure_row - reference) * cell_length * shelf.shelf_slope;
    if depth.is_finite() {
        depth.max(shelf.minimum_closure_depth)
    } else {
        shelf.minimum_closure_depth
    }
}

/// Depth of closure at `id` under the configured policy (m).
///
/// Sentinels and nodes without a shore angle use the flat-shore value.
pub fn closure_depth(grid: &Grid, shore: &mut Shoreline, id: NodeId, params: &TransportParams) -> f64 {
    match params.closure {
        ClosurePolicy::Fixed(depth) => depth,
        ClosurePolicy::Derived => {
            let row = shore.position(id).map_or(0, |p| p.row);
            let angle = next_angle(grid, shore, id).unwrap_or(0.0);
            derived_closure_depth(&params.shelf, row, angle, grid.cell_length())
        }
    }
}

/// One-cell step along `dir`, snapped to the nearest grid axis.
///
/// Rows grow downward, so a positive sine steps up a row.
fn axis_step(dir: f64) -> (i64, i64) {
    let (sin, cos) = dir.sin_cos();
    if sin.abs() >= 0.5 {
        (-(sin.signum() as i64), 0)
    } else {
        (0, cos.signum() as i64)
    }
}

/// The cell whose sediment backs up the node at `pos`.
///
/// With [`SupplyLookup::ShoreNormal`] this is one cell landward of the
/// shore (the normal is the shore angle turned a quarter clockwise);
/// with [`SupplyLookup::ShoreTangent`] one cell along the shore. `None`
/// off the grid.
pub fn cell_behind(grid: &Grid, pos: CellPos, shore_angle: f64, lookup: SupplyLookup) -> Option<CellPos> {
    let dir = match lookup {
        SupplyLookup::ShoreNormal => shore_angle - FRAC_PI_2,
        SupplyLookup::ShoreTangent => shore_angle,
    };
    let (dr, dc) = axis_step(dir);
    match grid.offset(pos, dr, dc) {
        Probe::Cell(p) => Some(p),
        Probe::Sea | Probe::Exit(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn flat_shore_at_reference_row() {
        let shelf = ShelfProfile {
            cross_shore_reference: 10,
            shelf_depth_at_reference: 10.0,
            shelf_slope: 0.001,
            shoreface_slope: 0.01,
            minimum_closure_depth: 1.0,
        };
        // distance = 10 / (0.01 - 0.001) = 1111.1 m, i.e. 11.11 rows of 100 m
        let depth = derived_closure_depth(&shelf, 10, 0.0, 100.0);
        let expected = 10.0 + (10.0 / 0.009) * 0.001;
        assert!((depth - expected).abs() < 1e-9, "{depth} vs {expected}");
    }

    #[test]
    fn derived_depth_respects_minimum() {
        let shelf = ShelfProfile {
            minimum_closure_depth: 50.0,
            ..ShelfProfile::default()
        };
        assert_eq!(derived_closure_depth(&shelf, 3, 0.2, 100.0), 50.0);
    }

    #[test]
    fn fixed_policy_ignores_geometry() {
        let grid = Grid::new(3, 3, 1.0, 1.0).unwrap();
        let mut shore = Shoreline::new();
        let params = TransportParams {
            closure: ClosurePolicy::Fixed(7.5),
            ..TransportParams::default()
        };
        assert_eq!(closure_depth(&grid, &mut shore, NodeId::new(0, 0), &params), 7.5);
    }

    #[test]
    fn behind_a_flat_shore_is_the_cell_below() {
        let grid = Grid::new(4, 4, 1.0, 1.0).unwrap();
        let pos = CellPos::new(1, 1);
        assert_eq!(
            cell_behind(&grid, pos, 0.0, SupplyLookup::ShoreNormal),
            Some(CellPos::new(2, 1))
        );
        assert_eq!(
            cell_behind(&grid, pos, 0.0, SupplyLookup::ShoreTangent),
            Some(CellPos::new(1, 2))
        );
    }

    #[test]
    fn behind_a_north_running_shore_is_to_the_east() {
        // Travelling up with the sea on the left puts land to the right.
        let grid = Grid::new(4, 4, 1.0, 1.0).unwrap();
        let pos = CellPos::new(2, 1);
        assert_eq!(
            cell_behind(&grid, pos, PI / 2.0, SupplyLookup::ShoreNormal),
            Some(CellPos::new(2, 2))
        );
    }

    #[test]
    fn behind_can_leave_the_grid() {
        let grid = Grid::new(3, 3, 1.0, 1.0).unwrap();
        assert_eq!(
            cell_behind(&grid, CellPos::new(2, 0), 0.0, SupplyLookup::ShoreNormal),
            None
        );
    }
}
