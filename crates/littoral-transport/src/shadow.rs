//! Wave shadowing by land standing between a node and the open sea.

use littoral_core::tolerance::is_full;
use littoral_core::{CellPos, NodeId};
use littoral_grid::{Grid, Probe};
use littoral_shoreline::Shoreline;

use crate::params::TransportParams;

/// Whether `id` lies in the shadow of solid land for waves arriving from
/// `wave_angle`. Sentinels never are.
///
/// Marches from the node toward the incoming waves in steps of
/// `params.shadow_step` cells until leaving the grid or running out of
/// steps. The result is cached on the node for the current timestep.
pub fn is_shadowed(
    grid: &Grid,
    shore: &mut Shoreline,
    id: NodeId,
    wave_angle: f64,
    params: &TransportParams,
) -> bool {
    let now = grid.timestep();
    let Some(node) = shore.get(id) else {
        return false;
    };
    if let Some(cached) = node.props.shadow.get(now) {
        return cached;
    }
    let Some(pos) = node.pos() else {
        return false;
    };
    let shadowed = march(grid, pos, wave_angle, params);
    if let Some(node) = shore.get_mut(id) {
        node.props.shadow.set(now, shadowed);
    }
    shadowed
}

fn march(grid: &Grid, pos: CellPos, wave_angle: f64, params: &TransportParams) -> bool {
    let (row, col) = (pos.row as i64, pos.col as i64);
    let occupancy = grid.occupancy(pos);
    let (sin, cos) = wave_angle.sin_cos();
    let tan = wave_angle.tan();
    for i in 1..=params.max_shadow_steps {
        let dist = i as f64 * params.shadow_step;
        let r = row - (dist * cos).round_ties_even() as i64;
        let c = col - (dist * sin).round_ties_even() as i64;
        let Probe::Cell(cell) = grid.probe(r, c) else {
            return false;
        };
        // NaN when marching straight up the own column: never shadows
        let reach = occupancy + ((c - col) as f64 / tan).abs();
        if is_full(grid.occupancy(cell)) && ((r - 1) as f64) < row as f64 - reach {
            return true;
        }
    }
    false
}
