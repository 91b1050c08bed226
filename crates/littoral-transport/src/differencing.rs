//! Upwind/downwind choice of the shore angle driving transport at a node.

use std::f64::consts::FRAC_PI_2;

use littoral_core::{NodeId, TransportDir};
use littoral_grid::Grid;
use littoral_shoreline::{angle_difference, next_angle, prev_angle, surrounding_angle, Shoreline};

use crate::params::TransportParams;
use crate::shadow::is_shadowed;

/// Shore angle chosen for a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShoreAngle {
    /// A usable angle (radians).
    Angle(f64),
    /// Neighbouring instability makes the angle meaningless; transport
    /// falls back to the default incidence.
    Undefined,
}

/// Pick the shore angle for `id` under waves from `wave_angle` and record
/// the node's transport direction.
///
/// The flux across the `(id, next)` boundary runs right when the waves
/// approach from the left of the outgoing edge. The angle is then taken
/// from the upwind or downwind side of the node carrying that flux,
/// depending on whether the neighbourhood is unstable (wave/shore angle
/// difference beyond `params.instability_threshold`) and which
/// neighbours are in shadow.
///
/// Returns `None` when the node has no outgoing edge angle at all.
pub fn shore_angle(
    grid: &Grid,
    shore: &mut Shoreline,
    id: NodeId,
    wave_angle: f64,
    params: &TransportParams,
) -> Option<ShoreAngle> {
    let alpha = wave_angle - next_angle(grid, shore, id)?;
    let node = shore.get(id)?;
    let (prev, next) = (node.prev?, node.next?);

    let (dir, calc, downwind, upwind) = if alpha > 0.0 {
        (TransportDir::Right, id, next, prev)
    } else {
        let upwind = if shore.is_boundary(next) {
            next
        } else {
            shore.next(next)?
        };
        (TransportDir::Left, next, id, upwind)
    };
    shore.get_mut(id)?.props.transport_dir = dir;

    let (upwind_angle, downwind_angle) = match dir {
        TransportDir::Right => (
            prev_angle(grid, shore, calc),
            next_angle(grid, shore, calc),
        ),
        _ => (
            next_angle(grid, shore, calc),
            prev_angle(grid, shore, calc),
        ),
    };

    let facing_away = ShoreAngle::Angle(wave_angle - FRAC_PI_2);
    if is_shadowed(grid, shore, calc, wave_angle, params) {
        return Some(facing_away);
    }
    let downwind_shadow = is_shadowed(grid, shore, downwind, wave_angle, params);
    let upwind_shadow = is_shadowed(grid, shore, upwind, wave_angle, params);

    let mut unstable = unstable_at(grid, shore, calc, wave_angle, params).unwrap_or(false);
    let unstable_downwind = neighbour_unstable(grid, shore, downwind, wave_angle, params, unstable);
    let unstable_upwind = neighbour_unstable(grid, shore, upwind, wave_angle, params, unstable);

    if !unstable
        && ((unstable_downwind && !downwind_shadow) || (unstable_upwind && !upwind_shadow))
    {
        return Some(ShoreAngle::Undefined);
    }
    if downwind_shadow {
        unstable = true;
    }
    if unstable && upwind_shadow {
        return Some(facing_away);
    }
    let chosen = if unstable {
        upwind_angle
    } else {
        downwind_angle
    };
    Some(chosen.map_or(ShoreAngle::Undefined, ShoreAngle::Angle))
}

fn unstable_at(
    grid: &Grid,
    shore: &mut Shoreline,
    id: NodeId,
    wave_angle: f64,
    params: &TransportParams,
) -> Option<bool> {
    let surrounding = surrounding_angle(grid, shore, id)?;
    Some(angle_difference(wave_angle, surrounding).abs() >= params.instability_threshold)
}

/// Sentinels and nodes without geometry inherit the calc node's flag.
fn neighbour_unstable(
    grid: &Grid,
    shore: &mut Shoreline,
    id: NodeId,
    wave_angle: f64,
    params: &TransportParams,
    calc_flag: bool,
) -> bool {
    if shore.is_boundary(id) {
        return calc_flag;
    }
    unstable_at(grid, shore, id, wave_angle, params).unwrap_or(calc_flag)
}
