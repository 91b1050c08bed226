//! Local shoreline orientation, memoized per timestep.
//!
//! Angles are measured with rows increasing *upward* (seaward) and
//! columns to the right, scaled by the physical cell size, and
//! normalized to `(-π, π]`. A horizontal coast traced left to right has
//! angle 0. `None` stands for "no angle here" (a missing or
//! cross-boundary neighbour) and callers treat it as "no transport".

use std::f64::consts::PI;

use littoral_core::{CellPos, NodeId};
use littoral_grid::{EdgeBehavior, Grid, GridEdge};

use crate::node::NodeKind;
use crate::shoreline::Shoreline;

/// Normalize an angle to `(-π, π]`.
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(2.0 * PI);
    if a > PI {
        a - 2.0 * PI
    } else {
        a
    }
}

/// `a - b`, normalized to `(-π, π]`.
pub fn angle_difference(a: f64, b: f64) -> f64 {
    normalize_angle(a - b)
}

/// Signed column step from `from` to `to`, taking the short way round on
/// periodic grids.
pub fn column_delta(grid: &Grid, from: usize, to: usize) -> f64 {
    let mut dc = to as f64 - from as f64;
    if grid.edge() == EdgeBehavior::Wrap {
        let cols = grid.cols() as f64;
        if dc > cols / 2.0 {
            dc -= cols;
        } else if dc < -cols / 2.0 {
            dc += cols;
        }
    }
    dc
}

/// Orientation of the vector from cell `a` to cell `b`, with each end
/// shifted by its cell's occupancy so the sand edge, not the cell centre,
/// is the reference point.
pub fn edge_angle(grid: &Grid, a: CellPos, b: CellPos) -> Option<f64> {
    let mut dr = a.row as f64 - b.row as f64;
    let mut dc = column_delta(grid, a.col, b.col);
    if dr == 0.0 && dc == 0.0 {
        return None;
    }
    let df = grid.occupancy(b) - grid.occupancy(a);
    if dc == 0.0 {
        // vertical pair: shift across the column
        dc -= dr.signum() * df;
    } else {
        dr += dc.signum() * df;
    }
    let angle = (dr * grid.cell_length()).atan2(dc * grid.cell_width());
    angle.is_finite().then(|| normalize_angle(angle))
}

fn interior(shore: &Shoreline, id: Option<NodeId>) -> Option<CellPos> {
    id.and_then(|id| shore.position(id))
}

/// Angle arriving at `id` from its predecessor.
///
/// At the start of an open chain this is the angle toward the successor.
pub fn prev_angle(grid: &Grid, shore: &mut Shoreline, id: NodeId) -> Option<f64> {
    let now = grid.timestep();
    let node = shore.get(id)?;
    if let Some(cached) = node.props.prev_angle.get(now) {
        return Some(cached);
    }
    let (kind, prev, next) = (node.kind, node.prev, node.next);
    let angle = match kind {
        NodeKind::Boundary { .. } => sentinel_angle(grid, shore, prev, next)?,
        NodeKind::Interior { pos } => match interior(shore, prev) {
            Some(p) => edge_angle(grid, p, pos)?,
            None => edge_angle(grid, pos, interior(shore, next)?)?,
        },
    };
    shore.get_mut(id)?.props.prev_angle.set(now, angle);
    Some(angle)
}

/// Angle leaving `id` toward its successor.
///
/// At the end of an open chain this is the angle from the predecessor.
pub fn next_angle(grid: &Grid, shore: &mut Shoreline, id: NodeId) -> Option<f64> {
    let now = grid.timestep();
    let node = shore.get(id)?;
    if let Some(cached) = node.props.next_angle.get(now) {
        return Some(cached);
    }
    let (kind, prev, next) = (node.kind, node.prev, node.next);
    let angle = match kind {
        NodeKind::Boundary { .. } => sentinel_angle(grid, shore, prev, next)?,
        NodeKind::Interior { pos } => match interior(shore, next) {
            Some(n) => edge_angle(grid, pos, n)?,
            None => edge_angle(grid, interior(shore, prev)?, pos)?,
        },
    };
    shore.get_mut(id)?.props.next_angle.set(now, angle);
    Some(angle)
}

/// Mean of the angles on either side of `id`.
pub fn surrounding_angle(grid: &Grid, shore: &mut Shoreline, id: NodeId) -> Option<f64> {
    let now = grid.timestep();
    let node = shore.get(id)?;
    if let Some(cached) = node.props.surrounding_angle.get(now) {
        return Some(cached);
    }
    let (kind, prev, next) = (node.kind, node.prev, node.next);
    let angle = match kind {
        NodeKind::Boundary { .. } => sentinel_angle(grid, shore, prev, next)?,
        NodeKind::Interior { .. } => {
            prev?;
            next?;
            let before = prev_angle(grid, shore, id)?;
            let after = next_angle(grid, shore, id)?;
            normalize_angle(before + angle_difference(after, before) / 2.0)
        }
    };
    shore.get_mut(id)?.props.surrounding_angle.set(now, angle);
    Some(angle)
}

/// A sentinel has no geometry of its own: the start sentinel reports its
/// successor's outgoing angle, the end sentinel its predecessor's
/// incoming angle.
fn sentinel_angle(
    grid: &Grid,
    shore: &mut Shoreline,
    prev: Option<NodeId>,
    next: Option<NodeId>,
) -> Option<f64> {
    match (prev, next) {
        (None, Some(n)) if !shore.is_boundary(n) => next_angle(grid, shore, n),
        (Some(p), None) if !shore.is_boundary(p) => prev_angle(grid, shore, p),
        _ => None,
    }
}

/// Grid coordinates `(row, col)` of a node.
///
/// Interior nodes report their cell. A sentinel reports the fixed edge
/// coordinate (`-1` or `cols` for side edges, `rows` for the bottom) and
/// projects the other coordinate from its real neighbour along that
/// neighbour's local angle, falling back to the neighbour's own
/// coordinate when the projection is undefined.
pub fn node_position(grid: &Grid, shore: &mut Shoreline, id: NodeId) -> Option<(i64, i64)> {
    let node = shore.get(id)?;
    let (kind, prev, next) = (node.kind, node.prev, node.next);
    let edge = match kind {
        NodeKind::Interior { pos } => return Some((pos.row as i64, pos.col as i64)),
        NodeKind::Boundary { edge } => edge,
    };
    let (anchor_id, angle) = match (prev, next) {
        (None, Some(n)) => (n, next_angle(grid, shore, n)),
        (Some(p), None) => (p, prev_angle(grid, shore, p)),
        _ => return None,
    };
    let anchor = shore.position(anchor_id)?;
    let (ar, ac) = (anchor.row as f64, anchor.col as f64);
    let tan = angle.map(f64::tan);
    let aspect = grid.cell_width() / grid.cell_length();
    let projected = |v: f64, fallback: f64| if v.is_finite() { v.round() as i64 } else { fallback as i64 };
    Some(match edge {
        GridEdge::Left | GridEdge::Right => {
            let col = if edge == GridEdge::Left { -1.0 } else { grid.cols() as f64 };
            let row = tan.map_or(f64::NAN, |t| ar - (col - ac) * t * aspect);
            (projected(row, ar), col as i64)
        }
        GridEdge::Bottom => {
            let row = grid.rows() as f64;
            let col = tan.map_or(f64::NAN, |t| ac + (ar - row) / t / aspect);
            (row as i64, projected(col, ac))
        }
    })
}
