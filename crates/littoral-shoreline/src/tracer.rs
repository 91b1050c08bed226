//! Moore-neighbour boundary tracing.
//!
//! [`trace_all`] rebuilds every chain from the occupancy grid. The
//! lower-level [`moore_trace`] walks one boundary and is shared with the
//! local re-splice in [`splice`](crate::splice).

use indexmap::IndexSet;
use littoral_core::{CellPos, TopologyError};
use littoral_grid::{landmass, open_water, Grid, GridEdge, Probe};
use tracing::debug;

use crate::shoreline::Shoreline;

/// The 8 Moore directions as `(dr, dc)`, clockwise from north.
pub const RING: [(i64, i64); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

/// Index of north (seaward) in [`RING`].
pub const NORTH: usize = 0;

/// Rotation sense of a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    /// Sea on the left of the direction of travel.
    Clockwise,
    /// Sea on the right of the direction of travel.
    CounterClockwise,
}

impl Rotation {
    /// Direction `steps` eighth-turns from `dir` in this sense.
    pub fn turn(self, dir: usize, steps: usize) -> usize {
        match self {
            Self::Clockwise => (dir + steps) % 8,
            Self::CounterClockwise => (dir + 8 - steps % 8) % 8,
        }
    }

    /// The opposite sense.
    pub fn reversed(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }
}

fn ring_index(dr: i64, dc: i64) -> Option<usize> {
    RING.iter().position(|&d| d == (dr, dc))
}

/// [`RING`] index of the step from `from` to an adjacent cell `to`,
/// wrap-aware.
pub fn direction_between(grid: &Grid, from: CellPos, to: CellPos) -> Option<usize> {
    (0..8).find(|&d| grid.offset(from, RING[d].0, RING[d].1) == Probe::Cell(to))
}

/// One Moore step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    /// Next boundary cell, with the backtrack direction as seen from it.
    Found { pos: CellPos, backtrack: usize },
    /// The rotation probed off a side or bottom edge.
    Exit(GridEdge),
    /// No land around the cell at all.
    Isolated,
}

fn moore_step(grid: &Grid, curr: CellPos, backtrack: usize, rotation: Rotation) -> Step {
    for k in 1..=8 {
        let d = rotation.turn(backtrack, k);
        match grid.offset(curr, RING[d].0, RING[d].1) {
            Probe::Exit(edge) => return Step::Exit(edge),
            Probe::Sea => {}
            Probe::Cell(pos) if grid.is_land(pos) => {
                // backtrack = the last non-land probe, seen from `pos`
                let before = rotation.turn(backtrack, k - 1);
                let (br, bc) = (RING[before].0 - RING[d].0, RING[before].1 - RING[d].1);
                let backtrack = ring_index(br, bc).unwrap_or(NORTH);
                return Step::Found { pos, backtrack };
            }
            Probe::Cell(_) => {}
        }
    }
    Step::Isolated
}

/// How a trace ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceEnd {
    /// Came back to the start cell the way it first left it.
    Closed,
    /// Probed off the grid through this edge.
    Exited(GridEdge),
    /// Reached the requested stop cell.
    Reached(CellPos),
    /// The start cell has no land neighbour.
    Isolated,
}

/// Result of walking one boundary.
#[derive(Clone, Debug)]
pub struct Trace {
    /// Boundary cells in walk order, start first. Revisited cells keep
    /// their first position.
    pub cells: IndexSet<CellPos>,
    /// How the walk ended.
    pub end: TraceEnd,
}

/// Why a trace could not finish.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceFault {
    /// Walked onto a cell owned by another chain.
    Claimed(CellPos),
    /// A stop cell was requested but the walk came back to its start.
    Looped,
    /// Exceeded the step limit.
    Runaway,
}

/// Parameters of one boundary walk.
pub struct TraceRequest<'a> {
    /// First cell of the walk.
    pub start: CellPos,
    /// Direction (from `start`) of the non-land cell the walk starts
    /// rotating from.
    pub backtrack: usize,
    /// Rotation sense.
    pub rotation: Rotation,
    /// Cell that ends the walk when reached.
    pub stop: Option<CellPos>,
    /// Cells the walk must not enter (other chains).
    pub claimed: &'a dyn Fn(CellPos) -> bool,
}

/// Walk a boundary from `req.start` until it closes, exits the grid or
/// reaches `req.stop`.
///
/// When the walk enters a claimed cell while adjacent to the stop cell,
/// it ends at the stop cell instead.
pub fn moore_trace(grid: &Grid, req: &TraceRequest<'_>) -> Result<Trace, TraceFault> {
    let limit = 4 * grid.cell_count() + 8;
    let mut cells = IndexSet::new();
    cells.insert(req.start);
    let mut curr = req.start;
    let mut backtrack = req.backtrack;
    let mut first_step: Option<CellPos> = None;

    for _ in 0..limit {
        let (pos, next_backtrack) = match moore_step(grid, curr, backtrack, req.rotation) {
            Step::Found { pos, backtrack } => (pos, backtrack),
            Step::Exit(edge) => return Ok(Trace { cells, end: TraceEnd::Exited(edge) }),
            Step::Isolated => return Ok(Trace { cells, end: TraceEnd::Isolated }),
        };
        if req.stop == Some(pos) {
            return Ok(Trace { cells, end: TraceEnd::Reached(pos) });
        }
        if pos == req.start {
            if req.stop.is_some() {
                return Err(TraceFault::Looped);
            }
            // Jacob's criterion: closed only if the walk would leave the
            // start the same way again.
            let again = moore_step(grid, pos, next_backtrack, req.rotation);
            if matches!(again, Step::Found { pos: p, .. } if Some(p) == first_step) {
                return Ok(Trace { cells, end: TraceEnd::Closed });
            }
        } else if (req.claimed)(pos) {
            return match req.stop {
                Some(stop) if curr.is_adjacent(stop) => Ok(Trace {
                    cells,
                    end: TraceEnd::Reached(stop),
                }),
                _ => Err(TraceFault::Claimed(pos)),
            };
        }
        first_step.get_or_insert(pos);
        cells.insert(pos);
        curr = pos;
        backtrack = next_backtrack;
    }
    Err(TraceFault::Runaway)
}

/// Discard every chain and trace the grid from scratch.
///
/// Scans column-major, top to bottom, starting one chain per 8-connected
/// landmass at its first land cell facing open water. Returns the number
/// of chains found.
///
/// # Errors
///
/// [`TopologyError::InvalidGrid`] if a boundary neither closes nor
/// reaches an edge, [`TopologyError::Allocation`] if storage cannot grow.
pub fn trace_all(grid: &mut Grid, shore: &mut Shoreline) -> Result<usize, TopologyError> {
    shore.clear(grid);
    let water = open_water(grid);
    let mut traced = vec![false; grid.cell_count()];
    let cols = grid.cols();

    for c in 0..cols {
        for r in 0..grid.rows() {
            let start = CellPos::new(r, c);
            if traced[r * cols + c] || !grid.is_land(start) || !water.faces_sea(start) {
                continue;
            }
            for p in landmass(grid, start) {
                traced[p.row * cols + p.col] = true;
            }
            trace_landmass(grid, shore, start)?;
        }
    }
    debug!(
        chains = shore.chain_count(),
        nodes = shore.node_count(),
        "shoreline traced"
    );
    Ok(shore.chain_count())
}

fn trace_landmass(grid: &mut Grid, shore: &mut Shoreline, start: CellPos) -> Result<(), TopologyError> {
    let invalid = |reason: String| TopologyError::InvalidGrid { start, reason };
    let fault = |f: TraceFault| match f {
        TraceFault::Claimed(p) => invalid(format!("runs into {p}, which belongs to another chain")),
        TraceFault::Looped | TraceFault::Runaway => {
            invalid("neither closes nor reaches a grid edge".to_string())
        }
    };
    let walk = |rotation: Rotation| {
        let req = TraceRequest {
            start,
            backtrack: NORTH,
            rotation,
            stop: None,
            claimed: &|p: CellPos| grid.node_at(p).is_some(),
        };
        moore_trace(grid, &req).map_err(fault)
    };

    let cw = walk(Rotation::Clockwise)?;
    match cw.end {
        TraceEnd::Closed | TraceEnd::Isolated => {
            shore.build_chain(grid, cw.cells, None)?;
        }
        TraceEnd::Exited(end_edge) => {
            let ccw = walk(Rotation::CounterClockwise)?;
            let TraceEnd::Exited(start_edge) = ccw.end else {
                return Err(invalid(
                    "reaches a grid edge on one side only".to_string(),
                ));
            };
            let mut cells: IndexSet<CellPos> = ccw.cells.iter().skip(1).rev().copied().collect();
            cells.extend(cw.cells);
            shore.build_chain(grid, cells, Some((start_edge, end_edge)))?;
        }
        TraceEnd::Reached(_) => return Err(invalid("stopped without a stop cell".to_string())),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_turns_wrap_around() {
        assert_eq!(Rotation::Clockwise.turn(7, 1), 0);
        assert_eq!(Rotation::CounterClockwise.turn(0, 1), 7);
        assert_eq!(Rotation::CounterClockwise.turn(3, 8), 3);
        assert_eq!(Rotation::Clockwise.reversed(), Rotation::CounterClockwise);
    }

    #[test]
    fn backtrack_after_step_is_last_water_probe() {
        // Land at (1,0) and (1,1); stepping east from (1,0) with the
        // backtrack north leaves the backtrack at (0,1)... seen from (1,1)
        // that is north.
        let mut grid = Grid::new(3, 3, 1.0, 1.0).unwrap();
        grid.set_occupancy(CellPos::new(1, 0), 1.0);
        grid.set_occupancy(CellPos::new(1, 1), 1.0);
        let step = moore_step(&grid, CellPos::new(1, 0), NORTH, Rotation::Clockwise);
        assert_eq!(
            step,
            Step::Found {
                pos: CellPos::new(1, 1),
                backtrack: NORTH
            }
        );
    }

    #[test]
    fn direction_between_neighbours() {
        let grid = Grid::new(3, 3, 1.0, 1.0).unwrap();
        assert_eq!(direction_between(&grid, CellPos::new(1, 1), CellPos::new(0, 2)), Some(1));
        assert_eq!(direction_between(&grid, CellPos::new(1, 1), CellPos::new(1, 0)), Some(6));
        assert_eq!(direction_between(&grid, CellPos::new(0, 0), CellPos::new(2, 2)), None);
    }
}
