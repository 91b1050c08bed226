//! Local re-splice of a chain around one node.

use littoral_core::{CellPos, NodeId, TopologyError};
use littoral_grid::{Grid, GridEdge, Probe};

use crate::node::{Node, NodeKind};
use crate::shoreline::Shoreline;
use crate::tracer::{direction_between, moore_trace, Rotation, Trace, TraceEnd, TraceFault, TraceRequest, RING};

fn failed(node: NodeId, reason: &str) -> TopologyError {
    TopologyError::SpliceFailed {
        node,
        reason: reason.to_string(),
    }
}

/// First non-land direction from `from`, scanning against `rotation`
/// starting at the direction toward `toward`.
fn seed_backtrack(grid: &Grid, from: CellPos, toward: CellPos, rotation: Rotation) -> Option<usize> {
    let d0 = direction_between(grid, from, toward)?;
    (0..8)
        .map(|k| rotation.reversed().turn(d0, k))
        .find(|&d| match grid.offset(from, RING[d].0, RING[d].1) {
            Probe::Sea => true,
            Probe::Cell(p) => !grid.is_land(p),
            Probe::Exit(_) => false,
        })
}

fn walk(
    grid: &Grid,
    node: NodeId,
    start: CellPos,
    toward: CellPos,
    rotation: Rotation,
    stop: Option<CellPos>,
) -> Result<Trace, TopologyError> {
    let backtrack = seed_backtrack(grid, start, toward, rotation)
        .ok_or_else(|| failed(node, "no water next to the segment start"))?;
    let req = TraceRequest {
        start,
        backtrack,
        rotation,
        stop,
        claimed: &|p: CellPos| grid.node_at(p).is_some(),
    };
    moore_trace(grid, &req).map_err(|fault| match fault {
        TraceFault::Claimed(p) => TopologyError::SpliceFailed {
            node,
            reason: format!("segment runs into claimed cell {p}"),
        },
        TraceFault::Looped => failed(node, "segment loops back to its start"),
        TraceFault::Runaway => failed(node, "segment trace does not terminate"),
    })
}

/// Link fresh interior nodes for `cells` between `after` and `before`.
fn insert_run(
    grid: &mut Grid,
    shore: &mut Shoreline,
    after: NodeId,
    cells: impl IntoIterator<Item = CellPos>,
    before: NodeId,
) -> Result<(), TopologyError> {
    let chain = shore.node(after)?.chain;
    let mut tail = after;
    shore.node_mut(after)?.props.clear_geometry();
    shore.node_mut(before)?.props.clear_geometry();
    for pos in cells {
        let id = shore.alloc(grid, Node::interior(pos, chain))?;
        shore.link(tail, id)?;
        tail = id;
    }
    shore.link(tail, before)
}

fn move_sentinel(shore: &mut Shoreline, sentinel: NodeId, edge: GridEdge) -> Result<(), TopologyError> {
    shore.node_mut(sentinel)?.kind = NodeKind::Boundary { edge };
    Ok(())
}

/// Remove `id` from its chain and re-trace the boundary between its
/// neighbours.
///
/// Returns the node after the re-spliced segment, from which a sweep can
/// carry on.
///
/// # Errors
///
/// [`TopologyError::SpliceFailed`] when the segment cannot be re-traced
/// locally. `id` is gone and its neighbours are linked directly, so the
/// shoreline stays walkable until the caller re-traces it in full.
pub fn replace_node(grid: &mut Grid, shore: &mut Shoreline, id: NodeId) -> Result<NodeId, TopologyError> {
    let node = shore.node(id)?;
    let Some(pos) = node.pos() else {
        return Err(failed(id, "sentinels are not re-spliced"));
    };
    let (prev, next, chain) = (node.prev, node.next, node.chain);
    let closed = shore.is_closed(chain);
    let degenerate = closed && shore.chain_len(chain) <= 3;
    shore.unlink(grid, id)?;

    let (Some(prev), Some(next)) = (prev, next) else {
        return Err(failed(id, "node is missing a neighbour"));
    };
    if degenerate {
        return Err(failed(id, "closed chain of three nodes or fewer"));
    }

    match (shore.position(prev), shore.position(next)) {
        (Some(from), Some(to)) => {
            let trace = walk(grid, id, from, pos, Rotation::Clockwise, Some(to))?;
            let cells = trace.cells.iter().skip(1).copied();
            match trace.end {
                TraceEnd::Reached(_) => {
                    insert_run(grid, shore, prev, cells, next)?;
                    Ok(next)
                }
                TraceEnd::Exited(edge) if !closed => {
                    let sentinel = shore
                        .end_sentinel(next)
                        .ok_or_else(|| failed(id, "open chain has no end sentinel"))?;
                    shore.free_run(grid, next, sentinel)?;
                    move_sentinel(shore, sentinel, edge)?;
                    insert_run(grid, shore, prev, cells, sentinel)?;
                    Ok(sentinel)
                }
                _ => Err(failed(id, "segment reaches neither its successor nor an edge")),
            }
        }
        (Some(from), None) => {
            let trace = walk(grid, id, from, pos, Rotation::Clockwise, None)?;
            let TraceEnd::Exited(edge) = trace.end else {
                return Err(failed(id, "segment before the end sentinel does not exit"));
            };
            move_sentinel(shore, next, edge)?;
            insert_run(grid, shore, prev, trace.cells.iter().skip(1).copied(), next)?;
            Ok(next)
        }
        (None, Some(to)) => {
            let trace = walk(grid, id, to, pos, Rotation::CounterClockwise, None)?;
            let TraceEnd::Exited(edge) = trace.end else {
                return Err(failed(id, "segment after the start sentinel does not exit"));
            };
            move_sentinel(shore, prev, edge)?;
            insert_run(grid, shore, prev, trace.cells.iter().skip(1).rev().copied(), next)?;
            Ok(next)
        }
        (None, None) => Err(failed(id, "both neighbours are sentinels")),
    }
}
