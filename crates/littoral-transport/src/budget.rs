//! Sediment budget: flow classification, supply clipping and net volume
//! change per node.
//!
//! A node's transport potential is the flux across the boundary between
//! it and its successor, in the node's transport direction. A start
//! sentinel stands in for the first node, so that node's upstream flux is
//! its own.

use littoral_core::tolerance::is_full;
use littoral_core::{FlowDirection, NodeId, TransportDir};
use littoral_grid::Grid;
use littoral_shoreline::{next_angle, Shoreline};
use tracing::debug;

use crate::closure::{cell_behind, closure_depth};
use crate::params::TransportParams;

/// Totals from one [`sediment_budget`] pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BudgetStats {
    /// Potentials reduced to the available supply.
    pub clipped: usize,
    /// Net volume carried off the grid through boundary sentinels (m³).
    /// Negative when the boundaries feed the grid.
    pub boundary_outflux: f64,
    /// Sum of net volume changes over all interior nodes (m³).
    pub net_change: f64,
}

/// Node whose flux crosses the upstream boundary of `id`.
fn upstream(shore: &Shoreline, id: NodeId) -> NodeId {
    match shore.prev(id) {
        Some(p) if !shore.is_boundary(p) => p,
        _ => id,
    }
}

fn potential(shore: &Shoreline, id: NodeId) -> f64 {
    shore.get(id).map_or(0.0, |n| n.props.transport_potential)
}

fn direction(shore: &Shoreline, id: NodeId) -> TransportDir {
    shore.get(id).map_or(TransportDir::None, |n| n.props.transport_dir)
}

fn lower_potential(shore: &mut Shoreline, id: NodeId, value: f64) -> bool {
    match shore.get_mut(id) {
        Some(node) if value < node.props.transport_potential => {
            node.props.transport_potential = value;
            true
        }
        _ => false,
    }
}

/// Net flow at `id` from its upstream and own transport directions.
pub fn flow_direction(shore: &Shoreline, id: NodeId) -> FlowDirection {
    FlowDirection::classify(direction(shore, upstream(shore, id)), direction(shore, id))
}

/// Classify every interior node's flow, clip potentials to the sediment
/// each node can supply and record its net volume change and depth of
/// closure.
pub fn sediment_budget(grid: &Grid, shore: &mut Shoreline, params: &TransportParams) -> BudgetStats {
    let mut stats = BudgetStats::default();
    for chain in shore.chain_ids() {
        let ids: Vec<NodeId> = shore
            .nodes(chain)
            .into_iter()
            .filter(|&id| !shore.is_boundary(id))
            .collect();
        for &id in &ids {
            if clip_to_supply(grid, shore, id, params) {
                stats.clipped += 1;
            }
        }
        for &id in &ids {
            let net = net_volume_change(shore, id);
            if let Some(node) = shore.get_mut(id) {
                node.props.net_volume_change = net;
            }
            stats.net_change += net;
        }
        if !shore.is_closed(chain) {
            stats.boundary_outflux += boundary_discharge(shore, &ids);
        }
    }
    debug!(
        clipped = stats.clipped,
        outflux = stats.boundary_outflux,
        "sediment budget"
    );
    stats
}

/// Reduce the potentials draining `id` to what it can supply. Returns
/// whether any potential was lowered.
fn clip_to_supply(grid: &Grid, shore: &mut Shoreline, id: NodeId, params: &TransportParams) -> bool {
    let Some(pos) = shore.position(id) else {
        return false;
    };
    let up = upstream(shore, id);
    let flow = flow_direction(shore, id);
    let (own, prev) = (potential(shore, id), potential(shore, up));
    let (need_left, need_right) = match flow {
        FlowDirection::Right => (0.0, own),
        FlowDirection::Divergent => (prev, own),
        FlowDirection::Left => (prev, 0.0),
        FlowDirection::Convergent | FlowDirection::None => (0.0, 0.0),
    };

    let depth = closure_depth(grid, shore, id, params);
    let angle = next_angle(grid, shore, id).unwrap_or(0.0);
    let area = grid.cell_area();
    let mut available = grid.occupancy(pos).max(0.0) * area * depth;
    if let Some(behind) = cell_behind(grid, pos, angle, params.supply) {
        let occupancy = grid.occupancy(behind);
        if is_full(occupancy) {
            available += occupancy * area * depth;
        }
    }
    if let Some(node) = shore.get_mut(id) {
        node.props.closure_depth = depth;
        node.props.flow_direction = flow;
    }

    let needed = need_left + need_right;
    if needed <= available {
        return false;
    }
    match flow {
        FlowDirection::Divergent => {
            let left = lower_potential(shore, up, need_left / needed * available);
            let right = lower_potential(shore, id, need_right / needed * available);
            left || right
        }
        FlowDirection::Right => lower_potential(shore, id, available + prev),
        FlowDirection::Left if up != id => lower_potential(shore, up, available + own),
        _ => false,
    }
}

/// Volume in minus volume out of `id` (m³).
fn net_volume_change(shore: &Shoreline, id: NodeId) -> f64 {
    let up = upstream(shore, id);
    let (own, prev) = (potential(shore, id), potential(shore, up));
    match flow_direction(shore, id) {
        FlowDirection::Right => prev - own,
        FlowDirection::Left => own - prev,
        FlowDirection::Convergent => own + prev,
        FlowDirection::Divergent => -(own + prev),
        FlowDirection::None => 0.0,
    }
}

/// Net volume leaving an open chain through its two sentinels.
fn boundary_discharge(shore: &Shoreline, ids: &[NodeId]) -> f64 {
    let signed = |id: NodeId| match direction(shore, id) {
        TransportDir::Right => potential(shore, id),
        TransportDir::Left => -potential(shore, id),
        TransportDir::None => 0.0,
    };
    let (Some(&first), Some(&last)) = (ids.first(), ids.last()) else {
        return 0.0;
    };
    signed(last) - signed(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ClosurePolicy;
    use littoral_core::CellPos;
    use littoral_shoreline::trace_all;
    use littoral_test_utils::strip_grid;
    use proptest::prelude::*;

    fn coast() -> (Grid, Shoreline, TransportParams) {
        let mut grid = strip_grid(4, 5, 2);
        let mut shore = Shoreline::new();
        trace_all(&mut grid, &mut shore).unwrap();
        let params = TransportParams {
            closure: ClosurePolicy::Fixed(10.0),
            ..TransportParams::default()
        };
        (grid, shore, params)
    }

    fn set(shore: &mut Shoreline, id: NodeId, dir: TransportDir, q: f64) {
        let props = &mut shore.get_mut(id).unwrap().props;
        props.transport_dir = dir;
        props.transport_potential = q;
    }

    fn net(shore: &Shoreline, id: NodeId) -> f64 {
        shore.get(id).unwrap().props.net_volume_change
    }

    #[test]
    fn uniform_flux_only_changes_the_ends() {
        let (grid, mut shore, params) = coast();
        let ids = shore.interior_nodes();
        for &id in &ids {
            set(&mut shore, id, TransportDir::Right, 5.0);
        }
        let stats = sediment_budget(&grid, &mut shore, &params);
        for &id in &ids {
            assert_eq!(net(&shore, id), 0.0);
            assert_eq!(shore.get(id).unwrap().props.flow_direction, FlowDirection::Right);
            assert_eq!(shore.get(id).unwrap().props.closure_depth, 10.0);
        }
        assert_eq!(stats.boundary_outflux, 0.0);
        assert_eq!(stats.clipped, 0);
    }

    #[test]
    fn convergence_gains_and_divergence_loses() {
        let (grid, mut shore, params) = coast();
        let ids = shore.interior_nodes();
        let dirs = [
            TransportDir::Right,
            TransportDir::Left,
            TransportDir::Left,
            TransportDir::Right,
            TransportDir::Right,
        ];
        for (&id, dir) in ids.iter().zip(dirs) {
            set(&mut shore, id, dir, 2.0);
        }
        sediment_budget(&grid, &mut shore, &params);
        // node 1: Right then Left, gains from both sides
        assert_eq!(shore.get(ids[1]).unwrap().props.flow_direction, FlowDirection::Convergent);
        assert_eq!(net(&shore, ids[1]), 4.0);
        // node 3: Left then Right, loses to both sides
        assert_eq!(shore.get(ids[3]).unwrap().props.flow_direction, FlowDirection::Divergent);
        assert_eq!(net(&shore, ids[3]), -4.0);
    }

    #[test]
    fn demand_is_clipped_to_supply() {
        let (mut grid, mut shore, params) = coast();
        grid.set_occupancy(CellPos::new(2, 2), 0.1);
        let ids = shore.interior_nodes();
        for &id in &ids {
            set(&mut shore, id, TransportDir::Right, 0.0);
        }
        set(&mut shore, ids[2], TransportDir::Right, 1000.0);

        let stats = sediment_budget(&grid, &mut shore, &params);

        // own cell 0.1 plus the full cell behind it, 10 m deep
        let supply = 0.1 * 10.0 + 1.0 * 10.0;
        let q = shore.get(ids[2]).unwrap().props.transport_potential;
        assert!((q - supply).abs() < 1e-9, "{q}");
        assert!((net(&shore, ids[2]) + supply).abs() < 1e-9);
        assert!((net(&shore, ids[3]) - supply).abs() < 1e-9);
        assert_eq!(stats.clipped, 1);
    }

    #[test]
    fn first_node_behind_a_sentinel_is_balanced() {
        let (grid, mut shore, params) = coast();
        let ids = shore.interior_nodes();
        set(&mut shore, ids[0], TransportDir::Left, 3.0);
        let stats = sediment_budget(&grid, &mut shore, &params);
        assert_eq!(net(&shore, ids[0]), 0.0);
        assert_eq!(net(&shore, ids[1]), -3.0);
        assert_eq!(stats.boundary_outflux, 3.0);
    }

    fn dir_strategy() -> impl Strategy<Value = TransportDir> {
        prop_oneof![
            Just(TransportDir::Right),
            Just(TransportDir::Left),
            Just(TransportDir::None),
        ]
    }

    proptest! {
        #[test]
        fn budget_conserves_volume(
            flux in prop::collection::vec((dir_strategy(), 0.0f64..50.0), 5),
        ) {
            let (grid, mut shore, params) = coast();
            let ids = shore.interior_nodes();
            for (&id, &(dir, q)) in ids.iter().zip(&flux) {
                let q = if dir == TransportDir::None { 0.0 } else { q };
                set(&mut shore, id, dir, q);
            }
            let stats = sediment_budget(&grid, &mut shore, &params);
            prop_assert!((stats.net_change + stats.boundary_outflux).abs() < 1e-9);
        }
    }
}
