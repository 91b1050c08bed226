//! Integration tests: full trace and local re-splice on small grids.

use littoral_core::{CellPos, NodeId};
use littoral_grid::{EdgeBehavior, Grid, GridEdge};
use littoral_shoreline::{replace_node, trace_all, NodeKind, Shoreline};
use littoral_test_utils::{grid_from_rows, island_grid, spit_grid, strip_grid};
use proptest::prelude::*;

fn traced(grid: &mut Grid) -> Shoreline {
    let mut shore = Shoreline::new();
    trace_all(grid, &mut shore).expect("trace");
    shore
}

/// Interior positions of the only chain, in link order.
fn cells(shore: &Shoreline) -> Vec<(usize, usize)> {
    let chain = shore.chain_ids()[0];
    shore
        .nodes(chain)
        .into_iter()
        .filter_map(|id| shore.position(id))
        .map(|p| (p.row, p.col))
        .collect()
}

fn edges(shore: &Shoreline) -> (Option<GridEdge>, Option<GridEdge>) {
    let chain = shore.chain_ids()[0];
    let ids = shore.nodes(chain);
    let edge = |id: Option<&NodeId>| match id.and_then(|&id| shore.get(id)).map(|n| n.kind) {
        Some(NodeKind::Boundary { edge }) => Some(edge),
        _ => None,
    };
    (edge(ids.first()), edge(ids.last()))
}

fn node_at(grid: &Grid, row: usize, col: usize) -> NodeId {
    grid.node_at(CellPos::new(row, col)).expect("enrolled cell")
}

// ── Full trace ──────────────────────────────────────────────────────

#[test]
fn straight_coast_is_one_open_chain() {
    let mut grid = strip_grid(3, 3, 1);
    let shore = traced(&mut grid);

    assert_eq!(shore.chain_count(), 1);
    assert_eq!(cells(&shore), vec![(1, 0), (1, 1), (1, 2)]);
    assert_eq!(edges(&shore), (Some(GridEdge::Left), Some(GridEdge::Right)));
    assert_eq!(shore.node_count(), 5);
    assert!(grid.node_at(CellPos::new(2, 1)).is_none());
    shore.validate(&grid).unwrap();
}

#[test]
fn lone_cell_is_a_closed_one_node_chain() {
    let mut grid = island_grid(5, 2, 2, 1);
    let shore = traced(&mut grid);

    let chain = shore.chain_ids()[0];
    assert!(shore.is_closed(chain));
    let id = node_at(&grid, 2, 2);
    assert_eq!(shore.prev(id), Some(id));
    assert_eq!(shore.next(id), Some(id));
    shore.validate(&grid).unwrap();
}

#[test]
fn square_island_is_traced_clockwise() {
    let mut grid = island_grid(4, 1, 1, 2);
    let shore = traced(&mut grid);

    assert_eq!(shore.chain_count(), 1);
    assert!(shore.is_closed(shore.chain_ids()[0]));
    assert_eq!(cells(&shore), vec![(1, 1), (1, 2), (2, 2), (2, 1)]);
    shore.validate(&grid).unwrap();
}

#[test]
fn one_cell_spit_is_walked_round_once() {
    let mut grid = spit_grid(5, 5, 3, 2, 2);
    let shore = traced(&mut grid);

    assert_eq!(shore.chain_count(), 1);
    assert!(!shore.is_closed(shore.chain_ids()[0]));
    assert_eq!(edges(&shore), (Some(GridEdge::Left), Some(GridEdge::Right)));
    let walked = cells(&shore);
    for cell in [(1, 2), (2, 2), (3, 0), (3, 4)] {
        assert_eq!(walked.iter().filter(|&&c| c == cell).count(), 1, "{cell:?}");
    }
    assert!(grid.node_at(CellPos::new(1, 2)).is_some());
    shore.validate(&grid).unwrap();
}

#[test]
fn separate_landmasses_get_separate_chains() {
    let mut grid = grid_from_rows(&[
        &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        &[0.0, 1.0, 0.0, 0.0, 0.0, 0.0],
        &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
    ]);
    let shore = traced(&mut grid);

    assert_eq!(shore.chain_count(), 2);
    let closed = shore.chain_ids().into_iter().filter(|&c| shore.is_closed(c)).count();
    assert_eq!(closed, 1);
    shore.validate(&grid).unwrap();
}

#[test]
fn enclosed_lake_is_not_a_shoreline() {
    let mut grid = grid_from_rows(&[
        &[0.0, 0.0, 0.0, 0.0, 0.0],
        &[1.0, 1.0, 1.0, 1.0, 1.0],
        &[1.0, 1.0, 0.0, 1.0, 1.0],
        &[1.0, 1.0, 1.0, 1.0, 1.0],
    ]);
    let shore = traced(&mut grid);

    assert_eq!(shore.chain_count(), 1);
    assert_eq!(cells(&shore), vec![(1, 0), (1, 1), (1, 2), (1, 3), (1, 4)]);
}

#[test]
fn wrapped_columns_close_the_coast() {
    let mut grid = strip_grid(3, 4, 1).with_edge(EdgeBehavior::Wrap);
    let shore = traced(&mut grid);

    let chain = shore.chain_ids()[0];
    assert!(shore.is_closed(chain));
    assert_eq!(cells(&shore), vec![(1, 0), (1, 1), (1, 2), (1, 3)]);
    shore.validate(&grid).unwrap();
}

#[test]
fn retrace_replaces_the_previous_chains() {
    let mut grid = strip_grid(3, 3, 1);
    let mut shore = traced(&mut grid);
    grid.set_occupancy(CellPos::new(0, 1), 1.0);
    trace_all(&mut grid, &mut shore).unwrap();

    assert_eq!(shore.chain_count(), 1);
    assert!(cells(&shore).contains(&(0, 1)));
    shore.validate(&grid).unwrap();
}

// ── Local re-splice ─────────────────────────────────────────────────

#[test]
fn splice_reaches_over_new_land() {
    let mut grid = strip_grid(4, 5, 2);
    let mut shore = traced(&mut grid);
    grid.set_occupancy(CellPos::new(1, 2), 0.3);

    let old = node_at(&grid, 2, 2);
    let resume = replace_node(&mut grid, &mut shore, old).unwrap();

    assert_eq!(shore.position(resume), Some(CellPos::new(2, 3)));
    assert_eq!(
        cells(&shore),
        vec![(2, 0), (2, 1), (1, 2), (2, 3), (2, 4)]
    );
    assert!(shore.get(old).is_none());
    shore.validate(&grid).unwrap();
}

#[test]
fn splice_dips_into_eroded_cell() {
    let mut grid = strip_grid(4, 5, 2);
    let mut shore = traced(&mut grid);
    grid.set_occupancy(CellPos::new(2, 2), 0.0);

    let old = node_at(&grid, 2, 2);
    replace_node(&mut grid, &mut shore, old).unwrap();

    assert_eq!(
        cells(&shore),
        vec![(2, 0), (2, 1), (3, 2), (2, 3), (2, 4)]
    );
    assert!(grid.node_at(CellPos::new(2, 2)).is_none());
    shore.validate(&grid).unwrap();
}

#[test]
fn splice_next_to_end_sentinel_reattaches_it() {
    let mut grid = strip_grid(4, 5, 2);
    let mut shore = traced(&mut grid);
    grid.set_occupancy(CellPos::new(2, 4), 0.0);

    let old = node_at(&grid, 2, 4);
    let resume = replace_node(&mut grid, &mut shore, old).unwrap();

    assert!(shore.is_boundary(resume));
    assert_eq!(cells(&shore), vec![(2, 0), (2, 1), (2, 2), (2, 3), (3, 4)]);
    assert_eq!(edges(&shore), (Some(GridEdge::Left), Some(GridEdge::Right)));
    shore.validate(&grid).unwrap();
}

#[test]
fn degenerate_closed_chain_cannot_be_spliced() {
    let mut grid = island_grid(5, 2, 2, 1);
    let mut shore = traced(&mut grid);
    grid.set_occupancy(CellPos::new(2, 2), 0.0);

    let node = node_at(&grid, 2, 2);
    let err = replace_node(&mut grid, &mut shore, node).unwrap_err();
    assert!(err.is_recoverable());
    assert_eq!(shore.chain_count(), 0);

    trace_all(&mut grid, &mut shore).unwrap();
    assert_eq!(shore.node_count(), 0);
}

// ── Properties ──────────────────────────────────────────────────────

fn binary_grid() -> impl Strategy<Value = Grid> {
    (2usize..7, 1usize..7).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(prop::bool::weighted(0.55), rows * cols).prop_map(move |cells| {
            let occ: Vec<f64> = cells.into_iter().map(|b| if b { 1.0 } else { 0.0 }).collect();
            Grid::from_occupancy(rows, cols, 1.0, 1.0, &occ).unwrap()
        })
    })
}

proptest! {
    #[test]
    fn traced_shorelines_validate(mut grid in binary_grid()) {
        let mut shore = Shoreline::new();
        let traced = trace_all(&mut grid, &mut shore);
        prop_assert!(traced.is_ok(), "trace failed: {:?}", traced);
        prop_assert!(shore.validate(&grid).is_ok());
        for id in shore.interior_nodes() {
            let pos = shore.position(id).unwrap();
            prop_assert!(grid.is_land(pos));
            prop_assert_eq!(grid.node_at(pos), Some(id));
        }
    }

    #[test]
    fn wrapped_shorelines_validate(grid in binary_grid()) {
        let mut grid = grid.with_edge(EdgeBehavior::Wrap);
        let mut shore = Shoreline::new();
        let traced = trace_all(&mut grid, &mut shore);
        prop_assert!(traced.is_ok(), "trace failed: {:?}", traced);
        prop_assert!(shore.validate(&grid).is_ok());
    }
}
