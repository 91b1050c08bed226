//! End-to-end repair scenarios on traced grids.

use littoral_core::CellPos;
use littoral_grid::Grid;
use littoral_repair::{apply_and_repair, repair, RepairParams};
use littoral_shoreline::{trace_all, Shoreline};
use littoral_test_utils::{init_tracing, spit_grid, strip_grid, total_occupancy};
use proptest::prelude::*;

fn traced(mut grid: Grid) -> (Grid, Shoreline) {
    let mut shore = Shoreline::new();
    trace_all(&mut grid, &mut shore).expect("trace");
    (grid, shore)
}

#[test]
fn overfull_cell_is_capped_and_its_neighbours_take_the_excess() {
    init_tracing();
    let (mut grid, mut shore) = traced(strip_grid(5, 7, 2));
    let before = total_occupancy(&grid);
    grid.set_occupancy(CellPos::new(2, 3), 1.2);

    let report = repair(&mut grid, &mut shore, RepairParams::default());

    assert_eq!(grid.occupancy(CellPos::new(2, 3)), 1.0);
    let gained: f64 = [(1, 3), (2, 2), (2, 4), (3, 3)]
        .into_iter()
        .map(|p| grid.occupancy(p.into()))
        .filter(|&o| o < 1.0)
        .sum();
    assert!((gained - 0.2).abs() < 1e-12);
    assert!((total_occupancy(&grid) - before - 0.2).abs() < 1e-12);
    assert_eq!(report.off_grid_exchange, 0.0);
}

#[test]
fn overfull_spit_tip_spills_into_the_sea_around_it() {
    let (mut grid, mut shore) = traced(spit_grid(5, 5, 3, 2, 2));
    grid.set_occupancy(CellPos::new(1, 2), 1.3);
    let before = total_occupancy(&grid);

    let report = repair(&mut grid, &mut shore, RepairParams::default());

    assert_eq!(grid.occupancy(CellPos::new(1, 2)), 1.0);
    for p in [(1, 1), (1, 3), (0, 2)] {
        assert!((grid.occupancy(p.into()) - 0.1).abs() < 1e-12, "{p:?}");
    }
    let booked = report.off_grid_exchange + report.clamped_residual;
    assert!((total_occupancy(&grid) - before - booked).abs() < 1e-12);
    if report.topology_dirty {
        trace_all(&mut grid, &mut shore).expect("retrace");
    }
    shore.validate(&grid).unwrap();
}

#[test]
fn edge_cell_underflow_books_off_grid_exchange() {
    let (mut grid, mut shore) = traced(strip_grid(5, 7, 2));
    grid.set_occupancy(CellPos::new(2, 0), -0.3);
    let report = repair(&mut grid, &mut shore, RepairParams::default());
    assert_eq!(grid.occupancy(CellPos::new(2, 0)), 0.0);
    assert!((report.off_grid_exchange - 0.1).abs() < 1e-12);
    assert!(shore.validate(&grid).is_ok() || report.topology_dirty);
}

#[test]
fn pass_limit_of_one_still_settles_range() {
    let (mut grid, mut shore) = traced(strip_grid(5, 7, 2));
    grid.set_occupancy(CellPos::new(2, 5), 1.5);
    let params = RepairParams {
        max_passes: 1,
        ..RepairParams::default()
    };
    let report = repair(&mut grid, &mut shore, params);
    assert_eq!(report.passes, 1);
    assert!(!report.converged);
    assert!(grid
        .occupancy_row_major()
        .iter()
        .all(|o| (0.0..=1.0).contains(o)));
}

proptest! {
    #[test]
    fn repaired_grid_is_in_range_and_balanced(
        changes in proptest::collection::vec(-15.0f64..15.0, 8),
    ) {
        let (mut grid, mut shore) = traced(strip_grid(7, 8, 3));
        let before = total_occupancy(&grid);
        for (c, &net) in changes.iter().enumerate() {
            let pos = CellPos::new(3, c);
            if let Some(id) = grid.node_at(pos) {
                let node = shore.get_mut(id).expect("live node");
                node.props.net_volume_change = net;
                node.props.closure_depth = 10.0;
            }
        }

        let report = apply_and_repair(&mut grid, &mut shore, RepairParams::default());

        for occ in grid.occupancy_row_major() {
            prop_assert!((-1e-9..=1.0 + 1e-9).contains(&occ), "occupancy {occ}");
        }
        let booked = report.applied + report.off_grid_exchange + report.clamped_residual;
        prop_assert!((total_occupancy(&grid) - before - booked).abs() < 1e-9);
    }
}
