//! Integration tests: wave transform followed by the sediment budget.

use littoral_core::WaveConditions;
use littoral_grid::Grid;
use littoral_shoreline::{trace_all, Shoreline};
use littoral_test_utils::{grid_from_rows, strip_grid};
use littoral_transport::{sediment_budget, wave_transform, ClosurePolicy, TransportParams};

fn traced(mut grid: Grid) -> (Grid, Shoreline) {
    let mut shore = Shoreline::new();
    trace_all(&mut grid, &mut shore).expect("trace");
    (grid, shore)
}

fn bay() -> Grid {
    grid_from_rows(&[
        &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        &[1.0, 0.6, 0.0, 0.0, 0.0, 0.0, 0.3, 1.0],
        &[1.0, 1.0, 0.5, 0.0, 0.0, 0.4, 1.0, 1.0],
        &[1.0, 1.0, 1.0, 0.7, 0.5, 1.0, 1.0, 1.0],
        &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
    ])
}

#[test]
fn three_by_three_strip_is_quiescent_under_normal_waves() {
    let (grid, mut shore) = traced(strip_grid(3, 3, 1));
    let params = TransportParams::default();
    let waves = WaveConditions::new(0.0, 8.0, 1.0);

    let wave_stats = wave_transform(&grid, &mut shore, waves, 86_400.0, &params);
    let budget = sediment_budget(&grid, &mut shore, &params);

    assert_eq!(wave_stats.nodes, 3);
    assert!(wave_stats.total_potential.abs() < 1e-9);
    for id in shore.interior_nodes() {
        assert!(shore.get(id).unwrap().props.net_volume_change.abs() < 1e-9);
    }
    assert!(budget.boundary_outflux.abs() < 1e-9);
}

#[test]
fn bay_budget_balances_against_the_boundaries() {
    let params = TransportParams::default();
    for angle in [-0.7, -0.2, 0.25, 0.6] {
        let (grid, mut shore) = traced(bay());
        let waves = WaveConditions::new(angle, 7.0, 1.3);
        let stats = wave_transform(&grid, &mut shore, waves, 3600.0, &params);
        let budget = sediment_budget(&grid, &mut shore, &params);
        let scale = stats.total_potential.max(1.0);
        assert!(
            (budget.net_change + budget.boundary_outflux).abs() < 1e-9 * scale,
            "angle {angle}: net {} outflux {}",
            budget.net_change,
            budget.boundary_outflux
        );
    }
}

#[test]
fn derived_closure_depth_is_recorded_per_node() {
    let params = TransportParams::builder()
        .closure(ClosurePolicy::Derived)
        .build()
        .unwrap();
    let (grid, mut shore) = traced(bay());
    wave_transform(&grid, &mut shore, WaveConditions::new(0.3, 7.0, 1.3), 3600.0, &params);
    sediment_budget(&grid, &mut shore, &params);
    for id in shore.interior_nodes() {
        let depth = shore.get(id).unwrap().props.closure_depth;
        assert!(depth >= params.shelf.minimum_closure_depth, "{depth}");
    }
}
