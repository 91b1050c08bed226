//! Grid fixtures.
//!
//! - [`strip_grid`]: a straight coast, sea on top, land below.
//! - [`island_grid`]: a square island surrounded by sea.
//! - [`spit_grid`]: a one-cell-wide spit sticking out of a straight coast.
//! - [`grid_from_rows`]: arbitrary occupancy, row-major literals.

use littoral_core::CellPos;
use littoral_grid::Grid;

/// Grid from row literals with unit cells. Panics on ragged rows.
pub fn grid_from_rows(rows: &[&[f64]]) -> Grid {
    let cols = rows.first().map_or(0, |r| r.len());
    let flat: Vec<f64> = rows.iter().flat_map(|r| r.iter().copied()).collect();
    Grid::from_occupancy(rows.len(), cols, 1.0, 1.0, &flat).expect("fixture grid")
}

/// `rows × cols` unit grid whose rows from `shore_row` down are full.
pub fn strip_grid(rows: usize, cols: usize, shore_row: usize) -> Grid {
    let mut grid = Grid::new(rows, cols, 1.0, 1.0).expect("fixture grid");
    for r in shore_row..rows {
        for c in 0..cols {
            grid.set_occupancy(CellPos::new(r, c), 1.0);
        }
    }
    grid
}

/// `n × n` unit grid with a full `size × size` island at `(top, left)`.
pub fn island_grid(n: usize, top: usize, left: usize, size: usize) -> Grid {
    let mut grid = Grid::new(n, n, 1.0, 1.0).expect("fixture grid");
    for r in top..top + size {
        for c in left..left + size {
            grid.set_occupancy(CellPos::new(r, c), 1.0);
        }
    }
    grid
}

/// Straight coast at `shore_row` with a one-cell-wide spit of `length`
/// cells rising from column `col`.
pub fn spit_grid(rows: usize, cols: usize, shore_row: usize, col: usize, length: usize) -> Grid {
    let mut grid = strip_grid(rows, cols, shore_row);
    for r in shore_row.saturating_sub(length)..shore_row {
        grid.set_occupancy(CellPos::new(r, col), 1.0);
    }
    grid
}

/// Sum of all cell occupancies.
pub fn total_occupancy(grid: &Grid) -> f64 {
    grid.positions().map(|p| grid.occupancy(p)).sum()
}

/// Row-major occupancy of [`strip_grid`], for building configs.
pub fn strip_occupancy(rows: usize, cols: usize, shore_row: usize) -> Vec<f64> {
    (0..rows * cols)
        .map(|i| if i / cols >= shore_row { 1.0 } else { 0.0 })
        .collect()
}
