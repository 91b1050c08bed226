//! Plain-text dumps of the grid and shoreline.
//!
//! The grid dump has one line per row, each cell written as a space
//! followed by its occupancy with six decimals. The shoreline dump lists
//! every chain as a header line followed by one ` row,col` line per
//! interior node in link order.

use std::fmt::Write;

use littoral_grid::Grid;
use littoral_shoreline::Shoreline;

/// Occupancy of every cell, one text line per row.
pub fn grid_text(grid: &Grid) -> String {
    let mut out = String::with_capacity(grid.cell_count() * 9 + grid.rows());
    for r in 0..grid.rows() {
        for c in 0..grid.cols() {
            let _ = write!(out, " {:.6}", grid.occupancy((r, c).into()));
        }
        out.push('\n');
    }
    out
}

/// Interior node positions of every chain, in link order.
pub fn shoreline_text(shore: &Shoreline) -> String {
    let mut out = String::new();
    for chain in shore.chain_ids() {
        let kind = if shore.is_closed(chain) { "closed" } else { "open" };
        let _ = writeln!(out, "chain {chain} ({kind})");
        for id in shore.nodes(chain) {
            if let Some(pos) = shore.position(id) {
                let _ = writeln!(out, " {},{}", pos.row, pos.col);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use littoral_shoreline::trace_all;
    use littoral_test_utils::{grid_from_rows, strip_grid};

    #[test]
    fn grid_text_has_one_line_per_row() {
        let grid = grid_from_rows(&[&[0.0, 0.25], &[1.0, 1.0]]);
        assert_eq!(grid_text(&grid), " 0.000000 0.250000\n 1.000000 1.000000\n");
    }

    #[test]
    fn shoreline_text_lists_chain_cells() {
        let mut grid = strip_grid(3, 3, 1);
        let mut shore = Shoreline::new();
        trace_all(&mut grid, &mut shore).expect("trace");
        let text = shoreline_text(&shore);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with("(open)"));
        assert_eq!(&lines[1..], &[" 1,0", " 1,1", " 1,2"]);
    }
}
