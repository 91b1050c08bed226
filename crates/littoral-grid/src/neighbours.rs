//! Neighbourhood queries and flood fills over the grid.

use std::collections::VecDeque;

use littoral_core::CellPos;
use smallvec::SmallVec;

use crate::edge::Probe;
use crate::grid::Grid;

/// A 4-connected neighbour of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Neighbour {
    /// An on-grid cell.
    Cell(CellPos),
    /// A position beyond a grid edge (sea above row 0, or an absorbing
    /// side or bottom edge).
    OffGrid,
}

/// The 4 axis-aligned neighbours of `pos`: left, below, right, above.
pub fn neighbours4(grid: &Grid, pos: CellPos) -> SmallVec<[Neighbour; 4]> {
    let offsets: [(i64, i64); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];
    offsets
        .iter()
        .map(|&(dr, dc)| match grid.offset(pos, dr, dc) {
            Probe::Cell(p) => Neighbour::Cell(p),
            Probe::Sea | Probe::Exit(_) => Neighbour::OffGrid,
        })
        .collect()
}

/// Water cells connected (4-way) to the open sea above row 0.
///
/// Enclosed lakes are excluded. Returned as a row-major mask.
pub fn open_water(grid: &Grid) -> OpenWater {
    let cols = grid.cols();
    let mut open = vec![false; grid.cell_count()];
    let mut queue = VecDeque::new();
    for c in 0..cols {
        let pos = CellPos::new(0, c);
        if !grid.is_land(pos) {
            open[c] = true;
            queue.push_back(pos);
        }
    }
    while let Some(pos) = queue.pop_front() {
        for n in neighbours4(grid, pos) {
            if let Neighbour::Cell(p) = n {
                let i = p.row * cols + p.col;
                if !open[i] && !grid.is_land(p) {
                    open[i] = true;
                    queue.push_back(p);
                }
            }
        }
    }
    OpenWater { cols, open }
}

/// Row-major mask of open-water cells, see [`open_water`].
#[derive(Clone, Debug)]
pub struct OpenWater {
    cols: usize,
    open: Vec<bool>,
}

impl OpenWater {
    /// Whether `pos` is open water.
    pub fn is_open(&self, pos: CellPos) -> bool {
        self.open[pos.row * self.cols + pos.col]
    }

    /// Whether the position directly seaward of `pos` is open water.
    /// Row 0 borders the sea itself.
    pub fn faces_sea(&self, pos: CellPos) -> bool {
        pos.row == 0 || self.is_open(CellPos::new(pos.row - 1, pos.col))
    }
}

/// Every land cell 8-connected to `start`, `start` first.
pub fn landmass(grid: &Grid, start: CellPos) -> Vec<CellPos> {
    let cols = grid.cols();
    let mut seen = vec![false; grid.cell_count()];
    let mut out = Vec::new();
    let mut queue = VecDeque::from([start]);
    seen[start.row * cols + start.col] = true;
    while let Some(pos) = queue.pop_front() {
        out.push(pos);
        for dr in -1..=1 {
            for dc in -1..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                if let Probe::Cell(p) = grid.offset(pos, dr, dc) {
                    let i = p.row * cols + p.col;
                    if !seen[i] && grid.is_land(p) {
                        seen[i] = true;
                        queue.push_back(p);
                    }
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::EdgeBehavior;

    fn grid_from(rows: usize, cols: usize, occ: &[f64]) -> Grid {
        Grid::from_occupancy(rows, cols, 1.0, 1.0, occ).unwrap()
    }

    // ── Neighbour tests ─────────────────────────────────────────

    #[test]
    fn neighbours4_interior_and_corner() {
        let grid = Grid::new(3, 3, 1.0, 1.0).unwrap();
        let nbs = neighbours4(&grid, CellPos::new(1, 1));
        assert!(nbs.iter().all(|n| matches!(n, Neighbour::Cell(_))));
        let corner = neighbours4(&grid, CellPos::new(0, 0));
        assert_eq!(
            corner.as_slice(),
            &[
                Neighbour::OffGrid,
                Neighbour::Cell(CellPos::new(1, 0)),
                Neighbour::Cell(CellPos::new(0, 1)),
                Neighbour::OffGrid,
            ]
        );
    }

    #[test]
    fn neighbours4_wrap_columns() {
        let grid = Grid::new(3, 3, 1.0, 1.0).unwrap().with_edge(EdgeBehavior::Wrap);
        let nbs = neighbours4(&grid, CellPos::new(1, 0));
        assert_eq!(nbs[0], Neighbour::Cell(CellPos::new(1, 2)));
    }

    // ── Flood fills ─────────────────────────────────────────────

    #[test]
    fn enclosed_lake_is_not_open_water() {
        #[rustfmt::skip]
        let grid = grid_from(4, 3, &[
            0.0, 0.0, 0.0,
            1.0, 1.0, 1.0,
            1.0, 0.0, 1.0,
            1.0, 1.0, 1.0,
        ]);
        let water = open_water(&grid);
        assert!(water.is_open(CellPos::new(0, 1)));
        assert!(!water.is_open(CellPos::new(2, 1)));
        assert!(water.faces_sea(CellPos::new(1, 1)));
        assert!(!water.faces_sea(CellPos::new(3, 1)));
        assert!(water.faces_sea(CellPos::new(0, 2)));
    }

    #[test]
    fn landmass_is_eight_connected() {
        #[rustfmt::skip]
        let grid = grid_from(3, 4, &[
            0.0, 0.0, 0.0, 0.0,
            1.0, 0.0, 0.0, 0.5,
            0.0, 1.0, 0.0, 0.0,
        ]);
        let mass = landmass(&grid, CellPos::new(1, 0));
        assert_eq!(mass.len(), 2);
        assert_eq!(mass[0], CellPos::new(1, 0));
        assert!(mass.contains(&CellPos::new(2, 1)));
        assert_eq!(landmass(&grid, CellPos::new(1, 3)).len(), 1);
    }
}
