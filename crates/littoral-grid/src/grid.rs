//! The occupancy grid.

use littoral_core::{CellPos, NodeId, Timestep};

use crate::edge::{resolve_col, EdgeBehavior, GridEdge, Probe};
use crate::error::GridError;

/// One grid cell: its sand occupancy and, while it is part of a
/// shoreline, the node enrolled there.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cell {
    /// Fraction of the cell covered by land, nominally in `[0, 1]`.
    ///
    /// Transport may push it outside that range transiently; the repair
    /// engine restores it before a step completes.
    pub occupancy: f64,
    /// Shoreline node at this cell, if any.
    pub node: Option<NodeId>,
}

/// Row-major grid of cells with physical cell dimensions.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cell_width: f64,
    cell_length: f64,
    edge: EdgeBehavior,
    cells: Vec<Cell>,
    timestep: Timestep,
}

impl Grid {
    /// Create an all-water grid.
    ///
    /// `cell_width` is the alongshore (column) size and `cell_length` the
    /// cross-shore (row) size, both in metres.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if `rows < 2` or
    /// `cols == 0`, and [`GridError::InvalidCellSize`] for non-positive or
    /// non-finite cell dimensions.
    pub fn new(
        rows: usize,
        cols: usize,
        cell_width: f64,
        cell_length: f64,
    ) -> Result<Self, GridError> {
        if rows < 2 || cols == 0 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        for (name, value) in [("width", cell_width), ("length", cell_length)] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(GridError::InvalidCellSize { name, value });
            }
        }
        Ok(Self {
            rows,
            cols,
            cell_width,
            cell_length,
            edge: EdgeBehavior::Absorb,
            cells: vec![Cell::default(); rows * cols],
            timestep: Timestep::default(),
        })
    }

    /// Create a grid and fill it from a row-major occupancy matrix.
    ///
    /// # Errors
    ///
    /// Everything [`Grid::new`] rejects, plus [`GridError::ShapeMismatch`]
    /// and [`GridError::OccupancyOutOfRange`].
    pub fn from_occupancy(
        rows: usize,
        cols: usize,
        cell_width: f64,
        cell_length: f64,
        occupancy: &[f64],
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(rows, cols, cell_width, cell_length)?;
        if occupancy.len() != rows * cols {
            return Err(GridError::ShapeMismatch {
                expected: rows * cols,
                actual: occupancy.len(),
            });
        }
        for (i, &value) in occupancy.iter().enumerate() {
            if !(0.0..=1.0).contains(&value) {
                return Err(GridError::OccupancyOutOfRange {
                    row: i / cols,
                    col: i % cols,
                    value,
                });
            }
            grid.cells[i].occupancy = value;
        }
        Ok(grid)
    }

    /// Set the column edge behavior.
    pub fn with_edge(mut self, edge: EdgeBehavior) -> Self {
        self.edge = edge;
        self
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Alongshore cell size in metres.
    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    /// Cross-shore cell size in metres.
    pub fn cell_length(&self) -> f64 {
        self.cell_length
    }

    /// Plan-view cell area in square metres.
    pub fn cell_area(&self) -> f64 {
        self.cell_width * self.cell_length
    }

    /// Column edge behavior.
    pub fn edge(&self) -> EdgeBehavior {
        self.edge
    }

    /// Current simulation timestep.
    pub fn timestep(&self) -> Timestep {
        self.timestep
    }

    /// Advance the timestep counter, invalidating every per-node cache.
    ///
    /// Must be called exactly once per simulation step.
    pub fn advance_timestep(&mut self) -> Timestep {
        self.timestep = self.timestep.next();
        self.timestep
    }

    /// Whether `pos` lies on the grid.
    pub fn contains(&self, pos: CellPos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Look up a signed position, applying edge behavior.
    pub fn probe(&self, row: i64, col: i64) -> Probe {
        if row < 0 {
            return Probe::Sea;
        }
        if row >= self.rows as i64 {
            return Probe::Exit(GridEdge::Bottom);
        }
        match resolve_col(col, self.cols, self.edge) {
            Some(c) => Probe::Cell(CellPos::new(row as usize, c)),
            None if col < 0 => Probe::Exit(GridEdge::Left),
            None => Probe::Exit(GridEdge::Right),
        }
    }

    /// Look up the position offset from `pos` by `(dr, dc)`.
    pub fn offset(&self, pos: CellPos, dr: i64, dc: i64) -> Probe {
        self.probe(pos.row as i64 + dr, pos.col as i64 + dc)
    }

    fn index(&self, pos: CellPos) -> usize {
        debug_assert!(self.contains(pos), "{pos} outside {}x{}", self.rows, self.cols);
        pos.row * self.cols + pos.col
    }

    /// The cell at `pos`. Panics if `pos` is off the grid.
    pub fn cell(&self, pos: CellPos) -> &Cell {
        &self.cells[self.index(pos)]
    }

    /// Mutable access to the cell at `pos`. Panics if `pos` is off the grid.
    pub fn cell_mut(&mut self, pos: CellPos) -> &mut Cell {
        let i = self.index(pos);
        &mut self.cells[i]
    }

    /// Occupancy at `pos`.
    pub fn occupancy(&self, pos: CellPos) -> f64 {
        self.cell(pos).occupancy
    }

    /// Overwrite the occupancy at `pos`.
    pub fn set_occupancy(&mut self, pos: CellPos, value: f64) {
        self.cell_mut(pos).occupancy = value;
    }

    /// Add `delta` to the occupancy at `pos` and return the new value.
    pub fn add_occupancy(&mut self, pos: CellPos, delta: f64) -> f64 {
        let cell = self.cell_mut(pos);
        cell.occupancy += delta;
        cell.occupancy
    }

    /// Whether the cell at `pos` holds any land.
    pub fn is_land(&self, pos: CellPos) -> bool {
        littoral_core::tolerance::is_land(self.occupancy(pos))
    }

    /// Shoreline node enrolled at `pos`.
    pub fn node_at(&self, pos: CellPos) -> Option<NodeId> {
        self.cell(pos).node
    }

    /// Enrol (or clear) the shoreline node at `pos`.
    pub fn set_node(&mut self, pos: CellPos, node: Option<NodeId>) {
        self.cell_mut(pos).node = node;
    }

    /// Clear every cell's shoreline link.
    pub fn clear_nodes(&mut self) {
        for cell in &mut self.cells {
            cell.node = None;
        }
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = CellPos> + '_ {
        (0..self.rows).flat_map(move |r| (0..self.cols).map(move |c| CellPos::new(r, c)))
    }

    /// Row-major copy of every cell's occupancy.
    pub fn occupancy_row_major(&self) -> Vec<f64> {
        self.cells.iter().map(|c| c.occupancy).collect()
    }

    /// Sum of `occupancy * cell_area` over the grid, in square metres.
    pub fn total_area(&self) -> f64 {
        self.cells.iter().map(|c| c.occupancy).sum::<f64>() * self.cell_area()
    }
}
