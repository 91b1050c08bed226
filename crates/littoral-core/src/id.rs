//! Strongly-typed identifiers and grid positions.

use std::fmt;

/// Handle to a shoreline node stored in the node arena.
///
/// The `generation` is bumped every time the arena slot at `index` is
/// freed, so a handle kept across a re-trace or a splice is detected as
/// stale instead of silently resolving to an unrelated node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    /// Slot index in the arena.
    pub index: u32,
    /// Generation of the slot when this handle was issued.
    pub generation: u32,
}

impl NodeId {
    /// Create a handle from its raw parts.
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Identifies one shoreline chain (one landmass touching open water).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChainId(pub u32);

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ChainId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing simulation timestep counter.
///
/// Angle and shadow caches store the `Timestep` they were computed for;
/// a cached value is valid only while the grid's counter is unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestep(pub u64);

impl Timestep {
    /// The following timestep.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Timestep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Timestep {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// A cell position on the grid. Row 0 is the offshore edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    /// Row index, increasing landward.
    pub row: usize,
    /// Column index, increasing alongshore to the right.
    pub col: usize,
}

impl CellPos {
    /// Create a position from `(row, col)`.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether `other` is one of the 8 Moore neighbours of `self`.
    ///
    /// Ignores column wrap-around; callers on periodic grids resolve
    /// positions through the grid first.
    pub fn is_adjacent(self, other: CellPos) -> bool {
        self != other && self.row.abs_diff(other.row) <= 1 && self.col.abs_diff(other.col) <= 1
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for CellPos {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}
