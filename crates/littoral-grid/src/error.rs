//! Grid construction errors.

use thiserror::Error;

/// Errors raised while building a [`Grid`](crate::Grid).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GridError {
    /// Fewer than 2 rows or no columns.
    #[error("grid must have at least 2 rows and 1 column, got {rows}x{cols}")]
    InvalidDimensions {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
    },
    /// Cell width or length is not a positive finite number.
    #[error("cell {name} must be positive and finite, got {value}")]
    InvalidCellSize {
        /// Which dimension (`"width"` or `"length"`).
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Initial occupancy does not have `rows * cols` entries.
    #[error("expected {expected} occupancy values, got {actual}")]
    ShapeMismatch {
        /// `rows * cols`.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },
    /// An initial occupancy value is outside `[0, 1]` or not finite.
    #[error("occupancy at row {row}, col {col} must be in [0, 1], got {value}")]
    OccupancyOutOfRange {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
        /// The rejected value.
        value: f64,
    },
}
