//! Named numeric tolerances.
//!
//! Every floating-point comparison that is not an exact physical
//! threshold goes through one of these constants.

/// Negative occupancy at or above `-UNDERFLOW_TOLERANCE` is rounding
/// noise: it is clamped to zero instead of drawing sediment from neighbours.
pub const UNDERFLOW_TOLERANCE: f64 = 1e-6;

/// Components of a unit direction smaller than this are treated as zero
/// when snapping a direction to a grid axis.
pub const DIRECTION_EPSILON: f64 = 1e-6;

/// Occupancy at or above this value counts as a full (solid) cell.
pub const FULL: f64 = 1.0;

/// Whether `occupancy` counts as a full cell.
pub fn is_full(occupancy: f64) -> bool {
    occupancy >= FULL
}

/// Whether `occupancy` counts as land for tracing purposes.
pub fn is_land(occupancy: f64) -> bool {
    occupancy > 0.0
}
