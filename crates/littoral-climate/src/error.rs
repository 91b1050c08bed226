//! Wave-climate construction errors.

use thiserror::Error;

/// Errors raised while building a wave climate.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ClimateError {
    /// A recorded series has no entries.
    #[error("wave series is empty")]
    EmptySeries,
    /// Recorded arrays differ in length.
    #[error("wave series arrays differ in length: {angles} angles, {periods} periods, {heights} heights")]
    LengthMismatch {
        /// Number of angles.
        angles: usize,
        /// Number of periods.
        periods: usize,
        /// Number of heights.
        heights: usize,
    },
    /// A recorded or configured value is NaN or infinite.
    #[error("{name} at index {index} must be finite, got {value}")]
    NotFinite {
        /// Which quantity.
        name: &'static str,
        /// Position in its array (0 for scalars).
        index: usize,
        /// The rejected value.
        value: f64,
    },
    /// A fraction or probability lies outside `[0, 1]`.
    #[error("{name} must be in [0, 1], got {value}")]
    NotAFraction {
        /// Which parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The two probabilities of a random walk add up to more than 1.
    #[error("{name} step probabilities sum to {sum}, above 1")]
    WalkOverfull {
        /// Which walk (`"asymmetry"` or `"stability"`).
        name: &'static str,
        /// Sum of the increase and decrease probabilities.
        sum: f64,
    },
    /// A wave period or height that must be positive is not.
    #[error("{name} must be positive, got {value}")]
    NotPositive {
        /// Which parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}
