//! Recorded wave series.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use littoral_core::{Timestep, WaveClimate, WaveConditions};
use tracing::debug;

use crate::error::ClimateError;

/// Height given to waves approaching from behind the coast. Small enough
/// to move no sediment, large enough to keep the shoaling maths finite.
pub const BEHIND_COAST_HEIGHT: f64 = 1e-10;

/// Recorded per-step wave conditions, cycled when exhausted.
///
/// Angles at or above `π` are shifted by `−2π` into the coast's frame.
/// Waves that still point away from the coast (`|angle| > π/2`) are
/// replaced by a negligible shore-normal wave.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveSeries {
    angles: Vec<f64>,
    periods: Vec<f64>,
    heights: Vec<f64>,
}

impl WaveSeries {
    /// Build a series from parallel arrays of angles (radians), periods
    /// (s) and heights (m).
    ///
    /// # Errors
    ///
    /// [`ClimateError::EmptySeries`], [`ClimateError::LengthMismatch`] or
    /// [`ClimateError::NotFinite`].
    pub fn new(angles: Vec<f64>, periods: Vec<f64>, heights: Vec<f64>) -> Result<Self, ClimateError> {
        if angles.len() != periods.len() || angles.len() != heights.len() {
            return Err(ClimateError::LengthMismatch {
                angles: angles.len(),
                periods: periods.len(),
                heights: heights.len(),
            });
        }
        if angles.is_empty() {
            return Err(ClimateError::EmptySeries);
        }
        for (name, values) in [("angle", &angles), ("period", &periods), ("height", &heights)] {
            if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                return Err(ClimateError::NotFinite { name, index, value });
            }
        }
        Ok(Self {
            angles,
            periods,
            heights,
        })
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    /// Always false; construction rejects empty series.
    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    /// Conditions recorded at `index`, wrapped into range and into the
    /// coast's frame.
    pub fn entry(&self, index: usize) -> WaveConditions {
        let i = index % self.len();
        let mut angle = self.angles[i];
        if angle >= PI {
            angle -= TAU;
        }
        if angle.abs() > FRAC_PI_2 {
            debug!(index = i, angle, "wave approaches from behind the coast");
            return WaveConditions::new(0.0, self.periods[i], BEHIND_COAST_HEIGHT);
        }
        WaveConditions::new(angle, self.periods[i], self.heights[i])
    }
}

impl WaveClimate for WaveSeries {
    fn conditions(&mut self, step: Timestep) -> WaveConditions {
        // Truncation on 32-bit targets only shifts where the cycle restarts.
        self.entry(step.0 as usize)
    }
}
