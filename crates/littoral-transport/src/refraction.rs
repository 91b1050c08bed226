//! Shoaling and refraction of a deep-water wave to its breaking point.

use std::f64::consts::PI;

use littoral_core::WaveConditions;

use crate::constants::{BREAKING_RATIO, GRAVITY, REFRACTION_STEP, START_DEPTH_FACTOR};
use crate::params::TransportParams;

/// Wavelength at `depth` by the non-iterative Fenton & McKee
/// approximation (m).
pub fn wavelength(period: f64, depth: f64) -> f64 {
    let deep = GRAVITY * period * period / (2.0 * PI);
    let omega = 2.0 * PI / period;
    deep * (omega * omega * depth / GRAVITY).powf(0.75).tanh().powf(2.0 / 3.0)
}

/// A wave at the point where it breaks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BreakingWave {
    /// Breaking height (m).
    pub height: f64,
    /// Incidence angle relative to the shore normal (radians).
    pub alpha: f64,
    /// Depth where the iteration stopped (m).
    pub depth: f64,
}

/// Walk a wave of deep-water incidence `alpha_deep` shoreward in fixed
/// depth steps, refracting it over shore-parallel contours, until it
/// breaks or the water runs out.
pub fn shoal(waves: &WaveConditions, alpha_deep: f64) -> BreakingWave {
    let (period, deep_height) = (waves.period, waves.height);
    if !(period > 0.0 && deep_height > 0.0) {
        return BreakingWave {
            height: 0.0,
            alpha: alpha_deep,
            depth: 0.0,
        };
    }
    let c_deep = GRAVITY * period / (2.0 * PI);
    let mut depth = START_DEPTH_FACTOR * deep_height;
    loop {
        let length = wavelength(period, depth);
        let c = length / period;
        let kh = 2.0 * PI * depth / length;
        let n = 0.5 * (1.0 + 2.0 * kh / (2.0 * kh).sinh());
        let alpha = (c / c_deep * alpha_deep.sin()).asin();
        let height = deep_height
            * ((c_deep * alpha_deep.cos()) / (c * 2.0 * n * alpha.cos()))
                .abs()
                .sqrt();
        if height > BREAKING_RATIO * depth || depth <= REFRACTION_STEP {
            return BreakingWave {
                height,
                alpha,
                depth,
            };
        }
        depth -= REFRACTION_STEP;
    }
}

/// Volume a breaking wave can move along the shore in `dt` (CERC form).
///
/// Non-finite results collapse to zero.
pub fn transport_potential(params: &TransportParams, height: f64, alpha: f64, dt: f64) -> f64 {
    let q = (params.sediment_mobility
        * params.water_density
        * GRAVITY.powf(1.5)
        * height.powf(2.5)
        * alpha.cos()
        * alpha.sin()
        * dt)
        .abs();
    if q.is_finite() {
        q
    } else {
        0.0
    }
}
