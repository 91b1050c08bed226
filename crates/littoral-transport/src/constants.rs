//! Physical constants and fixed numerical parameters.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

/// Standard gravity (m/s²).
pub const GRAVITY: f64 = 9.806_65;

/// Default density of sea water (kg/m³).
pub const SEA_WATER_DENSITY: f64 = 1020.0;

/// Default sediment mobility coefficient of the CERC formula.
pub const SEDIMENT_MOBILITY: f64 = 0.67;

/// Waves break once their height exceeds this fraction of the depth.
pub const BREAKING_RATIO: f64 = 0.5;

/// Depth decrement of the shoaling iteration (m).
pub const REFRACTION_STEP: f64 = 0.2;

/// Shoaling starts at this multiple of the deep-water height.
pub const START_DEPTH_FACTOR: f64 = 3.0;

/// Deep-water incidence beyond this is grazing and moves no sediment.
pub const GRAZING_LIMIT: f64 = 0.995 * FRAC_PI_2;

/// Incidence assumed where the differencing scheme leaves the shore
/// angle undefined.
pub const DEFAULT_INCIDENCE: f64 = FRAC_PI_4;

/// Default instability threshold of the differencing scheme (degrees).
pub const INSTABILITY_THRESHOLD_DEG: f64 = 42.0;

/// Default step of the shadow march (cells).
pub const SHADOW_STEP: f64 = 0.2;

/// Default bound on the number of shadow march steps.
pub const MAX_SHADOW_STEPS: usize = 10_000;
