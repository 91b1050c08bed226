//! Deep-water wave conditions and the wave-climate collaborator.

use crate::id::Timestep;

/// Deep-water wave conditions for one timestep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveConditions {
    /// Approach angle in radians, 0 = shore-normal, positive from the left.
    pub angle: f64,
    /// Wave period in seconds.
    pub period: f64,
    /// Significant wave height in metres.
    pub height: f64,
}

impl WaveConditions {
    /// Create wave conditions from angle (radians), period (s) and height (m).
    pub fn new(angle: f64, period: f64, height: f64) -> Self {
        Self {
            angle,
            period,
            height,
        }
    }
}

/// Supplies wave conditions to the model, one draw per timestep.
///
/// The model treats the returned numbers as opaque inputs.
pub trait WaveClimate {
    /// Wave conditions for `step`.
    fn conditions(&mut self, step: Timestep) -> WaveConditions;
}

/// A fixed set of conditions is a climate that never changes.
impl WaveClimate for WaveConditions {
    fn conditions(&mut self, _step: Timestep) -> WaveConditions {
        *self
    }
}

impl<C: WaveClimate + ?Sized> WaveClimate for Box<C> {
    fn conditions(&mut self, step: Timestep) -> WaveConditions {
        (**self).conditions(step)
    }
}
