//! Seeded stochastic wave climate.
//!
//! Each draw first nudges the climate's asymmetry and stability by a
//! bounded random walk, then samples:
//!
//! - an angle, `U(0, π/4)` for low-angle waves (probability `stability`)
//!   or `π/4 + U(0, π/4)` for high-angle ones, approaching from the left
//!   with probability `asymmetry` and from the right otherwise,
//! - a height from the [`HeightModel`],
//! - the configured period.
//!
//! Constructed via the builder pattern: [`StochasticClimate::builder`].

use std::f64::consts::FRAC_PI_4;

use littoral_core::{Timestep, WaveClimate, WaveConditions};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::error::ClimateError;

/// Step of the asymmetry random walk.
pub const ASYMMETRY_INCREMENT: f64 = 0.0049;
/// Step of the stability random walk.
pub const STABILITY_INCREMENT: f64 = 0.0048;

/// Discrete wave heights (m) and the cumulative draw thresholds above
/// which each height beyond the first is chosen.
const HEIGHTS: [f64; 5] = [0.86, 1.34, 1.94, 2.83, 3.75];
const HEIGHT_THRESHOLDS: [f64; 4] = [0.5, 0.75, 0.95, 0.99];

/// How wave heights are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum HeightModel {
    /// Five discrete heights from 0.86 m to 3.75 m, weighted toward the
    /// small end.
    #[default]
    Distribution,
    /// `high` with probability `p_high`, otherwise `average`.
    TwoLevel {
        /// Everyday wave height (m).
        average: f64,
        /// Storm wave height (m).
        high: f64,
        /// Probability of a storm wave.
        p_high: f64,
    },
}

impl HeightModel {
    fn sample(&self, draw: f64) -> f64 {
        match *self {
            Self::Distribution => {
                let band = HEIGHT_THRESHOLDS.iter().filter(|&&t| draw >= t).count();
                HEIGHTS[band]
            }
            Self::TwoLevel {
                average,
                high,
                p_high,
            } => {
                if draw < p_high {
                    high
                } else {
                    average
                }
            }
        }
    }
}

/// A bounded random walk on `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Walk {
    value: f64,
    p_increase: f64,
    p_decrease: f64,
    increment: f64,
}

impl Walk {
    fn step(&mut self, rng: &mut ChaCha8Rng) {
        if self.p_increase + self.p_decrease <= 0.0 {
            return;
        }
        let v: f64 = rng.gen();
        if v <= self.p_decrease {
            self.value = (self.value - self.increment).max(0.0);
        } else if v <= self.p_decrease + self.p_increase {
            self.value = (self.value + self.increment).min(1.0);
        }
    }
}

/// A reproducible wave climate driven by a seeded ChaCha8 stream.
#[derive(Clone, Debug)]
pub struct StochasticClimate {
    asymmetry: Walk,
    stability: Walk,
    period: f64,
    heights: HeightModel,
    rng: ChaCha8Rng,
}

/// Builder for [`StochasticClimate`].
pub struct StochasticClimateBuilder {
    asymmetry: f64,
    stability: f64,
    p_asymmetry_increase: f64,
    p_asymmetry_decrease: f64,
    p_stability_increase: f64,
    p_stability_decrease: f64,
    period: f64,
    heights: HeightModel,
    seed: u64,
}

impl StochasticClimate {
    /// Create a new builder. Defaults: asymmetry 0.7, stability 0.4, no
    /// drift, 8 s period, discrete height distribution, seed 0.
    pub fn builder() -> StochasticClimateBuilder {
        StochasticClimateBuilder {
            asymmetry: 0.7,
            stability: 0.4,
            p_asymmetry_increase: 0.0,
            p_asymmetry_decrease: 0.0,
            p_stability_increase: 0.0,
            p_stability_decrease: 0.0,
            period: 8.0,
            heights: HeightModel::Distribution,
            seed: 0,
        }
    }

    /// Current fraction of waves approaching from the left.
    pub fn asymmetry(&self) -> f64 {
        self.asymmetry.value
    }

    /// Current fraction of low-angle waves.
    pub fn stability(&self) -> f64 {
        self.stability.value
    }

    /// Draw the next wave.
    pub fn draw(&mut self) -> WaveConditions {
        self.asymmetry.step(&mut self.rng);
        self.stability.step(&mut self.rng);

        let mut angle = self.rng.gen_range(0.0..FRAC_PI_4);
        if self.rng.gen::<f64>() >= self.stability.value {
            angle += FRAC_PI_4;
        }
        if self.rng.gen::<f64>() >= self.asymmetry.value {
            angle = -angle;
        }
        let height = self.heights.sample(self.rng.gen());
        WaveConditions::new(angle, self.period, height)
    }
}

impl WaveClimate for StochasticClimate {
    fn conditions(&mut self, _step: Timestep) -> WaveConditions {
        self.draw()
    }
}

impl StochasticClimateBuilder {
    /// Initial fraction of waves from the left (default 0.7).
    pub fn asymmetry(mut self, value: f64) -> Self {
        self.asymmetry = value;
        self
    }

    /// Initial fraction of low-angle waves (default 0.4).
    pub fn stability(mut self, value: f64) -> Self {
        self.stability = value;
        self
    }

    /// Per-draw probabilities of the asymmetry walk stepping up and down
    /// by [`ASYMMETRY_INCREMENT`].
    pub fn asymmetry_drift(mut self, p_increase: f64, p_decrease: f64) -> Self {
        self.p_asymmetry_increase = p_increase;
        self.p_asymmetry_decrease = p_decrease;
        self
    }

    /// Per-draw probabilities of the stability walk stepping up and down
    /// by [`STABILITY_INCREMENT`].
    pub fn stability_drift(mut self, p_increase: f64, p_decrease: f64) -> Self {
        self.p_stability_increase = p_increase;
        self.p_stability_decrease = p_decrease;
        self
    }

    /// Wave period in seconds (default 8).
    pub fn period(mut self, seconds: f64) -> Self {
        self.period = seconds;
        self
    }

    /// Height model (default [`HeightModel::Distribution`]).
    pub fn heights(mut self, model: HeightModel) -> Self {
        self.heights = model;
        self
    }

    /// Seed for the ChaCha8 stream (default 0).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Build the climate, validating every parameter.
    ///
    /// # Errors
    ///
    /// [`ClimateError::NotAFraction`] for fractions or probabilities
    /// outside `[0, 1]`, [`ClimateError::WalkOverfull`] when a walk's
    /// probabilities sum above 1, [`ClimateError::NotPositive`] for a
    /// non-positive period or height.
    pub fn build(self) -> Result<StochasticClimate, ClimateError> {
        let fractions = [
            ("asymmetry", self.asymmetry),
            ("stability", self.stability),
            ("p_asymmetry_increase", self.p_asymmetry_increase),
            ("p_asymmetry_decrease", self.p_asymmetry_decrease),
            ("p_stability_increase", self.p_stability_increase),
            ("p_stability_decrease", self.p_stability_decrease),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(ClimateError::NotAFraction { name, value });
            }
        }
        for (name, up, down) in [
            ("asymmetry", self.p_asymmetry_increase, self.p_asymmetry_decrease),
            ("stability", self.p_stability_increase, self.p_stability_decrease),
        ] {
            if up + down > 1.0 {
                return Err(ClimateError::WalkOverfull {
                    name,
                    sum: up + down,
                });
            }
        }
        if !(self.period > 0.0 && self.period.is_finite()) {
            return Err(ClimateError::NotPositive {
                name: "period",
                value: self.period,
            });
        }
        if let HeightModel::TwoLevel {
            average,
            high,
            p_high,
        } = self.heights
        {
            for (name, value) in [("average height", average), ("high height", high)] {
                if !(value > 0.0 && value.is_finite()) {
                    return Err(ClimateError::NotPositive { name, value });
                }
            }
            if !(0.0..=1.0).contains(&p_high) {
                return Err(ClimateError::NotAFraction {
                    name: "p_high",
                    value: p_high,
                });
            }
        }

        Ok(StochasticClimate {
            asymmetry: Walk {
                value: self.asymmetry,
                p_increase: self.p_asymmetry_increase,
                p_decrease: self.p_asymmetry_decrease,
                increment: ASYMMETRY_INCREMENT,
            },
            stability: Walk {
                value: self.stability,
                p_increase: self.p_stability_increase,
                p_decrease: self.p_stability_decrease,
                increment: STABILITY_INCREMENT,
            },
            period: self.period,
            heights: self.heights,
            rng: ChaCha8Rng::seed_from_u64(self.seed),
        })
    }
}
