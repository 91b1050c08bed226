//! Wave climates for tests.

use littoral_core::{Timestep, WaveClimate, WaveConditions};

/// Replays a fixed list of waves, cycling, and records which steps were
/// asked for.
#[derive(Clone, Debug, Default)]
pub struct ScriptedClimate {
    waves: Vec<WaveConditions>,
    pub asked: Vec<Timestep>,
}

impl ScriptedClimate {
    /// Panics if `waves` is empty.
    pub fn new(waves: Vec<WaveConditions>) -> Self {
        assert!(!waves.is_empty(), "scripted climate needs at least one wave");
        Self {
            waves,
            asked: Vec::new(),
        }
    }

    /// Shore-normal waves of the given height, which move no sediment on
    /// a straight coast.
    pub fn calm(height: f64) -> Self {
        Self::new(vec![WaveConditions::new(0.0, 8.0, height)])
    }
}

impl WaveClimate for ScriptedClimate {
    fn conditions(&mut self, step: Timestep) -> WaveConditions {
        self.asked.push(step);
        self.waves[self.asked.len().saturating_sub(1) % self.waves.len()]
    }
}
