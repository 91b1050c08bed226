//! Benchmark profiles for the littoral coastline model.
//!
//! Provides pre-built [`CoastConfig`] profiles for benchmarking:
//!
//! - [`reference_profile`]: 100x100 grid (10K cells), one wavy coast
//! - [`stress_profile`]: 316x316 grid (~100K cells) for stress testing
//! - [`reference_climate`]: the seeded wave climate both profiles run under
//! - [`wavy_coast`]: deterministic coastline occupancy via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use littoral_climate::{ClimateError, StochasticClimate};
use littoral_engine::CoastConfig;
use littoral_grid::EdgeBehavior;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Build a reference benchmark profile: 100x100 grid (10K cells).
///
/// 50 m cells, absorbing side edges, coast near the middle row.
pub fn reference_profile(seed: u64) -> CoastConfig {
    profile(100, 100, seed)
}

/// Build a stress benchmark profile: 316x316 grid (~100K cells).
///
/// Same layout as [`reference_profile`] at 10x the cell count.
pub fn stress_profile(seed: u64) -> CoastConfig {
    profile(316, 316, seed)
}

fn profile(rows: usize, cols: usize, seed: u64) -> CoastConfig {
    let mut config = CoastConfig::new(rows, cols, wavy_coast(rows, cols, seed));
    config.cell_width = 50.0;
    config.cell_length = 50.0;
    config.edge = EdgeBehavior::Absorb;
    config
}

/// Moderately asymmetric waves, drifting slowly towards stability.
///
/// # Errors
///
/// Never in practice; the builder's checks are passed through.
pub fn reference_climate(seed: u64) -> Result<StochasticClimate, ClimateError> {
    StochasticClimate::builder()
        .asymmetry(0.6)
        .stability(0.45)
        .stability_drift(0.3, 0.2)
        .seed(seed)
        .build()
}

/// Row-major occupancy of a coast with sea on top and land below.
///
/// The shore depth in each column follows a slow sinusoid plus a seeded
/// random walk, both clamped to the middle half of the grid. The cell at
/// the shore is partly filled.
pub fn wavy_coast(rows: usize, cols: usize, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mid = rows as f64 / 2.0;
    let swing = rows as f64 / 8.0;
    let (lo, hi) = (rows as f64 / 4.0, rows as f64 * 3.0 / 4.0);

    let mut walk = 0.0_f64;
    let mut occ = vec![0.0; rows * cols];
    for c in 0..cols {
        walk = (walk + rng.gen_range(-0.5..0.5)).clamp(-swing, swing);
        let phase = c as f64 / cols as f64 * std::f64::consts::TAU;
        let depth = (mid + swing * phase.sin() + walk).clamp(lo, hi);
        let shore = depth.floor() as usize;
        for r in shore + 1..rows {
            occ[r * cols + c] = 1.0;
        }
        // Keep the partial cell above land so every column stays connected.
        occ[shore * cols + c] = (1.0 - depth.fract()).max(0.05);
    }
    occ
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_profile_validates() {
        reference_profile(42).validate().unwrap();
    }

    #[test]
    fn stress_profile_validates() {
        stress_profile(42).validate().unwrap();
    }

    #[test]
    fn reference_climate_builds() {
        let climate = reference_climate(42).unwrap();
        assert_eq!(climate.asymmetry(), 0.6);
    }

    #[test]
    fn wavy_coast_every_column_has_one_shore_cell() {
        let (rows, cols) = (40, 30);
        let occ = wavy_coast(rows, cols, 7);
        for c in 0..cols {
            let column: Vec<f64> = (0..rows).map(|r| occ[r * cols + c]).collect();
            let partial = column.iter().filter(|&&o| o > 0.0 && o < 1.0).count();
            assert!(partial <= 1, "column {c} has {partial} partial cells");
            let first_land = column.iter().position(|&o| o > 0.0).unwrap();
            assert!(column[first_land..].iter().all(|&o| o > 0.0));
            assert!((10..=30).contains(&first_land));
        }
    }

    #[test]
    fn wavy_coast_deterministic() {
        assert_eq!(wavy_coast(50, 50, 3), wavy_coast(50, 50, 3));
        assert_ne!(wavy_coast(50, 50, 3), wavy_coast(50, 50, 4));
    }
}
