//! The coastline world.
//!
//! [`Coast`] owns the grid, the shoreline and the wave climate. All
//! mutating methods take `&mut self`; there is one logical writer and no
//! background work.
//!
//! # Step pipeline
//!
//! 1. draw wave conditions for the step,
//! 2. bump the timestep (invalidating per-node caches),
//! 3. wave transform: transport potential per node,
//! 4. sediment budget: supply clipping and net volume change,
//! 5. application and repair,
//! 6. a full re-trace if repair left the topology dirty or the shoreline
//!    no longer validates.

use std::time::Instant;

use littoral_core::{StepError, Timestep, WaveClimate};
use littoral_grid::Grid;
use littoral_repair::{apply_and_repair, RepairParams, RepairReport};
use littoral_shoreline::{trace_all, Shoreline};
use littoral_transport::{sediment_budget, wave_transform, TransportParams};
use tracing::{info, warn};

use crate::config::{CoastConfig, ConfigError};
use crate::metrics::StepReport;
use crate::snapshot::{grid_text, shoreline_text};

/// A coastline evolving under a wave climate.
///
/// # Example
///
/// ```
/// use littoral_core::WaveConditions;
/// use littoral_engine::{Coast, CoastConfig};
///
/// // Two rows of sea over three rows of sand.
/// let (rows, cols) = (5, 6);
/// let occupancy: Vec<f64> = (0..rows * cols)
///     .map(|i| if i / cols >= 2 { 1.0 } else { 0.0 })
///     .collect();
/// let config = CoastConfig::new(rows, cols, occupancy);
///
/// let mut coast = Coast::new(config, WaveConditions::new(0.3, 8.0, 1.2)).unwrap();
/// for _ in 0..3 {
///     let report = coast.step().unwrap();
///     assert!(report.total_potential() >= 0.0);
/// }
/// assert_eq!(coast.steps(), 3);
/// assert_eq!(coast.occupancy().len(), rows * cols);
/// ```
pub struct Coast<C> {
    grid: Grid,
    shore: Shoreline,
    climate: C,
    transport: TransportParams,
    repair: RepairParams,
    timestep_length: f64,
    steps: u64,
    full_retraces: u64,
}

impl<C: WaveClimate> Coast<C> {
    /// Validate `config`, build the grid and trace the initial shoreline.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`]; an initial grid whose shoreline cannot be
    /// traced is [`ConfigError::Topology`].
    pub fn new(config: CoastConfig, climate: C) -> Result<Self, ConfigError> {
        let mut grid = config.build_grid()?;
        let mut shore = Shoreline::new();
        let chains = trace_all(&mut grid, &mut shore)?;
        info!(
            rows = grid.rows(),
            cols = grid.cols(),
            chains,
            nodes = shore.node_count(),
            "coast initialized"
        );
        Ok(Self {
            grid,
            shore,
            climate,
            transport: config.transport,
            repair: config.repair_params(),
            timestep_length: config.timestep_length,
            steps: 0,
            full_retraces: 0,
        })
    }

    /// Advance the model by one step.
    ///
    /// # Errors
    ///
    /// [`StepError::Topology`] when the shoreline cannot be restored even
    /// by a full re-trace. The grid keeps the step's occupancy changes.
    pub fn step(&mut self) -> Result<StepReport, StepError> {
        let started = Instant::now();
        let step = Timestep(self.steps);
        let waves = self.climate.conditions(step);
        self.grid.advance_timestep();

        let wave = wave_transform(
            &self.grid,
            &mut self.shore,
            waves,
            self.timestep_length,
            &self.transport,
        );
        let budget = sediment_budget(&self.grid, &mut self.shore, &self.transport);
        let repair = apply_and_repair(&mut self.grid, &mut self.shore, self.repair);
        let retraced = self.restore_topology(step, &repair)?;
        self.steps += 1;

        let report = StepReport {
            timestep: step,
            waves,
            chains: self.shore.chain_count(),
            nodes: self.shore.node_count(),
            wave,
            budget,
            repair,
            retraced,
            full_retraces: self.full_retraces,
            total_us: started.elapsed().as_micros() as u64,
        };
        info!(
            step = %step,
            angle = waves.angle,
            height = waves.height,
            potential = wave.total_potential,
            outflux = budget.boundary_outflux,
            splices = repair.splices,
            retraced,
            "step complete"
        );
        Ok(report)
    }

    /// Run `steps` steps and return the resulting row-major occupancy.
    ///
    /// # Errors
    ///
    /// The first [`StepError`]; earlier steps stay applied.
    pub fn update(&mut self, steps: usize) -> Result<Vec<f64>, StepError> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(self.occupancy())
    }

    fn restore_topology(&mut self, step: Timestep, repair: &RepairReport) -> Result<bool, StepError> {
        let reason = if repair.topology_dirty {
            "repair left the shoreline dirty".to_string()
        } else {
            match self.shore.validate(&self.grid) {
                Ok(()) => return Ok(false),
                Err(e) if e.is_recoverable() => e.to_string(),
                Err(e) => return Err(e.into()),
            }
        };
        warn!(step = %step, %reason, "falling back to a full shoreline re-trace");
        trace_all(&mut self.grid, &mut self.shore)?;
        self.shore.validate(&self.grid)?;
        self.full_retraces += 1;
        Ok(true)
    }
}

impl<C> Coast<C> {
    /// Row-major copy of every cell's occupancy.
    pub fn occupancy(&self) -> Vec<f64> {
        self.grid.occupancy_row_major()
    }

    /// The grid as text, see [`grid_text`].
    pub fn snapshot(&self) -> String {
        grid_text(&self.grid)
    }

    /// The shoreline as text, see [`shoreline_text`].
    pub fn shoreline_snapshot(&self) -> String {
        shoreline_text(&self.shore)
    }

    /// Read access to the grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Read access to the shoreline.
    pub fn shoreline(&self) -> &Shoreline {
        &self.shore
    }

    /// Steps completed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Model time elapsed: completed steps times the step length.
    pub fn elapsed(&self) -> f64 {
        self.steps as f64 * self.timestep_length
    }

    /// Full re-traces since the coast was built.
    pub fn full_retraces(&self) -> u64 {
        self.full_retraces
    }

    /// Consume the coast and hand back its grid.
    pub fn finalize(self) -> Grid {
        self.grid
    }
}
