//! Transport parameters.
//!
//! [`TransportParams`] is built through [`TransportParams::builder`],
//! which checks every value before the engine sees it. The defaults are
//! the classic model's constants.

use thiserror::Error;

use crate::constants::{
    INSTABILITY_THRESHOLD_DEG, MAX_SHADOW_STEPS, SEA_WATER_DENSITY, SEDIMENT_MOBILITY, SHADOW_STEP,
};

// ── Policies ───────────────────────────────────────────────────────

/// How the depth of closure is chosen for each node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClosurePolicy {
    /// The same depth everywhere (m).
    Fixed(f64),
    /// From the linear shelf/shoreface model in [`ShelfProfile`].
    Derived,
}

impl Default for ClosurePolicy {
    fn default() -> Self {
        Self::Fixed(10.0)
    }
}

/// Which neighbour counts as the cell "behind" a shoreline node when
/// totting up available sediment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SupplyLookup {
    /// One cell landward along the shore normal, snapped to a grid axis.
    #[default]
    ShoreNormal,
    /// One cell along the local shore direction, snapped to a grid axis.
    ShoreTangent,
}

/// Linear continental shelf and shoreface used by
/// [`ClosurePolicy::Derived`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShelfProfile {
    /// Row at which the shelf depth is known.
    pub cross_shore_reference: usize,
    /// Shelf depth at that row (m).
    pub shelf_depth_at_reference: f64,
    /// Shelf gradient, depth gained per metre offshore.
    pub shelf_slope: f64,
    /// Shoreface gradient. Must be steeper than the shelf.
    pub shoreface_slope: f64,
    /// Floor of the derived depth (m).
    pub minimum_closure_depth: f64,
}

impl Default for ShelfProfile {
    fn default() -> Self {
        Self {
            cross_shore_reference: 10,
            shelf_depth_at_reference: 10.0,
            shelf_slope: 0.001,
            shoreface_slope: 0.01,
            minimum_closure_depth: 10.0,
        }
    }
}

// ── ParamError ─────────────────────────────────────────────────────

/// A rejected transport parameter.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParamError {
    /// A value that must be positive is zero, negative or not finite.
    #[error("{name} must be finite and > 0, got {value}")]
    NotPositive {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A value that must be non-negative is negative or not finite.
    #[error("{name} must be finite and >= 0, got {value}")]
    Negative {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The shadow march would never take a step.
    #[error("max_shadow_steps must be at least 1")]
    NoShadowSteps,
    /// The shoreface is not steeper than the shelf.
    #[error("shoreface slope {shoreface} must exceed shelf slope {shelf}")]
    SlopeOrder {
        /// Configured shoreface slope.
        shoreface: f64,
        /// Configured shelf slope.
        shelf: f64,
    },
}

fn positive(name: &'static str, value: f64) -> Result<(), ParamError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ParamError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ParamError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ParamError::Negative { name, value })
    }
}

// ── TransportParams ────────────────────────────────────────────────

/// Coefficients of the wave transform and sediment budget.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransportParams {
    /// Sediment mobility coefficient `k` of the CERC formula.
    pub sediment_mobility: f64,
    /// Water density `ρ` (kg/m³).
    pub water_density: f64,
    /// Wave/shore angle difference beyond which a node counts as
    /// unstable (radians).
    pub instability_threshold: f64,
    /// Step of the shadow march (cells).
    pub shadow_step: f64,
    /// Upper bound on shadow march steps per node.
    pub max_shadow_steps: usize,
    /// Depth-of-closure policy.
    pub closure: ClosurePolicy,
    /// Where to look for sediment behind a node.
    pub supply: SupplyLookup,
    /// Shelf profile for [`ClosurePolicy::Derived`].
    pub shelf: ShelfProfile,
}

impl Default for TransportParams {
    fn default() -> Self {
        Self {
            sediment_mobility: SEDIMENT_MOBILITY,
            water_density: SEA_WATER_DENSITY,
            instability_threshold: INSTABILITY_THRESHOLD_DEG.to_radians(),
            shadow_step: SHADOW_STEP,
            max_shadow_steps: MAX_SHADOW_STEPS,
            closure: ClosurePolicy::default(),
            supply: SupplyLookup::default(),
            shelf: ShelfProfile::default(),
        }
    }
}

impl TransportParams {
    /// A builder starting from the defaults.
    pub fn builder() -> TransportParamsBuilder {
        TransportParamsBuilder {
            params: Self::default(),
        }
    }

    /// Check every value.
    ///
    /// # Errors
    ///
    /// The first [`ParamError`] found.
    pub fn validate(&self) -> Result<(), ParamError> {
        positive("sediment_mobility", self.sediment_mobility)?;
        positive("water_density", self.water_density)?;
        positive("instability_threshold", self.instability_threshold)?;
        positive("shadow_step", self.shadow_step)?;
        if self.max_shadow_steps == 0 {
            return Err(ParamError::NoShadowSteps);
        }
        if let ClosurePolicy::Fixed(depth) = self.closure {
            positive("closure depth", depth)?;
        }
        let shelf = &self.shelf;
        non_negative("shelf_depth_at_reference", shelf.shelf_depth_at_reference)?;
        non_negative("shelf_slope", shelf.shelf_slope)?;
        positive("shoreface_slope", shelf.shoreface_slope)?;
        positive("minimum_closure_depth", shelf.minimum_closure_depth)?;
        if shelf.shoreface_slope <= shelf.shelf_slope {
            return Err(ParamError::SlopeOrder {
                shoreface: shelf.shoreface_slope,
                shelf: shelf.shelf_slope,
            });
        }
        Ok(())
    }
}

/// Builder for [`TransportParams`].
#[derive(Clone, Debug)]
pub struct TransportParamsBuilder {
    params: TransportParams,
}

impl TransportParamsBuilder {
    /// Sediment mobility `k` (default 0.67). Must be > 0.
    pub fn sediment_mobility(mut self, k: f64) -> Self {
        self.params.sediment_mobility = k;
        self
    }

    /// Water density (default 1020 kg/m³). Must be > 0.
    pub fn water_density(mut self, rho: f64) -> Self {
        self.params.water_density = rho;
        self
    }

    /// Instability threshold in degrees (default 42).
    pub fn instability_threshold_deg(mut self, degrees: f64) -> Self {
        self.params.instability_threshold = degrees.to_radians();
        self
    }

    /// Shadow march step in cells (default 0.2).
    pub fn shadow_step(mut self, step: f64) -> Self {
        self.params.shadow_step = step;
        self
    }

    /// Bound on shadow march steps (default 10 000).
    pub fn max_shadow_steps(mut self, steps: usize) -> Self {
        self.params.max_shadow_steps = steps;
        self
    }

    /// Depth-of-closure policy (default `Fixed(10.0)`).
    pub fn closure(mut self, policy: ClosurePolicy) -> Self {
        self.params.closure = policy;
        self
    }

    /// Supply lookup (default [`SupplyLookup::ShoreNormal`]).
    pub fn supply(mut self, lookup: SupplyLookup) -> Self {
        self.params.supply = lookup;
        self
    }

    /// Shelf profile for the derived closure depth.
    pub fn shelf(mut self, shelf: ShelfProfile) -> Self {
        self.params.shelf = shelf;
        self
    }

    /// Validate and return the parameters.
    ///
    /// # Errors
    ///
    /// See [`TransportParams::validate`].
    pub fn build(self) -> Result<TransportParams, ParamError> {
        self.params.validate()?;
        Ok(self.params)
    }
}
