//! Per-step wave transform: shore angle, refraction and transport
//! potential for every interior node.

use littoral_core::{NodeId, WaveConditions};
use littoral_grid::Grid;
use littoral_shoreline::Shoreline;
use tracing::debug;

use crate::constants::{DEFAULT_INCIDENCE, GRAZING_LIMIT};
use crate::differencing::{shore_angle, ShoreAngle};
use crate::params::TransportParams;
use crate::refraction::{shoal, transport_potential};

/// Counters from one [`wave_transform`] pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WaveStats {
    /// Interior nodes visited.
    pub nodes: usize,
    /// Nodes skipped for grazing incidence.
    pub grazing: usize,
    /// Nodes that fell back to the default incidence.
    pub undefined_angles: usize,
    /// Nodes without enough neighbours to orient them.
    pub missing_geometry: usize,
    /// Sum of transport potentials (m³).
    pub total_potential: f64,
}

/// Reset every node's transport state, then store the transport
/// potential and direction of each interior node for waves `waves`
/// acting over `dt` seconds.
pub fn wave_transform(
    grid: &Grid,
    shore: &mut Shoreline,
    waves: WaveConditions,
    dt: f64,
    params: &TransportParams,
) -> WaveStats {
    let ids: Vec<NodeId> = shore.arena().ids().collect();
    for id in ids {
        if let Some(node) = shore.get_mut(id) {
            node.props.reset_transport();
        }
    }

    let mut stats = WaveStats::default();
    for id in shore.interior_nodes() {
        stats.nodes += 1;
        let alpha_deep = match shore_angle(grid, shore, id, waves.angle, params) {
            Some(ShoreAngle::Angle(angle)) => waves.angle - angle,
            Some(ShoreAngle::Undefined) => {
                stats.undefined_angles += 1;
                DEFAULT_INCIDENCE
            }
            None => {
                stats.missing_geometry += 1;
                debug!(node = %id, "no shore angle, node moves no sediment");
                continue;
            }
        };
        if alpha_deep.abs() > GRAZING_LIMIT {
            stats.grazing += 1;
            continue;
        }
        let breaking = shoal(&waves, alpha_deep);
        let q = transport_potential(params, breaking.height, breaking.alpha, dt);
        if let Some(node) = shore.get_mut(id) {
            node.props.transport_potential = q;
        }
        stats.total_potential += q;
    }
    stats
}
