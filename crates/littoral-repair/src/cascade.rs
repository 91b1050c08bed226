//! Overflow/underflow cascade and local re-splicing.
//!
//! [`Repairer`] owns the mutable borrow of the grid and shoreline for one
//! repair run. Moving sediment between cells goes through
//! [`Repairer::settle`], which fixes a cell and then any neighbour the fix
//! pushed out of range, worklist style.

use std::collections::VecDeque;

use littoral_core::tolerance::{is_full, is_land, FULL, UNDERFLOW_TOLERANCE};
use littoral_core::{CellPos, NodeId};
use littoral_grid::{neighbours4, Grid, Neighbour};
use littoral_shoreline::{replace_node, Shoreline};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::report::{RepairParams, RepairReport};

/// A neighbour picked to give or take sediment, with its weight.
/// `None` is a virtual off-grid cell.
pub(crate) type Candidate = (Option<CellPos>, f64);

/// Cells touched by a redistribution and whether each held land before.
pub(crate) type Touched = SmallVec<[(CellPos, bool); 4]>;

pub(crate) fn out_of_range(occupancy: f64) -> bool {
    occupancy < 0.0 || occupancy > FULL
}

pub(crate) struct Repairer<'a> {
    pub(crate) grid: &'a mut Grid,
    pub(crate) shore: &'a mut Shoreline,
    pub(crate) params: RepairParams,
    pub(crate) report: RepairReport,
    visits: Vec<u32>,
}

impl<'a> Repairer<'a> {
    pub(crate) fn new(grid: &'a mut Grid, shore: &'a mut Shoreline, params: RepairParams) -> Self {
        let visits = vec![0; grid.cell_count()];
        Self {
            grid,
            shore,
            params,
            report: RepairReport::default(),
            visits,
        }
    }

    pub(crate) fn into_report(self) -> RepairReport {
        self.report
    }

    fn area(&self) -> f64 {
        self.grid.cell_area()
    }

    /// Fix `start` and every cell the fix pushes out of range.
    pub(crate) fn settle(&mut self, start: CellPos) {
        let mut queue = VecDeque::from([start]);
        while let Some(pos) = queue.pop_front() {
            let occ = self.grid.occupancy(pos);
            if !out_of_range(occ) {
                continue;
            }
            let i = pos.row * self.grid.cols() + pos.col;
            self.visits[i] += 1;
            let touched = if self.visits[i] > self.params.max_cell_visits {
                let residual = (occ.clamp(0.0, FULL) - occ) * self.area();
                warn!(%pos, occ, residual, "cell keeps leaving range, clamping");
                self.clamp(pos, occ);
                Touched::new()
            } else if occ < 0.0 {
                self.underflow(pos, occ)
            } else {
                self.overflow(pos, occ)
            };

            let mut reshaped = occ < 0.0;
            for (n, was_land) in touched {
                let now = self.grid.occupancy(n);
                if out_of_range(now) {
                    queue.push_back(n);
                } else if was_land && !is_land(now) {
                    self.resplice(n);
                } else if !was_land && is_land(now) {
                    reshaped = true;
                }
            }
            match self.grid.node_at(pos) {
                Some(id) => self.splice(id),
                None if reshaped => self.mark_dirty(pos, "unenrolled cell changed land status"),
                None => {}
            }
        }
    }

    fn underflow(&mut self, pos: CellPos, occ: f64) -> Touched {
        self.report.underflows += 1;
        if occ >= -UNDERFLOW_TOLERANCE {
            self.clamp(pos, occ);
            return Touched::new();
        }
        let mut donors = self.candidates(pos, FULL, is_full, |o| o);
        if donors.is_empty() {
            donors = self.candidates(pos, FULL, is_land, |o| o);
        }
        if donors.is_empty() {
            debug!(%pos, occ, "no donor for underflow, clamping");
            self.clamp(pos, occ);
            return Touched::new();
        }
        self.grid.set_occupancy(pos, 0.0);
        self.distribute(occ, &donors)
    }

    fn overflow(&mut self, pos: CellPos, occ: f64) -> Touched {
        self.report.overflows += 1;
        let mut receivers = self.candidates(pos, 0.0, |o| o <= 0.0, |o| FULL - o);
        if receivers.is_empty() {
            receivers = self.candidates(pos, 0.0, |o| o < FULL, |o| FULL - o);
        }
        if receivers.is_empty() {
            debug!(%pos, occ, "no receiver for overflow, clamping");
            self.clamp(pos, occ);
            return Touched::new();
        }
        self.grid.set_occupancy(pos, FULL);
        self.distribute(occ - FULL, &receivers)
    }

    /// Neighbours of `pos` whose occupancy passes `keep`, weighted by
    /// `weight`. Off-grid neighbours are virtual cells holding `virtual_occ`.
    pub(crate) fn candidates(
        &self,
        pos: CellPos,
        virtual_occ: f64,
        keep: impl Fn(f64) -> bool,
        weight: impl Fn(f64) -> f64,
    ) -> SmallVec<[Candidate; 4]> {
        neighbours4(self.grid, pos)
            .into_iter()
            .filter_map(|n| {
                let (cell, occ) = match n {
                    Neighbour::Cell(p) => (Some(p), self.grid.occupancy(p)),
                    Neighbour::OffGrid => (None, virtual_occ),
                };
                let w = weight(occ);
                (keep(occ) && w > 0.0).then_some((cell, w))
            })
            .collect()
    }

    /// Spread `amount` of occupancy over `targets` in proportion to their
    /// weights. Shares landing off the grid are booked as exchange.
    pub(crate) fn distribute(&mut self, amount: f64, targets: &[Candidate]) -> Touched {
        let total: f64 = targets.iter().map(|&(_, w)| w).sum();
        let area = self.area();
        let mut touched = Touched::new();
        for &(cell, w) in targets {
            let share = amount * w / total;
            match cell {
                Some(p) => {
                    let was_land = self.grid.is_land(p);
                    self.grid.add_occupancy(p, share);
                    touched.push((p, was_land));
                }
                None => self.report.off_grid_exchange -= share * area,
            }
        }
        touched
    }

    fn clamp(&mut self, pos: CellPos, occ: f64) {
        let target = occ.clamp(0.0, FULL);
        self.report.clamped_residual += (target - occ) * self.area();
        self.grid.set_occupancy(pos, target);
    }

    /// Re-splice the node at `pos`, or flag the topology when the cell is
    /// not enrolled.
    pub(crate) fn resplice(&mut self, pos: CellPos) {
        match self.grid.node_at(pos) {
            Some(id) => self.splice(id),
            None => self.mark_dirty(pos, "unenrolled cell changed land status"),
        }
    }

    fn splice(&mut self, id: NodeId) {
        match replace_node(self.grid, self.shore, id) {
            Ok(_) => self.report.splices += 1,
            Err(e) => {
                debug!(node = %id, error = %e, "local re-splice failed");
                self.report.failed_splices += 1;
                self.report.topology_dirty = true;
            }
        }
    }

    pub(crate) fn mark_dirty(&mut self, pos: CellPos, reason: &str) {
        if !self.report.topology_dirty {
            debug!(%pos, reason, "topology marked dirty");
        }
        self.report.topology_dirty = true;
    }
}
