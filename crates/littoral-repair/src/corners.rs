//! Corner smoothing and inset-corner removal.

use littoral_core::tolerance::{is_full, is_land, FULL};
use littoral_core::{CellPos, NodeId};
use littoral_grid::{neighbours4, Neighbour, Probe};
use tracing::debug;

use crate::cascade::{out_of_range, Repairer};

const DIAGONALS: [(i64, i64); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

impl Repairer<'_> {
    /// Move sediment out of shoreline cells that have no full
    /// 4-neighbour. Returns whether anything moved.
    pub(crate) fn smooth_corners(&mut self) -> bool {
        let mut changed = false;
        for id in self.shore.interior_nodes() {
            let Some(pos) = self.shore.position(id) else {
                continue;
            };
            let occ = self.grid.occupancy(pos);
            if !is_land(occ) || self.anchored(pos) {
                continue;
            }
            changed |= self.smooth(pos, occ);
        }
        changed
    }

    /// Whether any on-grid 4-neighbour is full. Off-grid neighbours
    /// neither anchor nor receive.
    fn anchored(&self, pos: CellPos) -> bool {
        neighbours4(self.grid, pos).into_iter().any(|n| match n {
            Neighbour::Cell(p) => is_full(self.grid.occupancy(p)),
            Neighbour::OffGrid => false,
        })
    }

    fn smooth(&mut self, pos: CellPos, occ: f64) -> bool {
        let partial = self.candidates(pos, 0.0, |o| is_land(o) && o < FULL, |o| FULL - o);
        if !partial.is_empty() {
            let space: f64 = partial.iter().map(|&(_, w)| w).sum();
            let moved = occ.min(space);
            if moved >= occ {
                self.grid.set_occupancy(pos, 0.0);
            } else {
                self.grid.add_occupancy(pos, -moved);
            }
            self.distribute(moved, &partial);
            self.report.smoothed_corners += 1;
            if !self.grid.is_land(pos) {
                self.resplice(pos);
            }
            return true;
        }

        let Some(target) = self.seaward_of_full_below(pos) else {
            return false;
        };
        let gained = !self.grid.is_land(target);
        self.grid.set_occupancy(pos, 0.0);
        let now = self.grid.add_occupancy(target, occ);
        self.report.smoothed_corners += 1;
        self.resplice(pos);
        if out_of_range(now) {
            self.settle(target);
        } else if gained && self.grid.node_at(target).is_none() {
            self.mark_dirty(target, "corner sediment landed away from the shoreline");
        }
        true
    }

    /// The cell just above the nearest full cell below `pos` in its column.
    fn seaward_of_full_below(&self, pos: CellPos) -> Option<CellPos> {
        (pos.row + 1..self.grid.rows())
            .find(|&r| is_full(self.grid.occupancy(CellPos::new(r, pos.col))))
            .map(|r| CellPos::new(r - 1, pos.col))
            .filter(|&target| target != pos)
    }

    /// Unlink nodes whose interior neighbours touch diagonally. Occupancy
    /// is left alone. Returns whether any node went.
    pub(crate) fn remove_insets(&mut self) -> bool {
        let mut changed = false;
        for id in self.shore.interior_nodes() {
            if !self.is_inset(id) {
                continue;
            }
            match self.shore.unlink(self.grid, id) {
                Ok(()) => {
                    self.report.insets_removed += 1;
                    changed = true;
                }
                Err(e) => {
                    debug!(node = %id, error = %e, "inset corner could not be unlinked");
                    self.report.topology_dirty = true;
                }
            }
        }
        changed
    }

    fn is_inset(&self, id: NodeId) -> bool {
        let Some(node) = self.shore.get(id) else {
            return false;
        };
        let (Some(prev), Some(next)) = (node.prev, node.next) else {
            return false;
        };
        if self.closes_within(id, 3) {
            return false;
        }
        let (Some(a), Some(b)) = (self.shore.position(prev), self.shore.position(next)) else {
            return false;
        };
        DIAGONALS
            .iter()
            .any(|&(dr, dc)| self.grid.offset(a, dr, dc) == Probe::Cell(b))
    }

    /// Whether following `next` from `id` returns to it within `steps`.
    fn closes_within(&self, id: NodeId, steps: usize) -> bool {
        let mut cursor = id;
        for _ in 0..steps {
            match self.shore.next(cursor) {
                Some(n) if n == id => return true,
                Some(n) => cursor = n,
                None => return false,
            }
        }
        false
    }
}
