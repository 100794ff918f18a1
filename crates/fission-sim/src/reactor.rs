//! The [`Reactor`]: grid ownership, lazy evaluation, metric accessors.

use crate::state::EvalState;
use crate::summary::{ClusterStats, Summary};
use fission_core::{fuel, Block, BlockKind, Fuel, FuelId, Ruleset};
use fission_grid::{Dims, Grid, Pos, OFFSETS};

/// A grid under evaluation.
///
/// Mutators mark the state dirty; the first metric accessor afterwards runs
/// one full evaluation pass. Evaluation is deterministic given the grid
/// contents, the fuel, and the ruleset. A `Reactor` is single-threaded;
/// the search clones independent instances for parallel scoring.
#[derive(Clone, Debug)]
pub struct Reactor {
    pub(crate) grid: Grid,
    pub(crate) fuel: FuelId,
    pub(crate) ruleset: &'static Ruleset,
    pub(crate) state: EvalState,
    pub(crate) summary: Summary,
    pub(crate) dirty: bool,
}

impl Reactor {
    /// An all-air reactor of the given dimensions.
    pub fn new(dims: Dims, fuel_id: FuelId, ruleset: &'static Ruleset) -> Reactor {
        Reactor::from_grid(Grid::new(dims), fuel_id, ruleset)
    }

    /// Wrap an existing grid.
    pub fn from_grid(grid: Grid, fuel_id: FuelId, ruleset: &'static Ruleset) -> Reactor {
        let summary = Summary::empty(grid.dims(), fuel_id);
        Reactor {
            grid,
            fuel: fuel_id,
            ruleset,
            state: EvalState::default(),
            summary,
            dirty: true,
        }
    }

    /// The underlying grid, read-only. Mutation goes through
    /// [`Reactor::set_cell`] so the dirty flag stays truthful.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Interior dimensions.
    pub fn dims(&self) -> Dims {
        self.grid.dims()
    }

    /// The fuel the reactor is evaluated for.
    pub fn fuel_id(&self) -> FuelId {
        self.fuel
    }

    /// The fuel's table row.
    pub fn fuel(&self) -> &'static Fuel {
        fuel(self.fuel).expect("reactor fuel id is in the table")
    }

    /// The ruleset in force.
    pub fn ruleset(&self) -> &'static Ruleset {
        self.ruleset
    }

    /// Switch the fuel under evaluation.
    pub fn set_fuel(&mut self, fuel_id: FuelId) {
        if self.fuel != fuel_id {
            self.fuel = fuel_id;
            self.dirty = true;
        }
    }

    /// Store a block. Out-of-bounds writes are ignored; storing the value
    /// already present leaves the cached evaluation intact.
    pub fn set_cell(&mut self, p: Pos, block: Block) {
        if self.grid.set(p, block) {
            self.dirty = true;
        }
    }

    /// Render the grid.
    pub fn describe(&self) -> String {
        self.grid.describe()
    }

    // ── Metric accessors ───────────────────────────────────────────────

    /// The full metric snapshot, evaluating first if dirty.
    pub fn summary(&mut self) -> Summary {
        self.evaluate();
        self.summary
    }

    /// Per-cluster aggregates, indexed by cluster id.
    pub fn clusters(&mut self) -> &[ClusterStats] {
        self.evaluate();
        &self.state.clusters
    }

    /// Cluster id at a position, if the cell belongs to one.
    pub fn cluster_at(&mut self, p: Pos) -> Option<usize> {
        self.evaluate();
        let i = self.grid.index(p)?;
        usize::try_from(self.state.cluster[i]).ok()
    }

    /// Whether the block at `p` ended the pass active. False for air and
    /// out-of-bounds positions.
    pub fn is_active_at(&mut self, p: Pos) -> bool {
        self.evaluate();
        match self.grid.index(p) {
            Some(i) => self.state.active[i].is_yes(),
            None => false,
        }
    }

    /// Accumulated moderator flux at `p` (0 outside the box).
    pub fn flux_at(&mut self, p: Pos) -> f64 {
        self.evaluate();
        self.grid.index(p).map_or(0.0, |i| self.state.flux[i])
    }

    /// Accumulated positional efficiency at `p` (0 outside the box).
    pub fn positional_efficiency_at(&mut self, p: Pos) -> f64 {
        self.evaluate();
        self.grid.index(p).map_or(0.0, |i| self.state.pos_eff[i])
    }

    /// `power · duty_cycle`.
    pub fn effective_power(&mut self) -> f64 {
        self.summary().effective_power
    }

    /// Cooling-penalized power over valid clusters.
    pub fn power(&mut self) -> f64 {
        self.summary().power
    }

    /// Global duty cycle.
    pub fn duty_cycle(&mut self) -> f64 {
        self.summary().duty_cycle
    }

    /// Number of fuel cells.
    pub fn total_cells(&mut self) -> u32 {
        self.summary().total_cells
    }

    /// Number of placed-but-useless blocks.
    pub fn inactive_blocks(&mut self) -> u32 {
        self.summary().inactive_blocks
    }

    // ── Evaluation pipeline ────────────────────────────────────────────

    pub(crate) fn evaluate(&mut self) {
        if !self.dirty {
            return;
        }
        self.revert_caches();
        self.assign_conductor_groups();
        self.broadcast_all_flux();
        self.activate_moderators();
        self.filter_adjacency();
        self.activate_reflectors();
        self.assign_clusters();
        self.summary = self.aggregate();
        self.dirty = false;
    }

    /// Step 1: clear all derived state and rescan the grid into the
    /// per-kind position caches.
    fn revert_caches(&mut self) {
        self.state.reset(self.grid.len());
        for p in self.grid.positions() {
            let i = self.grid.index(p).expect("canonical scan stays in bounds") as u32;
            let b = self.grid.block_at(p);
            match b.kind {
                BlockKind::FuelCell => {
                    self.state.fuel_cells.push(i);
                    if b.is_primed() && self.has_casing_line_of_sight(p) {
                        self.state.primed.push(i);
                    }
                }
                BlockKind::Moderator => self.state.moderators.push(i),
                BlockKind::Reflector => self.state.reflectors.push(i),
                BlockKind::Cooler => self.state.coolers.push(i),
                BlockKind::Conductor => self.state.conductors.push(i),
                BlockKind::Air | BlockKind::Casing => {}
            }
        }
    }

    /// A primed cell only seeds flux when some axis direction reaches the
    /// casing through air alone.
    fn has_casing_line_of_sight(&self, p: Pos) -> bool {
        'dirs: for d in OFFSETS {
            let mut q = p.step(d, 1);
            loop {
                match self.grid.kind_at(q) {
                    BlockKind::Casing => return true,
                    BlockKind::Air => q = q.step(d, 1),
                    _ => continue 'dirs,
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fission_core::{ModeratorKind, NeutronSource};

    fn reactor(x: i32, y: i32, z: i32) -> Reactor {
        Reactor::new(
            Dims::new(x, y, z),
            fission_core::GENERIC_FUEL,
            Ruleset::overhaul(),
        )
    }

    #[test]
    fn empty_grid_has_unit_duty_and_zero_power() {
        let mut r = reactor(3, 3, 3);
        let s = r.summary();
        assert_eq!(s.power, 0.0);
        assert_eq!(s.effective_power, 0.0);
        assert_eq!(s.duty_cycle, 1.0);
        assert_eq!(s.total_cells, 0);
    }

    #[test]
    fn set_cell_to_same_value_keeps_cached_evaluation() {
        let mut r = reactor(3, 3, 3);
        let p = Pos::new(1, 1, 1);
        r.set_cell(p, Block::fuel_cell(NeutronSource::RaBe));
        let before = r.summary();
        r.set_cell(p, Block::fuel_cell(NeutronSource::RaBe));
        assert!(!r.dirty);
        assert_eq!(r.summary(), before);
    }

    #[test]
    fn air_to_air_is_a_no_op_on_metrics() {
        let mut r = reactor(3, 3, 3);
        r.set_cell(Pos::new(0, 0, 0), Block::fuel_cell(NeutronSource::PoBe));
        let before = r.summary();
        r.set_cell(Pos::new(2, 2, 2), Block::AIR);
        assert_eq!(r.summary(), before);
    }

    #[test]
    fn line_of_sight_respects_obstructions() {
        let mut r = reactor(3, 3, 3);
        let center = Pos::new(1, 1, 1);
        r.set_cell(center, Block::fuel_cell(NeutronSource::Cf252));
        assert!(r.has_casing_line_of_sight(center));
        for n in center.neighbors() {
            r.set_cell(n, Block::moderator(ModeratorKind::Graphite));
        }
        assert!(!r.has_casing_line_of_sight(center));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let mut r = reactor(3, 3, 3);
        r.set_cell(Pos::new(1, 1, 1), Block::fuel_cell(NeutronSource::RaBe));
        r.set_cell(Pos::new(1, 1, 0), Block::moderator(ModeratorKind::Graphite));
        let a = r.summary();
        let b = r.summary();
        assert_eq!(a, b);
    }
}
