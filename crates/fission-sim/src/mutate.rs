//! Grid surgery between search steps: pruning dead weight, clearing
//! infeasible clusters, and saturating empty space with conductors.

use crate::reactor::Reactor;
use crate::tri::Tri;
use fission_core::{Block, BlockKind};
use fission_grid::{adjacency, OFFSETS};

impl Reactor {
    /// Replace with air every placed block that contributes nothing:
    /// cells, sinks and reflectors that are neither active nor valid,
    /// moderators never crossed by a delivered line, and (unless
    /// `keep_conductors`) conductors in groups that never reach the
    /// casing. A primed-but-inactive cell survives only when an axis probe
    /// still reaches an active cell through cells and moderators.
    ///
    /// Runs to a fixed point: a removal can strip the support of a block
    /// the same sweep kept (a probe path through a doomed cell), so
    /// sweeps repeat until nothing changes. One call is idempotent.
    pub fn prune_inactives(&mut self, keep_conductors: bool) {
        while self.prune_sweep(keep_conductors) {}
    }

    fn prune_sweep(&mut self, keep_conductors: bool) -> bool {
        self.evaluate();
        let mut doomed = Vec::new();
        for i in 0..self.grid.len() {
            let b = self.grid.block(i);
            let keep = match b.kind {
                BlockKind::Air | BlockKind::Casing => true,
                BlockKind::Conductor => {
                    keep_conductors || self.state.group_valid[self.state.group[i] as usize]
                }
                BlockKind::Moderator => {
                    self.state.active[i].is_yes()
                        || self.state.valid[i].is_yes()
                        || self.state.fluxed[i]
                }
                BlockKind::Cooler | BlockKind::Reflector => {
                    self.state.active[i].is_yes() || self.state.valid[i].is_yes()
                }
                BlockKind::FuelCell => {
                    self.state.active[i].is_yes()
                        || self.state.valid[i].is_yes()
                        || (b.is_primed() && self.probe_reaches_active_cell(i))
                }
            };
            if !keep {
                doomed.push(i);
            }
        }
        let removed = !doomed.is_empty();
        for i in doomed {
            let p = self.grid.pos(i);
            self.set_cell(p, Block::AIR);
        }
        removed
    }

    /// Axis probe for a primed cell: can it still see an active cell
    /// through a run of cells and moderators?
    fn probe_reaches_active_cell(&self, i: usize) -> bool {
        let p = self.grid.pos(i);
        for d in OFFSETS {
            for q in adjacency::walk(p, d, self.ruleset.neutron_reach + 1) {
                match self.grid.kind_at(q) {
                    BlockKind::FuelCell => {
                        let qi = self.grid.index(q).expect("cell is in bounds");
                        if self.state.active[qi] == Tri::Yes {
                            return true;
                        }
                        // An inactive cell still carries the line.
                    }
                    BlockKind::Moderator => {}
                    _ => break,
                }
            }
        }
        false
    }

    /// Replace every cell of each invalid or uncooled cluster with air.
    pub fn clear_infeasible_clusters(&mut self) {
        self.evaluate();
        let mut doomed = Vec::new();
        for i in 0..self.grid.len() {
            let Ok(c) = usize::try_from(self.state.cluster[i]) else {
                continue;
            };
            let stats = self.state.clusters[c];
            if !stats.valid || stats.cooling == 0.0 {
                doomed.push(i);
            }
        }
        for i in doomed {
            let p = self.grid.pos(i);
            self.set_cell(p, Block::AIR);
        }
    }

    /// Replace every air cell with a conductor. Invalid conductors are
    /// cheap to prune on the next pass; this densely tests conductivity.
    pub fn flood_fill_with_conductors(&mut self) {
        for i in 0..self.grid.len() {
            if self.grid.block(i).is_air() {
                let p = self.grid.pos(i);
                self.set_cell(p, Block::conductor());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fission_core::{CoolerKind, ModeratorKind, NeutronSource, Ruleset, GENERIC_FUEL};
    use fission_grid::{Dims, Pos};

    fn empty5() -> Reactor {
        Reactor::new(Dims::new(5, 5, 5), GENERIC_FUEL, Ruleset::overhaul())
    }

    #[test]
    fn prune_removes_dead_weight_and_keeps_live_structure() {
        let mut r = empty5();
        // Live: moderated pair + water on the wall cell.
        r.set_cell(Pos::new(2, 2, 0), Block::fuel_cell(NeutronSource::RaBe));
        r.set_cell(Pos::new(2, 2, 1), Block::moderator(ModeratorKind::Graphite));
        r.set_cell(Pos::new(2, 2, 2), Block::fuel_cell(NeutronSource::Unprimed));
        r.set_cell(Pos::new(2, 1, 0), Block::cooler(CoolerKind::Water));
        // Dead: lone moderator, lone sink, lone unprimed cell.
        r.set_cell(Pos::new(0, 0, 0), Block::moderator(ModeratorKind::Graphite));
        r.set_cell(Pos::new(4, 4, 4), Block::cooler(CoolerKind::Water));
        r.set_cell(Pos::new(0, 4, 0), Block::fuel_cell(NeutronSource::Unprimed));

        r.prune_inactives(false);

        assert_eq!(r.grid().kind_at(Pos::new(0, 0, 0)), BlockKind::Air);
        assert_eq!(r.grid().kind_at(Pos::new(4, 4, 4)), BlockKind::Air);
        assert_eq!(r.grid().kind_at(Pos::new(0, 4, 0)), BlockKind::Air);
        assert_eq!(r.grid().kind_at(Pos::new(2, 2, 0)), BlockKind::FuelCell);
        assert_eq!(r.grid().kind_at(Pos::new(2, 2, 1)), BlockKind::Moderator);
        assert_eq!(r.grid().kind_at(Pos::new(2, 1, 0)), BlockKind::Cooler);
    }

    #[test]
    fn prune_is_idempotent() {
        let mut r = empty5();
        r.set_cell(Pos::new(2, 2, 0), Block::fuel_cell(NeutronSource::RaBe));
        r.set_cell(Pos::new(2, 2, 1), Block::moderator(ModeratorKind::Graphite));
        r.set_cell(Pos::new(2, 2, 2), Block::fuel_cell(NeutronSource::Unprimed));
        r.set_cell(Pos::new(1, 0, 0), Block::cooler(CoolerKind::Glowstone));
        r.set_cell(Pos::new(3, 3, 3), Block::conductor());

        r.prune_inactives(false);
        let once = r.grid().clone();
        r.prune_inactives(false);
        assert_eq!(r.grid(), &once);
    }

    #[test]
    fn prune_keeps_conductors_on_request() {
        let mut r = empty5();
        r.set_cell(Pos::new(2, 2, 2), Block::conductor());
        r.prune_inactives(true);
        assert_eq!(r.grid().kind_at(Pos::new(2, 2, 2)), BlockKind::Conductor);
        r.prune_inactives(false);
        // Interior conductor reaches no casing: pruned.
        // (A single conductor at the center of 5³ touches nothing.)
        assert_eq!(r.grid().kind_at(Pos::new(2, 2, 2)), BlockKind::Air);
    }

    #[test]
    fn primed_cell_survives_while_its_line_is_alive() {
        let mut r = empty5();
        r.set_cell(Pos::new(2, 2, 0), Block::fuel_cell(NeutronSource::RaBe));
        r.set_cell(Pos::new(2, 2, 1), Block::moderator(ModeratorKind::Graphite));
        r.set_cell(Pos::new(2, 2, 2), Block::fuel_cell(NeutronSource::Unprimed));
        r.prune_inactives(false);
        assert_eq!(r.grid().kind_at(Pos::new(2, 2, 0)), BlockKind::FuelCell);

        // A primed cell with no casing sight line and no active cell in
        // axis reach fails the probe and goes too.
        let mut boxed = empty5();
        let center = Pos::new(2, 2, 2);
        boxed.set_cell(center, Block::fuel_cell(NeutronSource::Cf252));
        for n in center.neighbors() {
            boxed.set_cell(n, Block::moderator(ModeratorKind::Graphite));
        }
        boxed.prune_inactives(false);
        assert_eq!(boxed.grid().kind_at(center), BlockKind::Air);
    }

    #[test]
    fn clear_infeasible_removes_enclosed_and_uncooled_clusters() {
        let mut r = Reactor::new(Dims::new(7, 7, 7), GENERIC_FUEL, Ruleset::overhaul());
        // Enclosed (invalid) pair deep inside.
        r.set_cell(Pos::new(3, 3, 2), Block::fuel_cell(NeutronSource::RaBe));
        r.set_cell(Pos::new(3, 3, 3), Block::moderator(ModeratorKind::Graphite));
        r.set_cell(Pos::new(3, 3, 4), Block::fuel_cell(NeutronSource::Unprimed));
        r.clear_infeasible_clusters();
        assert_eq!(r.grid().kind_at(Pos::new(3, 3, 2)), BlockKind::Air);
        assert_eq!(r.grid().kind_at(Pos::new(3, 3, 4)), BlockKind::Air);
        // The moderator is not a cluster member and stays.
        assert_eq!(r.grid().kind_at(Pos::new(3, 3, 3)), BlockKind::Moderator);
    }

    #[test]
    fn conductor_fill_replaces_air_only() {
        let mut r = empty5();
        r.set_cell(Pos::new(2, 2, 2), Block::fuel_cell(NeutronSource::RaBe));
        r.flood_fill_with_conductors();
        assert_eq!(r.grid().kind_at(Pos::new(2, 2, 2)), BlockKind::FuelCell);
        assert_eq!(r.grid().kind_at(Pos::new(0, 0, 0)), BlockKind::Conductor);
        let conductors = r
            .grid()
            .positions()
            .filter(|&p| r.grid().kind_at(p) == BlockKind::Conductor)
            .count();
        assert_eq!(conductors, 124);
    }
}
