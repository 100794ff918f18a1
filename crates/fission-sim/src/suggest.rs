//! The suggestion oracle: where to edit, and what to place there.
//!
//! The search driver samples these instead of blind mutations once it is
//! past its exploratory stage; weights bias the draw toward clusters that
//! still run a heat deficit.

use crate::reactor::Reactor;
use crate::state::UNASSIGNED;
use crate::tri::Tri;
use fission_core::{Block, BlockKind, CoolerKind, ModeratorKind, NeutronSource, ReflectorKind};
use fission_grid::Pos;

/// Which family of edits the oracle proposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuggestMode {
    /// Sinks that would activate, conductors near live structure, and
    /// coolant removal in overcooled clusters.
    ComputeCooling,
    /// Variant swaps: moderators, neutron sources, reflectors.
    OptimizeModerators,
}

impl Reactor {
    /// Coordinates worth mutating: positions collinear with fuel cells,
    /// sink positions and their neighbors, and the neighborhood of valid
    /// moderators. Deterministic order, no duplicates.
    pub fn suggest_principled_locations(&mut self) -> Vec<Pos> {
        self.evaluate();
        let mut seen = vec![false; self.grid.len()];
        let mut out = Vec::new();
        let mut push = |grid: &fission_grid::Grid, p: Pos, out: &mut Vec<Pos>| {
            if let Some(i) = grid.index(p) {
                if !seen[i] {
                    seen[i] = true;
                    out.push(p);
                }
            }
        };

        for fi in 0..self.state.fuel_cells.len() {
            let p = self.grid.pos(self.state.fuel_cells[fi] as usize);
            push(&self.grid, p, &mut out);
            for d in fission_grid::OFFSETS {
                for q in fission_grid::adjacency::walk(p, d, self.ruleset.neutron_reach) {
                    push(&self.grid, q, &mut out);
                }
            }
        }
        for ci in 0..self.state.coolers.len() {
            let p = self.grid.pos(self.state.coolers[ci] as usize);
            push(&self.grid, p, &mut out);
            for n in p.neighbors() {
                push(&self.grid, n, &mut out);
            }
        }
        for mi in 0..self.state.moderators.len() {
            let i = self.state.moderators[mi] as usize;
            if self.state.valid[i] == Tri::Yes {
                for n in self.grid.pos(i).neighbors() {
                    push(&self.grid, n, &mut out);
                }
            }
        }
        out
    }

    /// Weighted block proposals for one position.
    pub fn suggested_blocks_at(&mut self, p: Pos, mode: SuggestMode) -> Vec<(Block, f64)> {
        self.evaluate();
        match mode {
            SuggestMode::ComputeCooling => self.suggest_cooling(p),
            SuggestMode::OptimizeModerators => self.suggest_variants(p),
        }
    }

    fn suggest_cooling(&mut self, p: Pos) -> Vec<(Block, f64)> {
        let mut out = Vec::new();
        let current = self.grid.block_at(p);

        let sink_weight = 1.0 + self.neighbor_heat_pressure(p);
        for kind in CoolerKind::ALL {
            if current.cooler != kind && self.sink_would_activate(p, kind) {
                out.push((Block::cooler(kind), sink_weight));
            }
        }

        if self.touches_live_structure(p) {
            out.push((Block::conductor(), 1.0));
        }

        if let Some(i) = self.grid.index(p) {
            if let Ok(c) = usize::try_from(self.state.cluster[i]) {
                let stats = self.state.clusters[c];
                if stats.cooling > stats.heating {
                    out.push((Block::AIR, 1.0));
                }
            }
        }

        out
    }

    /// The worst heat deficit among the clusters bordering `p`, clamped
    /// to 2: `max over neighbor clusters of min(heating/max(cooling,1), 2)`.
    fn neighbor_heat_pressure(&self, p: Pos) -> f64 {
        let mut worst: f64 = 0.0;
        for n in p.neighbors() {
            let Some(i) = self.grid.index(n) else { continue };
            let c = self.state.cluster[i];
            if c == UNASSIGNED {
                continue;
            }
            let stats = self.state.clusters[c as usize];
            worst = worst.max((stats.heating / stats.cooling.max(1.0)).min(2.0));
        }
        worst
    }

    fn touches_live_structure(&mut self, p: Pos) -> bool {
        for n in p.neighbors() {
            match self.grid.kind_at(n) {
                BlockKind::Casing => return true,
                BlockKind::FuelCell | BlockKind::Conductor => {
                    if let Some(i) = self.grid.index(n) {
                        if self.state.active[i] == Tri::Yes {
                            return true;
                        }
                    }
                }
                BlockKind::Cooler => {
                    let i = self.grid.index(n).expect("sink neighbor is in bounds") as u32;
                    if self.cooler_active(i) {
                        return true;
                    }
                }
                _ => {}
            }
        }
        false
    }

    fn suggest_variants(&mut self, p: Pos) -> Vec<(Block, f64)> {
        const SWAP_WEIGHT: f64 = 0.2;
        let current = self.grid.block_at(p);
        let mut out = Vec::new();
        match current.kind {
            BlockKind::Moderator => {
                for m in ModeratorKind::ALL {
                    if m != current.moderator {
                        out.push((Block::moderator(m), SWAP_WEIGHT));
                    }
                }
            }
            BlockKind::FuelCell => {
                for s in [
                    NeutronSource::Unprimed,
                    NeutronSource::RaBe,
                    NeutronSource::PoBe,
                    NeutronSource::Cf252,
                ] {
                    if s != current.source {
                        out.push((Block::fuel_cell(s), SWAP_WEIGHT));
                    }
                }
            }
            BlockKind::Reflector => {
                for k in ReflectorKind::ALL {
                    if k != current.reflector {
                        out.push((Block::reflector(k), SWAP_WEIGHT));
                    }
                }
            }
            _ => {}
        }
        out
    }
}
