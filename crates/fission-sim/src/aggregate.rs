//! Aggregation: per-cluster sums, duty cycle, and the global summary
//! (pipeline steps 8 and 9).

use crate::reactor::Reactor;
use crate::summary::Summary;
use crate::tri::Tri;
use fission_core::{BlockKind, NeutronSource};

impl Reactor {
    /// Per-cell efficiency: positional efficiency, the fuel's base factor,
    /// a logistic penalty for over-fluxing past double criticality, and
    /// the source factor for primed cells.
    fn cell_efficiency(&self, i: usize) -> f64 {
        let f = self.fuel();
        let b = self.grid.block(i);
        let overflux = 1.0 / (1.0 + (2.0 * (self.state.flux[i] - 2.0 * f.criticality)).exp());
        let source = if b.is_primed() {
            self.ruleset.source_efficiency(b.source)
        } else {
            1.0
        };
        self.state.pos_eff[i] * f.base_efficiency * overflux * source
    }

    /// Steps 8 and 9: fill cluster aggregates, then fold the global
    /// summary.
    pub(crate) fn aggregate(&mut self) -> Summary {
        let base_heat = self.fuel().base_heat;
        let mut summary = Summary::empty(self.grid.dims(), self.fuel);

        summary.total_cells = self.state.fuel_cells.len() as u32;
        summary.moderator_count = self.state.moderators.len() as u32;
        summary.cluster_count = self.state.clusters.len() as u32;

        // Per-cell contributions. Only cells in a cluster (i.e. valid
        // ones) aggregate; everything else scores zero.
        for fi in 0..self.state.fuel_cells.len() {
            let i = self.state.fuel_cells[fi] as usize;
            let Ok(c) = usize::try_from(self.state.cluster[i]) else {
                continue;
            };
            let heat_mult = self.state.adjacency[i].len() as f64;
            let eff = self.cell_efficiency(i);
            let stats = &mut self.state.clusters[c];
            stats.heating += heat_mult * base_heat;
            stats.output += eff * base_heat;
            stats.sum_efficiency += eff;
            stats.sum_heat_multiplier += heat_mult;
            stats.cell_count += 1;
        }

        // Per-sink contributions; this also settles any sink the cluster
        // fill never probed.
        for ci in 0..self.state.coolers.len() {
            let i = self.state.coolers[ci];
            if !self.cooler_active(i) {
                continue;
            }
            let kind = self.grid.block(i as usize).cooler;
            if let Ok(c) = usize::try_from(self.state.cluster[i as usize]) {
                self.state.clusters[c].cooling += self.ruleset.cooler_strength(kind);
            }
        }

        // Global folds. Valid clusters deliver their output in full; the
        // duty cycle is the only throttle, and it fires on heat deficits
        // alone. An over-cooled cluster is simply safe.
        let leniency = self.ruleset.cooling_leniency;
        let mut sum_eff = 0.0;
        for stats in &self.state.clusters {
            summary.total_heating += stats.heating;
            summary.total_cooling += stats.cooling;
            sum_eff += stats.sum_efficiency;
            if stats.valid {
                summary.valid_clusters += 1;
                summary.power += stats.output;
            }
            let budget = stats.cooling + leniency;
            if !stats.valid && stats.heating > 0.0 {
                summary.duty_cycle = 0.0;
            } else if stats.heating > budget {
                summary.duty_cycle = summary.duty_cycle.min(budget / stats.heating);
            }
        }
        summary.heat_balance = summary.total_heating - summary.total_cooling;
        summary.effective_power = summary.power * summary.duty_cycle;
        summary.avg_efficiency = sum_eff / f64::from(summary.total_cells.max(1));

        self.fold_block_counts(&mut summary);
        summary
    }

    fn fold_block_counts(&self, summary: &mut Summary) {
        let mut air = self.grid.len();
        for list in [
            &self.state.fuel_cells,
            &self.state.moderators,
            &self.state.reflectors,
            &self.state.coolers,
            &self.state.conductors,
        ] {
            air -= list.len();
        }

        for i in 0..self.grid.len() {
            let b = self.grid.block(i);
            let inactive = match b.kind {
                BlockKind::FuelCell => {
                    let p = self.grid.pos(i);
                    if p.neighbors()
                        .iter()
                        .all(|&n| self.grid.kind_at(n).is_solid())
                    {
                        summary.trapped_cells += 1;
                    }
                    if self.state.active[i] == Tri::Yes {
                        if b.source == NeutronSource::Unprimed {
                            summary.self_sustaining = true;
                        }
                        false
                    } else {
                        true
                    }
                }
                BlockKind::Moderator => {
                    if self.state.fluxed[i] {
                        summary.fluxed_moderators += 1;
                    }
                    if self.state.sandwiched[i] {
                        summary.sandwiched_moderators += 1;
                    }
                    !self.state.fluxed[i]
                }
                BlockKind::Cooler | BlockKind::Reflector => self.state.active[i] != Tri::Yes,
                BlockKind::Conductor => {
                    let g = self.state.group[i];
                    !self.state.group_valid[g as usize]
                }
                BlockKind::Air | BlockKind::Casing => false,
            };
            if inactive {
                summary.inactive_blocks += 1;
            }
        }

        summary.empty_blocks =
            air as u32 + self.state.conductors.len() as u32 + summary.inactive_blocks;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fission_core::{Block, CoolerKind, ModeratorKind, Ruleset, GENERIC_FUEL};
    use fission_grid::{Dims, Pos};

    /// Active pair along z against the z=0 wall, each endpoint in its own
    /// cooled, valid cluster: the wall cell by casing contact, the interior
    /// cell by a conductor run; one water sink on each. Generic fuel.
    fn cooled_pair() -> Reactor {
        let mut r = Reactor::new(Dims::new(5, 5, 5), GENERIC_FUEL, Ruleset::overhaul());
        r.set_cell(Pos::new(2, 2, 0), Block::fuel_cell(NeutronSource::RaBe));
        r.set_cell(Pos::new(2, 2, 1), Block::moderator(ModeratorKind::Graphite));
        r.set_cell(Pos::new(2, 2, 2), Block::fuel_cell(NeutronSource::Unprimed));
        r.set_cell(Pos::new(2, 1, 0), Block::cooler(CoolerKind::Water));
        r.set_cell(Pos::new(2, 1, 2), Block::cooler(CoolerKind::Water));
        r.set_cell(Pos::new(2, 3, 2), Block::conductor());
        r.set_cell(Pos::new(2, 4, 2), Block::conductor());
        r
    }

    #[test]
    fn cluster_sums_match_the_hand_computation() {
        let mut r = cooled_pair();
        let s = r.summary();

        // A moderated pair is never 6-adjacent, so the endpoints land in
        // two clusters; each cell has one adjacency and base heat 1.
        assert_eq!(s.cluster_count, 2);
        assert_eq!(s.valid_clusters, 2);
        assert_eq!(s.total_heating, 2.0);
        assert_eq!(s.total_cooling, 110.0);

        // Both clusters sit far under their cooling budget: that is the
        // safe regime, so their output is delivered in full.
        let output_sum: f64 = r.clusters().iter().map(|c| c.output).sum();
        let s = r.summary();
        assert_eq!(s.power, output_sum);
        assert!(s.power > 0.0);
        assert_eq!(s.duty_cycle, 1.0);
        assert_eq!(s.effective_power, s.power);
        assert!(s.self_sustaining);
    }

    #[test]
    fn per_cell_efficiency_factors_multiply() {
        let mut r = cooled_pair();
        r.evaluate();
        let primed = r.grid.index(Pos::new(2, 2, 0)).unwrap();
        let plain = r.grid.index(Pos::new(2, 2, 2)).unwrap();
        // Identical lines, so the primed cell differs from the unprimed
        // one by the Ra-Be source factor alone.
        let ratio = r.cell_efficiency(primed) / r.cell_efficiency(plain);
        assert!((ratio - 0.90).abs() < 1e-9);
    }

    #[test]
    fn invalid_heating_cluster_zeroes_the_duty_cycle() {
        let mut r = Reactor::new(Dims::new(7, 7, 7), GENERIC_FUEL, Ruleset::overhaul());
        r.set_cell(Pos::new(3, 3, 2), Block::fuel_cell(NeutronSource::RaBe));
        r.set_cell(Pos::new(3, 3, 3), Block::moderator(ModeratorKind::Graphite));
        r.set_cell(Pos::new(3, 3, 4), Block::fuel_cell(NeutronSource::Unprimed));
        let s = r.summary();
        assert_eq!(s.valid_clusters, 0);
        assert!(s.total_heating > 0.0);
        assert_eq!(s.duty_cycle, 0.0);
        assert_eq!(s.effective_power, 0.0);
    }

    #[test]
    fn overheating_valid_cluster_zeroes_its_duty_contribution() {
        // Strip the wall cluster's only sink: that cluster heats 1 against
        // cooling 0, dragging the global duty cycle to zero.
        let mut r = cooled_pair();
        r.set_cell(Pos::new(2, 1, 0), Block::AIR);
        let s = r.summary();
        assert_eq!(s.total_cooling, 55.0);
        assert_eq!(s.duty_cycle, 0.0);
        assert_eq!(s.effective_power, 0.0);
    }

    #[test]
    fn inactive_and_empty_counts() {
        let mut r = cooled_pair();
        // A stray moderator nothing ever fluxes, and a sink with no cell.
        r.set_cell(Pos::new(0, 0, 0), Block::moderator(ModeratorKind::Beryllium));
        r.set_cell(Pos::new(4, 4, 4), Block::cooler(CoolerKind::Water));
        let s = r.summary();
        assert_eq!(s.inactive_blocks, 2);
        // 125 cells − 9 placed blocks = 116 air, plus 2 conductors and the
        // two inactives.
        assert_eq!(s.empty_blocks, 116 + 2 + 2);
        assert_eq!(s.fluxed_moderators, 1);
        assert_eq!(s.sandwiched_moderators, 1);
    }

    #[test]
    fn trapped_cells_are_counted() {
        let mut r = Reactor::new(Dims::new(3, 3, 3), GENERIC_FUEL, Ruleset::overhaul());
        let center = Pos::new(1, 1, 1);
        r.set_cell(center, Block::fuel_cell(NeutronSource::Unprimed));
        for n in center.neighbors() {
            r.set_cell(n, Block::moderator(ModeratorKind::Graphite));
        }
        assert_eq!(r.summary().trapped_cells, 1);

        // A corner cell against three casing faces and three moderators
        // is trapped too.
        let mut c = Reactor::new(Dims::new(3, 3, 3), GENERIC_FUEL, Ruleset::overhaul());
        c.set_cell(Pos::new(0, 0, 0), Block::fuel_cell(NeutronSource::Unprimed));
        c.set_cell(Pos::new(1, 0, 0), Block::moderator(ModeratorKind::Graphite));
        c.set_cell(Pos::new(0, 1, 0), Block::moderator(ModeratorKind::Graphite));
        c.set_cell(Pos::new(0, 0, 1), Block::moderator(ModeratorKind::Graphite));
        assert_eq!(c.summary().trapped_cells, 1);
    }
}
