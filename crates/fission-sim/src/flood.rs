//! Flood fills: conductor group labeling (step 2) and cluster labeling
//! (step 7). Both are queue-based fills over the 6-neighbor graph.

use crate::reactor::Reactor;
use crate::state::UNASSIGNED;
use crate::tri::Tri;
use fission_core::BlockKind;
use std::collections::VecDeque;

impl Reactor {
    /// Step 2: label conductor groups. A group touching the casing is
    /// valid, and every cell in a valid group becomes active and valid.
    pub(crate) fn assign_conductor_groups(&mut self) {
        let mut next_group = 0;
        for ci in 0..self.state.conductors.len() {
            let seed = self.state.conductors[ci] as usize;
            if self.state.group[seed] != UNASSIGNED {
                continue;
            }
            let id = next_group;
            next_group += 1;

            let mut members = Vec::new();
            let mut touches_casing = false;
            let mut queue = VecDeque::new();
            self.state.group[seed] = id;
            queue.push_back(seed);
            while let Some(i) = queue.pop_front() {
                members.push(i);
                let p = self.grid.pos(i);
                for n in p.neighbors() {
                    match self.grid.kind_at(n) {
                        BlockKind::Casing => touches_casing = true,
                        BlockKind::Conductor => {
                            let ni = self.grid.index(n).expect("conductor is in bounds");
                            if self.state.group[ni] == UNASSIGNED {
                                self.state.group[ni] = id;
                                queue.push_back(ni);
                            }
                        }
                        _ => {}
                    }
                }
            }

            self.state.group_valid.push(touches_casing);
            if touches_casing {
                for i in members {
                    self.state.active[i] = Tri::Yes;
                    self.state.valid[i] = Tri::Yes;
                }
            }
        }
    }

    /// Step 7: label clusters. Seeds are valid fuel cells; the fill
    /// expands through valid fuel cells and active sinks. A cluster
    /// touching the casing or an active conductor is valid.
    pub(crate) fn assign_clusters(&mut self) {
        let mut next_cluster = 0;
        for fi in 0..self.state.fuel_cells.len() {
            let seed = self.state.fuel_cells[fi] as usize;
            if self.state.valid[seed] != Tri::Yes || self.state.cluster[seed] != UNASSIGNED {
                continue;
            }
            let id = next_cluster;
            next_cluster += 1;

            let mut cluster_valid = false;
            let mut queue = VecDeque::new();
            self.state.cluster[seed] = id;
            queue.push_back(seed);
            while let Some(i) = queue.pop_front() {
                let p = self.grid.pos(i);
                for n in p.neighbors() {
                    match self.grid.kind_at(n) {
                        BlockKind::Casing => cluster_valid = true,
                        BlockKind::Conductor => {
                            let ni = self.grid.index(n).expect("conductor is in bounds");
                            if self.state.active[ni] == Tri::Yes {
                                cluster_valid = true;
                            }
                        }
                        BlockKind::FuelCell => {
                            let ni = self.grid.index(n).expect("cell is in bounds");
                            if self.state.valid[ni] == Tri::Yes
                                && self.state.cluster[ni] == UNASSIGNED
                            {
                                self.state.cluster[ni] = id;
                                queue.push_back(ni);
                            }
                        }
                        BlockKind::Cooler => {
                            let ni = self.grid.index(n).expect("sink is in bounds") as u32;
                            if self.state.cluster[ni as usize] == UNASSIGNED
                                && self.cooler_active(ni)
                            {
                                self.state.cluster[ni as usize] = id;
                                queue.push_back(ni as usize);
                            }
                        }
                        _ => {}
                    }
                }
            }

            self.state.clusters.push(crate::summary::ClusterStats {
                valid: cluster_valid,
                ..Default::default()
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fission_core::{Block, CoolerKind, ModeratorKind, NeutronSource, Ruleset, GENERIC_FUEL};
    use fission_grid::{Dims, Pos};

    fn empty5() -> Reactor {
        Reactor::new(Dims::new(5, 5, 5), GENERIC_FUEL, Ruleset::overhaul())
    }

    #[test]
    fn casing_reaching_conductor_group_is_active() {
        let mut r = empty5();
        // A conductor run from the wall into the middle.
        for x in 0..3 {
            r.set_cell(Pos::new(x, 2, 2), Block::conductor());
        }
        // An isolated conductor in the far corner region, not touching
        // the run and not the wall... (3,3,3) has no casing contact.
        r.set_cell(Pos::new(3, 3, 3), Block::conductor());
        r.evaluate();

        for x in 0..3 {
            let i = r.grid.index(Pos::new(x, 2, 2)).unwrap();
            assert_eq!(r.state.group[i], 0);
            assert_eq!(r.state.active[i], Tri::Yes);
        }
        let lone = r.grid.index(Pos::new(3, 3, 3)).unwrap();
        assert_eq!(r.state.group[lone], 1);
        assert_eq!(r.state.active[lone], Tri::Unset);
        assert_eq!(r.state.group_valid, vec![true, false]);
    }

    #[test]
    fn cluster_includes_active_sinks_and_validates_on_casing() {
        let mut r = empty5();
        // Active pair against the z=0 wall.
        r.set_cell(Pos::new(2, 2, 0), Block::fuel_cell(NeutronSource::RaBe));
        r.set_cell(Pos::new(2, 2, 1), Block::moderator(ModeratorKind::Graphite));
        r.set_cell(Pos::new(2, 2, 2), Block::fuel_cell(NeutronSource::Unprimed));
        // Water sink touching the wall cell.
        r.set_cell(Pos::new(2, 1, 0), Block::cooler(CoolerKind::Water));
        r.evaluate();

        let cell = r.grid.index(Pos::new(2, 2, 0)).unwrap();
        let sink = r.grid.index(Pos::new(2, 1, 0)).unwrap();
        assert_eq!(r.state.cluster[cell], 0);
        assert_eq!(r.state.cluster[sink], 0);
        // The far end of the moderated line is not 6-adjacent to the wall
        // cell, so it seeds its own (enclosed, invalid) cluster.
        assert_eq!(r.state.clusters.len(), 2);
        assert!(r.state.clusters[0].valid);
        assert!(!r.state.clusters[1].valid);
    }

    #[test]
    fn enclosed_cluster_is_invalid_until_conducted() {
        // 7³ so an active pair can sit fully inside with no casing contact.
        let mut r = Reactor::new(Dims::new(7, 7, 7), GENERIC_FUEL, Ruleset::overhaul());
        r.set_cell(Pos::new(3, 3, 2), Block::fuel_cell(NeutronSource::RaBe));
        r.set_cell(Pos::new(3, 3, 3), Block::moderator(ModeratorKind::Graphite));
        r.set_cell(Pos::new(3, 3, 4), Block::fuel_cell(NeutronSource::Unprimed));
        r.evaluate();
        assert_eq!(r.state.clusters.len(), 2);
        assert!(r.state.clusters.iter().all(|c| !c.valid));

        // A conductor run from one endpoint to the wall flips that
        // cluster; the other stays enclosed.
        for y in 0..3 {
            r.set_cell(Pos::new(3, y, 2), Block::conductor());
        }
        r.evaluate();
        assert_eq!(r.state.clusters.len(), 2);
        assert!(r.state.clusters[0].valid);
        assert!(!r.state.clusters[1].valid);
    }
}
