//! Flux propagation: primed broadcast, moderator activation, adjacency
//! filtering, reflector activation (pipeline steps 3–6).

use crate::reactor::Reactor;
use crate::tri::Tri;
use fission_core::BlockKind;
use fission_grid::{Pos, OFFSETS};
use smallvec::SmallVec;
use std::collections::VecDeque;

/// Scratch for one direction scan: moderator indices the line crossed.
type Touched = SmallVec<[u32; 8]>;

/// What a direction scan ran into.
enum LineEnd {
    /// Another fuel cell, with the crossed moderators in the scratch list.
    Cell(u32),
    /// A reflector within usable reach.
    Reflector(u32),
    /// Anything else: air, sink, conductor, casing, or an out-of-reach
    /// reflector.
    Nothing,
}

impl Reactor {
    /// Step 3: broadcast flux from every primed cell, then from every cell
    /// those broadcasts push past criticality.
    ///
    /// Seeds fire in canonical scan order; the work queue preserves
    /// first-activation order. Broadcasts merge into shared caches, so this
    /// order is part of the observable result.
    pub(crate) fn broadcast_all_flux(&mut self) {
        // A primed cell with casing line of sight is self-starting: active
        // and valid before any flux arrives. Criticality gates everyone
        // else.
        for pi in 0..self.state.primed.len() {
            let i = self.state.primed[pi] as usize;
            self.state.active[i] = Tri::Yes;
            self.state.valid[i] = Tri::Yes;
        }
        let mut queue: VecDeque<u32> = self.state.primed.iter().copied().collect();
        while let Some(i) = queue.pop_front() {
            if self.state.visited[i as usize] {
                continue;
            }
            self.state.visited[i as usize] = true;
            self.broadcast_from(i, &mut queue);
        }
    }

    fn broadcast_from(&mut self, origin: u32, queue: &mut VecDeque<u32>) {
        let crit = self.fuel().criticality;
        let p = self.grid.pos(origin as usize);

        for d in OFFSETS {
            let mut sum_flux = 0.0;
            let mut sum_eff = 0.0;
            let mut touched = Touched::new();

            match self.scan_line(p, d, &mut sum_flux, &mut sum_eff, &mut touched) {
                LineEnd::Cell(far) => {
                    // A line delivers once, to both endpoints; the guard
                    // stops the far cell's own broadcast from repeating it.
                    if !self.state.link(origin, far) {
                        continue;
                    }
                    let mods = touched.len() as f64;
                    if !touched.is_empty() {
                        self.state.pos_eff[far as usize] += sum_eff / mods;
                        self.state.pos_eff[origin as usize] += sum_eff / mods;
                    }
                    self.state.flux[far as usize] += sum_flux;
                    self.state.flux[origin as usize] += sum_flux;
                    for &m in &touched {
                        self.state.fluxed[m as usize] = true;
                    }
                    if self.state.flux[far as usize] >= crit
                        && self.state.active[far as usize] != Tri::Yes
                    {
                        self.state.active[far as usize] = Tri::Yes;
                        self.state.valid[far as usize] = Tri::Yes;
                        queue.push_back(far);
                    }
                    if self.state.flux[origin as usize] >= crit
                        && self.state.active[origin as usize] != Tri::Yes
                    {
                        self.state.active[origin as usize] = Tri::Yes;
                        self.state.valid[origin as usize] = Tri::Yes;
                    }
                }
                LineEnd::Reflector(refl) => {
                    let rb = self.grid.block(refl as usize);
                    let mods = touched.len() as f64;
                    self.state.flux[origin as usize] +=
                        2.0 * sum_flux * self.ruleset.reflector_reflectivity(rb.reflector);
                    self.state.pos_eff[origin as usize] +=
                        self.ruleset.reflector_efficiency(rb.reflector) * sum_eff / mods;
                    self.state.link(origin, refl);
                    for &m in &touched {
                        self.state.fluxed[m as usize] = true;
                    }
                    if self.state.flux[origin as usize] >= crit
                        && self.state.active[origin as usize] != Tri::Yes
                    {
                        self.state.active[origin as usize] = Tri::Yes;
                        self.state.valid[origin as usize] = Tri::Yes;
                        self.state.active[refl as usize] = Tri::Yes;
                    }
                }
                LineEnd::Nothing => {}
            }
        }
    }

    /// Walk one direction accumulating moderator flux/efficiency until a
    /// terminator. A reflector only terminates usefully with at least one
    /// moderator in between and no more than `reflector_reach`.
    fn scan_line(
        &self,
        origin: Pos,
        d: (i32, i32, i32),
        sum_flux: &mut f64,
        sum_eff: &mut f64,
        touched: &mut Touched,
    ) -> LineEnd {
        for i in 1..=(self.ruleset.neutron_reach as i32 + 1) {
            let q = origin.step(d, i);
            let b = self.grid.block_at(q);
            match b.kind {
                BlockKind::Moderator => {
                    *sum_flux += self.ruleset.moderator_flux(b.moderator);
                    *sum_eff += self.ruleset.moderator_efficiency(b.moderator);
                    touched.push(self.grid.index(q).expect("moderator is in bounds") as u32);
                }
                BlockKind::FuelCell => {
                    return LineEnd::Cell(self.grid.index(q).expect("cell is in bounds") as u32);
                }
                BlockKind::Reflector => {
                    let mods = touched.len();
                    if mods >= 1 && mods <= self.ruleset.reflector_reach {
                        return LineEnd::Reflector(
                            self.grid.index(q).expect("reflector is in bounds") as u32,
                        );
                    }
                    return LineEnd::Nothing;
                }
                _ => return LineEnd::Nothing,
            }
        }
        LineEnd::Nothing
    }

    /// Step 4: along every completed line out of an active cell, mark the
    /// crossed moderators valid (line ends active) and sandwiched, and
    /// upgrade an active-but-unvalidated far cell to valid.
    pub(crate) fn activate_moderators(&mut self) {
        for ci in 0..self.state.fuel_cells.len() {
            let i = self.state.fuel_cells[ci];
            if self.state.active[i as usize] != Tri::Yes {
                continue;
            }
            let p = self.grid.pos(i as usize);
            for d in OFFSETS {
                let mut sum_flux = 0.0;
                let mut sum_eff = 0.0;
                let mut touched = Touched::new();
                let completed = match self.scan_line(p, d, &mut sum_flux, &mut sum_eff, &mut touched)
                {
                    LineEnd::Cell(far) => {
                        if self.state.active[far as usize] == Tri::Yes {
                            if self.state.valid[far as usize] != Tri::Yes {
                                self.state.valid[far as usize] = Tri::Yes;
                            }
                            true
                        } else {
                            false
                        }
                    }
                    LineEnd::Reflector(_) => true,
                    LineEnd::Nothing => false,
                };
                if !completed {
                    continue;
                }
                for (k, &m) in touched.iter().enumerate() {
                    self.state.valid[m as usize] = Tri::Yes;
                    self.state.sandwiched[m as usize] = true;
                    // Line-end moderators sit against an endpoint.
                    if k == 0 || k == touched.len() - 1 {
                        self.state.active[m as usize] = Tri::Yes;
                    }
                }
            }
        }
    }

    /// Step 5: drop cell↔cell adjacency where either endpoint missed
    /// criticality. Reflector links survive on active cells; an inactive
    /// cell keeps no links at all.
    pub(crate) fn filter_adjacency(&mut self) {
        for ci in 0..self.state.fuel_cells.len() {
            let i = self.state.fuel_cells[ci] as usize;
            if self.state.active[i] != Tri::Yes {
                self.state.adjacency[i].clear();
                continue;
            }
            let mut kept = crate::state::AdjSet::new();
            for &n in &self.state.adjacency[i] {
                let keep = match self.grid.block(n as usize).kind {
                    BlockKind::Reflector => true,
                    _ => self.state.active[n as usize] == Tri::Yes,
                };
                if keep {
                    kept.push(n);
                }
            }
            self.state.adjacency[i] = kept;
        }
    }

    /// Step 6: a reflector is active iff, right now, some cell in its
    /// recorded adjacency set is a valid fuel cell.
    pub(crate) fn activate_reflectors(&mut self) {
        for ri in 0..self.state.reflectors.len() {
            let r = self.state.reflectors[ri] as usize;
            let lit = self.state.adjacency[r].iter().any(|&n| {
                self.grid.block(n as usize).kind == BlockKind::FuelCell
                    && self.state.valid[n as usize] == Tri::Yes
            });
            self.state.active[r] = Tri::from_bool(lit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fission_core::{Block, ModeratorKind, NeutronSource, ReflectorKind, Ruleset, GENERIC_FUEL};
    use fission_grid::Dims;

    fn line_reactor(len: i32) -> Reactor {
        Reactor::new(Dims::new(len, 1, 1), GENERIC_FUEL, Ruleset::overhaul())
    }

    #[test]
    fn moderated_pair_links_and_activates() {
        // F G F _ _ with the generic fuel (criticality 1).
        let mut r = line_reactor(5);
        r.set_cell(Pos::new(0, 0, 0), Block::fuel_cell(NeutronSource::RaBe));
        r.set_cell(Pos::new(1, 0, 0), Block::moderator(ModeratorKind::Graphite));
        r.set_cell(Pos::new(2, 0, 0), Block::fuel_cell(NeutronSource::Unprimed));
        r.evaluate();

        let a = r.grid.index(Pos::new(0, 0, 0)).unwrap();
        let b = r.grid.index(Pos::new(2, 0, 0)).unwrap();
        assert!(r.state.adjacency[a].contains(&(b as u32)));
        // The line delivers to both endpoints exactly once.
        for i in [a, b] {
            assert_eq!(r.state.flux[i], 10.0);
            assert!((r.state.pos_eff[i] - 1.10).abs() < 1e-9);
            assert_eq!(r.state.active[i], Tri::Yes);
        }
        assert!(r.state.fluxed[r.grid.index(Pos::new(1, 0, 0)).unwrap()]);
    }

    #[test]
    fn zero_moderator_line_carries_no_flux() {
        let mut r = line_reactor(3);
        r.set_cell(Pos::new(0, 0, 0), Block::fuel_cell(NeutronSource::RaBe));
        r.set_cell(Pos::new(1, 0, 0), Block::fuel_cell(NeutronSource::Unprimed));
        r.evaluate();
        let b = r.grid.index(Pos::new(1, 0, 0)).unwrap();
        // Adjacency recorded, but no flux: the far cell never activates,
        // and the filter pass drops the edge again.
        assert_eq!(r.state.flux[b], 0.0);
        assert_eq!(r.state.active[b], Tri::Unset);
        assert!(r.state.adjacency[b].is_empty());
    }

    #[test]
    fn reach_limits_the_line() {
        // F G G G G G F: five moderators exceed NEUTRON_REACH.
        let mut r = line_reactor(7);
        r.set_cell(Pos::new(0, 0, 0), Block::fuel_cell(NeutronSource::RaBe));
        for x in 1..=5 {
            r.set_cell(Pos::new(x, 0, 0), Block::moderator(ModeratorKind::Graphite));
        }
        r.set_cell(Pos::new(6, 0, 0), Block::fuel_cell(NeutronSource::Unprimed));
        r.evaluate();
        let b = r.grid.index(Pos::new(6, 0, 0)).unwrap();
        assert_eq!(r.state.flux[b], 0.0);
        assert!(r.state.adjacency[b].is_empty());
    }

    #[test]
    fn reflector_doubles_back_to_origin() {
        // F G R: one moderator then a reflector within half reach.
        let mut r = line_reactor(3);
        r.set_cell(Pos::new(0, 0, 0), Block::fuel_cell(NeutronSource::RaBe));
        r.set_cell(Pos::new(1, 0, 0), Block::moderator(ModeratorKind::Graphite));
        r.set_cell(Pos::new(2, 0, 0), Block::reflector(ReflectorKind::BerylliumCarbon));
        r.evaluate();
        let a = r.grid.index(Pos::new(0, 0, 0)).unwrap();
        // 2 · 10 · 1.0 reflected flux.
        assert_eq!(r.state.flux[a], 20.0);
        assert_eq!(r.state.active[a], Tri::Yes);
        // Reflector is adjacent to a valid cell, so step 6 keeps it active.
        let refl = r.grid.index(Pos::new(2, 0, 0)).unwrap();
        assert_eq!(r.state.active[refl], Tri::Yes);
        // Origin efficiency: 0.5 · 1.10 / 1.
        assert!((r.state.pos_eff[a] - 0.55).abs() < 1e-9);
    }

    #[test]
    fn adjacent_reflector_is_ignored() {
        // F R: no moderator in between, so the reflector returns nothing.
        let mut r = line_reactor(2);
        r.set_cell(Pos::new(0, 0, 0), Block::fuel_cell(NeutronSource::RaBe));
        r.set_cell(Pos::new(1, 0, 0), Block::reflector(ReflectorKind::BerylliumCarbon));
        r.evaluate();
        let a = r.grid.index(Pos::new(0, 0, 0)).unwrap();
        let refl = r.grid.index(Pos::new(1, 0, 0)).unwrap();
        assert_eq!(r.state.flux[a], 0.0);
        assert!(r.state.adjacency[a].is_empty());
        assert_eq!(r.state.active[refl], Tri::No);
    }

    #[test]
    fn unprimed_cells_do_not_seed() {
        let mut r = line_reactor(3);
        r.set_cell(Pos::new(0, 0, 0), Block::fuel_cell(NeutronSource::Unprimed));
        r.set_cell(Pos::new(1, 0, 0), Block::moderator(ModeratorKind::Graphite));
        r.set_cell(Pos::new(2, 0, 0), Block::fuel_cell(NeutronSource::Unprimed));
        r.evaluate();
        let b = r.grid.index(Pos::new(2, 0, 0)).unwrap();
        assert_eq!(r.state.flux[b], 0.0);
        assert_eq!(r.state.active[b], Tri::Unset);
    }

    #[test]
    fn activation_cascades_through_the_queue() {
        // F G F G F: the middle activation must rebroadcast to the right.
        let mut r = line_reactor(5);
        r.set_cell(Pos::new(0, 0, 0), Block::fuel_cell(NeutronSource::RaBe));
        r.set_cell(Pos::new(1, 0, 0), Block::moderator(ModeratorKind::Graphite));
        r.set_cell(Pos::new(2, 0, 0), Block::fuel_cell(NeutronSource::Unprimed));
        r.set_cell(Pos::new(3, 0, 0), Block::moderator(ModeratorKind::Graphite));
        r.set_cell(Pos::new(4, 0, 0), Block::fuel_cell(NeutronSource::Unprimed));
        r.evaluate();
        let far = r.grid.index(Pos::new(4, 0, 0)).unwrap();
        assert_eq!(r.state.active[far], Tri::Yes);
    }

    #[test]
    fn sandwiched_moderators_are_marked_by_step_four() {
        let mut r = line_reactor(5);
        r.set_cell(Pos::new(0, 0, 0), Block::fuel_cell(NeutronSource::RaBe));
        r.set_cell(Pos::new(1, 0, 0), Block::moderator(ModeratorKind::Graphite));
        r.set_cell(Pos::new(2, 0, 0), Block::fuel_cell(NeutronSource::Unprimed));
        r.evaluate();
        let m = r.grid.index(Pos::new(1, 0, 0)).unwrap();
        assert!(r.state.sandwiched[m]);
        assert_eq!(r.state.valid[m], Tri::Yes);
        assert_eq!(r.state.active[m], Tri::Yes);
    }
}
