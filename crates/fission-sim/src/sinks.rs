//! Heat-sink activation: memoized evaluation of placement rules.
//!
//! Rules may depend on other sinks being active (quartz → redstone,
//! aluminum → quartz + tin, …). The dependency graph over variants is
//! acyclic, so recursive evaluation through the tri-state memo terminates;
//! a cell re-probed while its own rule is being evaluated reads as
//! inactive.

use crate::reactor::Reactor;
use crate::tri::Tri;
use fission_core::{BlockKind, CoolerKind, Need, SinkRule};
use fission_grid::{Pos, AXES};

impl Reactor {
    /// Whether the sink at flat index `i` is active, computing and caching
    /// the answer on first probe.
    pub(crate) fn cooler_active(&mut self, i: u32) -> bool {
        match self.state.active[i as usize] {
            Tri::Yes => true,
            Tri::No => false,
            Tri::Unset => {
                // Probe guard; overwritten with the real answer below.
                self.state.active[i as usize] = Tri::No;
                let kind = self.grid.block(i as usize).cooler;
                let p = self.grid.pos(i as usize);
                let holds = self.sink_would_activate(p, kind);
                self.state.active[i as usize] = Tri::from_bool(holds);
                if holds {
                    self.state.valid[i as usize] = Tri::Yes;
                }
                holds
            }
        }
    }

    /// Whether a sink of `kind` placed at `p` would satisfy its rule
    /// against the current cached flags. Ignores what `p` holds now.
    pub(crate) fn sink_would_activate(&mut self, p: Pos, kind: CoolerKind) -> bool {
        match self.ruleset.sink_rule(kind) {
            Some(rule) => self.rule_holds(rule, p),
            None => false,
        }
    }

    fn rule_holds(&mut self, rule: &SinkRule, p: Pos) -> bool {
        match *rule {
            SinkRule::AtLeast(n, need) => self.count_need(p, need) >= n,
            SinkRule::Exactly(n, need) => self.count_need(p, need) == n,
            SinkRule::AxialPair(need) => AXES
                .iter()
                .any(|ax| ax.neighbors_of(p).iter().all(|&n| self.need_at(n, need))),
            SinkRule::All(rules) => rules.iter().all(|r| self.rule_holds(r, p)),
        }
    }

    fn count_need(&mut self, p: Pos, need: Need) -> u8 {
        let mut count = 0;
        for n in p.neighbors() {
            if self.need_at(n, need) {
                count += 1;
            }
        }
        count
    }

    fn need_at(&mut self, n: Pos, need: Need) -> bool {
        let b = self.grid.block_at(n);
        match need {
            Need::Cell => {
                b.kind == BlockKind::FuelCell && self.flag_at(n, |s, i| s.active[i].is_yes())
            }
            Need::Moderator => {
                b.kind == BlockKind::Moderator && self.flag_at(n, |s, i| s.valid[i].is_yes())
            }
            Need::Casing => b.kind == BlockKind::Casing,
            Need::Sink(kind) => {
                if b.kind != BlockKind::Cooler || b.cooler != kind {
                    return false;
                }
                let i = self.grid.index(n).expect("sink neighbor is in bounds") as u32;
                self.cooler_active(i)
            }
            Need::Reflector => {
                b.kind == BlockKind::Reflector && self.flag_at(n, |s, i| s.active[i].is_yes())
            }
        }
    }

    fn flag_at(&self, n: Pos, read: impl Fn(&crate::state::EvalState, usize) -> bool) -> bool {
        match self.grid.index(n) {
            Some(i) => read(&self.state, i),
            None => false,
        }
    }
}
