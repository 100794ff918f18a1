//! Per-evaluation caches, keyed by flat cell index.

use crate::summary::ClusterStats;
use crate::tri::Tri;
use smallvec::SmallVec;

/// A flux-line adjacency set. At most one line per direction.
pub(crate) type AdjSet = SmallVec<[u32; 6]>;

/// Cluster/group id meaning "unassigned".
pub(crate) const UNASSIGNED: i32 = -1;

/// Every derived cache of one evaluation pass. Fully cleared by
/// [`EvalState::reset`] at the start of the pass.
#[derive(Clone, Debug, Default)]
pub(crate) struct EvalState {
    /// Active flag per cell (tri-state; also the sink activation memo).
    pub active: Vec<Tri>,
    /// Valid flag per cell.
    pub valid: Vec<Tri>,
    /// Broadcast guard: a cell broadcasts at most once per pass.
    pub visited: Vec<bool>,
    /// Positional efficiency accumulator per cell.
    pub pos_eff: Vec<f64>,
    /// Moderator-flux accumulator per cell.
    pub flux: Vec<f64>,
    /// Flux-line adjacency per cell (cells and reflectors).
    pub adjacency: Vec<AdjSet>,
    /// Cluster id per cell, [`UNASSIGNED`] when none.
    pub cluster: Vec<i32>,
    /// Conductor group id per cell, [`UNASSIGNED`] when none.
    pub group: Vec<i32>,
    /// Per-group validity (some member touches casing).
    pub group_valid: Vec<bool>,
    /// Moderator crossed by a delivered flux line.
    pub fluxed: Vec<bool>,
    /// Moderator on a completed line between two active endpoints.
    pub sandwiched: Vec<bool>,
    /// Per-kind position caches, in canonical scan order.
    pub fuel_cells: Vec<u32>,
    /// Moderator positions.
    pub moderators: Vec<u32>,
    /// Reflector positions.
    pub reflectors: Vec<u32>,
    /// Heat-sink positions.
    pub coolers: Vec<u32>,
    /// Conductor positions.
    pub conductors: Vec<u32>,
    /// Primed fuel cells with line of sight to the casing.
    pub primed: Vec<u32>,
    /// Per-cluster aggregates, indexed by cluster id.
    pub clusters: Vec<ClusterStats>,
}

impl EvalState {
    /// Clear everything and resize the per-cell caches for `n` cells.
    pub(crate) fn reset(&mut self, n: usize) {
        self.active.clear();
        self.active.resize(n, Tri::Unset);
        self.valid.clear();
        self.valid.resize(n, Tri::Unset);
        self.visited.clear();
        self.visited.resize(n, false);
        self.pos_eff.clear();
        self.pos_eff.resize(n, 0.0);
        self.flux.clear();
        self.flux.resize(n, 0.0);
        self.adjacency.clear();
        self.adjacency.resize(n, AdjSet::new());
        self.cluster.clear();
        self.cluster.resize(n, UNASSIGNED);
        self.group.clear();
        self.group.resize(n, UNASSIGNED);
        self.group_valid.clear();
        self.fluxed.clear();
        self.fluxed.resize(n, false);
        self.sandwiched.clear();
        self.sandwiched.resize(n, false);
        self.fuel_cells.clear();
        self.moderators.clear();
        self.reflectors.clear();
        self.coolers.clear();
        self.conductors.clear();
        self.primed.clear();
        self.clusters.clear();
    }

    /// Record a bidirectional flux adjacency. Returns false when the edge
    /// already exists.
    pub(crate) fn link(&mut self, a: u32, b: u32) -> bool {
        if self.adjacency[a as usize].contains(&b) {
            return false;
        }
        self.adjacency[a as usize].push(b);
        self.adjacency[b as usize].push(a);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_clears_and_sizes() {
        let mut s = EvalState::default();
        s.reset(8);
        s.active[3] = Tri::Yes;
        s.link(1, 2);
        s.fuel_cells.push(3);
        s.reset(8);
        assert_eq!(s.active[3], Tri::Unset);
        assert!(s.adjacency[1].is_empty());
        assert!(s.fuel_cells.is_empty());
    }

    #[test]
    fn link_is_bidirectional_and_deduplicated() {
        let mut s = EvalState::default();
        s.reset(4);
        assert!(s.link(0, 3));
        assert!(!s.link(0, 3));
        assert_eq!(s.adjacency[0].as_slice(), &[3]);
        assert_eq!(s.adjacency[3].as_slice(), &[0]);
    }
}
