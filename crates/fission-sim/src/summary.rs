//! Public result types: per-cluster stats and the global metric snapshot.

use fission_core::FuelId;
use fission_grid::Dims;

/// Aggregates for one cluster (a connected component of valid fuel cells
/// and active heat sinks).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClusterStats {
    /// Heat produced per tick by the cluster's cells.
    pub heating: f64,
    /// Heat removed per tick by the cluster's active sinks.
    pub cooling: f64,
    /// Power produced by the cluster's cells. A cluster at or under its
    /// cooling budget delivers this in full; the duty cycle is the only
    /// throttle, and it fires on heat deficits alone.
    pub output: f64,
    /// Number of fuel cells.
    pub cell_count: u32,
    /// Sum of per-cell efficiencies.
    pub sum_efficiency: f64,
    /// Sum of per-cell heat multipliers (adjacency counts).
    pub sum_heat_multiplier: f64,
    /// True when the cluster touches the casing or an active conductor.
    pub valid: bool,
}

/// One evaluation's global metrics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    /// Interior dimensions of the evaluated grid.
    pub dims: Dims,
    /// Fuel the evaluation ran for.
    pub fuel: FuelId,
    /// Number of fuel cells on the grid.
    pub total_cells: u32,
    /// Σ output over valid clusters, unthrottled.
    pub power: f64,
    /// 1 when every cluster is within its cooling budget; the worst
    /// (cooling + leniency)/heating ratio otherwise; 0 when an invalid
    /// cluster heats. The sole throttle on power.
    pub duty_cycle: f64,
    /// `power · duty_cycle`, the headline number.
    pub effective_power: f64,
    /// Σ cluster heating.
    pub total_heating: f64,
    /// Σ cluster cooling.
    pub total_cooling: f64,
    /// `total_heating − total_cooling`.
    pub heat_balance: f64,
    /// Mean per-cell efficiency over all fuel cells.
    pub avg_efficiency: f64,
    /// Blocks that are placed but contribute nothing.
    pub inactive_blocks: u32,
    /// Air + conductors + inactive blocks.
    pub empty_blocks: u32,
    /// Fuel cells with all six neighbors solid.
    pub trapped_cells: u32,
    /// Moderators crossed by at least one delivered flux line.
    pub fluxed_moderators: u32,
    /// Moderators on a completed line between two active endpoints.
    pub sandwiched_moderators: u32,
    /// Moderators on the grid.
    pub moderator_count: u32,
    /// Clusters touching the casing or an active conductor.
    pub valid_clusters: u32,
    /// Total clusters.
    pub cluster_count: u32,
    /// True when some active cell carries no neutron source.
    pub self_sustaining: bool,
}

impl Summary {
    /// The all-zero summary of an empty grid.
    pub(crate) fn empty(dims: Dims, fuel: FuelId) -> Summary {
        Summary {
            dims,
            fuel,
            total_cells: 0,
            power: 0.0,
            duty_cycle: 1.0,
            effective_power: 0.0,
            total_heating: 0.0,
            total_cooling: 0.0,
            heat_balance: 0.0,
            avg_efficiency: 0.0,
            inactive_blocks: 0,
            empty_blocks: 0,
            trapped_cells: 0,
            fluxed_moderators: 0,
            sandwiched_moderators: 0,
            moderator_count: 0,
            valid_clusters: 0,
            cluster_count: 0,
            self_sustaining: false,
        }
    }

    /// Effective power per fuel cell (0 for an empty grid).
    pub fn power_per_cell(&self) -> f64 {
        self.effective_power / (self.total_cells.max(1) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fission_core::GENERIC_FUEL;

    #[test]
    fn power_per_cell_guards_the_empty_grid() {
        let mut s = Summary::empty(Dims::new(3, 3, 3), GENERIC_FUEL);
        assert_eq!(s.power_per_cell(), 0.0);
        s.total_cells = 4;
        s.effective_power = 100.0;
        assert_eq!(s.power_per_cell(), 25.0);
    }
}
