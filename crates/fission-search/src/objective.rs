//! Staged objectives and the keep metric.
//!
//! Stage 1 rewards structure that could become a reactor (cells,
//! sandwiched moderators, a sane heat balance) and punishes trapped
//! cells; stage 2 chases cooled, conducted effective power. The keep
//! metric is deliberately different from the step objective so the
//! remembered best is not just the last lucky sample.

use fission_sim::Summary;

/// Which flavor of the keep metric decides the remembered best.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ObjectiveKind {
    /// Effective power, with mild bonuses for cells and cooling.
    #[default]
    Output,
    /// Power per cell.
    Efficiency,
    /// Cell count, gated on the heat balance staying sane.
    Cells,
}

impl ObjectiveKind {
    /// Parse a CLI selector: 0 = output, 1 = efficiency, 2 = cells.
    pub fn from_selector(v: u32) -> Option<ObjectiveKind> {
        match v {
            0 => Some(ObjectiveKind::Output),
            1 => Some(ObjectiveKind::Efficiency),
            2 => Some(ObjectiveKind::Cells),
            _ => None,
        }
    }
}

const AVG_EFF_STAGE1: f64 = 2.0;
const SANDWICH_BONUS: f64 = 1.5;
const MODERATOR_BONUS: f64 = 0.5;
const TRAPPED_PENALTY: f64 = 4.0;
const HEAT_BALANCE_SCALE: f64 = 1000.0;
const AVG_EFF_STAGE2: f64 = 10.0;
const KEEP_CELL_BONUS: f64 = 0.5;
const KEEP_COOLING_SCALE: f64 = 100.0;
const KEEP_AVG_EFF: f64 = 5.0;

/// Stage-1 objective: structural promise.
pub(crate) fn stage1(s: &Summary) -> f64 {
    let structure = f64::from(s.total_cells)
        + s.avg_efficiency * AVG_EFF_STAGE1
        + f64::from(s.sandwiched_moderators) * SANDWICH_BONUS
        + f64::from(s.moderator_count) * MODERATOR_BONUS;
    let balance = 0.8f64.powf((s.heat_balance / HEAT_BALANCE_SCALE - f64::from(s.empty_blocks)).abs());
    let trapped = f64::from(s.trapped_cells);
    1.0 + structure * balance / (0.1 + trapped * trapped * TRAPPED_PENALTY)
}

/// Stage-2 objective: cooled, conducted power.
pub(crate) fn stage2(s: &Summary) -> f64 {
    1.0 + s.effective_power * 100.0 * s.duty_cycle.powi(3)
        + s.avg_efficiency * AVG_EFF_STAGE2
        + s.total_cooling
}

/// The keep metric: decides whether a sampled grid replaces the best.
/// Public so reports can print the score the winner was chosen by.
pub fn keep(kind: ObjectiveKind, s: &Summary) -> f64 {
    let powered = s.effective_power * 100.0 * s.duty_cycle.powi(4);
    match kind {
        ObjectiveKind::Output => {
            1.0 + powered
                + f64::from(s.total_cells) * KEEP_CELL_BONUS
                + s.total_cooling / KEEP_COOLING_SCALE
                + s.avg_efficiency * KEEP_AVG_EFF
        }
        ObjectiveKind::Efficiency => {
            1.0 + powered / f64::from(s.total_cells.max(1))
                + s.avg_efficiency * KEEP_AVG_EFF
                + s.total_cooling / KEEP_COOLING_SCALE
        }
        ObjectiveKind::Cells => {
            let balance = if s.heat_balance > 0.0 { s.duty_cycle } else { 1.0 };
            1.0 + f64::from(s.total_cells) * balance * KEEP_COOLING_SCALE + powered
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fission_core::default_fuel;
    use fission_grid::Dims;

    fn blank() -> Summary {
        let mut r = fission_sim::Reactor::new(
            Dims::new(3, 3, 3),
            default_fuel(),
            fission_sim::Ruleset::overhaul(),
        );
        r.summary()
    }

    #[test]
    fn objectives_are_positive_on_the_empty_grid() {
        let s = blank();
        assert!(stage1(&s) > 0.0);
        assert!(stage2(&s) > 0.0);
        for kind in [ObjectiveKind::Output, ObjectiveKind::Efficiency, ObjectiveKind::Cells] {
            assert!(keep(kind, &s) > 0.0);
        }
    }

    #[test]
    fn trapped_cells_crater_stage_one() {
        let mut s = blank();
        s.total_cells = 8;
        let open = stage1(&s) - 1.0;
        s.trapped_cells = 3;
        let trapped = stage1(&s) - 1.0;
        assert!(trapped < open / 10.0, "{trapped} vs {open}");
    }

    #[test]
    fn stage_two_rewards_effective_power() {
        let mut s = blank();
        let idle = stage2(&s);
        s.effective_power = 100.0;
        s.duty_cycle = 1.0;
        assert!(stage2(&s) > idle + 9_000.0);
    }

    #[test]
    fn selector_parses_like_the_cli() {
        assert_eq!(ObjectiveKind::from_selector(0), Some(ObjectiveKind::Output));
        assert_eq!(ObjectiveKind::from_selector(2), Some(ObjectiveKind::Cells));
        assert_eq!(ObjectiveKind::from_selector(7), None);
    }
}
