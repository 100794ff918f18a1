//! Search configuration, validation, and worker-count resolution.

use crate::objective::ObjectiveKind;
use fission_core::{fuel, FuelId};
use fission_grid::Dims;
use std::error::Error;
use std::fmt;

/// Environment variable overriding the scoring worker count.
pub(crate) const WORKER_ENV: &str = "FISSION_NUM_THREADS";

/// Tunables for one search run.
///
/// Construct with [`SearchConfig::new`], adjust fields, then hand to
/// [`Search::new`](crate::Search::new), which validates.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Interior dimensions of the box being optimized.
    pub dims: Dims,
    /// Fuel to optimize for.
    pub fuel: FuelId,
    /// Iteration budget. Default: 20 000.
    pub iterations: u32,
    /// Principled candidates per step once past the switch threshold.
    /// Default: 300.
    pub principled_candidates: u32,
    /// Random vocabulary candidates per step. Default: 100.
    pub random_candidates: u32,
    /// Tabu memory capacity. Default: 10 000.
    pub tabu_capacity: usize,
    /// Mirror moves in x below this step (large-enough grids only).
    /// Default: 1000.
    pub mirror_x_until: u32,
    /// Mirror moves in z below this step. Default: 500.
    pub mirror_z_until: u32,
    /// Mirror moves in y below this step. Default: 200.
    pub mirror_y_until: u32,
    /// Reset-to-best period after the objective switch. Default: 50.
    pub reseed_after_switch: u32,
    /// Reset-to-best period before the objective switch. Default: 200.
    pub reseed_before_switch: u32,
    /// Period of the infeasible-cluster purge while no effective power
    /// has been found. Default: 4000.
    pub infeasible_purge_period: u32,
    /// Which keep metric decides the remembered best.
    pub objective: ObjectiveKind,
    /// RNG seed. Runs with equal seeds and configs are identical.
    pub seed: u64,
    /// Scoring worker count. `None` = auto: half the available cores,
    /// overridable via `FISSION_NUM_THREADS`.
    pub workers: Option<usize>,
}

impl SearchConfig {
    /// Defaults for a box and fuel.
    pub fn new(dims: Dims, fuel: FuelId) -> SearchConfig {
        SearchConfig {
            dims,
            fuel,
            iterations: 20_000,
            principled_candidates: 300,
            random_candidates: 100,
            tabu_capacity: 10_000,
            mirror_x_until: 1000,
            mirror_z_until: 500,
            mirror_y_until: 200,
            reseed_after_switch: 50,
            reseed_before_switch: 200,
            infeasible_purge_period: 4000,
            objective: ObjectiveKind::Output,
            seed: 0x5eed,
            workers: None,
        }
    }

    /// Step at which the sampler switches from the structural stage-1
    /// objective to the power-chasing stage-2 objective:
    /// `min(1000, 20·(X+Y+Z))`.
    pub fn switch_threshold(&self) -> u32 {
        let spread = 20 * (self.dims.x + self.dims.y + self.dims.z) as u32;
        spread.min(1000)
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if fuel(self.fuel).is_none() {
            return Err(ConfigError::FuelOutOfRange { index: self.fuel.0 });
        }
        if self.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.principled_candidates + self.random_candidates == 0 {
            return Err(ConfigError::NoCandidates);
        }
        Ok(())
    }

    /// Resolve the scoring worker count: explicit value, else the
    /// `FISSION_NUM_THREADS` environment override, else half the
    /// available cores. Clamped to `[1, 64]`.
    pub fn resolved_worker_count(&self) -> usize {
        if let Some(n) = self.workers {
            return n.clamp(1, 64);
        }
        if let Some(n) = std::env::var(WORKER_ENV)
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
        {
            return n.clamp(1, 64);
        }
        let cpus = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        (cpus / 2).clamp(1, 64)
    }
}

/// Errors detected by [`SearchConfig::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The fuel index points outside the fuel table.
    FuelOutOfRange {
        /// The rejected index.
        index: u32,
    },
    /// An iteration budget of zero would never sample anything.
    ZeroIterations,
    /// Both candidate counts are zero.
    NoCandidates,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FuelOutOfRange { index } => write!(f, "fuel index {index} is out of range"),
            Self::ZeroIterations => write!(f, "iteration budget is zero"),
            Self::NoCandidates => write!(f, "both candidate counts are zero"),
        }
    }
}

impl Error for ConfigError {}
