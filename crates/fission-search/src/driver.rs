//! The search driver: candidate generation, scoring, sampling, and the
//! best-so-far bookkeeping.

use crate::config::{ConfigError, SearchConfig};
use crate::objective;
use crate::pool::ScoringPool;
use crate::tabu::TabuMemory;
use crate::vocab::vocabulary;
use fission_core::{Block, Ruleset};
use fission_grid::{Axis, Grid, Pos};
use fission_sim::{Reactor, SuggestMode, Summary};
use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One step's progress snapshot, handed to the caller's callback.
#[derive(Clone, Copy, Debug)]
pub struct StepReport {
    /// Step index.
    pub step: u32,
    /// Objective value of the freshly sampled grid.
    pub objective: f64,
    /// Metrics of the best grid so far under the keep metric.
    pub best: Summary,
}

/// One edit plan: positions to write (mirrors already expanded) and the
/// suggestion-weight multiplier for the candidate's score.
struct Plan {
    edits: Vec<(Pos, Block)>,
    weight: f64,
}

/// A running search. Owns the current walk position, the remembered
/// best, tabu memory, the RNG, and the scoring pool.
pub struct Search {
    config: SearchConfig,
    rng: ChaCha8Rng,
    current: Reactor,
    best: Reactor,
    tabu: TabuMemory,
    pool: ScoringPool,
    stop: Arc<AtomicBool>,
}

impl Search {
    /// Start from an empty box.
    pub fn new(config: SearchConfig) -> Result<Search, ConfigError> {
        let start = Grid::new(config.dims);
        Search::from_grid(config, start)
    }

    /// Start from an existing layout (e.g. a loaded save file).
    pub fn from_grid(config: SearchConfig, start: Grid) -> Result<Search, ConfigError> {
        config.validate()?;
        let current = Reactor::from_grid(start, config.fuel, Ruleset::overhaul());
        let workers = config.resolved_worker_count();
        log::info!(
            "search over {} for {}: {} iterations, {} workers, seed {:#x}",
            config.dims,
            current.fuel().name,
            config.iterations,
            workers,
            config.seed
        );
        Ok(Search {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            best: current.clone(),
            tabu: TabuMemory::new(config.tabu_capacity),
            pool: ScoringPool::new(workers),
            stop: Arc::new(AtomicBool::new(false)),
            current,
            config,
        })
    }

    /// The cooperative stop flag; set it (e.g. from a SIGINT handler) and
    /// the run breaks at the end of the current iteration.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Run to the iteration budget (or the stop flag), returning the best
    /// grid under the keep metric.
    pub fn run(&mut self, mut on_step: impl FnMut(&StepReport)) -> Reactor {
        for i in 0..self.config.iterations {
            if self.stop.load(Ordering::Relaxed) {
                log::info!("stop requested at step {i}");
                break;
            }
            let report = self.step(i);
            on_step(&report);
        }
        self.best.clone()
    }

    /// Metrics of the remembered best.
    pub fn best_summary(&mut self) -> Summary {
        self.best.summary()
    }

    fn step(&mut self, i: u32) -> StepReport {
        let switch = self.config.switch_threshold();
        let stage2 = i >= switch;
        if i == switch {
            log::debug!("step {i}: switching to the stage-2 objective");
        }

        let plans = self.build_plans(i, stage2);
        let objective = if plans.is_empty() {
            // Nothing to propose: re-seed the walk from the best.
            self.current = self.best.clone();
            objective_of(stage2, &self.current.summary())
        } else {
            self.sample_step(i, stage2, plans)
        };

        self.periodic_maintenance(i, stage2);

        StepReport {
            step: i,
            objective,
            best: self.best.summary(),
        }
    }

    /// Draw all candidate edit plans for this step from the RNG stream.
    fn build_plans(&mut self, i: u32, stage2: bool) -> Vec<Plan> {
        let mut plans = Vec::new();

        if stage2 {
            let actions = self.principled_actions();
            if !actions.is_empty() {
                for _ in 0..self.config.principled_candidates {
                    let edits_drawn = self.rng.gen_range(1..=2);
                    let mut plan = Plan {
                        edits: Vec::new(),
                        weight: 0.0,
                    };
                    for _ in 0..edits_drawn {
                        let (p, block, w) = actions[self.rng.gen_range(0..actions.len())];
                        for q in self.mirror_positions(p, i) {
                            plan.edits.push((q, block));
                        }
                        plan.weight += w;
                    }
                    plans.push(plan);
                }
            }
        }

        let vocab = vocabulary(stage2);
        let template_dist =
            WeightedIndex::new(vocab.iter().map(|(_, w)| *w)).expect("vocabulary weights positive");
        let dims = self.config.dims;
        for _ in 0..self.config.random_candidates {
            let edits_drawn = self.rng.gen_range(1..=4);
            let mut plan = Plan {
                edits: Vec::new(),
                weight: 1.0,
            };
            for _ in 0..edits_drawn {
                let p = Pos::new(
                    self.rng.gen_range(0..dims.x),
                    self.rng.gen_range(0..dims.y),
                    self.rng.gen_range(0..dims.z),
                );
                let block = vocab[template_dist.sample(&mut self.rng)].0;
                for q in self.mirror_positions(p, i) {
                    plan.edits.push((q, block));
                }
            }
            plans.push(plan);
        }

        plans
    }

    /// Construct, score in parallel, tabu-filter, and sample one plan.
    /// Returns the objective of the sampled grid.
    fn sample_step(&mut self, i: u32, stage2: bool, plans: Vec<Plan>) -> f64 {
        let mut weights = Vec::with_capacity(plans.len());
        let mut candidates = Vec::with_capacity(plans.len());
        for plan in plans {
            let mut c = self.current.clone();
            for (p, b) in plan.edits {
                c.set_cell(p, b);
            }
            candidates.push(c);
            weights.push(plan.weight);
        }

        let scored = self.pool.evaluate(candidates);

        let exponent = 1.0 + f64::from(i % 10_000) / 5000.0;
        let mut admitted = Vec::new();
        for (k, (reactor, summary)) in scored.into_iter().enumerate() {
            // The first candidate is admitted regardless of tabu so the
            // distribution is never empty.
            if k > 0 && self.tabu.contains(reactor.grid().fingerprint()) {
                continue;
            }
            let obj = objective_of(stage2, &summary);
            let score = obj.powf(exponent).max(0.01) * weights[k];
            admitted.push((reactor, score, obj));
        }

        let dist = WeightedIndex::new(admitted.iter().map(|(_, score, _)| *score))
            .expect("at least one admitted candidate with positive score");
        let chosen = dist.sample(&mut self.rng);
        let (reactor, _, obj) = admitted.swap_remove(chosen);
        self.current = reactor;
        self.tabu.insert(self.current.grid().fingerprint());

        let kind = self.config.objective;
        let current_keep = objective::keep(kind, &self.current.summary());
        let best_keep = objective::keep(kind, &self.best.summary());
        if current_keep > best_keep {
            self.best = self.current.clone();
            log::debug!(
                "step {i}: new best, keep {:.3}, effective power {:.2}",
                current_keep,
                self.best.summary().effective_power
            );
        }
        obj
    }

    fn periodic_maintenance(&mut self, i: u32, stage2: bool) {
        let reseed_period = if stage2 {
            self.config.reseed_after_switch
        } else {
            self.config.reseed_before_switch
        };
        if i > 0 && i % reseed_period.max(1) == 0 {
            self.current = self.best.clone();
            self.current.prune_inactives(false);
            self.current.flood_fill_with_conductors();
        }

        let purge = self.config.infeasible_purge_period.max(1);
        if i > 0 && i % purge == 0 && self.best.effective_power() == 0.0 {
            self.current.clear_infeasible_clusters();
            self.current.prune_inactives(false);
            self.current.flood_fill_with_conductors();
        }
    }

    /// Flatten the oracle's proposals into a draw table.
    fn principled_actions(&mut self) -> Vec<(Pos, Block, f64)> {
        let mut actions = Vec::new();
        for p in self.current.suggest_principled_locations() {
            for mode in [SuggestMode::ComputeCooling, SuggestMode::OptimizeModerators] {
                for (block, weight) in self.current.suggested_blocks_at(p, mode) {
                    actions.push((p, block, weight));
                }
            }
        }
        actions
    }

    /// The write set for one edit: the position itself plus its mirror
    /// images while the per-axis mirror thresholds are still open.
    fn mirror_positions(&self, p: Pos, i: u32) -> Vec<Pos> {
        let mut out = vec![p];
        if !self.config.dims.mirrorable() {
            return out;
        }
        let grid = self.current.grid();
        let mut extend = |out: &mut Vec<Pos>, axis: Axis| {
            for k in 0..out.len() {
                let m = grid.mirrored(out[k], axis);
                if !out.contains(&m) {
                    out.push(m);
                }
            }
        };
        if i < self.config.mirror_x_until {
            extend(&mut out, Axis::X);
        }
        if i < self.config.mirror_z_until {
            extend(&mut out, Axis::Z);
        }
        if i < self.config.mirror_y_until {
            extend(&mut out, Axis::Y);
        }
        out
    }
}

fn objective_of(stage2: bool, summary: &Summary) -> f64 {
    if stage2 {
        objective::stage2(summary)
    } else {
        objective::stage1(summary)
    }
}
