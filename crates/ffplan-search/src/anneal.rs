//! Simulated annealing over action traces.
//!
//! The walk keeps its whole trajectory in the arena: slot `i` holds the
//! state after `i` actions, so the tip is slot `actions_taken` and the
//! arena always holds exactly `actions_taken + 1` records. A move either
//! extends the trace by one applicable action or jumps back `k` steps
//! along it, which is a single `pop_n(k)` on the arena.
//!
//! Moves are scored by `actions_taken + h` and accepted by the Metropolis
//! rule: never worse is always accepted, worse by `d` with probability
//! `exp(-d / T)`.

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use ffplan_arena::ArenaConfig;
use ffplan_core::{ActionId, RelaxedDomain, StateId};

use crate::config::AnnealConfig;
use crate::context::SearchContext;
use crate::error::SearchError;
use crate::gbfs::outcome_label;
use crate::outcome::{AnnealStats, Plan, SearchOutcome};

enum Move {
    Forward(ActionId),
    Back(usize),
}

/// Stochastic local search driver.
///
/// Runs are reproducible: the RNG is reseeded from
/// [`AnnealConfig::seed`] at the start of every [`run`](Self::run).
pub struct SimulatedAnnealing<'d, D: RelaxedDomain + ?Sized> {
    ctx: SearchContext<'d, D>,
    config: AnnealConfig,
    rng: ChaCha8Rng,
    trace: Vec<ActionId>,
    applicable: Vec<ActionId>,
    stats: AnnealStats,
}

impl<'d, D: RelaxedDomain + ?Sized> SimulatedAnnealing<'d, D> {
    /// Validate `config` and allocate the arena.
    pub fn new(
        domain: &'d D,
        arena: &ArenaConfig,
        config: AnnealConfig,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            ctx: SearchContext::new(domain, arena)?,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            trace: Vec::new(),
            applicable: Vec::new(),
            stats: AnnealStats::default(),
        })
    }

    /// Walk from the initial state until the goal is reached or the
    /// temperature hits the floor.
    ///
    /// Fails if the arena fills up or the trace reaches
    /// [`AnnealConfig::max_trace_len`].
    pub fn run(&mut self) -> Result<SearchOutcome, SearchError> {
        self.ctx.reset();
        self.trace.clear();
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.stats = AnnealStats::default();

        let start = Instant::now();
        let created_before = self.ctx.arena().allocations();
        let evaluated_before = self.ctx.heuristic().evaluations();

        let result = self.anneal();

        self.stats.elapsed = start.elapsed();
        self.stats.states_created = self.ctx.arena().allocations() - created_before;
        self.stats.evaluated = self.ctx.heuristic().evaluations() - evaluated_before;
        let outcome = result?;
        info!(
            outcome = outcome_label(&outcome),
            plan_len = outcome.plan().map(Plan::len),
            iterations = self.stats.iterations,
            accepted = self.stats.accepted,
            rejected = self.stats.rejected,
            backtracks = self.stats.backtracks,
            best_objective = self.stats.best_objective,
            temperature = self.stats.final_temperature,
            elapsed_ms = self.stats.elapsed.as_millis() as u64,
            "annealing finished"
        );
        Ok(outcome)
    }

    fn anneal(&mut self) -> Result<SearchOutcome, SearchError> {
        let root = self.ctx.push_root()?;
        let mut temperature = self.config.initial_temperature;
        self.stats.final_temperature = temperature;
        if self.ctx.is_goal(root) {
            return Ok(SearchOutcome::Solved(Plan::default()));
        }
        let mut current = self.ctx.arena().heuristic(root);
        self.stats.best_objective = current;

        while temperature > self.config.temperature_floor {
            self.stats.iterations += 1;
            let taken = self.trace.len();
            let tip = StateId(taken as u32);
            let domain = self.ctx.domain();
            domain.applicable_actions(self.ctx.arena().bits(tip), &mut self.applicable);

            let choices = self.applicable.len() + usize::from(taken >= 1);
            if choices == 0 {
                debug!(iteration = self.stats.iterations, "no move available");
                return Ok(SearchOutcome::NoSolution);
            }
            let pick = self.rng.gen_range(0..choices);
            let mv = match self.applicable.get(pick) {
                Some(&action) => Move::Forward(action),
                None => Move::Back(self.rng.gen_range(1..=taken)),
            };

            match mv {
                Move::Forward(action) => {
                    if taken >= self.config.max_trace_len {
                        return Err(SearchError::TraceOverflow {
                            max_trace_len: self.config.max_trace_len,
                        });
                    }
                    let candidate = self.ctx.derive(tip, action)?;
                    if self.ctx.is_goal(candidate) {
                        self.trace.push(action);
                        return Ok(self.solved(temperature));
                    }
                    let score = objective(taken + 1, self.ctx.evaluate(candidate));
                    if self.accept(current, score, temperature) {
                        self.trace.push(action);
                        current = score;
                        self.stats.accepted += 1;
                    } else {
                        self.ctx.arena_mut().pop_one();
                        self.stats.rejected += 1;
                    }
                }
                Move::Back(k) => {
                    let kept = taken - k;
                    let candidate = StateId(kept as u32);
                    // Earlier trace states were scored when first admitted.
                    let score = objective(kept, self.ctx.arena().heuristic(candidate));
                    if self.accept(current, score, temperature) {
                        self.ctx.arena_mut().pop_n(k);
                        self.trace.truncate(kept);
                        current = score;
                        self.stats.accepted += 1;
                        self.stats.backtracks += 1;
                    } else {
                        self.stats.rejected += 1;
                    }
                }
            }
            self.stats.best_objective = self.stats.best_objective.min(current);

            let record_words = self.ctx.arena().layout().record_words();
            assert_eq!(
                (self.trace.len() + 1) * record_words,
                self.ctx.arena().used_words(),
                "arena out of step with the action trace"
            );

            temperature *= self.config.cooling_ratio;
            self.stats.final_temperature = temperature;
        }
        Ok(SearchOutcome::Cooled)
    }

    fn accept(&mut self, current: u64, candidate: u64, temperature: f64) -> bool {
        if candidate <= current {
            return true;
        }
        let worse = (candidate - current) as f64;
        self.rng.gen_bool((-worse / temperature).exp())
    }

    fn solved(&mut self, temperature: f64) -> SearchOutcome {
        self.stats.final_temperature = temperature;
        self.stats.accepted += 1;
        SearchOutcome::Solved(Plan::new(self.trace.clone()))
    }

    /// Counters of the most recent run.
    pub fn stats(&self) -> &AnnealStats {
        &self.stats
    }

    /// Actions of the walk as it stood when the last run ended.
    pub fn trace(&self) -> &[ActionId] {
        &self.trace
    }

    /// The run's arena and heuristic engine.
    pub fn context(&self) -> &SearchContext<'d, D> {
        &self.ctx
    }
}

/// `actions + h`, saturating at the infinite estimate.
fn objective(actions: usize, h: u64) -> u64 {
    h.saturating_add(actions as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffplan_core::{Domain, H_INFINITY};
    use ffplan_test_utils::{chain, gripper, one_way_trap, plan_reaches_goal, toy_chain};

    fn arena() -> ArenaConfig {
        ArenaConfig::new(1 << 14)
    }

    fn seeded(seed: u64) -> AnnealConfig {
        AnnealConfig {
            seed,
            ..AnnealConfig::default()
        }
    }

    #[test]
    fn objective_saturates() {
        assert_eq!(objective(3, 4), 7);
        assert_eq!(objective(3, H_INFINITY), H_INFINITY);
    }

    #[test]
    fn toy_chain_is_solved() {
        let task = toy_chain();
        for seed in 0..8 {
            let mut sa = SimulatedAnnealing::new(&task, &arena(), seeded(seed)).unwrap();
            let outcome = sa.run().unwrap();
            let plan = outcome.plan().expect("toy chain solved");
            assert!(plan_reaches_goal(&task, plan.actions()));
            assert_eq!(plan.actions().last(), Some(&ActionId(1)));
        }
    }

    #[test]
    fn goal_initial_state_is_empty_plan() {
        let task = chain(0);
        let mut sa = SimulatedAnnealing::new(&task, &arena(), seeded(1)).unwrap();
        assert_eq!(sa.run().unwrap(), SearchOutcome::Solved(Plan::default()));
        assert_eq!(sa.stats().iterations, 0);
    }

    #[test]
    fn no_applicable_action_at_root_ends_the_walk() {
        let mut b = ffplan_task::TaskBuilder::new();
        let a = b.fact("a");
        let g = b.fact("g");
        b.action("make-g", [g], [a], []);
        b.initial([a]).goal([g]);
        let task = b.build().unwrap();

        let mut sa = SimulatedAnnealing::new(&task, &arena(), seeded(0)).unwrap();
        assert_eq!(sa.run().unwrap(), SearchOutcome::NoSolution);
        assert_eq!(sa.stats().iterations, 1);
    }

    #[test]
    fn same_seed_same_run() {
        let task = gripper(2);
        let mut a = SimulatedAnnealing::new(&task, &arena(), seeded(42)).unwrap();
        let mut b = SimulatedAnnealing::new(&task, &arena(), seeded(42)).unwrap();
        let first = a.run().unwrap();
        assert_eq!(first, b.run().unwrap());
        assert_eq!(a.trace(), b.trace());
        assert_eq!(a.stats().iterations, b.stats().iterations);
        assert_eq!(a.stats().accepted, b.stats().accepted);

        // Rerunning the same driver reseeds.
        assert_eq!(a.run().unwrap(), first);
    }

    #[test]
    fn cold_start_cools_immediately() {
        let task = chain(3);
        let config = AnnealConfig {
            initial_temperature: 1.0,
            ..AnnealConfig::default()
        };
        let mut sa = SimulatedAnnealing::new(&task, &arena(), config).unwrap();
        assert_eq!(sa.run().unwrap(), SearchOutcome::Cooled);
        assert_eq!(sa.stats().iterations, 0);
        assert_eq!(sa.context().arena().len(), 1);
    }

    #[test]
    fn arena_tracks_trace_after_cooling() {
        // The goal is unreachable, so the walk runs until the floor.
        let task = ffplan_test_utils::unreachable_goal();
        let config = AnnealConfig {
            initial_temperature: 50.0,
            cooling_ratio: 0.9,
            ..AnnealConfig::default()
        };
        let mut sa = SimulatedAnnealing::new(&task, &arena(), config).unwrap();
        assert_eq!(sa.run().unwrap(), SearchOutcome::Cooled);
        let stats = sa.stats();
        assert_eq!(stats.iterations, 38);
        assert_eq!(stats.accepted + stats.rejected, stats.iterations);
        assert_eq!(sa.context().arena().len(), sa.trace().len() + 1);
        assert!(stats.final_temperature <= 1.0);
        assert_eq!(stats.best_objective, H_INFINITY);
    }

    #[test]
    fn low_temperature_rejects_worse_forward_moves() {
        let task = one_way_trap();
        for seed in [0, 2] {
            let config = AnnealConfig {
                seed,
                initial_temperature: 2.0,
                cooling_ratio: 0.99,
                ..AnnealConfig::default()
            };
            let mut sa = SimulatedAnnealing::new(&task, &arena(), config).unwrap();
            let outcome = sa.run().unwrap();
            let stats = sa.stats();
            assert!(stats.rejected > 0, "seed {seed} never rejected a move");
            // Rejected candidates are popped again.
            assert_eq!(sa.context().arena().len(), sa.trace().len() + 1);
            if let SearchOutcome::Solved(plan) = &outcome {
                assert!(plan_reaches_goal(&task, plan.actions()));
            }
        }
    }

    #[test]
    fn accepted_backtracks_shrink_the_arena() {
        let task = gripper(2);
        let mut backtracks = 0;
        for seed in 0..20 {
            let mut sa = SimulatedAnnealing::new(&task, &arena(), seeded(seed)).unwrap();
            sa.run().unwrap();
            backtracks += sa.stats().backtracks;
            assert_eq!(sa.context().arena().len(), sa.trace().len() + 1);
        }
        assert!(backtracks > 0);
    }

    #[test]
    fn trace_bound_is_enforced() {
        let task = chain(3);
        let config = AnnealConfig {
            max_trace_len: 1,
            ..AnnealConfig::default()
        };
        let mut sa = SimulatedAnnealing::new(&task, &arena(), config).unwrap();
        assert_eq!(
            sa.run(),
            Err(SearchError::TraceOverflow { max_trace_len: 1 })
        );
    }

    #[test]
    fn arena_exhaustion_is_an_error() {
        let task = chain(40);
        let mut sa = SimulatedAnnealing::new(
            &task,
            &ArenaConfig::for_states(task.layout(), 3),
            seeded(5),
        )
        .unwrap();
        assert!(matches!(sa.run(), Err(SearchError::Arena(_))));
    }
}
