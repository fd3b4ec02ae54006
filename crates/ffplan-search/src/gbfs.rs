//! Greedy best-first search.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Instant;

use tracing::{debug, info};

use ffplan_arena::ArenaConfig;
use ffplan_core::{ActionId, RelaxedDomain, StateId};

use crate::config::SearchConfig;
use crate::context::SearchContext;
use crate::error::SearchError;
use crate::outcome::{Plan, SearchOutcome, SearchStats};

/// Expands states in order of their FF estimate alone.
///
/// Among equal estimates the earlier-created state (lower [`StateId`])
/// comes first. A state is marked visited when it is popped; successors
/// already visited are rolled back out of the arena before they are
/// scored. The initial state is scored and pushed like any other.
pub struct BestFirstSearch<'d, D: RelaxedDomain + ?Sized> {
    ctx: SearchContext<'d, D>,
    config: SearchConfig,
    frontier: BinaryHeap<Reverse<(u64, StateId)>>,
    applicable: Vec<ActionId>,
    stats: SearchStats,
    goal: Option<StateId>,
}

impl<'d, D: RelaxedDomain + ?Sized> BestFirstSearch<'d, D> {
    /// Validate `config` and allocate the arena.
    pub fn new(
        domain: &'d D,
        arena: &ArenaConfig,
        config: SearchConfig,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            ctx: SearchContext::new(domain, arena)?,
            config,
            frontier: BinaryHeap::new(),
            applicable: Vec::new(),
            stats: SearchStats::default(),
            goal: None,
        })
    }

    /// Search from the initial state.
    ///
    /// Each call starts from scratch. Running out of arena slots is an
    /// error; everything else is an outcome.
    pub fn run(&mut self) -> Result<SearchOutcome, SearchError> {
        self.ctx.reset();
        self.frontier.clear();
        self.stats = SearchStats::default();
        self.goal = None;

        let start = Instant::now();
        let created_before = self.ctx.arena().allocations();
        let evaluated_before = self.ctx.heuristic().evaluations();

        let result = self.search(start);

        self.stats.elapsed = start.elapsed();
        self.stats.states_created = self.ctx.arena().allocations() - created_before;
        self.stats.evaluated = self.ctx.heuristic().evaluations() - evaluated_before;
        let outcome = result?;
        info!(
            outcome = outcome_label(&outcome),
            plan_len = outcome.plan().map(Plan::len),
            created = self.stats.states_created,
            expanded = self.stats.expanded,
            evaluated = self.stats.evaluated,
            duplicates = self.stats.duplicates,
            elapsed_ms = self.stats.elapsed.as_millis() as u64,
            states_per_sec = self.stats.states_per_second() as u64,
            "best-first search finished"
        );
        Ok(outcome)
    }

    fn search(&mut self, start: Instant) -> Result<SearchOutcome, SearchError> {
        let root = self.ctx.push_root()?;
        self.frontier
            .push(Reverse((self.ctx.arena().heuristic(root), root)));

        while let Some(Reverse((h, id))) = self.frontier.pop() {
            if start.elapsed() >= self.config.timeout {
                debug!(expanded = self.stats.expanded, "timeout reached");
                return Ok(SearchOutcome::Timeout);
            }
            let ctx = &mut self.ctx;
            if !ctx.mark_visited(id) {
                continue;
            }
            self.stats.expanded += 1;
            if ctx.is_goal(id) {
                self.goal = Some(id);
                return Ok(SearchOutcome::Solved(Plan::new(ctx.paths().reconstruct(id))));
            }

            ctx.domain()
                .applicable_actions(ctx.arena().bits(id), &mut self.applicable);
            for &action in &self.applicable {
                let child = ctx.derive(id, action)?;
                if ctx.is_visited(child) {
                    ctx.arena_mut().pop_one();
                    self.stats.duplicates += 1;
                    continue;
                }
                let child_h = ctx.evaluate(child);
                ctx.paths_mut().record(child, id, action);
                self.frontier.push(Reverse((child_h, child)));
            }
            self.stats.peak_frontier = self.stats.peak_frontier.max(self.frontier.len());

            if self.stats.expanded % self.config.progress_interval == 0 {
                debug!(
                    expanded = self.stats.expanded,
                    frontier = self.frontier.len(),
                    states = ctx.arena().len(),
                    h,
                    "search progress"
                );
            }
        }
        Ok(SearchOutcome::NoSolution)
    }

    /// Counters of the most recent run.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// The goal state the last plan leads to, if the last run solved.
    ///
    /// Its record stays live in [`context`](Self::context)'s arena until
    /// the next run.
    pub fn goal(&self) -> Option<StateId> {
        self.goal
    }

    /// The run's arena, visited set and path map.
    pub fn context(&self) -> &SearchContext<'d, D> {
        &self.ctx
    }
}

pub(crate) fn outcome_label(outcome: &SearchOutcome) -> &'static str {
    match outcome {
        SearchOutcome::Solved(_) => "solved",
        SearchOutcome::NoSolution => "no-solution",
        SearchOutcome::Timeout => "timeout",
        SearchOutcome::Cooled => "cooled",
    }
}
