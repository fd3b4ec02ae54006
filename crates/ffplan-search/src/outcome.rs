//! Run results and statistics.

use std::time::Duration;

use ffplan_core::ActionId;

/// An executable action sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Plan {
    actions: Vec<ActionId>,
}

impl Plan {
    /// Wrap actions in execution order.
    pub fn new(actions: Vec<ActionId>) -> Self {
        Self { actions }
    }

    /// The actions in execution order.
    pub fn actions(&self) -> &[ActionId] {
        &self.actions
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the initial state already satisfies the goal.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Unwrap into the action vector.
    pub fn into_actions(self) -> Vec<ActionId> {
        self.actions
    }
}

impl From<Vec<ActionId>> for Plan {
    fn from(actions: Vec<ActionId>) -> Self {
        Self::new(actions)
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a ActionId;
    type IntoIter = std::slice::Iter<'a, ActionId>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}

/// How a run ended, short of an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A plan reaching the goal.
    Solved(Plan),
    /// Every reachable state was expanded (best-first), or the walk had
    /// no move left (annealing).
    NoSolution,
    /// The wall-clock budget ran out.
    Timeout,
    /// The temperature dropped to the floor without reaching the goal.
    Cooled,
}

impl SearchOutcome {
    /// The plan, if one was found.
    pub fn plan(&self) -> Option<&Plan> {
        match self {
            Self::Solved(plan) => Some(plan),
            _ => None,
        }
    }

    /// Whether a plan was found.
    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }
}

fn per_second(count: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        count as f64 / secs
    } else {
        0.0
    }
}

/// Counters of a best-first run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchStats {
    /// Arena slots allocated, including rolled-back duplicates.
    pub states_created: u64,
    /// States popped and expanded.
    pub expanded: u64,
    /// Heuristic evaluations.
    pub evaluated: u64,
    /// Successors discarded as already visited.
    pub duplicates: u64,
    /// Largest frontier size seen.
    pub peak_frontier: usize,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

impl SearchStats {
    /// Created states per second.
    pub fn states_per_second(&self) -> f64 {
        per_second(self.states_created, self.elapsed)
    }

    /// Expanded states per second.
    pub fn expanded_per_second(&self) -> f64 {
        per_second(self.expanded, self.elapsed)
    }
}

/// Counters of an annealing run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnnealStats {
    /// Loop iterations.
    pub iterations: u64,
    /// Accepted moves (forward and backtrack).
    pub accepted: u64,
    /// Rejected moves.
    pub rejected: u64,
    /// Accepted backtrack moves.
    pub backtracks: u64,
    /// Lowest objective held by the walk.
    pub best_objective: u64,
    /// Temperature when the run ended.
    pub final_temperature: f64,
    /// Arena slots allocated.
    pub states_created: u64,
    /// Heuristic evaluations.
    pub evaluated: u64,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

impl AnnealStats {
    /// Iterations per second.
    pub fn iterations_per_second(&self) -> f64 {
        per_second(self.iterations, self.elapsed)
    }
}
