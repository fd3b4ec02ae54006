//! The grounded-task interface consumed by the heuristic and the searches.
//!
//! [`Domain`] covers what the search drivers need: the initial state,
//! goal test, applicable actions and successor generation. [`RelaxedDomain`]
//! adds what the relaxed-graph heuristic needs: per-action fact lists, the
//! relaxed goal test and layer construction.
//!
//! The provided methods of [`RelaxedDomain`] assume a propositional
//! encoding where state bit `f` is fact `f` and the relaxed state uses the
//! same bit layout. Tasks with a packed (multi-valued) state encoding
//! override [`convert_to_relaxed`](RelaxedDomain::convert_to_relaxed).

use crate::bits::{self, FactSet};
use crate::id::{ActionId, FactId};
use crate::layout::StateLayout;
use crate::relaxed::RelaxedGraph;

/// A grounded planning task as seen by the search drivers.
///
/// All `state` arguments are bitsets of exactly
/// `layout().state_words()` words (no heuristic slot).
pub trait Domain {
    /// Word geometry of this task's states.
    fn layout(&self) -> StateLayout;

    /// Number of propositional facts.
    fn fact_count(&self) -> usize;

    /// Number of grounded actions.
    fn action_count(&self) -> usize;

    /// Bit pattern of the initial state.
    fn initial_state(&self) -> &[u64];

    /// Whether `state` satisfies the goal condition.
    fn is_goal(&self, state: &[u64]) -> bool;

    /// Append every action applicable in `state` to `out`, in ascending
    /// id order. `out` is cleared first.
    fn applicable_actions(&self, state: &[u64], out: &mut Vec<ActionId>);

    /// Write the successor of applying `action` in `state` into `out`.
    ///
    /// `out` is overwritten completely; it need not hold a copy of `state`.
    /// The action is assumed to be applicable.
    fn apply_effects(&self, state: &[u64], action: ActionId, out: &mut [u64]);

    /// Human-readable name of an action.
    fn action_name(&self, action: ActionId) -> &str;

    /// Every successor of `state` with the action producing it.
    ///
    /// Allocates one vector per successor. The search drivers call
    /// [`applicable_actions`](Self::applicable_actions) and
    /// [`apply_effects`](Self::apply_effects) directly so successors land
    /// in arena slots instead.
    fn enumerate_successors(&self, state: &[u64]) -> Vec<(Vec<u64>, ActionId)> {
        let mut actions = Vec::new();
        self.applicable_actions(state, &mut actions);
        actions
            .into_iter()
            .map(|action| {
                let mut next = vec![0; self.layout().state_words()];
                self.apply_effects(state, action, &mut next);
                (next, action)
            })
            .collect()
    }
}

/// The delete-relaxation view of a task, used by the FF heuristic.
pub trait RelaxedDomain: Domain {
    /// Width in words of a relaxed state.
    fn relaxed_words(&self) -> usize {
        self.layout().state_words()
    }

    /// Facts that must hold for `action` to apply.
    fn preconditions_of(&self, action: ActionId) -> &[FactId];

    /// Facts `action` makes true (delete effects are ignored).
    fn effects_of(&self, action: ActionId) -> &[FactId];

    /// Whether `fact` is part of the goal condition.
    fn is_goal_fact(&self, fact: FactId) -> bool;

    /// Whether the relaxed state satisfies the goal condition.
    fn is_relaxed_goal(&self, relaxed: &FactSet) -> bool;

    /// Load `state` into `relaxed` and mark its facts as reached at layer 0.
    ///
    /// `relaxed` is `relaxed_words()` wide and `graph` has just been reset.
    fn convert_to_relaxed(&self, state: &[u64], relaxed: &mut FactSet, graph: &mut RelaxedGraph) {
        relaxed.clear();
        for fact in bits::iter_set(state) {
            if fact.index() >= self.fact_count() {
                break;
            }
            relaxed.insert(fact);
            graph.set_fact_layer(fact, 0);
        }
    }

    /// Build graph layer `layer + 1` from layer `layer`.
    ///
    /// On entry `next` holds a copy of `prev`. Every action not yet in the
    /// graph whose preconditions hold in `prev` is recorded at `layer` and
    /// its effects are added to `next`. Each effect not reached before gets
    /// fact layer `layer + 1` and the action as achiever; those that are
    /// goal facts go into a newly opened goal layer. One goal layer is
    /// opened per call, even when it stays empty.
    fn build_next_layer(
        &self,
        prev: &FactSet,
        next: &mut FactSet,
        graph: &mut RelaxedGraph,
        layer: u32,
    ) {
        let goal_idx = graph.depth();
        graph.push_goal_layer();
        for a in 0..self.action_count() {
            let action = ActionId(a as u32);
            if graph.action_layer(action).is_some() {
                continue;
            }
            if !self
                .preconditions_of(action)
                .iter()
                .all(|&pre| prev.contains(pre))
            {
                continue;
            }
            graph.set_action_layer(action, layer);
            for &eff in self.effects_of(action) {
                next.insert(eff);
                if graph.fact_layer(eff).is_none() {
                    graph.set_fact_layer(eff, layer + 1);
                    graph.set_achiever(eff, action);
                    if self.is_goal_fact(eff) {
                        graph.goal_layer_mut(goal_idx).push(eff);
                    }
                }
            }
        }
    }
}
