//! Relaxed-graph heuristic engine.

use ffplan_core::{FactSet, RelaxedDomain, RelaxedGraph, StateLayout, H_INFINITY};

/// How relaxed graph construction ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeuristicStatus {
    /// The relaxed goal holds after `layers` layers (0 if it holds in the
    /// evaluated state itself).
    Done {
        /// Number of layers built.
        layers: u32,
    },
    /// A layer added no new fact before the relaxed goal was reached.
    Fixpoint,
}

/// Computes the FF estimate for states of one task.
///
/// The estimate is the number of actions in a relaxed plan extracted
/// backwards from the goal layers, or [`H_INFINITY`] when the relaxed
/// graph saturates without reaching the goal.
#[derive(Debug)]
pub struct FfHeuristic {
    graph: RelaxedGraph,
    relaxed: FactSet,
    prev: FactSet,
    marked: FactSet,
    fact_count: usize,
    action_count: usize,
    evaluations: u64,
}

impl FfHeuristic {
    /// Engine sized for `domain`.
    pub fn new<D: RelaxedDomain + ?Sized>(domain: &D) -> Self {
        let fact_count = domain.fact_count();
        let action_count = domain.action_count();
        let relaxed_words = domain.relaxed_words();
        Self {
            graph: RelaxedGraph::new(fact_count, action_count),
            relaxed: FactSet::with_words(relaxed_words),
            prev: FactSet::with_words(relaxed_words),
            marked: FactSet::with_words(StateLayout::for_facts(fact_count).state_words()),
            fact_count,
            action_count,
            evaluations: 0,
        }
    }

    /// Estimate the number of actions needed to reach the goal from `state`.
    pub fn evaluate<D: RelaxedDomain + ?Sized>(&mut self, domain: &D, state: &[u64]) -> u64 {
        self.evaluations += 1;
        match self.build_graph(domain, state) {
            HeuristicStatus::Fixpoint => H_INFINITY,
            HeuristicStatus::Done { .. } => self.extract_relaxed_plan(domain),
        }
    }

    /// Evaluate a full arena record and store the estimate in its
    /// heuristic slot. Returns the estimate.
    pub fn evaluate_record<D: RelaxedDomain + ?Sized>(
        &mut self,
        domain: &D,
        record: &mut [u64],
    ) -> u64 {
        let layout = domain.layout();
        debug_assert_eq!(record.len(), layout.record_words());
        let h = self.evaluate(domain, &record[..layout.state_words()]);
        record[layout.heuristic_slot()] = h;
        h
    }

    /// Build the relaxed planning graph for `state`, leaving it in
    /// [`graph`](Self::graph).
    pub fn build_graph<D: RelaxedDomain + ?Sized>(
        &mut self,
        domain: &D,
        state: &[u64],
    ) -> HeuristicStatus {
        self.graph.reset(self.fact_count, self.action_count);
        domain.convert_to_relaxed(state, &mut self.relaxed, &mut self.graph);

        let mut layer = 0u32;
        loop {
            if domain.is_relaxed_goal(&self.relaxed) {
                return HeuristicStatus::Done { layers: layer };
            }
            self.prev.copy_from(&self.relaxed);
            domain.build_next_layer(&self.prev, &mut self.relaxed, &mut self.graph, layer);
            // Each layer is compared with the one it was built from, so a
            // fresh graph can never look saturated.
            if self.relaxed == self.prev {
                return HeuristicStatus::Fixpoint;
            }
            layer += 1;
        }
    }

    /// Count the actions of a relaxed plan for the graph just built.
    ///
    /// Walks goal layers from the top. Each unmarked fact contributes its
    /// achiever; the achiever's preconditions reached after layer 0 are
    /// queued on the goal layer of their own first appearance, and its
    /// effects first reached at the current layer are marked covered.
    fn extract_relaxed_plan<D: RelaxedDomain + ?Sized>(&mut self, domain: &D) -> u64 {
        self.marked.clear();
        let mut count = 0u64;

        for idx in (0..self.graph.depth()).rev() {
            let current = idx as u32 + 1;
            let facts = self.graph.take_goal_layer(idx);
            for &fact in &facts {
                if self.marked.contains(fact) {
                    continue;
                }
                let Some(action) = self.graph.achiever(fact) else {
                    continue;
                };
                count += 1;

                for &pre in domain.preconditions_of(action) {
                    match self.graph.fact_layer(pre) {
                        Some(0) | None => {}
                        Some(m) => self.graph.goal_layer_mut(m as usize - 1).push(pre),
                    }
                }
                for &eff in domain.effects_of(action) {
                    if self.graph.fact_layer(eff) == Some(current) {
                        self.marked.insert(eff);
                    }
                }
            }
            self.graph.restore_goal_layer(idx, facts);
        }
        count
    }

    /// The relaxed graph of the most recent call.
    pub fn graph(&self) -> &RelaxedGraph {
        &self.graph
    }

    /// Number of states evaluated so far.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffplan_core::{Domain, FactId};
    use ffplan_task::TaskBuilder;
    use ffplan_test_utils::{state_of, toy_chain, unreachable_goal};

    #[test]
    fn toy_chain_initial_estimate_is_two() {
        let task = toy_chain();
        let mut h = FfHeuristic::new(&task);
        assert_eq!(h.evaluate(&task, task.initial_state()), 2);
        assert_eq!(
            h.build_graph(&task, task.initial_state()),
            HeuristicStatus::Done { layers: 2 }
        );
    }

    #[test]
    fn toy_chain_from_b_is_one() {
        let task = toy_chain();
        let mut h = FfHeuristic::new(&task);
        assert_eq!(h.evaluate(&task, &state_of(&task, &["B"])), 1);
        assert_eq!(h.evaluate(&task, &state_of(&task, &["A", "B"])), 1);
    }

    #[test]
    fn goal_state_is_zero_at_layer_zero() {
        let task = toy_chain();
        let mut h = FfHeuristic::new(&task);
        let goal = state_of(&task, &["C"]);
        assert_eq!(h.build_graph(&task, &goal), HeuristicStatus::Done { layers: 0 });
        assert_eq!(h.evaluate(&task, &goal), 0);
    }

    #[test]
    fn unreachable_goal_is_infinite() {
        let task = unreachable_goal();
        let mut h = FfHeuristic::new(&task);
        assert_eq!(
            h.build_graph(&task, task.initial_state()),
            HeuristicStatus::Fixpoint
        );
        assert_eq!(h.evaluate(&task, task.initial_state()), H_INFINITY);
    }

    #[test]
    fn dead_state_with_no_applicable_action_is_fixpoint() {
        // Nothing applies in the empty state: the very first layer adds no
        // fact. This must be reported as a fixpoint, not as "first layer".
        let task = toy_chain();
        let mut h = FfHeuristic::new(&task);
        assert_eq!(h.evaluate(&task, &[0]), H_INFINITY);
    }

    #[test]
    fn evaluate_record_writes_heuristic_slot() {
        let task = toy_chain();
        let mut h = FfHeuristic::new(&task);
        let mut record = task.initial_state().to_vec();
        record.push(0);
        assert_eq!(h.evaluate_record(&task, &mut record), 2);
        assert_eq!(record[task.layout().heuristic_slot()], 2);
        assert_eq!(h.evaluations(), 1);
    }

    #[test]
    fn shared_achiever_is_counted_once() {
        // One action adds both goal facts at the same layer.
        let mut b = TaskBuilder::new();
        let s = b.fact("s");
        let g1 = b.fact("g1");
        let g2 = b.fact("g2");
        b.action("both", [s], [g1, g2], []);
        b.initial([s]).goal([g1, g2]);
        let task = b.build().unwrap();

        let mut h = FfHeuristic::new(&task);
        assert_eq!(h.evaluate(&task, task.initial_state()), 1);
    }

    #[test]
    fn shared_precondition_is_achieved_once() {
        // g1 and g2 each need `key`, which needs one action from `start`.
        let mut b = TaskBuilder::new();
        let start = b.fact("start");
        let key = b.fact("key");
        let g1 = b.fact("g1");
        let g2 = b.fact("g2");
        b.action("get-key", [start], [key], []);
        b.action("open-1", [key], [g1], []);
        b.action("open-2", [key], [g2], []);
        b.initial([start]).goal([g1, g2]);
        let task = b.build().unwrap();

        let mut h = FfHeuristic::new(&task);
        assert_eq!(h.evaluate(&task, task.initial_state()), 3);
        assert_eq!(h.graph().fact_layer(key), Some(1));
        assert_eq!(h.graph().fact_layer(g1), Some(2));
    }

    #[test]
    fn delete_effects_are_ignored() {
        // `go` deletes its own precondition; relaxed it still chains.
        let mut b = TaskBuilder::new();
        let here = b.fact("here");
        let there = b.fact("there");
        let done = b.fact("done");
        b.action("go", [here], [there], [here]);
        b.action("finish", [here, there], [done], []);
        b.initial([here]).goal([done]);
        let task = b.build().unwrap();

        let mut h = FfHeuristic::new(&task);
        assert_eq!(h.evaluate(&task, task.initial_state()), 2);
    }

    #[test]
    fn layer_zero_goal_facts_are_not_counted() {
        let mut b = TaskBuilder::new();
        let a = b.fact("a");
        let c = b.fact("c");
        let d = b.fact("d");
        b.action("make-d", [a], [d], []);
        b.initial([a, c]).goal([c, d]);
        let task = b.build().unwrap();

        let mut h = FfHeuristic::new(&task);
        assert_eq!(h.evaluate(&task, task.initial_state()), 1);
        assert_eq!(h.graph().fact_layer(c), Some(0));
        assert_eq!(h.graph().fact_layer(FactId(2)), Some(1));
    }

    #[test]
    fn repeated_calls_do_not_leak_state() {
        let task = toy_chain();
        let mut h = FfHeuristic::new(&task);
        let b_only = state_of(&task, &["B"]);
        let first = h.evaluate(&task, task.initial_state());
        let _ = h.evaluate(&task, &b_only);
        let _ = h.evaluate(&task, &[0]);
        assert_eq!(h.evaluate(&task, task.initial_state()), first);
    }

    mod proptests {
        use super::*;
        use ffplan_test_utils::random_task;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn infinite_iff_fixpoint_and_zero_on_goal(
                seed in any::<u64>(),
                state_bits in any::<u64>(),
            ) {
                let task = random_task(seed, 12, 10);
                let mut h = FfHeuristic::new(&task);
                let state = [state_bits & ((1u64 << 12) - 1)];

                let status = h.build_graph(&task, &state);
                let value = h.evaluate(&task, &state);
                prop_assert_eq!(value == H_INFINITY, status == HeuristicStatus::Fixpoint);
                if task.is_goal(&state) {
                    prop_assert_eq!(status, HeuristicStatus::Done { layers: 0 });
                    prop_assert_eq!(value, 0);
                }
                if let HeuristicStatus::Done { layers } = status {
                    // At least one action per layer is needed, at most one per action.
                    prop_assert!(value >= u64::from(layers));
                    prop_assert!(value <= task.action_count() as u64);
                }
            }
        }
    }
}
