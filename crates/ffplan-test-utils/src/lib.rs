//! Test utilities for ffplan development.
//!
//! Small hand-built tasks with known answers ([`fixtures`]), a seeded
//! random task generator for property tests ([`random_task`]) and helpers
//! to build states by fact name and to replay plans.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{chain, gripper, one_way_trap, toy_chain, unreachable_goal};

use ffplan_core::{ActionId, Domain, FactSet};
use ffplan_task::{StripsTask, TaskBuilder};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// State of `task` with exactly the named facts set.
///
/// # Panics
///
/// Panics if a name is not a fact of `task`.
pub fn state_of(task: &StripsTask, facts: &[&str]) -> Vec<u64> {
    let words = task.layout().state_words();
    let ids = facts.iter().map(|name| {
        task.fact_id(name)
            .unwrap_or_else(|| panic!("unknown fact {name:?}"))
    });
    FactSet::from_facts(words, ids).words().to_vec()
}

/// Apply `plan` from the initial state.
///
/// Returns the final state, or `None` if some step is not applicable in
/// the state it is applied to.
pub fn replay_plan(task: &StripsTask, plan: &[ActionId]) -> Option<Vec<u64>> {
    let mut state = task.initial_state().to_vec();
    let mut next = vec![0; state.len()];
    for &action in plan {
        if !task.action(action).is_applicable(&state) {
            return None;
        }
        task.apply_effects(&state, action, &mut next);
        std::mem::swap(&mut state, &mut next);
    }
    Some(state)
}

/// Whether `plan` is executable and ends in a goal state.
pub fn plan_reaches_goal(task: &StripsTask, plan: &[ActionId]) -> bool {
    replay_plan(task, plan).is_some_and(|s| task.is_goal(&s))
}

/// A random task with `facts` facts and `actions` actions.
///
/// Each action has one or two preconditions, one or two add effects and
/// occasionally a delete effect. The initial state and goal are random
/// non-empty fact sets. The same seed always yields the same task.
pub fn random_task(seed: u64, facts: usize, actions: usize) -> StripsTask {
    assert!(facts > 0, "random_task needs at least one fact");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut b = TaskBuilder::new();
    let ids: Vec<_> = (0..facts).map(|i| b.fact(format!("f{i}"))).collect();

    let pick = |rng: &mut ChaCha8Rng, max: usize| {
        let n = rng.gen_range(1..=max);
        (0..n)
            .map(|_| ids[rng.gen_range(0..facts)])
            .collect::<Vec<_>>()
    };

    for i in 0..actions {
        let pre = pick(&mut rng, 2);
        let add = pick(&mut rng, 2);
        let del = if rng.gen_bool(0.3) {
            pick(&mut rng, 1)
        } else {
            Vec::new()
        };
        b.action(format!("a{i}"), pre, add, del);
    }
    let initial = pick(&mut rng, 3);
    let goal = pick(&mut rng, 2);
    b.initial(initial).goal(goal);
    b.build().expect("generated task is well formed")
}
