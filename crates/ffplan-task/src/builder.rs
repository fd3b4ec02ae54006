//! Programmatic task construction.

use std::collections::HashSet;

use indexmap::IndexSet;

use ffplan_core::{ActionId, FactId, FactList, FactSet, StateLayout};

use crate::error::TaskError;
use crate::task::{Action, StripsTask};

struct PendingAction {
    name: String,
    pre: FactList,
    add: FactList,
    del: FactList,
}

/// Assembles a [`StripsTask`] fact by fact and action by action.
///
/// ```
/// use ffplan_core::Domain;
/// use ffplan_task::TaskBuilder;
///
/// let mut b = TaskBuilder::new();
/// let a = b.fact("A");
/// let c = b.fact("C");
/// b.action("a-to-c", [a], [c], [a]);
/// b.initial([a]).goal([c]);
/// let task = b.build().unwrap();
/// assert_eq!(task.action_count(), 1);
/// ```
#[derive(Default)]
pub struct TaskBuilder {
    facts: IndexSet<String>,
    actions: Vec<PendingAction>,
    initial: Vec<FactId>,
    goal: Vec<FactId>,
}

impl TaskBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a fact, or return the id of an already declared one.
    pub fn fact(&mut self, name: impl Into<String>) -> FactId {
        let (index, _) = self.facts.insert_full(name.into());
        FactId(index as u32)
    }

    /// Whether a fact name is already declared.
    pub fn has_fact(&self, name: &str) -> bool {
        self.facts.contains(name)
    }

    /// Id of a declared fact.
    pub fn fact_id(&self, name: &str) -> Option<FactId> {
        self.facts.get_index_of(name).map(|i| FactId(i as u32))
    }

    /// Add an action with precondition, add and delete lists.
    pub fn action<P, A, D>(&mut self, name: impl Into<String>, pre: P, add: A, del: D) -> ActionId
    where
        P: IntoIterator<Item = FactId>,
        A: IntoIterator<Item = FactId>,
        D: IntoIterator<Item = FactId>,
    {
        self.actions.push(PendingAction {
            name: name.into(),
            pre: pre.into_iter().collect(),
            add: add.into_iter().collect(),
            del: del.into_iter().collect(),
        });
        ActionId(self.actions.len() as u32 - 1)
    }

    /// Set the facts true in the initial state (all others are false).
    pub fn initial<I: IntoIterator<Item = FactId>>(&mut self, facts: I) -> &mut Self {
        self.initial = facts.into_iter().collect();
        self
    }

    /// Set the facts that must hold in a goal state.
    pub fn goal<I: IntoIterator<Item = FactId>>(&mut self, facts: I) -> &mut Self {
        self.goal = facts.into_iter().collect();
        self
    }

    /// Validate and build the task.
    pub fn build(self) -> Result<StripsTask, TaskError> {
        let fact_count = self.facts.len();
        if fact_count == 0 {
            return Err(TaskError::NoFacts);
        }
        if self.goal.is_empty() {
            return Err(TaskError::EmptyGoal);
        }
        let check = |fact: FactId| {
            if fact.index() < fact_count {
                Ok(fact)
            } else {
                Err(TaskError::FactOutOfRange { fact, fact_count })
            }
        };

        let layout = StateLayout::for_facts(fact_count);
        let mut names = HashSet::with_capacity(self.actions.len());
        let mut actions = Vec::with_capacity(self.actions.len());
        for pending in self.actions {
            if !names.insert(pending.name.clone()) {
                return Err(TaskError::DuplicateAction { name: pending.name });
            }
            for &fact in pending.pre.iter().chain(&pending.add).chain(&pending.del) {
                check(fact)?;
            }
            actions.push(Action::new(
                pending.name,
                pending.pre,
                pending.add,
                pending.del,
                layout,
            ));
        }

        let mut initial = FactSet::with_words(layout.state_words());
        for &fact in &self.initial {
            initial.insert(check(fact)?);
        }
        let mut goal = FactSet::with_words(layout.state_words());
        for &fact in &self.goal {
            goal.insert(check(fact)?);
        }

        Ok(StripsTask::assemble(
            self.facts, actions, layout, initial, goal,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffplan_core::Domain;

    #[test]
    fn fact_interns_names() {
        let mut b = TaskBuilder::new();
        let a = b.fact("a");
        let again = b.fact("a");
        assert_eq!(a, again);
        assert!(b.has_fact("a"));
        assert_eq!(b.fact_id("b"), None);
    }

    #[test]
    fn action_ids_are_sequential() {
        let mut b = TaskBuilder::new();
        let a = b.fact("a");
        assert_eq!(b.action("x", [a], [], []), ActionId(0));
        assert_eq!(b.action("y", [], [a], []), ActionId(1));
    }

    #[test]
    fn empty_task_rejected() {
        assert_eq!(TaskBuilder::new().build().unwrap_err(), TaskError::NoFacts);
    }

    #[test]
    fn empty_goal_rejected() {
        let mut b = TaskBuilder::new();
        let a = b.fact("a");
        b.initial([a]);
        assert_eq!(b.build().unwrap_err(), TaskError::EmptyGoal);
    }

    #[test]
    fn duplicate_action_rejected() {
        let mut b = TaskBuilder::new();
        let a = b.fact("a");
        b.action("x", [a], [], []);
        b.action("x", [], [a], []);
        b.goal([a]);
        assert_eq!(
            b.build().unwrap_err(),
            TaskError::DuplicateAction { name: "x".into() }
        );
    }

    #[test]
    fn out_of_range_fact_rejected() {
        let mut b = TaskBuilder::new();
        let a = b.fact("a");
        b.action("x", [a], [FactId(9)], []);
        b.goal([a]);
        assert_eq!(
            b.build().unwrap_err(),
            TaskError::FactOutOfRange {
                fact: FactId(9),
                fact_count: 1,
            }
        );
    }

    #[test]
    fn initial_state_bits() {
        let mut b = TaskBuilder::new();
        let _a = b.fact("a");
        let c = b.fact("c");
        b.initial([c]).goal([c]);
        let task = b.build().unwrap();
        assert_eq!(task.initial_state(), &[0b10]);
        assert!(task.is_goal(task.initial_state()));
    }
}
