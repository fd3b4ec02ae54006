//! The [`StripsTask`] domain model.

use indexmap::IndexSet;

use ffplan_core::bits::{self, FactSet};
use ffplan_core::{ActionId, Domain, FactId, FactList, RelaxedDomain, StateLayout};

/// A grounded action with precomputed word masks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Action {
    name: String,
    pre: FactList,
    add: FactList,
    del: FactList,
    pre_mask: Vec<u64>,
    add_mask: Vec<u64>,
    del_mask: Vec<u64>,
}

impl Action {
    pub(crate) fn new(
        name: String,
        pre: FactList,
        add: FactList,
        del: FactList,
        layout: StateLayout,
    ) -> Self {
        let mask = |facts: &FactList| {
            FactSet::from_facts(layout.state_words(), facts.iter().copied())
                .words()
                .to_vec()
        };
        Self {
            pre_mask: mask(&pre),
            add_mask: mask(&add),
            del_mask: mask(&del),
            name,
            pre,
            add,
            del,
        }
    }

    /// Action name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Precondition facts.
    pub fn preconditions(&self) -> &[FactId] {
        &self.pre
    }

    /// Facts made true.
    pub fn add_effects(&self) -> &[FactId] {
        &self.add
    }

    /// Facts made false.
    pub fn delete_effects(&self) -> &[FactId] {
        &self.del
    }

    /// Whether the action applies in `state`.
    #[inline]
    pub fn is_applicable(&self, state: &[u64]) -> bool {
        bits::contains_all(state, &self.pre_mask)
    }

    /// Write `(state - del) | add` into `out`.
    ///
    /// A fact both deleted and added ends up true.
    #[inline]
    pub fn apply(&self, state: &[u64], out: &mut [u64]) {
        for (i, o) in out.iter_mut().enumerate() {
            *o = (state[i] & !self.del_mask[i]) | self.add_mask[i];
        }
    }
}

/// A grounded propositional STRIPS task.
///
/// State bit `f` is fact `f`. The relaxed representation uses the same
/// encoding, so the default relaxed conversion and layer construction of
/// [`RelaxedDomain`] apply unchanged.
#[derive(Clone, Debug)]
pub struct StripsTask {
    facts: IndexSet<String>,
    actions: Vec<Action>,
    layout: StateLayout,
    initial: Vec<u64>,
    goal: FactSet,
    goal_facts: Vec<FactId>,
}

impl StripsTask {
    pub(crate) fn assemble(
        facts: IndexSet<String>,
        actions: Vec<Action>,
        layout: StateLayout,
        initial: FactSet,
        goal: FactSet,
    ) -> Self {
        let goal_facts = goal.iter().collect();
        Self {
            facts,
            actions,
            layout,
            initial: initial.words().to_vec(),
            goal,
            goal_facts,
        }
    }

    /// Name of a fact.
    ///
    /// # Panics
    ///
    /// Panics if `fact` is out of range.
    pub fn fact_name(&self, fact: FactId) -> &str {
        &self.facts[fact.index()]
    }

    /// Look up a fact by name.
    pub fn fact_id(&self, name: &str) -> Option<FactId> {
        self.facts.get_index_of(name).map(|i| FactId(i as u32))
    }

    /// All fact names in id order.
    pub fn fact_names(&self) -> impl Iterator<Item = &str> {
        self.facts.iter().map(String::as_str)
    }

    /// An action by id.
    pub fn action(&self, action: ActionId) -> &Action {
        &self.actions[action.index()]
    }

    /// All actions in id order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Facts of the goal condition in ascending order.
    pub fn goal_facts(&self) -> &[FactId] {
        &self.goal_facts
    }

    /// Names of the facts set in `state`, in id order.
    pub fn describe_state(&self, state: &[u64]) -> Vec<&str> {
        bits::iter_set(state)
            .take_while(|f| f.index() < self.facts.len())
            .map(|f| self.fact_name(f))
            .collect()
    }
}

impl Domain for StripsTask {
    fn layout(&self) -> StateLayout {
        self.layout
    }

    fn fact_count(&self) -> usize {
        self.facts.len()
    }

    fn action_count(&self) -> usize {
        self.actions.len()
    }

    fn initial_state(&self) -> &[u64] {
        &self.initial
    }

    fn is_goal(&self, state: &[u64]) -> bool {
        bits::contains_all(state, self.goal.words())
    }

    fn applicable_actions(&self, state: &[u64], out: &mut Vec<ActionId>) {
        out.clear();
        out.extend(
            self.actions
                .iter()
                .enumerate()
                .filter(|(_, a)| a.is_applicable(state))
                .map(|(i, _)| ActionId(i as u32)),
        );
    }

    fn apply_effects(&self, state: &[u64], action: ActionId, out: &mut [u64]) {
        self.actions[action.index()].apply(state, out);
    }

    fn action_name(&self, action: ActionId) -> &str {
        self.actions[action.index()].name()
    }
}

impl RelaxedDomain for StripsTask {
    fn preconditions_of(&self, action: ActionId) -> &[FactId] {
        &self.actions[action.index()].pre
    }

    fn effects_of(&self, action: ActionId) -> &[FactId] {
        &self.actions[action.index()].add
    }

    fn is_goal_fact(&self, fact: FactId) -> bool {
        self.goal.contains(fact)
    }

    fn is_relaxed_goal(&self, relaxed: &FactSet) -> bool {
        relaxed.is_superset(&self.goal)
    }
}
