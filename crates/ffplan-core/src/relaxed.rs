//! Buffers of a relaxed planning graph.
//!
//! A [`RelaxedGraph`] is rebuilt from scratch on every heuristic call.
//! The value itself is long-lived so its allocations are reused, but
//! [`reset`](RelaxedGraph::reset) wipes every table before a new build.
//!
//! Layer numbering: facts of the evaluated state are at layer 0. Building
//! layer `l` applies actions whose preconditions hold at layer `l` and
//! records the facts they newly add at layer `l + 1`. Goal layer `i`
//! (see [`goal_layer`](RelaxedGraph::goal_layer)) therefore lists goal
//! facts first reached at graph layer `i + 1`.

use crate::id::{ActionId, FactId};

/// Per-call tables of the relaxed planning graph.
#[derive(Clone, Debug, Default)]
pub struct RelaxedGraph {
    fact_membership: Vec<Option<u32>>,
    action_membership: Vec<Option<u32>>,
    achieving_action: Vec<Option<ActionId>>,
    goal_layers: Vec<Vec<FactId>>,
    depth: usize,
}

impl RelaxedGraph {
    /// An empty graph for a task with the given fact and action counts.
    pub fn new(fact_count: usize, action_count: usize) -> Self {
        let mut graph = Self::default();
        graph.reset(fact_count, action_count);
        graph
    }

    /// Forget everything from the previous build.
    pub fn reset(&mut self, fact_count: usize, action_count: usize) {
        self.fact_membership.clear();
        self.fact_membership.resize(fact_count, None);
        self.action_membership.clear();
        self.action_membership.resize(action_count, None);
        self.achieving_action.clear();
        self.achieving_action.resize(fact_count, None);
        for layer in &mut self.goal_layers[..self.depth] {
            layer.clear();
        }
        self.depth = 0;
    }

    /// Earliest layer at which `fact` is true, `None` if never reached.
    #[inline]
    pub fn fact_layer(&self, fact: FactId) -> Option<u32> {
        self.fact_membership[fact.index()]
    }

    /// Record `fact` as true from `layer` on.
    #[inline]
    pub fn set_fact_layer(&mut self, fact: FactId, layer: u32) {
        self.fact_membership[fact.index()] = Some(layer);
    }

    /// Earliest layer at which `action` is applicable, `None` if never.
    #[inline]
    pub fn action_layer(&self, action: ActionId) -> Option<u32> {
        self.action_membership[action.index()]
    }

    /// Record `action` as applicable from `layer` on.
    #[inline]
    pub fn set_action_layer(&mut self, action: ActionId, layer: u32) {
        self.action_membership[action.index()] = Some(layer);
    }

    /// The action credited with first making `fact` true.
    #[inline]
    pub fn achiever(&self, fact: FactId) -> Option<ActionId> {
        self.achieving_action[fact.index()]
    }

    /// Credit `action` with first making `fact` true.
    #[inline]
    pub fn set_achiever(&mut self, fact: FactId, action: ActionId) {
        self.achieving_action[fact.index()] = Some(action);
    }

    /// Open a new, empty goal layer and return it.
    pub fn push_goal_layer(&mut self) -> &mut Vec<FactId> {
        if self.depth == self.goal_layers.len() {
            self.goal_layers.push(Vec::new());
        }
        self.depth += 1;
        &mut self.goal_layers[self.depth - 1]
    }

    /// Number of goal layers built so far.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Goal facts first reached at graph layer `index + 1`.
    pub fn goal_layer(&self, index: usize) -> &[FactId] {
        &self.goal_layers[..self.depth][index]
    }

    /// Mutable access to goal layer `index`.
    pub fn goal_layer_mut(&mut self, index: usize) -> &mut Vec<FactId> {
        &mut self.goal_layers[..self.depth][index]
    }

    /// Move goal layer `index` out, leaving an empty vector behind.
    ///
    /// Used by relaxed-plan extraction, which walks one layer while
    /// appending to lower ones. Hand the vector back with
    /// [`restore_goal_layer`](Self::restore_goal_layer) to keep its
    /// allocation.
    pub fn take_goal_layer(&mut self, index: usize) -> Vec<FactId> {
        std::mem::take(self.goal_layer_mut(index))
    }

    /// Put a layer taken with [`take_goal_layer`](Self::take_goal_layer) back.
    pub fn restore_goal_layer(&mut self, index: usize, layer: Vec<FactId>) {
        *self.goal_layer_mut(index) = layer;
    }

    /// Number of facts this graph was sized for.
    pub fn fact_count(&self) -> usize {
        self.fact_membership.len()
    }

    /// Number of actions this graph was sized for.
    pub fn action_count(&self) -> usize {
        self.action_membership.len()
    }
}
