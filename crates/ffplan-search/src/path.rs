//! Parent links for plan reconstruction.

use rustc_hash::FxHashMap;

use ffplan_core::{ActionId, StateId};

/// How a state was first reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathInfo {
    /// Predecessor, `None` for the initial state.
    pub parent: Option<StateId>,
    /// Action applied to the predecessor, `None` for the initial state.
    pub action: Option<ActionId>,
}

/// `StateId -> PathInfo` for every state admitted to the frontier.
#[derive(Debug, Default)]
pub struct PathMap {
    entries: FxHashMap<StateId, PathInfo>,
}

impl PathMap {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the initial state.
    pub fn record_root(&mut self, root: StateId) {
        self.entries.insert(
            root,
            PathInfo {
                parent: None,
                action: None,
            },
        );
    }

    /// Register `child` as reached from `parent` by `action`.
    pub fn record(&mut self, child: StateId, parent: StateId, action: ActionId) {
        // Arena slots grow upwards, so parents always precede children.
        debug_assert!(parent < child);
        self.entries.insert(
            child,
            PathInfo {
                parent: Some(parent),
                action: Some(action),
            },
        );
    }

    /// Entry of a state, if recorded.
    pub fn get(&self, id: StateId) -> Option<PathInfo> {
        self.entries.get(&id).copied()
    }

    /// Actions leading from the root to `goal`, in execution order.
    ///
    /// # Panics
    ///
    /// Panics if a state on the way has no entry.
    pub fn reconstruct(&self, goal: StateId) -> Vec<ActionId> {
        let mut actions = Vec::new();
        let mut current = goal;
        loop {
            let info = self
                .get(current)
                .unwrap_or_else(|| panic!("state {current} has no path entry"));
            match (info.parent, info.action) {
                (Some(parent), Some(action)) => {
                    actions.push(action);
                    current = parent;
                }
                _ => break,
            }
        }
        actions.reverse();
        actions
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
