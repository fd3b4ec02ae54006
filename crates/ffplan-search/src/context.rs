//! Per-run search state shared by both drivers.

use ffplan_arena::{ArenaConfig, ArenaError, StateArena};
use ffplan_core::{ActionId, RelaxedDomain, StateId};
use ffplan_heuristic::FfHeuristic;

use crate::error::SearchError;
use crate::path::PathMap;
use crate::visited::VisitedSet;

/// Everything a run owns besides the driver's own queue or trace.
///
/// Created when a driver is built and dropped with it; nothing lives in
/// globals. [`reset`](Self::reset) empties it for another run while
/// keeping its allocations.
pub struct SearchContext<'d, D: RelaxedDomain + ?Sized> {
    domain: &'d D,
    arena: StateArena,
    visited: VisitedSet,
    paths: PathMap,
    heuristic: FfHeuristic,
}

impl<'d, D: RelaxedDomain + ?Sized> SearchContext<'d, D> {
    /// Size an arena for `domain` and set up empty bookkeeping.
    pub fn new(domain: &'d D, arena: &ArenaConfig) -> Result<Self, SearchError> {
        let layout = domain.layout();
        Ok(Self {
            domain,
            arena: StateArena::new(layout, arena)?,
            visited: VisitedSet::new(layout),
            paths: PathMap::new(),
            heuristic: FfHeuristic::new(domain),
        })
    }

    /// Empty the arena, visited set and path map.
    pub fn reset(&mut self) {
        self.arena.pop_n(self.arena.len());
        self.visited.clear();
        self.paths.clear();
    }

    /// Copy the initial state into the arena, score it and register it
    /// as the path root.
    pub fn push_root(&mut self) -> Result<StateId, ArenaError> {
        let root = self.arena.push_copy(self.domain.initial_state())?;
        self.evaluate(root);
        self.paths.record_root(root);
        Ok(root)
    }

    /// Allocate the successor of `parent` under `action`.
    ///
    /// The new record's heuristic slot is zero until [`evaluate`](Self::evaluate).
    pub fn derive(&mut self, parent: StateId, action: ActionId) -> Result<StateId, ArenaError> {
        let domain = self.domain;
        self.arena
            .allocate_from(parent, |from, to| domain.apply_effects(from, action, to))
    }

    /// Score a live state and store the estimate in its heuristic slot.
    pub fn evaluate(&mut self, id: StateId) -> u64 {
        self.heuristic
            .evaluate_record(self.domain, self.arena.record_mut(id))
    }

    /// Record a live state as expanded. Returns `false` if an equal state
    /// already was.
    pub fn mark_visited(&mut self, id: StateId) -> bool {
        self.visited.insert(self.arena.bits(id))
    }

    /// Whether a state equal to the live state `id` was expanded.
    pub fn is_visited(&self, id: StateId) -> bool {
        self.visited.contains(self.arena.bits(id))
    }

    /// Whether a live state satisfies the goal.
    pub fn is_goal(&self, id: StateId) -> bool {
        self.domain.is_goal(self.arena.bits(id))
    }

    /// The task being searched.
    pub fn domain(&self) -> &'d D {
        self.domain
    }

    /// State storage.
    pub fn arena(&self) -> &StateArena {
        &self.arena
    }

    /// Mutable state storage.
    pub fn arena_mut(&mut self) -> &mut StateArena {
        &mut self.arena
    }

    /// Expanded-state digests.
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Parent links.
    pub fn paths(&self) -> &PathMap {
        &self.paths
    }

    /// Mutable parent links.
    pub fn paths_mut(&mut self) -> &mut PathMap {
        &mut self.paths
    }

    /// The heuristic engine.
    pub fn heuristic(&self) -> &FfHeuristic {
        &self.heuristic
    }
}
