//! Digest set of states already expanded.

use rustc_hash::FxHashSet;

use ffplan_core::StateLayout;

use crate::hash::state_digest;

/// Remembers states by the digest of their bitset.
///
/// Both methods accept either a bare bitset or a full arena record; only
/// the first `state_words()` words are hashed, so the heuristic slot
/// never affects membership.
#[derive(Debug)]
pub struct VisitedSet {
    digests: FxHashSet<u64>,
    state_words: usize,
}

impl VisitedSet {
    /// Empty set for states of `layout`.
    pub fn new(layout: StateLayout) -> Self {
        Self {
            digests: FxHashSet::default(),
            state_words: layout.state_words(),
        }
    }

    /// Record a state. Returns `false` if it was already present.
    pub fn insert(&mut self, state: &[u64]) -> bool {
        self.digests.insert(self.digest(state))
    }

    /// Whether a state was recorded.
    pub fn contains(&self, state: &[u64]) -> bool {
        self.digests.contains(&self.digest(state))
    }

    fn digest(&self, state: &[u64]) -> u64 {
        debug_assert!(state.len() >= self.state_words);
        state_digest(&state[..self.state_words])
    }

    /// Number of distinct digests.
    pub fn len(&self) -> usize {
        self.digests.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }

    /// Forget every state.
    pub fn clear(&mut self) {
        self.digests.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_contains() {
        let mut v = VisitedSet::new(StateLayout::new(2));
        assert!(!v.contains(&[1, 2]));
        assert!(v.insert(&[1, 2]));
        assert!(v.contains(&[1, 2]));
        assert!(!v.insert(&[1, 2]));
        assert_eq!(v.len(), 1);
    }

    #[test]
    fn heuristic_slot_is_ignored() {
        let mut v = VisitedSet::new(StateLayout::new(2));
        v.insert(&[5, 6, 100]);
        assert!(v.contains(&[5, 6]));
        assert!(v.contains(&[5, 6, 7]));
        assert!(!v.contains(&[5, 7, 100]));
    }

    #[test]
    fn clear_forgets() {
        let mut v = VisitedSet::new(StateLayout::new(1));
        v.insert(&[3]);
        v.clear();
        assert!(v.is_empty());
        assert!(!v.contains(&[3]));
    }
}
