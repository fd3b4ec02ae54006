//! Strongly-typed identifiers and the [`FactList`] type alias.

use smallvec::SmallVec;
use std::fmt;

/// Identifies a propositional fact of a grounded task.
///
/// `FactId(n)` is bit `n` of a state bitset: word `n / 64`, bit `n % 64`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FactId(pub u32);

impl FactId {
    /// The fact as a `usize` index into per-fact tables.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for FactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for FactId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a grounded action.
///
/// Actions are registered in task order; `ActionId(n)` is the n-th action.
/// Plans are sequences of `ActionId`s.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(pub u32);

impl ActionId {
    /// The action as a `usize` index into per-action tables.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ActionId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a state record resident in a state arena.
///
/// The id is the record's slot number, i.e. its word offset divided by
/// the record width. It stays valid until the arena is rolled back past
/// it; ids are reused by later allocations after a rollback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub u32);

impl StateId {
    /// The slot number as a `usize`.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Preconditions or effects of one action.
///
/// Uses `SmallVec<[FactId; 4]>` since most grounded actions touch only
/// a handful of facts; larger lists spill to the heap transparently.
pub type FactList = SmallVec<[FactId; 4]>;
