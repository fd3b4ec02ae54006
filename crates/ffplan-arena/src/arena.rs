//! The [`StateArena`] bump allocator.

use ffplan_core::{StateId, StateLayout};

use crate::config::ArenaConfig;
use crate::error::ArenaError;

/// Fixed-capacity, stack-discipline allocator for state records.
///
/// Every record is `layout.record_words()` words: the fact bitset followed
/// by the heuristic slot. Allocation only happens at the top and memory is
/// only reclaimed from the top, so `used_words()` is always a multiple of
/// the record width and every id below `len()` refers to a record that no
/// rollback has touched since it was written.
///
/// The backing block is reserved once at construction and released on
/// drop.
pub struct StateArena {
    /// Backing storage, allocated to full capacity at creation.
    data: Vec<u64>,
    layout: StateLayout,
    /// High-water mark in words.
    used: usize,
    /// Running count of successful allocations, never decremented.
    allocations: u64,
}

impl StateArena {
    /// Reserve an arena for records of `layout`.
    ///
    /// The block is trimmed down to a whole number of records. Fails with
    /// [`ArenaError::CapacityTooSmall`] if not even one record fits, or
    /// [`ArenaError::AllocationFailed`] if the memory cannot be reserved.
    pub fn new(layout: StateLayout, config: &ArenaConfig) -> Result<Self, ArenaError> {
        config.validate(layout)?;
        let words = config.slot_count(layout) * layout.record_words();
        let mut data = Vec::new();
        data.try_reserve_exact(words)
            .map_err(|_| ArenaError::AllocationFailed {
                requested: words.saturating_mul(std::mem::size_of::<u64>()),
            })?;
        data.resize(words, 0);
        Ok(Self {
            data,
            layout,
            used: 0,
            allocations: 0,
        })
    }

    /// Bump-allocate one zeroed record.
    ///
    /// Returns [`ArenaError::Exhausted`] when no slot is left.
    pub fn allocate(&mut self) -> Result<StateId, ArenaError> {
        let width = self.layout.record_words();
        let start = self.used;
        let end = start + width;
        if end > self.data.len() {
            return Err(ArenaError::Exhausted {
                capacity_words: self.data.len(),
                record_words: width,
            });
        }
        // Slots above the mark may hold data from rolled-back states.
        self.data[start..end].fill(0);
        self.used = end;
        self.allocations += 1;
        Ok(StateId((start / width) as u32))
    }

    /// Allocate a record whose bitset is a copy of `bits`.
    pub fn push_copy(&mut self, bits: &[u64]) -> Result<StateId, ArenaError> {
        let id = self.allocate()?;
        self.bits_mut(id).copy_from_slice(bits);
        Ok(id)
    }

    /// Allocate a record and fill its bitset from an existing one.
    ///
    /// `fill` receives the bitset of `parent` and the zeroed bitset of the
    /// new record. On error nothing is allocated and `fill` is not called.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not a live record.
    pub fn allocate_from<F>(&mut self, parent: StateId, fill: F) -> Result<StateId, ArenaError>
    where
        F: FnOnce(&[u64], &mut [u64]),
    {
        assert!(parent.index() < self.len(), "parent {parent} is not live");
        let child = self.allocate()?;
        let width = self.layout.record_words();
        let words = self.layout.state_words();
        let (below, above) = self.data.split_at_mut(child.index() * width);
        let parent_start = parent.index() * width;
        fill(&below[parent_start..parent_start + words], &mut above[..words]);
        Ok(child)
    }

    /// Retract the mark by one record. No-op if the arena is empty.
    pub fn pop_one(&mut self) {
        self.used = self.used.saturating_sub(self.layout.record_words());
    }

    /// Retract the mark by `n` records, or to zero if fewer are live.
    ///
    /// Returns the number of records actually discarded.
    pub fn pop_n(&mut self, n: usize) -> usize {
        let popped = n.min(self.len());
        self.used -= popped * self.layout.record_words();
        popped
    }

    /// The record starting at `word_offset` from the arena base.
    ///
    /// # Panics
    ///
    /// Panics if the offset is not on a record boundary or not below
    /// `used_words()`.
    pub fn get(&self, word_offset: usize) -> &[u64] {
        let width = self.layout.record_words();
        assert!(
            word_offset % width == 0,
            "offset {word_offset} is not a multiple of the record width {width}"
        );
        assert!(word_offset < self.used, "offset {word_offset} is above the mark");
        &self.data[word_offset..word_offset + width]
    }

    /// Word offset of a record from the arena base.
    #[inline]
    pub fn offset_of(&self, id: StateId) -> usize {
        id.index() * self.layout.record_words()
    }

    /// The id of the record at a word offset.
    #[inline]
    pub fn id_at(&self, word_offset: usize) -> StateId {
        StateId((word_offset / self.layout.record_words()) as u32)
    }

    /// Full record (bitset plus heuristic slot) of a live state.
    pub fn record(&self, id: StateId) -> &[u64] {
        self.get(self.offset_of(id))
    }

    /// Mutable full record of a live state.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not live.
    pub fn record_mut(&mut self, id: StateId) -> &mut [u64] {
        assert!(id.index() < self.len(), "state {id} is not live");
        let start = self.offset_of(id);
        let width = self.layout.record_words();
        &mut self.data[start..start + width]
    }

    /// Fact bitset of a live state.
    pub fn bits(&self, id: StateId) -> &[u64] {
        &self.record(id)[..self.layout.state_words()]
    }

    /// Mutable fact bitset of a live state.
    pub fn bits_mut(&mut self, id: StateId) -> &mut [u64] {
        let words = self.layout.state_words();
        &mut self.record_mut(id)[..words]
    }

    /// Heuristic value stored in a state's slot.
    pub fn heuristic(&self, id: StateId) -> u64 {
        self.record(id)[self.layout.heuristic_slot()]
    }

    /// Store a heuristic value in a state's slot.
    pub fn set_heuristic(&mut self, id: StateId, h: u64) {
        let slot = self.layout.heuristic_slot();
        self.record_mut(id)[slot] = h;
    }

    /// The most recently allocated live record.
    pub fn last(&self) -> Option<StateId> {
        self.len().checked_sub(1).map(|i| StateId(i as u32))
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.used / self.layout.record_words()
    }

    /// Returns `true` if no record is live.
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Occupied words (the `size` mark).
    pub fn used_words(&self) -> usize {
        self.used
    }

    /// Usable capacity in words, a whole number of records.
    pub fn capacity_words(&self) -> usize {
        self.data.len()
    }

    /// Record geometry.
    pub fn layout(&self) -> StateLayout {
        self.layout
    }

    /// Successful allocations since creation, rollbacks included.
    pub fn allocations(&self) -> u64 {
        self.allocations
    }

    /// Memory usage of the backing storage in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<u64>()
    }
}
