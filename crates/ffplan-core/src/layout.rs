//! State record layout.
//!
//! A state record is `state_words` words of fact bitset followed by one
//! word holding the state's heuristic value:
//!
//! ```text
//! [ w0 | w1 | ... | w(n-1) | h ]
//!   <-- state_words -->
//!   <------- record_words ------>
//! ```

/// Sentinel heuristic value for states whose relaxed problem is unsolvable.
///
/// Sorts after every finite estimate, so such states sink to the back of
/// a best-first frontier.
pub const H_INFINITY: u64 = u64::MAX;

/// Word geometry of the state records of one task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StateLayout {
    state_words: usize,
}

impl StateLayout {
    const BITS_PER_WORD: usize = 64;

    /// Layout for a bitset of exactly `state_words` words.
    ///
    /// # Panics
    ///
    /// Panics if `state_words` is zero.
    pub fn new(state_words: usize) -> Self {
        assert!(state_words > 0, "a state needs at least one word");
        Self { state_words }
    }

    /// Smallest layout that can hold `fact_count` facts (at least one word).
    pub fn for_facts(fact_count: usize) -> Self {
        Self::new(fact_count.div_ceil(Self::BITS_PER_WORD).max(1))
    }

    /// Number of bitset words (`STATE_LENGTH`).
    #[inline]
    pub fn state_words(&self) -> usize {
        self.state_words
    }

    /// Number of words per arena record, bitset plus heuristic slot
    /// (`STATE_LENGTH_HEU`).
    #[inline]
    pub fn record_words(&self) -> usize {
        self.state_words + 1
    }

    /// Index of the heuristic slot within a record.
    #[inline]
    pub fn heuristic_slot(&self) -> usize {
        self.state_words
    }

    /// Number of facts the bitset can address.
    pub fn fact_capacity(&self) -> usize {
        self.state_words * Self::BITS_PER_WORD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_facts_rounds_up_to_whole_words() {
        assert_eq!(StateLayout::for_facts(1).state_words(), 1);
        assert_eq!(StateLayout::for_facts(64).state_words(), 1);
        assert_eq!(StateLayout::for_facts(65).state_words(), 2);
        assert_eq!(StateLayout::for_facts(200).state_words(), 4);
    }

    #[test]
    fn zero_facts_still_gets_one_word() {
        assert_eq!(StateLayout::for_facts(0).state_words(), 1);
    }

    #[test]
    fn record_has_trailing_heuristic_slot() {
        let layout = StateLayout::new(3);
        assert_eq!(layout.record_words(), 4);
        assert_eq!(layout.heuristic_slot(), 3);
        assert_eq!(layout.fact_capacity(), 192);
    }

    #[test]
    #[should_panic(expected = "at least one word")]
    fn zero_words_rejected() {
        let _ = StateLayout::new(0);
    }
}
