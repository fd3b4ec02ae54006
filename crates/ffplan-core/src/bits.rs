//! Fact bitsets: the [`FactSet`] type and helpers over raw state words.
//!
//! Search states live in arena records as bare `&[u64]` slices, so the
//! free functions here operate on word slices directly. [`FactSet`] is the
//! owned, fixed-width variant used for relaxed states and goal masks.

use crate::id::FactId;

const BITS_PER_WORD: usize = 64;

#[inline]
fn split(fact: FactId) -> (usize, u64) {
    let i = fact.index();
    (i / BITS_PER_WORD, 1u64 << (i % BITS_PER_WORD))
}

/// Whether `fact` is set in `words`. Facts beyond the slice read as unset.
#[inline]
pub fn test_bit(words: &[u64], fact: FactId) -> bool {
    let (word, mask) = split(fact);
    words.get(word).is_some_and(|w| w & mask != 0)
}

/// Set `fact` in `words`.
///
/// # Panics
///
/// Panics if `fact` lies beyond the slice.
#[inline]
pub fn set_bit(words: &mut [u64], fact: FactId) {
    let (word, mask) = split(fact);
    words[word] |= mask;
}

/// Clear `fact` in `words`.
///
/// # Panics
///
/// Panics if `fact` lies beyond the slice.
#[inline]
pub fn clear_bit(words: &mut [u64], fact: FactId) {
    let (word, mask) = split(fact);
    words[word] &= !mask;
}

/// Whether every bit of `mask` is also set in `words` (`words & mask == mask`).
#[inline]
pub fn contains_all(words: &[u64], mask: &[u64]) -> bool {
    mask.iter()
        .enumerate()
        .all(|(i, &m)| words.get(i).copied().unwrap_or(0) & m == m)
}

/// Iterate the facts set in `words`, in ascending order.
pub fn iter_set(words: &[u64]) -> BitIter<'_> {
    BitIter {
        words,
        word_idx: 0,
        current: words.first().copied().unwrap_or(0),
    }
}

/// A fixed-width set of facts.
///
/// The width (in words) is chosen at construction and never changes, so
/// two sets built for the same task compare word by word.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FactSet {
    words: Vec<u64>,
}

impl FactSet {
    /// An empty set `words` words wide.
    pub fn with_words(words: usize) -> Self {
        Self {
            words: vec![0; words],
        }
    }

    /// A set holding exactly the given words.
    pub fn from_words(words: Vec<u64>) -> Self {
        Self { words }
    }

    /// A set `words` words wide containing `facts`.
    ///
    /// # Panics
    ///
    /// Panics if a fact does not fit in the width.
    pub fn from_facts<I: IntoIterator<Item = FactId>>(words: usize, facts: I) -> Self {
        let mut set = Self::with_words(words);
        for fact in facts {
            set.insert(fact);
        }
        set
    }

    /// Insert a fact. Returns `true` if it was not already present.
    pub fn insert(&mut self, fact: FactId) -> bool {
        let (word, mask) = split(fact);
        let fresh = self.words[word] & mask == 0;
        self.words[word] |= mask;
        fresh
    }

    /// Remove a fact.
    pub fn remove(&mut self, fact: FactId) {
        clear_bit(&mut self.words, fact);
    }

    /// Check whether the set contains a fact.
    pub fn contains(&self, fact: FactId) -> bool {
        test_bit(&self.words, fact)
    }

    /// Check whether every fact of `other` is in `self`.
    pub fn is_superset(&self, other: &Self) -> bool {
        contains_all(&self.words, &other.words)
    }

    /// Remove every fact, keeping the width.
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Overwrite this set with `other`, which must have the same width.
    pub fn copy_from(&mut self, other: &Self) {
        self.words.copy_from_slice(&other.words);
    }

    /// Add every fact of a raw word slice (`self |= words`).
    pub fn union_words(&mut self, words: &[u64]) {
        for (dst, &src) in self.words.iter_mut().zip(words) {
            *dst |= src;
        }
    }

    /// The backing words.
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Mutable access to the backing words.
    pub fn words_mut(&mut self) -> &mut [u64] {
        &mut self.words
    }

    /// Width in words.
    pub fn width(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the set contains no facts.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Returns the number of facts in the set.
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Iterate over the facts in the set, in ascending order.
    pub fn iter(&self) -> BitIter<'_> {
        iter_set(&self.words)
    }
}

impl<'a> IntoIterator for &'a FactSet {
    type Item = FactId;
    type IntoIter = BitIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the facts set in a word slice, in ascending order.
pub struct BitIter<'a> {
    words: &'a [u64],
    word_idx: usize,
    current: u64,
}

impl Iterator for BitIter<'_> {
    type Item = FactId;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current != 0 {
                let bit = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1;
                return Some(FactId((self.word_idx * BITS_PER_WORD + bit) as u32));
            }
            self.word_idx += 1;
            self.current = *self.words.get(self.word_idx)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_reports_freshness() {
        let mut set = FactSet::with_words(2);
        assert!(set.insert(FactId(70)));
        assert!(!set.insert(FactId(70)));
        assert!(set.contains(FactId(70)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn remove_and_clear() {
        let mut set = FactSet::from_facts(1, [FactId(1), FactId(5)]);
        set.remove(FactId(1));
        assert!(!set.contains(FactId(1)));
        assert!(set.contains(FactId(5)));
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.width(), 1);
    }

    #[test]
    fn iter_crosses_word_boundaries() {
        let set = FactSet::from_facts(3, [FactId(0), FactId(63), FactId(64), FactId(150)]);
        let facts: Vec<_> = set.iter().collect();
        assert_eq!(facts, vec![FactId(0), FactId(63), FactId(64), FactId(150)]);
    }

    #[test]
    fn iter_skips_empty_words() {
        let words = [0u64, 0, 1 << 3];
        let facts: Vec<_> = iter_set(&words).collect();
        assert_eq!(facts, vec![FactId(131)]);
    }

    #[test]
    fn superset_checks_every_word() {
        let big = FactSet::from_facts(2, [FactId(2), FactId(66), FactId(70)]);
        let small = FactSet::from_facts(2, [FactId(66), FactId(2)]);
        assert!(big.is_superset(&small));
        assert!(!small.is_superset(&big));
    }

    #[test]
    fn raw_bit_helpers() {
        let mut words = [0u64; 2];
        set_bit(&mut words, FactId(65));
        assert!(test_bit(&words, FactId(65)));
        assert!(!test_bit(&words, FactId(64)));
        assert!(!test_bit(&words, FactId(500)));
        clear_bit(&mut words, FactId(65));
        assert_eq!(words, [0, 0]);
    }

    #[test]
    fn contains_all_treats_missing_words_as_zero() {
        assert!(contains_all(&[0b110], &[0b010, 0]));
        assert!(!contains_all(&[0b110], &[0b010, 1]));
    }

    #[test]
    fn union_words_merges() {
        let mut set = FactSet::from_facts(1, [FactId(0)]);
        set.union_words(&[0b100]);
        assert_eq!(set.words(), &[0b101]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn iter_yields_exactly_inserted(
                facts in proptest::collection::btree_set(0u32..256, 0..40),
            ) {
                let set = FactSet::from_facts(4, facts.iter().map(|&f| FactId(f)));
                let back: Vec<u32> = set.iter().map(|f| f.0).collect();
                let expected: Vec<u32> = facts.into_iter().collect();
                prop_assert_eq!(back, expected);
            }
        }
    }
}
