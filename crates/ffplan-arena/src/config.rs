//! Arena configuration parameters.

use ffplan_core::StateLayout;

use crate::error::ArenaError;

/// Configuration for the state arena.
///
/// The arena never grows: `capacity_words` is reserved up front and is a
/// hard limit on the number of live states.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Size of the backing block in `u64` words (`STORAGE_LENGTH`).
    ///
    /// Default: 16_777_216 (128MB at 8 bytes per word).
    pub capacity_words: usize,
}

impl ArenaConfig {
    /// Default capacity: 128MB / 8 bytes = 16M words.
    pub const DEFAULT_CAPACITY_WORDS: usize = 16_777_216;

    /// Configuration with an explicit capacity in words.
    pub fn new(capacity_words: usize) -> Self {
        Self { capacity_words }
    }

    /// Configuration sized to hold exactly `states` records of `layout`.
    pub fn for_states(layout: StateLayout, states: usize) -> Self {
        Self::new(states.saturating_mul(layout.record_words()))
    }

    /// Number of whole records of `layout` that fit.
    ///
    /// Clamped to `u32::MAX`, the largest addressable slot count.
    pub fn slot_count(&self, layout: StateLayout) -> usize {
        (self.capacity_words / layout.record_words()).min(u32::MAX as usize)
    }

    /// Check that at least one record of `layout` fits.
    pub fn validate(&self, layout: StateLayout) -> Result<(), ArenaError> {
        if self.slot_count(layout) == 0 {
            return Err(ArenaError::CapacityTooSmall {
                capacity_words: self.capacity_words,
                record_words: layout.record_words(),
            });
        }
        Ok(())
    }

    /// Capacity of the backing block in bytes.
    pub fn capacity_bytes(&self) -> usize {
        self.capacity_words.saturating_mul(std::mem::size_of::<u64>())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY_WORDS)
    }
}
