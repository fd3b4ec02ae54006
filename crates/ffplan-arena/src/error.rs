//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The backing block could not be reserved.
    AllocationFailed {
        /// Number of bytes requested.
        requested: usize,
    },
    /// Every slot is in use; no further state can be allocated.
    Exhausted {
        /// Total capacity in words.
        capacity_words: usize,
        /// Width of one record in words.
        record_words: usize,
    },
    /// The configured capacity cannot hold even one record.
    CapacityTooSmall {
        /// Configured capacity in words.
        capacity_words: usize,
        /// Width of one record in words.
        record_words: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { requested } => {
                write!(f, "state storage allocation failed: {requested} bytes")
            }
            Self::Exhausted {
                capacity_words,
                record_words,
            } => {
                write!(
                    f,
                    "state storage is full: {} states of {record_words} words",
                    capacity_words / record_words
                )
            }
            Self::CapacityTooSmall {
                capacity_words,
                record_words,
            } => {
                write!(
                    f,
                    "arena capacity {capacity_words} words cannot hold a {record_words}-word state"
                )
            }
        }
    }
}

impl Error for ArenaError {}
