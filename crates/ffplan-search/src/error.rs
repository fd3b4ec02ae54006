//! Search failures.

use std::error::Error;
use std::fmt;

use ffplan_arena::ArenaError;

use crate::config::ConfigError;

/// Errors that abort a search run.
///
/// Not finding a plan is not an error; see
/// [`SearchOutcome`](crate::SearchOutcome).
#[derive(Clone, Debug, PartialEq)]
pub enum SearchError {
    /// The state arena could not be created or ran out of slots.
    Arena(ArenaError),
    /// The annealing trace reached its configured bound.
    TraceOverflow {
        /// The configured bound.
        max_trace_len: usize,
    },
    /// The driver configuration is invalid.
    Config(ConfigError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arena(e) => write!(f, "arena: {e}"),
            Self::TraceOverflow { max_trace_len } => {
                write!(f, "action trace exceeded {max_trace_len} steps")
            }
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Arena(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::TraceOverflow { .. } => None,
        }
    }
}

impl From<ArenaError> for SearchError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}

impl From<ConfigError> for SearchError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
