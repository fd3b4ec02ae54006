//! Task construction and loading errors.

use std::error::Error;
use std::fmt;

use ffplan_core::FactId;

/// Errors detected while building or loading a task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskError {
    /// The task declares no facts.
    NoFacts,
    /// The goal condition is empty.
    EmptyGoal,
    /// A fact name is declared twice in a task file.
    DuplicateFact {
        /// The repeated name.
        name: String,
    },
    /// Two actions share a name.
    DuplicateAction {
        /// The repeated name.
        name: String,
    },
    /// A task file references an undeclared fact.
    UnknownFact {
        /// The unresolved name.
        name: String,
        /// Where it was referenced (an action name, `initial` or `goal`).
        context: String,
    },
    /// A programmatic fact id is beyond the declared facts.
    FactOutOfRange {
        /// The offending id.
        fact: FactId,
        /// Number of declared facts.
        fact_count: usize,
    },
    /// The task file could not be read.
    Io {
        /// Path that failed.
        path: String,
        /// Underlying I/O error message.
        reason: String,
    },
    /// The task file is not valid JSON for the task schema.
    Parse {
        /// Parser error message.
        reason: String,
    },
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFacts => write!(f, "task declares no facts"),
            Self::EmptyGoal => write!(f, "goal condition is empty"),
            Self::DuplicateFact { name } => write!(f, "fact '{name}' declared twice"),
            Self::DuplicateAction { name } => write!(f, "action '{name}' declared twice"),
            Self::UnknownFact { name, context } => {
                write!(f, "unknown fact '{name}' in {context}")
            }
            Self::FactOutOfRange { fact, fact_count } => {
                write!(f, "fact id {fact} out of range ({fact_count} facts)")
            }
            Self::Io { path, reason } => write!(f, "cannot read task file {path}: {reason}"),
            Self::Parse { reason } => write!(f, "malformed task file: {reason}"),
        }
    }
}

impl Error for TaskError {}

impl From<serde_json::Error> for TaskError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse {
            reason: e.to_string(),
        }
    }
}
