//! ffplan: a classical STRIPS planner.
//!
//! This is the facade crate re-exporting the public API of the ffplan
//! sub-crates. Most users only need this one dependency.
//!
//! # Quick start
//!
//! ```rust
//! use ffplan::prelude::*;
//!
//! let mut b = TaskBuilder::new();
//! let closed = b.fact("closed");
//! let open = b.fact("open");
//! let inside = b.fact("inside");
//! b.action("open-door", [closed], [open], [closed]);
//! b.action("enter", [open], [inside], []);
//! b.initial([closed]).goal([inside]);
//! let task = b.build().unwrap();
//!
//! let mut search = BestFirstSearch::new(
//!     &task,
//!     &ArenaConfig::for_states(task.layout(), 1024),
//!     SearchConfig::default(),
//! )
//! .unwrap();
//! let outcome = search.run().unwrap();
//! let plan = outcome.plan().unwrap();
//! assert_eq!(task.format_plan(plan.actions()), "0 open-door\n1 enter\n");
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `ffplan-core` | Ids, state layout, fact bitsets, domain traits |
//! | [`arena`] | `ffplan-arena` | Linear state arena |
//! | [`heuristic`] | `ffplan-heuristic` | FF relaxed-plan heuristic |
//! | [`task`] | `ffplan-task` | STRIPS task model, builder, JSON files |
//! | [`search`] | `ffplan-search` | Best-first and annealing drivers |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Ids, state layout, fact bitsets and the domain traits (`ffplan-core`).
///
/// Implement [`types::Domain`] and [`types::RelaxedDomain`] to search a
/// task representation other than [`task::StripsTask`].
pub use ffplan_core as types;

/// Linear state storage (`ffplan-arena`).
pub use ffplan_arena as arena;

/// The FF heuristic (`ffplan-heuristic`).
pub use ffplan_heuristic as heuristic;

/// Propositional STRIPS tasks (`ffplan-task`).
///
/// Build tasks with [`task::TaskBuilder`] or load them with
/// [`task::StripsTask::load`].
pub use ffplan_task as task;

/// Search drivers (`ffplan-search`).
pub use ffplan_search as search;

/// Common imports for typical ffplan usage.
///
/// ```rust
/// use ffplan::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use ffplan_core::{ActionId, Domain, FactId, RelaxedDomain, StateId, H_INFINITY};

    // Storage and heuristic
    pub use ffplan_arena::ArenaConfig;
    pub use ffplan_heuristic::FfHeuristic;

    // Tasks
    pub use ffplan_task::{StripsTask, TaskBuilder, TaskError};

    // Search
    pub use ffplan_search::{
        AnnealConfig, BestFirstSearch, Plan, SearchConfig, SearchError, SearchOutcome,
        SimulatedAnnealing,
    };
}
