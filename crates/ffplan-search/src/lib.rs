//! Search drivers for ffplan.
//!
//! Two drivers share one [`SearchContext`] (arena, visited set, path map
//! and heuristic engine):
//!
//! - [`BestFirstSearch`]: greedy best-first search ordered by the FF
//!   estimate alone. Complete on finite tasks, not optimal.
//! - [`SimulatedAnnealing`]: a random walk over action sequences that can
//!   jump back to earlier states of its own trace, accepting worse moves
//!   with a temperature-controlled probability.
//!
//! Both return `Ok(`[`SearchOutcome`]`)` for every normal ending (plan
//! found, space exhausted, timeout, temperature floor) and reserve
//! [`SearchError`] for resource failures.
//!
//! ```
//! use ffplan_arena::ArenaConfig;
//! use ffplan_search::{BestFirstSearch, SearchConfig, SearchOutcome};
//! use ffplan_task::StripsTask;
//!
//! let task = StripsTask::from_json_str(r#"{
//!     "facts": ["A", "B", "C"],
//!     "actions": [
//!         {"name": "act1", "pre": ["A"], "add": ["B"]},
//!         {"name": "act2", "pre": ["B"], "add": ["C"]}
//!     ],
//!     "initial": ["A"],
//!     "goal": ["C"]
//! }"#).unwrap();
//!
//! let mut search = BestFirstSearch::new(
//!     &task,
//!     &ArenaConfig::new(1024),
//!     SearchConfig::default(),
//! ).unwrap();
//! match search.run().unwrap() {
//!     SearchOutcome::Solved(plan) => assert_eq!(plan.len(), 2),
//!     other => panic!("unexpected outcome {other:?}"),
//! }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod anneal;
pub mod config;
pub mod context;
pub mod error;
pub mod gbfs;
pub mod hash;
pub mod outcome;
pub mod path;
pub mod visited;

pub use anneal::SimulatedAnnealing;
pub use config::{AnnealConfig, ConfigError, SearchConfig};
pub use context::SearchContext;
pub use error::SearchError;
pub use gbfs::BestFirstSearch;
pub use outcome::{AnnealStats, Plan, SearchOutcome, SearchStats};
pub use path::{PathInfo, PathMap};
pub use visited::VisitedSet;
