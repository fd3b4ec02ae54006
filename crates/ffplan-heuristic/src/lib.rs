//! The FF heuristic: relaxed planning graph construction and relaxed
//! plan extraction.
//!
//! [`FfHeuristic`] owns the per-call scratch buffers (relaxed fact sets,
//! the [`RelaxedGraph`](ffplan_core::RelaxedGraph) tables, the marked-fact
//! set) so a search can score millions of states without reallocating.
//! Every call starts from a reset graph; nothing carries over between
//! states.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod ff;

pub use ff::{FfHeuristic, HeuristicStatus};
