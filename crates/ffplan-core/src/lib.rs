//! Core types and traits for the ffplan planner.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the abstractions shared by the arena, the heuristic engine and the
//! search drivers: typed ids, the state record layout, fact bitsets,
//! the [`Domain`] / [`RelaxedDomain`] traits through which a grounded
//! task is consumed, and the per-call [`RelaxedGraph`] buffers.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bits;
pub mod domain;
pub mod id;
pub mod layout;
pub mod relaxed;

pub use bits::FactSet;
pub use domain::{Domain, RelaxedDomain};
pub use id::{ActionId, FactId, FactList, StateId};
pub use layout::{StateLayout, H_INFINITY};
pub use relaxed::RelaxedGraph;
