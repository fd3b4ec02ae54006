//! Grounded propositional STRIPS tasks.
//!
//! [`StripsTask`] is a data-driven implementation of the
//! [`Domain`](ffplan_core::Domain) and
//! [`RelaxedDomain`](ffplan_core::RelaxedDomain) traits: one state bit per
//! fact, actions with precondition / add / delete lists precomputed into
//! word masks. Tasks are assembled with [`TaskBuilder`] or loaded from a
//! JSON task file (see [`file`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod error;
pub mod file;
pub mod task;

pub use builder::TaskBuilder;
pub use error::TaskError;
pub use file::{ActionDef, TaskFile};
pub use task::{Action, StripsTask};
