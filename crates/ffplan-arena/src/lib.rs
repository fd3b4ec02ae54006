//! Linear state arena for ffplan searches.
//!
//! States are fixed-size records (fact bitset plus one heuristic word)
//! bump-allocated from a single pre-sized block. Memory is only ever
//! reclaimed from the top: the best-first driver rolls back duplicate
//! successors one at a time, the annealing driver discards runs of
//! tentative moves at once.
//!
//! ```text
//! StateArena
//! └── data: Vec<u64> (capacity_words, zeroed at creation)
//!     [ rec 0 | rec 1 | ... | rec last | free ............ ]
//!       <----------- used ----------->
//! ```
//!
//! Records are addressed by [`StateId`](ffplan_core::StateId) (slot
//! index), never by reference, so the search can keep ids in maps and
//! heaps while it keeps mutating the arena.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod config;
pub mod error;

pub use arena::StateArena;
pub use config::ArenaConfig;
pub use error::ArenaError;
