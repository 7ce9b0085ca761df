//! Core crate contains building blocks to schedule field service visits with shift teams:
//!
//! - a **route graph**: an arena of stops linked into one chain per shift team plus a sink vehicle keeping
//!   unassigned stops;
//! - an **incremental schedule propagation** which keeps arrival and capacity values consistent after every
//!   chain mutation;
//! - an **assignability** check of visit requirements against team attributes and availability;
//! - a **multi level score** with structural, per stop, unassigned and monetary levels;
//! - a **search contract** with a seeded reference relocate search and termination policies.
//!
//! A search mutates the graph, calls propagation, then scoring, and accepts or rolls back the mutation.
//!

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

pub mod construction;
pub mod models;
pub mod prelude;
pub mod solver;
pub mod utils;
