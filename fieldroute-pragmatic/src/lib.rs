//! Pragmatic crate exposes field service routing through a json friendly **pragmatic** format:
//!
//! - `format::problem` reads a solve request, validates it and builds a route graph with scoring configuration;
//! - `format::solution` writes a route graph back into the request shape with routes, stats and score filled in;
//! - `assignability` answers whether visits and shift teams are compatible without building a graph;
//! - `solve` runs a search over the graph and streams intermediate snapshots.
//!

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

#[cfg(test)]
#[path = "../tests/features/mod.rs"]
pub mod features;

mod utils;
mod validation;

pub mod assignability;
pub mod format;

mod solve;
pub use self::solve::{solve, solve_with_snapshots};
