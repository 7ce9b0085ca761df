//! The termination module contains criteria which define when the search stops.

#[cfg(test)]
#[path = "../../../tests/unit/solver/termination/termination_test.rs"]
mod termination_test;

use crate::solver::SearchProgress;

/// A trait which specifies criteria when search should stop improving the solution.
pub trait Termination: Send {
    /// Returns true if termination condition is met.
    fn is_termination(&self, progress: &SearchProgress) -> bool;

    /// Returns a relative estimation till termination. Value is in the `[0, 1]` range.
    fn estimate(&self, progress: &SearchProgress) -> f64;
}

mod first_feasible;
pub use self::first_feasible::FirstFeasible;

mod max_iterations;
pub use self::max_iterations::MaxIterations;

mod max_time;
pub use self::max_time::MaxTime;

mod unimproved_time;
pub use self::unimproved_time::UnimprovedTime;

/// Encapsulates multiple termination criteria, terminates when any of them does.
pub struct CompositeTermination {
    terminations: Vec<Box<dyn Termination>>,
}

impl CompositeTermination {
    /// Creates a new instance of `CompositeTermination`.
    pub fn new(terminations: Vec<Box<dyn Termination>>) -> Self {
        Self { terminations }
    }
}

impl Termination for CompositeTermination {
    fn is_termination(&self, progress: &SearchProgress) -> bool {
        self.terminations.iter().any(|t| t.is_termination(progress))
    }

    fn estimate(&self, progress: &SearchProgress) -> f64 {
        self.terminations.iter().map(|t| t.estimate(progress)).fold(0., f64::max)
    }
}
