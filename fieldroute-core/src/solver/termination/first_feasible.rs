use super::*;

/// Terminates as soon as the best known solution is feasible.
#[derive(Default)]
pub struct FirstFeasible;

impl Termination for FirstFeasible {
    fn is_termination(&self, progress: &SearchProgress) -> bool {
        progress.best_score.is_feasible()
    }

    fn estimate(&self, progress: &SearchProgress) -> f64 {
        if progress.best_score.is_feasible() { 1. } else { 0. }
    }
}
