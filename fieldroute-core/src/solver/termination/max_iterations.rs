use super::*;

/// Terminates after given amount of search iterations.
pub struct MaxIterations {
    limit: usize,
}

impl MaxIterations {
    /// Creates a new instance of `MaxIterations`.
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl Termination for MaxIterations {
    fn is_termination(&self, progress: &SearchProgress) -> bool {
        progress.iteration >= self.limit
    }

    fn estimate(&self, progress: &SearchProgress) -> f64 {
        if self.limit == 0 { 1. } else { (progress.iteration as f64 / self.limit as f64).min(1.) }
    }
}
