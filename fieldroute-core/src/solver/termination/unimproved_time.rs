use super::*;

/// Terminates when the best score has not improved for given time.
pub struct UnimprovedTime {
    limit_in_millis: u128,
}

impl UnimprovedTime {
    /// Creates a new instance of `UnimprovedTime`.
    pub fn new(limit_in_millis: u64) -> Self {
        Self { limit_in_millis: limit_in_millis as u128 }
    }
}

impl Termination for UnimprovedTime {
    fn is_termination(&self, progress: &SearchProgress) -> bool {
        progress.unimproved_millis() >= self.limit_in_millis
    }

    fn estimate(&self, progress: &SearchProgress) -> f64 {
        if self.limit_in_millis == 0 {
            return 1.;
        }

        (progress.unimproved_millis() as f64 / self.limit_in_millis as f64).min(1.)
    }
}
