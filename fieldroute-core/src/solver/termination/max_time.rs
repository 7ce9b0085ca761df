use super::*;
use crate::utils::Timer;

/// A termination criteria which is in terminated state when max time elapsed.
pub struct MaxTime {
    start: Timer,
    limit_in_millis: u128,
}

impl MaxTime {
    /// Creates a new instance of `MaxTime`, time is counted from creation.
    pub fn new(limit_in_millis: u64) -> Self {
        Self { start: Timer::start(), limit_in_millis: limit_in_millis as u128 }
    }
}

impl Termination for MaxTime {
    fn is_termination(&self, _: &SearchProgress) -> bool {
        self.start.elapsed_millis() >= self.limit_in_millis
    }

    fn estimate(&self, _: &SearchProgress) -> f64 {
        if self.limit_in_millis == 0 {
            return 1.;
        }

        (self.start.elapsed_millis() as f64 / self.limit_in_millis as f64).min(1.)
    }
}
