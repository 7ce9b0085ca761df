#[cfg(test)]
#[path = "../../../tests/unit/models/common/primitives_test.rs"]
mod primitives_test;

use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Milliseconds since unix epoch.
pub type Timestamp = i64;

/// A time span in milliseconds.
pub type Duration = i64;

/// Money in USD mills (a tenth of a cent).
pub type Mills = i64;

pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MILLS_PER_CENT: i64 = 10;
pub const METERS_PER_KILOMETER: i64 = 1_000;

/// A travel distance between two locations: time needed and meters covered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Distance {
    /// Travel duration.
    pub duration: Duration,
    /// Travel length in meters.
    pub meters: i64,
}

impl Distance {
    pub const ZERO: Distance = Distance { duration: 0, meters: 0 };

    /// Creates a new instance of [`Distance`].
    pub fn new(duration: Duration, meters: i64) -> Self {
        Self { duration, meters }
    }
}

impl Add for Distance {
    type Output = Distance;

    fn add(self, rhs: Self) -> Self::Output {
        Distance { duration: self.duration + rhs.duration, meters: self.meters + rhs.meters }
    }
}

impl AddAssign for Distance {
    fn add_assign(&mut self, rhs: Self) {
        self.duration += rhs.duration;
        self.meters += rhs.meters;
    }
}

impl Sum for Distance {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Distance::ZERO, |acc, item| acc + item)
    }
}
