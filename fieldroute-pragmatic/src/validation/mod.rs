//! This module provides functionality to validate problem description for logical correctness.

#[cfg(test)]
#[path = "../../tests/unit/validation/validation_test.rs"]
mod validation_test;

use crate::format::FormatError;
use crate::format::problem::*;
use crate::utils::join_ids;
use rustc_hash::FxHashSet;

mod locations;
use self::locations::validate_locations;

mod rest_breaks;
use self::rest_breaks::validate_rest_breaks;

mod shift_teams;
use self::shift_teams::validate_shift_teams;

mod visits;
use self::visits::validate_visits;

/// Keeps a problem description with indices of known ids.
pub struct ValidationContext<'a> {
    pub description: &'a Description,
    location_ids: FxHashSet<i64>,
    visit_ids: FxHashSet<i64>,
    rest_break_ids: FxHashSet<i64>,
    shift_team_ids: FxHashSet<i64>,
}

impl<'a> ValidationContext<'a> {
    /// Creates an instance of `ValidationContext`.
    pub fn new(description: &'a Description) -> Self {
        Self {
            description,
            location_ids: description.locations.iter().map(|location| location.id).collect(),
            visit_ids: description.visits.iter().map(|visit| visit.id).collect(),
            rest_break_ids: description.rest_breaks.iter().map(|rest_break| rest_break.id).collect(),
            shift_team_ids: description.shift_teams.iter().map(|team| team.id).collect(),
        }
    }

    /// Validates description on set of rules and returns all found errors.
    pub fn validate(&self) -> Result<(), Vec<FormatError>> {
        let errors = [
            validate_locations(self),
            validate_visits(self),
            validate_shift_teams(self),
            validate_rest_breaks(self),
        ]
        .into_iter()
        .filter_map(Result::err)
        .flatten()
        .collect::<Vec<_>>();

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    fn visits(&self) -> impl Iterator<Item = &Visit> {
        self.description.visits.iter()
    }

    fn rest_breaks(&self) -> impl Iterator<Item = &RestBreak> {
        self.description.rest_breaks.iter()
    }

    fn shift_teams(&self) -> impl Iterator<Item = &ShiftTeam> {
        self.description.shift_teams.iter()
    }

    fn has_location(&self, id: i64) -> bool {
        self.location_ids.contains(&id)
    }

    fn has_visit(&self, id: i64) -> bool {
        self.visit_ids.contains(&id)
    }

    fn has_rest_break(&self, id: i64) -> bool {
        self.rest_break_ids.contains(&id)
    }

    fn has_shift_team(&self, id: i64) -> bool {
        self.shift_team_ids.contains(&id)
    }
}

/// Creates an error listing offending ids, returns `Ok` when there are none.
fn check_ids<T: ToString>(code: &str, cause: &str, action: &str, ids: &[T]) -> Result<(), FormatError> {
    if ids.is_empty() {
        Ok(())
    } else {
        Err(FormatError::new(code.to_string(), cause.to_string(), format!("{action}: '{}'", join_ids(ids))))
    }
}

fn is_valid_window(window: &TimeWindow) -> bool {
    window.start_timestamp_sec <= window.end_timestamp_sec
}
