//! Decides whether a shift team may serve a visit, independently from route geometry.

#[cfg(test)]
#[path = "../../tests/unit/construction/assignability_test.rs"]
mod assignability_test;

use crate::models::common::TimeWindow;
use crate::models::problem::{AttributeRequirements, AttributeSet};

/// An assignability verdict ordered from the best to the worst.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssignableStatus {
    Assignable,
    /// Only soft preferences are violated, a dispatcher may override.
    OverrideAssignable,
    NotAssignable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeWindowStatus {
    Overlap,
    NoOverlap,
}

/// Attribute mismatches between visit requirements and team attributes, each list sorted by attribute id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeCheck {
    pub missing_required: Vec<String>,
    pub missing_preferred: Vec<String>,
    pub included_forbidden: Vec<String>,
    pub included_unwanted: Vec<String>,
}

impl AttributeCheck {
    /// Compares requirements against team attributes.
    pub fn new(requirements: &AttributeRequirements, attributes: &AttributeSet) -> Self {
        Self {
            missing_required: to_sorted(requirements.required.difference(attributes)),
            missing_preferred: to_sorted(requirements.preferred.difference(attributes)),
            included_forbidden: to_sorted(requirements.forbidden.intersection(attributes)),
            included_unwanted: to_sorted(requirements.unwanted.intersection(attributes)),
        }
    }

    /// Returns total amount of mismatches.
    pub fn problem_count(&self) -> usize {
        self.hard_problem_count() + self.missing_preferred.len() + self.included_unwanted.len()
    }

    /// Returns amount of mismatches which cannot be overridden.
    pub fn hard_problem_count(&self) -> usize {
        self.missing_required.len() + self.included_forbidden.len()
    }

    fn has_soft_problems(&self) -> bool {
        !self.missing_preferred.is_empty() || !self.included_unwanted.is_empty()
    }
}

/// A full assignability answer for one visit and one shift team.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignability {
    pub status: AssignableStatus,
    pub attributes: AttributeCheck,
    pub time_window_status: TimeWindowStatus,
}

/// Checks visit requirements and arrival window against team attributes and availability window.
pub fn check_assignability(
    requirements: &AttributeRequirements,
    arrival_window: &TimeWindow,
    attributes: &AttributeSet,
    available_window: &TimeWindow,
) -> Assignability {
    let attributes = AttributeCheck::new(requirements, attributes);
    let time_window_status =
        if arrival_window.overlaps(available_window) { TimeWindowStatus::Overlap } else { TimeWindowStatus::NoOverlap };

    let status = if attributes.hard_problem_count() > 0 || time_window_status == TimeWindowStatus::NoOverlap {
        AssignableStatus::NotAssignable
    } else if attributes.has_soft_problems() {
        AssignableStatus::OverrideAssignable
    } else {
        AssignableStatus::Assignable
    };

    Assignability { status, attributes, time_window_status }
}

fn to_sorted<'a>(items: impl Iterator<Item = &'a String>) -> Vec<String> {
    // btree set operations already yield items in order
    items.cloned().collect()
}
