#[cfg(test)]
#[path = "../../tests/unit/validation/visits_test.rs"]
mod visits_test;

use super::*;
use crate::utils::{combine_error_results, get_duplicates};
use std::ops::RangeInclusive;

const ACUITY_LEVELS: RangeInclusive<i64> = 1..=9;
const PRIORITY_LEVELS: RangeInclusive<i64> = 0..=9;

/// Checks that visits reference known locations.
fn check_e1100_visit_locations_exist(ctx: &ValidationContext) -> Result<(), FormatError> {
    let ids = ctx.visits().filter(|visit| !ctx.has_location(visit.location_id)).map(|visit| visit.id).collect::<Vec<_>>();

    check_ids("E1100", "visit references unknown location", "check location ids of visits", &ids)
}

/// Checks that visit ids are unique.
fn check_e1101_visit_id_uniqueness(ctx: &ValidationContext) -> Result<(), FormatError> {
    let duplicates = get_duplicates(ctx.visits().map(|visit| &visit.id)).unwrap_or_default();

    check_ids("E1101", "duplicated visit ids", "remove duplicated visit ids", &duplicates)
}

/// Checks that every visit has acuity.
fn check_e1102_visit_has_acuity(ctx: &ValidationContext) -> Result<(), FormatError> {
    let ids = ctx.visits().filter(|visit| visit.acuity.is_none()).map(|visit| visit.id).collect::<Vec<_>>();

    check_ids("E1102", "visit without acuity", "set acuity of visits", &ids)
}

/// Checks acuity level range.
fn check_e1103_acuity_level_range(ctx: &ValidationContext) -> Result<(), FormatError> {
    let ids = ctx
        .visits()
        .filter(|visit| visit.acuity.as_ref().is_some_and(|acuity| !ACUITY_LEVELS.contains(&acuity.level)))
        .map(|visit| visit.id)
        .collect::<Vec<_>>();

    check_ids("E1103", "acuity level is outside of 1..=9 range", "fix acuity level of visits", &ids)
}

/// Checks unassigned priority level range.
fn check_e1104_priority_level_range(ctx: &ValidationContext) -> Result<(), FormatError> {
    let ids = ctx
        .visits()
        .filter(|visit| {
            visit.priority.as_ref().is_some_and(|priority| !PRIORITY_LEVELS.contains(&priority.unassigned_priority_level))
        })
        .map(|visit| visit.id)
        .collect::<Vec<_>>();

    check_ids("E1104", "priority level is outside of 0..=9 range", "fix priority level of visits", &ids)
}

/// Checks that acuity windows have both ends set.
fn check_e1105_acuity_window_is_set(ctx: &ValidationContext) -> Result<(), FormatError> {
    let ids = ctx
        .visits()
        .filter(|visit| {
            visit
                .acuity
                .as_ref()
                .and_then(|acuity| acuity.time_window.as_ref())
                .is_some_and(|window| window.start_timestamp_sec == 0 || window.end_timestamp_sec == 0)
        })
        .map(|visit| visit.id)
        .collect::<Vec<_>>();

    check_ids("E1105", "acuity time window has zero start or end", "set both ends of acuity time window", &ids)
}

/// Checks that arrival and acuity windows do not end before they start.
fn check_e1106_visit_windows_are_ordered(ctx: &ValidationContext) -> Result<(), FormatError> {
    let ids = ctx
        .visits()
        .filter(|visit| {
            let acuity_window = visit.acuity.as_ref().and_then(|acuity| acuity.time_window.as_ref());

            !is_valid_window(&visit.arrival_time_window) || acuity_window.is_some_and(|window| !is_valid_window(window))
        })
        .map(|visit| visit.id)
        .collect::<Vec<_>>();

    check_ids("E1106", "time window ends before it starts", "fix time windows of visits", &ids)
}

/// Checks that durations are not negative.
fn check_e1107_visit_durations_are_positive(ctx: &ValidationContext) -> Result<(), FormatError> {
    let ids = ctx
        .visits()
        .filter(|visit| visit.service_duration_sec < 0 || visit.extra_setup_duration_sec.is_some_and(|d| d < 0))
        .map(|visit| visit.id)
        .collect::<Vec<_>>();

    check_ids("E1107", "negative service or setup duration", "fix durations of visits", &ids)
}

/// Checks that unassigned entries reference known visits.
fn check_e1400_unassigned_visits_exist(ctx: &ValidationContext) -> Result<(), FormatError> {
    let ids = ctx
        .description
        .unassigned_visits
        .iter()
        .filter(|unassigned| !ctx.has_visit(unassigned.visit_id))
        .map(|unassigned| unassigned.visit_id)
        .collect::<Vec<_>>();

    check_ids("E1400", "unassigned entry references unknown visit", "remove unknown unassigned visits", &ids)
}

/// Validates visits and unassigned visit list.
pub fn validate_visits(ctx: &ValidationContext) -> Result<(), Vec<FormatError>> {
    combine_error_results(&[
        check_e1100_visit_locations_exist(ctx),
        check_e1101_visit_id_uniqueness(ctx),
        check_e1102_visit_has_acuity(ctx),
        check_e1103_acuity_level_range(ctx),
        check_e1104_priority_level_range(ctx),
        check_e1105_acuity_window_is_set(ctx),
        check_e1106_visit_windows_are_ordered(ctx),
        check_e1107_visit_durations_are_positive(ctx),
        check_e1400_unassigned_visits_exist(ctx),
    ])
}
