#[cfg(test)]
#[path = "../../tests/unit/validation/rest_breaks_test.rs"]
mod rest_breaks_test;

use super::*;
use crate::utils::{combine_error_results, get_duplicates};

/// Checks that rest breaks belong to known shift teams.
fn check_e1300_rest_break_shift_teams_exist(ctx: &ValidationContext) -> Result<(), FormatError> {
    let ids = ctx
        .rest_breaks()
        .filter(|rest_break| !ctx.has_shift_team(rest_break.shift_team_id))
        .map(|rest_break| rest_break.id)
        .collect::<Vec<_>>();

    check_ids("E1300", "rest break references unknown shift team", "check shift team ids of rest breaks", &ids)
}

/// Checks that requested rest breaks have fixed location and start.
fn check_e1301_requested_rest_break_is_fixed(ctx: &ValidationContext) -> Result<(), FormatError> {
    let ids = ctx
        .rest_breaks()
        .filter(|rest_break| {
            !rest_break.is_unrequested()
                && (rest_break.location_id.is_none() || rest_break.start_timestamp_sec.is_none())
        })
        .map(|rest_break| rest_break.id)
        .collect::<Vec<_>>();

    check_ids(
        "E1301",
        "requested rest break without location or start",
        "set location and start of requested rest breaks or mark them as unrequested",
        &ids,
    )
}

/// Checks that requested rest breaks reference known locations.
fn check_e1302_rest_break_locations_exist(ctx: &ValidationContext) -> Result<(), FormatError> {
    let ids = ctx
        .rest_breaks()
        .filter(|rest_break| rest_break.location_id.is_some_and(|id| !ctx.has_location(id)))
        .map(|rest_break| rest_break.id)
        .collect::<Vec<_>>();

    check_ids("E1302", "rest break references unknown location", "check location ids of rest breaks", &ids)
}

/// Checks that rest break ids are unique.
fn check_e1303_rest_break_id_uniqueness(ctx: &ValidationContext) -> Result<(), FormatError> {
    let duplicates = get_duplicates(ctx.rest_breaks().map(|rest_break| &rest_break.id)).unwrap_or_default();

    check_ids("E1303", "duplicated rest break ids", "remove duplicated rest break ids", &duplicates)
}

/// Checks that rest break durations are not negative.
fn check_e1304_rest_break_duration_is_positive(ctx: &ValidationContext) -> Result<(), FormatError> {
    let ids = ctx
        .rest_breaks()
        .filter(|rest_break| rest_break.duration_sec < 0)
        .map(|rest_break| rest_break.id)
        .collect::<Vec<_>>();

    check_ids("E1304", "negative rest break duration", "fix durations of rest breaks", &ids)
}

/// Validates rest breaks.
pub fn validate_rest_breaks(ctx: &ValidationContext) -> Result<(), Vec<FormatError>> {
    combine_error_results(&[
        check_e1300_rest_break_shift_teams_exist(ctx),
        check_e1301_requested_rest_break_is_fixed(ctx),
        check_e1302_rest_break_locations_exist(ctx),
        check_e1303_rest_break_id_uniqueness(ctx),
        check_e1304_rest_break_duration_is_positive(ctx),
    ])
}
