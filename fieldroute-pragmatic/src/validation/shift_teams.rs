#[cfg(test)]
#[path = "../../tests/unit/validation/shift_teams_test.rs"]
mod shift_teams_test;

use super::*;
use crate::utils::{combine_error_results, get_duplicates};

/// Checks that description has at least one shift team.
fn check_e1200_has_shift_teams(ctx: &ValidationContext) -> Result<(), FormatError> {
    if ctx.description.shift_teams.is_empty() {
        Err(FormatError::new("E1200".to_string(), "no shift teams".to_string(), "add at least one shift team".to_string()))
    } else {
        Ok(())
    }
}

/// Checks that shift team ids are unique.
fn check_e1201_shift_team_id_uniqueness(ctx: &ValidationContext) -> Result<(), FormatError> {
    let duplicates = get_duplicates(ctx.shift_teams().map(|team| &team.id)).unwrap_or_default();

    check_ids("E1201", "duplicated shift team ids", "remove duplicated shift team ids", &duplicates)
}

/// Checks that depots reference known locations.
fn check_e1202_depot_locations_exist(ctx: &ValidationContext) -> Result<(), FormatError> {
    let ids = ctx
        .shift_teams()
        .filter(|team| !ctx.has_location(team.depot_location_id))
        .map(|team| team.id)
        .collect::<Vec<_>>();

    check_ids("E1202", "shift team depot references unknown location", "check depot location ids", &ids)
}

/// Checks that every shift team has route history.
fn check_e1203_has_route_history(ctx: &ValidationContext) -> Result<(), FormatError> {
    let ids = ctx.shift_teams().filter(|team| team.route_history.is_none()).map(|team| team.id).collect::<Vec<_>>();

    check_ids("E1203", "missing route history", "set route history of shift teams, it can be empty", &ids)
}

/// Checks that every shift team has upcoming commitments.
fn check_e1204_has_upcoming_commitments(ctx: &ValidationContext) -> Result<(), FormatError> {
    let ids =
        ctx.shift_teams().filter(|team| team.upcoming_commitments.is_none()).map(|team| team.id).collect::<Vec<_>>();

    check_ids("E1204", "missing upcoming commitments", "set upcoming commitments of shift teams, they can be empty", &ids)
}

/// Checks that route stops and commitments reference known visits and rest breaks.
fn check_e1205_route_stops_exist(ctx: &ValidationContext) -> Result<(), FormatError> {
    let ids = ctx
        .shift_teams()
        .filter(|team| {
            let has_invalid_stop = history_stops(team).any(|stop| match stop.stop_ref() {
                Some(StopRef::Visit(id)) => !ctx.has_visit(id),
                Some(StopRef::RestBreak(id)) => !ctx.has_rest_break(id),
                None => true,
            });
            let has_invalid_commitment = commitments(team).any(|commitment| !ctx.has_visit(commitment.visit_id));

            has_invalid_stop || has_invalid_commitment
        })
        .map(|team| team.id)
        .collect::<Vec<_>>();

    check_ids(
        "E1205",
        "route stop references unknown visit or rest break or has no single stop set",
        "fix route history and commitments of shift teams",
        &ids,
    )
}

/// Checks that completion is never reported without a start.
fn check_e1206_completion_has_start(ctx: &ValidationContext) -> Result<(), FormatError> {
    let ids = ctx
        .shift_teams()
        .filter(|team| {
            history_stops(team).any(|stop| {
                stop.actual_completion_timestamp_sec.is_some() && stop.actual_start_timestamp_sec.is_none()
            })
        })
        .map(|team| team.id)
        .collect::<Vec<_>>();

    check_ids("E1206", "completion timestamp without start timestamp", "set actual start of completed stops", &ids)
}

/// Checks that current positions reference known locations.
fn check_e1207_current_position_location_exists(ctx: &ValidationContext) -> Result<(), FormatError> {
    let ids = ctx
        .shift_teams()
        .filter(|team| {
            team.route_history
                .as_ref()
                .and_then(|history| history.current_position.as_ref())
                .is_some_and(|position| !ctx.has_location(position.location_id))
        })
        .map(|team| team.id)
        .collect::<Vec<_>>();

    check_ids("E1207", "current position references unknown location", "check current position location ids", &ids)
}

/// Checks that a stop is placed at most once across routes, commitments and unassigned list.
fn check_e1208_stops_placed_once(ctx: &ValidationContext) -> Result<(), FormatError> {
    let placements = ctx
        .shift_teams()
        .flat_map(|team| {
            history_stops(team)
                .filter_map(|stop| stop.stop_ref())
                .chain(commitments(team).map(|commitment| StopRef::Visit(commitment.visit_id)))
        })
        .chain(ctx.description.unassigned_visits.iter().map(|unassigned| StopRef::Visit(unassigned.visit_id)))
        .collect::<Vec<_>>();

    let duplicates = get_duplicates(placements.iter()).unwrap_or_default();

    check_ids("E1208", "stop is placed more than once", "keep a single placement of stops", &duplicates)
}

/// Checks that availability windows do not end before they start.
fn check_e1209_availability_windows_are_ordered(ctx: &ValidationContext) -> Result<(), FormatError> {
    let ids = ctx
        .shift_teams()
        .filter(|team| !is_valid_window(&team.available_time_window))
        .map(|team| team.id)
        .collect::<Vec<_>>();

    check_ids("E1209", "availability window ends before it starts", "fix availability windows of shift teams", &ids)
}

fn history_stops(team: &ShiftTeam) -> impl Iterator<Item = &RouteStop> {
    team.route_history.iter().flat_map(|history| history.stops.iter())
}

fn commitments(team: &ShiftTeam) -> impl Iterator<Item = &Commitment> {
    team.upcoming_commitments.iter().flat_map(|commitments| commitments.commitments.iter())
}

/// Validates shift teams with their route history and commitments.
pub fn validate_shift_teams(ctx: &ValidationContext) -> Result<(), Vec<FormatError>> {
    combine_error_results(&[
        check_e1200_has_shift_teams(ctx),
        check_e1201_shift_team_id_uniqueness(ctx),
        check_e1202_depot_locations_exist(ctx),
        check_e1203_has_route_history(ctx),
        check_e1204_has_upcoming_commitments(ctx),
        check_e1205_route_stops_exist(ctx),
        check_e1206_completion_has_start(ctx),
        check_e1207_current_position_location_exists(ctx),
        check_e1208_stops_placed_once(ctx),
        check_e1209_availability_windows_are_ordered(ctx),
    ])
}
