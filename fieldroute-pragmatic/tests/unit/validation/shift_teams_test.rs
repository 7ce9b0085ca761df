use super::*;
use crate::helpers::*;

fn with_history(stops: Vec<RouteStop>, commitments: &[i64]) -> Description {
    let mut description = create_test_description(3);
    description.rest_breaks.push(create_unrequested_rest_break(1, 1, 1_800));

    let team = first_team_mut(&mut description);
    team.route_history = Some(RouteHistory { current_position: None, stops });
    team.upcoming_commitments = Some(UpcomingCommitments {
        commitments: commitments.iter().map(|visit_id| Commitment { visit_id: *visit_id }).collect(),
    });

    description
}

#[test]
fn can_detect_no_shift_teams() {
    let description = Description { shift_teams: vec![], ..create_test_description(1) };

    let result = check_e1200_has_shift_teams(&ValidationContext::new(&description));

    assert_eq!(result.err().map(|err| err.code), Some("E1200".to_string()));
}

#[test]
fn can_detect_duplicated_shift_team_ids() {
    let mut description = create_test_description(1);
    description.shift_teams.push(create_shift_team(1, DEPOT_LOCATION, (T0, T0 + HOUR)));

    let result = check_e1201_shift_team_id_uniqueness(&ValidationContext::new(&description));

    assert_eq!(result.err().map(|err| err.code), Some("E1201".to_string()));
}

#[test]
fn can_detect_unknown_depot_location() {
    let mut description = create_test_description(1);
    first_team_mut(&mut description).depot_location_id = 77;

    let result = check_e1202_depot_locations_exist(&ValidationContext::new(&description));

    assert_eq!(result.err().map(|err| err.code), Some("E1202".to_string()));
}

#[test]
fn can_detect_missing_history_and_commitments() {
    let mut description = create_test_description(1);
    let team = first_team_mut(&mut description);
    team.route_history = None;
    team.upcoming_commitments = None;
    let ctx = ValidationContext::new(&description);

    assert_eq!(check_e1203_has_route_history(&ctx).err().map(|err| err.code), Some("E1203".to_string()));
    assert_eq!(check_e1204_has_upcoming_commitments(&ctx).err().map(|err| err.code), Some("E1204".to_string()));
}

parameterized_test! {can_detect_invalid_route_stops, (stops, commitments, expected), {
    can_detect_invalid_route_stops_impl(stops, commitments, expected);
}}

can_detect_invalid_route_stops! {
    case01_valid: (vec![create_visit_stop(1), create_rest_break_stop(1)], &[2], None),
    case02_unknown_visit: (vec![create_visit_stop(9)], &[], Some("E1205")),
    case03_unknown_rest_break: (vec![create_rest_break_stop(9)], &[], Some("E1205")),
    case04_empty_stop: (vec![RouteStop::default()], &[], Some("E1205")),
    case05_both_kinds: (vec![RouteStop { visit: create_visit_stop(1).visit, ..create_rest_break_stop(1) }], &[], Some("E1205")),
    case06_unknown_commitment: (vec![], &[9], Some("E1205")),
}

fn can_detect_invalid_route_stops_impl(stops: Vec<RouteStop>, commitments: &[i64], expected: Option<&str>) {
    let description = with_history(stops, commitments);

    let result = check_e1205_route_stops_exist(&ValidationContext::new(&description));

    assert_eq!(result.err().map(|err| err.code), expected.map(str::to_string));
}

parameterized_test! {can_detect_completion_without_start, (start, completion, expected), {
    let description = with_history(vec![create_observed_stop(1, start, completion)], &[]);

    let result = check_e1206_completion_has_start(&ValidationContext::new(&description));

    assert_eq!(result.err().map(|err| err.code), expected.map(str::to_string));
}}

can_detect_completion_without_start! {
    case01_nothing: (None, None, None),
    case02_started: (Some(T0), None, None),
    case03_completed: (Some(T0), Some(T0 + 600), None),
    case04_completed_only: (None, Some(T0 + 600), Some("E1206")),
}

#[test]
fn can_detect_unknown_current_position_location() {
    let mut description = create_test_description(1);
    first_team_mut(&mut description).route_history = Some(RouteHistory {
        current_position: Some(ShiftTeamPosition { location_id: 55, known_timestamp_sec: T0 }),
        stops: vec![],
    });

    let result = check_e1207_current_position_location_exists(&ValidationContext::new(&description));

    assert_eq!(result.err().map(|err| err.code), Some("E1207".to_string()));
}

parameterized_test! {can_detect_stops_placed_more_than_once, (stops, commitments, unassigned, expected), {
    can_detect_stops_placed_more_than_once_impl(stops, commitments, unassigned, expected);
}}

can_detect_stops_placed_more_than_once! {
    case01_distinct: (vec![create_visit_stop(1)], &[2], &[3], None),
    case02_history_and_commitment: (vec![create_visit_stop(1)], &[1], &[], Some("E1208")),
    case03_commitment_and_unassigned: (vec![], &[2], &[2], Some("E1208")),
    case04_twice_in_history: (vec![create_rest_break_stop(1), create_rest_break_stop(1)], &[], &[], Some("E1208")),
    case05_same_id_different_kinds: (vec![create_visit_stop(1), create_rest_break_stop(1)], &[], &[], None),
}

fn can_detect_stops_placed_more_than_once_impl(
    stops: Vec<RouteStop>,
    commitments: &[i64],
    unassigned: &[i64],
    expected: Option<&str>,
) {
    let mut description = with_history(stops, commitments);
    description.unassigned_visits =
        unassigned.iter().map(|visit_id| UnassignedVisit { visit_id: *visit_id, pinned: None }).collect();

    let result = check_e1208_stops_placed_once(&ValidationContext::new(&description));

    assert_eq!(result.err().map(|err| err.code), expected.map(str::to_string));
}

#[test]
fn can_detect_reversed_availability_window() {
    let mut description = create_test_description(1);
    first_team_mut(&mut description).available_time_window = to_window(T0 + HOUR, T0);

    let result = check_e1209_availability_windows_are_ordered(&ValidationContext::new(&description));

    assert_eq!(result.err().map(|err| err.code), Some("E1209".to_string()));
}
