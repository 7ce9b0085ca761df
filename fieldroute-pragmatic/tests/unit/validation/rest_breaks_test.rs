use super::*;
use crate::helpers::*;

fn check_rest_break(rest_break: RestBreak, check: fn(&ValidationContext) -> Result<(), FormatError>) -> Option<String> {
    let mut description = create_test_description(1);
    description.rest_breaks = vec![rest_break];

    check(&ValidationContext::new(&description)).err().map(|err| err.code)
}

#[test]
fn can_detect_unknown_shift_team() {
    let rest_break = create_unrequested_rest_break(1, 2, 1_800);

    assert_eq!(check_rest_break(rest_break, check_e1300_rest_break_shift_teams_exist), Some("E1300".to_string()));
}

parameterized_test! {can_detect_requested_rest_break_without_placement, (unrequested, location_id, start, expected), {
    let rest_break = RestBreak {
        id: 1,
        shift_team_id: 1,
        duration_sec: 1_800,
        unrequested,
        location_id,
        start_timestamp_sec: start,
    };

    assert_eq!(check_rest_break(rest_break, check_e1301_requested_rest_break_is_fixed), expected.map(str::to_string));
}}

can_detect_requested_rest_break_without_placement! {
    case01_unrequested: (Some(true), None, None, None),
    case02_requested_fixed: (None, Some(DEPOT_LOCATION), Some(T0), None),
    case03_explicitly_requested_fixed: (Some(false), Some(DEPOT_LOCATION), Some(T0), None),
    case04_no_location: (None, None, Some(T0), Some("E1301")),
    case05_no_start: (Some(false), Some(DEPOT_LOCATION), None, Some("E1301")),
}

#[test]
fn can_detect_unknown_rest_break_location() {
    let rest_break = create_requested_rest_break(1, 1, 404, T0, 1_800);

    assert_eq!(check_rest_break(rest_break, check_e1302_rest_break_locations_exist), Some("E1302".to_string()));
}

#[test]
fn can_detect_duplicated_rest_break_ids() {
    let mut description = create_test_description(1);
    description.rest_breaks =
        vec![create_unrequested_rest_break(3, 1, 1_800), create_requested_rest_break(3, 1, DEPOT_LOCATION, T0, 600)];

    let result = check_e1303_rest_break_id_uniqueness(&ValidationContext::new(&description));

    assert_eq!(result.err().map(|err| err.code), Some("E1303".to_string()));
}

#[test]
fn can_detect_negative_rest_break_duration() {
    let rest_break = create_unrequested_rest_break(1, 1, -1);

    assert_eq!(check_rest_break(rest_break, check_e1304_rest_break_duration_is_positive), Some("E1304".to_string()));
}
