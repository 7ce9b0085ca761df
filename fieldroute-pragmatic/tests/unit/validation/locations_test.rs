use super::*;
use crate::helpers::*;

#[test]
fn can_detect_no_locations() {
    let description = Description { locations: vec![], ..create_test_description(0) };

    let result = check_e1000_has_locations(&ValidationContext::new(&description));

    assert_eq!(result.err().map(|err| err.code), Some("E1000".to_string()));
}

#[test]
fn can_detect_duplicated_location_ids() {
    let mut description = create_test_description(2);
    description.locations.push(create_location(2));

    let result = check_e1001_location_id_uniqueness(&ValidationContext::new(&description));

    assert_eq!(result.err().map(|err| (err.code, err.action)), Some(("E1001".to_string(), "remove duplicated location ids: '2'".to_string())));
}

parameterized_test! {can_detect_unknown_distance_locations, (from, to, expected), {
    can_detect_unknown_distance_locations_impl(from, to, expected);
}}

can_detect_unknown_distance_locations! {
    case01_known: (1, 2, None),
    case02_unknown_from: (10, 2, Some("E1002".to_string())),
    case03_unknown_to: (1, 20, Some("E1002".to_string())),
}

fn can_detect_unknown_distance_locations_impl(from: i64, to: i64, expected: Option<String>) {
    let mut description = create_test_description(1);
    description.distance_matrix.distances.push(DistanceEntry {
        from_location_id: from,
        to_location_id: to,
        duration_sec: 1,
        length_meters: 1,
    });

    let result = check_e1002_distance_locations_exist(&ValidationContext::new(&description));

    assert_eq!(result.err().map(|err| err.code), expected);
}

#[test]
fn can_accept_complete_distances_without_self_pairs() {
    let description = create_test_description(3);

    assert!(check_e1003_distances_complete(&ValidationContext::new(&description)).is_ok());
}

#[test]
fn can_detect_missing_distance_pair() {
    let mut description = create_test_description(2);
    description.distance_matrix.distances.retain(|entry| !(entry.from_location_id == 2 && entry.to_location_id == 3));

    let result = check_e1003_distances_complete(&ValidationContext::new(&description)).err();

    assert_eq!(result.as_ref().map(|err| err.code.as_str()), Some("E1003"));
    assert_eq!(result.and_then(|err| err.details), Some("2->3".to_string()));
}

#[test]
fn can_ignore_unreferenced_locations_when_checking_distances() {
    let mut description = create_test_description(1);
    description.locations.push(create_location(99));

    assert!(check_e1003_distances_complete(&ValidationContext::new(&description)).is_ok());
}

#[test]
fn can_require_distances_to_current_position() {
    let mut description = create_test_description(1);
    description.locations.push(create_location(99));
    first_team_mut(&mut description).route_history = Some(RouteHistory {
        current_position: Some(ShiftTeamPosition { location_id: 99, known_timestamp_sec: T0 }),
        stops: vec![],
    });

    let result = check_e1003_distances_complete(&ValidationContext::new(&description));

    assert_eq!(result.err().map(|err| err.code), Some("E1003".to_string()));
}

#[test]
fn can_limit_reported_missing_pairs() {
    let mut description = create_test_description(5);
    description.distance_matrix.distances.clear();

    let result = check_e1003_distances_complete(&ValidationContext::new(&description)).err();

    assert_eq!(result.as_ref().map(|err| err.cause.as_str()), Some("missing distances between 30 pairs of referenced locations"));
    assert_eq!(result.and_then(|err| err.details).map(|details| details.split(", ").count()), Some(10));
}
