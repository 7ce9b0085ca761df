use crate::format::problem::*;
use crate::format::solution::*;
use crate::helpers::*;
use crate::solve;

fn create_config(termination_duration_ms: u64) -> Config {
    Config { termination_duration_ms: Some(termination_duration_ms), include_total_stats: true, ..Config::default() }
}

#[test]
fn can_assign_all_visits_to_single_team() {
    let request = SolveRequest { config: Some(create_config(500)), ..create_test_request(3) };

    let response = solve(request).expect("cannot solve");
    let description = &response.solution.description;

    assert_eq!(response.status, SolveStatus::Finished);
    assert!(response.solution.score.is_feasible);
    assert!(get_unassigned_ids(description).is_empty());

    let mut visit_ids = get_route_visit_ids(description, 1);
    visit_ids.sort();
    assert_eq!(visit_ids, vec![1, 2, 3]);
    assert_eq!(response.solution.total_stats.map(|stats| stats.service_duration_sec), Some(3 * 1_800));
}

#[test]
fn can_respect_required_attributes() {
    let mut request = SolveRequest { config: Some(create_config(500)), ..create_test_request(2) };
    request.description.visits[0] = create_visit_with_attributes(1, 2, &["dhmo"]);
    request.description.shift_teams = vec![
        create_shift_team_with_attributes(1, &[]),
        create_shift_team_with_attributes(2, &["dhmo"]),
    ];

    let response = solve(request).expect("cannot solve");
    let description = &response.solution.description;

    assert!(response.solution.score.is_feasible);
    assert!(get_route_visit_ids(description, 2).contains(&1));
    assert!(!get_route_visit_ids(description, 1).contains(&1));
}

#[test]
fn can_keep_pinned_unassigned_visit() {
    let mut request = SolveRequest { config: Some(create_config(200)), ..create_test_request(2) };
    request.description.unassigned_visits = vec![UnassignedVisit { visit_id: 2, pinned: Some(true) }];

    let response = solve(request).expect("cannot solve");
    let description = &response.solution.description;

    assert_eq!(get_route_visit_ids(description, 1), vec![1]);
    assert_eq!(description.unassigned_visits, vec![UnassignedVisit { visit_id: 2, pinned: Some(true) }]);
}

#[test]
fn can_return_description_as_is_without_demand() {
    let request = create_test_request(0);
    let description = request.description.clone();

    let response = solve(request).expect("cannot solve");

    assert_eq!(response.status, SolveStatus::Finished);
    assert_eq!(response.solution.description, description);
    assert!(response.solution.score.is_feasible);
}

#[test]
fn can_report_invalid_request() {
    let mut request = create_test_request(2);
    request.description.shift_teams.clear();
    request.description.visits[1].location_id = 404;

    let result = solve(request);

    assert_eq!(result.err().map(|err| err.codes().join(",")), Some("E1100,E1200".to_string()));
}

#[test]
fn can_stop_on_first_feasible_solution() {
    let request = SolveRequest {
        config: Some(Config {
            termination_type: Some(TerminationType::FirstFeasible),
            termination_duration_ms: Some(60_000),
            ..Config::default()
        }),
        ..create_test_request(2)
    };

    let response = solve(request).expect("cannot solve");

    assert!(response.solution.score.is_feasible);
    assert!(get_unassigned_ids(&response.solution.description).is_empty());
}

#[test]
fn can_solve_request_read_from_json() {
    let json = serde_json::to_string(&SolveRequest { config: Some(create_config(200)), ..create_test_request(2) })
        .expect("cannot serialize");
    let request = deserialize_request(std::io::BufReader::new(json.as_bytes())).expect("cannot deserialize");

    let response = solve(request).expect("cannot solve");
    let mut writer = std::io::BufWriter::new(Vec::new());
    serialize_response(&response, &mut writer).expect("cannot serialize response");
    let bytes = writer.into_inner().expect("cannot flush");
    let restored = deserialize_response(std::io::BufReader::new(bytes.as_slice())).expect("cannot read response");

    assert_eq!(restored, response);
}
