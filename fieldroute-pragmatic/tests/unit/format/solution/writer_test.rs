use super::*;
use crate::helpers::*;

fn create_committed_context(commitments: &[i64]) -> ProblemContext {
    let mut request = create_test_request(3);
    first_team_mut(&mut request.description).upcoming_commitments = Some(UpcomingCommitments {
        commitments: commitments.iter().map(|visit_id| Commitment { visit_id: *visit_id }).collect(),
    });

    request.read_pragmatic().expect("valid request")
}

fn full_output() -> OutputSettings {
    OutputSettings { include_distance_matrix: true, include_total_stats: true, include_score_explanation: true }
}

#[test]
fn can_write_route_with_planned_arrivals() {
    let ctx = create_committed_context(&[1, 2]);

    let solution = create_solution(&ctx.description, &ctx.graph, &ctx.goal, &OutputSettings::default());
    let route = get_route(&solution.description, 1);

    assert_eq!(get_route_visit_ids(&solution.description, 1), vec![1, 2]);
    assert_eq!(
        route.stops.iter().map(|stop| stop.visit.as_ref().and_then(|visit| visit.arrival_timestamp_sec)).collect::<Vec<_>>(),
        vec![Some(T0 + 600), Some(T0 + 3_000)]
    );
    assert!(route.stops.iter().all(|stop| stop.pinned == Some(true)));
    assert_eq!(route.depot_departure_timestamp_sec, Some(T0));
    assert_eq!(route.depot_arrival_timestamp_sec, Some(T0 + 5_400));
    assert_eq!(get_unassigned_ids(&solution.description), vec![3]);
}

#[test]
fn can_skip_optional_output_by_default() {
    let ctx = create_committed_context(&[1]);

    let solution = create_solution(&ctx.description, &ctx.graph, &ctx.goal, &OutputSettings::default());

    assert!(solution.description.distance_matrix.distances.is_empty());
    assert_eq!(solution.total_stats, None);
    assert_eq!(solution.score.debug_explanation, None);
}

#[test]
fn can_write_optional_output() {
    let ctx = create_committed_context(&[1, 2]);

    let solution = create_solution(&ctx.description, &ctx.graph, &ctx.goal, &full_output());
    let distances = &solution.description.distance_matrix.distances;

    assert_eq!(distances.len(), 12);
    assert_eq!((distances[0].from_location_id, distances[0].to_location_id), (1, 2));
    assert_eq!((distances[11].from_location_id, distances[11].to_location_id), (4, 3));
    assert_eq!(
        solution.total_stats,
        Some(Statistic { drive_duration_sec: 1_800, drive_distance_meters: 15_000, service_duration_sec: 3_600 })
    );
    assert!(solution.score.debug_explanation.is_some());
}

#[test]
fn can_echo_locations_and_visit_revenue() {
    let mut request = create_test_request(2);
    request.description.visits[0].value = Some(VisitValue { completion_value_cents: Some(40_000) });
    let ctx = request.read_pragmatic().expect("valid request");

    let solution = create_solution(&ctx.description, &ctx.graph, &ctx.goal, &OutputSettings::default());

    assert_eq!(solution.description.locations, ctx.description.locations);
    assert_eq!(solution.description.visits[0].per_visit_revenue_usd_cents, Some(40_000));
    assert_eq!(solution.description.visits[0].value, None);
    assert_eq!(solution.description.visits[1].per_visit_revenue_usd_cents, Some(25_000));
    assert_eq!(solution.description.current_timestamp_sec, Some(T0));
}

/// Every visit is either kept in history, committed or pinned unassigned, so the written
/// description has nothing to add besides routes.
fn create_description_with_history() -> Description {
    let mut description = create_test_description(5);
    description.current_timestamp_sec = Some(T0 + 3_100);
    description.visits[0].value = Some(VisitValue { completion_value_cents: Some(40_000) });
    description.visits[4] = Visit {
        extra_setup_duration_sec: Some(300),
        overlap_set_key: Some("building".to_string()),
        preferred_attributes: vec!["spanish".to_string()],
        is_expendable: Some(true),
        ..description.visits[4].clone()
    };
    description.rest_breaks = vec![
        create_unrequested_rest_break(10, 1, 900),
        create_requested_rest_break(11, 2, DEPOT_LOCATION, T0 + HOUR, 1_800),
    ];
    description.shift_teams.push(ShiftTeam {
        attributes: vec!["spanish".to_string()],
        allowed_capacity_ratio: Some(0.5),
        ..create_shift_team(2, DEPOT_LOCATION, (T0 + HOUR, T0 + 6 * HOUR))
    });
    description.unassigned_visits = vec![
        UnassignedVisit { visit_id: 4, pinned: Some(true) },
        UnassignedVisit { visit_id: 5, pinned: Some(true) },
    ];

    let team = first_team_mut(&mut description);
    team.route_history = Some(RouteHistory {
        current_position: Some(ShiftTeamPosition { location_id: 3, known_timestamp_sec: T0 + 3_100 }),
        stops: vec![
            create_observed_stop(1, Some(T0 + 600), Some(T0 + 2_400)),
            create_observed_stop(2, Some(T0 + 3_000), None),
        ],
    });
    team.upcoming_commitments = Some(UpcomingCommitments { commitments: vec![Commitment { visit_id: 3 }] });

    description
}

fn without_routes(description: &Description) -> Vec<ShiftTeam> {
    description.shift_teams.iter().map(|team| ShiftTeam { route: None, ..team.clone() }).collect()
}

fn without_revenue(description: &Description) -> Vec<Visit> {
    description
        .visits
        .iter()
        .map(|visit| Visit { per_visit_revenue_usd_cents: None, value: None, ..visit.clone() })
        .collect()
}

#[test]
fn can_write_back_read_description() {
    let original = create_description_with_history();
    let ctx = SolveRequest { description: original.clone(), config: None }.read_pragmatic().expect("valid request");

    let written = create_solution(&ctx.description, &ctx.graph, &ctx.goal, &full_output()).description;

    assert_eq!(written.locations, original.locations);
    assert_eq!(written.distance_matrix, original.distance_matrix);
    assert_eq!(without_revenue(&written), without_revenue(&original));
    assert_eq!(written.rest_breaks, original.rest_breaks);
    assert_eq!(without_routes(&written), without_routes(&original));
    assert_eq!(written.unassigned_visits, original.unassigned_visits);
    assert_eq!(written.current_timestamp_sec, original.current_timestamp_sec);

    assert_eq!(written.visits[0].per_visit_revenue_usd_cents, Some(40_000));
    assert_eq!(get_route_visit_ids(&written, 1), vec![1, 2, 3]);
    let route = get_route(&written, 1);
    assert_eq!(route.current_position, Some(ShiftTeamPosition { location_id: 3, known_timestamp_sec: T0 + 3_100 }));
    assert_eq!(route.stops[1].actual_start_timestamp_sec, Some(T0 + 3_000));
    assert_eq!(route.stops[1].actual_completion_timestamp_sec, None);
}

#[test]
fn can_write_score_levels() {
    let ctx = create_committed_context(&[]);

    let solution = create_solution(&ctx.description, &ctx.graph, &ctx.goal, &OutputSettings::default());
    let expected = ctx.goal.evaluate(&ctx.graph);

    assert_eq!(solution.score.is_feasible, expected.is_feasible());
    assert_eq!(solution.score.hard_score, expected.level(ScoreLevel::Hard));
    assert_eq!(solution.score.unassigned_visits_score, expected.level(ScoreLevel::Unassigned));
    assert_eq!(solution.score.soft_score, expected.level(ScoreLevel::Soft));
    assert_eq!(get_unassigned_ids(&solution.description), vec![1, 2, 3]);
}

#[test]
fn can_create_no_demand_solution() {
    let description = create_test_description(0);

    let solution = create_no_demand_solution(&description);

    assert_eq!(solution.description, description);
    assert_eq!(
        solution.score,
        SolutionScore {
            is_feasible: true,
            structural_score: 0,
            hard_score: 0,
            unassigned_visits_score: 0,
            soft_score: 0,
            debug_explanation: None,
        }
    );
}
