use super::*;
use crate::helpers::models::*;

fn evaluate(graph: &RouteGraph) -> i64 {
    evaluate_feature(&create_depot_return_placement_feature("depot"), graph, &ConstraintConfig::default())
}

fn create_two_team_graph() -> (RouteGraph, [(VehicleIndex, StopIndex); 2]) {
    let mut graph = create_test_graph(3);
    let first = add_test_team(&mut graph, create_test_vehicle(1, 1));
    let second = add_test_team(&mut graph, create_test_vehicle(2, 2));

    (graph, [first, second])
}

#[test]
fn can_accept_depot_returns_at_route_end() {
    let (mut graph, [(first, _), _]) = create_two_team_graph();
    add_to_route(&mut graph, first, create_test_visit(10, 3).build());

    assert_eq!(evaluate(&graph), 0);
}

#[test]
fn can_penalize_depot_return_on_another_team() {
    let (mut graph, [(first, _), (_, depot_return)]) = create_two_team_graph();

    graph.relocate(depot_return, Standstill::Vehicle(first)).expect("cannot relocate");

    assert_eq!(get_route_ids(&graph, first), vec![2, 1]);
    assert_eq!(evaluate(&graph), -1);
}

#[test]
fn can_penalize_final_depot_return_which_is_not_last() {
    let (mut graph, [(_, depot_return), _]) = create_two_team_graph();
    let visit = graph.add_stop(create_test_visit(10, 3).build());

    graph.attach(visit, Standstill::Stop(depot_return)).expect("cannot attach");

    assert_eq!(evaluate(&graph), -1);
}

#[test]
fn can_penalize_depot_return_on_sink() {
    let (mut graph, [(_, depot_return), _]) = create_two_team_graph();
    let sink = add_test_sink(&mut graph);

    graph.relocate(depot_return, Standstill::Vehicle(sink)).expect("cannot relocate");

    assert_eq!(evaluate(&graph), -1);
}
