use super::*;
use crate::construction::features::create_default_goal_context;
use crate::helpers::models::*;
use crate::models::common::Timestamp;
use crate::models::config::ConstraintConfig;
use crate::models::goal::ScoreLevel;
use crate::models::problem::VehicleIndex;
use crate::solver::termination::MaxIterations;
use std::sync::mpsc::channel;

struct RejectAll(RelocateSearch);

impl SearchStrategy for RejectAll {
    fn select_move(&mut self, graph: &RouteGraph) -> Option<Move> {
        self.0.select_move(graph)
    }

    fn is_accepted(&mut self, _: &Score, _: &Score) -> bool {
        false
    }
}

fn create_solver(strategy: Box<dyn SearchStrategy>, iterations: usize) -> Solver {
    let goal = create_default_goal_context(ConstraintConfig::default()).unwrap();

    Solver::new(goal, strategy, Box::new(MaxIterations::new(iterations)))
}

/// Creates a team with an empty route and a sink holding one visit.
fn create_unassigned_graph() -> (RouteGraph, VehicleIndex, VehicleIndex) {
    let mut graph = create_test_graph(3);
    let (team, _) = add_test_team(&mut graph, create_test_vehicle(1, 1));
    let sink = add_test_sink(&mut graph);
    add_to_route(&mut graph, sink, create_test_visit(10, 2).build());

    (graph, team, sink)
}

fn get_arrivals(graph: &RouteGraph, vehicle: VehicleIndex) -> Vec<Option<Timestamp>> {
    graph.route(vehicle).map(|idx| graph.stop(idx).arrival()).collect()
}

#[test]
fn can_assign_visit_from_sink() {
    let (graph, team, sink) = create_unassigned_graph();

    let outcome = create_solver(Box::new(RelocateSearch::new(0)), 20).solve(graph).unwrap();

    assert_eq!(get_route_ids(&outcome.graph, team), vec![10, 1]);
    assert!(get_route_ids(&outcome.graph, sink).is_empty());
    assert_eq!(outcome.score.level(ScoreLevel::Unassigned), 0);
    assert!(outcome.score.is_feasible());
    assert!(outcome.iterations > 0);
    outcome.graph.check_integrity().unwrap();
}

#[test]
fn can_keep_pinned_stops_in_place() {
    let (mut graph, team, _) = create_unassigned_graph();
    add_to_route(&mut graph, team, create_test_visit(20, 3).pinned(true).build());

    let outcome = create_solver(Box::new(RelocateSearch::new(1)), 50).solve(graph).unwrap();

    assert_eq!(get_route_ids(&outcome.graph, team), vec![20, 10, 1]);
}

#[test]
fn can_restore_graph_with_inverse_move() {
    let mut graph = create_test_graph(3);
    let (team, _) = add_test_team(&mut graph, create_test_vehicle(1, 1));
    add_to_route(&mut graph, team, create_test_visit(10, 2).build());
    let second = add_to_route(&mut graph, team, create_test_visit(11, 3).build());
    let (original_ids, original_arrivals) = (get_route_ids(&graph, team), get_arrivals(&graph, team));

    let inverse = apply_move(&mut graph, Move { stop: second, target: Standstill::Vehicle(team) }).unwrap();
    assert_eq!(get_route_ids(&graph, team), vec![11, 10, 1]);
    assert_ne!(get_arrivals(&graph, team), original_arrivals);

    apply_move(&mut graph, inverse).unwrap();
    assert_eq!(get_route_ids(&graph, team), original_ids);
    assert_eq!(get_arrivals(&graph, team), original_arrivals);
}

#[test]
fn can_reject_move_of_detached_stop() {
    let mut graph = create_test_graph(2);
    let (team, _) = add_test_team(&mut graph, create_test_vehicle(1, 1));
    let detached = graph.add_stop(create_test_visit(10, 2).build());

    let result = apply_move(&mut graph, Move { stop: detached, target: Standstill::Vehicle(team) });

    assert_eq!(result, Err(GraphError::DetachedStop(detached)));
}

#[test]
fn can_rollback_rejected_moves() {
    let (graph, team, sink) = create_unassigned_graph();

    let outcome = create_solver(Box::new(RejectAll(RelocateSearch::new(0))), 10).solve(graph).unwrap();

    assert_eq!(outcome.iterations, 10);
    assert_eq!(get_route_ids(&outcome.graph, team), vec![1]);
    assert_eq!(get_route_ids(&outcome.graph, sink), vec![10]);
    assert_eq!(outcome.score.level(ScoreLevel::Unassigned), -1001);
}

#[test]
fn can_stop_without_iterations() {
    let (graph, _, sink) = create_unassigned_graph();

    let outcome = create_solver(Box::new(RelocateSearch::new(0)), 0).solve(graph).unwrap();

    assert_eq!(outcome.iterations, 0);
    assert_eq!(get_route_ids(&outcome.graph, sink), vec![10]);
}

parameterized_test! {can_send_snapshots_of_new_best, (include_infeasible, expected), {
    can_send_snapshots_of_new_best_impl(include_infeasible, expected);
}}

can_send_snapshots_of_new_best! {
    case01_feasible_only: (false, 1),
    case02_all: (true, 1),
}

fn can_send_snapshots_of_new_best_impl(include_infeasible: bool, expected: usize) {
    let (graph, _, _) = create_unassigned_graph();
    let (sender, receiver) = channel();

    let outcome = create_solver(Box::new(RelocateSearch::new(0)), 20)
        .with_snapshots(sender, include_infeasible)
        .solve(graph)
        .unwrap();
    let snapshots = receiver.iter().collect::<Vec<_>>();

    assert_eq!(snapshots.len(), expected);
    assert!(snapshots.iter().all(|snapshot| snapshot.score.is_feasible()));
    assert_eq!(snapshots.last().map(|snapshot| snapshot.score), Some(outcome.score));
}

#[test]
fn can_continue_when_snapshot_consumer_is_gone() {
    let (graph, team, _) = create_unassigned_graph();
    let (sender, receiver) = channel();
    drop(receiver);

    let outcome = create_solver(Box::new(RelocateSearch::new(0)), 20).with_snapshots(sender, true).solve(graph).unwrap();

    assert_eq!(get_route_ids(&outcome.graph, team), vec![10, 1]);
}
