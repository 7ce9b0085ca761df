#[cfg(test)]
#[path = "../../../tests/unit/format/solution/writer_test.rs"]
mod writer_test;

use super::*;
use crate::format::problem::*;
use crate::format::{degrees_to_e6, ms_to_seconds};
use fieldroute_core::models::common::Distance;
use fieldroute_core::models::goal::{GoalContext, Score, ScoreLevel};
use fieldroute_core::models::problem::{Stop, VehicleIndex};
use fieldroute_core::models::solution::RouteGraph;
use rustc_hash::FxHashMap;

/// Writes route graph back into description shape: routes, unassigned visits, score and optional stats.
pub fn create_solution(
    description: &Description,
    graph: &RouteGraph,
    goal: &GoalContext,
    output: &OutputSettings,
) -> Solution {
    let (score, explanation) = if output.include_score_explanation {
        let explanation = goal.explain(graph);
        (explanation.score, Some(explanation.to_string()))
    } else {
        (goal.evaluate(graph), None)
    };

    let vehicles = graph.shift_teams().map(|(index, vehicle)| (vehicle.id, index)).collect::<FxHashMap<_, _>>();
    let values = graph.visits().map(|(_, stop, detail)| (stop.id, detail.value_cents)).collect::<FxHashMap<_, _>>();

    let solved = Description {
        locations: create_locations(graph),
        distance_matrix: if output.include_distance_matrix {
            create_distance_matrix(graph)
        } else {
            DistanceMatrix::default()
        },
        visits: description
            .visits
            .iter()
            .map(|visit| Visit {
                per_visit_revenue_usd_cents: values.get(&visit.id).copied().or(visit.per_visit_revenue_usd_cents),
                value: None,
                ..visit.clone()
            })
            .collect(),
        rest_breaks: description.rest_breaks.clone(),
        shift_teams: description
            .shift_teams
            .iter()
            .map(|team| ShiftTeam {
                route: vehicles.get(&team.id).map(|vehicle| create_route(graph, *vehicle, team)),
                ..team.clone()
            })
            .collect(),
        unassigned_visits: create_unassigned(graph),
        current_timestamp_sec: description.current_timestamp_sec,
    };

    Solution {
        description: solved,
        score: create_score(&score, explanation),
        total_stats: output.include_total_stats.then(|| create_statistic(graph)),
    }
}

/// Echoes description as is with a zero score.
pub fn create_no_demand_solution(description: &Description) -> Solution {
    Solution { description: description.clone(), score: create_score(&Score::default(), None), total_stats: None }
}

fn create_score(score: &Score, debug_explanation: Option<String>) -> SolutionScore {
    SolutionScore {
        is_feasible: score.is_feasible(),
        structural_score: score.level(ScoreLevel::Structural),
        hard_score: score.level(ScoreLevel::Hard),
        unassigned_visits_score: score.level(ScoreLevel::Unassigned),
        soft_score: score.level(ScoreLevel::Soft),
        debug_explanation,
    }
}

fn create_locations(graph: &RouteGraph) -> Vec<Location> {
    graph
        .transport()
        .locations()
        .iter()
        .map(|location| Location {
            id: location.id,
            latitude_e6: degrees_to_e6(location.latitude),
            longitude_e6: degrees_to_e6(location.longitude),
        })
        .collect()
}

fn create_distance_matrix(graph: &RouteGraph) -> DistanceMatrix {
    let transport = graph.transport();
    let mut distances = transport
        .distances()
        .map(|(from, to, distance)| DistanceEntry {
            from_location_id: transport.location(from).id,
            to_location_id: transport.location(to).id,
            duration_sec: ms_to_seconds(distance.duration),
            length_meters: distance.meters,
        })
        .collect::<Vec<_>>();
    distances.sort_by_key(|entry| (entry.from_location_id, entry.to_location_id));

    DistanceMatrix { distances }
}

/// Depot returns and current position markers are not part of the written route.
fn create_route(graph: &RouteGraph, vehicle: VehicleIndex, team: &ShiftTeam) -> ShiftTeamRoute {
    let stops = graph
        .route(vehicle)
        .map(|index| graph.stop(index))
        .filter(|stop| stop.is_visit() || stop.is_rest_break())
        .map(create_route_stop)
        .collect();

    ShiftTeamRoute {
        current_position: team.route_history.as_ref().and_then(|history| history.current_position.clone()),
        stops,
        depot_departure_timestamp_sec: Some(ms_to_seconds(graph.vehicle(vehicle).depot_departure())),
        depot_arrival_timestamp_sec: graph.depot_arrival(vehicle).map(ms_to_seconds),
    }
}

fn create_route_stop(stop: &Stop) -> RouteStop {
    RouteStop {
        visit: stop
            .is_visit()
            .then(|| RouteVisit { visit_id: stop.id, arrival_timestamp_sec: stop.arrival().map(ms_to_seconds) }),
        rest_break: stop.is_rest_break().then(|| RouteRestBreak { rest_break_id: stop.id }),
        pinned: Some(stop.pinned),
        actual_start_timestamp_sec: stop.observed_arrival().map(ms_to_seconds),
        actual_completion_timestamp_sec: stop.actual_completion().map(ms_to_seconds),
    }
}

fn create_unassigned(graph: &RouteGraph) -> Vec<UnassignedVisit> {
    let Some(sink) = graph.sink() else { return vec![] };

    let mut unassigned = graph
        .route(sink)
        .map(|index| graph.stop(index))
        .filter(|stop| stop.is_visit())
        .map(|stop| UnassignedVisit { visit_id: stop.id, pinned: Some(stop.pinned) })
        .collect::<Vec<_>>();
    unassigned.sort_by_key(|visit| visit.visit_id);

    unassigned
}

fn create_statistic(graph: &RouteGraph) -> Statistic {
    let drive = graph.shift_teams().map(|(index, _)| graph.total_distance(index)).sum::<Distance>();
    let service = graph
        .shift_teams()
        .flat_map(|(index, _)| graph.route(index))
        .map(|index| graph.stop(index))
        .filter(|stop| stop.is_visit())
        .map(|stop| stop.service_duration)
        .sum::<i64>();

    Statistic {
        drive_duration_sec: ms_to_seconds(drive.duration),
        drive_distance_meters: drive.meters,
        service_duration_sec: ms_to_seconds(service),
    }
}
