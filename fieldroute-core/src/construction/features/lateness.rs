#[cfg(test)]
#[path = "../../../tests/unit/construction/features/lateness_test.rs"]
mod lateness_test;

use super::*;
use crate::models::config::LinearLatenessPolicy;

/// Creates a feature which penalizes visits arriving after due time plus tolerance, by milliseconds late.
pub fn create_late_visit_arrival_feature(name: &str) -> Feature {
    create_feature(name, ScoreLevel::Hard, LateVisitArrivalObjective)
}

/// Creates a feature which penalizes depot arrival after due time plus threshold, by milliseconds late.
/// Threshold is zero when the route serves a visit which disallows late depot arrival.
pub fn create_late_depot_arrival_feature(name: &str) -> Feature {
    create_feature(name, ScoreLevel::Hard, LateDepotArrivalObjective)
}

/// Creates a feature with linear cost of lateness against visit due time.
pub fn create_visit_lateness_cost_feature(name: &str) -> Feature {
    create_feature(name, ScoreLevel::Soft, LatenessCostObjective { deadline: Deadline::VisitDue })
}

/// Creates a feature with linear cost of lateness against acuity urgency window end.
pub fn create_urgency_lateness_cost_feature(name: &str) -> Feature {
    create_feature(name, ScoreLevel::Soft, LatenessCostObjective { deadline: Deadline::UrgencyWindowEnd })
}

/// Creates a feature with linear cost of lateness against depot due time.
pub fn create_depot_lateness_cost_feature(name: &str) -> Feature {
    create_feature(name, ScoreLevel::Soft, LatenessCostObjective { deadline: Deadline::DepotDue })
}

struct LateVisitArrivalObjective;

impl FeatureObjective for LateVisitArrivalObjective {
    fn evaluate(&self, ctx: &ScoringContext) -> i64 {
        let graph = ctx.graph;

        -graph
            .visits()
            .filter(|(idx, stop, _)| stop.is_attached() && !graph.ignores_hard_constraints(*idx))
            .filter(|(_, stop, _)| stop.is_arrival_after_due(ctx.config.lateness_tolerance(stop.id)))
            .filter_map(|(_, stop, _)| stop.arrival().map(|arrival| arrival - stop.window.end))
            .sum::<Duration>()
    }
}

struct LateDepotArrivalObjective;

impl FeatureObjective for LateDepotArrivalObjective {
    fn evaluate(&self, ctx: &ScoringContext) -> i64 {
        let graph = ctx.graph;

        -graph
            .shift_teams()
            .filter(|(idx, _)| has_unpinned_stops(graph, *idx))
            .filter_map(|(idx, vehicle)| {
                let threshold = if has_disallowed_late_visit(graph, ctx.config, idx) {
                    0
                } else {
                    ctx.config.depot_hard_lateness_threshold
                };
                let due = vehicle.depot.window.end;

                graph.depot_arrival(idx).filter(|arrival| *arrival > due.saturating_add(threshold)).map(|arrival| arrival - due)
            })
            .sum::<Duration>()
    }
}

enum Deadline {
    VisitDue,
    UrgencyWindowEnd,
    DepotDue,
}

struct LatenessCostObjective {
    deadline: Deadline,
}

impl LatenessCostObjective {
    fn policy<'a>(&self, config: &'a ConstraintConfig) -> Option<&'a LinearLatenessPolicy> {
        match self.deadline {
            Deadline::VisitDue => config.visit_lateness.as_ref(),
            Deadline::UrgencyWindowEnd => config.urgency_lateness.as_ref(),
            Deadline::DepotDue => config.depot_lateness.as_ref(),
        }
    }
}

impl FeatureObjective for LatenessCostObjective {
    fn evaluate(&self, ctx: &ScoringContext) -> i64 {
        let Some(policy) = self.policy(ctx.config) else { return 0 };
        let graph = ctx.graph;

        let cost = match self.deadline {
            Deadline::VisitDue => served_visits(graph)
                .map(|(_, stop, _)| policy.cost(stop.lateness_with_offset(policy.offset)))
                .sum::<Mills>(),
            Deadline::UrgencyWindowEnd => served_visits(graph)
                .filter_map(|(_, stop, _)| stop.urgency_lateness_with_offset(policy.offset))
                .map(|lateness| policy.cost(lateness))
                .sum::<Mills>(),
            Deadline::DepotDue => graph
                .shift_teams()
                .filter(|(idx, _)| has_unpinned_stops(graph, *idx))
                .map(|(idx, _)| policy.cost(graph.depot_lateness_with_offset(idx, policy.offset)))
                .sum::<Mills>(),
        };

        -cost
    }
}

/// Depot lateness matters only for routes which the search can still change.
fn has_unpinned_stops(graph: &RouteGraph, vehicle: VehicleIndex) -> bool {
    graph.route(vehicle).map(|idx| graph.stop(idx)).any(|stop| !stop.is_depot_return() && !stop.pinned)
}

fn has_disallowed_late_visit(graph: &RouteGraph, config: &ConstraintConfig, vehicle: VehicleIndex) -> bool {
    !config.disallowed_late_arrival_visits.is_empty()
        && graph
            .route(vehicle)
            .map(|idx| graph.stop(idx))
            .any(|stop| stop.is_visit() && config.disallowed_late_arrival_visits.contains(&stop.id))
}
