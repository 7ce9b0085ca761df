#[cfg(test)]
#[path = "../../../tests/unit/construction/features/transport_test.rs"]
mod transport_test;

use super::*;

/// Creates a feature which penalizes driven kilometers.
pub fn create_driving_cost_feature(name: &str) -> Feature {
    create_feature(name, ScoreLevel::Soft, DrivingCostObjective)
}

/// Creates a feature which penalizes wages paid for the whole scheduled shift.
pub fn create_base_wage_cost_feature(name: &str) -> Feature {
    create_feature(name, ScoreLevel::Soft, BaseWageCostObjective)
}

/// Creates a feature which penalizes staffing cost of time spent on scene, scaled by configuration.
pub fn create_on_scene_cost_feature(name: &str) -> Feature {
    create_feature(name, ScoreLevel::Soft, OnSceneCostObjective)
}

/// Creates a feature which penalizes wages paid for time after shift end.
pub fn create_overtime_cost_feature(name: &str) -> Feature {
    create_feature(name, ScoreLevel::Soft, OvertimeCostObjective)
}

struct DrivingCostObjective;

impl FeatureObjective for DrivingCostObjective {
    fn evaluate(&self, ctx: &ScoringContext) -> i64 {
        let graph = ctx.graph;
        let rate = ctx.config.driving_cost_mills_per_km;

        -graph
            .shift_teams()
            .map(|(idx, _)| graph.total_distance(idx).meters)
            .filter(|meters| *meters > 0)
            .map(|meters| meters / METERS_PER_KILOMETER * rate)
            .sum::<Mills>()
    }
}

struct BaseWageCostObjective;

impl FeatureObjective for BaseWageCostObjective {
    fn evaluate(&self, ctx: &ScoringContext) -> i64 {
        -ctx.graph.shift_teams().map(|(_, vehicle)| vehicle.staffing.cost_of(vehicle.scheduled_duration())).sum::<Mills>()
    }
}

struct OnSceneCostObjective;

impl FeatureObjective for OnSceneCostObjective {
    fn evaluate(&self, ctx: &ScoringContext) -> i64 {
        let graph = ctx.graph;
        let scale = ctx.config.on_scene_cost_scale_e6 as i128;
        if scale == 0 {
            return 0;
        }

        -served_visits(graph)
            .filter_map(|(_, stop, _)| stop.vehicle().map(|vehicle| (stop, graph.vehicle(vehicle))))
            .map(|(stop, vehicle)| {
                let hourly_mills = (vehicle.staffing.hourly_cost_cents() * MILLS_PER_CENT) as i128;
                (stop.service_duration as i128 * hourly_mills * scale / MS_PER_HOUR as i128 / 1_000_000) as Mills
            })
            .sum::<Mills>()
    }
}

struct OvertimeCostObjective;

impl FeatureObjective for OvertimeCostObjective {
    fn evaluate(&self, ctx: &ScoringContext) -> i64 {
        let graph = ctx.graph;

        -graph.shift_teams().map(|(idx, vehicle)| vehicle.staffing.cost_of(graph.overtime(idx))).sum::<Mills>()
    }
}
