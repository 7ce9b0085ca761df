#[cfg(test)]
#[path = "../../../tests/unit/construction/features/capacity_test.rs"]
mod capacity_test;

use super::*;

/// Creates a feature which penalizes time budget used over team capacity, in milliseconds.
pub fn create_capacity_feature(name: &str) -> Feature {
    create_feature(name, ScoreLevel::Hard, CapacityObjective)
}

struct CapacityObjective;

impl FeatureObjective for CapacityObjective {
    fn evaluate(&self, ctx: &ScoringContext) -> i64 {
        let graph = ctx.graph;

        -graph
            .shift_teams()
            .filter_map(|(idx, vehicle)| vehicle.capacity.map(|capacity| graph.occupied_capacity(idx) - capacity))
            .filter(|excess| *excess > 0)
            .sum::<Duration>()
    }
}
