#[cfg(test)]
#[path = "../../../tests/unit/construction/features/tour_order_test.rs"]
mod tour_order_test;

use super::*;

/// Creates a feature which penalizes depot returns placed on a wrong team or not terminating their chain.
pub fn create_depot_return_placement_feature(name: &str) -> Feature {
    create_feature(name, ScoreLevel::Structural, DepotReturnPlacementObjective)
}

struct DepotReturnPlacementObjective;

impl FeatureObjective for DepotReturnPlacementObjective {
    fn evaluate(&self, ctx: &ScoringContext) -> i64 {
        let graph = ctx.graph;

        let misplaced = graph
            .stops()
            .filter(|(_, stop)| stop.is_depot_return())
            .filter(|(idx, _)| !(graph.is_on_owner_vehicle(*idx) && graph.is_in_order(*idx)))
            .count();

        -(misplaced as i64)
    }
}
