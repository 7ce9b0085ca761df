#[cfg(test)]
#[path = "../../../tests/unit/construction/features/breaks_test.rs"]
mod breaks_test;

use super::*;

/// Creates a feature which penalizes rest breaks which are not on their own team, including the sink vehicle.
pub fn create_rest_break_placement_feature(name: &str) -> Feature {
    create_feature(name, ScoreLevel::Structural, RestBreakPlacementObjective)
}

struct RestBreakPlacementObjective;

impl FeatureObjective for RestBreakPlacementObjective {
    fn evaluate(&self, ctx: &ScoringContext) -> i64 {
        let graph = ctx.graph;

        let misplaced = graph
            .stops()
            .filter(|(_, stop)| stop.is_rest_break() && !stop.pinned)
            .filter(|(idx, _)| !graph.is_on_owner_vehicle(*idx))
            .count();

        -(misplaced as i64)
    }
}
