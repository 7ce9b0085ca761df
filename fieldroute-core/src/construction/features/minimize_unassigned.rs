#[cfg(test)]
#[path = "../../../tests/unit/construction/features/minimize_unassigned_test.rs"]
mod minimize_unassigned_test;

use super::*;

/// A base penalty of a single unassigned visit.
pub const UNASSIGNED_VISIT_BASE_PENALTY: i64 = 1000;

/// Creates a feature which penalizes real visits left on the sink vehicle. More acute and prioritized visits
/// cost more. Expendable and pinned visits are not penalized.
pub fn create_minimize_unassigned_feature(name: &str) -> Feature {
    create_feature(name, ScoreLevel::Unassigned, MinimizeUnassignedObjective)
}

struct MinimizeUnassignedObjective;

impl FeatureObjective for MinimizeUnassignedObjective {
    fn evaluate(&self, ctx: &ScoringContext) -> i64 {
        let graph = ctx.graph;

        -graph
            .visits()
            .filter(|(idx, stop, detail)| graph.is_on_sink(*idx) && !detail.expendable && !stop.pinned)
            .map(|(_, _, detail)| UNASSIGNED_VISIT_BASE_PENALTY + detail.acuity.level + 10 * detail.priority)
            .sum::<i64>()
    }
}
