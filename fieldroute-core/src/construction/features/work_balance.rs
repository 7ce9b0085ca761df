#[cfg(test)]
#[path = "../../../tests/unit/construction/features/work_balance_test.rs"]
mod work_balance_test;

use super::*;

/// Creates a feature which rewards every team by amount of distinct visits it serves. The reward saturates,
/// so spreading visits across teams scores better than overloading one.
pub fn create_work_balance_feature(name: &str) -> Feature {
    create_feature(name, ScoreLevel::Soft, WorkBalanceObjective)
}

struct WorkBalanceObjective;

impl FeatureObjective for WorkBalanceObjective {
    fn evaluate(&self, ctx: &ScoringContext) -> i64 {
        let graph = ctx.graph;

        graph
            .shift_teams()
            .map(|(idx, _)| graph.route(idx).filter(|stop| graph.stop(*stop).is_visit()).count())
            .filter(|visits| *visits > 0)
            .map(|visits| ctx.config.work_distribution_value(visits))
            .sum::<Mills>()
    }
}
