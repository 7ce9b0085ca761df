#[cfg(test)]
#[path = "../../../tests/unit/construction/features/skills_test.rs"]
mod skills_test;

use super::*;
use crate::construction::assignability::AttributeCheck;

/// Creates a feature which penalizes every missing required or included forbidden attribute of served visits.
pub fn create_attribute_mismatch_feature(name: &str) -> Feature {
    create_feature(name, ScoreLevel::Hard, AttributeMismatchObjective)
}

struct AttributeMismatchObjective;

impl FeatureObjective for AttributeMismatchObjective {
    fn evaluate(&self, ctx: &ScoringContext) -> i64 {
        let graph = ctx.graph;

        -graph
            .visits()
            .filter(|(idx, _, _)| !graph.ignores_hard_constraints(*idx))
            .filter_map(|(_, stop, detail)| {
                let vehicle = graph.vehicle(stop.vehicle()?);
                Some(AttributeCheck::new(&detail.requirements, &vehicle.attributes).hard_problem_count() as i64)
            })
            .sum::<i64>()
    }
}
