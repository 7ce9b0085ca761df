#[cfg(test)]
#[path = "../../../tests/unit/construction/features/total_value_test.rs"]
mod total_value_test;

use super::*;

/// Creates a feature which rewards value of every served visit.
pub fn create_visit_revenue_feature(name: &str) -> Feature {
    create_feature(name, ScoreLevel::Soft, VisitRevenueObjective)
}

/// Creates a feature which penalizes value lost while a visit waits to be completed after current time.
pub fn create_foregone_visit_value_feature(name: &str) -> Feature {
    create_feature(name, ScoreLevel::Soft, ForegoneVisitValueObjective)
}

struct VisitRevenueObjective;

impl FeatureObjective for VisitRevenueObjective {
    fn evaluate(&self, ctx: &ScoringContext) -> i64 {
        served_visits(ctx.graph).map(|(_, _, detail)| detail.value_cents * MILLS_PER_CENT).sum::<Mills>()
    }
}

struct ForegoneVisitValueObjective;

impl FeatureObjective for ForegoneVisitValueObjective {
    fn evaluate(&self, ctx: &ScoringContext) -> i64 {
        let rate = ctx.config.foregone_visit_value_cents_per_ms;
        let now = ctx.config.current_timestamp;
        if rate == 0. {
            return 0;
        }

        -served_visits(ctx.graph)
            .filter(|(_, stop, _)| !stop.pinned)
            .filter_map(|(_, stop, _)| stop.arrival().filter(|arrival| *arrival > now).map(|arrival| (stop, arrival)))
            .map(|(stop, arrival)| {
                let waiting = stop.service_duration + arrival - now;
                (rate * waiting as f64) as i64 * MILLS_PER_CENT
            })
            .sum::<Mills>()
    }
}
