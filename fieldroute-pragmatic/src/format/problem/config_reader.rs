#[cfg(test)]
#[path = "../../../tests/unit/format/problem/config_reader_test.rs"]
mod config_reader_test;

use super::*;
use crate::format::seconds_to_ms;
use fieldroute_core::models::config::{
    ConstraintConfig as CoreConstraintConfig, ConstraintConfigBuilder, LinearLatenessPolicy, WorkDistributionPolicy,
};

/// A search time budget used when the request has none.
pub const DEFAULT_TERMINATION_DURATION_MS: u64 = 100;
pub const DEFAULT_RANDOM_SEED: u64 = 0;
pub const DEFAULT_PER_VISIT_REVENUE_CENTS: i64 = 25_000;
pub const DEFAULT_PROVIDER_HOURLY_COST_CENTS: i64 = 6_000;
pub const DEFAULT_TECHNICIAN_HOURLY_COST_CENTS: i64 = 2_200;

/// Revenue and wage rates used when visits and shift teams do not override them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfitDefaults {
    pub per_visit_revenue_cents: i64,
    pub provider_hourly_cost_cents: i64,
    pub technician_hourly_cost_cents: i64,
}

impl Default for ProfitDefaults {
    fn default() -> Self {
        Self {
            per_visit_revenue_cents: DEFAULT_PER_VISIT_REVENUE_CENTS,
            provider_hourly_cost_cents: DEFAULT_PROVIDER_HOURLY_COST_CENTS,
            technician_hourly_cost_cents: DEFAULT_TECHNICIAN_HOURLY_COST_CENTS,
        }
    }
}

/// Specifies which intermediate best solutions are delivered while searching.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapshotMode {
    Disabled,
    FeasibleOnly,
    All,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminationSettings {
    /// A total time budget.
    pub duration_ms: u64,
    /// Stops when best score is not improved for this time.
    pub unimproved_ms: Option<u64>,
    /// Stops as soon as the best score is feasible.
    pub first_feasible: bool,
}

/// Optional parts of the response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutputSettings {
    pub include_distance_matrix: bool,
    pub include_total_stats: bool,
    pub include_score_explanation: bool,
}

/// Search and output settings of a single solve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolveSettings {
    pub termination: TerminationSettings,
    pub random_seed: u64,
    pub snapshots: SnapshotMode,
    pub output: OutputSettings,
}

/// Reads default revenue and wage rates.
pub fn read_profit_defaults(config: &Config) -> ProfitDefaults {
    let defaults = ProfitDefaults::default();

    ProfitDefaults {
        per_visit_revenue_cents: config.per_visit_revenue_usd_cents.unwrap_or(defaults.per_visit_revenue_cents),
        provider_hourly_cost_cents: config
            .provider_hourly_cost_usd_cents
            .unwrap_or(defaults.provider_hourly_cost_cents),
        technician_hourly_cost_cents: config
            .technician_hourly_cost_usd_cents
            .unwrap_or(defaults.technician_hourly_cost_cents),
    }
}

/// Reads termination, seed, snapshot and output settings.
pub fn read_solve_settings(config: &Config) -> SolveSettings {
    let first_feasible = config.termination_type.unwrap_or_default() == TerminationType::FirstFeasible;

    let snapshots = match (first_feasible, config.include_intermediate_solutions) {
        (false, true) if config.include_intermediate_infeasible_solutions => SnapshotMode::All,
        (false, true) => SnapshotMode::FeasibleOnly,
        _ => SnapshotMode::Disabled,
    };

    SolveSettings {
        termination: TerminationSettings {
            duration_ms: config.termination_duration_ms.unwrap_or(DEFAULT_TERMINATION_DURATION_MS),
            unimproved_ms: config.unimproved_score_termination_duration_ms.filter(|ms| *ms > 0),
            first_feasible,
        },
        random_seed: config.random_seed.unwrap_or(DEFAULT_RANDOM_SEED),
        snapshots,
        output: OutputSettings {
            include_distance_matrix: config.include_distance_matrix,
            include_total_stats: config.include_total_stats,
            include_score_explanation: config.include_score_explanation,
        },
    }
}

/// Reads scoring configuration. A section which is present must select its policy.
pub fn read_constraint_config(
    config: &Config,
    description: &Description,
) -> Result<CoreConstraintConfig, FormatError> {
    let current_timestamp = description.current_timestamp_sec.map_or(0, seconds_to_ms);
    let mut builder = ConstraintConfigBuilder::default().current_timestamp(current_timestamp);

    if let Some(driving_cost) = config.driving_cost_usd_mills_per_kilometer {
        builder = builder.driving_cost(driving_cost);
    }

    let Some(section) = config.constraint_config.as_ref() else {
        return builder.build().map_err(to_config_error);
    };

    if let Some(late_arrival) = section.late_arrival.as_ref() {
        let overrides = late_arrival
            .visit_lateness_tolerance_overrides
            .iter()
            .map(|tolerance| (tolerance.visit_id, tolerance.hard_lateness_threshold_ms));
        let policy = late_arrival.linear_offset_policy.as_ref().map(|policy| {
            LinearLatenessPolicy::from_mills_per_ms(
                policy.offset_prior_to_time_window_end_ms,
                policy.lateness_cost_usd_mills_per_ms,
            )
        });

        builder = builder.visit_late_arrival(late_arrival.hard_lateness_threshold_ms, overrides, policy);
    }

    if let Some(depot_late_arrival) = section.depot_late_arrival.as_ref() {
        let policy = depot_late_arrival.linear_offset_policy.as_ref().map(|policy| {
            LinearLatenessPolicy::from_mills_per_ms(
                policy.offset_prior_to_depot_due_time_ms,
                policy.lateness_cost_usd_mills_per_ms,
            )
        });

        builder = builder.depot_late_arrival(
            depot_late_arrival.hard_lateness_threshold_ms,
            depot_late_arrival.disallowed_late_arrival_visit_ids.iter().copied(),
            policy,
        );
    }

    if let Some(urgency) = section.clinical_urgency.as_ref() {
        builder = builder.urgency_lateness(urgency.linear_offset_policy.as_ref().map(|policy| {
            LinearLatenessPolicy::from_mills_per_ms(
                policy.offset_prior_to_urgency_window_end_ms,
                policy.lateness_cost_usd_mills_per_ms,
            )
        }));
    }

    if let Some(opportunity_cost) = section.opportunity_cost.as_ref() {
        if let Some(policy) = opportunity_cost.linear_on_scene_cost_policy.as_ref() {
            builder = builder.on_scene_cost_scale(policy.scaling_factor);
        }
        if let Some(policy) = opportunity_cost.linear_foregone_visit_value_policy.as_ref() {
            builder = builder.foregone_visit_value(policy.cents_per_minute);
        }
    }

    if let Some(work_distribution) = section.work_distribution.as_ref() {
        let policy = work_distribution.exponential_policy.as_ref().map(|policy| WorkDistributionPolicy {
            full_queue_value_mills: policy.full_queue_value_limit_usd_mills,
            base_numerator: policy.base_numerator,
            base_denominator: policy.base_denominator,
        });

        builder = builder.work_distribution(policy, description.visits.len());
    }

    builder.build().map_err(to_config_error)
}
