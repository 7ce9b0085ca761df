//! Weights and thresholds of scoring rules.

#[cfg(test)]
#[path = "../../tests/unit/models/config_test.rs"]
mod config_test;

use crate::models::common::{Duration, MS_PER_MINUTE, Mills, Timestamp};
use crate::models::problem::StopId;
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

/// Default driving cost: 0.36 USD per kilometer.
pub const DEFAULT_DRIVING_COST_MILLS_PER_KM: Mills = 360;

/// An error raised when scoring configuration is incomplete or has invalid values.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} policy is not set")]
    PolicyNotSet(&'static str),
    #[error("work distribution base denominator must be positive, got {0}")]
    NonPositiveDenominator(i64),
    #[error("work distribution base numerator must be positive, got {0}")]
    NonPositiveNumerator(i64),
    #[error("feature '{0}' is defined more than once")]
    DuplicateFeature(String),
    #[error("{name} must not be negative, got {value}")]
    NegativeValue { name: &'static str, value: f64 },
}

/// A penalty growing linearly with lateness measured against a deadline moved earlier by an offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinearLatenessPolicy {
    /// Grace offset prior to the deadline.
    pub offset: Duration,
    pub cost_mills_per_minute: Mills,
}

impl LinearLatenessPolicy {
    /// Creates a policy from a cost given per millisecond.
    pub fn from_mills_per_ms(offset: Duration, mills_per_ms: f64) -> Self {
        Self { offset, cost_mills_per_minute: (mills_per_ms * MS_PER_MINUTE as f64) as Mills }
    }

    /// Returns cost of given lateness counted in whole minutes.
    pub fn cost(&self, lateness: Duration) -> Mills {
        lateness / MS_PER_MINUTE * self.cost_mills_per_minute
    }
}

/// A reward which grows with amount of served visits and saturates at the full queue value.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkDistributionPolicy {
    pub full_queue_value_mills: Mills,
    pub base_numerator: i64,
    pub base_denominator: i64,
}

impl WorkDistributionPolicy {
    /// Builds lookup table of rewards for `0..=max_visits` served visits.
    pub fn create_table(&self, max_visits: usize) -> Vec<Mills> {
        let base = self.base_numerator as f64 / self.base_denominator as f64;

        (0..=max_visits)
            .map(|visits| (self.full_queue_value_mills as f64 * (1. - 1. / base.powi(visits as i32))) as Mills)
            .collect()
    }
}

/// A validated scoring configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstraintConfig {
    pub(crate) hard_lateness_threshold: Duration,
    pub(crate) lateness_tolerance_overrides: FxHashMap<StopId, Duration>,
    pub(crate) visit_lateness: Option<LinearLatenessPolicy>,
    pub(crate) depot_hard_lateness_threshold: Duration,
    pub(crate) disallowed_late_arrival_visits: FxHashSet<StopId>,
    pub(crate) depot_lateness: Option<LinearLatenessPolicy>,
    pub(crate) urgency_lateness: Option<LinearLatenessPolicy>,
    pub(crate) on_scene_cost_scale_e6: i64,
    pub(crate) foregone_visit_value_cents_per_ms: f64,
    pub(crate) current_timestamp: Timestamp,
    pub(crate) driving_cost_mills_per_km: Mills,
    pub(crate) work_distribution: Vec<Mills>,
}

impl Default for ConstraintConfig {
    fn default() -> Self {
        Self {
            hard_lateness_threshold: 0,
            lateness_tolerance_overrides: FxHashMap::default(),
            visit_lateness: None,
            depot_hard_lateness_threshold: 0,
            disallowed_late_arrival_visits: FxHashSet::default(),
            depot_lateness: None,
            urgency_lateness: None,
            on_scene_cost_scale_e6: 0,
            foregone_visit_value_cents_per_ms: 0.,
            current_timestamp: 0,
            driving_cost_mills_per_km: DEFAULT_DRIVING_COST_MILLS_PER_KM,
            work_distribution: vec![],
        }
    }
}

impl ConstraintConfig {
    /// Returns lateness tolerance of the visit.
    pub fn lateness_tolerance(&self, visit: StopId) -> Duration {
        self.lateness_tolerance_overrides.get(&visit).copied().unwrap_or(self.hard_lateness_threshold)
    }

    /// Returns work distribution reward for given amount of served visits.
    pub fn work_distribution_value(&self, visits: usize) -> Mills {
        self.work_distribution.get(visits).or(self.work_distribution.last()).copied().unwrap_or(0)
    }

    pub fn current_timestamp(&self) -> Timestamp {
        self.current_timestamp
    }

    pub fn driving_cost_mills_per_km(&self) -> Mills {
        self.driving_cost_mills_per_km
    }
}

/// Builds [`ConstraintConfig`]. Sections which are present must select a policy.
#[derive(Debug, Default)]
pub struct ConstraintConfigBuilder {
    config: ConstraintConfig,
    visit_lateness: Option<Option<LinearLatenessPolicy>>,
    depot_lateness: Option<Option<LinearLatenessPolicy>>,
    work_distribution: Option<Option<(WorkDistributionPolicy, usize)>>,
    driving_cost: Option<Mills>,
}

impl ConstraintConfigBuilder {
    /// Sets visit late arrival section: hard threshold, per visit overrides and optional linear policy.
    pub fn visit_late_arrival(
        mut self,
        hard_threshold: Duration,
        overrides: impl IntoIterator<Item = (StopId, Duration)>,
        policy: Option<LinearLatenessPolicy>,
    ) -> Self {
        self.config.hard_lateness_threshold = hard_threshold;
        self.config.lateness_tolerance_overrides = overrides.into_iter().collect();
        self.visit_lateness = Some(policy);
        self
    }

    /// Sets depot late arrival section.
    pub fn depot_late_arrival(
        mut self,
        hard_threshold: Duration,
        disallowed_visits: impl IntoIterator<Item = StopId>,
        policy: Option<LinearLatenessPolicy>,
    ) -> Self {
        self.config.depot_hard_lateness_threshold = hard_threshold;
        self.config.disallowed_late_arrival_visits = disallowed_visits.into_iter().collect();
        self.depot_lateness = Some(policy);
        self
    }

    /// Sets acuity urgency window lateness policy.
    pub fn urgency_lateness(mut self, policy: Option<LinearLatenessPolicy>) -> Self {
        self.config.urgency_lateness = policy;
        self
    }

    /// Sets on scene cost scale as a decimal factor.
    pub fn on_scene_cost_scale(mut self, scale: f64) -> Self {
        self.config.on_scene_cost_scale_e6 = (scale * 1e6) as i64;
        self
    }

    /// Sets foregone visit value rate given in cents per minute.
    pub fn foregone_visit_value(mut self, cents_per_minute: f64) -> Self {
        self.config.foregone_visit_value_cents_per_ms = cents_per_minute / MS_PER_MINUTE as f64;
        self
    }

    pub fn current_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.config.current_timestamp = timestamp;
        self
    }

    pub fn driving_cost(mut self, mills_per_km: Mills) -> Self {
        self.driving_cost = Some(mills_per_km);
        self
    }

    /// Sets work distribution section with amount of visits the lookup table should cover.
    pub fn work_distribution(mut self, policy: Option<WorkDistributionPolicy>, max_visits: usize) -> Self {
        self.work_distribution = Some(policy.map(|policy| (policy, max_visits)));
        self
    }

    /// Validates settings and builds [`ConstraintConfig`].
    pub fn build(self) -> Result<ConstraintConfig, ConfigError> {
        let mut config = self.config;

        config.visit_lateness = require_policy(self.visit_lateness, "late arrival")?;
        config.depot_lateness = require_policy(self.depot_lateness, "depot late arrival")?;

        require_non_negative_rate(config.visit_lateness.as_ref(), "late arrival cost")?;
        require_non_negative_rate(config.depot_lateness.as_ref(), "depot late arrival cost")?;
        require_non_negative_rate(config.urgency_lateness.as_ref(), "urgency lateness cost")?;

        if config.on_scene_cost_scale_e6 < 0 {
            return Err(ConfigError::NegativeValue {
                name: "on scene cost scale",
                value: config.on_scene_cost_scale_e6 as f64 / 1e6,
            });
        }

        if config.foregone_visit_value_cents_per_ms < 0. {
            return Err(ConfigError::NegativeValue {
                name: "foregone visit value",
                value: config.foregone_visit_value_cents_per_ms * MS_PER_MINUTE as f64,
            });
        }

        if let Some(driving_cost) = self.driving_cost {
            if driving_cost < 0 {
                return Err(ConfigError::NegativeValue { name: "driving cost", value: driving_cost as f64 });
            }
            config.driving_cost_mills_per_km = driving_cost;
        }

        if let Some((policy, max_visits)) = require_policy(self.work_distribution, "work distribution")? {
            if policy.base_numerator <= 0 {
                return Err(ConfigError::NonPositiveNumerator(policy.base_numerator));
            }
            if policy.base_denominator <= 0 {
                return Err(ConfigError::NonPositiveDenominator(policy.base_denominator));
            }
            if policy.full_queue_value_mills < 0 {
                return Err(ConfigError::NegativeValue {
                    name: "full queue value",
                    value: policy.full_queue_value_mills as f64,
                });
            }
            config.work_distribution = policy.create_table(max_visits);
        }

        Ok(config)
    }
}

fn require_policy<T>(section: Option<Option<T>>, name: &'static str) -> Result<Option<T>, ConfigError> {
    match section {
        Some(None) => Err(ConfigError::PolicyNotSet(name)),
        Some(policy) => Ok(policy),
        None => Ok(None),
    }
}

fn require_non_negative_rate(policy: Option<&LinearLatenessPolicy>, name: &'static str) -> Result<(), ConfigError> {
    match policy {
        Some(policy) if policy.cost_mills_per_minute < 0 => {
            Err(ConfigError::NegativeValue { name, value: policy.cost_mills_per_minute as f64 })
        }
        _ => Ok(()),
    }
}
