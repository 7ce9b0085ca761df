#[cfg(test)]
#[path = "../../../tests/unit/format/problem/model_test.rs"]
mod model_test;

use crate::format::{FormatError, MultiFormatError};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, BufWriter, Error, Read, Write};

// region Description

/// A solve request: problem description plus optional solver configuration.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveRequest {
    /// A problem description.
    pub description: Description,
    /// Solver configuration, defaults are used when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Config>,
}

/// A time window given by unix timestamps in seconds.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    pub start_timestamp_sec: i64,
    pub end_timestamp_sec: i64,
}

/// A geographic location with coordinates in millionths of a degree.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: i64,
    pub latitude_e6: i32,
    pub longitude_e6: i32,
}

/// A directed travel distance between two locations.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DistanceEntry {
    pub from_location_id: i64,
    pub to_location_id: i64,
    pub duration_sec: i64,
    pub length_meters: i64,
}

/// A pairwise distance matrix.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DistanceMatrix {
    #[serde(default)]
    pub distances: Vec<DistanceEntry>,
}

/// Clinical acuity of a visit.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VisitAcuity {
    /// Acuity level in `1..=9` range.
    pub level: i64,
    /// An urgency window, arrival after its end is penalized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_window: Option<TimeWindow>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VisitPriority {
    /// A level in `0..=9` range which multiplies the unassigned penalty.
    pub unassigned_priority_level: i64,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VisitValue {
    /// A value which overrides per visit revenue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_value_cents: Option<i64>,
}

/// A customer visit.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub id: i64,
    pub location_id: i64,
    pub arrival_time_window: TimeWindow,
    pub service_duration_sec: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_setup_duration_sec: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acuity: Option<VisitAcuity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<VisitPriority>,
    /// A shift team must have all of these attributes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_attributes: Vec<String>,
    /// A shift team should have these attributes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preferred_attributes: Vec<String>,
    /// A shift team must have none of these attributes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub forbidden_attributes: Vec<String>,
    /// A shift team should have none of these attributes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unwanted_attributes: Vec<String>,
    /// Overrides default per visit revenue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_visit_revenue_usd_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<VisitValue>,
    /// Visits with the same key in a row are served simultaneously.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlap_set_key: Option<String>,
    /// Expendable visits are not penalized when left unassigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_expendable: Option<bool>,
}

/// A rest break of a shift team.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RestBreak {
    pub id: i64,
    pub shift_team_id: i64,
    pub duration_sec: i64,
    /// Unrequested breaks float and can be taken anywhere within depot window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unrequested: Option<bool>,
    /// A fixed location of requested break.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<i64>,
    /// A fixed start of requested break.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_timestamp_sec: Option<i64>,
}

impl RestBreak {
    /// Returns true if the break has no fixed location and start.
    pub fn is_unrequested(&self) -> bool {
        self.unrequested.unwrap_or(false)
    }
}

/// A known position of a shift team.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShiftTeamPosition {
    pub location_id: i64,
    pub known_timestamp_sec: i64,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouteVisit {
    pub visit_id: i64,
    /// A planned arrival, filled in the response only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_timestamp_sec: Option<i64>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouteRestBreak {
    pub rest_break_id: i64,
}

/// A stop of a route: exactly one of visit or rest break must be set.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouteStop {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visit: Option<RouteVisit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_break: Option<RouteRestBreak>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_start_timestamp_sec: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_completion_timestamp_sec: Option<i64>,
}

/// A reference to a stop kept in a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StopRef {
    Visit(i64),
    RestBreak(i64),
}

impl std::fmt::Display for StopRef {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            StopRef::Visit(id) => write!(f, "visit {id}"),
            StopRef::RestBreak(id) => write!(f, "rest break {id}"),
        }
    }
}

impl RouteStop {
    /// Returns referenced stop if exactly one stop kind is set.
    pub fn stop_ref(&self) -> Option<StopRef> {
        match (&self.visit, &self.rest_break) {
            (Some(visit), None) => Some(StopRef::Visit(visit.visit_id)),
            (None, Some(rest_break)) => Some(StopRef::RestBreak(rest_break.rest_break_id)),
            _ => None,
        }
    }

    /// Returns true when the stop lacks either an observed start or a completion.
    pub fn is_in_progress(&self) -> bool {
        self.actual_start_timestamp_sec.is_none() || self.actual_completion_timestamp_sec.is_none()
    }
}

/// Already visited stops and last known position of a shift team.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouteHistory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_position: Option<ShiftTeamPosition>,
    #[serde(default)]
    pub stops: Vec<RouteStop>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Commitment {
    pub visit_id: i64,
}

/// Visits a shift team is committed to serve next, in order.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingCommitments {
    #[serde(default)]
    pub commitments: Vec<Commitment>,
}

/// A planned route of a shift team, filled in the response.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShiftTeamRoute {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_position: Option<ShiftTeamPosition>,
    #[serde(default)]
    pub stops: Vec<RouteStop>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depot_departure_timestamp_sec: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depot_arrival_timestamp_sec: Option<i64>,
}

/// A shift team which serves visits.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShiftTeam {
    pub id: i64,
    pub depot_location_id: i64,
    pub available_time_window: TimeWindow,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub provider_count: i64,
    #[serde(default)]
    pub technician_count: i64,
    /// Overrides default provider hourly cost.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_hourly_cost_usd_cents: Option<i64>,
    /// Overrides default technician hourly cost.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technician_hourly_cost_usd_cents: Option<i64>,
    /// A share of the shift which can be occupied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_capacity_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_history: Option<RouteHistory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upcoming_commitments: Option<UpcomingCommitments>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<ShiftTeamRoute>,
}

/// A visit which is known to be unassigned.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UnassignedVisit {
    pub visit_id: i64,
    /// Pinned visits are kept unassigned and are not penalized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
}

/// A problem description which is also echoed back with routes filled in.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Description {
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub distance_matrix: DistanceMatrix,
    #[serde(default)]
    pub visits: Vec<Visit>,
    #[serde(default)]
    pub rest_breaks: Vec<RestBreak>,
    #[serde(default)]
    pub shift_teams: Vec<ShiftTeam>,
    #[serde(default)]
    pub unassigned_visits: Vec<UnassignedVisit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_timestamp_sec: Option<i64>,
}

// endregion

// region Config

/// Specifies when the search stops.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TerminationType {
    /// Searches for the best solution until time budget is spent.
    #[default]
    BestFound,
    /// Stops as soon as a feasible solution is found.
    FirstFeasible,
}

/// Solver configuration.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub termination_type: Option<TerminationType>,
    /// A time budget of the search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub termination_duration_ms: Option<u64>,
    /// Stops the search when best score was not improved for this time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unimproved_score_termination_duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<u64>,
    #[serde(default)]
    pub include_intermediate_solutions: bool,
    #[serde(default)]
    pub include_intermediate_infeasible_solutions: bool,
    #[serde(default)]
    pub include_distance_matrix: bool,
    #[serde(default)]
    pub include_total_stats: bool,
    #[serde(default)]
    pub include_score_explanation: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driving_cost_usd_mills_per_kilometer: Option<i64>,
    /// Default per visit revenue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_visit_revenue_usd_cents: Option<i64>,
    /// Default provider hourly cost.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_hourly_cost_usd_cents: Option<i64>,
    /// Default technician hourly cost.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technician_hourly_cost_usd_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraint_config: Option<ConstraintConfig>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LateArrivalLinearOffsetPolicy {
    pub offset_prior_to_time_window_end_ms: i64,
    pub lateness_cost_usd_mills_per_ms: f64,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VisitLatenessTolerance {
    pub visit_id: i64,
    pub hard_lateness_threshold_ms: i64,
}

/// Visit late arrival section, a policy has to be selected when the section is present.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LateArrivalConfig {
    #[serde(default)]
    pub hard_lateness_threshold_ms: i64,
    #[serde(default)]
    pub visit_lateness_tolerance_overrides: Vec<VisitLatenessTolerance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linear_offset_policy: Option<LateArrivalLinearOffsetPolicy>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DepotLateArrivalLinearOffsetPolicy {
    pub offset_prior_to_depot_due_time_ms: i64,
    pub lateness_cost_usd_mills_per_ms: f64,
}

/// Depot late arrival section, a policy has to be selected when the section is present.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DepotLateArrivalConfig {
    #[serde(default)]
    pub hard_lateness_threshold_ms: i64,
    /// Routes with any of these visits cannot arrive to depot late.
    #[serde(default)]
    pub disallowed_late_arrival_visit_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linear_offset_policy: Option<DepotLateArrivalLinearOffsetPolicy>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UrgencyLinearOffsetPolicy {
    pub offset_prior_to_urgency_window_end_ms: i64,
    pub lateness_cost_usd_mills_per_ms: f64,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalUrgencyConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linear_offset_policy: Option<UrgencyLinearOffsetPolicy>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LinearOnSceneCostPolicy {
    pub scaling_factor: f64,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LinearForegoneVisitValuePolicy {
    pub cents_per_minute: f64,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityCostConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linear_on_scene_cost_policy: Option<LinearOnSceneCostPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linear_foregone_visit_value_policy: Option<LinearForegoneVisitValuePolicy>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExponentialWorkDistributionPolicy {
    pub full_queue_value_limit_usd_mills: i64,
    pub base_numerator: i64,
    pub base_denominator: i64,
}

/// Work distribution section, a policy has to be selected when the section is present.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkDistributionConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exponential_policy: Option<ExponentialWorkDistributionPolicy>,
}

/// Scoring rule weights and thresholds.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub late_arrival: Option<LateArrivalConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depot_late_arrival: Option<DepotLateArrivalConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinical_urgency: Option<ClinicalUrgencyConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opportunity_cost: Option<OpportunityCostConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_distribution: Option<WorkDistributionConfig>,
}

// endregion

/// Deserializes solve request in json format from `BufReader`.
pub fn deserialize_request<R: Read>(reader: BufReader<R>) -> Result<SolveRequest, MultiFormatError> {
    serde_json::from_reader(reader).map_err(|err| {
        vec![FormatError::new(
            "E1600".to_string(),
            "cannot deserialize solve request".to_string(),
            format!("check input json: '{err}'"),
        )]
        .into()
    })
}

/// Serializes `request` in json from `writer`.
pub fn serialize_request<W: Write>(request: &SolveRequest, writer: &mut BufWriter<W>) -> Result<(), Error> {
    serde_json::to_writer_pretty(writer, request).map_err(Error::from)
}
