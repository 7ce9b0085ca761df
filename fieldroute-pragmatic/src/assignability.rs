//! Answers whether visits and shift teams are compatible by attributes and time windows, without building a
//! route graph or scoring anything. Batch queries are evaluated in parallel.

#[cfg(test)]
#[path = "../tests/unit/assignability_test.rs"]
mod assignability_test;

use crate::format::problem::TimeWindow;
use crate::format::{FormatError, to_core_window};
use fieldroute_core::construction::assignability::{
    AssignableStatus as CoreAssignableStatus, TimeWindowStatus as CoreTimeWindowStatus, check_assignability,
};
use fieldroute_core::models::problem::{AttributeRequirements, to_attribute_set};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A visit as seen by assignability query.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssignabilityVisit {
    pub id: i64,
    pub arrival_time_window: TimeWindow,
    #[serde(default)]
    pub required_attributes: Vec<String>,
    #[serde(default)]
    pub preferred_attributes: Vec<String>,
    #[serde(default)]
    pub forbidden_attributes: Vec<String>,
    #[serde(default)]
    pub unwanted_attributes: Vec<String>,
}

/// A shift team as seen by assignability query.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssignabilityShiftTeam {
    pub id: i64,
    pub available_time_window: TimeWindow,
    #[serde(default)]
    pub attributes: Vec<String>,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum AssignabilityStatus {
    Assignable,
    /// Only preferences are violated, a dispatcher may override.
    OverrideAssignable,
    NotAssignable,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TimeWindowStatus {
    Overlap,
    NoOverlap,
}

/// An assignability verdict with attribute mismatches sorted by id.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssignabilityResult {
    pub status: AssignabilityStatus,
    pub missing_required_attributes: Vec<String>,
    pub missing_preferred_attributes: Vec<String>,
    pub included_forbidden_attributes: Vec<String>,
    pub included_unwanted_attributes: Vec<String>,
    pub time_window_status: TimeWindowStatus,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssignableShiftTeamResult {
    pub shift_team: AssignabilityShiftTeam,
    #[serde(flatten)]
    pub result: AssignabilityResult,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssignableVisitResult {
    pub visit: AssignabilityVisit,
    #[serde(flatten)]
    pub result: AssignabilityResult,
}

/// Asks which shift teams can serve the visit.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssignableShiftTeamsRequest {
    pub visit: Option<AssignabilityVisit>,
    #[serde(default)]
    pub shift_teams: Vec<AssignabilityShiftTeam>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssignableShiftTeamsResponse {
    pub shift_teams: Vec<AssignableShiftTeamResult>,
}

/// Asks which visits the shift team can serve.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssignableVisitsRequest {
    pub shift_team: Option<AssignabilityShiftTeam>,
    #[serde(default)]
    pub visits: Vec<AssignabilityVisit>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssignableVisitsResponse {
    pub visits: Vec<AssignableVisitResult>,
}

/// Checks the visit against every shift team, results keep request order.
pub fn get_assignable_shift_teams(
    request: &AssignableShiftTeamsRequest,
) -> Result<AssignableShiftTeamsResponse, FormatError> {
    let visit = request.visit.as_ref().ok_or_else(|| missing_entity("E1800", "visit"))?;
    check_visit_window(visit)?;
    request.shift_teams.iter().try_for_each(check_shift_team_window)?;

    let shift_teams = request
        .shift_teams
        .par_iter()
        .map(|shift_team| AssignableShiftTeamResult {
            shift_team: shift_team.clone(),
            result: check_visit_assignability(visit, shift_team),
        })
        .collect();

    Ok(AssignableShiftTeamsResponse { shift_teams })
}

/// Checks every visit against the shift team, results keep request order.
pub fn get_assignable_visits(request: &AssignableVisitsRequest) -> Result<AssignableVisitsResponse, FormatError> {
    let shift_team = request.shift_team.as_ref().ok_or_else(|| missing_entity("E1801", "shift team"))?;
    check_shift_team_window(shift_team)?;
    request.visits.iter().try_for_each(check_visit_window)?;

    let visits = request
        .visits
        .par_iter()
        .map(|visit| AssignableVisitResult { visit: visit.clone(), result: check_visit_assignability(visit, shift_team) })
        .collect();

    Ok(AssignableVisitsResponse { visits })
}

/// Checks a single visit and shift team pair.
pub fn check_visit_assignability(visit: &AssignabilityVisit, shift_team: &AssignabilityShiftTeam) -> AssignabilityResult {
    let requirements = AttributeRequirements {
        required: to_attribute_set(&visit.required_attributes),
        preferred: to_attribute_set(&visit.preferred_attributes),
        forbidden: to_attribute_set(&visit.forbidden_attributes),
        unwanted: to_attribute_set(&visit.unwanted_attributes),
    };

    let assignability = check_assignability(
        &requirements,
        &to_core_window(&visit.arrival_time_window),
        &to_attribute_set(&shift_team.attributes),
        &to_core_window(&shift_team.available_time_window),
    );

    AssignabilityResult {
        status: match assignability.status {
            CoreAssignableStatus::Assignable => AssignabilityStatus::Assignable,
            CoreAssignableStatus::OverrideAssignable => AssignabilityStatus::OverrideAssignable,
            CoreAssignableStatus::NotAssignable => AssignabilityStatus::NotAssignable,
        },
        missing_required_attributes: assignability.attributes.missing_required,
        missing_preferred_attributes: assignability.attributes.missing_preferred,
        included_forbidden_attributes: assignability.attributes.included_forbidden,
        included_unwanted_attributes: assignability.attributes.included_unwanted,
        time_window_status: match assignability.time_window_status {
            CoreTimeWindowStatus::Overlap => TimeWindowStatus::Overlap,
            CoreTimeWindowStatus::NoOverlap => TimeWindowStatus::NoOverlap,
        },
    }
}

fn check_visit_window(visit: &AssignabilityVisit) -> Result<(), FormatError> {
    check_window("E1106", "visit", visit.id, &visit.arrival_time_window)
}

fn check_shift_team_window(shift_team: &AssignabilityShiftTeam) -> Result<(), FormatError> {
    check_window("E1209", "shift team", shift_team.id, &shift_team.available_time_window)
}

fn check_window(code: &str, what: &str, id: i64, window: &TimeWindow) -> Result<(), FormatError> {
    if window.start_timestamp_sec <= window.end_timestamp_sec {
        Ok(())
    } else {
        Err(FormatError::new(
            code.to_string(),
            format!("time window of {what} ends before it starts"),
            format!("fix time window of {what} with id '{id}'"),
        ))
    }
}

fn missing_entity(code: &str, what: &str) -> FormatError {
    FormatError::new(code.to_string(), format!("{what} is not set"), format!("set {what} in the query"))
}
