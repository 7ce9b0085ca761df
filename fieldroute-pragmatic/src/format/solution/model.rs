use crate::format::problem::Description;
use serde::{Deserialize, Serialize};
use std::io::{BufReader, BufWriter, Error, Read, Write};

/// A solve progress marker of a response.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SolveStatus {
    /// An intermediate best solution without hard violations.
    IntermediateFeasible,
    /// An intermediate best solution which violates some hard rules.
    IntermediateInfeasible,
    /// A final solution.
    Finished,
}

/// A score split by levels.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SolutionScore {
    /// True when no hard level is penalized.
    pub is_feasible: bool,
    /// Rest breaks and depot returns placement penalty.
    pub structural_score: i64,
    /// Per stop violations: lateness, capacity and attribute mismatches.
    pub hard_score: i64,
    pub unassigned_visits_score: i64,
    /// Revenue minus costs in USD mills.
    pub soft_score: i64,
    /// A human readable score breakdown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_explanation: Option<String>,
}

/// Aggregated route statistic.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Statistic {
    pub drive_duration_sec: i64,
    pub drive_distance_meters: i64,
    pub service_duration_sec: i64,
}

/// A solution: echoed description with routes and unassigned visits filled in.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    pub description: Description,
    pub score: SolutionScore,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_stats: Option<Statistic>,
}

/// A response of a solve call.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SolveResponse {
    pub status: SolveStatus,
    pub solution: Solution,
}

/// Serializes `response` in json into `writer`.
pub fn serialize_response<W: Write>(response: &SolveResponse, writer: &mut BufWriter<W>) -> Result<(), Error> {
    serde_json::to_writer_pretty(writer, response).map_err(Error::from)
}

/// Deserializes solve response in json format from `BufReader`.
pub fn deserialize_response<R: Read>(reader: BufReader<R>) -> Result<SolveResponse, Error> {
    serde_json::from_reader(reader).map_err(Error::from)
}
