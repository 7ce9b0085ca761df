//! This module defines logic to deserialize a solve request in pragmatic format, build a route graph out of it
//! and write the graph back into the same json shape.
//!

use fieldroute_core::models::common::{MS_PER_SECOND, TimeWindow as CoreTimeWindow, Timestamp};
use serde::Serialize;
use thiserror::Error;

pub mod problem;
pub mod solution;

/// A format error.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize)]
#[error("{code}, cause: '{cause}', action: '{action}'.")]
pub struct FormatError {
    /// An error code in registry.
    pub code: String,
    /// A possible error cause.
    pub cause: String,
    /// An action to take in order to recover from error.
    pub action: String,
    /// A details about exception.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl FormatError {
    /// Creates a new instance of `FormatError` action without details.
    pub fn new(code: String, cause: String, action: String) -> Self {
        Self { code, cause, action, details: None }
    }

    /// Creates a new instance of `FormatError` action.
    pub fn new_with_details(code: String, cause: String, action: String, details: String) -> Self {
        Self { code, cause, action, details: Some(details) }
    }

    /// Serializes error into json string.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Formats multiple format errors into json string.
    pub fn format_many_to_json(errors: &[Self]) -> String {
        serde_json::to_string_pretty(errors).unwrap_or_default()
    }

    /// Formats multiple format errors into string.
    pub fn format_many(errors: &[Self], separator: &str) -> String {
        errors.iter().map(|err| err.to_string()).collect::<Vec<_>>().join(separator)
    }
}

/// Keeps all format errors found in a request.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{}", FormatError::format_many(.errors, "\n"))]
pub struct MultiFormatError {
    pub errors: Vec<FormatError>,
}

impl MultiFormatError {
    /// Returns error codes in the order errors were found.
    pub fn codes(&self) -> Vec<&str> {
        self.errors.iter().map(|err| err.code.as_str()).collect()
    }
}

impl From<Vec<FormatError>> for MultiFormatError {
    fn from(errors: Vec<FormatError>) -> Self {
        Self { errors }
    }
}

impl From<FormatError> for MultiFormatError {
    fn from(error: FormatError) -> Self {
        Self { errors: vec![error] }
    }
}

impl IntoIterator for MultiFormatError {
    type Item = FormatError;
    type IntoIter = std::vec::IntoIter<FormatError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

pub(crate) fn seconds_to_ms(seconds: i64) -> Timestamp {
    seconds.saturating_mul(MS_PER_SECOND)
}

pub(crate) fn ms_to_seconds(ms: Timestamp) -> i64 {
    ms / MS_PER_SECOND
}

pub(crate) fn e6_to_degrees(value: i32) -> f64 {
    value as f64 / 1e6
}

pub(crate) fn degrees_to_e6(value: f64) -> i32 {
    (value * 1e6).round() as i32
}

pub(crate) fn to_core_window(window: &problem::TimeWindow) -> CoreTimeWindow {
    CoreTimeWindow::new(seconds_to_ms(window.start_timestamp_sec), seconds_to_ms(window.end_timestamp_sec))
}
