//! Specifies logic to read a solve request from json input and turn it into a route graph.

use crate::format::{FormatError, MultiFormatError};
use crate::validation::ValidationContext;
use fieldroute_core::construction::features::create_default_goal_context;
use fieldroute_core::models::goal::GoalContext;
use fieldroute_core::models::solution::RouteGraph;
use std::io::{BufReader, Read};

mod model;
pub use self::model::*;

mod config_reader;
pub use self::config_reader::*;

mod reader;
pub use self::reader::resolve_visit_value;
use self::reader::read_graph;

/// Keeps everything needed to solve a request and to write its solution back.
pub struct ProblemContext {
    /// An original description, echoed in responses.
    pub description: Description,
    /// An initial route graph with propagated schedules.
    pub graph: RouteGraph,
    pub goal: GoalContext,
    pub settings: SolveSettings,
}

/// Reads specific problem definition from various sources.
pub trait PragmaticProblem {
    /// Reads and validates a solve request defined in pragmatic format.
    fn read_pragmatic(self) -> Result<ProblemContext, MultiFormatError>;
}

impl<R: Read> PragmaticProblem for BufReader<R> {
    fn read_pragmatic(self) -> Result<ProblemContext, MultiFormatError> {
        deserialize_request(self)?.read_pragmatic()
    }
}

impl PragmaticProblem for String {
    fn read_pragmatic(self) -> Result<ProblemContext, MultiFormatError> {
        BufReader::new(self.as_bytes()).read_pragmatic()
    }
}

impl PragmaticProblem for SolveRequest {
    fn read_pragmatic(self) -> Result<ProblemContext, MultiFormatError> {
        let SolveRequest { description, config } = self;
        let config = config.unwrap_or_default();

        ValidationContext::new(&description).validate()?;

        let constraint_config = read_constraint_config(&config, &description)?;
        let goal = create_default_goal_context(constraint_config).map_err(to_config_error)?;
        let graph = read_graph(&description, &read_profit_defaults(&config))?;
        let settings = read_solve_settings(&config);

        Ok(ProblemContext { description, graph, goal, settings })
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/format/problem/reader_test.rs"]
mod reader_test;

fn to_config_error(error: impl std::fmt::Display) -> FormatError {
    FormatError::new_with_details(
        "E1500".to_string(),
        "configuration is rejected".to_string(),
        "check constraint config section".to_string(),
        error.to_string(),
    )
}
