//! This module reimports commonly used types.

pub use crate::construction::assignability::{Assignability, AssignableStatus, TimeWindowStatus, check_assignability};
pub use crate::construction::features::create_default_goal_context;
pub use crate::construction::schedule_update::{update_all_schedules, update_schedules};
pub use crate::models::common::{Distance, Duration, TimeWindow, Timestamp};
pub use crate::models::config::{ConfigError, ConstraintConfig, ConstraintConfigBuilder};
pub use crate::models::goal::{GoalContext, Score, ScoreExplanation};
pub use crate::models::solution::{GraphError, RouteGraph, Standstill};
pub use crate::solver::{Solver, SolverOutcome};
