//! Provides scoring rules as features.

use crate::models::common::*;
use crate::models::config::{ConfigError, ConstraintConfig};
use crate::models::goal::*;
use crate::models::problem::*;
use crate::models::solution::*;
use std::sync::Arc;

mod breaks;
pub use self::breaks::*;

mod capacity;
pub use self::capacity::*;

mod lateness;
pub use self::lateness::*;

mod minimize_unassigned;
pub use self::minimize_unassigned::*;

mod skills;
pub use self::skills::*;

mod total_value;
pub use self::total_value::*;

mod tour_order;
pub use self::tour_order::*;

mod transport;
pub use self::transport::*;

mod work_balance;
pub use self::work_balance::*;

/// Creates all scoring features with their default names.
pub fn create_default_features() -> Vec<Feature> {
    vec![
        create_depot_return_placement_feature("depot_stops_on_correct_vehicles"),
        create_rest_break_placement_feature("rest_breaks_on_correct_vehicles"),
        create_late_visit_arrival_feature("customer_arrival_after_due_time"),
        create_late_depot_arrival_feature("depot_arrival_after_due_time"),
        create_capacity_feature("capacity_over_maximum"),
        create_attribute_mismatch_feature("shift_team_attributes_mismatch"),
        create_minimize_unassigned_feature("unassigned_visits"),
        create_visit_revenue_feature("visit_revenue"),
        create_foregone_visit_value_feature("foregone_visit_value"),
        create_driving_cost_feature("driving_cost"),
        create_base_wage_cost_feature("base_wage_cost"),
        create_on_scene_cost_feature("on_scene_cost"),
        create_overtime_cost_feature("overtime_cost"),
        create_visit_lateness_cost_feature("visit_linear_lateness_cost"),
        create_urgency_lateness_cost_feature("urgency_linear_lateness_cost"),
        create_depot_lateness_cost_feature("depot_linear_lateness_cost"),
        create_work_balance_feature("work_distribution"),
    ]
}

/// Creates a goal context with default features.
pub fn create_default_goal_context(config: ConstraintConfig) -> Result<GoalContext, ConfigError> {
    GoalContext::new(create_default_features(), Arc::new(config))
}

fn create_feature<O: FeatureObjective + 'static>(name: &str, level: ScoreLevel, objective: O) -> Feature {
    Feature { name: name.to_string(), level, objective: Arc::new(objective) }
}

/// Iterates over real visits served by shift teams.
fn served_visits<'a>(graph: &'a RouteGraph) -> impl Iterator<Item = (StopIndex, &'a Stop, &'a VisitDetail)> + 'a {
    graph.visits().filter(move |(idx, stop, _)| stop.is_attached() && !graph.is_on_sink(*idx))
}
