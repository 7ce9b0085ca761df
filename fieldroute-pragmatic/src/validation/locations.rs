#[cfg(test)]
#[path = "../../tests/unit/validation/locations_test.rs"]
mod locations_test;

use super::*;
use crate::utils::{combine_error_results, get_duplicates};

/// Amount of missing pairs listed in error details.
const MAX_REPORTED_PAIRS: usize = 10;

/// Checks that description has at least one location.
fn check_e1000_has_locations(ctx: &ValidationContext) -> Result<(), FormatError> {
    if ctx.description.locations.is_empty() {
        Err(FormatError::new(
            "E1000".to_string(),
            "no locations".to_string(),
            "add at least one location".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Checks that location ids are unique.
fn check_e1001_location_id_uniqueness(ctx: &ValidationContext) -> Result<(), FormatError> {
    let duplicates = get_duplicates(ctx.description.locations.iter().map(|location| &location.id)).unwrap_or_default();

    check_ids("E1001", "duplicated location ids", "remove duplicated location ids", &duplicates)
}

/// Checks that distance entries reference known locations only.
fn check_e1002_distance_locations_exist(ctx: &ValidationContext) -> Result<(), FormatError> {
    let mut unknown = ctx
        .description
        .distance_matrix
        .distances
        .iter()
        .flat_map(|entry| [entry.from_location_id, entry.to_location_id])
        .filter(|id| !ctx.has_location(*id))
        .collect::<Vec<_>>();
    unknown.sort();
    unknown.dedup();

    check_ids("E1002", "distance entry references unknown location", "add locations or remove entries", &unknown)
}

/// Checks that every pair of referenced locations has a distance.
fn check_e1003_distances_complete(ctx: &ValidationContext) -> Result<(), FormatError> {
    let known = ctx
        .description
        .distance_matrix
        .distances
        .iter()
        .map(|entry| (entry.from_location_id, entry.to_location_id))
        .collect::<FxHashSet<_>>();

    let mut referenced = get_referenced_locations(ctx).filter(|id| ctx.has_location(*id)).collect::<Vec<_>>();
    referenced.sort();
    referenced.dedup();

    let missing = referenced
        .iter()
        .flat_map(|from| referenced.iter().map(move |to| (*from, *to)))
        .filter(|(from, to)| from != to && !known.contains(&(*from, *to)))
        .collect::<Vec<_>>();

    if missing.is_empty() {
        Ok(())
    } else {
        let details = missing
            .iter()
            .take(MAX_REPORTED_PAIRS)
            .map(|(from, to)| format!("{from}->{to}"))
            .collect::<Vec<_>>()
            .join(", ");

        Err(FormatError::new_with_details(
            "E1003".to_string(),
            format!("missing distances between {} pairs of referenced locations", missing.len()),
            "add distances for every pair of used locations".to_string(),
            details,
        ))
    }
}

fn get_referenced_locations<'a>(ctx: &'a ValidationContext) -> impl Iterator<Item = i64> + 'a {
    let visits = ctx.visits().map(|visit| visit.location_id);
    let rest_breaks = ctx.rest_breaks().filter_map(|rest_break| rest_break.location_id);
    let depots = ctx.shift_teams().map(|team| team.depot_location_id);
    let positions = ctx.shift_teams().filter_map(|team| {
        team.route_history.as_ref().and_then(|history| history.current_position.as_ref()).map(|p| p.location_id)
    });

    visits.chain(rest_breaks).chain(depots).chain(positions)
}

/// Validates locations and distance matrix.
pub fn validate_locations(ctx: &ValidationContext) -> Result<(), Vec<FormatError>> {
    combine_error_results(&[
        check_e1000_has_locations(ctx),
        check_e1001_location_id_uniqueness(ctx),
        check_e1002_distance_locations_exist(ctx),
        check_e1003_distances_complete(ctx),
    ])
}
