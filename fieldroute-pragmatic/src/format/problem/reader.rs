//! Builds a route graph out of a validated problem description.

use super::*;
use crate::format::{e6_to_degrees, seconds_to_ms, to_core_window};
use fieldroute_core::construction::schedule_update::update_all_schedules;
use fieldroute_core::models::common::{Distance, Timestamp};
use fieldroute_core::models::problem::{
    Acuity, AttributeRequirements, Depot, Location as CoreLocation, LocationIndex, Staffing, Stop, StopBuilder,
    TransportMatrix, Vehicle, VehicleBuilder, VisitDetail, to_attribute_set,
};
use fieldroute_core::models::solution::GraphError;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Returns visit value: completion value beats per visit revenue which beats the default.
pub fn resolve_visit_value(visit: &Visit, default_cents: i64) -> i64 {
    visit
        .value
        .as_ref()
        .and_then(|value| value.completion_value_cents)
        .or(visit.per_visit_revenue_usd_cents)
        .unwrap_or(default_cents)
}

/// Reads a route graph: team chains are restored from history and commitments, everything else starts
/// on the sink chain.
pub(super) fn read_graph(description: &Description, defaults: &ProfitDefaults) -> Result<RouteGraph, FormatError> {
    let transport = read_transport(description);
    let depots = description
        .shift_teams
        .iter()
        .map(|team| Ok((team.id, read_depot(&transport, team)?)))
        .collect::<Result<FxHashMap<_, _>, FormatError>>()?;

    let mut pool = StopPool::default();
    for visit in description.visits.iter() {
        pool.add(StopRef::Visit(visit.id), read_visit(&transport, visit, defaults)?);
    }
    for rest_break in description.rest_breaks.iter() {
        pool.add(StopRef::RestBreak(rest_break.id), read_rest_break(&transport, &depots, rest_break)?);
    }

    let mut chains = Vec::with_capacity(description.shift_teams.len() + 1);
    for team in description.shift_teams.iter() {
        let depot = depots.get(&team.id).ok_or_else(|| unknown_entity("E1202", "shift team depot", team.id))?;
        let vehicle = read_vehicle(team, depot.clone(), defaults);
        let stops = read_team_stops(&transport, &mut pool, team, depot)?;

        chains.push((vehicle, stops));
    }

    let sink_location =
        description.shift_teams.first().and_then(|team| depots.get(&team.id)).map_or(LocationIndex(0), |d| d.location);
    let sink_stops = read_sink_stops(&mut pool, description)?;
    chains.push((VehicleBuilder::sink(sink_location).build(), sink_stops));

    let mut graph = RouteGraph::new(Arc::new(transport));
    for (vehicle, stops) in chains {
        let vehicle = graph.add_vehicle(vehicle);
        for stop in stops {
            let stop = graph.add_stop(stop);
            graph.push_back(vehicle, stop).map_err(to_placement_error)?;
        }
    }

    update_all_schedules(&mut graph);

    Ok(graph)
}

/// Keeps visits and rest breaks not placed on any chain yet, in request order.
#[derive(Default)]
struct StopPool {
    builders: FxHashMap<StopRef, StopBuilder>,
    order: Vec<StopRef>,
}

impl StopPool {
    fn add(&mut self, key: StopRef, builder: StopBuilder) {
        self.order.push(key);
        self.builders.insert(key, builder);
    }

    fn take(&mut self, key: StopRef) -> Result<StopBuilder, FormatError> {
        self.builders.remove(&key).ok_or_else(|| {
            FormatError::new(
                "E1208".to_string(),
                format!("{key} is unknown or placed more than once"),
                "keep a single placement of stops".to_string(),
            )
        })
    }

    fn drain(&mut self) -> Vec<StopBuilder> {
        let order = std::mem::take(&mut self.order);

        order.into_iter().filter_map(|key| self.builders.remove(&key)).collect()
    }
}

fn read_transport(description: &Description) -> TransportMatrix {
    let mut transport = TransportMatrix::default();

    description.locations.iter().for_each(|location| {
        transport.add_location(CoreLocation {
            id: location.id,
            latitude: e6_to_degrees(location.latitude_e6),
            longitude: e6_to_degrees(location.longitude_e6),
        });
    });

    description.distance_matrix.distances.iter().for_each(|entry| {
        if let (Some(from), Some(to)) =
            (transport.index_of(entry.from_location_id), transport.index_of(entry.to_location_id))
        {
            transport.set_distance(from, to, Distance::new(seconds_to_ms(entry.duration_sec), entry.length_meters));
        }
    });

    transport
}

fn read_depot(transport: &TransportMatrix, team: &ShiftTeam) -> Result<Depot, FormatError> {
    let location = get_location(transport, team.depot_location_id, "E1202")?;

    Ok(Depot { location, window: to_core_window(&team.available_time_window) })
}

fn read_vehicle(team: &ShiftTeam, depot: Depot, defaults: &ProfitDefaults) -> Vehicle {
    let staffing = Staffing {
        providers: team.provider_count,
        technicians: team.technician_count,
        provider_hourly_cost_cents: team.provider_hourly_cost_usd_cents.unwrap_or(defaults.provider_hourly_cost_cents),
        technician_hourly_cost_cents: team
            .technician_hourly_cost_usd_cents
            .unwrap_or(defaults.technician_hourly_cost_cents),
    };
    let capacity = team.allowed_capacity_ratio.map(|ratio| (ratio * depot.window.duration() as f64) as i64);
    let earliest_departure = get_earliest_depot_departure(team).unwrap_or(depot.window.start);

    VehicleBuilder::shift_team(team.id, depot)
        .attributes(to_attribute_set(&team.attributes))
        .staffing(staffing)
        .capacity(capacity)
        .earliest_depot_departure(earliest_departure)
        .build()
}

/// A team which has not started its first history stop leaves the depot not earlier than its known position time.
fn get_earliest_depot_departure(team: &ShiftTeam) -> Option<Timestamp> {
    let history = team.route_history.as_ref()?;
    let position = history.current_position.as_ref()?;
    let has_started = history.stops.first().is_some_and(|stop| stop.actual_start_timestamp_sec.is_some());

    (!has_started).then(|| seconds_to_ms(position.known_timestamp_sec))
}

fn read_visit(transport: &TransportMatrix, visit: &Visit, defaults: &ProfitDefaults) -> Result<StopBuilder, FormatError> {
    let location = get_location(transport, visit.location_id, "E1100")?;
    let acuity = visit.acuity.as_ref().ok_or_else(|| unknown_entity("E1102", "acuity of visit", visit.id))?;

    let detail = VisitDetail {
        acuity: Acuity { level: acuity.level, window: acuity.time_window.as_ref().map(to_core_window) },
        priority: visit.priority.as_ref().map_or(0, |priority| priority.unassigned_priority_level),
        value_cents: resolve_visit_value(visit, defaults.per_visit_revenue_cents),
        requirements: AttributeRequirements {
            required: to_attribute_set(&visit.required_attributes),
            preferred: to_attribute_set(&visit.preferred_attributes),
            forbidden: to_attribute_set(&visit.forbidden_attributes),
            unwanted: to_attribute_set(&visit.unwanted_attributes),
        },
        expendable: visit.is_expendable.unwrap_or(false),
    };

    Ok(StopBuilder::visit(visit.id, location, detail)
        .window(to_core_window(&visit.arrival_time_window))
        .service_duration(seconds_to_ms(visit.service_duration_sec))
        .extra_setup_duration(visit.extra_setup_duration_sec.map_or(0, seconds_to_ms))
        .overlap_key(visit.overlap_set_key.as_deref()))
}

fn read_rest_break(
    transport: &TransportMatrix,
    depots: &FxHashMap<i64, Depot>,
    rest_break: &RestBreak,
) -> Result<StopBuilder, FormatError> {
    let duration = seconds_to_ms(rest_break.duration_sec);

    if rest_break.is_unrequested() {
        let depot = depots
            .get(&rest_break.shift_team_id)
            .ok_or_else(|| unknown_entity("E1300", "shift team of rest break", rest_break.id))?;

        return Ok(StopBuilder::unrequested_rest_break(rest_break.id, rest_break.shift_team_id, depot, duration));
    }

    match (rest_break.location_id, rest_break.start_timestamp_sec) {
        (Some(location_id), Some(start)) => {
            let location = get_location(transport, location_id, "E1302")?;

            Ok(StopBuilder::requested_rest_break(
                rest_break.id,
                rest_break.shift_team_id,
                location,
                seconds_to_ms(start),
                duration,
            ))
        }
        _ => Err(unknown_entity("E1301", "location or start of requested rest break", rest_break.id)),
    }
}

/// Restores a team chain: history stops, current position marker, commitments and the final depot return.
fn read_team_stops(
    transport: &TransportMatrix,
    pool: &mut StopPool,
    team: &ShiftTeam,
    depot: &Depot,
) -> Result<Vec<Stop>, FormatError> {
    let empty_history = RouteHistory::default();
    let history = team.route_history.as_ref().unwrap_or(&empty_history);
    let known_at = history.current_position.as_ref().map(|position| seconds_to_ms(position.known_timestamp_sec));

    let mut stops = history
        .stops
        .iter()
        .map(|route_stop| {
            let key = route_stop.stop_ref().ok_or_else(|| unknown_entity("E1205", "stop of shift team", team.id))?;

            read_history_stop(pool.take(key)?, route_stop, known_at)
        })
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(position) = history.current_position.as_ref() {
        let location = get_location(transport, position.location_id, "E1207")?;
        let known_at = seconds_to_ms(position.known_timestamp_sec).max(depot.window.start);
        let marker = StopBuilder::current_position(team.id, location, known_at).build();

        let is_last_in_progress = history.stops.last().is_some_and(|stop| stop.is_in_progress());
        let position = if is_last_in_progress { stops.len() - 1 } else { stops.len() };
        stops.insert(position, marker);
    }

    for commitment in team.upcoming_commitments.iter().flat_map(|commitments| commitments.commitments.iter()) {
        stops.push(pool.take(StopRef::Visit(commitment.visit_id))?.pinned(true).build());
    }

    stops.push(StopBuilder::depot_return(team.id, depot, true).build());

    Ok(stops)
}

fn read_history_stop(
    builder: StopBuilder,
    route_stop: &RouteStop,
    known_at: Option<Timestamp>,
) -> Result<Stop, FormatError> {
    let builder = builder.pinned(true);
    let start = route_stop.actual_start_timestamp_sec.map(seconds_to_ms);
    let completion = route_stop.actual_completion_timestamp_sec.map(seconds_to_ms);

    let builder = match (start, completion) {
        (Some(start), Some(completion)) => builder.observed(start, Some(completion)).earliest_departure(completion),
        (Some(start), None) => match known_at {
            Some(known_at) => builder.observed(start, None).earliest_departure(known_at),
            None => builder.observed(start, None),
        },
        (None, Some(_)) => {
            return Err(FormatError::new(
                "E1206".to_string(),
                "completion timestamp without start timestamp".to_string(),
                "set actual start of completed stops".to_string(),
            ));
        }
        (None, None) => builder,
    };

    Ok(builder.build())
}

/// Listed unassigned visits go first keeping their pin flag, then everything not placed anywhere.
fn read_sink_stops(pool: &mut StopPool, description: &Description) -> Result<Vec<Stop>, FormatError> {
    let mut stops = description
        .unassigned_visits
        .iter()
        .map(|unassigned| {
            let builder = pool.take(StopRef::Visit(unassigned.visit_id))?;
            Ok(builder.pinned(unassigned.pinned.unwrap_or(false)).build())
        })
        .collect::<Result<Vec<_>, FormatError>>()?;

    stops.extend(pool.drain().into_iter().map(StopBuilder::build));

    Ok(stops)
}

fn get_location(transport: &TransportMatrix, id: i64, code: &str) -> Result<LocationIndex, FormatError> {
    transport.index_of(id).ok_or_else(|| unknown_entity(code, "location", id))
}

fn unknown_entity(code: &str, what: &str, id: i64) -> FormatError {
    FormatError::new(code.to_string(), format!("cannot resolve {what}"), format!("check entity with id '{id}'"))
}

fn to_placement_error(error: GraphError) -> FormatError {
    FormatError::new_with_details(
        "E1208".to_string(),
        "stop cannot be placed on its route".to_string(),
        "keep a single placement of stops".to_string(),
        error.to_string(),
    )
}
