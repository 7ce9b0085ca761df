//! Keeps derived arrival and capacity offset values consistent with chain structure.
//!
//! Consecutive stops sharing an overlap key are served simultaneously: such a run acts as one virtual stop
//! which is left only when every member reaches its departure. The walk carries the current group forward and
//! starts a new group only when the key changes, so updating a route is linear in its length.

#[cfg(test)]
#[path = "../../tests/unit/construction/schedule_update_test.rs"]
mod schedule_update_test;

use crate::models::common::{Duration, Timestamp};
use crate::models::problem::{Stop, StopIndex, VehicleIndex};
use crate::models::solution::{RouteGraph, Standstill};
use std::sync::Arc;

/// Updates schedules after a structural mutation. Safe to call redundantly.
pub fn update_schedules(graph: &mut RouteGraph, changes: &[StopIndex]) {
    changes.iter().for_each(|&stop| update_schedule_from(graph, stop));
}

/// Updates schedules of every route.
pub fn update_all_schedules(graph: &mut RouteGraph) {
    let heads = graph.vehicles().filter_map(|(_, vehicle)| vehicle.head()).collect::<Vec<_>>();

    update_schedules(graph, heads.as_slice());
}

/// Recomputes arrival and capacity offset of given stop and every stop after it in the chain.
/// Stops which are detached or left on the sink vehicle have no schedule.
pub fn update_schedule_from(graph: &mut RouteGraph, source: StopIndex) {
    let (vehicle, previous) = {
        let stop = graph.stop(source);
        (stop.vehicle(), stop.previous())
    };

    let previous = match (vehicle, previous) {
        (Some(vehicle), Some(previous)) if !graph.vehicle(vehicle).is_sink() => previous,
        _ => {
            graph.set_schedule(source, None, None);
            return;
        }
    };

    let mut anchor = match previous {
        Standstill::Vehicle(vehicle) => Anchor::Depot(vehicle),
        Standstill::Stop(stop) => Anchor::Group(StopGroup::ending_at(graph, stop)),
    };

    let mut current = Some(source);
    while let Some(stop) = current {
        let (planned, offset) = anchor.plan(graph, stop);
        let arrival = graph.stop(stop).observed_arrival().or(planned);
        graph.set_schedule(stop, arrival, offset);

        anchor = anchor.include_or_link(graph, stop, planned);
        current = graph.stop(stop).next();
    }
}

/// What the next stop is reached from.
enum Anchor {
    Depot(VehicleIndex),
    Group(StopGroup),
}

impl Anchor {
    /// Returns arrival derived from the predecessor ignoring observed times, and capacity offset.
    fn plan(&self, graph: &RouteGraph, stop: StopIndex) -> (Option<Timestamp>, Option<Duration>) {
        let record = graph.stop(stop);
        let location = graph.location_of(Standstill::Stop(stop));

        match self {
            Anchor::Depot(vehicle) => {
                let vehicle_record = graph.vehicle(*vehicle);
                let travel = graph.transport().distance(vehicle_record.depot.location, location).duration;
                let arrival = plan_arrival(record, Some(vehicle_record.depot_departure() + travel));

                (arrival, Some(travel))
            }
            Anchor::Group(group) if group.accepts(record) => (group.planned_arrival, group.capacity_offset),
            Anchor::Group(group) => {
                let (reach, offset) = group.members.iter().fold((None, None), |(reach, offset), &member| {
                    let member_record = graph.stop(member);
                    let member_location = graph.location_of(Standstill::Stop(member));
                    let travel = graph.transport().distance(member_location, location).duration;

                    let member_reach = member_record.departure().map(|departure| departure + travel);
                    let member_offset = member_record
                        .capacity_offset()
                        .map_or(travel, |offset| offset + member_record.service_duration + travel);

                    (max_option(reach, member_reach), max_option(offset, Some(member_offset)))
                });

                (plan_arrival(record, reach), offset)
            }
        }
    }

    fn include_or_link(self, graph: &RouteGraph, stop: StopIndex, planned_arrival: Option<Timestamp>) -> Anchor {
        match self {
            Anchor::Group(mut group) if group.accepts(graph.stop(stop)) => {
                group.members.push(stop);
                Anchor::Group(group)
            }
            _ => Anchor::Group(StopGroup::start(graph, stop, planned_arrival)),
        }
    }
}

/// A maximal run of consecutive stops sharing an overlap key, or a single stop without a key.
/// Members share the arrival planned from the standstill preceding the first member.
struct StopGroup {
    key: Option<Arc<str>>,
    members: Vec<StopIndex>,
    planned_arrival: Option<Timestamp>,
    capacity_offset: Option<Duration>,
}

impl StopGroup {
    fn start(graph: &RouteGraph, stop: StopIndex, planned_arrival: Option<Timestamp>) -> Self {
        let record = graph.stop(stop);

        Self {
            key: record.overlap_key.clone(),
            members: vec![stop],
            planned_arrival,
            capacity_offset: record.capacity_offset(),
        }
    }

    /// Collects the group which ends with given stop scanning backwards over the same key.
    fn ending_at(graph: &RouteGraph, last: StopIndex) -> Self {
        let mut group = Self::members_ending_at(graph, last);
        let first = group.members[0];
        let record = graph.stop(first);

        group.planned_arrival = match (record.observed_arrival(), record.previous()) {
            (None, _) => record.arrival(),
            (Some(_), _) if group.key.is_none() => None,
            (Some(_), Some(Standstill::Vehicle(vehicle))) => Anchor::Depot(vehicle).plan(graph, first).0,
            (Some(_), Some(Standstill::Stop(previous))) => {
                Anchor::Group(Self::members_ending_at(graph, previous)).plan(graph, first).0
            }
            (Some(_), None) => None,
        };

        group
    }

    /// Collects members only, planned arrival is left unknown.
    fn members_ending_at(graph: &RouteGraph, last: StopIndex) -> Self {
        let key = graph.stop(last).overlap_key.clone();
        let mut members = vec![last];

        if key.is_some() {
            while let Some(Standstill::Stop(previous)) = members.last().and_then(|&stop| graph.stop(stop).previous()) {
                if graph.stop(previous).overlap_key != key {
                    break;
                }
                members.push(previous);
            }
            members.reverse();
        }

        let capacity_offset = graph.stop(members[0]).capacity_offset();

        Self { key, members, planned_arrival: None, capacity_offset }
    }

    fn accepts(&self, stop: &Stop) -> bool {
        self.key.is_some() && self.key == stop.overlap_key
    }
}

fn plan_arrival(stop: &Stop, reach: Option<Timestamp>) -> Option<Timestamp> {
    reach.map(|reach| reach.max(stop.window.start) + stop.extra_setup_duration)
}

fn max_option<T: Ord>(left: Option<T>, right: Option<T>) -> Option<T> {
    match (left, right) {
        (Some(left), Some(right)) => Some(left.max(right)),
        (left, right) => left.or(right),
    }
}
