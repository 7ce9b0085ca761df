#[cfg(test)]
#[path = "../../../tests/unit/models/solution/graph_test.rs"]
mod graph_test;

use crate::models::common::{Distance, Duration, Timestamp};
use crate::models::problem::*;
use std::sync::Arc;
use thiserror::Error;

/// A node a chain anchors to: a vehicle (chain head) or a stop (chain node).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Standstill {
    Vehicle(VehicleIndex),
    Stop(StopIndex),
}

/// Stops whose predecessor changed after a structural mutation.
pub type ChangeSet = Vec<StopIndex>;

/// An error raised on structural misuse of the route graph.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("stop {0:?} is not part of the graph")]
    UnknownStop(StopIndex),
    #[error("vehicle {0:?} is not part of the graph")]
    UnknownVehicle(VehicleIndex),
    #[error("stop {0:?} is not attached to any chain")]
    DetachedStop(StopIndex),
    #[error("stop {0:?} is already attached")]
    AlreadyAttached(StopIndex),
    #[error("stop {0:?} cannot be attached after itself")]
    SelfReference(StopIndex),
    #[error("chain is broken at stop {stop:?}: {reason}")]
    BrokenChain { stop: StopIndex, reason: &'static str },
}

/// A candidate schedule: an arena of stops and vehicles linked into chains with stable indices.
#[derive(Clone, Debug)]
pub struct RouteGraph {
    transport: Arc<TransportMatrix>,
    vehicles: Vec<Vehicle>,
    stops: Vec<Stop>,
    sink: Option<VehicleIndex>,
}

impl RouteGraph {
    /// Creates an empty [`RouteGraph`] which uses given transport matrix.
    pub fn new(transport: Arc<TransportMatrix>) -> Self {
        Self { transport, vehicles: vec![], stops: vec![], sink: None }
    }

    pub fn transport(&self) -> &TransportMatrix {
        self.transport.as_ref()
    }

    /// Adds a vehicle with an empty chain. Only one sink vehicle is kept.
    pub fn add_vehicle(&mut self, mut vehicle: Vehicle) -> VehicleIndex {
        if let (true, Some(sink)) = (vehicle.is_sink(), self.sink) {
            return sink;
        }

        let index = VehicleIndex(self.vehicles.len());
        vehicle.head = None;
        if vehicle.is_sink() {
            self.sink = Some(index);
        }
        self.vehicles.push(vehicle);

        index
    }

    /// Adds a detached stop.
    pub fn add_stop(&mut self, mut stop: Stop) -> StopIndex {
        stop.previous = None;
        stop.next = None;
        stop.vehicle = None;
        self.stops.push(stop);

        StopIndex(self.stops.len() - 1)
    }

    pub fn sink(&self) -> Option<VehicleIndex> {
        self.sink
    }

    pub fn vehicle(&self, index: VehicleIndex) -> &Vehicle {
        &self.vehicles[index.0]
    }

    pub fn stop(&self, index: StopIndex) -> &Stop {
        &self.stops[index.0]
    }

    /// Returns stop by index if it exists.
    pub fn get_stop(&self, index: StopIndex) -> Option<&Stop> {
        self.stops.get(index.0)
    }

    /// Iterates over all vehicles including the sink one.
    pub fn vehicles(&self) -> impl Iterator<Item = (VehicleIndex, &Vehicle)> + '_ {
        self.vehicles.iter().enumerate().map(|(idx, vehicle)| (VehicleIndex(idx), vehicle))
    }

    /// Iterates over real shift teams only.
    pub fn shift_teams(&self) -> impl Iterator<Item = (VehicleIndex, &Vehicle)> + '_ {
        self.vehicles().filter(|(_, vehicle)| !vehicle.is_sink())
    }

    pub fn stops(&self) -> impl Iterator<Item = (StopIndex, &Stop)> + '_ {
        self.stops.iter().enumerate().map(|(idx, stop)| (StopIndex(idx), stop))
    }

    /// Iterates over real visits with their details.
    pub fn visits(&self) -> impl Iterator<Item = (StopIndex, &Stop, &VisitDetail)> + '_ {
        self.stops().filter_map(|(idx, stop)| stop.visit().map(|detail| (idx, stop, detail)))
    }

    /// Returns true when there is at least one visit or rest break to schedule.
    pub fn has_demand(&self) -> bool {
        self.stops.iter().any(|stop| stop.is_visit() || stop.is_rest_break())
    }

    /// Walks the chain of given vehicle from head to its last stop.
    pub fn route(&self, vehicle: VehicleIndex) -> RouteIter<'_> {
        RouteIter { graph: self, current: self.vehicle(vehicle).head, remaining: self.stops.len() }
    }

    pub fn last_stop(&self, vehicle: VehicleIndex) -> Option<StopIndex> {
        self.route(vehicle).last()
    }

    /// Returns the stop which follows given standstill.
    pub fn next_of(&self, standstill: Standstill) -> Option<StopIndex> {
        match standstill {
            Standstill::Vehicle(vehicle) => self.vehicle(vehicle).head,
            Standstill::Stop(stop) => self.stop(stop).next,
        }
    }

    /// Returns the vehicle which owns the chain given standstill belongs to.
    pub fn vehicle_of(&self, standstill: Standstill) -> Option<VehicleIndex> {
        match standstill {
            Standstill::Vehicle(vehicle) => Some(vehicle),
            Standstill::Stop(stop) => self.stop(stop).vehicle,
        }
    }

    /// Inserts a detached stop right after given standstill.
    pub fn attach(&mut self, stop: StopIndex, after: Standstill) -> Result<ChangeSet, GraphError> {
        self.ensure_stop(stop)?;
        self.ensure_standstill(after)?;

        if after == Standstill::Stop(stop) {
            return Err(GraphError::SelfReference(stop));
        }
        if self.stops[stop.0].vehicle.is_some() || self.stops[stop.0].previous.is_some() {
            return Err(GraphError::AlreadyAttached(stop));
        }

        let vehicle = self.vehicle_of(after).ok_or(match after {
            Standstill::Stop(after) => GraphError::DetachedStop(after),
            Standstill::Vehicle(vehicle) => GraphError::UnknownVehicle(vehicle),
        })?;
        let old_next = self.next_of(after);

        self.set_next(after, Some(stop));
        let record = &mut self.stops[stop.0];
        record.previous = Some(after);
        record.next = old_next;
        record.vehicle = Some(vehicle);

        let mut changes = vec![stop];
        if let Some(old_next) = old_next {
            self.stops[old_next.0].previous = Some(Standstill::Stop(stop));
            changes.push(old_next);
        }

        Ok(changes)
    }

    /// Removes the stop from its chain linking its neighbours together.
    pub fn detach(&mut self, stop: StopIndex) -> Result<ChangeSet, GraphError> {
        self.ensure_stop(stop)?;

        let (previous, next) = {
            let record = &self.stops[stop.0];
            (record.previous.ok_or(GraphError::DetachedStop(stop))?, record.next)
        };

        self.set_next(previous, next);
        if let Some(next) = next {
            self.stops[next.0].previous = Some(previous);
        }

        let record = &mut self.stops[stop.0];
        record.previous = None;
        record.next = None;
        record.vehicle = None;

        Ok(std::iter::once(stop).chain(next).collect())
    }

    /// Moves attached stop right after given standstill.
    pub fn relocate(&mut self, stop: StopIndex, after: Standstill) -> Result<ChangeSet, GraphError> {
        if after == Standstill::Stop(stop) {
            return Err(GraphError::SelfReference(stop));
        }
        self.ensure_standstill(after)?;
        if let (Standstill::Stop(after), None) = (after, self.vehicle_of(after)) {
            return Err(GraphError::DetachedStop(after));
        }

        let mut changes = self.detach(stop)?;
        for changed in self.attach(stop, after)? {
            if !changes.contains(&changed) {
                changes.push(changed);
            }
        }

        Ok(changes)
    }

    /// Appends a detached stop at the end of vehicle's chain.
    pub fn push_back(&mut self, vehicle: VehicleIndex, stop: StopIndex) -> Result<ChangeSet, GraphError> {
        if vehicle.0 >= self.vehicles.len() {
            return Err(GraphError::UnknownVehicle(vehicle));
        }

        let after = self.last_stop(vehicle).map_or(Standstill::Vehicle(vehicle), Standstill::Stop);

        self.attach(stop, after)
    }

    /// Returns effective location of standstill. Floating rest breaks inherit it from their predecessors.
    pub fn location_of(&self, standstill: Standstill) -> LocationIndex {
        let mut current = standstill;
        loop {
            match current {
                Standstill::Vehicle(vehicle) => return self.vehicle(vehicle).depot.location,
                Standstill::Stop(stop) => {
                    let record = self.stop(stop);
                    match (record.is_floating(), record.previous) {
                        (true, Some(previous)) => current = previous,
                        _ => return record.location,
                    }
                }
            }
        }
    }

    /// Returns distance between effective locations of two standstills.
    pub fn distance(&self, from: Standstill, to: Standstill) -> Distance {
        self.transport.distance(self.location_of(from), self.location_of(to))
    }

    /// Returns distance travelled to reach the stop from its predecessor.
    pub fn distance_from_previous(&self, stop: StopIndex) -> Result<Distance, GraphError> {
        self.ensure_stop(stop)?;
        let previous = self.stop(stop).previous.ok_or(GraphError::DetachedStop(stop))?;

        Ok(self.distance(previous, Standstill::Stop(stop)))
    }

    /// Returns total travelled distance including return to depot. Sink vehicle travels nowhere.
    pub fn total_distance(&self, vehicle: VehicleIndex) -> Distance {
        if self.vehicle(vehicle).is_sink() {
            return Distance::ZERO;
        }

        let standstill = Standstill::Vehicle(vehicle);
        let (travelled, last) = self.route(vehicle).fold((Distance::ZERO, standstill), |(acc, previous), stop| {
            let current = Standstill::Stop(stop);
            (acc + self.distance(previous, current), current)
        });

        travelled + self.distance(last, standstill)
    }

    /// Returns time budget used up to the final depot return.
    pub fn occupied_capacity(&self, vehicle: VehicleIndex) -> Duration {
        self.first_depot_return(vehicle)
            .map(|stop| self.stop(stop))
            .filter(|stop| stop.is_final_depot_return())
            .and_then(|stop| stop.capacity_offset)
            .unwrap_or(0)
    }

    /// Returns depot arrival time. A route without any other stop than the final depot return ends at due time.
    pub fn depot_arrival(&self, vehicle: VehicleIndex) -> Option<Timestamp> {
        let record = self.vehicle(vehicle);
        let head = match record.head {
            Some(head) if !self.stop(head).is_final_depot_return() => head,
            _ => return Some(record.depot.window.end),
        };

        let depot_return = self.route_from(head).find(|&stop| self.stop(stop).is_depot_return())?;
        let depot_return = self.stop(depot_return);

        if depot_return.is_final_depot_return() {
            depot_return.arrival().map(|arrival| arrival.max(record.depot.window.start))
        } else {
            None
        }
    }

    /// Returns how long after due time the team is back to depot.
    pub fn overtime(&self, vehicle: VehicleIndex) -> Duration {
        let due = self.vehicle(vehicle).depot.window.end;

        self.depot_arrival(vehicle).map_or(0, |arrival| (arrival - due).max(0))
    }

    /// Returns depot lateness against due time moved earlier by given offset.
    pub fn depot_lateness_with_offset(&self, vehicle: VehicleIndex, offset: Duration) -> Duration {
        let due = self.vehicle(vehicle).depot.window.end;

        self.depot_arrival(vehicle).map_or(0, |arrival| (arrival - due + offset).max(0))
    }

    /// Returns true if the stop is on the sink vehicle.
    pub fn is_on_sink(&self, stop: StopIndex) -> bool {
        self.stop(stop).vehicle.is_some_and(|vehicle| self.vehicle(vehicle).is_sink())
    }

    /// Pinned stops and stops left on the sink vehicle are not checked against per-stop hard rules.
    pub fn ignores_hard_constraints(&self, stop: StopIndex) -> bool {
        self.stop(stop).pinned || self.is_on_sink(stop)
    }

    /// Checks that a stop bound to a shift team is on that team's chain.
    pub fn is_on_owner_vehicle(&self, stop: StopIndex) -> bool {
        let record = self.stop(stop);
        match (record.owner(), record.vehicle) {
            (Some(owner), Some(vehicle)) => {
                let vehicle = self.vehicle(vehicle);
                !vehicle.is_sink() && vehicle.id == owner
            }
            (None, _) => true,
            (Some(_), None) => false,
        }
    }

    /// Checks chain position: a final depot return must terminate its chain.
    pub fn is_in_order(&self, stop: StopIndex) -> bool {
        let record = self.stop(stop);

        !record.is_final_depot_return() || record.next.is_none()
    }

    /// Verifies chain invariants: consistent links, no cycles, no sharing between chains.
    pub fn check_integrity(&self) -> Result<(), GraphError> {
        let mut visited = vec![false; self.stops.len()];

        for (vehicle, record) in self.vehicles() {
            let mut previous = Standstill::Vehicle(vehicle);
            let mut current = record.head;

            while let Some(stop) = current {
                self.ensure_stop(stop)?;
                if visited[stop.0] {
                    return Err(GraphError::BrokenChain { stop, reason: "stop is reachable more than once" });
                }
                visited[stop.0] = true;

                let node = self.stop(stop);
                if node.previous != Some(previous) {
                    return Err(GraphError::BrokenChain { stop, reason: "backward link mismatch" });
                }
                if node.vehicle != Some(vehicle) {
                    return Err(GraphError::BrokenChain { stop, reason: "vehicle reference mismatch" });
                }

                previous = Standstill::Stop(stop);
                current = node.next;
            }
        }

        self.stops().zip(visited).try_for_each(|((stop, record), visited)| match (visited, record.vehicle) {
            (false, Some(_)) => Err(GraphError::BrokenChain { stop, reason: "attached stop is not reachable" }),
            _ => Ok(()),
        })
    }

    pub(crate) fn set_schedule(&mut self, stop: StopIndex, arrival: Option<Timestamp>, offset: Option<Duration>) {
        let record = &mut self.stops[stop.0];
        if let StopTiming::Planned { arrival: planned } = &mut record.timing {
            *planned = arrival;
        }
        record.capacity_offset = offset;
    }

    fn route_from(&self, head: StopIndex) -> RouteIter<'_> {
        RouteIter { graph: self, current: Some(head), remaining: self.stops.len() }
    }

    fn first_depot_return(&self, vehicle: VehicleIndex) -> Option<StopIndex> {
        self.route(vehicle).find(|&stop| self.stop(stop).is_depot_return())
    }

    fn set_next(&mut self, standstill: Standstill, next: Option<StopIndex>) {
        match standstill {
            Standstill::Vehicle(vehicle) => self.vehicles[vehicle.0].head = next,
            Standstill::Stop(stop) => self.stops[stop.0].next = next,
        }
    }

    fn ensure_stop(&self, stop: StopIndex) -> Result<(), GraphError> {
        if stop.0 < self.stops.len() { Ok(()) } else { Err(GraphError::UnknownStop(stop)) }
    }

    fn ensure_standstill(&self, standstill: Standstill) -> Result<(), GraphError> {
        match standstill {
            Standstill::Vehicle(vehicle) if vehicle.0 >= self.vehicles.len() => Err(GraphError::UnknownVehicle(vehicle)),
            Standstill::Vehicle(_) => Ok(()),
            Standstill::Stop(stop) => self.ensure_stop(stop),
        }
    }
}

/// Iterates over a chain. Stops after visiting as many nodes as the graph has.
pub struct RouteIter<'a> {
    graph: &'a RouteGraph,
    current: Option<StopIndex>,
    remaining: usize,
}

impl Iterator for RouteIter<'_> {
    type Item = StopIndex;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let current = self.current?;
        self.remaining -= 1;
        self.current = self.graph.stop(current).next;

        Some(current)
    }
}
