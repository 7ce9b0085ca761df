//! Provides a way to build stops and vehicles using the builder pattern.

use crate::models::common::{Duration, TimeWindow, Timestamp};
use crate::models::problem::*;
use std::sync::Arc;

/// Provides a way to build a [`Stop`] of any kind.
#[derive(Debug)]
pub struct StopBuilder(Stop);

impl StopBuilder {
    /// Starts building a real visit.
    pub fn visit(id: StopId, location: LocationIndex, detail: VisitDetail) -> Self {
        Self(empty_stop(id, StopKind::Visit(detail), location))
    }

    /// Starts building a rest break with fixed location and start time.
    pub fn requested_rest_break(
        id: StopId,
        shift_team: VehicleId,
        location: LocationIndex,
        start: Timestamp,
        duration: Duration,
    ) -> Self {
        let kind = StopKind::RestBreak { shift_team, placement: RestBreakPlacement::Requested };

        Self(empty_stop(id, kind, location)).window(TimeWindow::new(start, start)).service_duration(duration)
    }

    /// Starts building a floating rest break which can be taken anywhere within the depot window.
    pub fn unrequested_rest_break(id: StopId, shift_team: VehicleId, depot: &Depot, duration: Duration) -> Self {
        let kind = StopKind::RestBreak { shift_team, placement: RestBreakPlacement::Unrequested };

        Self(empty_stop(id, kind, depot.location)).window(depot.window).service_duration(duration)
    }

    /// Starts building a depot return stop of given shift team.
    pub fn depot_return(shift_team: VehicleId, depot: &Depot, is_final: bool) -> Self {
        let kind = StopKind::DepotReturn { shift_team, is_final };

        Self(empty_stop(shift_team, kind, depot.location)).window(depot.window)
    }

    /// Starts building an instantaneous marker of known team position.
    pub fn current_position(shift_team: VehicleId, location: LocationIndex, known_at: Timestamp) -> Self {
        let kind = StopKind::CurrentPosition { shift_team };

        Self(empty_stop(shift_team, kind, location))
            .window(TimeWindow::new(known_at, known_at))
            .observed(known_at, Some(known_at))
            .pinned(true)
    }

    /// Sets ready and due time.
    pub fn window(mut self, window: TimeWindow) -> Self {
        self.0.window = window;
        self
    }

    pub fn service_duration(mut self, duration: Duration) -> Self {
        self.0.service_duration = duration;
        self
    }

    pub fn extra_setup_duration(mut self, duration: Duration) -> Self {
        self.0.extra_setup_duration = duration;
        self
    }

    pub fn earliest_departure(mut self, timestamp: Timestamp) -> Self {
        self.0.earliest_departure = timestamp;
        self
    }

    pub fn pinned(mut self, pinned: bool) -> Self {
        self.0.pinned = pinned;
        self
    }

    /// Sets an overlap group key, empty keys are ignored.
    pub fn overlap_key(mut self, key: Option<&str>) -> Self {
        self.0.overlap_key = key.filter(|key| !key.is_empty()).map(Arc::from);
        self
    }

    /// Marks arrival (and optionally completion) as observed in the field.
    pub fn observed(mut self, actual_arrival: Timestamp, actual_completion: Option<Timestamp>) -> Self {
        self.0.timing = StopTiming::Observed { actual_arrival, actual_completion };
        self
    }

    /// Builds a [`Stop`].
    pub fn build(self) -> Stop {
        self.0
    }
}

/// Provides a way to build a [`Vehicle`].
#[derive(Debug)]
pub struct VehicleBuilder(Vehicle);

impl VehicleBuilder {
    /// Starts building a shift team vehicle.
    pub fn shift_team(id: VehicleId, depot: Depot) -> Self {
        let earliest_depot_departure = depot.window.start;

        Self(Vehicle {
            id,
            kind: VehicleKind::ShiftTeam,
            depot,
            attributes: AttributeSet::default(),
            staffing: Staffing::default(),
            capacity: None,
            earliest_depot_departure,
            head: None,
        })
    }

    /// Starts building a sink vehicle located at given location.
    pub fn sink(location: LocationIndex) -> Self {
        let mut builder = Self::shift_team(SINK_VEHICLE_ID, Depot { location, window: TimeWindow::max() });
        builder.0.kind = VehicleKind::Sink;
        builder
    }

    pub fn attributes(mut self, attributes: AttributeSet) -> Self {
        self.0.attributes = attributes;
        self
    }

    pub fn staffing(mut self, staffing: Staffing) -> Self {
        self.0.staffing = staffing;
        self
    }

    pub fn capacity(mut self, capacity: Option<Duration>) -> Self {
        self.0.capacity = capacity;
        self
    }

    pub fn earliest_depot_departure(mut self, timestamp: Timestamp) -> Self {
        self.0.earliest_depot_departure = timestamp;
        self
    }

    /// Builds a [`Vehicle`].
    pub fn build(self) -> Vehicle {
        self.0
    }
}

fn empty_stop(id: StopId, kind: StopKind, location: LocationIndex) -> Stop {
    Stop {
        id,
        kind,
        location,
        window: TimeWindow::max(),
        service_duration: 0,
        extra_setup_duration: 0,
        earliest_departure: 0,
        pinned: false,
        overlap_key: None,
        timing: StopTiming::Planned { arrival: None },
        capacity_offset: None,
        previous: None,
        next: None,
        vehicle: None,
    }
}
