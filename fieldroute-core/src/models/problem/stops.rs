use crate::models::common::{Duration, TimeWindow, Timestamp};
use crate::models::problem::{AttributeRequirements, LocationIndex, VehicleId, VehicleIndex};
use crate::models::solution::Standstill;
use std::sync::Arc;

/// An external stop identifier: visit id, rest break id or shift team id for synthetic stops.
pub type StopId = i64;

/// A stable index of stop inside route graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopIndex(pub usize);

/// Clinical acuity of a visit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Acuity {
    pub level: i64,
    /// An urgency window, arrival after its end is penalized separately.
    pub window: Option<TimeWindow>,
}

/// Visit specific data.
#[derive(Clone, Debug, Default)]
pub struct VisitDetail {
    pub acuity: Acuity,
    pub priority: i64,
    pub value_cents: i64,
    pub requirements: AttributeRequirements,
    pub expendable: bool,
}

/// Specifies how rest break is placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestBreakPlacement {
    /// Fixed location and start time.
    Requested,
    /// Floating: takes location of its predecessor.
    Unrequested,
}

/// A stop discriminant with kind specific payload.
#[derive(Clone, Debug)]
pub enum StopKind {
    Visit(VisitDetail),
    RestBreak { shift_team: VehicleId, placement: RestBreakPlacement },
    DepotReturn { shift_team: VehicleId, is_final: bool },
    CurrentPosition { shift_team: VehicleId },
}

/// Arrival timing of a stop: either planned by schedule propagation or observed in the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopTiming {
    Planned { arrival: Option<Timestamp> },
    Observed { actual_arrival: Timestamp, actual_completion: Option<Timestamp> },
}

/// A stop record shared by all stop kinds.
#[derive(Clone, Debug)]
pub struct Stop {
    pub id: StopId,
    pub kind: StopKind,
    /// Own location. For unrequested rest breaks it is used only while the stop has no predecessor.
    pub location: LocationIndex,
    /// Ready and due time.
    pub window: TimeWindow,
    pub service_duration: Duration,
    pub extra_setup_duration: Duration,
    /// Departure cannot happen earlier than this time.
    pub earliest_departure: Timestamp,
    pub pinned: bool,
    /// Stops with the same key in a row are served simultaneously.
    pub overlap_key: Option<Arc<str>>,
    pub(crate) timing: StopTiming,
    pub(crate) capacity_offset: Option<Duration>,
    pub(crate) previous: Option<Standstill>,
    pub(crate) next: Option<StopIndex>,
    pub(crate) vehicle: Option<VehicleIndex>,
}

impl Stop {
    /// Returns visit detail if the stop is a real visit.
    pub fn visit(&self) -> Option<&VisitDetail> {
        match &self.kind {
            StopKind::Visit(detail) => Some(detail),
            _ => None,
        }
    }

    pub fn is_visit(&self) -> bool {
        matches!(self.kind, StopKind::Visit(_))
    }

    pub fn is_rest_break(&self) -> bool {
        matches!(self.kind, StopKind::RestBreak { .. })
    }

    pub fn is_depot_return(&self) -> bool {
        matches!(self.kind, StopKind::DepotReturn { .. })
    }

    pub fn is_final_depot_return(&self) -> bool {
        matches!(self.kind, StopKind::DepotReturn { is_final: true, .. })
    }

    pub fn is_current_position(&self) -> bool {
        matches!(self.kind, StopKind::CurrentPosition { .. })
    }

    /// Returns true for rest breaks which inherit location from predecessor.
    pub fn is_floating(&self) -> bool {
        matches!(self.kind, StopKind::RestBreak { placement: RestBreakPlacement::Unrequested, .. })
    }

    /// Returns the shift team the stop belongs to, visits can belong to any team.
    pub fn owner(&self) -> Option<VehicleId> {
        match &self.kind {
            StopKind::Visit(_) => None,
            StopKind::RestBreak { shift_team, .. }
            | StopKind::DepotReturn { shift_team, .. }
            | StopKind::CurrentPosition { shift_team } => Some(*shift_team),
        }
    }

    pub fn timing(&self) -> StopTiming {
        self.timing
    }

    /// Returns arrival: observed one if present, planned otherwise.
    pub fn arrival(&self) -> Option<Timestamp> {
        match self.timing {
            StopTiming::Planned { arrival } => arrival,
            StopTiming::Observed { actual_arrival, .. } => Some(actual_arrival),
        }
    }

    pub fn observed_arrival(&self) -> Option<Timestamp> {
        match self.timing {
            StopTiming::Planned { .. } => None,
            StopTiming::Observed { actual_arrival, .. } => Some(actual_arrival),
        }
    }

    pub fn actual_completion(&self) -> Option<Timestamp> {
        match self.timing {
            StopTiming::Planned { .. } => None,
            StopTiming::Observed { actual_completion, .. } => actual_completion,
        }
    }

    /// Returns departure time. An observed completion wins over the estimate.
    pub fn departure(&self) -> Option<Timestamp> {
        let arrival = self.arrival()?;

        Some(
            self.actual_completion()
                .unwrap_or_else(|| (arrival.max(self.window.start) + self.service_duration).max(self.earliest_departure)),
        )
    }

    /// Returns accumulated occupied time at arrival.
    pub fn capacity_offset(&self) -> Option<Duration> {
        self.capacity_offset
    }

    /// Returns accumulated occupied time at departure.
    pub fn capacity_at_departure(&self) -> Duration {
        self.capacity_offset.unwrap_or(0) + self.service_duration
    }

    /// Checks whether arrival happens after due time plus tolerance.
    pub fn is_arrival_after_due(&self, tolerance: Duration) -> bool {
        self.arrival().is_some_and(|arrival| arrival > self.window.end.saturating_add(tolerance))
    }

    /// Returns lateness against due time moved earlier by given offset.
    pub fn lateness_with_offset(&self, offset: Duration) -> Duration {
        self.arrival().map_or(0, |arrival| (arrival - self.window.end + offset).max(0))
    }

    /// Returns lateness against acuity window end moved earlier by given offset.
    pub fn urgency_lateness_with_offset(&self, offset: Duration) -> Option<Duration> {
        let window = self.visit()?.acuity.window?;

        self.arrival().map(|arrival| (arrival - window.end + offset).max(0))
    }

    pub fn previous(&self) -> Option<Standstill> {
        self.previous
    }

    pub fn next(&self) -> Option<StopIndex> {
        self.next
    }

    pub fn vehicle(&self) -> Option<VehicleIndex> {
        self.vehicle
    }

    pub fn is_attached(&self) -> bool {
        self.vehicle.is_some()
    }
}
