use crate::models::common::{Duration, MILLS_PER_CENT, MS_PER_HOUR, Mills, TimeWindow, Timestamp};
use crate::models::problem::{AttributeSet, LocationIndex, StopIndex};

/// An external shift team identifier.
pub type VehicleId = i64;

/// An id reserved for the sink vehicle.
pub const SINK_VEHICLE_ID: VehicleId = -1;

/// A stable index of vehicle inside route graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleIndex(pub usize);

/// A depot where shift starts and ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Depot {
    /// Depot location.
    pub location: LocationIndex,
    /// Availability window: ready and due time.
    pub window: TimeWindow,
}

/// Staffing mix of a shift team with hourly costs per role.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Staffing {
    pub providers: i64,
    pub technicians: i64,
    pub provider_hourly_cost_cents: i64,
    pub technician_hourly_cost_cents: i64,
}

impl Staffing {
    /// Returns the cost of one team hour in cents.
    pub fn hourly_cost_cents(&self) -> i64 {
        self.providers * self.provider_hourly_cost_cents + self.technicians * self.technician_hourly_cost_cents
    }

    /// Returns the cost of given duration in mills.
    pub fn cost_of(&self, duration: Duration) -> Mills {
        ((duration as i128 * self.hourly_cost_cents() as i128 * MILLS_PER_CENT as i128) / MS_PER_HOUR as i128) as Mills
    }
}

/// Distinguishes real shift teams from the pseudo vehicle keeping unassigned stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VehicleKind {
    ShiftTeam,
    Sink,
}

/// A shift team which serves stops.
#[derive(Clone, Debug)]
pub struct Vehicle {
    pub id: VehicleId,
    pub kind: VehicleKind,
    pub depot: Depot,
    pub attributes: AttributeSet,
    pub staffing: Staffing,
    /// Maximum occupied time budget.
    pub capacity: Option<Duration>,
    /// The team cannot leave the depot before this time.
    pub earliest_depot_departure: Timestamp,
    pub(crate) head: Option<StopIndex>,
}

impl Vehicle {
    /// Returns true if this is the sink vehicle.
    pub fn is_sink(&self) -> bool {
        self.kind == VehicleKind::Sink
    }

    /// Returns first stop in the chain.
    pub fn head(&self) -> Option<StopIndex> {
        self.head
    }

    /// Returns departure time from the depot.
    pub fn depot_departure(&self) -> Timestamp {
        self.depot.window.start.max(self.earliest_depot_departure)
    }

    /// Returns shift duration.
    pub fn scheduled_duration(&self) -> Duration {
        self.depot.window.duration()
    }
}
