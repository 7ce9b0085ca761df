#[cfg(test)]
#[path = "../../../tests/unit/models/problem/transport_test.rs"]
mod transport_test;

use crate::models::common::Distance;
use rustc_hash::FxHashMap;

/// An external location identifier.
pub type LocationId = i64;

/// A stable index of location inside [`TransportMatrix`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationIndex(pub usize);

/// A geographic location.
#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    /// External id.
    pub id: LocationId,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// Keeps locations and pairwise travel distances between them.
#[derive(Clone, Debug, Default)]
pub struct TransportMatrix {
    locations: Vec<Location>,
    index: FxHashMap<LocationId, LocationIndex>,
    distances: FxHashMap<(LocationIndex, LocationIndex), Distance>,
}

impl TransportMatrix {
    /// Registers location and returns its index. Returns existing index when the id is already known.
    pub fn add_location(&mut self, location: Location) -> LocationIndex {
        if let Some(index) = self.index.get(&location.id) {
            return *index;
        }

        let index = LocationIndex(self.locations.len());
        self.index.insert(location.id, index);
        self.locations.push(location);

        index
    }

    /// Sets a directed distance between two locations.
    pub fn set_distance(&mut self, from: LocationIndex, to: LocationIndex, distance: Distance) {
        self.distances.insert((from, to), distance);
    }

    /// Returns location index by external id.
    pub fn index_of(&self, id: LocationId) -> Option<LocationIndex> {
        self.index.get(&id).copied()
    }

    /// Returns location by its index.
    pub fn location(&self, index: LocationIndex) -> &Location {
        &self.locations[index.0]
    }

    /// Returns all known locations in insertion order.
    pub fn locations(&self) -> &[Location] {
        self.locations.as_slice()
    }

    /// Returns a distance if it is known. Distance from location to itself is always zero.
    pub fn try_distance(&self, from: LocationIndex, to: LocationIndex) -> Option<Distance> {
        if from == to { Some(Distance::ZERO) } else { self.distances.get(&(from, to)).copied() }
    }

    /// Returns a distance between two locations, unknown pairs are treated as zero.
    pub fn distance(&self, from: LocationIndex, to: LocationIndex) -> Distance {
        self.try_distance(from, to).unwrap_or_default()
    }

    /// Iterates over all explicitly set distances.
    pub fn distances(&self) -> impl Iterator<Item = (LocationIndex, LocationIndex, Distance)> + '_ {
        self.distances.iter().map(|(&(from, to), &distance)| (from, to, distance))
    }
}
