use crate::construction::schedule_update::update_all_schedules;
use crate::models::common::*;
use crate::models::config::ConstraintConfig;
use crate::models::goal::{Feature, ScoringContext};
use crate::models::problem::*;
use crate::models::solution::*;
use std::sync::Arc;

pub const DEFAULT_SHIFT_START: Timestamp = 1_000_000;
pub const DEFAULT_SHIFT_END: Timestamp = 100_000_000;

/// Returns a test distance: `from=1, to=2` gives 12 seconds and 12 meters.
pub fn test_distance(from: LocationId, to: LocationId) -> Distance {
    if from == to { Distance::ZERO } else { Distance::new(1000 * (10 * from + to), 10 * from + to) }
}

/// Creates locations with ids `1..=size` and a full matrix of [`test_distance`] values.
pub fn create_test_transport(size: LocationId) -> TransportMatrix {
    let mut transport = TransportMatrix::default();
    let ids = (1..=size).collect::<Vec<_>>();

    ids.iter().for_each(|&id| {
        transport.add_location(Location { id, latitude: 37. + id as f64 / 100., longitude: -122. });
    });

    for &from in &ids {
        for &to in &ids {
            let (from_idx, to_idx) = (LocationIndex(from as usize - 1), LocationIndex(to as usize - 1));
            transport.set_distance(from_idx, to_idx, test_distance(from, to));
        }
    }

    transport
}

/// Returns index of test location with given id.
pub fn loc(id: LocationId) -> LocationIndex {
    LocationIndex(id as usize - 1)
}

pub fn create_test_graph(locations: LocationId) -> RouteGraph {
    RouteGraph::new(Arc::new(create_test_transport(locations)))
}

pub fn create_test_depot(location: LocationId) -> Depot {
    Depot { location: loc(location), window: TimeWindow::new(DEFAULT_SHIFT_START, DEFAULT_SHIFT_END) }
}

pub fn create_test_vehicle(id: VehicleId, location: LocationId) -> Vehicle {
    VehicleBuilder::shift_team(id, create_test_depot(location)).build()
}

/// Adds a shift team whose chain has only the final depot return.
pub fn add_test_team(graph: &mut RouteGraph, vehicle: Vehicle) -> (VehicleIndex, StopIndex) {
    let depot_return = StopBuilder::depot_return(vehicle.id, &vehicle.depot, true).build();
    let vehicle = graph.add_vehicle(vehicle);
    let depot_return = graph.add_stop(depot_return);
    graph.push_back(vehicle, depot_return).expect("cannot attach depot return");

    (vehicle, depot_return)
}

pub fn add_test_sink(graph: &mut RouteGraph) -> VehicleIndex {
    graph.add_vehicle(VehicleBuilder::sink(loc(1)).build())
}

pub fn create_test_visit_detail() -> VisitDetail {
    VisitDetail { acuity: Acuity { level: 1, window: None }, value_cents: 25_000, ..VisitDetail::default() }
}

pub fn create_test_visit(id: StopId, location: LocationId) -> StopBuilder {
    StopBuilder::visit(id, loc(location), create_test_visit_detail())
        .window(TimeWindow::new(DEFAULT_SHIFT_START, DEFAULT_SHIFT_END))
        .service_duration(600_000)
}

/// Inserts stop before the final depot return of the vehicle, or at the end if there is none.
pub fn insert_before_depot_return(graph: &mut RouteGraph, vehicle: VehicleIndex, stop: StopIndex) {
    let depot_return = graph.route(vehicle).find(|idx| graph.stop(*idx).is_final_depot_return());
    let after = match depot_return.and_then(|idx| graph.stop(idx).previous()) {
        Some(previous) => previous,
        None => graph.last_stop(vehicle).map_or(Standstill::Vehicle(vehicle), Standstill::Stop),
    };

    graph.attach(stop, after).expect("cannot attach stop");
    update_all_schedules(graph);
}

/// Adds a stop and inserts it before the final depot return.
pub fn add_to_route(graph: &mut RouteGraph, vehicle: VehicleIndex, stop: Stop) -> StopIndex {
    let stop = graph.add_stop(stop);
    insert_before_depot_return(graph, vehicle, stop);
    stop
}

pub fn get_route_ids(graph: &RouteGraph, vehicle: VehicleIndex) -> Vec<StopId> {
    graph.route(vehicle).map(|idx| graph.stop(idx).id).collect()
}

/// Evaluates a single feature against a propagated graph.
pub fn evaluate_feature(feature: &Feature, graph: &RouteGraph, config: &ConstraintConfig) -> i64 {
    feature.objective.evaluate(&ScoringContext { graph, config })
}
