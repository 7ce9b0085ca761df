use super::*;
use crate::helpers::models::*;
use crate::models::config::ConstraintConfigBuilder;

const HOUR: Duration = MS_PER_HOUR;
const LEG: Distance = Distance { duration: 600_000, meters: 5_500 };

// team departs at 0 and reaches the visit at 600_000, serves it for 600_000 and is back at 1_800_000
fn create_graph(depot_due: Timestamp) -> RouteGraph {
    let mut transport = TransportMatrix::default();
    let depot = transport.add_location(Location { id: 1, latitude: 37., longitude: -122. });
    let visit = transport.add_location(Location { id: 2, latitude: 37.1, longitude: -122. });
    transport.set_distance(depot, visit, LEG);
    transport.set_distance(visit, depot, LEG);

    let staffing =
        Staffing { providers: 1, technicians: 2, provider_hourly_cost_cents: 5_000, technician_hourly_cost_cents: 2_000 };
    let vehicle = VehicleBuilder::shift_team(1, Depot { location: depot, window: TimeWindow::new(0, depot_due) })
        .staffing(staffing)
        .build();

    let mut graph = RouteGraph::new(Arc::new(transport));
    let (team, _) = add_test_team(&mut graph, vehicle);
    add_to_route(
        &mut graph,
        team,
        StopBuilder::visit(10, visit, create_test_visit_detail())
            .window(TimeWindow::new(0, HOUR))
            .service_duration(600_000)
            .build(),
    );

    graph
}

parameterized_test! {can_calculate_driving_cost, (rate, expected), {
    let config = match rate {
        Some(rate) => ConstraintConfigBuilder::default().driving_cost(rate).build().unwrap(),
        None => ConstraintConfig::default(),
    };

    let result = evaluate_feature(&create_driving_cost_feature("driving"), &create_graph(2 * HOUR), &config);

    assert_eq!(result, expected);
}}

can_calculate_driving_cost! {
    case01_default_rate: (None, -11 * 360),
    case02_custom_rate: (Some(1000), -11_000),
    case03_free: (Some(0), 0),
}

#[test]
fn can_calculate_base_wage_for_whole_shift() {
    let result =
        evaluate_feature(&create_base_wage_cost_feature("wage"), &create_graph(2 * HOUR), &ConstraintConfig::default());

    assert_eq!(result, -180_000);
}

parameterized_test! {can_calculate_overtime_cost, (depot_due, expected), {
    let result = evaluate_feature(&create_overtime_cost_feature("overtime"), &create_graph(depot_due), &ConstraintConfig::default());

    assert_eq!(result, expected);
}}

can_calculate_overtime_cost! {
    case01_in_time: (2 * HOUR, 0),
    case02_ten_minutes_late: (1_200_000, -15_000),
}

parameterized_test! {can_calculate_on_scene_cost, (scale, expected), {
    let config = ConstraintConfigBuilder::default().on_scene_cost_scale(scale).build().unwrap();

    let result = evaluate_feature(&create_on_scene_cost_feature("on_scene"), &create_graph(2 * HOUR), &config);

    assert_eq!(result, expected);
}}

can_calculate_on_scene_cost! {
    case01_disabled: (0., 0),
    case02_half: (0.5, -7_500),
    case03_full: (1., -15_000),
}

#[test]
fn can_skip_costs_of_sink() {
    let mut graph = create_test_graph(2);
    let sink = add_test_sink(&mut graph);
    add_to_route(&mut graph, sink, create_test_visit(10, 2).build());
    let config = ConstraintConfigBuilder::default().on_scene_cost_scale(1.).build().unwrap();

    assert_eq!(evaluate_feature(&create_driving_cost_feature("driving"), &graph, &config), 0);
    assert_eq!(evaluate_feature(&create_on_scene_cost_feature("on_scene"), &graph, &config), 0);
}
