use super::*;
use crate::helpers::models::*;

const BREAK_DURATION: Duration = 1_800_000;

parameterized_test! {can_penalize_misplaced_rest_break, (target, pinned, expected), {
    can_penalize_misplaced_rest_break_impl(target, pinned, expected);
}}

can_penalize_misplaced_rest_break! {
    case01_on_owner_team: ("owner", false, 0),
    case02_on_another_team: ("other", false, -1),
    case03_on_sink: ("sink", false, -1),
    case04_pinned_on_another_team: ("other", true, 0),
    case05_detached: ("none", false, -1),
}

fn can_penalize_misplaced_rest_break_impl(target: &str, pinned: bool, expected: i64) {
    let mut graph = create_test_graph(3);
    let (owner, _) = add_test_team(&mut graph, create_test_vehicle(1, 1));
    let (other, _) = add_test_team(&mut graph, create_test_vehicle(2, 2));
    let sink = add_test_sink(&mut graph);
    let depot = create_test_depot(1);
    let rest_break = StopBuilder::unrequested_rest_break(100, 1, &depot, BREAK_DURATION).pinned(pinned).build();

    match target {
        "owner" => {
            add_to_route(&mut graph, owner, rest_break);
        }
        "other" => {
            add_to_route(&mut graph, other, rest_break);
        }
        "sink" => {
            add_to_route(&mut graph, sink, rest_break);
        }
        _ => {
            graph.add_stop(rest_break);
        }
    }

    let result = evaluate_feature(&create_rest_break_placement_feature("breaks"), &graph, &ConstraintConfig::default());

    assert_eq!(result, expected);
}

#[test]
fn can_ignore_visits() {
    let mut graph = create_test_graph(3);
    let sink = add_test_sink(&mut graph);
    add_to_route(&mut graph, sink, create_test_visit(10, 2).build());

    let result = evaluate_feature(&create_rest_break_placement_feature("breaks"), &graph, &ConstraintConfig::default());

    assert_eq!(result, 0);
}
