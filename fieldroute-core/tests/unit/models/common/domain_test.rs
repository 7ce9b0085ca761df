use super::*;

parameterized_test! {can_detect_time_window_overlap, (first, second, expected), {
    can_detect_time_window_overlap_impl(TimeWindow::new(first.0, first.1), TimeWindow::new(second.0, second.1), expected);
}}

can_detect_time_window_overlap! {
    case01_touching_end: ((1, 2), (2, 3), false),
    case02_touching_start: ((2, 3), (1, 2), false),
    case03_partial: ((1, 3), (2, 4), true),
    case04_nested: ((1, 10), (4, 5), true),
    case05_same: ((1, 2), (1, 2), true),
    case06_disjoint: ((1, 2), (5, 6), false),
}

fn can_detect_time_window_overlap_impl(first: TimeWindow, second: TimeWindow, expected: bool) {
    assert_eq!(first.overlaps(&second), expected);
    assert_eq!(second.overlaps(&first), expected);
}

#[test]
fn can_get_duration() {
    assert_eq!(TimeWindow::new(100, 350).duration(), 250);
}
