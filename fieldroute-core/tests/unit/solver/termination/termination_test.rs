use super::*;
use crate::models::goal::Score;
use crate::solver::SearchProgress;

fn create_progress(iteration: usize, best_score: Score) -> SearchProgress {
    let mut progress = SearchProgress::new(best_score);
    progress.iteration = iteration;

    progress
}

parameterized_test! {can_detect_max_iterations, (limit, iteration, expected, estimate), {
    let termination = MaxIterations::new(limit);
    let progress = create_progress(iteration, Score::default());

    assert_eq!(termination.is_termination(&progress), expected);
    assert_eq!(termination.estimate(&progress), estimate);
}}

can_detect_max_iterations! {
    case01_not_reached: (10, 5, false, 0.5),
    case02_reached: (10, 10, true, 1.),
    case03_zero_limit: (0, 0, true, 1.),
}

parameterized_test! {can_detect_first_feasible, (score, expected), {
    let progress = create_progress(0, score);

    assert_eq!(FirstFeasible.is_termination(&progress), expected);
}}

can_detect_first_feasible! {
    case01_feasible: (Score::new([0, 0, 0], -100), true),
    case02_unassigned: (Score::new([0, 0, -1001], 0), false),
    case03_structural: (Score::new([-1, 0, 0], 0), false),
}

#[test]
fn can_detect_elapsed_time() {
    let progress = create_progress(0, Score::default());

    assert!(MaxTime::new(0).is_termination(&progress));
    assert!(!MaxTime::new(3_600_000).is_termination(&progress));
    assert!(UnimprovedTime::new(0).is_termination(&progress));
    assert!(!UnimprovedTime::new(3_600_000).is_termination(&progress));
}

#[test]
fn can_terminate_when_any_criteria_does() {
    let progress = create_progress(5, Score::default());
    let composite = |limit: usize| {
        CompositeTermination::new(vec![Box::new(MaxTime::new(3_600_000)), Box::new(MaxIterations::new(limit))])
    };

    assert!(composite(5).is_termination(&progress));
    assert!(!composite(6).is_termination(&progress));
    assert_eq!(composite(10).estimate(&progress), 0.5);
}
