//! Runs a search over a solve request and writes the result back in pragmatic format.

#[cfg(test)]
#[path = "../tests/unit/solve_test.rs"]
mod solve_test;

use crate::format::problem::{PragmaticProblem, ProblemContext, SnapshotMode, SolveRequest, TerminationSettings};
use crate::format::solution::{SolveResponse, SolveStatus, create_no_demand_solution, create_solution};
use crate::format::{FormatError, MultiFormatError};
use fieldroute_core::solver::termination::{CompositeTermination, FirstFeasible, MaxTime, Termination, UnimprovedTime};
use fieldroute_core::solver::{RelocateSearch, Snapshot, Solver};
use std::sync::mpsc::{Sender, channel};
use tracing::{info, warn};

/// Solves the request and returns the final response only.
pub fn solve(request: SolveRequest) -> Result<SolveResponse, MultiFormatError> {
    solve_request(request, None)
}

/// Solves the request sending intermediate best solutions to the consumer, as configured by the request.
/// The final response is returned, not sent.
pub fn solve_with_snapshots(
    request: SolveRequest,
    consumer: Sender<SolveResponse>,
) -> Result<SolveResponse, MultiFormatError> {
    solve_request(request, Some(consumer))
}

fn solve_request(
    request: SolveRequest,
    consumer: Option<Sender<SolveResponse>>,
) -> Result<SolveResponse, MultiFormatError> {
    let ProblemContext { description, graph, goal, settings } = request.read_pragmatic()?;

    info!(
        visits = description.visits.len(),
        rest_breaks = description.rest_breaks.len(),
        shift_teams = description.shift_teams.len(),
        "solve request is accepted"
    );

    if !graph.has_demand() {
        info!("nothing to schedule, return description as is");
        return Ok(SolveResponse { status: SolveStatus::Finished, solution: create_no_demand_solution(&description) });
    }

    let solver = Solver::new(
        goal.clone(),
        Box::new(RelocateSearch::new(settings.random_seed)),
        create_termination(&settings.termination),
    );

    let consumer = consumer.filter(|_| settings.snapshots != SnapshotMode::Disabled);

    let outcome = match consumer {
        Some(consumer) => {
            let (sender, receiver) = channel::<Snapshot>();
            let solver = solver.with_snapshots(sender, settings.snapshots == SnapshotMode::All);

            std::thread::scope(|scope| {
                scope.spawn(|| {
                    for snapshot in receiver {
                        let status = if snapshot.score.is_feasible() {
                            SolveStatus::IntermediateFeasible
                        } else {
                            SolveStatus::IntermediateInfeasible
                        };
                        let solution = create_solution(&description, &snapshot.graph, &goal, &settings.output);

                        if consumer.send(SolveResponse { status, solution }).is_err() {
                            warn!("snapshot consumer is disconnected");
                            break;
                        }
                    }
                });

                // NOTE solver owns the sender and drops it on return, which ends the loop above
                solver.solve(graph)
            })
        }
        None => solver.solve(graph),
    }
    .map_err(|err| {
        FormatError::new_with_details(
            "E1700".to_string(),
            "search has failed".to_string(),
            "check shift team chains of the request".to_string(),
            err.to_string(),
        )
    })?;

    info!(
        iterations = outcome.iterations,
        elapsed_millis = outcome.elapsed_millis as u64,
        score = %outcome.score,
        "solve is finished"
    );

    Ok(SolveResponse {
        status: SolveStatus::Finished,
        solution: create_solution(&description, &outcome.graph, &goal, &settings.output),
    })
}

fn create_termination(settings: &TerminationSettings) -> Box<dyn Termination> {
    let mut terminations: Vec<Box<dyn Termination>> = vec![Box::new(MaxTime::new(settings.duration_ms))];

    if let Some(unimproved_ms) = settings.unimproved_ms {
        terminations.push(Box::new(UnimprovedTime::new(unimproved_ms)));
    }

    if settings.first_feasible {
        terminations.push(Box::new(FirstFeasible));
    }

    Box::new(CompositeTermination::new(terminations))
}
