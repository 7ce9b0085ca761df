//! A contract between the route graph core and a search which drives it.
//!
//! A search proposes a structural mutation, applies it, lets schedules propagate, scores the graph and then
//! either accepts the result or rolls the mutation back by applying its inverse. [`Solver`] implements this
//! loop for any [`SearchStrategy`] and keeps the best known graph.

#[cfg(test)]
#[path = "../../tests/unit/solver/solver_test.rs"]
mod solver_test;

use crate::construction::schedule_update::{update_all_schedules, update_schedules};
use crate::models::goal::{GoalContext, Score};
use crate::models::problem::StopIndex;
use crate::models::solution::{GraphError, RouteGraph, Standstill};
use crate::utils::Timer;
use std::sync::mpsc::Sender;
use tracing::{debug, info, warn};

pub mod termination;
use self::termination::Termination;

mod relocate;
pub use self::relocate::RelocateSearch;

/// A structural mutation: moves the stop right after the target standstill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub stop: StopIndex,
    pub target: Standstill,
}

/// Proposes mutations and decides whether their outcome is accepted.
pub trait SearchStrategy: Send {
    /// Selects next move, returns `None` when nothing can be moved.
    fn select_move(&mut self, graph: &RouteGraph) -> Option<Move>;

    /// Decides whether the candidate score replaces the current one.
    fn is_accepted(&mut self, current: &Score, candidate: &Score) -> bool {
        candidate >= current
    }
}

/// Applies the move and updates affected schedules. Returns the inverse move.
pub fn apply_move(graph: &mut RouteGraph, mv: Move) -> Result<Move, GraphError> {
    let origin = graph.get_stop(mv.stop).ok_or(GraphError::UnknownStop(mv.stop))?;
    let origin = origin.previous().ok_or(GraphError::DetachedStop(mv.stop))?;

    let changes = graph.relocate(mv.stop, mv.target)?;
    update_schedules(graph, changes.as_slice());

    Ok(Move { stop: mv.stop, target: origin })
}

/// Search state visible to termination criteria.
#[derive(Clone, Debug)]
pub struct SearchProgress {
    pub iteration: usize,
    pub best_score: Score,
    pub current_score: Score,
    timer: Timer,
    last_improvement_millis: u128,
}

impl SearchProgress {
    /// Creates a new instance of `SearchProgress` starting the clock now.
    pub fn new(score: Score) -> Self {
        Self { iteration: 0, best_score: score, current_score: score, timer: Timer::start(), last_improvement_millis: 0 }
    }

    pub fn elapsed_millis(&self) -> u128 {
        self.timer.elapsed_millis()
    }

    /// Returns time passed since the best score was improved last time.
    pub fn unimproved_millis(&self) -> u128 {
        self.elapsed_millis().saturating_sub(self.last_improvement_millis)
    }

    fn on_improvement(&mut self, score: Score) {
        self.best_score = score;
        self.last_improvement_millis = self.elapsed_millis();
    }
}

/// A copy of the best known graph sent to a snapshot consumer.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub graph: RouteGraph,
    pub score: Score,
}

/// A search result.
#[derive(Clone, Debug)]
pub struct SolverOutcome {
    pub graph: RouteGraph,
    pub score: Score,
    pub iterations: usize,
    pub elapsed_millis: u128,
}

struct SnapshotChannel {
    sender: Sender<Snapshot>,
    include_infeasible: bool,
}

/// Runs a search strategy over a route graph until termination.
pub struct Solver {
    goal: GoalContext,
    strategy: Box<dyn SearchStrategy>,
    termination: Box<dyn Termination>,
    snapshots: Option<SnapshotChannel>,
}

impl Solver {
    /// Creates a new instance of [`Solver`].
    pub fn new(goal: GoalContext, strategy: Box<dyn SearchStrategy>, termination: Box<dyn Termination>) -> Self {
        Self { goal, strategy, termination, snapshots: None }
    }

    /// Sends every new best graph to the channel. Infeasible ones are skipped unless requested.
    pub fn with_snapshots(mut self, sender: Sender<Snapshot>, include_infeasible: bool) -> Self {
        self.snapshots = Some(SnapshotChannel { sender, include_infeasible });
        self
    }

    /// Searches for a better schedule starting from the given graph.
    pub fn solve(mut self, mut graph: RouteGraph) -> Result<SolverOutcome, GraphError> {
        update_all_schedules(&mut graph);

        let mut current = self.goal.evaluate(&graph);
        let mut best = graph.clone();
        let mut progress = SearchProgress::new(current);

        info!(score = %current, "search started");

        while !self.termination.is_termination(&progress) {
            let Some(mv) = self.strategy.select_move(&graph) else {
                debug!("no more moves available");
                break;
            };
            progress.iteration += 1;

            let inverse = apply_move(&mut graph, mv)?;
            let candidate = self.goal.evaluate(&graph);

            if self.strategy.is_accepted(&current, &candidate) {
                current = candidate;
                progress.current_score = candidate;

                if candidate > progress.best_score {
                    debug!(iteration = progress.iteration, score = %candidate, "new best");
                    progress.on_improvement(candidate);
                    best = graph.clone();
                    self.publish(&best, candidate);
                }
            } else {
                apply_move(&mut graph, inverse)?;
            }
        }

        let elapsed_millis = progress.elapsed_millis();
        info!(iterations = progress.iteration, elapsed_millis, score = %progress.best_score, "search finished");

        Ok(SolverOutcome { graph: best, score: progress.best_score, iterations: progress.iteration, elapsed_millis })
    }

    fn publish(&mut self, graph: &RouteGraph, score: Score) {
        let Some(channel) = self.snapshots.as_ref() else { return };
        if !channel.include_infeasible && !score.is_feasible() {
            return;
        }

        if channel.sender.send(Snapshot { graph: graph.clone(), score }).is_err() {
            warn!("snapshot consumer is gone, stop sending snapshots");
            self.snapshots = None;
        }
    }
}
