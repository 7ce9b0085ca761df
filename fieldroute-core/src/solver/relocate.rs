use super::*;
use crate::models::problem::Stop;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

/// A reference search which moves a random unpinned visit or rest break after a random standstill
/// and accepts non-worsening results. Pinned stops are never moved and never get a new predecessor.
pub struct RelocateSearch {
    random: SmallRng,
}

impl RelocateSearch {
    /// Creates a new instance of `RelocateSearch` with a reproducible random sequence.
    pub fn new(seed: u64) -> Self {
        Self { random: SmallRng::seed_from_u64(seed) }
    }
}

impl SearchStrategy for RelocateSearch {
    fn select_move(&mut self, graph: &RouteGraph) -> Option<Move> {
        let candidates =
            graph.stops().filter(|(_, stop)| is_movable(graph, stop)).map(|(idx, _)| idx).collect::<Vec<_>>();
        let stop = *candidates.choose(&mut self.random)?;
        let previous = graph.stop(stop).previous();

        let targets = graph
            .vehicles()
            .map(|(idx, _)| Standstill::Vehicle(idx))
            .chain(
                graph
                    .stops()
                    .filter(|(_, record)| record.is_attached() && !record.is_final_depot_return())
                    .map(|(idx, _)| Standstill::Stop(idx)),
            )
            .filter(|target| *target != Standstill::Stop(stop) && Some(*target) != previous)
            .filter(|target| graph.next_of(*target).is_none_or(|next| next == stop || !graph.stop(next).pinned))
            .collect::<Vec<_>>();

        targets.choose(&mut self.random).map(|&target| Move { stop, target })
    }
}

fn is_movable(graph: &RouteGraph, stop: &Stop) -> bool {
    !stop.pinned
        && (stop.is_visit() || stop.is_rest_break())
        && stop.is_attached()
        && stop.next().is_none_or(|next| !graph.stop(next).pinned)
}
