//! Priority-guided beam search used as a fast opener on larger grids
//!
//! Each round pops the best `BEAM_WIDTH` partial walks, expands them along
//! capacity-eligible neighbors, and keeps only children that can plausibly
//! still return to the start and whose (visited set, candidate) pair has not
//! been expanded before.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::hash::{Hash, Hasher};

use log::debug;
use rustc_hash::{FxHashSet, FxHasher};

use crate::algorithm::bitset::TileBitset;
use crate::algorithm::cancel::StopToken;
use crate::algorithm::walk::raise_capacity;
use crate::io::configuration::{
    BEAM_WIDTH, INITIAL_CAPACITY, RETURNABILITY_EXPANSION_LIMIT, SEARCHED_HASHES_CAPACITY,
};
use crate::spatial::grid::Grid;

/// Partial walk with its visited set, capacity and heuristic score
#[derive(Clone, Debug)]
struct BeamState {
    walk: Vec<u16>,
    visited: TileBitset,
    capacity: u16,
    score: f32,
}

impl BeamState {
    fn is_goaled(&self, start: u16) -> bool {
        self.visited.contains(start)
    }
}

impl PartialEq for BeamState {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BeamState {}

impl PartialOrd for BeamState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BeamState {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score.total_cmp(&other.score)
    }
}

/// Result of a beam search run with its expansion counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeamOutcome {
    /// Most recently completed closed walk, empty if none closed
    pub walk: Vec<u16>,
    /// Rounds of popping and expanding
    pub rounds: usize,
    /// Children created, one per (visited set, candidate) pair
    pub expanded: usize,
    /// Candidates dropped because their pair was already expanded
    pub duplicates: usize,
}

/// Beam search over partial walks
pub struct BeamSearch<'g> {
    grid: &'g Grid,
    width: usize,
}

impl<'g> BeamSearch<'g> {
    /// Create a search with the default beam width
    pub const fn new(grid: &'g Grid) -> Self {
        Self {
            grid,
            width: BEAM_WIDTH,
        }
    }

    /// Override the number of states popped per round
    #[must_use]
    pub const fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Run until the beam empties or `stop` is observed
    ///
    /// Returns the most recently completed closed walk, or an empty walk if
    /// none closed before the search ended.
    pub fn run(&self, stop: &StopToken) -> Vec<u16> {
        self.search(stop).walk
    }

    /// Run like [`BeamSearch::run`], also reporting how much was expanded
    pub fn search(&self, stop: &StopToken) -> BeamOutcome {
        let start = self.grid.start();
        let mut searched =
            FxHashSet::with_capacity_and_hasher(SEARCHED_HASHES_CAPACITY, Default::default());
        let mut outcome = BeamOutcome::default();

        let mut queue = BinaryHeap::new();
        queue.push(BeamState {
            walk: vec![start],
            visited: TileBitset::new(self.grid.len()),
            capacity: INITIAL_CAPACITY,
            score: 0.0,
        });

        while !queue.is_empty() && !stop.is_stopped() {
            let mut next_queue = BinaryHeap::new();

            for _ in 0..self.width {
                let Some(state) = queue.pop() else {
                    break;
                };

                if state.is_goaled(start) {
                    outcome.walk = state.walk;
                    continue;
                }

                self.expand(&state, &mut searched, &mut outcome, &mut next_queue);
            }

            queue = next_queue;
            outcome.rounds += 1;
        }

        debug!(
            "beam search ran {} rounds, expanded {} pairs, dropped {} repeats, best walk length {}",
            outcome.rounds,
            outcome.expanded,
            outcome.duplicates,
            outcome.walk.len()
        );
        outcome
    }

    fn expand(
        &self,
        state: &BeamState,
        searched: &mut FxHashSet<u64>,
        outcome: &mut BeamOutcome,
        children: &mut BinaryHeap<BeamState>,
    ) {
        let Some(&last) = state.walk.last() else {
            return;
        };

        let mut visited_hasher = FxHasher::default();
        state.visited.hash(&mut visited_hasher);

        for &next in self.grid.neighbors(last) {
            if state.visited.contains(next) {
                continue;
            }

            let point = self.grid.point(next);
            if u16::from(point) > state.capacity {
                continue;
            }

            if !self.maybe_returnable(&state.visited, next) {
                continue;
            }

            let mut hasher = visited_hasher.clone();
            next.hash(&mut hasher);
            if !searched.insert(hasher.finish()) {
                outcome.duplicates += 1;
                continue;
            }
            outcome.expanded += 1;

            let mut walk = Vec::with_capacity(state.walk.len() + 1);
            walk.extend_from_slice(&state.walk);
            walk.push(next);

            let mut visited = state.visited.clone();
            visited.insert(next);

            let score = self.heuristic(&walk, &visited);
            children.push(BeamState {
                walk,
                visited,
                capacity: raise_capacity(state.capacity, point),
                score,
            });
        }
    }

    /// Distance-guided flood from `next` towards the start, capped in size
    fn maybe_returnable(&self, visited: &TileBitset, next: u16) -> bool {
        let start = self.grid.start();
        let mut seen = visited.clone();
        seen.insert(next);

        let mut queue = BinaryHeap::new();
        queue.push((Reverse(self.grid.distance(next)), next));

        let mut expansions = 0usize;
        while let Some((_, index)) = queue.pop() {
            expansions += 1;
            if expansions > RETURNABILITY_EXPANSION_LIMIT {
                return false;
            }

            if index == start {
                return true;
            }

            for &around in self.grid.neighbors(index) {
                if seen.contains(around) {
                    continue;
                }
                seen.insert(around);
                queue.push((Reverse(self.grid.distance(around)), around));
            }
        }

        false
    }

    /// Favors boundary tiles and regions whose neighbors are mostly visited
    fn heuristic(&self, walk: &[u16], visited: &TileBitset) -> f32 {
        walk.iter()
            .map(|&index| {
                let neighbors = self.grid.neighbors(index);
                let edge = (6 - neighbors.len()) as f32 / 6.0;
                if neighbors.is_empty() {
                    return edge;
                }

                let visited_neighbors = neighbors
                    .iter()
                    .filter(|&&around| visited.contains(around))
                    .count();
                edge + visited_neighbors as f32 / neighbors.len() as f32
            })
            .sum()
    }
}
