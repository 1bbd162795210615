//! Stochastic refinement over a successor-array representation
//!
//! Every tile points at exactly one neighbor. Following successors from the
//! start traces a walk; when the trace returns to the start it is a closed
//! cycle. Trials rewrite a few successor entries at random, and each
//! iteration moves to its best trial whether or not that improves on the
//! best cycle seen, so the working state can wander through worse
//! configurations while the best one is kept aside.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

use crate::algorithm::bitset::TileBitset;
use crate::algorithm::cancel::StopToken;
use crate::algorithm::walk::raise_capacity;
use crate::io::configuration::{
    CYCLE_LENGTH_WEIGHT, CYCLE_POINT_WEIGHT, INITIAL_CAPACITY, LOCAL_SEARCH_MAX_TRIALS,
    LOCAL_SEARCH_STAGNATION_LIMIT, MUTATIONS_PER_TRIAL, TRIALS_PER_CHANGEABLE, WALK_LENGTH_WEIGHT,
};
use crate::spatial::grid::Grid;

/// Hill-climbing search over successor arrays
pub struct LocalSearch<'g> {
    grid: &'g Grid,
    seed: Option<u64>,
}

impl<'g> LocalSearch<'g> {
    /// Create a search seeded from OS entropy
    pub const fn new(grid: &'g Grid) -> Self {
        Self { grid, seed: None }
    }

    /// Use a fixed seed, or OS entropy for `None`
    #[must_use]
    pub const fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Refine `walk` with every tile changeable
    pub fn run(&self, walk: &[u16], stop: &StopToken) -> Vec<u16> {
        let changeable: Vec<u16> = (0..self.grid.len()).map(|index| index as u16).collect();
        self.run_on(walk, &changeable, stop)
    }

    /// Refine `walk`, perturbing only the `changeable` tiles
    ///
    /// Returns the best closed cycle found, or just the start index if no
    /// trace closed. An empty `changeable` set returns `walk` unchanged.
    pub fn run_on(&self, walk: &[u16], changeable: &[u16], stop: &StopToken) -> Vec<u16> {
        if changeable.is_empty() {
            return walk.to_vec();
        }

        let mut rng = self
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

        let initial = self.successors(walk, &mut rng);
        let best = self.refine(initial, changeable, &mut rng, stop);
        self.cycle(self.trace(&best))
    }

    /// Successor array following `walk`, random neighbors elsewhere
    pub fn successors(&self, walk: &[u16], rng: &mut StdRng) -> Vec<u16> {
        let mut successors: Vec<u16> = (0..self.grid.len())
            .map(|index| self.random_neighbor(index as u16, rng))
            .collect();

        for pair in walk.windows(2) {
            successors[usize::from(pair[0])] = pair[1];
        }

        successors
    }

    /// Follow successors from the start while tiles are new and unlockable
    pub fn trace(&self, successors: &[u16]) -> Vec<u16> {
        let start = self.grid.start();
        let mut walk = Vec::with_capacity(self.grid.len() + 1);
        walk.push(start);

        let mut visited = TileBitset::new(self.grid.len());
        let mut capacity = INITIAL_CAPACITY;
        let mut index = successors[usize::from(start)];

        loop {
            if visited.contains(index) {
                break;
            }

            let point = self.grid.point(index);
            if u16::from(point) > capacity {
                break;
            }

            walk.push(index);
            visited.insert(index);
            capacity = raise_capacity(capacity, point);
            index = successors[usize::from(index)];
        }

        walk
    }

    /// The traced walk if it closed, otherwise the bare start index
    pub fn cycle(&self, trace: Vec<u16>) -> Vec<u16> {
        if trace.first() == trace.last() {
            trace
        } else {
            vec![self.grid.start()]
        }
    }

    /// Composite score rewarding points, cycle length and raw walk length
    pub fn score(&self, successors: &[u16]) -> u32 {
        let trace = self.trace(successors);
        let walk_length = trace.len() as u32;
        let cycle = self.cycle(trace);

        CYCLE_POINT_WEIGHT * self.grid.score(&cycle)
            + CYCLE_LENGTH_WEIGHT * cycle.len() as u32
            + WALK_LENGTH_WEIGHT * walk_length
    }

    fn cycle_points(&self, successors: &[u16]) -> u32 {
        self.grid.score(&self.cycle(self.trace(successors)))
    }

    /// Hill-climb from `initial` and return the best successor array seen
    ///
    /// Only entries of `changeable` tiles are ever rewritten; every other
    /// entry keeps its value from `initial`. "Best" means most cycle points,
    /// while the composite score steers the climb and its stagnation limit.
    pub fn refine(
        &self,
        initial: Vec<u16>,
        changeable: &[u16],
        rng: &mut StdRng,
        stop: &StopToken,
    ) -> Vec<u16> {
        if changeable.is_empty() {
            return initial;
        }

        let trials = (changeable.len() * TRIALS_PER_CHANGEABLE).min(LOCAL_SEARCH_MAX_TRIALS);

        let mut answer_points = self.cycle_points(&initial);
        let mut answer = initial.clone();
        let mut best_score = self.score(&initial);
        let mut working = initial;
        let mut staying = 0usize;

        while staying < LOCAL_SEARCH_STAGNATION_LIMIT && !stop.is_stopped() {
            staying += 1;

            let mut next: Option<(u32, Vec<u16>)> = None;
            for _ in 0..trials {
                let mut undo: SmallVec<[(u16, u16); MUTATIONS_PER_TRIAL]> = SmallVec::new();

                for _ in 0..MUTATIONS_PER_TRIAL {
                    let index = changeable[rng.random_range(0..changeable.len())];
                    undo.push((index, working[usize::from(index)]));
                    working[usize::from(index)] = self.random_neighbor(index, rng);
                }

                let trial_score = self.score(&working);
                if next
                    .as_ref()
                    .is_none_or(|(next_score, _)| trial_score > *next_score)
                {
                    next = Some((trial_score, working.clone()));
                }

                for &(index, original) in undo.iter().rev() {
                    working[usize::from(index)] = original;
                }
            }

            let Some((next_score, next_successors)) = next else {
                break;
            };

            if next_score > best_score {
                best_score = next_score;
                staying = 0;
            }

            let next_points = self.cycle_points(&next_successors);
            if next_points > answer_points {
                answer_points = next_points;
                answer.clone_from(&next_successors);
            }

            working = next_successors;
        }

        answer
    }

    fn random_neighbor(&self, index: u16, rng: &mut StdRng) -> u16 {
        let neighbors = self.grid.neighbors(index);
        if neighbors.is_empty() {
            return index;
        }
        neighbors[rng.random_range(0..neighbors.len())]
    }
}
