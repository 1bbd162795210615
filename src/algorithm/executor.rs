//! Time-boxed orchestration of the search components
//!
//! Three stages run in sequence, each launching its tasks on scoped worker
//! threads that share the immutable grid. The orchestrator waits for each
//! task until the stage deadline, stops it, joins it, and threads the best
//! walk by points into the next stage:
//!
//! 1. Opening: exhaustive search, fattening from the start, beam search.
//! 2. Refinement: fattening and whole-grid local searches from the opening.
//! 3. Frontier: local searches restricted to the refinement's frontier.
//!
//! A finished exhaustive search, or any stage walk covering every tile, ends
//! the pipeline early.

use std::thread::{self, Scope, ScopedJoinHandle};
use std::time::{Duration, Instant};

use log::info;

use crate::algorithm::beam::BeamSearch;
use crate::algorithm::cancel::StopToken;
use crate::algorithm::exhaustive::ExhaustiveSearch;
use crate::algorithm::fattening::Fattening;
use crate::algorithm::local_search::LocalSearch;
use crate::algorithm::walk::{best_by_points, frontier};
use crate::io::configuration::{
    BEAM_DEADLINE, EXHAUSTIVE_DEADLINE, FATTENING_SHORTCUT_LENGTH, FRONTIER_DEADLINE,
    FRONTIER_WORKERS, REFINEMENT_DEADLINE, REFINEMENT_WORKERS, SEED_FATTENING_DEADLINE,
    TASK_POLL_INTERVAL,
};
use crate::spatial::grid::Grid;

/// Stage deadlines, measured from the solve start, and worker counts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Schedule {
    /// Exhaustive search deadline
    pub exhaustive_deadline: Duration,
    /// Deadline of the fattening run seeded from the start tile
    pub seed_fattening_deadline: Duration,
    /// Beam search deadline
    pub beam_deadline: Duration,
    /// Whole-grid refinement deadline
    pub refinement_deadline: Duration,
    /// Frontier refinement deadline
    pub frontier_deadline: Duration,
    /// Seeded fattening walks longer than this skip beam search
    pub fattening_shortcut_length: usize,
    /// Local search workers in the refinement stage
    pub refinement_workers: usize,
    /// Local search workers in the frontier stage
    pub frontier_workers: usize,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            exhaustive_deadline: EXHAUSTIVE_DEADLINE,
            seed_fattening_deadline: SEED_FATTENING_DEADLINE,
            beam_deadline: BEAM_DEADLINE,
            refinement_deadline: REFINEMENT_DEADLINE,
            frontier_deadline: FRONTIER_DEADLINE,
            fattening_shortcut_length: FATTENING_SHORTCUT_LENGTH,
            refinement_workers: REFINEMENT_WORKERS,
            frontier_workers: FRONTIER_WORKERS,
        }
    }
}

impl Schedule {
    /// Scale every deadline by `factor`, keeping worker counts
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            exhaustive_deadline: self.exhaustive_deadline.mul_f64(factor),
            seed_fattening_deadline: self.seed_fattening_deadline.mul_f64(factor),
            beam_deadline: self.beam_deadline.mul_f64(factor),
            refinement_deadline: self.refinement_deadline.mul_f64(factor),
            frontier_deadline: self.frontier_deadline.mul_f64(factor),
            ..self
        }
    }
}

/// Pipeline stage that produced a walk
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Exhaustive, fattening and beam search from scratch
    Opening,
    /// Fattening and whole-grid local search
    Refinement,
    /// Local search on the frontier of the refined walk
    Frontier,
}

/// Why the pipeline stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Finish {
    /// Exhaustive search completed, so the walk is optimal
    ExhaustiveOptimum,
    /// A stage walk visited every tile
    PerfectCover(Stage),
    /// All stages ran to their deadlines
    AllStages,
}

/// Best walk after one stage
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StageReport {
    /// Stage that just finished
    pub stage: Stage,
    /// Points of the stage's best walk
    pub points: u32,
    /// Length of the stage's best walk
    pub length: usize,
}

/// Final answer of the pipeline
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Chosen walk as tile indices
    pub walk: Vec<u16>,
    /// Points collected by the walk
    pub points: u32,
    /// Why the pipeline stopped
    pub finish: Finish,
}

/// A search running on a scoped thread with its own stop token
struct Task<'scope, T> {
    handle: ScopedJoinHandle<'scope, T>,
    stop: StopToken,
}

impl<'scope, T> Task<'scope, T> {
    fn spawn<'env, F>(scope: &'scope Scope<'scope, 'env>, work: F) -> Self
    where
        F: FnOnce(&StopToken) -> T + Send + 'scope,
        T: Send + 'scope,
    {
        let stop = StopToken::new();
        let token = stop.clone();
        let handle = scope.spawn(move || work(&token));
        Self { handle, stop }
    }

    /// Wait until the task finishes or `deadline` passes, then stop and join
    fn finish_by(self, deadline: Instant) -> T {
        while !self.handle.is_finished() {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            thread::sleep((deadline - now).min(TASK_POLL_INTERVAL));
        }
        self.cancel()
    }

    /// Stop the task now and join it
    fn cancel(self) -> T {
        self.stop.stop();
        match self.handle.join() {
            Ok(result) => result,
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }
}

enum Opening {
    Optimal(Vec<u16>),
    Walk(Vec<u16>),
}

/// Runs the three-stage search pipeline over one grid
pub struct StagedSolver<'g> {
    grid: &'g Grid,
    schedule: Schedule,
    seed: Option<u64>,
}

impl<'g> StagedSolver<'g> {
    /// Create a solver with the given schedule
    pub const fn new(grid: &'g Grid, schedule: Schedule) -> Self {
        Self {
            grid,
            schedule,
            seed: None,
        }
    }

    /// Seed every stochastic worker deterministically from `seed`
    #[must_use]
    pub const fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Run the pipeline with deadlines measured from `started`
    pub fn solve(&self, started: Instant) -> Solution {
        self.solve_with(started, |_| {})
    }

    /// Run the pipeline, reporting each stage's best walk to `on_stage`
    pub fn solve_with<F>(&self, started: Instant, mut on_stage: F) -> Solution
    where
        F: FnMut(&StageReport),
    {
        let opening = match self.opening(started) {
            Opening::Optimal(walk) => {
                info!("exhaustive search finished; answer is optimal");
                let solution = self.solution(walk, Finish::ExhaustiveOptimum);
                on_stage(&self.report(Stage::Opening, &solution.walk));
                return solution;
            }
            Opening::Walk(walk) => walk,
        };
        if let Some(solution) = self.conclude(Stage::Opening, opening.clone(), &mut on_stage) {
            return solution;
        }

        let refined = self.refinement(started, &opening);
        if let Some(solution) = self.conclude(Stage::Refinement, refined.clone(), &mut on_stage) {
            return solution;
        }

        let last = self.frontier_refinement(started, &refined);
        self.conclude(Stage::Frontier, last.clone(), &mut on_stage)
            .unwrap_or_else(|| self.solution(last, Finish::AllStages))
    }

    /// Report a stage result and stop early if it covers every tile
    fn conclude<F>(&self, stage: Stage, walk: Vec<u16>, on_stage: &mut F) -> Option<Solution>
    where
        F: FnMut(&StageReport),
    {
        let report = self.report(stage, &walk);
        info!(
            "{stage:?} stage: {} points over {} tiles",
            report.points, report.length
        );
        on_stage(&report);

        (walk.len() == self.grid.len() + 1).then(|| {
            info!("{stage:?} stage covered every tile");
            self.solution(walk, Finish::PerfectCover(stage))
        })
    }

    fn report(&self, stage: Stage, walk: &[u16]) -> StageReport {
        StageReport {
            stage,
            points: self.grid.score(walk),
            length: walk.len(),
        }
    }

    fn solution(&self, walk: Vec<u16>, finish: Finish) -> Solution {
        Solution {
            points: self.grid.score(&walk),
            walk,
            finish,
        }
    }

    fn worker_seed(&self, stage_offset: u64, worker: usize) -> Option<u64> {
        self.seed
            .map(|seed| seed.wrapping_add(stage_offset).wrapping_add(worker as u64))
    }

    fn opening(&self, started: Instant) -> Opening {
        let grid = self.grid;
        let schedule = self.schedule;

        thread::scope(|scope| {
            let exhaustive = Task::spawn(scope, move |stop| ExhaustiveSearch::new(grid).run(stop));
            let fattening = Task::spawn(scope, move |stop| Fattening::new(grid).run_from_start(stop));
            let beam = Task::spawn(scope, move |stop| BeamSearch::new(grid).run(stop));

            let exhaustive = exhaustive.finish_by(started + schedule.exhaustive_deadline);
            if exhaustive.finished && !exhaustive.walk.is_empty() {
                fattening.cancel();
                beam.cancel();
                return Opening::Optimal(exhaustive.walk);
            }

            let fattened = fattening.finish_by(started + schedule.seed_fattening_deadline);
            if fattened.len() > schedule.fattening_shortcut_length {
                info!(
                    "seeded fattening reached {} tiles; skipping beam search",
                    fattened.len()
                );
                beam.cancel();
                return Opening::Walk(fattened);
            }

            let beamed = beam.finish_by(started + schedule.beam_deadline);
            Opening::Walk(best_by_points(grid, [fattened, beamed, exhaustive.walk]))
        })
    }

    fn refinement(&self, started: Instant, seed_walk: &[u16]) -> Vec<u16> {
        let grid = self.grid;
        let deadline = started + self.schedule.refinement_deadline;

        thread::scope(|scope| {
            let fattening = Task::spawn(scope, move |stop| Fattening::new(grid).run(seed_walk, stop));
            let searches: Vec<_> = (0..self.schedule.refinement_workers)
                .map(|worker| {
                    let search = LocalSearch::new(grid).with_seed(self.worker_seed(0, worker));
                    Task::spawn(scope, move |stop| search.run(seed_walk, stop))
                })
                .collect();

            let mut candidates = vec![fattening.finish_by(deadline)];
            candidates.extend(searches.into_iter().map(|task| task.finish_by(deadline)));
            candidates.push(seed_walk.to_vec());

            best_by_points(grid, candidates)
        })
    }

    fn frontier_refinement(&self, started: Instant, seed_walk: &[u16]) -> Vec<u16> {
        let grid = self.grid;
        let deadline = started + self.schedule.frontier_deadline;
        let changeable = frontier(grid, seed_walk);
        let changeable = changeable.as_slice();

        thread::scope(|scope| {
            let searches: Vec<_> = (0..self.schedule.frontier_workers)
                .map(|worker| {
                    let search = LocalSearch::new(grid).with_seed(self.worker_seed(1 << 32, worker));
                    Task::spawn(scope, move |stop| search.run_on(seed_walk, changeable, stop))
                })
                .collect();

            let mut candidates: Vec<Vec<u16>> = searches
                .into_iter()
                .map(|task| task.finish_by(deadline))
                .collect();
            candidates.push(seed_walk.to_vec());

            best_by_points(grid, candidates)
        })
    }
}
