//! Exact bitmask depth-first search for small grids
//!
//! Enumerates every capacity-respecting walk from the start tile using a
//! `u64` visited mask, so it only runs on grids of at most 64 tiles. The
//! search is exponential; the stop token is checked once per expansion.

use crate::algorithm::cancel::StopToken;
use crate::algorithm::walk::raise_capacity;
use crate::io::configuration::{EXHAUSTIVE_TILE_LIMIT, INITIAL_CAPACITY};
use crate::spatial::grid::Grid;

/// Result of an exhaustive search run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExhaustiveOutcome {
    /// Best closed walk found, empty if none was found
    pub walk: Vec<u16>,
    /// Whether the enumeration completed, making `walk` optimal
    pub finished: bool,
}

/// Depth-first enumerator over all closed walks of a small grid
pub struct ExhaustiveSearch<'g> {
    grid: &'g Grid,
}

struct Enumeration<'g, 's> {
    grid: &'g Grid,
    stop: &'s StopToken,
    best: Vec<u16>,
    best_points: u32,
    interrupted: bool,
}

impl<'g> ExhaustiveSearch<'g> {
    /// Create a search over the given grid
    pub const fn new(grid: &'g Grid) -> Self {
        Self { grid }
    }

    /// Whether the grid is small enough for a bitmask search
    pub fn is_applicable(&self) -> bool {
        self.grid.len() <= EXHAUSTIVE_TILE_LIMIT
    }

    /// Run until the enumeration completes or `stop` is observed
    ///
    /// On cancellation the best walk recorded so far is returned with
    /// `finished` unset. Grids above the tile limit yield an empty,
    /// unfinished outcome.
    pub fn run(&self, stop: &StopToken) -> ExhaustiveOutcome {
        if !self.is_applicable() {
            return ExhaustiveOutcome::default();
        }

        let mut enumeration = Enumeration {
            grid: self.grid,
            stop,
            best: Vec::new(),
            best_points: 0,
            interrupted: false,
        };

        let mut walk = Vec::with_capacity(self.grid.len() + 1);
        walk.push(self.grid.start());
        enumeration.descend(&mut walk, 0, INITIAL_CAPACITY);

        ExhaustiveOutcome {
            finished: !enumeration.interrupted,
            walk: enumeration.best,
        }
    }
}

impl Enumeration<'_, '_> {
    fn descend(&mut self, walk: &mut Vec<u16>, visited: u64, capacity: u16) {
        let grid = self.grid;

        if visited & (1u64 << grid.start()) != 0 {
            let points = grid.score(walk);
            if points > self.best_points {
                self.best_points = points;
                self.best.clone_from(walk);
            }
            return;
        }

        if self.stop.is_stopped() {
            self.interrupted = true;
            return;
        }

        let Some(&last) = walk.last() else {
            return;
        };

        for &next in grid.neighbors(last) {
            let bit = 1u64 << next;
            if visited & bit != 0 {
                continue;
            }

            let point = grid.point(next);
            if u16::from(point) > capacity {
                continue;
            }

            walk.push(next);
            self.descend(walk, visited | bit, raise_capacity(capacity, point));
            walk.pop();

            if self.interrupted {
                return;
            }
        }
    }
}
