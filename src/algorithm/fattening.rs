//! Greedy walk densification
//!
//! Between each pair of consecutive walk tiles, splices in an unvisited
//! common neighbor the running capacity allows. Order and closure of the
//! walk are preserved, so a closed walk stays closed.

use crate::algorithm::bitset::TileBitset;
use crate::algorithm::cancel::StopToken;
use crate::algorithm::walk::raise_capacity;
use crate::io::configuration::INITIAL_CAPACITY;
use crate::spatial::grid::Grid;

/// Densifies walks by inserting common neighbors of consecutive tiles
pub struct Fattening<'g> {
    grid: &'g Grid,
}

impl<'g> Fattening<'g> {
    /// Create a fattener over the given grid
    pub const fn new(grid: &'g Grid) -> Self {
        Self { grid }
    }

    /// Fatten the minimal loop start -> first point-1 neighbor -> start
    ///
    /// When the start has no point-1 neighbor the seed is `[start, start]`.
    pub fn run_from_start(&self, stop: &StopToken) -> Vec<u16> {
        let start = self.grid.start();
        let mut seed = Vec::with_capacity(3);
        seed.push(start);
        if let Some(&first) = self
            .grid
            .neighbors(start)
            .iter()
            .find(|&&neighbor| self.grid.point(neighbor) == 1)
        {
            seed.push(first);
        }
        seed.push(start);

        self.run(&seed, stop)
    }

    /// Insert tiles into `walk` until a pass makes no insertion
    ///
    /// After an insertion the same joint is examined again, since the new
    /// tile may open further insertions there. Each later pass starts at the
    /// first joint the previous pass changed. `stop` is checked once per
    /// pass.
    pub fn run(&self, walk: &[u16], stop: &StopToken) -> Vec<u16> {
        let mut result = Vec::with_capacity(self.grid.len() + 1);
        result.extend_from_slice(walk);
        let mut visited = TileBitset::from_indices(self.grid.len(), walk);

        let mut cursor = 0usize;
        while !stop.is_stopped() {
            match self.pass(&mut result, &mut visited, cursor) {
                Some(first_changed) => cursor = first_changed,
                None => break,
            }
        }

        result
    }

    /// One sweep over the joints from `cursor`; returns the first changed joint
    fn pass(&self, walk: &mut Vec<u16>, visited: &mut TileBitset, cursor: usize) -> Option<usize> {
        let mut first_changed = None;
        let mut capacity = INITIAL_CAPACITY;
        let mut joint = 0usize;

        while joint + 1 < walk.len() {
            capacity = raise_capacity(capacity, self.grid.point(walk[joint]));

            if joint >= cursor {
                if let Some(tile) =
                    self.common_candidate(walk[joint], walk[joint + 1], visited, capacity)
                {
                    walk.insert(joint + 1, tile);
                    visited.insert(tile);
                    first_changed.get_or_insert(joint);
                    continue;
                }
            }

            joint += 1;
        }

        first_changed
    }

    /// First unvisited common neighbor of `a` and `b` within capacity
    fn common_candidate(&self, a: u16, b: u16, visited: &TileBitset, capacity: u16) -> Option<u16> {
        let mut left = self.grid.neighbors(a).iter().peekable();
        let mut right = self.grid.neighbors(b).iter().peekable();

        while let (Some(&&l), Some(&&r)) = (left.peek(), right.peek()) {
            match l.cmp(&r) {
                std::cmp::Ordering::Less => {
                    left.next();
                }
                std::cmp::Ordering::Greater => {
                    right.next();
                }
                std::cmp::Ordering::Equal => {
                    if !visited.contains(l) && u16::from(self.grid.point(l)) <= capacity {
                        return Some(l);
                    }
                    left.next();
                    right.next();
                }
            }
        }

        None
    }
}
