//! Walk bookkeeping shared by the search components
//!
//! A walk is a sequence of tile indices starting at the start tile. It is
//! closed once it returns to the start; only closed walks are answers.

use crate::algorithm::bitset::TileBitset;
use crate::io::configuration::INITIAL_CAPACITY;
use crate::spatial::grid::Grid;

/// Capacity after entering a tile with the given point value
pub fn raise_capacity(capacity: u16, point: u8) -> u16 {
    capacity.max(u16::from(point) + 1)
}

/// Test whether a walk has returned to the start tile
pub fn is_closed(grid: &Grid, walk: &[u16]) -> bool {
    walk.len() >= 2 && walk.last() == Some(&grid.start())
}

/// Test whether a walk obeys every movement rule
///
/// The walk must begin at the start tile, step only between adjacent tiles,
/// never enter a tile above the running capacity, and repeat no index
/// except a final return to the start.
pub fn is_valid(grid: &Grid, walk: &[u16]) -> bool {
    let Some((&first, rest)) = walk.split_first() else {
        return false;
    };
    if first != grid.start() {
        return false;
    }

    let mut visited = TileBitset::new(grid.len());
    visited.insert(first);
    let mut capacity = INITIAL_CAPACITY;
    let mut previous = first;

    for (position, &index) in rest.iter().enumerate() {
        let closing = index == grid.start() && position + 1 == rest.len();
        if visited.contains(index) && !closing {
            return false;
        }
        if grid.neighbors(previous).binary_search(&index).is_err() {
            return false;
        }
        if u16::from(grid.point(index)) > capacity {
            return false;
        }

        visited.insert(index);
        capacity = raise_capacity(capacity, grid.point(index));
        previous = index;
    }

    true
}

/// Tiles worth perturbing around an existing walk
///
/// Every walk tile with at least one unvisited neighbor contributes itself
/// and all of its neighbors. The result is sorted and deduplicated.
pub fn frontier(grid: &Grid, walk: &[u16]) -> Vec<u16> {
    let visited = TileBitset::from_indices(grid.len(), walk);
    let mut result = Vec::with_capacity(grid.len());

    for &index in walk {
        let neighbors = grid.neighbors(index);
        if neighbors.iter().any(|&neighbor| !visited.contains(neighbor)) {
            result.extend_from_slice(neighbors);
            result.push(index);
        }
    }

    result.sort_unstable();
    result.dedup();
    result
}

/// Pick the candidate with the most points
///
/// Ties go to the earliest candidate.
pub fn best_by_points(grid: &Grid, candidates: impl IntoIterator<Item = Vec<u16>>) -> Vec<u16> {
    let mut best: Option<(u32, Vec<u16>)> = None;

    for candidate in candidates {
        let points = grid.score(&candidate);
        if best.as_ref().is_none_or(|(best_points, _)| points > *best_points) {
            best = Some((points, candidate));
        }
    }

    best.map(|(_, walk)| walk).unwrap_or_default()
}
