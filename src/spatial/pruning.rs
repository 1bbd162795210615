//! Removal of tiles that no walk from the start can ever use
//!
//! Two filters run before any search: a point filter dropping tiles whose
//! unlock chain has a missing tier, and a structural filter dropping tiles
//! that cannot be entered and left again from the start's component.

use std::collections::{BTreeSet, VecDeque};

use log::debug;

use crate::algorithm::bitset::TileBitset;
use crate::spatial::grid::Neighbors;
use crate::spatial::tiles::TileRecord;

/// Highest point value that can ever be unlocked
///
/// Capacity grows one tier at a time, so the first tier `>= 2` missing from
/// the input caps everything above it. With no gap the cap is the number of
/// distinct point values.
pub fn max_reachable_point(points: impl IntoIterator<Item = u8>) -> u16 {
    let distinct: BTreeSet<u8> = points.into_iter().collect();
    let distinct_count = distinct.len() as u16;

    (2..distinct_count)
        .find(|&tier| !distinct.contains(&(tier as u8)))
        .unwrap_or(distinct_count)
}

/// Drop every record whose point value exceeds the reachable maximum
pub fn retain_point_reachable(records: Vec<TileRecord>) -> Vec<TileRecord> {
    let max_point = max_reachable_point(records.iter().map(|record| record.point));
    let before = records.len();

    let retained: Vec<TileRecord> = records
        .into_iter()
        .filter(|record| u16::from(record.point) <= max_point)
        .collect();

    debug!(
        "point filter kept {} of {before} tiles (max reachable point {max_point})",
        retained.len()
    );
    retained
}

/// Tiles structurally connected to the start tile
///
/// Phase one floods outward from the start, deferring any tile with fewer
/// than two connected neighbors at the moment it is examined. Phase two
/// explores each deferred tile's region and merges it when the region
/// borders the connected set at least twice. Deferred tiles found inside a
/// rescued region are absorbed without their own check.
pub fn connected_tiles(adjacency: &[Neighbors], start: u16) -> TileBitset {
    let mut connected = TileBitset::new(adjacency.len());
    connected.insert(start);

    let deferred = flood_two_way(adjacency, start, &mut connected);
    rescue_deferred(adjacency, &deferred, &mut connected);

    connected
}

fn flood_two_way(adjacency: &[Neighbors], start: u16, connected: &mut TileBitset) -> Vec<u16> {
    let mut deferred = Vec::new();
    let mut queue = VecDeque::new();

    for &neighbor in &adjacency[usize::from(start)] {
        connected.insert(neighbor);
        queue.push_back(neighbor);
    }

    while let Some(index) = queue.pop_front() {
        for &next in &adjacency[usize::from(index)] {
            if connected.contains(next) {
                continue;
            }

            let connected_neighbors = adjacency[usize::from(next)]
                .iter()
                .filter(|&&around| connected.contains(around))
                .take(2)
                .count();

            if connected_neighbors < 2 {
                deferred.push(next);
                continue;
            }

            connected.insert(next);
            queue.push_back(next);
        }
    }

    deferred
}

fn rescue_deferred(adjacency: &[Neighbors], deferred: &[u16], connected: &mut TileBitset) {
    for &entrance in deferred {
        if connected.contains(entrance) {
            continue;
        }

        let mut region = TileBitset::new(adjacency.len());
        region.insert(entrance);

        let mut stack = vec![entrance];
        let mut borders = 0usize;

        while let Some(index) = stack.pop() {
            for &next in &adjacency[usize::from(index)] {
                if region.contains(next) {
                    continue;
                }

                if connected.contains(next) {
                    borders += 1;
                    continue;
                }

                region.insert(next);
                stack.push(next);
            }
        }

        if borders >= 2 {
            debug!(
                "rescued {} tiles behind one-way entrance {entrance}",
                region.count()
            );
            connected.union_with(&region);
        }
    }
}
