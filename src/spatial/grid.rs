//! Immutable tile graph shared by every search component
//!
//! A `Grid` is built once from input records, pruned down to the tiles a
//! walk from the start can use, and never mutated afterwards. Indices into
//! the grid are `u16` and stay stable for the grid's lifetime; all search
//! components borrow the grid read-only, so it can be shared across threads.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use log::{info, warn};
use smallvec::SmallVec;

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::pruning::{connected_tiles, retain_point_reachable};
use crate::spatial::tiles::{Tile, TileRecord};

/// Ascending neighbor indices of one tile, at most six
pub type Neighbors = SmallVec<[u16; 6]>;

/// Pruned hexagonal tile graph with start tile and distance heuristic
#[derive(Debug, Clone)]
pub struct Grid {
    tiles: Vec<Tile>,
    points: Vec<u8>,
    adjacency: Vec<Neighbors>,
    start: u16,
    distances: Vec<u16>,
    index: HashMap<Tile, u16>,
}

impl Grid {
    /// Build and prune a grid from raw input records
    ///
    /// Duplicate coordinates keep their first record. The point filter and
    /// the structural filter each compact the tile array, after which
    /// adjacency and the start index are recomputed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if no record has point value 0 or if more
    /// than one does.
    pub fn from_records(records: Vec<TileRecord>) -> Result<Self> {
        let records = retain_point_reachable(dedupe(records));
        let unfiltered = Self::assemble(&records, find_start(&records)?);

        let connected = connected_tiles(&unfiltered.adjacency, unfiltered.start);
        let before = records.len();
        let records: Vec<TileRecord> = records
            .into_iter()
            .enumerate()
            .filter(|&(index, _)| connected.contains(index as u16))
            .map(|(_, record)| record)
            .collect();

        info!(
            "structural filter kept {} of {before} tiles",
            records.len()
        );

        Ok(Self::assemble(&records, find_start(&records)?))
    }

    fn assemble(records: &[TileRecord], start: u16) -> Self {
        let tiles: Vec<Tile> = records.iter().map(|record| record.tile).collect();
        let points = records.iter().map(|record| record.point).collect();
        let index = tiles
            .iter()
            .enumerate()
            .map(|(index, &tile)| (tile, index as u16))
            .collect();

        let start_tile = tiles[usize::from(start)];
        let distances = tiles.iter().map(|tile| tile.distance(start_tile)).collect();

        let mut grid = Self {
            tiles,
            points,
            adjacency: Vec::new(),
            start,
            distances,
            index,
        };
        grid.adjacency = grid.tiles.iter().map(|&tile| grid.around(tile)).collect();
        grid
    }

    /// Ascending indices of the tiles surrounding a lattice position
    fn around(&self, tile: Tile) -> Neighbors {
        let mut neighbors: Neighbors = tile
            .around()
            .filter_map(|around| self.index_of(around))
            .collect();
        neighbors.sort_unstable();
        neighbors
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Test whether the grid holds no tiles
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Index of the point-0 start tile
    pub const fn start(&self) -> u16 {
        self.start
    }

    /// All tiles in index order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Lattice position of a tile index
    pub fn tile(&self, index: u16) -> Tile {
        self.tiles[usize::from(index)]
    }

    /// Point value of a tile index
    pub fn point(&self, index: u16) -> u8 {
        self.points[usize::from(index)]
    }

    /// Ascending neighbor indices of a tile
    pub fn neighbors(&self, index: u16) -> &[u16] {
        &self.adjacency[usize::from(index)]
    }

    /// Hex distance from a tile to the start tile
    pub fn distance(&self, index: u16) -> u16 {
        self.distances[usize::from(index)]
    }

    /// Index of the tile at a lattice position, if it survived pruning
    pub fn index_of(&self, tile: Tile) -> Option<u16> {
        self.index.get(&tile).copied()
    }

    /// Sum of point values over exactly the given sequence
    pub fn score(&self, walk: &[u16]) -> u32 {
        walk.iter().map(|&index| u32::from(self.point(index))).sum()
    }
}

fn dedupe(records: Vec<TileRecord>) -> Vec<TileRecord> {
    let mut seen = HashMap::with_capacity(records.len());
    let mut unique = Vec::with_capacity(records.len());

    for record in records {
        match seen.entry(record.tile) {
            Entry::Occupied(_) => warn!("ignoring duplicate record for tile {}", record.tile),
            Entry::Vacant(entry) => {
                entry.insert(());
                unique.push(record);
            }
        }
    }

    unique
}

fn find_start(records: &[TileRecord]) -> Result<u16> {
    let mut starts = records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.point == 0)
        .map(|(index, _)| index as u16);

    let start = starts.next().ok_or_else(|| AlgorithmError::InvalidSourceData {
        reason: "no tile has point value 0".to_string(),
    })?;

    if starts.next().is_some() {
        return Err(AlgorithmError::InvalidSourceData {
            reason: "more than one tile has point value 0".to_string(),
        });
    }

    Ok(start)
}
