//! Spatial data structures for the hexagonal grid
//!
//! This module contains:
//! - Axial tile coordinates and input records
//! - Reachability and structural pruning
//! - The pruned, indexed grid the searches run on

/// Pruned grid with adjacency and start distances
pub mod grid;
/// Point-reachability and structural tile filters
pub mod pruning;
/// Axial tile coordinates and neighbourhood
pub mod tiles;

pub use grid::Grid;
