//! Time-boxed solver for closed walks on a hexagonal tile grid
//!
//! Tiles carry point values. A walk starts and ends on the single point-0
//! tile, steps between adjacent tiles, and may only enter a tile whose point
//! value does not exceed the walk's current capacity. Several search
//! strategies run concurrently inside fixed deadlines and the
//! highest-scoring walk wins.

#![forbid(unsafe_code)]

/// Search strategies, walk utilities and the staged solver
pub mod algorithm;
/// Input parsing, output, rendering, configuration and error handling
pub mod io;
/// Hexagonal tiles, grid construction and pruning
pub mod spatial;

pub use io::error::{AlgorithmError, Result};
