//! Writing the chosen walk as `x,y` lines

use std::io::Write;

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::grid::Grid;

/// Write one `x,y` line per walk tile, in walk order
///
/// # Errors
///
/// Returns `Output` if writing or flushing fails
pub fn write_walk(grid: &Grid, walk: &[u16], mut out: impl Write) -> Result<()> {
    for &index in walk {
        writeln!(out, "{}", grid.tile(index)).map_err(|source| AlgorithmError::Output { source })?;
    }
    out.flush()
        .map_err(|source| AlgorithmError::Output { source })
}
