//! Command-line interface: read records, solve, print the walk

use crate::algorithm::executor::{Schedule, Solution, StagedSolver};
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::io::image::export_walk_as_png;
use crate::io::input::read_records;
use crate::io::output::write_walk;
use crate::io::progress::StageProgress;
use crate::spatial::grid::Grid;
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "hexwalk")]
#[command(
    author,
    version,
    about = "Find a high-scoring closed walk on a hexagonal tile grid"
)]
/// Command-line arguments for the walk solver
pub struct Cli {
    /// File of `x,y,point` records; standard input when omitted
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Random seed for reproducible local search
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Write a PNG picture of the grid and the chosen walk
    #[arg(short, long, value_name = "PNG")]
    pub render: Option<PathBuf>,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Runs one solve from input records to printed walk
pub struct Runner {
    cli: Cli,
    schedule: Schedule,
}

impl Runner {
    /// Create a runner with the default stage schedule
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            schedule: Schedule::default(),
        }
    }

    /// Replace the stage schedule
    #[must_use]
    pub const fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Solve the configured input and write the walk to standard output
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read, the grid is degenerate,
    /// the render path is not a PNG, or the answer cannot be written
    pub fn process(&self, started: Instant) -> Result<()> {
        let stdout = std::io::stdout();
        self.process_into(started, BufWriter::new(stdout.lock()))
    }

    /// Solve the configured input and write the walk to `out`
    ///
    /// # Errors
    ///
    /// Same conditions as [`Runner::process`]
    pub fn process_into(&self, started: Instant, out: impl Write) -> Result<()> {
        if let Some(render) = &self.cli.render {
            Self::validate_render_path(render)?;
        }

        let grid = self.load_grid()?;
        let solution = self.solve(&grid, started);

        write_walk(&grid, &solution.walk, out)?;

        if let Some(render) = &self.cli.render {
            export_walk_as_png(&grid, &solution.walk, render)?;
            info!("rendered walk to {}", render.display());
        }

        Ok(())
    }

    fn load_grid(&self) -> Result<Grid> {
        let records = match &self.cli.input {
            Some(path) => {
                let file = File::open(path).map_err(|source| AlgorithmError::FileSystem {
                    path: path.clone(),
                    operation: "open input",
                    source,
                })?;
                read_records(file, path)?
            }
            None => read_records(std::io::stdin().lock(), Path::new("<stdin>"))?,
        };

        info!("read {} tile records", records.len());
        Grid::from_records(records)
    }

    fn solve(&self, grid: &Grid, started: Instant) -> Solution {
        let progress = if self.cli.should_show_progress() {
            StageProgress::new()
        } else {
            StageProgress::hidden()
        };

        let solution = StagedSolver::new(grid, self.schedule)
            .with_seed(self.cli.seed)
            .solve_with(started, |report| progress.record(report));

        progress.finish(&solution);
        solution
    }

    fn validate_render_path(path: &Path) -> Result<()> {
        let is_png = path
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| extension.eq_ignore_ascii_case("png"));

        if is_png {
            Ok(())
        } else {
            Err(invalid_parameter(
                "render",
                &path.display(),
                &"render output must be a .png file",
            ))
        }
    }
}
