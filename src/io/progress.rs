//! Stage progress display on stderr

use crate::algorithm::executor::{Finish, Solution, StageReport};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

/// Number of stages in the solve pipeline
pub const STAGE_COUNT: u64 = 3;

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] stages [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar advancing once per finished stage
pub struct StageProgress {
    bar: ProgressBar,
}

impl StageProgress {
    /// Create a visible progress bar
    pub fn new() -> Self {
        let bar = ProgressBar::new(STAGE_COUNT);
        bar.set_style(STAGE_STYLE.clone());
        Self { bar }
    }

    /// Create a progress bar that never draws
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Advance past a finished stage, showing its best walk
    pub fn record(&self, report: &StageReport) {
        self.bar.inc(1);
        self.bar.set_message(format!(
            "{:?}: {} points, {} tiles",
            report.stage, report.points, report.length
        ));
    }

    /// Stages recorded so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Close the bar with the final answer
    ///
    /// A solve that ended early shrinks the bar to the stages that ran.
    pub fn finish(&self, solution: &Solution) {
        if solution.finish != Finish::AllStages {
            self.bar.set_length(self.position());
        }

        let reason = match solution.finish {
            Finish::ExhaustiveOptimum => "optimal".to_string(),
            Finish::PerfectCover(stage) => format!("every tile covered in {stage:?}"),
            Finish::AllStages => "all stages ran".to_string(),
        };
        self.bar
            .finish_with_message(format!("{} points ({reason})", solution.points));
    }
}

impl Default for StageProgress {
    fn default() -> Self {
        Self::new()
    }
}
