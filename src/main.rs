//! CLI entry point for the hexagonal walk solver

use std::time::Instant;

use clap::Parser;
use hexwalk::io::cli::{Cli, Runner};

fn main() -> hexwalk::Result<()> {
    let started = Instant::now();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    Runner::new(cli).process(started)
}
