/// Command-line parsing and the end-to-end runner
pub mod cli;
/// Tunable constants for the searches and the stage schedule
pub mod configuration;
/// Error types shared across the crate
pub mod error;
/// PNG rendering of a walk over the grid
pub mod image;
/// Parsing of tile records
pub mod input;
/// Writing the chosen walk
pub mod output;
/// Stage progress reporting
pub mod progress;
