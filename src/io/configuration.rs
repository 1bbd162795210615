//! Tuned solver constants and the default stage schedule
//!
//! The search weights and caps are empirical; they are kept as named
//! constants rather than derived values.

use std::time::Duration;

/// Capacity of a fresh walk: only point-1 tiles may be entered first
pub const INITIAL_CAPACITY: u16 = 1;

// Exhaustive search
/// Largest grid the bitmask search accepts (one bit per tile in a `u64`)
pub const EXHAUSTIVE_TILE_LIMIT: usize = 64;

// Beam search
/// States popped from the queue per round
pub const BEAM_WIDTH: usize = 300;
/// Expansions allowed in a returnability check before giving up
pub const RETURNABILITY_EXPANSION_LIMIT: usize = 200;
/// Initial capacity of the (bitset, candidate) dedup set
pub const SEARCHED_HASHES_CAPACITY: usize = 400_000;

// Local search
/// Non-improving iterations tolerated before local search stops
pub const LOCAL_SEARCH_STAGNATION_LIMIT: usize = 30_000;
/// Upper bound on trial mutations per iteration
pub const LOCAL_SEARCH_MAX_TRIALS: usize = 120;
/// Trial mutations per changeable tile, before the upper bound applies
pub const TRIALS_PER_CHANGEABLE: usize = 3;
/// Successor entries rewritten by one trial mutation
pub const MUTATIONS_PER_TRIAL: usize = 3;
/// Local search score weight on points collected by the closed cycle
pub const CYCLE_POINT_WEIGHT: u32 = 1;
/// Local search score weight on the closed cycle's length
pub const CYCLE_LENGTH_WEIGHT: u32 = 1;
/// Local search score weight on the traced walk's length, closed or not
pub const WALK_LENGTH_WEIGHT: u32 = 3;

// Orchestration
/// Exhaustive search deadline, measured from process start
pub const EXHAUSTIVE_DEADLINE: Duration = Duration::from_millis(200);
/// Deadline of the fattening run seeded from the start tile
pub const SEED_FATTENING_DEADLINE: Duration = Duration::from_millis(500);
/// Beam search deadline
pub const BEAM_DEADLINE: Duration = Duration::from_millis(3000);
/// Deadline of the whole-grid refinement stage
pub const REFINEMENT_DEADLINE: Duration = Duration::from_millis(4200);
/// Deadline of the frontier refinement stage
pub const FRONTIER_DEADLINE: Duration = Duration::from_millis(4600);
/// Seeded fattening walks longer than this skip beam search
pub const FATTENING_SHORTCUT_LENGTH: usize = 500;
/// Local search workers in the whole-grid refinement stage
pub const REFINEMENT_WORKERS: usize = 3;
/// Local search workers in the frontier refinement stage
pub const FRONTIER_WORKERS: usize = 4;
/// How often the orchestrator checks whether a task finished early
pub const TASK_POLL_INTERVAL: Duration = Duration::from_millis(1);

// Rendering
/// Circumradius of a rendered hex in pixels
pub const RENDER_HEX_RADIUS: f64 = 12.0;
/// Blank border around the rendered grid in pixels
pub const RENDER_MARGIN: f64 = 4.0;
