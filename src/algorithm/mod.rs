/// Beam search over partial walks
pub mod beam;
/// Compact tile-index set used for visited tracking and deduplication
pub mod bitset;
/// Cooperative cancellation shared between solver threads
pub mod cancel;
/// Bitmask depth-first search for small grids
pub mod exhaustive;
/// Staged, time-boxed orchestration of the searches
pub mod executor;
/// Detour insertion that grows a closed walk
pub mod fattening;
/// Randomised successor-array improvement of closed walks
pub mod local_search;
/// Walk validity, scoring helpers and candidate selection
pub mod walk;
