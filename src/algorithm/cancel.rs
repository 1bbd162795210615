use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared cancellation flag for a long-running search
///
/// Clones observe the same flag. Components poll `is_stopped` at their
/// expansion boundaries, never inside the innermost loop, and return their
/// best-effort result once it is set.
#[derive(Clone, Debug, Default)]
pub struct StopToken {
    stopped: Arc<AtomicBool>,
}

impl StopToken {
    /// Create a token that has not been stopped
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; never blocks
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    /// Test whether cancellation was requested
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}
