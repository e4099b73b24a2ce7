//! Named-operation cooldown guard.
//!
//! Guarded operations, identified by name, may not be invoked again
//! until a fixed window has elapsed since their last accepted
//! invocation. Calls inside the window are rejected, not queued. The
//! guard is global to the process and in-memory only; there is no
//! cross-process coordination.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Injectable cooldown tracker keyed by operation name.
#[derive(Debug)]
pub struct CooldownGuard {
    window: Duration,
    deadlines: Mutex<HashMap<String, Instant>>,
}

impl CooldownGuard {
    /// Create a guard with the given cooldown window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadlines: Mutex::new(HashMap::new()),
        }
    }

    /// Try to run the named operation now.
    ///
    /// Returns `false` while the previous invocation's window is still
    /// open; otherwise stamps the next deadline and returns `true`.
    pub fn try_acquire(&self, operation: &str) -> bool {
        let mut deadlines = self.deadlines.lock();
        let now = Instant::now();

        if let Some(deadline) = deadlines.get(operation) {
            if now < *deadline {
                return false;
            }
        }

        deadlines.insert(operation.to_string(), now + self.window);
        true
    }
}
