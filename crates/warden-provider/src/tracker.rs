//! In-flight action bookkeeping.

use parking_lot::Mutex;

#[derive(Debug, Default)]
struct Slots {
    last_start: Option<u64>,
    last_stop: Option<u64>,
}

/// Remembers the single most recent start action and single most recent
/// stop action issued through a provider.
///
/// Single-slot by design: each new action of a kind overwrites the last,
/// so earlier in-flight actions are forgotten once superseded. Nothing is
/// persisted across process restarts.
#[derive(Debug, Default)]
pub struct ActionTracker {
    slots: Mutex<Slots>,
}

impl ActionTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the vendor's reference for the latest start action.
    pub fn record_start(&self, action_id: u64) {
        self.slots.lock().last_start = Some(action_id);
    }

    /// Record the vendor's reference for the latest stop action.
    pub fn record_stop(&self, action_id: u64) {
        self.slots.lock().last_stop = Some(action_id);
    }

    /// The most recent start action reference, if any was issued.
    #[must_use]
    pub fn last_start(&self) -> Option<u64> {
        self.slots.lock().last_start
    }

    /// The most recent stop action reference, if any was issued.
    #[must_use]
    pub fn last_stop(&self) -> Option<u64> {
        self.slots.lock().last_stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let tracker = ActionTracker::new();
        assert_eq!(tracker.last_start(), None);
        assert_eq!(tracker.last_stop(), None);
    }

    #[test]
    fn latest_action_overwrites_earlier() {
        let tracker = ActionTracker::new();
        tracker.record_start(7);
        tracker.record_start(11);
        assert_eq!(tracker.last_start(), Some(11));
    }

    #[test]
    fn start_and_stop_slots_are_independent() {
        let tracker = ActionTracker::new();
        tracker.record_start(1);
        tracker.record_stop(2);
        assert_eq!(tracker.last_start(), Some(1));
        assert_eq!(tracker.last_stop(), Some(2));
    }
}
