//! Virtual-clock timer queue.
//!
//! Components schedule one-shot timeouts here instead of sleeping. The host
//! advances the clock explicitly, which keeps transitions, auto-dismiss
//! windows and debounces deterministic in tests and lets the TUI drive them
//! from its frame loop.

use slotmap::{new_key_type, SlotMap};
use std::time::Duration;

new_key_type! {
    /// Handle of a pending timeout
    pub struct TimerId;
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    deadline: Duration,
    seq: u64,
}

/// One-shot timers on a manually advanced clock
#[derive(Debug, Default)]
pub struct Timers {
    now: Duration,
    seq: u64,
    pending: SlotMap<TimerId, Pending>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule a timeout `delay` from now
    pub fn set_timeout(&mut self, delay: Duration) -> TimerId {
        self.seq += 1;
        self.pending.insert(Pending {
            deadline: self.now + delay,
            seq: self.seq,
        })
    }

    /// Cancel a timeout; returns whether it was still pending
    pub fn clear(&mut self, id: TimerId) -> bool {
        self.pending.remove(id).is_some()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.contains_key(id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Remove and return the earliest timer due at or before `until`,
    /// moving the clock to its deadline. Ties fire in scheduling order.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerId> {
        let (id, due) = self
            .pending
            .iter()
            .filter(|(_, p)| p.deadline <= until)
            .min_by_key(|(_, p)| (p.deadline, p.seq))
            .map(|(id, p)| (id, *p))?;
        self.pending.remove(id);
        self.now = self.now.max(due.deadline);
        Some(id)
    }

    /// Move the clock forward to `until` once all due timers have fired
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_deadline_order() {
        let mut timers = Timers::new();
        let late = timers.set_timeout(Duration::from_millis(300));
        let early = timers.set_timeout(Duration::from_millis(10));
        let until = Duration::from_millis(500);

        assert_eq!(timers.pop_due(until), Some(early));
        assert_eq!(timers.now(), Duration::from_millis(10));
        assert_eq!(timers.pop_due(until), Some(late));
        assert_eq!(timers.pop_due(until), None);
        timers.settle(until);
        assert_eq!(timers.now(), until);
    }

    #[test]
    fn test_ties_fire_in_scheduling_order() {
        let mut timers = Timers::new();
        let first = timers.set_timeout(Duration::from_millis(100));
        let second = timers.set_timeout(Duration::from_millis(100));
        let until = Duration::from_millis(100);
        assert_eq!(timers.pop_due(until), Some(first));
        assert_eq!(timers.pop_due(until), Some(second));
    }

    #[test]
    fn test_not_due_yet() {
        let mut timers = Timers::new();
        let id = timers.set_timeout(Duration::from_millis(300));
        assert_eq!(timers.pop_due(Duration::from_millis(299)), None);
        assert!(timers.is_pending(id));
    }

    #[test]
    fn test_clear_cancels() {
        let mut timers = Timers::new();
        let id = timers.set_timeout(Duration::from_millis(5));
        assert!(timers.clear(id));
        assert!(!timers.clear(id));
        assert_eq!(timers.pop_due(Duration::from_secs(1)), None);
        assert_eq!(timers.pending_count(), 0);
    }
}
