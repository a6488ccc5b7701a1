//! Staged open/close transition shared by Modal and Dropdown.
//!
//! Opening shows the element immediately and arms the `active` class a
//! moment later so the enter animation can run; closing removes `active`
//! and hides the element once the exit animation has finished.

use super::component::Bindings;
use crate::timers::{TimerId, Timers};
use std::time::Duration;

/// Delay before the `active` class is applied
pub const ARM_DELAY: Duration = Duration::from_millis(10);
/// Delay before a close is finalized
pub const CLOSE_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Debug, Default)]
pub struct Transition {
    state: OverlayState,
    timer: Option<TimerId>,
}

impl Transition {
    pub fn state(&self) -> OverlayState {
        self.state
    }

    /// Opening or open
    pub fn is_open(&self) -> bool {
        matches!(self.state, OverlayState::Opening | OverlayState::Open)
    }

    /// Begin opening; `false` when already opening or open.
    /// Interrupts a running close.
    pub fn open(&mut self, bindings: &mut Bindings, timers: &mut Timers) -> bool {
        if self.is_open() {
            return false;
        }
        bindings.cancel(timers, &mut self.timer);
        self.state = OverlayState::Opening;
        self.timer = Some(bindings.schedule(timers, ARM_DELAY));
        true
    }

    /// Begin closing; `false` when already closing or closed
    pub fn close(&mut self, bindings: &mut Bindings, timers: &mut Timers) -> bool {
        if !self.is_open() {
            return false;
        }
        bindings.cancel(timers, &mut self.timer);
        self.state = OverlayState::Closing;
        self.timer = Some(bindings.schedule(timers, CLOSE_DELAY));
        true
    }

    /// Complete the pending stage. Returns the state reached, or `None`
    /// when `id` is not this transition's timer.
    pub fn on_timer(&mut self, id: TimerId) -> Option<OverlayState> {
        if self.timer != Some(id) {
            return None;
        }
        self.timer = None;
        self.state = match self.state {
            OverlayState::Opening => OverlayState::Open,
            OverlayState::Closing => OverlayState::Closed,
            other => other,
        };
        Some(self.state)
    }

    /// Drop back to closed without running any stage
    pub fn reset(&mut self) {
        self.state = OverlayState::Closed;
        self.timer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle() {
        let mut timers = Timers::new();
        let mut bindings = Bindings::new();
        let mut transition = Transition::default();

        assert!(transition.open(&mut bindings, &mut timers));
        assert!(!transition.open(&mut bindings, &mut timers));
        assert_eq!(transition.state(), OverlayState::Opening);

        let armed = timers.pop_due(ARM_DELAY).unwrap();
        assert_eq!(transition.on_timer(armed), Some(OverlayState::Open));

        assert!(transition.close(&mut bindings, &mut timers));
        assert!(!transition.close(&mut bindings, &mut timers));
        let done = timers.pop_due(ARM_DELAY + CLOSE_DELAY).unwrap();
        assert_eq!(transition.on_timer(done), Some(OverlayState::Closed));
    }

    #[test]
    fn test_reopen_interrupts_close() {
        let mut timers = Timers::new();
        let mut bindings = Bindings::new();
        let mut transition = Transition::default();
        transition.open(&mut bindings, &mut timers);
        transition.close(&mut bindings, &mut timers);
        assert!(transition.open(&mut bindings, &mut timers));
        assert_eq!(timers.pending_count(), 1);
        assert_eq!(transition.state(), OverlayState::Opening);
    }
}
