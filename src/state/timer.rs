//! Revert Timer - One-shot, cancellable deadline
//!
//! Owned by whoever schedules it and advanced by the host's tick, so it can
//! never outlive its owner or fire after being cancelled. Scheduling while a
//! deadline is pending replaces it.
//!
//! # Example
//!
//! ```ignore
//! use std::time::{Duration, Instant};
//! use crystal_folio::state::timer::RevertTimer;
//!
//! let mut timer = RevertTimer::new(Duration::from_secs(3));
//! let start = Instant::now();
//! timer.schedule(start);
//!
//! assert!(!timer.fire_if_due(start + Duration::from_secs(1)));
//! assert!(timer.fire_if_due(start + Duration::from_secs(3)));
//! ```

use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevertTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl RevertTimer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, deadline: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Arm the timer `delay` from `now`, replacing any pending deadline.
    /// Returns true if a pending deadline was replaced.
    pub fn schedule(&mut self, now: Instant) -> bool {
        self.deadline.replace(now + self.delay).is_some()
    }

    /// Disarm. Returns true if a deadline was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Fire once the deadline has passed. Firing disarms the timer.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(3000);

    #[test]
    fn test_fires_once_at_deadline() {
        let start = Instant::now();
        let mut timer = RevertTimer::new(DELAY);
        assert!(!timer.schedule(start));

        assert!(!timer.fire_if_due(start + Duration::from_millis(2999)));
        assert!(timer.fire_if_due(start + DELAY));
        assert!(!timer.fire_if_due(start + DELAY * 2));
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_reschedule_replaces_deadline() {
        let start = Instant::now();
        let mut timer = RevertTimer::new(DELAY);
        timer.schedule(start);

        let later = start + Duration::from_millis(2000);
        assert!(timer.schedule(later));

        // Original deadline passes without firing
        assert!(!timer.fire_if_due(start + DELAY));
        assert!(timer.fire_if_due(later + DELAY));
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let start = Instant::now();
        let mut timer = RevertTimer::new(DELAY);
        timer.schedule(start);
        assert!(timer.cancel());
        assert!(!timer.cancel());
        assert!(!timer.fire_if_due(start + DELAY * 10));
    }
}
