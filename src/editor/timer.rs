//! Deferred reset timer
//!
//! A one-shot deadline measured against the egui frame clock
//! (`ctx.input(|i| i.time)`, seconds as `f64`). The owner polls
//! [`DeferredReset::fire_if_due`] each frame and asks egui to repaint at the
//! remaining time, so the reset happens without user input.
//!
//! The deadline belongs to its owner: dropping the timer cancels it, and a
//! cancelled timer never fires.

use log::debug;
use std::time::Duration;

/// How long the "Copied" confirmation stays visible.
pub const COPIED_FEEDBACK: Duration = Duration::from_millis(2000);

/// A cancellable one-shot deadline.
#[derive(Debug, Clone)]
pub struct DeferredReset {
    delay: Duration,
    deadline: Option<f64>,
}

impl DeferredReset {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Arm (or re-arm) the timer. A pending deadline is replaced.
    pub fn arm(&mut self, now: f64) {
        self.deadline = Some(now + self.delay.as_secs_f64());
    }

    /// Disarm the timer and report whether the deadline had been reached.
    ///
    /// Returns `true` exactly once per arming.
    pub fn fire_if_due(&mut self, now: f64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        if self.deadline.take().is_some() {
            debug!("Deferred reset cancelled");
        }
    }

    /// Time left until the deadline, or `None` when disarmed.
    pub fn remaining(&self, now: f64) -> Option<Duration> {
        self.deadline
            .map(|deadline| Duration::from_secs_f64((deadline - now).max(0.0)))
    }
}

impl Drop for DeferredReset {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_timer_is_disarmed() {
        let mut timer = DeferredReset::new(COPIED_FEEDBACK);
        assert_eq!(timer.remaining(0.0), None);
        assert!(!timer.fire_if_due(100.0));
        assert_eq!(timer.remaining(0.0), None);
    }

    #[test]
    fn test_fires_once_after_delay() {
        let mut timer = DeferredReset::new(COPIED_FEEDBACK);
        timer.arm(10.0);
        assert!(!timer.fire_if_due(11.999));
        assert!(timer.fire_if_due(12.0));
        assert!(!timer.fire_if_due(13.0));
        assert_eq!(timer.remaining(0.0), None);
    }

    #[test]
    fn test_rearm_moves_deadline() {
        let mut timer = DeferredReset::new(COPIED_FEEDBACK);
        timer.arm(0.0);
        timer.arm(1.5);
        assert!(!timer.fire_if_due(2.0));
        assert!(timer.fire_if_due(3.5));
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut timer = DeferredReset::new(COPIED_FEEDBACK);
        timer.arm(0.0);
        timer.cancel();
        assert!(!timer.fire_if_due(5.0));
    }

    #[test]
    fn test_remaining_saturates_at_zero() {
        let mut timer = DeferredReset::new(Duration::from_millis(500));
        timer.arm(1.0);
        assert_eq!(timer.remaining(1.25), Some(Duration::from_millis(250)));
        assert_eq!(timer.remaining(4.0), Some(Duration::ZERO));
    }
}
