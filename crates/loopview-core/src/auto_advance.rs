//! Auto-advance countdown.
//!
//! A tick-driven state machine: something external feeds it one tick per
//! time-unit (the std runtime posts one per second), and every
//! `interval` ticks it reports an expiry and rearms. Keeping it free of
//! any time source makes the widget's timing testable without sleeping.

/// Repeating countdown that drives the carousel's automatic paging.
#[derive(Clone, Copy, Debug)]
pub struct AutoAdvance {
    interval: u32,
    remaining: Option<u32>,
}

impl AutoAdvance {
    /// Creates a stopped countdown firing every `interval` ticks.
    /// An interval of zero is treated as one.
    pub fn new(interval: u32) -> Self {
        Self {
            interval: interval.max(1),
            remaining: None,
        }
    }

    /// Arms the countdown. Starting while already running is a guarded
    /// no-op; the period in progress is not disturbed.
    pub fn start(&mut self) {
        if self.remaining.is_some() {
            log::debug!("auto-advance already running, start ignored");
            return;
        }
        self.remaining = Some(self.interval);
    }

    /// Disarms the countdown. Ticks arriving afterwards do nothing, so a
    /// late tick from an already-posted timer callback cannot fire.
    pub fn stop(&mut self) {
        self.remaining = None;
    }

    pub fn is_running(&self) -> bool {
        self.remaining.is_some()
    }

    /// Ticks left before the next expiry, if running.
    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    /// Consumes one tick. Returns `true` exactly when the countdown
    /// expires; it rearms itself for the next period in the same call.
    pub fn tick(&mut self) -> bool {
        let Some(remaining) = self.remaining else {
            return false;
        };
        if remaining <= 1 {
            self.remaining = Some(self.interval);
            true
        } else {
            self.remaining = Some(remaining - 1);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_every_interval() {
        let mut countdown = AutoAdvance::new(5);
        countdown.start();
        for round in 0..3 {
            for i in 0..4 {
                assert!(!countdown.tick(), "round {round} tick {i}");
            }
            assert!(countdown.tick(), "round {round} expiry");
        }
    }

    #[test]
    fn start_is_idempotent() {
        let mut countdown = AutoAdvance::new(3);
        countdown.start();
        countdown.tick();
        countdown.start(); // must not rewind the period in progress
        assert_eq!(countdown.remaining(), Some(2));
    }

    #[test]
    fn stopped_countdown_ignores_ticks() {
        let mut countdown = AutoAdvance::new(2);
        assert!(!countdown.tick());
        countdown.start();
        countdown.stop();
        assert!(!countdown.is_running());
        for _ in 0..10 {
            assert!(!countdown.tick());
        }
    }

    #[test]
    fn zero_interval_is_clamped() {
        let mut countdown = AutoAdvance::new(0);
        countdown.start();
        assert!(countdown.tick());
        assert!(countdown.tick());
    }
}
