#![forbid(unsafe_code)]

//! Wall-clock to frame-delta adapter.
//!
//! Widgets advance on explicit deltas. Hosts with a real frame loop use a
//! [`FrameClock`] to turn "time since the last frame" into those deltas;
//! tests skip it and pass fixed durations directly.

use std::time::Duration;
use web_time::Instant;

/// Measures elapsed time between successive frames.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    /// Upper bound on a single delta so a stalled host (debugger, sleep)
    /// does not skip whole animations in one frame.
    max_delta: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Start a clock at the current instant with a 250ms delta cap.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            max_delta: Duration::from_millis(250),
        }
    }

    /// Set the per-frame delta cap.
    #[must_use]
    pub fn max_delta(mut self, max_delta: Duration) -> Self {
        self.max_delta = max_delta;
        self
    }

    /// Time since the previous call (or since construction), capped.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let delta = now.saturating_duration_since(self.last);
        self.last = now;
        delta.min(self.max_delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_is_capped() {
        let mut clock = FrameClock::new().max_delta(Duration::ZERO);
        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(clock.tick(), Duration::ZERO);
    }

    #[test]
    fn successive_ticks_are_small() {
        let mut clock = FrameClock::new();
        let _ = clock.tick();
        assert!(clock.tick() < Duration::from_millis(250));
    }
}
