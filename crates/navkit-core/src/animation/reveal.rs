#![forbid(unsafe_code)]

//! Time-addressed reveal tracks.
//!
//! A [`Reveal`] is stateless: it answers "what is my visibility at elapsed
//! time `t`?" so a caller can keep a single phase-start timestamp and query
//! any number of tracks without ticking each of them.

use std::time::Duration;

use super::stagger::stagger_offsets;
use super::{EasingFn, ease_in, ease_out};

/// Whether a track shows or hides its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealDirection {
    /// Visibility rises from 0.0 to 1.0.
    In,
    /// Visibility falls from 1.0 to 0.0.
    Out,
}

/// A single delayed, eased visibility ramp.
#[derive(Debug, Clone, Copy)]
pub struct Reveal {
    delay: Duration,
    duration: Duration,
    easing: EasingFn,
    direction: RevealDirection,
}

impl Reveal {
    /// Entrance track with ease-out.
    #[must_use]
    pub fn enter(delay: Duration, duration: Duration) -> Self {
        Self {
            delay,
            duration,
            easing: ease_out,
            direction: RevealDirection::In,
        }
    }

    /// Exit track with ease-in.
    #[must_use]
    pub fn exit(delay: Duration, duration: Duration) -> Self {
        Self {
            delay,
            duration,
            easing: ease_in,
            direction: RevealDirection::Out,
        }
    }

    /// Delay before the ramp starts.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Length of the ramp itself.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Direction of the ramp.
    #[must_use]
    pub fn direction(&self) -> RevealDirection {
        self.direction
    }

    /// Elapsed time at which the ramp is finished.
    #[must_use]
    pub fn ends_at(&self) -> Duration {
        self.delay.saturating_add(self.duration)
    }

    /// Linear progress through the ramp in `[0.0, 1.0]`.
    #[must_use]
    pub fn progress_at(&self, elapsed: Duration) -> f32 {
        if elapsed < self.delay {
            return 0.0;
        }
        if self.duration.is_zero() {
            return 1.0;
        }
        let into = elapsed - self.delay;
        (into.as_secs_f64() / self.duration.as_secs_f64()).min(1.0) as f32
    }

    /// Visibility of the element in `[0.0, 1.0]`.
    #[must_use]
    pub fn value_at(&self, elapsed: Duration) -> f32 {
        let eased = (self.easing)(self.progress_at(elapsed)).clamp(0.0, 1.0);
        match self.direction {
            RevealDirection::In => eased,
            RevealDirection::Out => 1.0 - eased,
        }
    }

    /// Whether the ramp has finished at `elapsed`.
    #[must_use]
    pub fn is_complete_at(&self, elapsed: Duration) -> bool {
        elapsed >= self.ends_at()
    }
}

/// Entrance tracks for `count` items, item `i` starting at `start + offset(i)`.
///
/// Items appear in index order.
#[must_use]
pub fn cascade_in(
    count: usize,
    start: Duration,
    step: Duration,
    duration: Duration,
) -> Vec<Reveal> {
    stagger_offsets(count, step)
        .into_iter()
        .map(|offset| Reveal::enter(start.saturating_add(offset), duration))
        .collect()
}

/// Exit tracks for `count` items in **reverse** index order.
///
/// The returned vector is indexed by item, so `tracks[count - 1]` has the
/// smallest delay (last revealed, first dismissed).
#[must_use]
pub fn cascade_out(
    count: usize,
    start: Duration,
    step: Duration,
    duration: Duration,
) -> Vec<Reveal> {
    let offsets = stagger_offsets(count, step);
    (0..count)
        .map(|i| Reveal::exit(start.saturating_add(offsets[count - 1 - i]), duration))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS50: Duration = Duration::from_millis(50);
    const MS100: Duration = Duration::from_millis(100);
    const MS200: Duration = Duration::from_millis(200);

    #[test]
    fn enter_before_delay_is_hidden() {
        let reveal = Reveal::enter(MS100, MS200);
        assert_eq!(reveal.value_at(MS50), 0.0);
        assert_eq!(reveal.ends_at(), Duration::from_millis(300));
    }

    #[test]
    fn enter_completes_fully_visible() {
        let reveal = Reveal::enter(Duration::ZERO, MS200);
        assert!((reveal.value_at(MS200) - 1.0).abs() < 1e-6);
        assert!(reveal.is_complete_at(MS200));
        assert!(!reveal.is_complete_at(MS100));
    }

    #[test]
    fn exit_starts_visible_and_ends_hidden() {
        let reveal = Reveal::exit(MS50, MS100);
        assert!((reveal.value_at(Duration::ZERO) - 1.0).abs() < 1e-6);
        assert!(reveal.value_at(Duration::from_millis(150)).abs() < 1e-6);
    }

    #[test]
    fn entrances_ease_out_and_exits_ease_in() {
        let enter = Reveal::enter(Duration::ZERO, MS200);
        let exit = Reveal::exit(Duration::ZERO, MS200);
        assert!((enter.value_at(MS100) - 0.75).abs() < 1e-6);
        assert!((exit.value_at(MS100) - 0.75).abs() < 1e-6);
        assert!((enter.progress_at(MS100) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn zero_duration_is_a_step() {
        let reveal = Reveal::enter(MS100, Duration::ZERO);
        assert_eq!(reveal.value_at(Duration::from_millis(99)), 0.0);
        assert_eq!(reveal.value_at(MS100), 1.0);
    }

    #[test]
    fn cascade_in_orders_by_index() {
        let tracks = cascade_in(3, MS50, MS50, MS200);
        let delays: Vec<_> = tracks.iter().map(Reveal::delay).collect();
        assert_eq!(delays, vec![MS50, MS100, Duration::from_millis(150)]);
    }

    #[test]
    fn cascade_out_reverses_order() {
        let tracks = cascade_out(3, Duration::ZERO, MS50, MS200);
        assert_eq!(tracks[2].delay(), Duration::ZERO);
        assert_eq!(tracks[1].delay(), MS50);
        assert_eq!(tracks[0].delay(), MS100);
        assert!(tracks.iter().all(|t| t.direction() == RevealDirection::Out));
    }

    #[test]
    fn cascade_empty() {
        assert!(cascade_in(0, MS50, MS50, MS200).is_empty());
        assert!(cascade_out(0, MS50, MS50, MS200).is_empty());
    }
}
