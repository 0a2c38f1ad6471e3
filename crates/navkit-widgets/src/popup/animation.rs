#![forbid(unsafe_code)]

//! Popup timings and staggered reveal plans.
//!
//! # Timeline
//!
//! Opening (`t = 0` at the open request):
//! - backdrop and container reveal over `container_open`;
//! - the header starts at `0`, item `k` at `(k + 1) * stagger_step`, each
//!   revealing over `item_open`;
//! - the phase settles to `Open` at [`PopupTimings::opening_total`].
//!
//! Closing (`t = 0` at the close request):
//! - the backdrop fades over `backdrop_close`;
//! - the last item leaves first, the header last, spaced by
//!   `close_stagger_step` and each lasting `item_close`;
//! - the popup unmounts at [`PopupTimings::close_total`].
//!
//! # Invariants
//!
//! - Every visual value is in `[0.0, 1.0]` for opacity and
//!   `[0.0, slide]` for offsets.
//! - Open and close plans for the same item count cover the same elements.

use std::time::Duration;

use navkit_core::animation::{cascade_in, cascade_out};
use navkit_core::Reveal;

/// Vertical distance (in logical pixels) the container slides in from.
pub const CONTAINER_SLIDE: f32 = 16.0;
/// Vertical distance (in logical pixels) each header/item slides in from.
pub const ITEM_SLIDE: f32 = 8.0;

// ============================================================================
// Phase
// ============================================================================

/// Lifecycle phase of a popup.
///
/// State machine: Closed → Opening → Open → Closing → Closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopupPhase {
    /// Unmounted.
    #[default]
    Closed,
    /// Mounted and revealing.
    Opening,
    /// Mounted and fully revealed.
    Open,
    /// Mounted and dismissing; all requests are ignored.
    Closing,
}

impl PopupPhase {
    /// Whether the popup surface is mounted.
    #[inline]
    #[must_use]
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Closed)
    }

    #[inline]
    #[must_use]
    pub fn is_animating(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }

    /// Whether backdrop and item clicks are honored. Input is accepted as
    /// soon as the surface mounts, not gated on the reveal finishing.
    #[inline]
    #[must_use]
    pub fn accepts_input(self) -> bool {
        matches!(self, Self::Opening | Self::Open)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Opening => "opening",
            Self::Open => "open",
            Self::Closing => "closing",
        }
    }
}

// ============================================================================
// Timings
// ============================================================================

/// Durations governing one open/close cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupTimings {
    pub container_open: Duration,
    pub stagger_step: Duration,
    pub item_open: Duration,
    pub close_stagger_step: Duration,
    pub item_close: Duration,
    pub backdrop_close: Duration,
    /// Close request to external close callback.
    pub close_delay: Duration,
    /// Item selection to navigation (then the close callback).
    pub navigate_delay: Duration,
}

impl Default for PopupTimings {
    fn default() -> Self {
        Self {
            container_open: Duration::from_millis(400),
            stagger_step: Duration::from_millis(50),
            item_open: Duration::from_millis(200),
            close_stagger_step: Duration::from_millis(30),
            item_close: Duration::from_millis(200),
            backdrop_close: Duration::from_millis(300),
            close_delay: Duration::from_millis(250),
            navigate_delay: Duration::from_millis(200),
        }
    }
}

impl PopupTimings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the settle delay before the close callback.
    #[must_use]
    pub fn close_delay(mut self, delay: Duration) -> Self {
        self.close_delay = delay;
        self
    }

    /// Set the settle delay before navigation.
    #[must_use]
    pub fn navigate_delay(mut self, delay: Duration) -> Self {
        self.navigate_delay = delay;
        self
    }

    /// Set the per-item reveal stagger.
    #[must_use]
    pub fn stagger_step(mut self, step: Duration) -> Self {
        self.stagger_step = step;
        self
    }

    /// Time from open request until the last element finished revealing.
    #[must_use]
    pub fn opening_total(&self, item_count: usize) -> Duration {
        let last_item = self
            .stagger_step
            .saturating_mul(item_count as u32)
            .saturating_add(self.item_open);
        self.container_open.max(last_item)
    }

    /// Offset at which the header starts dismissing (it leaves last).
    #[must_use]
    pub fn header_close_offset(&self, item_count: usize) -> Duration {
        self.close_stagger_step.saturating_mul(item_count as u32)
    }

    /// `D_close_max`: time from close request until the popup unmounts.
    #[must_use]
    pub fn close_total(&self, item_count: usize) -> Duration {
        self.backdrop_close.max(
            self.header_close_offset(item_count)
                .saturating_add(self.item_close),
        )
    }
}

// ============================================================================
// Visuals
// ============================================================================

/// Opacity and vertical offset of one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visual {
    pub opacity: f32,
    /// Downward displacement; zero when fully revealed.
    pub offset_y: f32,
}

impl Visual {
    pub const HIDDEN: Self = Self {
        opacity: 0.0,
        offset_y: 0.0,
    };

    fn from_reveal(reveal: &Reveal, elapsed: Duration, slide: f32) -> Self {
        let opacity = reveal.value_at(elapsed);
        Self {
            opacity,
            offset_y: slide * (1.0 - opacity),
        }
    }
}

/// Reveal tracks for every element of the popup during one phase.
#[derive(Debug, Clone)]
pub struct RevealPlan {
    pub backdrop: Reveal,
    pub container: Reveal,
    pub header: Reveal,
    /// Indexed by item.
    pub items: Vec<Reveal>,
}

impl RevealPlan {
    /// Forward plan: header first, items in index order.
    #[must_use]
    pub fn opening(timings: &PopupTimings, item_count: usize) -> Self {
        let mut tracks = cascade_in(
            item_count + 1,
            Duration::ZERO,
            timings.stagger_step,
            timings.item_open,
        );
        let items = tracks.split_off(1);
        let header = tracks[0];
        let container = Reveal::enter(Duration::ZERO, timings.container_open);
        Self {
            backdrop: container,
            container,
            header,
            items,
        }
    }

    /// Mirrored plan: last item first, header last.
    #[must_use]
    pub fn closing(timings: &PopupTimings, item_count: usize) -> Self {
        let mut tracks = cascade_out(
            item_count + 1,
            Duration::ZERO,
            timings.close_stagger_step,
            timings.item_close,
        );
        let items = tracks.split_off(1);
        let header = tracks[0];
        Self {
            backdrop: Reveal::exit(Duration::ZERO, timings.backdrop_close),
            container: Reveal::exit(Duration::ZERO, timings.close_total(item_count)),
            header,
            items,
        }
    }

    #[must_use]
    pub fn backdrop_opacity(&self, elapsed: Duration) -> f32 {
        self.backdrop.value_at(elapsed)
    }

    #[must_use]
    pub fn container_at(&self, elapsed: Duration) -> Visual {
        Visual::from_reveal(&self.container, elapsed, CONTAINER_SLIDE)
    }

    #[must_use]
    pub fn header_at(&self, elapsed: Duration) -> Visual {
        Visual::from_reveal(&self.header, elapsed, ITEM_SLIDE)
    }

    #[must_use]
    pub fn item_at(&self, index: usize, elapsed: Duration) -> Visual {
        self.items
            .get(index)
            .map_or(Visual::HIDDEN, |r| Visual::from_reveal(r, elapsed, ITEM_SLIDE))
    }

    /// Elapsed time at which every track has finished.
    #[must_use]
    pub fn ends_at(&self) -> Duration {
        [&self.backdrop, &self.container, &self.header]
            .into_iter()
            .chain(self.items.iter())
            .map(Reveal::ends_at)
            .max()
            .unwrap_or_default()
    }
}
