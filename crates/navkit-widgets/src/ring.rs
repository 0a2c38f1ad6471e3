#![forbid(unsafe_code)]

//! Decorative glyph ring with a travelling glow.
//!
//! Every `step` the glow index moves one glyph forward. Glyphs whose offset
//! from the index is a multiple of `spacing` are lit, and one marker per
//! `spacing`-glyph segment lights while the index is inside its segment.
//! The whole ring also turns at a constant rate.

use std::time::Duration;

use navkit_core::Scheduler;
use navkit_style::token::PRIMARY;
use navkit_style::{ColorResolver, ColorToken, Theme};

use crate::config::FallbackColors;

const GLYPHS: &str = "◊△▽◁▷○◇⬡⬢◈⬟⬠⟐⟑⧫⬦◆●◐◑◒◓◔◕";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GlowStep;

/// Rendered state of one glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct RingGlyph {
    pub glyph: char,
    /// Clockwise from 12 o'clock.
    pub angle_degrees: f64,
    pub lit: bool,
}

/// Rendered ring.
#[derive(Debug, Clone, PartialEq)]
pub struct RingView {
    pub glyphs: Vec<RingGlyph>,
    /// One flag per segment marker.
    pub markers: Vec<bool>,
    /// Rotation of the whole ring.
    pub rotation_degrees: f64,
    pub lit_color: ColorToken,
    pub dim_color: ColorToken,
}

/// Glyph ring driven by virtual time.
#[derive(Debug)]
pub struct SpinningRing {
    count: usize,
    spacing: usize,
    step: Duration,
    revolution: Duration,
    glow_index: usize,
    fallbacks: FallbackColors,
    scheduler: Scheduler<GlowStep>,
}

impl Default for SpinningRing {
    fn default() -> Self {
        Self::new(20)
    }
}

impl SpinningRing {
    /// Ring of `count` glyphs (at least one), stepping every 400 ms, lighting
    /// every fourth glyph, turning once per 25 s.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            count: count.max(1),
            spacing: 4,
            step: Duration::from_millis(400),
            revolution: Duration::from_secs(25),
            glow_index: 0,
            fallbacks: FallbackColors::default(),
            scheduler: Scheduler::new(),
        }
    }

    /// Interval between glow steps. Zero is clamped to one millisecond.
    #[must_use]
    pub fn step(mut self, step: Duration) -> Self {
        self.step = step.max(Duration::from_millis(1));
        self
    }

    /// Distance between lit glyphs. Zero is treated as one.
    #[must_use]
    pub fn spacing(mut self, spacing: usize) -> Self {
        self.spacing = spacing.max(1);
        self
    }

    #[must_use]
    pub fn fallbacks(mut self, fallbacks: FallbackColors) -> Self {
        self.fallbacks = fallbacks;
        self
    }

    #[must_use]
    pub fn glow_index(&self) -> usize {
        self.glow_index
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.scheduler.is_idle()
    }

    /// Start stepping. Returns `false` if already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.scheduler.schedule(self.step, GlowStep);
        tracing::trace!(count = self.count, step_ms = self.step.as_millis() as u64, "ring started");
        true
    }

    /// Stop stepping. The glow index stays where it is.
    pub fn stop(&mut self) {
        self.scheduler.cancel_all();
    }

    /// Move virtual time forward, taking one glow step per elapsed interval.
    pub fn advance(&mut self, delta: Duration) {
        let deadline = self.scheduler.now().saturating_add(delta);
        while let Some((_, GlowStep)) = self.scheduler.pop_due(deadline) {
            self.glow_index = (self.glow_index + 1) % self.count;
            self.scheduler.schedule(self.step, GlowStep);
        }
        self.scheduler.settle(deadline);
    }

    /// Whether glyph `index` is lit at the current glow index.
    #[must_use]
    pub fn is_lit(&self, index: usize) -> bool {
        index < self.count && (index + self.count - self.glow_index) % self.count % self.spacing == 0
    }

    /// Lit glyphs take the theme's emphasis color (live `primary` token
    /// first); unlit glyphs use the resting fallback.
    #[must_use]
    pub fn view(&self, resolver: &ColorResolver, theme: Option<&Theme>) -> RingView {
        let lit_color = resolver.resolve_chain(
            PRIMARY,
            theme.map(|t| &t.buttons.active),
            &self.fallbacks.active,
        );
        let glyph_set: Vec<char> = GLYPHS.chars().collect();
        let glyphs = (0..self.count)
            .map(|i| RingGlyph {
                glyph: glyph_set[i % glyph_set.len()],
                angle_degrees: i as f64 * 360.0 / self.count as f64,
                lit: self.is_lit(i),
            })
            .collect();
        let active_marker = self.glow_index / self.spacing;
        let markers = (0..self.count.div_ceil(self.spacing))
            .map(|i| i == active_marker)
            .collect();
        let turn = self.scheduler.now().as_millis() % self.revolution.as_millis().max(1);
        let rotation_degrees = turn as f64 * 360.0 / self.revolution.as_millis().max(1) as f64;

        RingView {
            glyphs,
            markers,
            rotation_degrees,
            lit_color,
            dim_color: self.fallbacks.list.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navkit_style::{StyleSurface, ThemeCatalog, TokenSurface};
    use std::rc::Rc;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn lit(ring: &SpinningRing) -> Vec<usize> {
        (0..20).filter(|&i| ring.is_lit(i)).collect()
    }

    #[test]
    fn steps_every_400ms_once_started() {
        let mut ring = SpinningRing::default();
        ring.advance(ms(2000));
        assert_eq!(ring.glow_index(), 0);

        assert!(ring.start());
        assert!(!ring.start());
        ring.advance(ms(399));
        assert_eq!(ring.glow_index(), 0);
        ring.advance(ms(1));
        assert_eq!(ring.glow_index(), 1);
        ring.advance(ms(1200));
        assert_eq!(ring.glow_index(), 4);
    }

    #[test]
    fn index_wraps_around_the_ring() {
        let mut ring = SpinningRing::default();
        ring.start();
        ring.advance(ms(400 * 21));
        assert_eq!(ring.glow_index(), 1);
    }

    #[test]
    fn every_fourth_glyph_is_lit() {
        let mut ring = SpinningRing::default();
        assert_eq!(lit(&ring), vec![0, 4, 8, 12, 16]);
        ring.start();
        ring.advance(ms(400 * 3));
        assert_eq!(lit(&ring), vec![3, 7, 11, 15, 19]);
    }

    #[test]
    fn one_marker_follows_the_index() {
        let mut ring = SpinningRing::default();
        ring.start();
        ring.advance(ms(400 * 9));
        let view = ring.view(&ColorResolver::detached(), None);
        assert_eq!(view.markers, vec![false, false, true, false, false]);
        assert_eq!(view.glyphs.len(), 20);
        assert_eq!(view.glyphs[0].glyph, '◊');
        assert_eq!(view.glyphs[5].angle_degrees, 90.0);
    }

    #[test]
    fn stop_freezes_the_glow() {
        let mut ring = SpinningRing::default();
        ring.start();
        ring.advance(ms(800));
        ring.stop();
        assert!(!ring.is_running());
        ring.advance(ms(4000));
        assert_eq!(ring.glow_index(), 2);
    }

    #[test]
    fn lit_color_follows_theme_then_surface() {
        let ring = SpinningRing::default();
        let catalog = ThemeCatalog::builtin();
        let ocean = catalog.find("Ocean").unwrap();

        let detached = ring.view(&ColorResolver::detached(), Some(ocean));
        assert_eq!(detached.lit_color.as_str(), "200 80% 55%");
        assert_eq!(detached.dim_color, ColorToken::default_list());

        let surface = TokenSurface::new();
        surface.set(PRIMARY, ColorToken::new("1 2% 3%"));
        let live = ring.view(&ColorResolver::new(Rc::new(surface)), Some(ocean));
        assert_eq!(live.lit_color.as_str(), "1 2% 3%");

        let bare = ring.view(&ColorResolver::detached(), None);
        assert_eq!(bare.lit_color, ColorToken::default_active());
    }

    #[test]
    fn rotation_completes_every_25s() {
        let mut ring = SpinningRing::default();
        ring.advance(ms(6250));
        let view = ring.view(&ColorResolver::detached(), None);
        assert_eq!(view.rotation_degrees, 90.0);
        ring.advance(ms(18750));
        assert_eq!(ring.view(&ColorResolver::detached(), None).rotation_degrees, 0.0);
    }
}
