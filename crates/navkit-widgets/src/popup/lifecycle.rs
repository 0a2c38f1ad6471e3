#![forbid(unsafe_code)]

//! Timed open/close state machine for the menu popup.
//!
//! # Design
//!
//! Every deferred step of a cycle (open settle, close callback, deferred
//! navigation, unmount) is an event in a per-instance [`Scheduler`]. Time
//! only moves through [`MenuPopup::advance`], so whole cycles replay
//! deterministically.
//!
//! # Invariants
//!
//! 1. The surface is mounted (`view()` is `Some`) iff the phase is not
//!    `Closed`.
//! 2. Only the first close or select per cycle schedules anything; requests
//!    while `Closing` (and `open` while mounted) add no timers.
//! 3. Navigation and the close callback fire at most once per cycle, and the
//!    navigation always precedes the callback.
//! 4. Reaching `Closed` leaves no pending timers: settle steps still queued
//!    at unmount are flushed in scheduled order first.
//! 5. After [`MenuPopup::teardown`] (or drop) no step of the cycle fires.
//!
//! # Failure Modes
//!
//! - **Re-entrant close callback**: the callback runs while the popup is
//!   mutably borrowed, so it must not call back into the same popup.
//! - **Unknown item index**: `select` ignores it and returns `false`.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use navkit_core::{Scheduler, TimerId};
use navkit_runtime::ThemeStore;
use navkit_style::token::{GLOW, PRIMARY};
use navkit_style::{ColorResolver, ColorToken, Theme};

use super::animation::{PopupPhase, PopupTimings, RevealPlan, Visual};
use crate::config::{FallbackColors, OverlayConfig};
use crate::menu::{Glyph, MenuCatalog};
use crate::navigation::Navigator;

#[derive(Debug, Clone, PartialEq, Eq)]
enum PopupTimer {
    /// Opening reveal finished.
    OpenSettled,
    /// Fire the external close callback.
    CloseNotify,
    /// Navigate, then fire the external close callback.
    NavigateAndNotify { path: String },
    /// Closing animation finished; unmount.
    Unmount,
}

impl PopupTimer {
    fn is_settle_step(&self) -> bool {
        matches!(self, Self::CloseNotify | Self::NavigateAndNotify { .. })
    }
}

// ============================================================================
// View model
// ============================================================================

/// Colors captured when the popup opens. The popup does not follow theme
/// changes while mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupPalette {
    pub glow: ColorToken,
    pub emphasis: ColorToken,
    pub accent: Option<ColorToken>,
    /// Fixed neutral background; never taken from the theme.
    pub container: ColorToken,
}

impl PopupPalette {
    #[must_use]
    pub fn resolve(
        resolver: &ColorResolver,
        theme: Option<&Theme>,
        fallbacks: &FallbackColors,
    ) -> Self {
        let theme_active = theme.map(|t| &t.buttons.active);
        Self {
            glow: resolver.resolve_chain(GLOW, theme_active, &fallbacks.active),
            emphasis: resolver.resolve_chain(PRIMARY, theme_active, &fallbacks.active),
            accent: theme.and_then(|t| t.accent.clone()),
            container: fallbacks.container.clone(),
        }
    }

    /// Glow for the item at `index`: odd items use the accent when present.
    #[must_use]
    pub fn glow_for(&self, index: usize) -> &ColorToken {
        match &self.accent {
            Some(accent) if index % 2 == 1 => accent,
            _ => &self.glow,
        }
    }
}

/// One grid cell of the popup.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemView {
    pub id: String,
    pub label: String,
    pub path: String,
    pub glyph: Glyph,
    pub row: usize,
    pub column: usize,
    pub visual: Visual,
    pub glow: ColorToken,
    /// Whether this item's selection started the current close.
    pub selected: bool,
}

/// Everything a renderer needs to paint the mounted popup.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupView {
    pub phase: PopupPhase,
    pub cycle: u64,
    pub title: String,
    pub backdrop_opacity: f32,
    pub container: Visual,
    pub header: Visual,
    pub items: Vec<ItemView>,
    pub palette: PopupPalette,
    pub accepts_input: bool,
}

// ============================================================================
// MenuPopup
// ============================================================================

/// Animated popup of destination shortcuts.
pub struct MenuPopup {
    catalog: MenuCatalog,
    timings: PopupTimings,
    grid_columns: usize,
    fallbacks: FallbackColors,
    resolver: ColorResolver,
    theme: Option<ThemeStore>,
    navigator: Rc<dyn Navigator>,
    on_close: Option<Box<dyn FnMut()>>,
    scheduler: Scheduler<PopupTimer>,
    phase: PopupPhase,
    phase_started: Duration,
    plan: Option<RevealPlan>,
    palette: Option<PopupPalette>,
    settle_timer: Option<TimerId>,
    selected: Option<usize>,
    cycle: u64,
}

impl fmt::Debug for MenuPopup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuPopup")
            .field("phase", &self.phase)
            .field("cycle", &self.cycle)
            .field("items", &self.catalog.len())
            .field("pending_timers", &self.scheduler.pending())
            .field("now", &self.scheduler.now())
            .finish()
    }
}

impl MenuPopup {
    /// Closed popup over `catalog` with default timings and colors.
    #[must_use]
    pub fn new(catalog: MenuCatalog, navigator: Rc<dyn Navigator>) -> Self {
        Self {
            catalog,
            timings: PopupTimings::default(),
            grid_columns: 2,
            fallbacks: FallbackColors::default(),
            resolver: ColorResolver::detached(),
            theme: None,
            navigator,
            on_close: None,
            scheduler: Scheduler::new(),
            phase: PopupPhase::Closed,
            phase_started: Duration::ZERO,
            plan: None,
            palette: None,
            settle_timer: None,
            selected: None,
            cycle: 0,
        }
    }

    /// Closed popup configured from `config`.
    #[must_use]
    pub fn from_config(
        config: &OverlayConfig,
        catalog: MenuCatalog,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self::new(catalog, navigator)
            .timings(config.popup_timings())
            .grid_columns(config.grid_columns)
            .fallbacks(config.fallbacks.clone())
    }

    #[must_use]
    pub fn timings(mut self, timings: PopupTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Set grid width (clamped to at least one column).
    #[must_use]
    pub fn grid_columns(mut self, columns: usize) -> Self {
        self.grid_columns = columns.max(1);
        self
    }

    #[must_use]
    pub fn fallbacks(mut self, fallbacks: FallbackColors) -> Self {
        self.fallbacks = fallbacks;
        self
    }

    /// Read glow/emphasis tokens through `resolver`.
    #[must_use]
    pub fn resolver(mut self, resolver: ColorResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Read the active theme from `store` when opening.
    #[must_use]
    pub fn theme_store(mut self, store: ThemeStore) -> Self {
        self.theme = Some(store);
        self
    }

    #[must_use]
    pub fn on_close(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_close = Some(Box::new(callback));
        self
    }

    /// Replace the external close callback.
    pub fn set_on_close(&mut self, callback: impl FnMut() + 'static) {
        self.on_close = Some(Box::new(callback));
    }

    // --- State queries -----------------------------------------------------

    #[must_use]
    pub fn phase(&self) -> PopupPhase {
        self.phase
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.phase.is_visible()
    }

    /// Number of open requests honored so far.
    #[must_use]
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Deferred steps not yet fired.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// Virtual time of this popup.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Time spent in the current phase.
    #[must_use]
    pub fn phase_elapsed(&self) -> Duration {
        self.scheduler.now().saturating_sub(self.phase_started)
    }

    #[must_use]
    pub fn catalog(&self) -> &MenuCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn popup_timings(&self) -> &PopupTimings {
        &self.timings
    }

    /// Palette captured at the last open, while mounted.
    #[must_use]
    pub fn palette(&self) -> Option<&PopupPalette> {
        self.palette.as_ref()
    }

    // --- Requests ----------------------------------------------------------

    /// `Closed → Opening`. Ignored (returns `false`) while mounted.
    pub fn open(&mut self) -> bool {
        if self.phase != PopupPhase::Closed {
            tracing::trace!(cycle = self.cycle, phase = self.phase.as_str(), "open ignored");
            return false;
        }
        self.scheduler.cancel_all();
        self.cycle += 1;

        let theme = self.theme.as_ref().map(ThemeStore::current);
        self.palette = Some(PopupPalette::resolve(
            &self.resolver,
            theme.as_ref(),
            &self.fallbacks,
        ));
        let count = self.catalog.len();
        self.plan = Some(RevealPlan::opening(&self.timings, count));
        self.selected = None;
        self.transition(PopupPhase::Opening);
        self.settle_timer = Some(
            self.scheduler
                .schedule(self.timings.opening_total(count), PopupTimer::OpenSettled),
        );
        true
    }

    /// Backdrop click: `Opening | Open → Closing`, with the close callback
    /// after `close_delay`.
    pub fn request_close(&mut self) -> bool {
        if !self.phase.accepts_input() {
            tracing::trace!(cycle = self.cycle, phase = self.phase.as_str(), "close ignored");
            return false;
        }
        self.begin_close(None);
        true
    }

    /// Item click: `Opening | Open → Closing`, navigating to the item's path
    /// after `navigate_delay` and then firing the close callback.
    pub fn select(&mut self, index: usize) -> bool {
        if !self.phase.accepts_input() {
            tracing::trace!(cycle = self.cycle, phase = self.phase.as_str(), index, "select ignored");
            return false;
        }
        let Some(item) = self.catalog.get(index) else {
            tracing::debug!(cycle = self.cycle, index, "select ignored, no such item");
            return false;
        };
        let path = item.path.clone();
        self.selected = Some(index);
        self.begin_close(Some(path));
        true
    }

    /// [`select`](Self::select) by item id.
    pub fn select_id(&mut self, id: &str) -> bool {
        match self.catalog.position(id) {
            Some(index) => self.select(index),
            None => {
                tracing::debug!(cycle = self.cycle, id, "select ignored, no such item");
                false
            }
        }
    }

    /// Move this popup's clock forward, firing due steps at their due time.
    pub fn advance(&mut self, delta: Duration) {
        let deadline = self.scheduler.now().saturating_add(delta);
        while let Some((_, timer)) = self.scheduler.pop_due(deadline) {
            self.fire(timer);
        }
        self.scheduler.settle(deadline);
    }

    /// Cancel every pending step and unmount immediately. No callback fires.
    pub fn teardown(&mut self) {
        let dropped = self.scheduler.cancel_all();
        let from = self.phase;
        self.settle_timer = None;
        self.plan = None;
        self.palette = None;
        self.selected = None;
        self.phase = PopupPhase::Closed;
        if dropped > 0 || from != PopupPhase::Closed {
            tracing::debug!(cycle = self.cycle, from = from.as_str(), dropped, "popup torn down");
        }
    }

    /// View model, or `None` while unmounted.
    #[must_use]
    pub fn view(&self) -> Option<PopupView> {
        if !self.phase.is_visible() {
            return None;
        }
        let plan = self.plan.as_ref()?;
        let palette = self.palette.clone()?;
        let elapsed = self.phase_elapsed();
        let columns = self.grid_columns.max(1);

        let items = self
            .catalog
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| ItemView {
                id: item.id.clone(),
                label: item.label.clone(),
                path: item.path.clone(),
                glyph: item.glyph.clone(),
                row: i / columns,
                column: i % columns,
                visual: plan.item_at(i, elapsed),
                glow: palette.glow_for(i).clone(),
                selected: self.selected == Some(i),
            })
            .collect();

        Some(PopupView {
            phase: self.phase,
            cycle: self.cycle,
            title: self.catalog.title().to_owned(),
            backdrop_opacity: plan.backdrop_opacity(elapsed),
            container: plan.container_at(elapsed),
            header: plan.header_at(elapsed),
            items,
            palette,
            accepts_input: self.phase.accepts_input(),
        })
    }

    // --- Internals ---------------------------------------------------------

    fn transition(&mut self, to: PopupPhase) {
        let from = self.phase;
        self.phase = to;
        self.phase_started = self.scheduler.now();
        tracing::debug!(
            cycle = self.cycle,
            from = from.as_str(),
            to = to.as_str(),
            at_ms = self.scheduler.now().as_millis() as u64,
            "popup phase"
        );
    }

    fn begin_close(&mut self, navigate_to: Option<String>) {
        if let Some(id) = self.settle_timer.take() {
            self.scheduler.cancel(id);
        }
        let count = self.catalog.len();
        self.plan = Some(RevealPlan::closing(&self.timings, count));
        self.transition(PopupPhase::Closing);

        // Settle step first so it wins a tie with the unmount.
        match navigate_to {
            Some(path) => {
                self.scheduler
                    .schedule(self.timings.navigate_delay, PopupTimer::NavigateAndNotify { path });
            }
            None => {
                self.scheduler
                    .schedule(self.timings.close_delay, PopupTimer::CloseNotify);
            }
        }
        self.scheduler
            .schedule(self.timings.close_total(count), PopupTimer::Unmount);
    }

    fn fire(&mut self, timer: PopupTimer) {
        match timer {
            PopupTimer::OpenSettled => {
                self.settle_timer = None;
                if self.phase == PopupPhase::Opening {
                    self.transition(PopupPhase::Open);
                }
            }
            PopupTimer::CloseNotify => self.notify_close(),
            PopupTimer::NavigateAndNotify { path } => {
                tracing::debug!(cycle = self.cycle, path = %path, "popup navigating");
                self.navigator.navigate(&path);
                self.notify_close();
            }
            PopupTimer::Unmount => self.unmount(),
        }
    }

    fn unmount(&mut self) {
        for (_, timer) in self.scheduler.drain_pending() {
            if timer.is_settle_step() {
                tracing::trace!(cycle = self.cycle, "flushing settle step at unmount");
                self.fire(timer);
            }
        }
        self.plan = None;
        self.palette = None;
        self.selected = None;
        self.transition(PopupPhase::Closed);
    }

    fn notify_close(&mut self) {
        tracing::trace!(cycle = self.cycle, "close callback");
        if let Some(callback) = self.on_close.as_mut() {
            callback();
        }
    }
}

impl Drop for MenuPopup {
    fn drop(&mut self) {
        if !self.scheduler.is_idle() {
            self.teardown();
        }
    }
}
