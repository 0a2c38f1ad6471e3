#![forbid(unsafe_code)]

//! Widgets for the navkit overlay.
//!
//! # Role in navkit
//! `navkit-widgets` turns theme state and time into view models. Nothing here
//! draws: a host renderer paints [`NavBarView`] and [`PopupView`] values and
//! feeds user input and frame deltas back in.
//!
//! # This crate provides
//! - [`NavigationBar`]: fixed destination buttons with active-state
//!   derivation and the menu trigger.
//! - [`MenuPopup`]: the timed open/close state machine with staggered item
//!   reveals and deferred navigation.
//! - [`NavOverlay`]: bar + popup + colors wired together.
//! - [`Navigator`] / [`Location`] capabilities and an in-memory
//!   [`MemoryRouter`].
//! - [`SpinningRing`]: decorative glyph ring with a travelling glow.
//! - [`OverlayConfig`]: timings, grid layout, and fallback colors loadable
//!   from TOML or JSON.
//!
//! # Driving time
//! Widgets never read a clock. Call `advance(delta)` from the host's frame
//! loop (see [`navkit_core::FrameClock`]) or with fixed steps in tests.

pub mod config;
pub mod menu;
pub mod nav_bar;
pub mod navigation;
pub mod overlay;
pub mod popup;
pub mod ring;

pub use config::{ConfigError, FallbackColors, OverlayConfig, TimingsConfig};
pub use menu::{Glyph, MenuCatalog, MenuCatalogError, MenuItem};
pub use nav_bar::{NavBarView, NavItem, NavItemKind, NavItemView, NavigationBar, PressOutcome, is_active};
pub use navigation::{Location, MemoryRouter, Navigator};
pub use overlay::{NavOverlay, OverlayView};
pub use popup::{
    ItemView, MenuPopup, PopupPalette, PopupPhase, PopupTimings, PopupView, Visual,
};
pub use ring::{RingGlyph, RingView, SpinningRing};
