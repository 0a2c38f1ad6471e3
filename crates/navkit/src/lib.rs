#![forbid(unsafe_code)]

//! navkit public facade crate.
//!
//! Re-exports the types an application needs to mount the navigation
//! overlay, plus a unified [`Error`] and a small prelude.
//!
//! ```
//! use std::rc::Rc;
//! use std::time::Duration;
//! use navkit::prelude::*;
//!
//! let router = Rc::new(MemoryRouter::new("/"));
//! let store = ThemeStore::in_memory();
//! let mut overlay = NavOverlay::with_router(&OverlayConfig::default(), Rc::clone(&router))
//!     .theme_store(store);
//!
//! overlay.open_menu();
//! overlay.advance(Duration::from_millis(500));
//! overlay.select_menu_id("discover");
//! overlay.advance(Duration::from_millis(500));
//! assert_eq!(router.current_path(), "/discover");
//! ```

pub mod error;

// --- Core re-exports -------------------------------------------------------

pub use navkit_core::{FrameClock, Observable, Scheduler, Subscription, TimerId};

// --- Style re-exports ------------------------------------------------------

pub use navkit_style::{
    CatalogError, ColorResolver, ColorToken, StyleSurface, SurfaceSnapshot, Theme, ThemeButtons,
    TesterPalette, ThemeCatalog, TokenSurface,
};

// --- Runtime re-exports ----------------------------------------------------

pub use navkit_runtime::{
    FileStorage, MemoryStorage, ThemeContext, ThemeError, ThemeSelection, ThemeStorage,
    ThemeStore, ThemeSubscription,
};

// --- Widget re-exports -----------------------------------------------------

pub use navkit_widgets::{
    ConfigError, FallbackColors, Location, MemoryRouter, MenuCatalog, MenuCatalogError, MenuItem,
    MenuPopup, NavBarView, NavItem, NavOverlay, NavigationBar, Navigator, OverlayConfig,
    OverlayView, PopupPhase, PopupTimings, PopupView, PressOutcome, RingView, SpinningRing,
};

pub use error::{Error, Result, Severity};

pub mod core {
    pub use navkit_core::*;
}

pub mod style {
    pub use navkit_style::*;
}

pub mod runtime {
    pub use navkit_runtime::*;
}

pub mod widgets {
    pub use navkit_widgets::*;
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ColorResolver, Error, Location, MemoryRouter, NavOverlay, Navigator, OverlayConfig,
        PopupPhase, PressOutcome, Result, Theme, ThemeContext, ThemeStore,
    };

    pub use crate::{core, runtime, style, widgets};
}
