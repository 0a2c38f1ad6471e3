#![forbid(unsafe_code)]

//! Color vocabulary for navkit.
//!
//! # Role in navkit
//! `navkit-style` is the shared vocabulary for colors. The theme store writes
//! into a [`StyleSurface`], and the navigation bar and menu popup read from it
//! through a [`ColorResolver`], so neither widget needs a live theme store to
//! render.
//!
//! # This crate provides
//! - [`ColorToken`]: an opaque HSL-like color string, never parsed.
//! - [`Theme`] and the built-in [`ThemeCatalog`].
//! - [`StyleSurface`], the process-wide token map, and its in-memory
//!   implementation [`TokenSurface`].
//! - [`ColorResolver`]: token lookup with deterministic fallback.
//! - [`TesterPalette`]: preset token overrides for previewing colors.

/// Theme catalog with name-uniqueness validation.
pub mod catalog;
/// Token lookup with fallback chains.
pub mod resolver;
/// Key/value style surface.
pub mod surface;
/// Preset palettes applied directly to a surface.
pub mod tester;
/// Theme definitions.
pub mod theme;
/// Color tokens and well-known token names.
pub mod token;

pub use catalog::{CatalogError, ThemeCatalog};
pub use resolver::ColorResolver;
pub use surface::{StyleSurface, SurfaceSnapshot, TokenSurface};
pub use tester::TesterPalette;
pub use theme::{Theme, ThemeButtons};
pub use token::ColorToken;
