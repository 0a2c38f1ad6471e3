#![forbid(unsafe_code)]

//! Theme state for navkit.
//!
//! # Role in navkit
//! `navkit-runtime` owns the single mutable piece of shared state: which
//! theme is active, and which one was last saved. Widgets never write to it;
//! a theme picker (outside navkit) calls [`ThemeStore::set_theme`] and
//! [`ThemeStore::save_theme`], and everything else reads.
//!
//! # This crate provides
//! - [`ThemeStore`]: the active theme with change notification, a dirty flag,
//!   and style-surface sync.
//! - [`ThemeContext`]: an explicit provider slot that fails fast with
//!   [`ThemeError::NotInitialized`] when read before a store is provided.
//! - [`persistence`]: the [`ThemeStorage`] trait with in-memory and JSON file
//!   backends.

pub mod context;
pub mod error;
pub mod persistence;
pub mod theme_store;

pub use context::ThemeContext;
pub use error::ThemeError;
pub use persistence::{FileStorage, MemoryStorage, THEME_KEY, ThemeStorage};
pub use theme_store::{ThemeSelection, ThemeStore, ThemeSubscription};
