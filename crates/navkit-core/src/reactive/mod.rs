#![forbid(unsafe_code)]

//! Reactive values with change notification.
//!
//! [`Observable`] is the observer-pattern building block behind the theme
//! store and the style surface: explicit, ownership-bearing shared state
//! instead of ambient module-level variables.

mod observable;

pub use observable::{Observable, Subscription};
