#![forbid(unsafe_code)]

//! The menu popup: timings, reveal plans, and the lifecycle state machine.

mod animation;
mod lifecycle;

pub use animation::{CONTAINER_SLIDE, ITEM_SLIDE, PopupPhase, PopupTimings, RevealPlan, Visual};
pub use lifecycle::{ItemView, MenuPopup, PopupPalette, PopupView};
