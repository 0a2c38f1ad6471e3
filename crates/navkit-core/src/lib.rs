#![forbid(unsafe_code)]

//! Core primitives for navkit.
//!
//! # Role in navkit
//! `navkit-core` owns the pieces every other crate leans on and that carry no
//! styling or widget knowledge:
//!
//! - [`animation`]: ease-in/out curves, stagger offsets, and [`animation::Reveal`]
//!   tracks that map elapsed time to opacity/offset values.
//! - [`reactive`]: [`reactive::Observable`] values with RAII subscriptions.
//! - [`scheduler`]: a deterministic, single-threaded queue of cancellable
//!   deferred tasks driven by explicit time advancement.
//! - [`clock`]: a frame clock that turns wall-clock time into `advance` deltas.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`) by design of the host
//! model: input events, timer expirations, and change notifications all run on
//! one logical thread.

pub mod animation;
pub mod clock;
pub mod reactive;
pub mod scheduler;

pub use animation::{Reveal, RevealDirection, stagger_offsets};
pub use clock::FrameClock;
pub use reactive::{Observable, Subscription};
pub use scheduler::{Scheduler, TimerId};
