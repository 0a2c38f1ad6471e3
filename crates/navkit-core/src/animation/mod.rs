#![forbid(unsafe_code)]

//! Animation timing primitives.
//!
//! navkit does not run a general animation engine. It only needs to answer
//! "how far along is this element's reveal at time `t`?" for a backdrop, a
//! container, a header, and a handful of grid items. The pieces:
//!
//! - Quadratic ease-in/ease-out curves normalized to `[0.0, 1.0]`.
//! - [`stagger_offsets`] for cascading start delays.
//! - [`Reveal`] tracks that combine a delay, a duration and a direction
//!   into a pure function of elapsed time.
//!
//! # Invariants
//!
//! 1. Every easing curve maps 0.0 → 0.0 and 1.0 → 1.0 and clamps its input.
//! 2. Reveal values are always in `[0.0, 1.0]`.
//! 3. All functions are pure: same inputs, same outputs.

mod reveal;
mod stagger;

pub use reveal::{Reveal, RevealDirection, cascade_in, cascade_out};
pub use stagger::stagger_offsets;

/// An easing curve mapping linear progress to eased progress.
pub type EasingFn = fn(f32) -> f32;

/// Quadratic ease-in (accelerating). Used for exits.
#[must_use]
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Quadratic ease-out (decelerating). Used for entrances.
#[must_use]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [EasingFn; 2] = [ease_in, ease_out];

    #[test]
    fn endpoints_are_fixed_and_input_clamped() {
        for curve in CURVES {
            assert!(curve(0.0).abs() < 1e-6);
            assert!((curve(1.0) - 1.0).abs() < 1e-6);
            assert!(curve(-3.0).abs() < 1e-6);
            assert!((curve(7.5) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn quadratic_midpoints() {
        assert!((ease_in(0.5) - 0.25).abs() < 1e-6);
        assert!((ease_out(0.5) - 0.75).abs() < 1e-6);
    }
}
