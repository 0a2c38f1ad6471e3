//! Property-based invariant tests for color resolution.
//!
//! ## Invariants
//!
//! 1. Unbound or blank tokens resolve to the fallback, unchanged.
//! 2. Bound, non-blank tokens resolve to the surface value.
//! 3. A non-empty fallback never yields an empty result.
//! 4. A detached resolver always yields the fallback.
//! 5. Chain resolution never yields a blank token when the default is non-blank.

use std::rc::Rc;

use navkit_style::{ColorResolver, ColorToken, StyleSurface, TokenSurface};
use proptest::prelude::*;

// ── Strategies ────────────────────────────────────────────────────────────

fn arb_token_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z-]{0,20}").unwrap()
}

fn arb_color() -> impl Strategy<Value = ColorToken> {
    (0u16..360, 0u8..=100, 0u8..=100).prop_map(|(h, s, l)| ColorToken::new(format!("{h} {s}% {l}%")))
}

/// Any bound value, including blank ones.
fn arb_bound_value() -> impl Strategy<Value = Option<ColorToken>> {
    prop_oneof![
        Just(None),
        Just(Some(ColorToken::new(""))),
        Just(Some(ColorToken::new("   "))),
        arb_color().prop_map(Some),
    ]
}

fn attached() -> (TokenSurface, ColorResolver) {
    let surface = TokenSurface::new();
    let resolver = ColorResolver::new(Rc::new(surface.clone()));
    (surface, resolver)
}

// ── 1-3. Fallback semantics ───────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn resolve_uses_surface_or_fallback(
        name in arb_token_name(),
        bound in arb_bound_value(),
        fallback in arb_color(),
    ) {
        let (surface, resolver) = attached();
        if let Some(value) = &bound {
            surface.set(&name, value.clone());
        }
        let resolved = resolver.resolve(&name, &fallback);

        match bound {
            Some(value) if !value.is_blank() => prop_assert_eq!(resolved.clone(), value),
            _ => prop_assert_eq!(resolved.clone(), fallback.clone()),
        }
        prop_assert!(!resolved.as_str().is_empty());
    }

    #[test]
    fn other_tokens_do_not_leak(
        name in arb_token_name(),
        other in arb_token_name(),
        value in arb_color(),
        fallback in arb_color(),
    ) {
        prop_assume!(name != other);
        let (surface, resolver) = attached();
        surface.set(&other, value);
        prop_assert_eq!(resolver.resolve(&name, &fallback), fallback);
    }
}

// ── 4. Detached resolver ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn detached_always_falls_back(name in arb_token_name(), fallback in arb_color()) {
        let resolver = ColorResolver::detached();
        prop_assert_eq!(resolver.resolve(&name, &fallback), fallback);
    }
}

// ── 5. Chain resolution ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn chain_never_blank(
        name in arb_token_name(),
        bound in arb_bound_value(),
        theme_value in arb_bound_value(),
        default in arb_color(),
    ) {
        let (surface, resolver) = attached();
        if let Some(value) = bound {
            surface.set(&name, value);
        }
        let resolved = resolver.resolve_chain(&name, theme_value.as_ref(), &default);
        prop_assert!(!resolved.is_blank());
    }
}
