#![forbid(unsafe_code)]

//! Token lookup with deterministic fallback.
//!
//! Missing configuration is never an error here: an absent surface, an
//! unbound token, or a blank value all resolve to the caller's fallback.

use std::fmt;
use std::rc::Rc;

use crate::surface::StyleSurface;
use crate::token::ColorToken;

/// Reads color tokens from an optional [`StyleSurface`].
#[derive(Clone, Default)]
pub struct ColorResolver {
    surface: Option<Rc<dyn StyleSurface>>,
}

impl fmt::Debug for ColorResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorResolver")
            .field("attached", &self.is_attached())
            .finish()
    }
}

impl ColorResolver {
    /// Resolver reading from `surface`.
    #[must_use]
    pub fn new(surface: Rc<dyn StyleSurface>) -> Self {
        Self {
            surface: Some(surface),
        }
    }

    /// Resolver with no surface; every lookup returns its fallback.
    #[must_use]
    pub fn detached() -> Self {
        Self { surface: None }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    /// Live surface value for `token`, or `fallback` when it is unbound,
    /// blank, or no surface is attached.
    #[must_use]
    pub fn resolve(&self, token: &str, fallback: &ColorToken) -> ColorToken {
        self.lookup(token).unwrap_or_else(|| {
            tracing::trace!(token, fallback = %fallback, "token unset, using fallback");
            fallback.clone()
        })
    }

    /// Surface value, then `theme_value`, then `default`.
    ///
    /// Blank values at any level are skipped.
    #[must_use]
    pub fn resolve_chain(
        &self,
        token: &str,
        theme_value: Option<&ColorToken>,
        default: &ColorToken,
    ) -> ColorToken {
        if let Some(value) = self.lookup(token) {
            return value;
        }
        match theme_value {
            Some(value) if !value.is_blank() => value.clone(),
            _ => default.clone(),
        }
    }

    fn lookup(&self, token: &str) -> Option<ColorToken> {
        self.surface
            .as_ref()?
            .get(token)
            .filter(|value| !value.is_blank())
    }
}
