#![forbid(unsafe_code)]

//! Process-wide key/value map of color tokens.
//!
//! The theme store writes derived tokens here; resolvers read them. Listeners
//! that do not hold a theme subscription can either subscribe to the surface
//! or poll [`StyleSurface::theme_generation`], which bumps on every
//! "theme changed" broadcast.

use std::collections::BTreeMap;

use navkit_core::{Observable, Subscription};

use crate::token::ColorToken;

/// Point-in-time view of a surface, handed to subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SurfaceSnapshot {
    pub tokens: BTreeMap<String, ColorToken>,
    /// Incremented on each theme broadcast.
    pub theme_generation: u64,
    /// Name carried by the most recent theme broadcast.
    pub last_theme: Option<String>,
}

impl SurfaceSnapshot {
    #[must_use]
    pub fn get(&self, token: &str) -> Option<&ColorToken> {
        self.tokens.get(token)
    }
}

/// Typed access to a shared token map.
///
/// Methods take `&self`: implementations are shared handles with interior
/// mutability, used from a single thread.
pub trait StyleSurface {
    /// Current value bound to `token`.
    fn get(&self, token: &str) -> Option<ColorToken>;

    /// Bind `token` to `value`.
    fn set(&self, token: &str, value: ColorToken);

    /// Unbind `token`, returning the previous value.
    fn remove(&self, token: &str) -> Option<ColorToken>;

    /// Observe every change (token writes and theme broadcasts).
    fn subscribe(&self, callback: Box<dyn Fn(&SurfaceSnapshot)>) -> Subscription;

    /// Announce that the theme named `theme` became active.
    fn broadcast_theme_changed(&self, theme: &str);

    /// Number of theme broadcasts so far.
    fn theme_generation(&self) -> u64;
}

/// In-memory [`StyleSurface`]. Clones share state.
#[derive(Debug, Clone)]
pub struct TokenSurface {
    state: Observable<SurfaceSnapshot>,
}

impl Default for TokenSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenSurface {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Observable::new(SurfaceSnapshot::default()),
        }
    }

    /// Copy of the full state.
    #[must_use]
    pub fn snapshot(&self) -> SurfaceSnapshot {
        self.state.get()
    }

    /// Number of bound tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.with(|s| s.tokens.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StyleSurface for TokenSurface {
    fn get(&self, token: &str) -> Option<ColorToken> {
        self.state.with(|s| s.tokens.get(token).cloned())
    }

    fn set(&self, token: &str, value: ColorToken) {
        let changed = self.state.update(|s| {
            s.tokens.insert(token.to_owned(), value);
        });
        if changed {
            tracing::trace!(token, "surface token set");
        }
    }

    fn remove(&self, token: &str) -> Option<ColorToken> {
        let mut previous = None;
        self.state.update(|s| previous = s.tokens.remove(token));
        previous
    }

    fn subscribe(&self, callback: Box<dyn Fn(&SurfaceSnapshot)>) -> Subscription {
        self.state.subscribe(move |snapshot| callback(snapshot))
    }

    fn broadcast_theme_changed(&self, theme: &str) {
        self.state.update(|s| {
            s.theme_generation += 1;
            s.last_theme = Some(theme.to_owned());
        });
        tracing::debug!(theme, "theme change broadcast");
    }

    fn theme_generation(&self) -> u64 {
        self.state.with(|s| s.theme_generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn get_set_remove() {
        let surface = TokenSurface::new();
        assert_eq!(surface.get("glow"), None);
        surface.set("glow", ColorToken::new("1 2% 3%"));
        assert_eq!(surface.get("glow"), Some(ColorToken::new("1 2% 3%")));
        assert_eq!(surface.remove("glow"), Some(ColorToken::new("1 2% 3%")));
        assert_eq!(surface.remove("glow"), None);
        assert!(surface.is_empty());
    }

    #[test]
    fn clones_share_tokens() {
        let a = TokenSurface::new();
        let b = a.clone();
        a.set("primary", ColorToken::new("x"));
        assert_eq!(b.get("primary"), Some(ColorToken::new("x")));
    }

    #[test]
    fn broadcast_bumps_generation_even_for_same_theme() {
        let surface = TokenSurface::new();
        surface.broadcast_theme_changed("Ocean");
        surface.broadcast_theme_changed("Ocean");
        assert_eq!(surface.theme_generation(), 2);
        assert_eq!(surface.snapshot().last_theme.as_deref(), Some("Ocean"));
    }

    #[test]
    fn subscribers_see_writes_and_broadcasts() {
        let surface = TokenSurface::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = surface.subscribe(Box::new(move |snap: &SurfaceSnapshot| {
            sink.borrow_mut()
                .push((snap.get("glow").cloned(), snap.theme_generation));
        }));

        surface.set("glow", ColorToken::new("g"));
        // Rewriting the same value is not a change.
        surface.set("glow", ColorToken::new("g"));
        surface.broadcast_theme_changed("Neon");

        assert_eq!(
            *seen.borrow(),
            vec![
                (Some(ColorToken::new("g")), 0),
                (Some(ColorToken::new("g")), 1),
            ]
        );
    }
}
