#![forbid(unsafe_code)]

//! Preset palettes written straight to a [`StyleSurface`].
//!
//! A palette bypasses the theme store: it binds the bar button tokens and
//! the main background directly, which is how a host previews colors
//! without touching the saved selection. The next theme change rewrites
//! only `glow`/`primary`, so palette tokens stay in place until cleared.

use crate::surface::StyleSurface;
use crate::token::{
    BACKGROUND_MAIN, BUTTONS_ACTIVE, BUTTONS_LIST, ColorToken, DEFAULT_ACTIVE, DEFAULT_LIST,
};

/// One named set of surface overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TesterPalette {
    pub name: String,
    pub list: ColorToken,
    pub active: ColorToken,
    pub background: ColorToken,
}

impl TesterPalette {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        list: impl Into<ColorToken>,
        active: impl Into<ColorToken>,
        background: impl Into<ColorToken>,
    ) -> Self {
        Self {
            name: name.into(),
            list: list.into(),
            active: active.into(),
            background: background.into(),
        }
    }

    /// The built-in presets; the first is the default look.
    #[must_use]
    pub fn presets() -> Vec<Self> {
        [
            ("Orange (Default)", DEFAULT_ACTIVE, "0 0% 8%"),
            ("Blue", "210 100% 50%", "220 20% 10%"),
            ("Green", "142 76% 45%", "150 20% 8%"),
            ("Purple", "270 80% 60%", "270 20% 10%"),
            ("Red", "0 85% 55%", "0 20% 10%"),
            ("Pink", "330 85% 60%", "330 20% 10%"),
        ]
        .into_iter()
        .map(|(name, active, background)| Self::new(name, DEFAULT_LIST, active, background))
        .collect()
    }

    /// Preset named `name`, matched exactly.
    #[must_use]
    pub fn preset(name: &str) -> Option<Self> {
        Self::presets().into_iter().find(|p| p.name == name)
    }

    /// Bind the list, active and background tokens on `surface`.
    pub fn apply(&self, surface: &dyn StyleSurface) {
        surface.set(BUTTONS_LIST, self.list.clone());
        surface.set(BUTTONS_ACTIVE, self.active.clone());
        surface.set(BACKGROUND_MAIN, self.background.clone());
        tracing::debug!(palette = %self.name, "tester palette applied");
    }

    /// Unbind every token a palette writes. Returns how many were bound.
    pub fn clear(surface: &dyn StyleSurface) -> usize {
        [BUTTONS_LIST, BUTTONS_ACTIVE, BACKGROUND_MAIN]
            .into_iter()
            .filter_map(|token| surface.remove(token))
            .count()
    }
}
