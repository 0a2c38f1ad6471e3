#![forbid(unsafe_code)]

//! Ordered, validated list of themes.
//!
//! The first theme is the fallback: a theme store with no usable persisted
//! selection starts on it.

use std::collections::HashSet;
use std::fmt;

use crate::theme::Theme;

/// Why a theme list was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog has no themes, so there is nothing to fall back to.
    Empty,
    /// Two themes share a name.
    DuplicateName(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "theme catalog is empty"),
            Self::DuplicateName(name) => write!(f, "duplicate theme name: {name}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Non-empty list of uniquely named themes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeCatalog {
    themes: Vec<Theme>,
}

impl ThemeCatalog {
    /// Validate and wrap `themes`.
    pub fn new(themes: Vec<Theme>) -> Result<Self, CatalogError> {
        if themes.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::with_capacity(themes.len());
        for theme in &themes {
            if !seen.insert(theme.name.as_str()) {
                return Err(CatalogError::DuplicateName(theme.name.clone()));
            }
        }
        Ok(Self { themes })
    }

    /// The 23 stock themes, Harvest first.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            themes: vec![
                Theme::new("Harvest", "0 0% 60%", "25 95% 53%"),
                Theme::new("Ocean", "200 15% 50%", "200 80% 55%"),
                Theme::new("Forest", "120 10% 45%", "145 65% 45%"),
                Theme::new("Sunset", "0 0% 60%", "350 85% 55%").with_accent("35 95% 55%"),
                Theme::new("Purple", "270 15% 50%", "270 70% 60%"),
                Theme::new("Neon", "180 20% 40%", "175 100% 50%").with_accent("320 100% 60%"),
                Theme::new("Gold", "40 15% 45%", "45 90% 50%"),
                Theme::new("Rose", "0 10% 55%", "340 75% 60%"),
                Theme::new("Coral", "15 20% 50%", "16 85% 60%"),
                Theme::new("Lavender", "260 15% 55%", "260 60% 70%"),
                Theme::new("Mint", "150 15% 45%", "160 50% 55%"),
                Theme::new("Ruby", "0 15% 45%", "0 75% 50%").with_accent("330 80% 55%"),
                Theme::new("Sapphire", "220 20% 45%", "220 80% 55%").with_accent("260 70% 60%"),
                Theme::new("Emerald", "140 15% 40%", "140 70% 45%"),
                Theme::new("Amber", "30 20% 45%", "38 95% 50%").with_accent("15 90% 55%"),
                Theme::new("Teal", "180 15% 40%", "180 70% 45%").with_accent("200 75% 50%"),
                Theme::new("Crimson", "350 15% 45%", "350 80% 50%").with_accent("20 90% 55%"),
                Theme::new("Indigo", "240 20% 45%", "240 70% 55%").with_accent("280 65% 60%"),
                Theme::new("Lime", "80 15% 40%", "80 70% 50%").with_accent("120 60% 45%"),
                Theme::new("Magenta", "300 15% 45%", "300 75% 55%").with_accent("330 80% 60%"),
                Theme::new("Sky", "190 15% 50%", "195 85% 55%").with_accent("210 80% 60%"),
                Theme::new("Peach", "20 20% 55%", "25 80% 65%").with_accent("350 70% 60%"),
                Theme::new("Slate", "210 10% 50%", "210 40% 60%"),
            ],
        }
    }

    /// The fallback theme.
    #[must_use]
    pub fn first(&self) -> &Theme {
        // Non-empty by construction.
        &self.themes[0]
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.name == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Theme> {
        self.themes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Theme> {
        self.themes.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.iter().map(|t| t.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> IntoIterator for &'a ThemeCatalog {
    type Item = &'a Theme;
    type IntoIter = std::slice::Iter<'a, Theme>;

    fn into_iter(self) -> Self::IntoIter {
        self.themes.iter()
    }
}
