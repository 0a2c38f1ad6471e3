#![forbid(unsafe_code)]

use crate::token::ColorToken;

/// Resting and highlighted colors for navigation buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThemeButtons {
    pub list: ColorToken,
    pub active: ColorToken,
}

/// A named bundle of emphasis colors.
///
/// When `accent` is set, highlighted siblings alternate between
/// `buttons.active` (even index) and `accent` (odd index).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Theme {
    pub name: String,
    pub buttons: ThemeButtons,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub accent: Option<ColorToken>,
}

impl Theme {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        list: impl Into<ColorToken>,
        active: impl Into<ColorToken>,
    ) -> Self {
        Self {
            name: name.into(),
            buttons: ThemeButtons {
                list: list.into(),
                active: active.into(),
            },
            accent: None,
        }
    }

    /// Add a second emphasis color for alternating highlights.
    #[must_use]
    pub fn with_accent(mut self, accent: impl Into<ColorToken>) -> Self {
        self.accent = Some(accent.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Emphasis color for the sibling at `index`.
    #[must_use]
    pub fn emphasis_for(&self, index: usize) -> &ColorToken {
        match &self.accent {
            Some(accent) if index % 2 == 1 => accent,
            _ => &self.buttons.active,
        }
    }
}
