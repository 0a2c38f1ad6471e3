#![forbid(unsafe_code)]

use std::fmt;

/// Surface key mirrored from the active theme's emphasis color for glows.
pub const GLOW: &str = "glow";
/// Surface key mirrored from the active theme's emphasis color.
pub const PRIMARY: &str = "primary";
/// Surface key for the resting color of bar buttons.
pub const BUTTONS_LIST: &str = "colors-buttons-list";
/// Surface key for the highlighted color of bar buttons.
pub const BUTTONS_ACTIVE: &str = "colors-buttons-active";
/// Surface key for the page background behind the overlay.
pub const BACKGROUND_MAIN: &str = "colors-background-main";

/// Built-in resting color used when neither surface nor theme supplies one.
pub const DEFAULT_LIST: &str = "0 0% 60%";
/// Built-in emphasis color used when neither surface nor theme supplies one.
pub const DEFAULT_ACTIVE: &str = "25 95% 53%";

/// An opaque color value in an HSL-like encoding (`"25 95% 53%"`).
///
/// The string is passed through to the renderer untouched; nothing in
/// navkit parses or validates it. A blank token is treated as "unset" by
/// [`ColorResolver`](crate::ColorResolver).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ColorToken(String);

impl ColorToken {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the token is empty or whitespace only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// The built-in resting color.
    #[must_use]
    pub fn default_list() -> Self {
        Self::new(DEFAULT_LIST)
    }

    /// The built-in emphasis color.
    #[must_use]
    pub fn default_active() -> Self {
        Self::new(DEFAULT_ACTIVE)
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ColorToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColorToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ColorToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}
