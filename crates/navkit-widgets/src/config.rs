#![forbid(unsafe_code)]

//! Overlay configuration as data.
//!
//! Captures every tunable of the overlay as a single [`OverlayConfig`] that
//! can be loaded from TOML or JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! grid_columns = 3
//!
//! [timings]
//! close_delay_ms = 250
//! navigate_delay_ms = 200
//!
//! [fallbacks]
//! active = "25 95% 53%"
//! ```
//!
//! ```rust,ignore
//! let config = OverlayConfig::from_toml_file("navkit.toml")?;
//! let config = OverlayConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! Every field is optional. `OverlayConfig::default()` reproduces the stock
//! timings (400 ms container reveal, 50 ms stagger, 250/200 ms settle
//! delays), a two-column grid, and the built-in fallback colors.

use std::path::Path;
use std::time::Duration;

use navkit_style::ColorToken;
use navkit_style::token::{DEFAULT_ACTIVE, DEFAULT_LIST};
use serde::{Deserialize, Serialize};

use crate::popup::PopupTimings;

/// Neutral popup container background. Independent of the active theme.
pub const NEUTRAL_CONTAINER: &str = "0 0% 10%";

// ---------------------------------------------------------------------------
// Top-level OverlayConfig
// ---------------------------------------------------------------------------

/// Top-level overlay configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Popup animation and settle timings.
    pub timings: TimingsConfig,
    /// Columns in the popup grid. Default: 2.
    pub grid_columns: usize,
    /// Colors used when neither the surface nor the theme supplies one.
    pub fallbacks: FallbackColors,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            timings: TimingsConfig::default(),
            grid_columns: 2,
            fallbacks: FallbackColors::default(),
        }
    }
}

impl OverlayConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Load from a file, picking the format from its extension (`.json`
    /// means JSON, anything else TOML).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of problems. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.grid_columns == 0 {
            errors.push("grid_columns must be > 0".into());
        }

        let t = &self.timings;
        if t.close_delay_ms > t.backdrop_close_ms {
            errors.push(format!(
                "timings.close_delay_ms ({}) must not exceed timings.backdrop_close_ms ({})",
                t.close_delay_ms, t.backdrop_close_ms
            ));
        }
        if t.navigate_delay_ms > t.backdrop_close_ms {
            errors.push(format!(
                "timings.navigate_delay_ms ({}) must not exceed timings.backdrop_close_ms ({})",
                t.navigate_delay_ms, t.backdrop_close_ms
            ));
        }

        for (name, token) in [
            ("fallbacks.list", &self.fallbacks.list),
            ("fallbacks.active", &self.fallbacks.active),
            ("fallbacks.container", &self.fallbacks.container),
        ] {
            if token.is_blank() {
                errors.push(format!("{name} must not be empty"));
            }
        }

        errors
    }

    /// Reject the config if [`validate`](Self::validate) finds problems.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Popup timings as durations.
    #[must_use]
    pub fn popup_timings(&self) -> PopupTimings {
        self.timings.to_popup_timings()
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Popup timings in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingsConfig {
    /// Backdrop and container reveal. Default: 400.
    pub container_open_ms: u64,
    /// Delay between successive header/item reveals. Default: 50.
    pub stagger_step_ms: u64,
    /// Length of each header/item reveal. Default: 200.
    pub item_open_ms: u64,
    /// Delay between successive item dismissals. Default: 30.
    pub close_stagger_step_ms: u64,
    /// Length of each header/item dismissal. Default: 200.
    pub item_close_ms: u64,
    /// Backdrop fade-out. Default: 300.
    pub backdrop_close_ms: u64,
    /// Click to external close callback. Default: 250.
    pub close_delay_ms: u64,
    /// Item selection to navigation. Default: 200.
    pub navigate_delay_ms: u64,
}

impl Default for TimingsConfig {
    fn default() -> Self {
        Self::from(&PopupTimings::default())
    }
}

impl TimingsConfig {
    #[must_use]
    pub fn to_popup_timings(&self) -> PopupTimings {
        PopupTimings {
            container_open: Duration::from_millis(self.container_open_ms),
            stagger_step: Duration::from_millis(self.stagger_step_ms),
            item_open: Duration::from_millis(self.item_open_ms),
            close_stagger_step: Duration::from_millis(self.close_stagger_step_ms),
            item_close: Duration::from_millis(self.item_close_ms),
            backdrop_close: Duration::from_millis(self.backdrop_close_ms),
            close_delay: Duration::from_millis(self.close_delay_ms),
            navigate_delay: Duration::from_millis(self.navigate_delay_ms),
        }
    }
}

impl From<&PopupTimings> for TimingsConfig {
    fn from(t: &PopupTimings) -> Self {
        let ms = |d: Duration| d.as_millis() as u64;
        Self {
            container_open_ms: ms(t.container_open),
            stagger_step_ms: ms(t.stagger_step),
            item_open_ms: ms(t.item_open),
            close_stagger_step_ms: ms(t.close_stagger_step),
            item_close_ms: ms(t.item_close),
            backdrop_close_ms: ms(t.backdrop_close),
            close_delay_ms: ms(t.close_delay),
            navigate_delay_ms: ms(t.navigate_delay),
        }
    }
}

/// Last-resort colors for the bar and popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackColors {
    /// Resting bar button color.
    pub list: ColorToken,
    /// Highlight and glow color.
    pub active: ColorToken,
    /// Popup container background.
    pub container: ColorToken,
}

impl Default for FallbackColors {
    fn default() -> Self {
        Self {
            list: ColorToken::new(DEFAULT_LIST),
            active: ColorToken::new(DEFAULT_ACTIVE),
            container: ColorToken::new(NEUTRAL_CONTAINER),
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading an overlay configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    Toml(toml::de::Error),
    /// JSON parse error.
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
