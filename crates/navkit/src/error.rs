#![forbid(unsafe_code)]

//! navkit error model.
//!
//! Every domain crate keeps its own typed error. [`Error`] wraps them for
//! applications that want one `?`-friendly type, and [`Error::severity`]
//! says how the host should react: keep going with a fallback, treat the
//! error as a wiring bug, or surface an I/O problem.

use std::fmt;

use navkit_runtime::ThemeError;
use navkit_style::CatalogError;
use navkit_widgets::{ConfigError, MenuCatalogError};

/// Top-level error type for navkit apps.
#[derive(Debug)]
pub enum Error {
    /// Theme store, provider, or persistence failure.
    Theme(ThemeError),
    /// Invalid theme catalog.
    Catalog(CatalogError),
    /// Invalid menu catalog.
    Menu(MenuCatalogError),
    /// Configuration could not be loaded or failed validation.
    Config(ConfigError),
    /// Raw I/O error (convenience variant for `?` on io::Result).
    Io(std::io::Error),
}

/// Standard result type for navkit APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// How a host should treat an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Continue with defaults (first theme, stock config).
    Fallback,
    /// The overlay was wired incorrectly. Fix the integration.
    IntegrationBug,
    /// Storage or filesystem failure. The in-memory state is still usable.
    Io,
}

impl Error {
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::Theme(ThemeError::NotInitialized) => Severity::IntegrationBug,
            Self::Theme(ThemeError::UnknownTheme(_)) => Severity::Fallback,
            Self::Theme(ThemeError::Storage(_)) => Severity::Io,

            Self::Catalog(_) | Self::Menu(_) => Severity::IntegrationBug,

            Self::Config(ConfigError::Io(_)) => Severity::Io,
            Self::Config(_) => Severity::Fallback,

            Self::Io(_) => Severity::Io,
        }
    }

    /// Error type label for tracing fields.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Theme(_) => "theme",
            Self::Catalog(_) => "catalog",
            Self::Menu(_) => "menu",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Theme(err) => write!(f, "{err}"),
            Self::Catalog(err) => write!(f, "{err}"),
            Self::Menu(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "config: {err}"),
            Self::Io(err) => write!(f, "I/O: {err}"),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fallback => write!(f, "fallback"),
            Self::IntegrationBug => write!(f, "integration_bug"),
            Self::Io => write!(f, "io"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Theme(err) => Some(err),
            Self::Catalog(err) => Some(err),
            Self::Menu(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<ThemeError> for Error {
    fn from(err: ThemeError) -> Self {
        Self::Theme(err)
    }
}

impl From<CatalogError> for Error {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

impl From<MenuCatalogError> for Error {
    fn from(err: MenuCatalogError) -> Self {
        Self::Menu(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
