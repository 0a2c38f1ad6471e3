#![forbid(unsafe_code)]

use std::fmt;
use std::io;

/// Errors from the theme store and its provider context.
#[derive(Debug)]
pub enum ThemeError {
    /// A store was requested before one was provided (or after teardown).
    NotInitialized,
    /// No theme with this name exists in the catalog.
    UnknownTheme(String),
    /// Persisting the selection failed; the selection stays dirty.
    Storage(io::Error),
}

impl ThemeError {
    /// Whether this error points at wiring mistakes rather than runtime
    /// conditions.
    #[must_use]
    pub fn is_integration_bug(&self) -> bool {
        matches!(self, Self::NotInitialized)
    }
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "theme store accessed outside of a provider"),
            Self::UnknownTheme(name) => write!(f, "unknown theme: {name}"),
            Self::Storage(err) => write!(f, "theme storage: {err}"),
        }
    }
}

impl std::error::Error for ThemeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ThemeError {
    fn from(err: io::Error) -> Self {
        Self::Storage(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display_messages() {
        assert_eq!(
            ThemeError::NotInitialized.to_string(),
            "theme store accessed outside of a provider"
        );
        assert_eq!(
            ThemeError::UnknownTheme("Nope".into()).to_string(),
            "unknown theme: Nope"
        );
    }

    #[test]
    fn storage_error_has_source() {
        let err = ThemeError::from(io::Error::new(io::ErrorKind::PermissionDenied, "ro"));
        assert!(err.source().is_some());
        assert!(!err.is_integration_bug());
        assert!(ThemeError::NotInitialized.is_integration_bug());
    }
}
