#![forbid(unsafe_code)]

//! Persistence backends for the saved theme name.
//!
//! The theme store keeps exactly one key, [`THEME_KEY`], whose value is the
//! plain theme name. Backends are string key/value maps.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "entries": {
//!     "selectedTheme": "Ocean"
//!   }
//! }
//! ```
//!
//! # Failure Modes
//!
//! - **Missing file**: treated as empty.
//! - **Corrupt file or unknown version**: treated as empty and logged at
//!   `warn`; the next write replaces it.
//! - **Unreadable file**: reads as empty; a write fails instead of replacing
//!   entries it could not see.
//! - **Write failure**: surfaced as `io::Error` so the caller can keep its
//!   dirty state.
//!
//! Writes use a temp-file-then-rename pattern to prevent corruption on crash.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Key under which the saved theme name is stored.
pub const THEME_KEY: &str = "selectedTheme";

/// Current file format version.
const FORMAT_VERSION: u64 = 1;

/// String key/value storage for persisted selections.
pub trait ThemeStorage {
    /// Value stored under `key`. Unreadable storage reads as absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`.
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
}

/// In-memory storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with a saved theme name.
    #[must_use]
    pub fn with_theme(name: &str) -> Self {
        let storage = Self::new();
        storage
            .entries
            .borrow_mut()
            .insert(THEME_KEY.to_owned(), name.to_owned());
        storage
    }
}

impl ThemeStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StorageFile {
    version: u64,
    entries: BTreeMap<String, String>,
}

/// JSON file storage.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> io::Result<BTreeMap<String, String>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(err),
        };
        let file: StorageFile = serde_json::from_str(&contents).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("failed to parse theme state file: {e}"),
            )
        })?;
        if file.version != FORMAT_VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "unsupported theme state file version: {} (expected {FORMAT_VERSION})",
                    file.version
                ),
            ));
        }
        Ok(file.entries)
    }

    fn load_lenient(&self) -> BTreeMap<String, String> {
        self.load().unwrap_or_else(|err| {
            tracing::warn!(path = %self.path.display(), error = %err, "ignoring unreadable theme state");
            BTreeMap::new()
        })
    }

    /// Entries to merge a write into. Bad contents are dropped; a failed
    /// read is returned so the write does not clobber the file.
    fn load_for_write(&self) -> io::Result<BTreeMap<String, String>> {
        match self.load() {
            Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                tracing::warn!(path = %self.path.display(), error = %err, "replacing unreadable theme state");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }
}

impl ThemeStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.load_lenient().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut entries = self.load_for_write()?;
        entries.insert(key.to_owned(), value.to_owned());
        let file = StorageFile {
            version: FORMAT_VERSION,
            entries,
        };
        let json = serde_json::to_string_pretty(&file).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("failed to serialize theme state: {e}"),
            )
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        // Atomic write: temp file then rename
        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, json)?;
        std::fs::rename(&temp, &self.path)?;
        tracing::debug!(path = %self.path.display(), key, "theme state written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn memory_clones_share_entries() {
        let a = MemoryStorage::new();
        let b = a.clone();
        a.set(THEME_KEY, "Ocean").unwrap();
        assert_eq!(b.get(THEME_KEY).as_deref(), Some("Ocean"));
        assert_eq!(MemoryStorage::with_theme("Neon").get(THEME_KEY).as_deref(), Some("Neon"));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("theme.json"));
        assert_eq!(storage.get(THEME_KEY), None);

        storage.set(THEME_KEY, "Sapphire").unwrap();
        assert_eq!(storage.get(THEME_KEY).as_deref(), Some("Sapphire"));

        storage.set(THEME_KEY, "Slate").unwrap();
        let reopened = FileStorage::new(storage.path());
        assert_eq!(reopened.get(THEME_KEY).as_deref(), Some("Slate"));
    }

    #[test]
    fn file_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("theme.json"));
        storage.set("other", "value").unwrap();
        storage.set(THEME_KEY, "Mint").unwrap();
        assert_eq!(storage.get("other").as_deref(), Some("value"));
    }

    #[test]
    fn creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested/state/theme.json"));
        storage.set(THEME_KEY, "Gold").unwrap();
        assert_eq!(storage.get(THEME_KEY).as_deref(), Some("Gold"));
        assert!(!storage.path().with_extension("json.tmp").exists());
    }

    #[test]
    #[traced_test]
    fn corrupt_file_reads_as_empty_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.json");
        std::fs::write(&path, "{ not json").unwrap();
        let storage = FileStorage::new(&path);
        assert_eq!(storage.get(THEME_KEY), None);
        assert!(logs_contain("ignoring unreadable theme state"));

        // A write replaces the corrupt file.
        storage.set(THEME_KEY, "Rose").unwrap();
        assert_eq!(storage.get(THEME_KEY).as_deref(), Some("Rose"));
    }

    #[test]
    #[traced_test]
    fn version_mismatch_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.json");
        std::fs::write(&path, r#"{"version":99,"entries":{"selectedTheme":"Ocean"}}"#).unwrap();
        assert_eq!(FileStorage::new(&path).get(THEME_KEY), None);
        assert!(logs_contain("unsupported theme state file version"));
    }

    #[test]
    fn read_failure_blocks_the_write() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be: reading fails, but not with
        // NotFound or InvalidData.
        let path = dir.path().join("theme.json");
        std::fs::create_dir(&path).unwrap();
        let storage = FileStorage::new(&path);

        assert_eq!(storage.get(THEME_KEY), None);
        let err = storage.set(THEME_KEY, "Ocean").unwrap_err();
        assert_ne!(err.kind(), io::ErrorKind::InvalidData);
        assert!(path.is_dir());
        assert!(!path.with_extension("json.tmp").exists());
    }
}
