#![forbid(unsafe_code)]

//! The active theme, its saved counterpart, and change propagation.
//!
//! # Invariants
//!
//! 1. `is_dirty() == (current().name != saved_name())`. A store that found no
//!    usable persisted name has no saved name, so it starts dirty.
//! 2. Every theme change (and construction) writes [`GLOW`] and [`PRIMARY`]
//!    to the attached style surface and emits one theme broadcast, before
//!    any user subscriber runs.
//! 3. Subscribers are notified synchronously, in registration order, on
//!    every [`ThemeStore::set_theme`], including one that re-applies the
//!    active theme.
//! 4. Storage is written only by [`ThemeStore::save_theme`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use navkit_core::{Observable, Subscription};
use navkit_style::token::{GLOW, PRIMARY};
use navkit_style::{StyleSurface, Theme, ThemeCatalog};

use crate::error::ThemeError;
use crate::persistence::{MemoryStorage, THEME_KEY, ThemeStorage};

/// Snapshot of the store's selection state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSelection {
    pub current: Theme,
    pub saved_name: Option<String>,
    pub is_dirty: bool,
}

struct StoreInner {
    catalog: ThemeCatalog,
    current: Observable<Theme>,
    saved_name: RefCell<Option<String>>,
    storage: Rc<dyn ThemeStorage>,
    /// Keeps the surface-sync callback alive for the store's lifetime.
    _surface_sync: Option<Subscription>,
}

/// Shared handle to the active theme. Clones share state.
#[derive(Clone)]
pub struct ThemeStore {
    inner: Rc<StoreInner>,
}

impl fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeStore")
            .field("current", &self.inner.current.with(|t| t.name.clone()))
            .field("saved_name", &self.inner.saved_name.borrow())
            .field("subscribers", &self.inner.current.subscriber_count())
            .finish()
    }
}

impl ThemeStore {
    /// Store over `catalog`, restoring the saved selection from `storage`.
    #[must_use]
    pub fn new(catalog: ThemeCatalog, storage: Rc<dyn ThemeStorage>) -> Self {
        Self::build(catalog, storage, None)
    }

    /// Like [`new`](Self::new), additionally mirroring theme colors onto
    /// `surface`.
    #[must_use]
    pub fn with_surface(
        catalog: ThemeCatalog,
        storage: Rc<dyn ThemeStorage>,
        surface: Rc<dyn StyleSurface>,
    ) -> Self {
        Self::build(catalog, storage, Some(surface))
    }

    /// Built-in catalog, empty in-memory storage, no surface.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(ThemeCatalog::builtin(), Rc::new(MemoryStorage::new()))
    }

    fn build(
        catalog: ThemeCatalog,
        storage: Rc<dyn ThemeStorage>,
        surface: Option<Rc<dyn StyleSurface>>,
    ) -> Self {
        let persisted = storage.get(THEME_KEY);
        let restored = persisted
            .as_deref()
            .and_then(|name| catalog.find(name))
            .cloned();
        let (initial, saved_name) = match restored {
            Some(theme) => {
                let name = theme.name.clone();
                (theme, Some(name))
            }
            None => {
                if let Some(name) = &persisted {
                    tracing::debug!(theme = %name, "persisted theme not in catalog, using first");
                }
                (catalog.first().clone(), None)
            }
        };
        tracing::debug!(
            theme = %initial.name,
            restored = saved_name.is_some(),
            "theme store initialized"
        );

        let current = Observable::new(initial);
        let surface_sync = surface.map(|surface| {
            current.with(|theme| apply_to_surface(surface.as_ref(), theme));
            current.subscribe(move |theme: &Theme| apply_to_surface(surface.as_ref(), theme))
        });

        Self {
            inner: Rc::new(StoreInner {
                catalog,
                current,
                saved_name: RefCell::new(saved_name),
                storage,
                _surface_sync: surface_sync,
            }),
        }
    }

    /// The active theme.
    #[must_use]
    pub fn current(&self) -> Theme {
        self.inner.current.get()
    }

    /// Name of the active theme, without cloning the theme.
    #[must_use]
    pub fn current_name(&self) -> String {
        self.inner.current.with(|t| t.name.clone())
    }

    /// Make `theme` active and notify subscribers. Re-applying the active
    /// theme still notifies, so the surface can be repaired after an
    /// outside write. Storage is untouched.
    pub fn set_theme(&self, theme: Theme) {
        let from = self.current_name();
        let to = theme.name.clone();
        let _span = tracing::debug_span!(
            "theme.propagate",
            subscribers = self.inner.current.subscriber_count()
        )
        .entered();
        if self.inner.current.set(theme) {
            tracing::debug!(from = %from, to = %to, dirty = self.is_dirty(), "theme changed");
        } else {
            self.inner.current.notify();
            tracing::debug!(theme = %to, "theme reapplied");
        }
    }

    /// Look `name` up in the catalog and make it active.
    pub fn select(&self, name: &str) -> Result<Theme, ThemeError> {
        let theme = self
            .inner
            .catalog
            .find(name)
            .cloned()
            .ok_or_else(|| ThemeError::UnknownTheme(name.to_owned()))?;
        self.set_theme(theme.clone());
        Ok(theme)
    }

    /// Persist the active theme's name. A no-op when nothing changed since
    /// the last save.
    pub fn save_theme(&self) -> Result<(), ThemeError> {
        if !self.is_dirty() {
            tracing::trace!("save skipped, selection clean");
            return Ok(());
        }
        let name = self.current_name();
        if let Err(err) = self.inner.storage.set(THEME_KEY, &name) {
            tracing::warn!(theme = %name, error = %err, "failed to persist theme");
            return Err(ThemeError::Storage(err));
        }
        *self.inner.saved_name.borrow_mut() = Some(name.clone());
        tracing::debug!(theme = %name, "theme saved");
        Ok(())
    }

    /// Whether the active theme differs from the saved one.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        let saved = self.inner.saved_name.borrow();
        self.inner
            .current
            .with(|t| saved.as_deref() != Some(t.name.as_str()))
    }

    #[must_use]
    pub fn saved_name(&self) -> Option<String> {
        self.inner.saved_name.borrow().clone()
    }

    #[must_use]
    pub fn selection(&self) -> ThemeSelection {
        ThemeSelection {
            current: self.current(),
            saved_name: self.saved_name(),
            is_dirty: self.is_dirty(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &ThemeCatalog {
        &self.inner.catalog
    }

    /// Observe theme changes. The callback does not see the current value.
    pub fn subscribe(&self, callback: impl Fn(&Theme) + 'static) -> ThemeSubscription {
        ThemeSubscription {
            inner: self.inner.current.subscribe(callback),
        }
    }
}

fn apply_to_surface(surface: &dyn StyleSurface, theme: &Theme) {
    surface.set(GLOW, theme.buttons.active.clone());
    surface.set(PRIMARY, theme.buttons.active.clone());
    surface.broadcast_theme_changed(&theme.name);
}

/// Guard for a [`ThemeStore::subscribe`] callback.
///
/// Dropping the guard detaches the callback.
#[derive(Debug)]
pub struct ThemeSubscription {
    inner: Subscription,
}

impl ThemeSubscription {
    /// Detach the callback. Calling it again does nothing.
    pub fn unsubscribe(&mut self) {
        self.inner.unsubscribe();
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.inner.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navkit_style::TokenSurface;
    use std::cell::Cell;
    use tracing_test::traced_test;

    fn store_with_surface(storage: MemoryStorage) -> (ThemeStore, TokenSurface) {
        let surface = TokenSurface::new();
        let store = ThemeStore::with_surface(
            ThemeCatalog::builtin(),
            Rc::new(storage),
            Rc::new(surface.clone()),
        );
        (store, surface)
    }

    #[test]
    fn fresh_store_starts_on_first_theme_and_dirty() {
        let store = ThemeStore::in_memory();
        assert_eq!(store.current().name, "Harvest");
        assert_eq!(store.saved_name(), None);
        assert!(store.is_dirty());
    }

    #[test]
    fn restores_persisted_theme_clean() {
        let store = ThemeStore::new(
            ThemeCatalog::builtin(),
            Rc::new(MemoryStorage::with_theme("Neon")),
        );
        assert_eq!(store.current().name, "Neon");
        assert_eq!(store.saved_name().as_deref(), Some("Neon"));
        assert!(!store.is_dirty());
    }

    #[test]
    fn unknown_persisted_name_falls_back() {
        let store = ThemeStore::new(
            ThemeCatalog::builtin(),
            Rc::new(MemoryStorage::with_theme("Vaporwave")),
        );
        assert_eq!(store.current().name, "Harvest");
        assert_eq!(store.saved_name(), None);
    }

    #[test]
    fn set_theme_marks_dirty_until_saved() {
        let storage = MemoryStorage::with_theme("Ocean");
        let store = ThemeStore::new(ThemeCatalog::builtin(), Rc::new(storage.clone()));
        store.select("Forest").unwrap();
        assert!(store.is_dirty());
        assert_eq!(storage.get(THEME_KEY).as_deref(), Some("Ocean"));

        store.save_theme().unwrap();
        assert!(!store.is_dirty());
        assert_eq!(storage.get(THEME_KEY).as_deref(), Some("Forest"));

        // Switching back to the saved theme is clean again.
        store.select("Ocean").unwrap();
        store.select("Forest").unwrap();
        assert!(!store.is_dirty());
    }

    #[test]
    fn select_unknown_theme_errors() {
        let store = ThemeStore::in_memory();
        let err = store.select("Nope").unwrap_err();
        assert!(matches!(err, ThemeError::UnknownTheme(name) if name == "Nope"));
        assert_eq!(store.current().name, "Harvest");
    }

    #[test]
    fn subscribers_see_changes_in_order() {
        let store = ThemeStore::in_memory();
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = Rc::clone(&log);
        let b = Rc::clone(&log);
        let _s1 = store.subscribe(move |t| a.borrow_mut().push(format!("a:{}", t.name)));
        let _s2 = store.subscribe(move |t| b.borrow_mut().push(format!("b:{}", t.name)));

        store.select("Ruby").unwrap();
        store.select("Ruby").unwrap();
        assert_eq!(*log.borrow(), vec!["a:Ruby", "b:Ruby", "a:Ruby", "b:Ruby"]);
    }

    #[test]
    fn reapplying_current_theme_notifies_once_and_stays_clean() {
        let (store, surface) = store_with_surface(MemoryStorage::with_theme("Ocean"));
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let _sub = store.subscribe(move |_| h.set(h.get() + 1));
        assert_eq!(surface.theme_generation(), 1);

        // Clobber the glow token from outside, then re-apply.
        surface.set(GLOW, navkit_style::ColorToken::new("0 0% 0%"));
        store.set_theme(store.current());

        assert_eq!(hits.get(), 1);
        assert_eq!(surface.theme_generation(), 2);
        assert_eq!(surface.get(GLOW).unwrap().as_str(), "200 80% 55%");
        assert!(!store.is_dirty());
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let store = ThemeStore::in_memory();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let mut sub = store.subscribe(move |_| h.set(h.get() + 1));
        store.select("Mint").unwrap();
        sub.unsubscribe();
        sub.unsubscribe();
        assert!(!sub.is_active());
        store.select("Gold").unwrap();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn surface_tracks_every_change_including_init() {
        let (store, surface) = store_with_surface(MemoryStorage::new());
        assert_eq!(surface.get(GLOW).unwrap().as_str(), "25 95% 53%");
        assert_eq!(surface.get(PRIMARY).unwrap().as_str(), "25 95% 53%");
        assert_eq!(surface.theme_generation(), 1);

        store.select("Ocean").unwrap();
        assert_eq!(surface.get(GLOW).unwrap().as_str(), "200 80% 55%");
        assert_eq!(surface.get(PRIMARY).unwrap().as_str(), "200 80% 55%");
        assert_eq!(surface.theme_generation(), 2);
        assert_eq!(surface.snapshot().last_theme.as_deref(), Some("Ocean"));
    }

    #[test]
    fn surface_is_synced_before_user_subscribers() {
        let (store, surface) = store_with_surface(MemoryStorage::new());
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        let reader = surface.clone();
        let _sub = store.subscribe(move |_| *sink.borrow_mut() = reader.get(GLOW));
        store.select("Lime").unwrap();
        assert_eq!(seen.borrow().as_ref().map(|t| t.as_str()), Some("80 70% 50%"));
    }

    #[test]
    fn clean_save_is_a_no_op() {
        let storage = MemoryStorage::with_theme("Teal");
        let store = ThemeStore::new(ThemeCatalog::builtin(), Rc::new(storage.clone()));
        // Overwrite behind the store's back; a clean save must not touch it.
        storage.set(THEME_KEY, "External").unwrap();
        store.save_theme().unwrap();
        assert_eq!(storage.get(THEME_KEY).as_deref(), Some("External"));
    }

    #[test]
    fn selection_snapshot() {
        let store = ThemeStore::in_memory();
        store.select("Sky").unwrap();
        store.save_theme().unwrap();
        let selection = store.selection();
        assert_eq!(selection.current.name, "Sky");
        assert_eq!(selection.saved_name.as_deref(), Some("Sky"));
        assert!(!selection.is_dirty);
    }

    #[test]
    #[traced_test]
    fn theme_change_is_logged_with_fields() {
        let store = ThemeStore::in_memory();
        store.select("Crimson").unwrap();
        assert!(logs_contain("theme changed"));
        assert!(logs_contain("to=Crimson"));
        assert!(logs_contain("theme.propagate"));
        store.select("Crimson").unwrap();
        assert!(logs_contain("theme reapplied"));
    }
}
