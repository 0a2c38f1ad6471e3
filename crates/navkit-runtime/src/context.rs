#![forbid(unsafe_code)]

//! Explicit provider slot for the theme store.
//!
//! Components that need the store ask the context for it instead of reaching
//! for a global. Asking before a store is provided is a wiring mistake and
//! returns [`ThemeError::NotInitialized`] rather than a silent default.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ThemeError;
use crate::theme_store::ThemeStore;

/// Shared slot holding at most one [`ThemeStore`]. Clones share the slot.
#[derive(Debug, Clone, Default)]
pub struct ThemeContext {
    slot: Rc<RefCell<Option<ThemeStore>>>,
}

impl ThemeContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `store`, returning the one it replaced.
    pub fn provide(&self, store: ThemeStore) -> Option<ThemeStore> {
        tracing::debug!(theme = %store.current_name(), "theme store provided");
        self.slot.borrow_mut().replace(store)
    }

    /// Handle to the provided store.
    pub fn store(&self) -> Result<ThemeStore, ThemeError> {
        self.slot.borrow().clone().ok_or(ThemeError::NotInitialized)
    }

    #[must_use]
    pub fn is_provided(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Remove the store. Later reads fail with `NotInitialized`.
    pub fn teardown(&self) -> Option<ThemeStore> {
        let previous = self.slot.borrow_mut().take();
        if previous.is_some() {
            tracing::debug!("theme store torn down");
        }
        previous
    }
}
