#![forbid(unsafe_code)]

//! Routing capabilities consumed by the overlay.
//!
//! Route resolution lives outside navkit. Widgets only need to request a
//! path change ([`Navigator`]) and read the current path ([`Location`]).

use std::cell::RefCell;
use std::rc::Rc;

/// Fire-and-forget route change.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// Synchronous read of the active route. Re-read on every view.
pub trait Location {
    fn current_path(&self) -> String;
}

#[derive(Debug)]
struct RouterState {
    path: String,
    history: Vec<String>,
}

/// In-memory router implementing both capabilities. Clones share state.
#[derive(Debug, Clone)]
pub struct MemoryRouter {
    state: Rc<RefCell<RouterState>>,
}

impl Default for MemoryRouter {
    fn default() -> Self {
        Self::new("/")
    }
}

impl MemoryRouter {
    #[must_use]
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            state: Rc::new(RefCell::new(RouterState {
                path: initial_path.into(),
                history: Vec::new(),
            })),
        }
    }

    /// Every path passed to [`Navigator::navigate`], oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.state.borrow().history.clone()
    }

    #[must_use]
    pub fn navigation_count(&self) -> usize {
        self.state.borrow().history.len()
    }
}

impl Navigator for MemoryRouter {
    fn navigate(&self, path: &str) {
        let mut state = self.state.borrow_mut();
        tracing::debug!(from = %state.path, to = path, "navigate");
        state.path = path.to_owned();
        state.history.push(path.to_owned());
    }
}

impl Location for MemoryRouter {
    fn current_path(&self) -> String {
        self.state.borrow().path.clone()
    }
}
