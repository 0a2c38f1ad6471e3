#![forbid(unsafe_code)]

//! Shared value with synchronous change callbacks.
//!
//! Callbacks run in registration order on the caller's stack, after the
//! value borrow is released, so a callback may read the value or set it
//! again (the nested change is delivered depth-first).

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Slot<T> {
    value: T,
    listeners: Vec<Weak<dyn Fn(&T)>>,
}

/// Shared handle to a value. Clones observe and mutate the same value.
pub struct Observable<T> {
    slot: Rc<RefCell<Slot<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot.borrow();
        f.debug_struct("Observable")
            .field("value", &slot.value)
            .field("listeners", &slot.listeners.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Slot {
                value,
                listeners: Vec::new(),
            })),
        }
    }

    #[must_use]
    pub fn get(&self) -> T {
        self.slot.borrow().value.clone()
    }

    /// Borrow the value for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.slot.borrow().value)
    }

    /// Replace the value. Callbacks run only if it differs; returns whether
    /// it did.
    pub fn set(&self, value: T) -> bool {
        {
            let mut slot = self.slot.borrow_mut();
            if slot.value == value {
                return false;
            }
            slot.value = value;
        }
        self.notify();
        true
    }

    /// Edit the value in place. Callbacks run only if the edit changed it.
    pub fn update(&self, edit: impl FnOnce(&mut T)) -> bool {
        let changed = {
            let mut slot = self.slot.borrow_mut();
            let before = slot.value.clone();
            edit(&mut slot.value);
            slot.value != before
        };
        if changed {
            self.notify();
        }
        changed
    }

    /// Register `callback` for future notifications. It is not called with
    /// the current value.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let callback: Callback<T> = Rc::new(callback);
        self.slot
            .borrow_mut()
            .listeners
            .push(Rc::downgrade(&callback));
        Subscription {
            keep_alive: Some(Box::new(callback)),
        }
    }

    /// Live callbacks.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.slot
            .borrow()
            .listeners
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    /// Run every live callback with the current value, changed or not.
    pub fn notify(&self) {
        let callbacks: Vec<Callback<T>> = {
            let mut slot = self.slot.borrow_mut();
            slot.listeners.retain(|w| w.strong_count() > 0);
            slot.listeners.iter().filter_map(Weak::upgrade).collect()
        };
        if callbacks.is_empty() {
            return;
        }
        let value = self.get();
        let _span =
            tracing::trace_span!("observable.notify", subscribers = callbacks.len()).entered();
        for callback in &callbacks {
            callback(&value);
        }
    }
}

/// Keeps a callback registered. Dropping it, or calling
/// [`unsubscribe`](Self::unsubscribe), detaches the callback for good.
pub struct Subscription {
    keep_alive: Option<Box<dyn std::any::Any>>,
}

impl Subscription {
    /// Idempotent.
    pub fn unsubscribe(&mut self) {
        self.keep_alive = None;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.keep_alive.is_some()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
