#![forbid(unsafe_code)]

//! Deterministic queue of cancellable deferred tasks.
//!
//! A [`Scheduler`] holds events that should fire after a delay. It owns no
//! thread and reads no wall clock: time only moves when the owner calls
//! [`pop_due`](Scheduler::pop_due) / [`settle`](Scheduler::settle) (or the
//! [`advance`](Scheduler::advance) shorthand). This makes every timed chain
//! reproducible in tests and lets a host drive it from its frame loop.
//!
//! # Invariants
//!
//! 1. Events fire in `(due, sequence)` order: a step scheduled with a smaller
//!    delay never fires after one with a larger delay, and ties fire in
//!    scheduling order.
//! 2. While an event is being popped, [`now`](Scheduler::now) equals its due
//!    time, so follow-up steps scheduled by the handler are relative to the
//!    moment the event fired.
//! 3. A cancelled [`TimerId`] never fires.
//! 4. Dropping the scheduler drops every pending event; nothing can outlive it.
//!
//! # Example
//!
//! ```
//! use navkit_core::Scheduler;
//! use std::time::Duration;
//!
//! let mut sched = Scheduler::new();
//! sched.schedule(Duration::from_millis(200), "navigate");
//! sched.schedule(Duration::from_millis(100), "fade");
//!
//! let fired = sched.advance(Duration::from_millis(250));
//! assert_eq!(fired, vec!["fade", "navigate"]);
//! ```

use std::fmt;
use std::time::Duration;

/// Handle to a scheduled event, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Raw numeric id (for logging).
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

#[derive(Debug)]
struct Entry<E> {
    id: TimerId,
    due: Duration,
    event: E,
}

/// Single-threaded deferred task queue with a virtual clock.
#[derive(Debug)]
pub struct Scheduler<E> {
    now: Duration,
    next_id: u64,
    /// Kept sorted by `(due, id)`; ids are allocated monotonically so they
    /// double as the scheduling sequence.
    entries: Vec<Entry<E>>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    /// Create an empty scheduler at virtual time zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 1,
            entries: Vec::new(),
        }
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending (not yet fired, not cancelled) events.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `id` is still pending.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Due time of the earliest pending event.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.entries.first().map(|e| e.due)
    }

    /// Schedule `event` to fire `delay` after the current virtual time.
    pub fn schedule(&mut self, delay: Duration, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due = self.now.saturating_add(delay);
        // Insert after every entry due at or before `due` to keep FIFO ties.
        let at = self.entries.partition_point(|e| e.due <= due);
        self.entries.insert(at, Entry { id, due, event });
        tracing::trace!(timer = id.get(), due_ms = due.as_millis() as u64, "timer scheduled");
        id
    }

    /// Cancel a pending event. Returns `false` if it already fired or was
    /// cancelled before.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.entries.iter().position(|e| e.id == id) {
            Some(pos) => {
                self.entries.remove(pos);
                tracing::trace!(timer = id.get(), "timer cancelled");
                true
            }
            None => false,
        }
    }

    /// Cancel every pending event. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        if dropped > 0 {
            tracing::trace!(dropped, "timers cancelled");
        }
        dropped
    }

    /// Pop the earliest event due at or before `deadline`, moving the virtual
    /// clock to its due time.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<(TimerId, E)> {
        let first = self.entries.first()?;
        if first.due > deadline {
            return None;
        }
        let entry = self.entries.remove(0);
        self.now = self.now.max(entry.due);
        tracing::trace!(timer = entry.id.get(), at_ms = self.now.as_millis() as u64, "timer fired");
        Some((entry.id, entry.event))
    }

    /// Move the virtual clock forward to `deadline` (never backwards).
    ///
    /// Call after draining [`pop_due`](Self::pop_due) for the same deadline.
    pub fn settle(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }

    /// Remove every pending event in firing order without moving the clock.
    pub fn drain_pending(&mut self) -> Vec<(TimerId, E)> {
        self.entries.drain(..).map(|e| (e.id, e.event)).collect()
    }

    /// Advance by `delta` and return every event that came due, in order.
    ///
    /// Handlers that need to schedule follow-ups at fire time should loop
    /// over [`pop_due`](Self::pop_due) instead.
    pub fn advance(&mut self, delta: Duration) -> Vec<E> {
        let deadline = self.now.saturating_add(delta);
        let mut fired = Vec::new();
        while let Some((_, event)) = self.pop_due(deadline) {
            fired.push(event);
        }
        self.settle(deadline);
        fired
    }
}
