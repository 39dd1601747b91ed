//! Trailing-edge debouncing driven by caller-supplied instants.

use std::time::{Duration, Instant};

/// Quiet period before search input is applied to the table.
pub const GLOBAL_FILTER_DEBOUNCE: Duration = Duration::from_millis(200);

/// Holds back rapid input until it settles.
///
/// Each [`input`](Self::input) replaces the pending value and restarts the
/// window. [`poll`](Self::poll) releases the pending value once the window
/// has passed without new input, and only once.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<T>,
    last_input: Option<Instant>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            last_input: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Records a new value at `now`.
    pub fn input(&mut self, value: T, now: Instant) {
        self.pending = Some(value);
        self.last_input = Some(now);
    }

    /// Returns the settled value if the window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let deadline = self.deadline()?;
        if now < deadline {
            return None;
        }
        self.last_input = None;
        self.pending.take()
    }

    /// When the pending value settles, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref()?;
        self.last_input.map(|at| at + self.window)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Releases the pending value immediately.
    pub fn flush(&mut self) -> Option<T> {
        self.last_input = None;
        self.pending.take()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(GLOBAL_FILTER_DEBOUNCE)
    }
}
