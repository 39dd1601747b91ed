//! Delayed loading indicator with a minimum display time.

use std::time::{Duration, Instant};

/// How long work must be pending before the indicator appears.
pub const SHOW_DELAY: Duration = Duration::from_millis(300);

/// Shortest time the indicator stays up once shown.
pub const MIN_VISIBLE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Hidden,
    Armed { since: Instant },
    Visible { since: Instant, finished: bool },
}

/// Decides when a pending-work indicator is shown.
///
/// Short operations never flash the indicator; once it is shown it stays
/// long enough to be read. All transitions take the current instant so the
/// caller owns the clock.
#[derive(Debug, Clone)]
pub struct PendingIndicator {
    phase: Phase,
    show_delay: Duration,
    min_visible: Duration,
}

impl Default for PendingIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl PendingIndicator {
    pub fn new() -> Self {
        Self::with_timings(SHOW_DELAY, MIN_VISIBLE)
    }

    pub fn with_timings(show_delay: Duration, min_visible: Duration) -> Self {
        Self {
            phase: Phase::Hidden,
            show_delay,
            min_visible,
        }
    }

    /// Work started.
    pub fn start(&mut self, now: Instant) {
        self.phase = match self.phase {
            Phase::Hidden => Phase::Armed { since: now },
            Phase::Visible { since, .. } => Phase::Visible {
                since,
                finished: false,
            },
            armed @ Phase::Armed { .. } => armed,
        };
    }

    /// Work finished. A visible indicator lingers until its minimum time
    /// is up.
    pub fn finish(&mut self, now: Instant) {
        self.phase = match self.phase {
            Phase::Hidden | Phase::Armed { .. } => Phase::Hidden,
            Phase::Visible { since, .. } => Phase::Visible {
                since,
                finished: true,
            },
        };
        self.tick(now);
    }

    /// Advances timers; returns whether the indicator is visible.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.phase {
            Phase::Armed { since } if now.saturating_duration_since(since) >= self.show_delay => {
                self.phase = Phase::Visible {
                    since: now,
                    finished: false,
                };
            }
            Phase::Visible {
                since,
                finished: true,
            } if now.saturating_duration_since(since) >= self.min_visible => {
                self.phase = Phase::Hidden;
            }
            _ => {}
        }
        self.is_visible()
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.phase, Phase::Visible { .. })
    }

    /// Whether work is pending but the indicator is not yet shown.
    pub fn is_armed(&self) -> bool {
        matches!(self.phase, Phase::Armed { .. })
    }

    /// How much longer a visible indicator must stay up.
    pub fn remaining_visible(&self, now: Instant) -> Duration {
        match self.phase {
            Phase::Visible { since, .. } => self
                .min_visible
                .saturating_sub(now.saturating_duration_since(since)),
            _ => Duration::ZERO,
        }
    }

    /// The next instant at which [`tick`](Self::tick) changes state.
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::Armed { since } => Some(since + self.show_delay),
            Phase::Visible {
                since,
                finished: true,
            } => Some(since + self.min_visible),
            _ => None,
        }
    }
}
