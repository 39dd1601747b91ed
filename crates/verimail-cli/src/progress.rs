//! Terminal spinner for pending requests.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// A spinner that is shown and hidden on demand.
///
/// Visibility is decided by a
/// [`PendingIndicator`](verimail_present::PendingIndicator); this type only
/// draws.
pub struct Spinner {
    bar: Option<ProgressBar>,
    message: String,
    enabled: bool,
}

impl Spinner {
    /// A spinner drawn on stderr.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            bar: None,
            message: message.into(),
            enabled: true,
        }
    }

    /// A spinner that never draws.
    pub fn hidden() -> Self {
        Self {
            bar: None,
            message: String::new(),
            enabled: false,
        }
    }

    pub fn is_shown(&self) -> bool {
        self.bar.is_some()
    }

    pub fn set_visible(&mut self, visible: bool) {
        match (visible, self.bar.take()) {
            (true, Some(bar)) => self.bar = Some(bar),
            (true, None) => {
                if self.enabled {
                    self.bar = Some(self.start_bar());
                }
            }
            (false, Some(bar)) => bar.finish_and_clear(),
            (false, None) => {}
        }
    }

    fn start_bar(&self) -> ProgressBar {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} ({elapsed})") {
            bar.set_style(style);
        }
        bar.set_message(self.message.clone());
        bar.enable_steady_tick(TICK_INTERVAL);
        bar
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.set_visible(false);
    }
}
