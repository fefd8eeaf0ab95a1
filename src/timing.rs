//! Timing windows for the interaction controllers.

use std::time::Duration;

/// Timer windows injected into the controllers.
///
/// Both windows are owned, cancellable timers: they are cleared on every
/// state transition that supersedes them and on teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionTiming {
    /// Quiet period after the last keystroke before a list fetch fires.
    pub debounce_window: Duration,
    /// How long a transient success message stays visible.
    pub feedback_window: Duration,
}

impl InteractionTiming {
    /// Creates a timing configuration with explicit windows.
    #[must_use]
    pub const fn new(debounce_window: Duration, feedback_window: Duration) -> Self {
        Self {
            debounce_window,
            feedback_window,
        }
    }
}

impl Default for InteractionTiming {
    fn default() -> Self {
        Self::new(Duration::from_millis(300), Duration::from_secs(4))
    }
}
