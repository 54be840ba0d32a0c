//! Events posted from the debounce worker back onto the controller thread.

use std::time::Instant;

/// Notifications delivered to the thread that owns the chrome controller.
///
/// The worker never touches layout state. It only reports that time has
/// passed, and the owner decides what that means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeEvent {
    /// The armed debounce deadline elapsed without being re-armed.
    Settle {
        /// Token returned by the `arm` call that scheduled this deadline.
        token: u64,
        /// The deadline that elapsed.
        deadline: Instant,
    },

    /// The worker thread exited.
    Stopped,
}

impl ChromeEvent {
    /// Check if this event asks the owner to run its settle step.
    pub fn is_settle(&self) -> bool {
        matches!(self, Self::Settle { .. })
    }
}
