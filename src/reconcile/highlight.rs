//! Single-handle highlight-clear timer
//!
//! Only one deadline is ever armed. Re-arming replaces the previous
//! deadline, so an older expiry can never fire against newer highlights.

use tokio::time::Instant;

/// 高亮清除定时器（单句柄，不排队）
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HighlightTimer {
    deadline: Option<Instant>,
}

impl HighlightTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever was armed with `deadline`.
    pub fn rearm(&mut self, deadline: Option<Instant>) {
        self.deadline = deadline;
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| d <= now)
    }
}
