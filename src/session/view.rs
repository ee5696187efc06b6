use serde::Serialize;

use crate::errors::LiveLogError;
use crate::models::LogEntry;
use crate::source::LiveState;

/// 渲染层使用的只读视图
///
/// Published by the driver after every event it handles.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewSnapshot {
    pub state: LiveState,
    /// A fetch is in flight
    pub loading: bool,
    /// Live, but no snapshot has been merged since live mode was entered
    pub awaiting_first_snapshot: bool,
    pub limit: usize,
    pub limit_label: String,
    /// Newest first, at most `limit` rows
    pub rows: Vec<LogEntry>,
    /// Rows retained by the collection
    pub total: usize,
    #[serde(skip)]
    pub error: Option<LiveLogError>,
    /// Bumped on every committed merge
    pub merge_seq: u64,
    /// Entries inserted or updated by the most recent merge
    pub last_highlighted: Vec<LogEntry>,
}

impl ViewSnapshot {
    pub fn is_live(&self) -> bool {
        self.state == LiveState::Live
    }

    /// Loading placeholder: live, nothing to show yet, no error.
    pub fn shows_placeholder(&self) -> bool {
        self.is_live() && self.awaiting_first_snapshot && self.rows.is_empty() && self.error.is_none()
    }

    /// `N of LIMIT total logs`
    pub fn summary(&self) -> String {
        format!("{} of {} total logs", self.rows.len(), self.limit_label)
    }
}
