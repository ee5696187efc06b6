//! Live-log session
//!
//! `LiveLogSession` is the single owner of the collection, the poller, the
//! display limit and the last fetch error. It does no I/O and reads no
//! clock; every time-dependent call takes `now`. `SessionDriver` runs it on
//! one task.

mod driver;
mod view;

pub use driver::{Command, DriverHandle, MergeEvent, SessionDriver};
pub use view::ViewSnapshot;

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::StaticConfig;
use crate::errors::{LiveLogError, Result};
use crate::models::{DisplayLimit, LogEntry, LogKey};
use crate::reconcile::{HIGHLIGHT_DURATION, LogCollection, MergeOutcome};
use crate::source::{FetchTicket, LiveState, Poller};

/// 会话参数
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub poll_interval: Duration,
    pub dedup_interval: Duration,
    pub highlight: Duration,
    pub admin: bool,
    pub limit: DisplayLimit,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(5000),
            dedup_interval: Duration::from_millis(2000),
            highlight: HIGHLIGHT_DURATION,
            admin: false,
            limit: DisplayLimit::default(),
        }
    }
}

impl SessionSettings {
    pub fn from_config(config: &StaticConfig) -> Result<Self> {
        Ok(Self {
            poll_interval: config.poll.interval(),
            dedup_interval: config.poll.dedup_interval(),
            highlight: config.display.highlight(),
            admin: config.source.admin,
            limit: DisplayLimit::new(
                config.display.limit_options.clone(),
                config.display.default_limit,
            )?,
        })
    }
}

/// What became of a settled fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchApplied {
    /// Orphaned by a toggle; nothing was touched
    Stale,
    Merged(MergeOutcome),
    Failed,
}

#[derive(Debug)]
pub struct LiveLogSession {
    collection: LogCollection,
    poller: Poller,
    limit: DisplayLimit,
    admin: bool,
    error: Option<LiveLogError>,
    merge_seq: u64,
    last_highlighted: Vec<LogKey>,
    has_snapshot: bool,
}

impl Default for LiveLogSession {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}

impl LiveLogSession {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            collection: LogCollection::new(settings.highlight),
            poller: Poller::new(settings.poll_interval, settings.dedup_interval),
            limit: settings.limit,
            admin: settings.admin,
            error: None,
            merge_seq: 0,
            last_highlighted: Vec::new(),
            has_snapshot: false,
        }
    }

    pub fn admin(&self) -> bool {
        self.admin
    }

    pub fn state(&self) -> LiveState {
        self.poller.state()
    }

    pub fn is_live(&self) -> bool {
        self.poller.is_live()
    }

    pub fn in_flight(&self) -> Option<FetchTicket> {
        self.poller.in_flight()
    }

    pub fn collection(&self) -> &LogCollection {
        &self.collection
    }

    pub fn limit(&self) -> &DisplayLimit {
        &self.limit
    }

    pub fn error(&self) -> Option<&LiveLogError> {
        self.error.as_ref()
    }

    pub fn enable(&mut self, now: Instant) -> bool {
        let changed = self.poller.enable(now);
        if changed {
            self.has_snapshot = false;
            info!("Live mode on");
        }
        changed
    }

    pub fn disable(&mut self) -> bool {
        let changed = self.poller.disable();
        if changed {
            info!("Live mode off");
        }
        changed
    }

    /// Returns the state after toggling.
    pub fn toggle_live(&mut self, now: Instant) -> LiveState {
        if self.is_live() {
            self.disable();
        } else {
            self.enable(now);
        }
        self.state()
    }

    pub fn request_refresh(&mut self, now: Instant) -> Option<FetchTicket> {
        self.poller.request_refresh(now)
    }

    pub fn poll_due(&mut self, now: Instant) -> Option<FetchTicket> {
        self.poller.poll_due(now)
    }

    /// Commit or drop the result of `ticket`.
    pub fn on_fetch_result(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<LogEntry>>,
        now: Instant,
    ) -> FetchApplied {
        if !self.poller.complete(&ticket, now) {
            return FetchApplied::Stale;
        }

        match result {
            Ok(snapshot) => {
                let outcome = self.collection.merge(snapshot, self.limit.value(), now);
                self.error = None;
                self.has_snapshot = true;
                self.merge_seq += 1;
                self.last_highlighted = outcome.highlighted.clone();
                if !outcome.is_noop() {
                    debug!(
                        "Merge #{}: {} highlighted, {} evicted",
                        self.merge_seq,
                        outcome.highlighted.len(),
                        outcome.evicted
                    );
                }
                FetchApplied::Merged(outcome)
            }
            Err(e) => {
                warn!("Live-log fetch failed: {}", e.format_simple());
                self.error = Some(e);
                FetchApplied::Failed
            }
        }
    }

    pub fn expire_highlights(&mut self, now: Instant) -> usize {
        self.collection.expire_highlights(now)
    }

    /// No-op when already empty.
    pub fn clear(&mut self) -> bool {
        let cleared = self.collection.clear();
        if cleared {
            self.last_highlighted.clear();
            debug!("Collection cleared");
        }
        cleared
    }

    /// Any limit change truncates the collection at once, live or idle.
    pub fn set_limit(&mut self, limit: usize) -> Result<usize> {
        self.limit.set(limit)?;
        Ok(self.apply_limit())
    }

    pub fn next_limit(&mut self) -> usize {
        self.limit.next();
        self.apply_limit()
    }

    pub fn prev_limit(&mut self) -> usize {
        self.limit.prev();
        self.apply_limit()
    }

    fn apply_limit(&mut self) -> usize {
        let limit = self.limit.value();
        let evicted = self.collection.truncate(limit);
        if evicted > 0 {
            let collection = &self.collection;
            self.last_highlighted.retain(|key| collection.get(key).is_some());
            debug!("Limit {} evicted {} rows", limit, evicted);
        }
        limit
    }

    /// Earliest of the next scheduled poll and the pending highlight clear.
    pub fn next_wakeup(&self) -> Option<Instant> {
        match (self.poller.next_wakeup(), self.collection.highlight_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn view(&self) -> ViewSnapshot {
        let limit = self.limit.value();
        ViewSnapshot {
            state: self.state(),
            loading: self.in_flight().is_some(),
            awaiting_first_snapshot: self.is_live() && !self.has_snapshot,
            limit,
            limit_label: self.limit.label(),
            rows: self.collection.view(limit),
            total: self.collection.len(),
            error: self.error.clone(),
            merge_seq: self.merge_seq,
            last_highlighted: self.last_highlighted_entries(),
        }
    }

    pub fn merge_seq(&self) -> u64 {
        self.merge_seq
    }

    /// Entries inserted or updated by the most recent merge that are still
    /// retained.
    pub fn last_highlighted_entries(&self) -> Vec<LogEntry> {
        self.last_highlighted
            .iter()
            .filter_map(|key| self.collection.get(key).cloned())
            .collect()
    }
}
