//! Log reconciliation engine
//!
//! `LogCollection` merges polled snapshots into a bounded, deduplicated,
//! newest-first list and tracks which rows are still highlighted.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;
use tracing::{debug, trace};

use super::highlight::HighlightTimer;
use super::timestamp::{is_newer, parse_timestamp};
use crate::models::{LogEntry, LogKey};

/// 高亮持续时间
pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
struct Row {
    entry: LogEntry,
    /// 解析后的 updatedAt，None 表示无法解析（排在最后）
    updated: Option<DateTime<Utc>>,
    highlight_until: Option<Instant>,
}

impl Row {
    fn new(mut entry: LogEntry, highlight_until: Instant) -> Self {
        entry.is_new = true;
        let updated = parse_timestamp(&entry.updated_at).ok();
        Self {
            entry,
            updated,
            highlight_until: Some(highlight_until),
        }
    }

    fn expire_if_due(&mut self, now: Instant) -> bool {
        match self.highlight_until {
            Some(until) if until <= now => {
                self.highlight_until = None;
                self.entry.is_new = false;
                true
            }
            _ => false,
        }
    }
}

/// Result of one merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Keys inserted or updated by this merge and still retained.
    pub highlighted: Vec<LogKey>,
    pub inserted: usize,
    pub updated: usize,
    pub discarded: usize,
    pub evicted: usize,
}

impl MergeOutcome {
    pub fn is_noop(&self) -> bool {
        self.highlighted.is_empty() && self.evicted == 0
    }
}

#[derive(Debug, Clone)]
pub struct LogCollection {
    rows: Vec<Row>,
    timer: HighlightTimer,
    highlight_duration: Duration,
}

impl Default for LogCollection {
    fn default() -> Self {
        Self::new(HIGHLIGHT_DURATION)
    }
}

impl LogCollection {
    pub fn new(highlight_duration: Duration) -> Self {
        Self {
            rows: Vec::new(),
            timer: HighlightTimer::new(),
            highlight_duration,
        }
    }

    /// Merge `snapshot` and truncate to `limit`.
    ///
    /// An incoming entry replaces the existing one for its key only when its
    /// `updatedAt` is strictly later; unparsable timestamps count as not newer.
    /// Rows past `limit` are removed from the collection, not just hidden.
    pub fn merge(&mut self, snapshot: Vec<LogEntry>, limit: usize, now: Instant) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();
        let highlight_until = now + self.highlight_duration;

        let mut by_key: HashMap<LogKey, Row> = self
            .rows
            .drain(..)
            .map(|row| (row.entry.key(), row))
            .collect();
        let mut touched: HashSet<LogKey> = HashSet::new();

        for incoming in snapshot {
            let key = incoming.key();
            // fail closed: a stored row with an unparsable updatedAt is never
            // replaced, it stays until evicted
            match by_key.get(&key) {
                None => outcome.inserted += 1,
                Some(existing) => match is_newer(&incoming.updated_at, &existing.entry.updated_at) {
                    Ok(true) => outcome.updated += 1,
                    Ok(false) => {
                        outcome.discarded += 1;
                        continue;
                    }
                    Err(e) => {
                        debug!("Discarding {} from snapshot: {}", key, e);
                        outcome.discarded += 1;
                        continue;
                    }
                },
            }

            by_key.insert(key.clone(), Row::new(incoming, highlight_until));
            if touched.insert(key.clone()) {
                outcome.highlighted.push(key);
            }
        }

        let mut rows: Vec<Row> = by_key.into_values().collect();
        for row in &mut rows {
            row.expire_if_due(now);
        }
        rows.sort_by(|a, b| b.updated.cmp(&a.updated));

        if rows.len() > limit {
            let evicted: HashSet<LogKey> = rows
                .split_off(limit)
                .into_iter()
                .map(|row| row.entry.key())
                .collect();
            outcome.evicted = evicted.len();
            outcome.highlighted.retain(|k| !evicted.contains(k));
        }

        self.rows = rows;
        self.rearm();

        trace!(
            "Merged snapshot: {} inserted, {} updated, {} discarded, {} evicted, {} rows",
            outcome.inserted,
            outcome.updated,
            outcome.discarded,
            outcome.evicted,
            self.rows.len()
        );
        outcome
    }

    /// Clear the highlight on every row whose window has elapsed.
    pub fn expire_highlights(&mut self, now: Instant) -> usize {
        if !self.timer.is_due(now) {
            return 0;
        }
        let cleared = self
            .rows
            .iter_mut()
            .map(|row| row.expire_if_due(now))
            .filter(|cleared| *cleared)
            .count();
        self.rearm();
        cleared
    }

    /// Empty the collection and cancel the pending highlight clear.
    pub fn clear(&mut self) -> bool {
        let had_rows = !self.rows.is_empty();
        self.rows.clear();
        self.timer.cancel();
        had_rows
    }

    /// Drop every row past `limit`. Removed rows are gone for good, so a
    /// later, larger limit does not bring them back.
    pub fn truncate(&mut self, limit: usize) -> usize {
        if self.rows.len() <= limit {
            return 0;
        }
        let evicted = self.rows.split_off(limit).len();
        self.rearm();
        trace!("Truncated {} rows to limit {}", evicted, limit);
        evicted
    }

    pub fn highlight_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, key: &LogKey) -> Option<&LogEntry> {
        self.rows
            .iter()
            .map(|row| &row.entry)
            .find(|entry| entry.ip == key.ip && entry.slug == key.slug)
    }

    /// Rows newest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.rows.iter().map(|row| &row.entry)
    }

    /// Materialized view capped at `limit`.
    pub fn view(&self, limit: usize) -> Vec<LogEntry> {
        self.iter().take(limit).cloned().collect()
    }

    fn rearm(&mut self) {
        let next = self.rows.iter().filter_map(|row| row.highlight_until).min();
        self.timer.rearm(next);
    }
}
