//! Polling lifecycle
//!
//! Pure state machine, no I/O: decides when a fetch may be issued and
//! whether a settled fetch may be committed.
//!
//! ```text
//!   Idle ──enable──▶ Live ──disable──▶ Idle
//!                    │  ▲
//!                    └──┘ snapshot arrival (merge)
//! ```
//!
//! Each toggle bumps the epoch. A fetch result is committed only if its
//! ticket belongs to the current epoch and the state is still `Live`.

use std::time::Duration;

use serde::Serialize;
use strum::{AsRefStr, Display};
use tokio::time::Instant;
use tracing::{debug, trace};

/// 轮询状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Display, AsRefStr)]
pub enum LiveState {
    #[default]
    Idle,
    Live,
}

/// Handle for one issued fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub id: u64,
    pub epoch: u64,
    pub issued_at: Instant,
}

#[derive(Debug, Clone)]
pub struct Poller {
    state: LiveState,
    epoch: u64,
    next_id: u64,
    in_flight: Option<FetchTicket>,
    last_request_at: Option<Instant>,
    next_poll_at: Option<Instant>,
    interval: Duration,
    dedup_interval: Duration,
}

impl Poller {
    pub fn new(interval: Duration, dedup_interval: Duration) -> Self {
        Self {
            state: LiveState::Idle,
            epoch: 0,
            next_id: 0,
            in_flight: None,
            last_request_at: None,
            next_poll_at: None,
            interval,
            dedup_interval,
        }
    }

    pub fn state(&self) -> LiveState {
        self.state
    }

    pub fn is_live(&self) -> bool {
        self.state == LiveState::Live
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn in_flight(&self) -> Option<FetchTicket> {
        self.in_flight
    }

    /// `Idle -> Live`; schedules an immediate poll.
    pub fn enable(&mut self, now: Instant) -> bool {
        if self.is_live() {
            return false;
        }
        self.state = LiveState::Live;
        self.epoch += 1;
        self.next_poll_at = Some(now);
        debug!("Polling enabled (epoch {})", self.epoch);
        true
    }

    /// `Live -> Idle`; any fetch still in flight is orphaned.
    pub fn disable(&mut self) -> bool {
        if !self.is_live() {
            return false;
        }
        self.state = LiveState::Idle;
        self.epoch += 1;
        self.in_flight = None;
        self.next_poll_at = None;
        debug!("Polling disabled (epoch {})", self.epoch);
        true
    }

    /// Scheduled poll, if one is due now.
    pub fn poll_due(&mut self, now: Instant) -> Option<FetchTicket> {
        if !self.is_live() || self.in_flight.is_some() {
            return None;
        }
        let due = self.next_poll_at?;
        if now < due {
            return None;
        }
        if let Some(window_end) = self.dedup_window_end()
            && now < window_end
        {
            self.next_poll_at = Some(window_end);
            return None;
        }
        Some(self.issue(now))
    }

    /// Manual refresh. Coalesced only while a fetch is in flight; once the
    /// previous request has settled it is issued at once.
    pub fn request_refresh(&mut self, now: Instant) -> Option<FetchTicket> {
        if !self.is_live() {
            return None;
        }
        if let Some(pending) = self.in_flight {
            trace!("Refresh coalesced with in-flight fetch #{}", pending.id);
            return None;
        }
        Some(self.issue(now))
    }

    /// Mark `ticket` settled. Returns whether its result may be committed.
    pub fn complete(&mut self, ticket: &FetchTicket, now: Instant) -> bool {
        if self.in_flight.is_some_and(|t| t.id == ticket.id) {
            self.in_flight = None;
            if self.is_live() {
                self.next_poll_at = Some(now + self.interval);
            }
        }
        let accepted = self.is_live() && ticket.epoch == self.epoch;
        if !accepted {
            debug!(
                "Dropping result of fetch #{} (epoch {} vs {}, state {})",
                ticket.id, ticket.epoch, self.epoch, self.state
            );
        }
        accepted
    }

    /// When the next scheduled poll becomes due.
    pub fn next_wakeup(&self) -> Option<Instant> {
        if self.is_live() && self.in_flight.is_none() {
            self.next_poll_at
        } else {
            None
        }
    }

    fn dedup_window_end(&self) -> Option<Instant> {
        self.last_request_at.map(|at| at + self.dedup_interval)
    }

    fn issue(&mut self, now: Instant) -> FetchTicket {
        self.next_id += 1;
        let ticket = FetchTicket {
            id: self.next_id,
            epoch: self.epoch,
            issued_at: now,
        };
        self.in_flight = Some(ticket);
        self.last_request_at = Some(now);
        self.next_poll_at = None;
        trace!("Issued fetch #{} (epoch {})", ticket.id, ticket.epoch);
        ticket
    }
}
