//! Session event loop
//!
//! One task owns the `LiveLogSession`. Commands, settled fetches and the
//! single wake-up deadline are handled one at a time; after each the
//! driver issues a fetch if one is due and publishes a fresh view.
//! Every committed merge is also sent on a broadcast channel, so followers
//! see each one even when views are coalesced.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, error, trace};

use super::{FetchApplied, LiveLogSession, ViewSnapshot};
use crate::errors::{LiveLogError, Result};
use crate::models::LogEntry;
use crate::source::{FetchTicket, LogSource};

/// 命令通道容量
const COMMAND_BUFFER: usize = 64;

/// 合并事件广播容量
const MERGE_BUFFER: usize = 256;

/// One committed merge
#[derive(Debug, Clone)]
pub struct MergeEvent {
    pub seq: u64,
    /// Inserted or updated by this merge, newest first
    pub entries: Vec<LogEntry>,
}

/// 驱动命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleLive,
    SetLive(bool),
    Refresh,
    Clear,
    SetLimit(usize),
    NextLimit,
    PrevLimit,
    Shutdown,
}

type FetchResult = (FetchTicket, Result<Vec<LogEntry>>);

pub struct SessionDriver {
    session: LiveLogSession,
    source: Arc<dyn LogSource>,
    commands: mpsc::Receiver<Command>,
    view_tx: watch::Sender<ViewSnapshot>,
    merge_tx: broadcast::Sender<MergeEvent>,
    fetches: JoinSet<FetchResult>,
}

impl SessionDriver {
    /// Start the loop on the current runtime.
    pub fn spawn(session: LiveLogSession, source: Arc<dyn LogSource>) -> DriverHandle {
        let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_BUFFER);
        let (view_tx, view_rx) = watch::channel(session.view());
        let (merge_tx, merge_rx) = broadcast::channel(MERGE_BUFFER);

        let driver = SessionDriver {
            session,
            source,
            commands: cmd_rx,
            view_tx,
            merge_tx,
            fetches: JoinSet::new(),
        };
        let task = tokio::spawn(driver.run());

        DriverHandle {
            commands: cmd_tx,
            view: view_rx,
            merges: merge_rx,
            task,
        }
    }

    async fn run(mut self) {
        debug!("Session driver started ({} source)", self.source.name());
        self.poll_if_due(Instant::now());
        self.publish();

        loop {
            let wakeup = self.session.next_wakeup();
            tokio::select! {
                biased;

                cmd = self.commands.recv() => match cmd {
                    Some(Command::Shutdown) | None => break,
                    Some(cmd) => self.apply(cmd),
                },
                Some(joined) = self.fetches.join_next(), if !self.fetches.is_empty() => {
                    let now = Instant::now();
                    match joined {
                        Ok((ticket, result)) => {
                            if let FetchApplied::Merged(_) = self.session.on_fetch_result(ticket, result, now) {
                                self.announce_merge();
                            }
                        }
                        Err(e) if e.is_cancelled() => {}
                        Err(e) => {
                            error!("Fetch task panicked: {}", e);
                            if let Some(ticket) = self.session.in_flight() {
                                self.session.on_fetch_result(
                                    ticket,
                                    Err(LiveLogError::source_request(format!("fetch task failed: {}", e))),
                                    now,
                                );
                            }
                        }
                    }
                }
                _ = sleep_until_opt(wakeup) => {
                    let cleared = self.session.expire_highlights(Instant::now());
                    if cleared > 0 {
                        trace!("Cleared {} highlights", cleared);
                    }
                }
            }

            self.poll_if_due(Instant::now());
            self.publish();
        }

        // in-flight fetches are aborted with the JoinSet
        self.fetches.abort_all();
        debug!("Session driver stopped");
    }

    fn apply(&mut self, cmd: Command) {
        trace!("Command: {:?}", cmd);
        let now = Instant::now();
        match cmd {
            Command::ToggleLive => {
                self.session.toggle_live(now);
                if !self.session.is_live() {
                    self.fetches.abort_all();
                }
            }
            Command::SetLive(true) => {
                self.session.enable(now);
            }
            Command::SetLive(false) => {
                if self.session.disable() {
                    self.fetches.abort_all();
                }
            }
            Command::Refresh => {
                if let Some(ticket) = self.session.request_refresh(now) {
                    self.start_fetch(ticket);
                }
            }
            Command::Clear => {
                self.session.clear();
            }
            Command::SetLimit(limit) => {
                if let Err(e) = self.session.set_limit(limit) {
                    debug!("Ignoring limit {}: {}", limit, e.message());
                }
            }
            Command::NextLimit => {
                self.session.next_limit();
            }
            Command::PrevLimit => {
                self.session.prev_limit();
            }
            Command::Shutdown => {}
        }
    }

    fn poll_if_due(&mut self, now: Instant) {
        if let Some(ticket) = self.session.poll_due(now) {
            self.start_fetch(ticket);
        }
    }

    fn start_fetch(&mut self, ticket: FetchTicket) {
        let source = Arc::clone(&self.source);
        let admin = self.session.admin();
        self.fetches.spawn(async move {
            let result = source.fetch(admin).await;
            (ticket, result)
        });
    }

    fn announce_merge(&self) {
        let event = MergeEvent {
            seq: self.session.merge_seq(),
            entries: self.session.last_highlighted_entries(),
        };
        // no followers is fine
        let _ = self.merge_tx.send(event);
    }

    fn publish(&self) {
        self.view_tx.send_replace(self.session.view());
    }
}

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

/// Handle to a running driver
///
/// Dropping every handle ends the loop.
pub struct DriverHandle {
    commands: mpsc::Sender<Command>,
    view: watch::Receiver<ViewSnapshot>,
    merges: broadcast::Receiver<MergeEvent>,
    task: JoinHandle<()>,
}

impl DriverHandle {
    pub async fn send(&self, cmd: Command) -> Result<()> {
        self.commands
            .send(cmd)
            .await
            .map_err(|_| LiveLogError::channel_closed("session driver has stopped"))
    }

    /// Non-blocking send, for the synchronous TUI loop.
    pub fn try_send(&self, cmd: Command) -> Result<()> {
        self.commands.try_send(cmd).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => {
                LiveLogError::channel_closed("session driver is busy")
            }
            mpsc::error::TrySendError::Closed(_) => {
                LiveLogError::channel_closed("session driver has stopped")
            }
        })
    }

    /// Latest published view
    pub fn view(&self) -> ViewSnapshot {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.view.clone()
    }

    /// Merges committed from now on. Closed when the driver stops.
    pub fn merges(&self) -> broadcast::Receiver<MergeEvent> {
        self.merges.resubscribe()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the loop and wait for it to exit.
    pub async fn shutdown(self) -> Result<()> {
        let _ = self.commands.send(Command::Shutdown).await;
        self.task
            .await
            .map_err(|e| LiveLogError::channel_closed(format!("session driver failed: {}", e)))
    }
}
