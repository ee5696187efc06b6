use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{sleep, timeout};

use livelog::errors::{LiveLogError, Result};
use livelog::interfaces::cli::commands::follow;
use livelog::models::LogEntry;
use livelog::session::{Command, DriverHandle, LiveLogSession, SessionDriver, SessionSettings};
use livelog::source::{LiveState, LogSource};

// =============================================================================
// Scripted source
// =============================================================================

struct ScriptedSource {
    responses: Mutex<VecDeque<Result<Vec<LogEntry>>>>,
    calls: AtomicUsize,
    admin_calls: AtomicUsize,
    delay: Duration,
}

impl ScriptedSource {
    fn new(responses: Vec<Result<Vec<LogEntry>>>) -> Arc<Self> {
        Self::with_delay(responses, Duration::ZERO)
    }

    fn with_delay(responses: Vec<Result<Vec<LogEntry>>>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
            admin_calls: AtomicUsize::new(0),
            delay,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LogSource for ScriptedSource {
    async fn fetch(&self, admin: bool) -> Result<Vec<LogEntry>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if admin {
            self.admin_calls.fetch_add(1, Ordering::SeqCst);
        }
        let next = self.responses.lock().unwrap().pop_front();
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        next.unwrap_or_else(|| Ok(Vec::new()))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

fn entry(ip: &str, slug: &str, second: u32) -> LogEntry {
    LogEntry {
        ip: ip.to_string(),
        slug: slug.to_string(),
        target: format!("https://example.com/{}", slug),
        updated_at: format!("2024-05-01T12:00:{:02}Z", second),
        ..Default::default()
    }
}

fn spawn(source: Arc<ScriptedSource>) -> DriverHandle {
    SessionDriver::spawn(LiveLogSession::default(), source)
}

async fn settle() {
    sleep(Duration::from_millis(100)).await;
}

// =============================================================================
// Polling
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_idle_driver_never_fetches() {
    let source = ScriptedSource::new(vec![]);
    let handle = spawn(source.clone());

    sleep(Duration::from_secs(30)).await;
    assert_eq!(source.calls(), 0);
    assert_eq!(handle.view().state, LiveState::Idle);
    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_live_polls_immediately_then_every_interval() {
    let source = ScriptedSource::new(vec![Ok(vec![entry("1.1.1.1", "a", 1)])]);
    let handle = spawn(source.clone());

    handle.send(Command::SetLive(true)).await.unwrap();
    settle().await;
    assert_eq!(source.calls(), 1);
    let view = handle.view();
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.merge_seq, 1);
    assert!(view.rows[0].is_new);

    sleep(Duration::from_secs(5)).await;
    assert_eq!(source.calls(), 2);

    sleep(Duration::from_secs(5)).await;
    assert_eq!(source.calls(), 3);
    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_highlight_clears_without_new_snapshot() {
    let source = ScriptedSource::new(vec![Ok(vec![entry("1.1.1.1", "a", 1)])]);
    let handle = spawn(source);

    handle.send(Command::SetLive(true)).await.unwrap();
    settle().await;
    assert!(handle.view().rows[0].is_new);

    sleep(Duration::from_millis(2000)).await;
    assert!(!handle.view().rows[0].is_new);
    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_stop_discards_in_flight_fetch() {
    let source = ScriptedSource::with_delay(
        vec![Ok(vec![entry("1.1.1.1", "a", 1)])],
        Duration::from_millis(1000),
    );
    let handle = spawn(source.clone());

    handle.send(Command::SetLive(true)).await.unwrap();
    settle().await;
    assert!(handle.view().loading);

    handle.send(Command::SetLive(false)).await.unwrap();
    sleep(Duration::from_secs(3)).await;

    let view = handle.view();
    assert_eq!(view.state, LiveState::Idle);
    assert!(view.rows.is_empty());
    assert_eq!(view.merge_seq, 0);
    assert!(!view.loading);
    assert_eq!(source.calls(), 1);
    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_refresh_coalesced_while_fetch_in_flight() {
    let source = ScriptedSource::with_delay(vec![], Duration::from_millis(500));
    let handle = spawn(source.clone());

    handle.send(Command::SetLive(true)).await.unwrap();
    settle().await;
    assert_eq!(source.calls(), 1);

    handle.send(Command::Refresh).await.unwrap();
    settle().await;
    assert_eq!(source.calls(), 1, "first fetch still in flight");

    sleep(Duration::from_millis(500)).await;
    assert!(!handle.view().loading);
    handle.send(Command::Refresh).await.unwrap();
    settle().await;
    assert_eq!(source.calls(), 2);
    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_refresh_right_after_going_live() {
    let source = ScriptedSource::new(vec![]);
    let handle = spawn(source.clone());

    handle.send(Command::SetLive(true)).await.unwrap();
    settle().await;
    handle.send(Command::Refresh).await.unwrap();
    settle().await;
    assert_eq!(source.calls(), 2);
    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_refresh_ignored_while_idle() {
    let source = ScriptedSource::new(vec![]);
    let handle = spawn(source.clone());

    handle.send(Command::Refresh).await.unwrap();
    settle().await;
    assert_eq!(source.calls(), 0);
    handle.shutdown().await.unwrap();
}

// =============================================================================
// Errors
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_fetch_error_shown_until_next_success() {
    let source = ScriptedSource::new(vec![
        Err(LiveLogError::source_status(500, "boom")),
        Ok(vec![entry("1.1.1.1", "a", 1)]),
    ]);
    let handle = spawn(source);

    handle.send(Command::SetLive(true)).await.unwrap();
    settle().await;
    let view = handle.view();
    assert_eq!(view.error.as_ref().map(|e| e.code()), Some("E004"));
    assert_eq!(view.state, LiveState::Live, "errors do not stop polling");

    sleep(Duration::from_secs(5)).await;
    let view = handle.view();
    assert!(view.error.is_none());
    assert_eq!(view.rows.len(), 1);
    handle.shutdown().await.unwrap();
}

// =============================================================================
// Commands
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_limit_and_clear_commands() {
    let source = ScriptedSource::new(vec![Ok(vec![
        entry("1", "a", 1),
        entry("2", "b", 2),
        entry("3", "c", 3),
    ])]);
    let handle = spawn(source);

    handle.send(Command::SetLive(true)).await.unwrap();
    settle().await;
    assert_eq!(handle.view().total, 3);

    handle.send(Command::SetLimit(2)).await.unwrap();
    settle().await;
    let view = handle.view();
    assert_eq!(view.limit, 2);
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.rows[0].slug, "c");

    handle.send(Command::Clear).await.unwrap();
    settle().await;
    assert_eq!(handle.view().total, 0);
    assert_eq!(handle.view().state, LiveState::Live);
    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_next_and_prev_limit_step_through_options() {
    let handle = spawn(ScriptedSource::new(vec![]));

    handle.send(Command::NextLimit).await.unwrap();
    settle().await;
    assert_eq!(handle.view().limit, 200);

    handle.send(Command::PrevLimit).await.unwrap();
    handle.send(Command::PrevLimit).await.unwrap();
    settle().await;
    assert_eq!(handle.view().limit, 50);
    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_admin_flag_forwarded_to_source() {
    let source = ScriptedSource::new(vec![]);
    let settings = SessionSettings {
        admin: true,
        ..Default::default()
    };
    let handle = SessionDriver::spawn(LiveLogSession::new(settings), source.clone());

    handle.send(Command::ToggleLive).await.unwrap();
    settle().await;
    assert_eq!(source.admin_calls.load(Ordering::SeqCst), 1);
    handle.shutdown().await.unwrap();
}

// =============================================================================
// Teardown
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_dropping_handle_stops_driver() {
    let source = ScriptedSource::new(vec![]);
    let handle = spawn(source.clone());
    handle.send(Command::SetLive(true)).await.unwrap();
    settle().await;

    let mut views = handle.subscribe();
    drop(handle);

    let stopped = timeout(Duration::from_secs(1), async {
        while views.changed().await.is_ok() {}
    })
    .await;
    assert!(stopped.is_ok(), "driver should exit when the handle is dropped");

    // no further polls after teardown
    let calls = source.calls();
    sleep(Duration::from_secs(30)).await;
    assert_eq!(source.calls(), calls);
}

#[tokio::test(start_paused = true)]
async fn test_view_channel_closes_after_shutdown() {
    let handle = spawn(ScriptedSource::new(vec![]));
    let view_rx = handle.subscribe();
    handle.shutdown().await.unwrap();
    assert!(view_rx.has_changed().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_every_merge_is_broadcast_even_when_views_coalesce() {
    let source = ScriptedSource::new(vec![
        Ok(vec![entry("1", "first", 1)]),
        Ok(vec![entry("2", "second", 2)]),
    ]);
    let handle = spawn(source);
    let mut merges = handle.merges();

    handle.send(Command::SetLive(true)).await.unwrap();
    settle().await;
    handle.send(Command::Refresh).await.unwrap();
    settle().await;

    // the latest view only knows about the second merge
    let view = handle.view();
    assert_eq!(view.merge_seq, 2);
    assert_eq!(view.last_highlighted.len(), 1);
    assert_eq!(view.last_highlighted[0].slug, "second");

    let first = merges.try_recv().unwrap();
    assert_eq!(first.seq, 1);
    assert_eq!(first.entries[0].slug, "first");
    let second = merges.try_recv().unwrap();
    assert_eq!(second.seq, 2);
    assert_eq!(second.entries[0].slug, "second");
    assert!(merges.try_recv().is_err());

    handle.shutdown().await.unwrap();
    assert!(merges.recv().await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_stale_and_failed_fetches_are_not_broadcast() {
    let source = ScriptedSource::new(vec![Err(LiveLogError::source_request("refused"))]);
    let handle = spawn(source);
    let mut merges = handle.merges();

    handle.send(Command::SetLive(true)).await.unwrap();
    settle().await;
    assert!(handle.view().error.is_some());
    assert!(merges.try_recv().is_err());
    handle.shutdown().await.unwrap();
}

// =============================================================================
// Tail
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_follow_prints_each_highlighted_entry_once() {
    let source = ScriptedSource::new(vec![
        Ok(vec![entry("1", "first", 1), entry("2", "second", 2)]),
        Ok(vec![entry("1", "first", 1), entry("3", "third", 3)]),
    ]);
    let handle = spawn(source);

    let mut out = Vec::new();
    let printed = follow(&handle, sleep(Duration::from_secs(6)), &mut out)
        .await
        .unwrap();
    handle.shutdown().await.unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(printed, 3);
    assert_eq!(text.lines().count(), 3);
    assert_eq!(text.lines().filter(|l| l.contains("first")).count(), 1);
    assert!(text.contains("second"));
    assert!(text.contains("third"));
}

#[tokio::test(start_paused = true)]
async fn test_follow_prints_back_to_back_merges() {
    let source = ScriptedSource::new(vec![
        Ok(vec![entry("1", "first", 1)]),
        Ok(vec![entry("2", "second", 2)]),
    ]);
    let handle = spawn(source);

    let mut out = Vec::new();
    let (printed, ()) = tokio::join!(
        follow(&handle, sleep(Duration::from_secs(1)), &mut out),
        async {
            settle().await;
            handle.send(Command::Refresh).await.unwrap();
        }
    );
    handle.shutdown().await.unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(printed.unwrap(), 2);
    assert!(text.contains("first"));
    assert!(text.contains("second"));
}
