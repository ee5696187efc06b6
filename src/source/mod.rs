//! Live-log data source
//!
//! `LogSource` is the seam between the session and whatever produces
//! snapshots. `HttpLogSource` talks to the short-link service; tests plug
//! in scripted sources.

mod http;
pub mod poller;

pub use http::HttpLogSource;
pub use poller::{FetchTicket, LiveState, Poller};

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::LogEntry;

/// 快照数据源
#[async_trait]
pub trait LogSource: Send + Sync {
    /// 拉取一次当前窗口内的访问记录
    async fn fetch(&self, admin: bool) -> Result<Vec<LogEntry>>;

    /// 数据源名称（用于日志）
    fn name(&self) -> &'static str;
}
