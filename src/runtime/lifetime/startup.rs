//! Startup sequence shared by the tail and TUI modes

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;

use crate::config::{StaticConfig, init_config};
use crate::system::logging::{ConsoleTarget, init_logging};
use crate::system::panic_handler::{RunMode, install_panic_hook};

pub struct StartupContext {
    pub config: Arc<StaticConfig>,
    /// Flushes buffered log lines on drop; keep alive until exit
    pub log_guard: WorkerGuard,
}

/// 加载 .env 与配置、初始化日志并安装 panic hook
pub fn prepare_startup(config_path: Option<&str>, mode: RunMode) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();

    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        eprintln!("Warning: failed to load .env: {}", e);
    }

    let config = init_config(config_path).context("Failed to load configuration")?;

    let console = match mode {
        RunMode::Tail => ConsoleTarget::Stderr,
        RunMode::Tui => ConsoleTarget::Discard,
    };
    let log_guard =
        init_logging(&config.logging, console).context("Failed to initialize logging")?;

    install_panic_hook(mode);

    info!(
        "livelog v{} starting ({:?} mode)",
        env!("CARGO_PKG_VERSION"),
        mode
    );
    debug!(
        "Source: {}{} (admin: {}), poll every {}ms",
        config.source.base_url, config.source.path, config.source.admin, config.poll.interval_ms
    );
    debug!("Startup completed in {:?}", start_time.elapsed());

    Ok(StartupContext { config, log_guard })
}
