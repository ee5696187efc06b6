//! `livelog tail`: follow the live log on stdout

use std::future::Future;
use std::io::{self, Write};
use std::sync::Arc;

use colored::Colorize;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::config::StaticConfig;
use crate::errors::Result;
use crate::interfaces::cli::CliError;
use crate::models::LogEntry;
use crate::session::{Command, DriverHandle, LiveLogSession, SessionDriver, SessionSettings};
use crate::source::{HttpLogSource, LogSource};
use crate::utils::{format_local_time, format_location};

pub async fn run_tail(
    config: Arc<StaticConfig>,
    admin: bool,
    limit: Option<usize>,
) -> std::result::Result<(), CliError> {
    let mut settings = SessionSettings::from_config(&config)?;
    settings.admin |= admin;
    if let Some(limit) = limit {
        settings.limit.set(limit)?;
    }

    let source: Arc<dyn LogSource> = Arc::new(HttpLogSource::new(&config.source)?);
    info!(
        "Following {}{} (admin: {})",
        config.source.base_url, config.source.path, settings.admin
    );

    let handle = SessionDriver::spawn(LiveLogSession::new(settings), source);
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            debug!("Ctrl-C handler unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let printed = follow(&handle, shutdown, &mut io::stdout()).await;
    handle.shutdown().await?;
    let printed = printed?;

    eprintln!("{} {} entries", "Stopped after".dimmed(), printed);
    Ok(())
}

/// Enable live mode and write every highlighted entry to `out` until
/// `shutdown` resolves or the driver stops. Returns the number of lines
/// written.
///
/// Entries come from the per-merge broadcast, so every merge is printed
/// even when several land between two view updates.
pub async fn follow<F, W>(handle: &DriverHandle, shutdown: F, out: &mut W) -> Result<usize>
where
    F: Future<Output = ()>,
    W: Write,
{
    let mut merges = handle.merges();
    let mut views = handle.subscribe();
    views.borrow_and_update();
    handle.send(Command::SetLive(true)).await?;

    let mut views_open = true;
    let mut last_error: Option<String> = None;
    let mut printed = 0;
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            _ = &mut shutdown => break,
            event = merges.recv() => match event {
                Ok(event) => {
                    for entry in &event.entries {
                        writeln!(out, "{}", format_tail_line(entry))?;
                        printed += 1;
                    }
                    out.flush()?;
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Output fell behind, {} merges skipped", skipped);
                }
                Err(RecvError::Closed) => break,
            },
            changed = views.changed(), if views_open => {
                if changed.is_err() {
                    views_open = false;
                    continue;
                }
                let view = views.borrow_and_update().clone();
                let error = view.error.as_ref().map(|e| e.format_simple());
                if error != last_error {
                    if let Some(e) = &view.error {
                        eprintln!("{}", e.format_colored());
                    }
                    last_error = error;
                }
            }
        }
    }

    Ok(printed)
}

/// One colored line per entry
pub fn format_tail_line(entry: &LogEntry) -> String {
    format!(
        "{} {} {} {} {} {}",
        format_local_time(&entry.updated_at).dimmed(),
        entry.slug.cyan().bold(),
        entry.ip.yellow(),
        format_location(entry.city.as_deref(), entry.country.as_deref()),
        format!("(clicks: {})", entry.click).green(),
        format!("-> {}", entry.target).blue()
    )
}
