//! TUI mode

use anyhow::{Context, Result};

use crate::runtime::lifetime::startup::prepare_startup;
use crate::system::panic_handler::RunMode;

/// Run TUI mode
pub async fn run_tui(config_path: Option<&str>) -> Result<()> {
    let ctx = prepare_startup(config_path, RunMode::Tui)?;
    crate::interfaces::tui::run_tui(ctx.config.clone())
        .await
        .context("TUI exited with an error")?;
    drop(ctx);
    Ok(())
}
