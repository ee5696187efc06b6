//! Mode routing
//!
//! - TUI mode (default when no subcommand is given)
//! - CLI mode (`tail`, `config generate`)

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(feature = "cli")]
pub use cli::run_cli;

#[cfg(feature = "tui")]
pub use tui::run_tui;

use crate::cli::{Cli, Commands};
use crate::errors::LiveLogError;

/// Mode detection result
#[derive(Debug, PartialEq)]
pub enum Mode {
    #[cfg(feature = "cli")]
    Cli,
    #[cfg(feature = "tui")]
    Tui,
    Unknown,
}

/// Detect which mode to run based on the parsed command line
pub fn detect_mode(cli: &Cli) -> Mode {
    match &cli.command {
        #[cfg(feature = "tui")]
        Some(Commands::Tui) | None => Mode::Tui,
        #[cfg(feature = "cli")]
        Some(_) => Mode::Cli,
        #[allow(unreachable_patterns)]
        _ => Mode::Unknown,
    }
}

/// Run the selected mode to completion
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match detect_mode(&cli) {
        #[cfg(feature = "tui")]
        Mode::Tui => run_tui(cli.config.as_deref()).await,
        #[cfg(feature = "cli")]
        Mode::Cli => match cli.command {
            Some(cmd) => run_cli(cmd, cli.config.as_deref()).await.map_err(Into::into),
            None => Err(anyhow::anyhow!("No command given")),
        },
        Mode::Unknown => Err(anyhow::anyhow!(
            "No mode available: build with the 'cli' or 'tui' feature"
        )),
    }
}

/// Colored one-line report for the binary entry point
pub fn format_error(err: &anyhow::Error) -> String {
    use colored::Colorize;

    if let Some(e) = err.downcast_ref::<LiveLogError>() {
        return e.format_colored();
    }
    #[cfg(feature = "cli")]
    if let Some(e) = err.downcast_ref::<crate::interfaces::cli::CliError>() {
        return e.format_colored();
    }
    format!("{} {:#}", "[ERROR]".red().bold(), err)
}
