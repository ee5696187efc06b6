//! CLI interface module
//!
//! Non-interactive commands: `tail` and `config generate`.

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands};
use crate::errors::LiveLogError;
use commands::{config_generate, run_tail};

#[derive(Debug)]
pub enum CliError {
    ConfigError(String),
    SourceError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::ConfigError(msg) => format!("Config error: {}", msg),
            CliError::SourceError(msg) => format!("Source error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::ConfigError(msg) => {
                format!("{} {}", "Config error:".yellow().bold(), msg.white())
            }
            CliError::SourceError(msg) => {
                format!("{} {}", "Source error:".red().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<LiveLogError> for CliError {
    fn from(err: LiveLogError) -> Self {
        match err {
            LiveLogError::Config(_) | LiveLogError::Validation(_) => {
                CliError::ConfigError(err.message())
            }
            LiveLogError::SourceRequest(_)
            | LiveLogError::SourceStatus { .. }
            | LiveLogError::Serialization(_) => CliError::SourceError(err.message()),
            _ => CliError::CommandError(err.format_simple()),
        }
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands, config_path: Option<&str>) -> Result<(), CliError> {
    match cmd {
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => config_generate(output_path, force).await,

        Commands::Tail { admin, limit } => {
            let config = crate::config::init_config(config_path)?;
            run_tail(config, admin, limit).await
        }

        #[cfg(feature = "tui")]
        Commands::Tui => Err(CliError::CommandError(
            "TUI is started by the runtime, not the CLI".to_string(),
        )),
    }
}
