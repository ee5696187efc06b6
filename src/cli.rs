//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// livelog - live access-log viewer for the short-link service
#[derive(Parser, Debug)]
#[command(name = "livelog")]
#[command(version)]
#[command(about = "Live access-log viewer for a short-link service", long_about = None)]
pub struct Cli {
    /// Config file path (default: livelog.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive live view (default)
    #[cfg(feature = "tui")]
    Tui,

    /// Enable live mode and print highlighted entries as they arrive
    #[cfg(feature = "cli")]
    Tail {
        /// Query as administrator (overrides source.admin)
        #[arg(long)]
        admin: bool,

        /// Display limit (overrides display.default_limit)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Manage configuration
    #[cfg(feature = "cli")]
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: livelog.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}
