//! CLI mode

use crate::cli::Commands;
use crate::interfaces::cli::{CliError, run_cli_command};
use crate::runtime::lifetime::startup::prepare_startup;
use crate::system::panic_handler::RunMode;

/// Run CLI mode
///
/// `tail` goes through the full startup (config, logging, panic hook);
/// `config generate` needs none of it.
pub async fn run_cli(cmd: Commands, config_path: Option<&str>) -> Result<(), CliError> {
    if let Commands::Tail { .. } = cmd {
        let _ctx = prepare_startup(config_path, RunMode::Tail)
            .map_err(|e| CliError::ConfigError(format!("{:#}", e)))?;
        return run_cli_command(cmd, config_path).await;
    }
    run_cli_command(cmd, config_path).await
}
