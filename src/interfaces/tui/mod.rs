//! Terminal User Interface (TUI) module
//!
//! Interactive live-log view. The session driver runs on the tokio runtime;
//! this loop only forwards key presses as commands and redraws the latest
//! published view every tick.

use std::io;
use std::sync::Arc;

use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};
use tracing::{debug, info};

mod action;
mod app;
mod constants;
mod event_handler;
mod ui;

use crate::config::StaticConfig;
use crate::errors::{LiveLogError, Result};
use crate::session::{DriverHandle, LiveLogSession, SessionDriver, SessionSettings};
use crate::source::{HttpLogSource, LogSource};
use app::App;
use constants::TICK_RATE;
use ui::ui;

/// Run the TUI application
pub async fn run_tui(config: Arc<StaticConfig>) -> Result<()> {
    let settings = SessionSettings::from_config(&config)?;
    let source: Arc<dyn LogSource> = Arc::new(HttpLogSource::new(&config.source)?);
    let handle = SessionDriver::spawn(LiveLogSession::new(settings), source);
    let source_label = format!("{}{}", config.source.base_url, config.source.path);

    // Setup terminal
    enable_raw_mode().map_err(terminal_error)?;
    let mut stderr = io::stderr();
    execute!(stderr, EnterAlternateScreen).map_err(terminal_error)?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend).map_err(terminal_error)?;

    let mut app = App::new(source_label, handle.view());
    info!("TUI started");
    let res = run_app(&mut terminal, &mut app, &handle);

    // Restore terminal
    disable_raw_mode().map_err(terminal_error)?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(terminal_error)?;
    terminal.show_cursor().map_err(terminal_error)?;

    handle.shutdown().await?;
    res
}

/// Main application loop
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, handle: &DriverHandle) -> Result<()>
where
    B::Error: std::fmt::Display,
{
    loop {
        app.sync(handle.view());
        terminal
            .draw(|f| ui(f, app))
            .map_err(|e| LiveLogError::terminal(e.to_string()))?;

        if !event::poll(TICK_RATE).map_err(terminal_error)? {
            continue;
        }
        let Event::Key(key) = event::read().map_err(terminal_error)? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let action = event_handler::handle_key_event(app.current_screen, key.code);
        if action.should_quit() {
            debug!("Quit requested");
            return Ok(());
        }
        if let Some(cmd) = app.update(action)
            && let Err(e) = handle.try_send(cmd)
        {
            if handle.is_finished() {
                return Err(e);
            }
            debug!("Dropped {:?}: {}", cmd, e.message());
        }
    }
}

fn terminal_error(e: io::Error) -> LiveLogError {
    LiveLogError::terminal(e.to_string())
}
