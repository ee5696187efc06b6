// UI submodules
mod common;
mod detail_panel;
mod help;
mod log_table;
pub mod widgets;

pub use common::{draw_footer, draw_status_bar, draw_title_bar};
pub use detail_panel::draw_detail_panel;
pub use help::draw_help_screen;
pub use log_table::draw_log_table;

use super::app::{App, CurrentScreen};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

/// Main UI rendering entry point
pub fn ui(frame: &mut Frame, app: &mut App) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Status
            Constraint::Length(2), // Footer
        ])
        .split(frame.area());

    draw_title_bar(frame, app, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(68), // Left: log table
            Constraint::Percentage(32), // Right: detail panel
        ])
        .split(main_chunks[1]);

    draw_log_table(frame, app, content_chunks[0]);
    draw_detail_panel(frame, app, content_chunks[1]);

    if app.current_screen == CurrentScreen::Help {
        draw_help_screen(frame, main_chunks[1]);
    }

    draw_status_bar(frame, app, main_chunks[2]);
    draw_footer(frame, app, main_chunks[3]);
}
