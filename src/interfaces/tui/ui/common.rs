use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::interfaces::tui::app::{App, CurrentScreen};
use crate::interfaces::tui::constants::colors;

/// Draw title bar with version, live state and source
pub fn draw_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (state_text, state_color) = if app.view.is_live() {
        (" ● Live ", colors::SUCCESS)
    } else {
        (" ■ Stop ", colors::ERROR)
    };

    let title_text = vec![Line::from(vec![
        Span::styled("livelog", Style::default().fg(colors::PRIMARY).bold()),
        Span::styled(
            format!(" v{} ", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled("| ", Style::default().fg(Color::DarkGray)),
        Span::styled(state_text, Style::default().fg(state_color).bold()),
        Span::styled("| ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Limit: {} ", app.view.limit_label),
            Style::default().fg(colors::WARNING),
        ),
        Span::styled("| ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.source_label.as_str(), Style::default().fg(colors::MUTED)),
    ])];

    let title = Paragraph::new(title_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(colors::PRIMARY)),
        )
        .alignment(ratatui::layout::Alignment::Center);

    frame.render_widget(title, area);
}

/// Draw status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (status_text, status_style) = if let Some(err) = &app.view.error {
        (
            format!("[ERROR] {}", err.format_simple()),
            Style::default().fg(Color::White).bg(Color::Red).bold(),
        )
    } else if !app.status_message.is_empty() {
        (
            format!("[OK] {}", app.status_message),
            Style::default().fg(Color::Black).bg(Color::Green).bold(),
        )
    } else if app.view.loading {
        ("Fetching...".to_string(), Style::default().fg(colors::WARNING))
    } else if app.view.is_live() {
        (
            format!("Polling, {} entries retained", app.view.total),
            Style::default().fg(colors::PRIMARY),
        )
    } else {
        (
            "Stopped - press [l] to go live".to_string(),
            Style::default().fg(colors::MUTED),
        )
    };

    let status = Paragraph::new(status_text)
        .style(status_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .alignment(ratatui::layout::Alignment::Center);

    frame.render_widget(status, area);
}

/// Draw footer with keyboard shortcuts
pub fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let live_label = if app.view.is_live() { "Stop" } else { "Live" };
    let shortcuts = match app.current_screen {
        CurrentScreen::Main => vec![
            ("l", live_label, Color::Green),
            ("r", "Refresh", Color::Cyan),
            ("c", "Clear", Color::Red),
            ("[ ]", "Limit", Color::Yellow),
            ("Up/Down", "Select", Color::Cyan),
            ("?", "Help", Color::Blue),
            ("q", "Quit", Color::Magenta),
        ],
        CurrentScreen::Help => vec![("q/Esc", "Close", Color::Red)],
    };

    let mut spans = Vec::new();
    for (i, (key, desc, color)) in shortcuts.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(*color).bold(),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Color::White),
        ));
    }

    let footer = Paragraph::new(Line::from(spans)).alignment(ratatui::layout::Alignment::Center);

    frame.render_widget(footer, area);
}
