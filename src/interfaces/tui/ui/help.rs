use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::widgets::Popup;
use crate::interfaces::tui::constants::{colors, popup};

fn section(title: &'static str) -> Line<'static> {
    Line::from(vec![Span::styled(
        title,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )])
}

fn shortcut(keys: &'static str, desc: &'static str, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<18}", keys), Style::default().fg(color)),
        Span::styled(desc, Style::default().fg(Color::White)),
    ])
}

pub fn draw_help_screen(frame: &mut Frame, area: Rect) {
    let inner_area = Popup::new("Help - Keyboard Shortcuts", popup::HELP).render(frame, area);

    let help_text = vec![
        Line::from(""),
        section("LIVE"),
        shortcut("l, Space", "Toggle live polling / stop", Color::Green),
        shortcut("r", "Refresh now (live only)", Color::Cyan),
        shortcut("c", "Clear the list", Color::Red),
        shortcut("[ / ]", "Smaller / larger display limit", Color::Yellow),
        Line::from(""),
        section("NAVIGATION"),
        shortcut("Up/Down, j/k", "Select entry", Color::Cyan),
        shortcut("Home, g", "Jump to newest", Color::Cyan),
        shortcut("End, G", "Jump to oldest", Color::Cyan),
        shortcut("PageUp/PageDown", "Scroll 10 entries", Color::Cyan),
        Line::from(""),
        section("ROWS"),
        Line::from(vec![
            Span::styled("  ", Style::default()),
            Span::styled(
                " new / updated ",
                Style::default().fg(Color::White).bg(colors::NEW_ROW_BG),
            ),
            Span::styled(
                "  highlighted for a moment after each poll",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(""),
        section("SYSTEM"),
        shortcut("?", "Show this help", Color::Blue),
        shortcut("q, Esc", "Quit", Color::Magenta),
    ];

    frame.render_widget(Paragraph::new(help_text), inner_area);
}
