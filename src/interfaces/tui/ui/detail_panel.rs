//! Detail panel for the selected log entry
//!
//! Shows the untruncated target URL and every field of the row.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::interfaces::tui::app::App;
use crate::utils::{PLACEHOLDER, format_local_time, format_location};

fn field(label: &'static str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

/// Draw the detail panel showing the selected entry
pub fn draw_detail_panel(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title("Details")
        .title_style(Style::default().fg(Color::Cyan).bold())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(entry) = app.selected_entry() else {
        let empty_text = vec![
            Line::from(""),
            Line::from(""),
            Line::from(vec![Span::styled(
                "No entry selected",
                Style::default().fg(Color::DarkGray),
            )]),
        ];
        let paragraph = Paragraph::new(empty_text)
            .block(block)
            .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    };

    let created = if entry.created_at.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        format_local_time(&entry.created_at)
    };

    let mut details = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Slug:      ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                entry.slug.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled("Target:", Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled(
            entry.target.clone(),
            Style::default().fg(Color::Blue),
        )),
        Line::from(""),
        field("IP:        ", entry.ip.clone(), Color::Yellow),
        field(
            "Location:  ",
            format_location(entry.city.as_deref(), entry.country.as_deref()),
            Color::White,
        ),
        field("Clicks:    ", entry.click.to_string(), Color::Green),
        Line::from(""),
        field("Updated:   ", format_local_time(&entry.updated_at), Color::White),
        field("Created:   ", created, Color::White),
    ];

    if entry.is_new {
        details.push(Line::from(""));
        details.push(Line::from(Span::styled(
            "NEW",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));
    }

    let paragraph = Paragraph::new(details)
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
