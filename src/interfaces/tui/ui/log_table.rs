use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Row, Table, TableState, Wrap},
};

use crate::interfaces::tui::app::App;
use crate::interfaces::tui::constants::{URL_TRUNCATE_LENGTH, colors};
use crate::utils::{format_local_time, format_location, truncate_display};

const HEADERS: [&str; 6] = ["Time", "Slug", "Target", "IP", "Location", "Clicks"];

fn header_cell(name: &'static str) -> Span<'static> {
    Span::styled(
        name,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

fn table_block(title: String, border: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(title)
        .title_style(
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        )
}

fn draw_message(frame: &mut Frame, area: Rect, title: String, lines: Vec<Line<'static>>, border: Color) {
    let paragraph = Paragraph::new(lines)
        .block(table_block(title, border))
        .alignment(ratatui::layout::Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

pub fn draw_log_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let view = &app.view;
    let title = if view.is_live() {
        format!("Live Logs | {}", view.summary())
    } else {
        "Live Logs".to_string()
    };

    // 错误信息替代表格
    if let Some(err) = &view.error {
        let lines = vec![
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled(
                err.message(),
                Style::default()
                    .fg(colors::ERROR)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("{} {}", err.code(), err.error_type()),
                Style::default().fg(colors::MUTED),
            )),
        ];
        draw_message(frame, area, title, lines, colors::ERROR);
        return;
    }

    if view.shows_placeholder() {
        let lines = vec![
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled(
                "Waiting for logs...",
                Style::default().fg(colors::WARNING),
            )),
        ];
        draw_message(frame, area, title, lines, colors::MUTED);
        return;
    }

    let total = app.display_count();
    if total == 0 {
        let hint = if view.is_live() {
            "No visits in the current window"
        } else {
            "Press [l] to start live mode"
        };
        let lines = vec![
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled(
                hint,
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        draw_message(frame, area, title, lines, colors::MUTED);
        return;
    }

    // border 2行 + header 1行 + header margin 1行
    let visible_height = (area.height as usize).saturating_sub(4);
    app.last_visible_height = visible_height.max(1);
    app.adjust_scroll_offset();

    let offset = app.scroll_offset.min(total.saturating_sub(1));
    let end = (offset + visible_height).min(total);

    let header = Row::new(HEADERS.map(header_cell)).bottom_margin(1);

    // 只构建可见行
    let rows: Vec<Row> = app.view.rows[offset..end]
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let bg = if entry.is_new {
                colors::NEW_ROW_BG
            } else if (offset + i) % 2 == 0 {
                colors::EVEN_ROW_BG
            } else {
                colors::ODD_ROW_BG
            };

            Row::new(vec![
                Span::styled(
                    format_local_time(&entry.updated_at),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    entry.slug.clone(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    truncate_display(&entry.target, URL_TRUNCATE_LENGTH).into_owned(),
                    Style::default().fg(Color::Blue),
                ),
                Span::styled(entry.ip.clone(), Style::default().fg(Color::Yellow)),
                Span::raw(format_location(entry.city.as_deref(), entry.country.as_deref())),
                Span::styled(entry.click.to_string(), Style::default().fg(Color::Green)),
            ])
            .style(Style::default().bg(bg))
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(19), // Time
            Constraint::Length(12), // Slug
            Constraint::Min(16),    // Target
            Constraint::Length(15), // IP
            Constraint::Length(16), // Location
            Constraint::Length(6),  // Clicks
        ],
    )
    .header(header)
    .block(table_block(title, Color::DarkGray))
    .row_highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White))
    .highlight_symbol("▶ ")
    .column_spacing(1);

    // 相对于可见窗口的选中位置
    let mut virtual_state = TableState::default();
    if app.selected_index >= offset && app.selected_index < end {
        virtual_state.select(Some(app.selected_index - offset));
    }

    frame.render_stateful_widget(table, area, &mut virtual_state);
}
