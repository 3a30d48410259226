use std::rc::Rc;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::app::{App, InputMode};
use super::commands;
use super::screens;
use super::theme;
use super::util::format_amount;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(u16::from(app.error.is_some())), // Error banner
            Constraint::Min(5),    // Dashboard
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_header(f, chunks[0], app);
    if let Some(err) = &app.error {
        render_error_banner(f, chunks[1], err);
    }
    render_dashboard(f, chunks[2], app);
    render_status_bar(f, chunks[3], app);
    render_command_bar(f, chunks[4], app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

/// Rows: metric cards, charts, breakdown + budget.
fn dashboard_rows(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Percentage(50),
            Constraint::Min(8),
        ])
        .split(area)
}

fn side_by_side(area: Rect, left: u16) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(left), Constraint::Percentage(100 - left)])
        .split(area)
}

/// Number of breakdown rows visible in a terminal of size `area`.
pub(crate) fn breakdown_capacity(area: Rect) -> usize {
    // Header, status bar, command bar; the error banner may take one more.
    let body = Rect {
        height: area.height.saturating_sub(4),
        ..area
    };
    let bottom = dashboard_rows(body)[2];
    // Borders and the table header
    bottom.height.saturating_sub(3) as usize
}

fn render_dashboard(f: &mut Frame, area: Rect, app: &App) {
    let rows = dashboard_rows(area);
    screens::dashboard::render_summary_cards(f, rows[0], app);

    let charts = side_by_side(rows[1], 50);
    screens::dashboard::render_distribution(f, charts[0], app);
    screens::dashboard::render_category_bars(f, charts[1], app);

    let bottom = side_by_side(rows[2], 55);
    screens::dashboard::render_breakdown(f, bottom[0], app);
    screens::budget::render(f, bottom[1], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ExpenseDash ", theme::header_style()),
        Span::styled("│ ", Style::default().fg(theme::OVERLAY)),
        Span::styled(
            format!("{} {}", app.period.month_name(), app.period.year()),
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .style(Style::default().bg(theme::HEADER_BG));
    f.render_widget(header, area);
}

fn render_error_banner(f: &mut Frame, area: Rect, err: &str) {
    let banner = Paragraph::new(Span::styled(format!(" {err} "), theme::error_style()))
        .style(theme::error_style());
    f.render_widget(banner, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
        InputMode::Command => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::GREEN)
            .add_modifier(Modifier::BOLD),
    };

    let limit = if app.budget_limit.is_zero() {
        "no limit".to_string()
    } else {
        format!("limit {}", format_amount(app.budget_limit))
    };
    let info = format!(" {} | {limit}", app.period);
    let right = " H/L month | [/] year | +/- budget | ? help ";

    let available = area.width as usize;
    let used = mode_label.chars().count() + info.chars().count() + right.chars().count();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Normal => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, ? for help",
                    theme::dim_style(),
                ))
            } else {
                Line::from(Span::styled(
                    &app.status_message,
                    theme::command_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let section = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        ))
    };

    let mut help_text = vec![
        Line::from(Span::styled(
            " ExpenseDash Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section(" Navigation"),
        Line::from(Span::styled(
            "  H/L or Left/Right  Prev/Next month     [/]        Prev/Next year",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  j/k or Up/Down     Move in breakdown   g/G        Top/Bottom",
            theme::normal_style(),
        )),
        Line::from(""),
        section(" Budget"),
        Line::from(Span::styled(
            "  +/-                Raise/Lower limit   Ctrl-q     Quit",
            theme::normal_style(),
        )),
        Line::from(""),
        section(" Commands"),
    ];

    // Build command list dynamically from COMMANDS registry
    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = Vec::new();
    let mut names: Vec<&&str> = commands::COMMANDS.keys().filter(|n| n.len() > 1).collect();
    names.sort();
    for name in names {
        if let Some(cmd) = commands::COMMANDS.get(*name) {
            if seen.insert(cmd.description) {
                cmd_lines.push((*name, cmd.description));
            }
        }
    }
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<16} {desc}"),
            theme::normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        Style::default().fg(theme::TEXT_DIM),
    )));

    // Center the popup, clamped to terminal height
    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 76.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(help, popup_area);
}
