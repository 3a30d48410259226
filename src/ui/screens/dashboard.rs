use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_percent, progress_bar, truncate};

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()))
}

// ── Metric cards ─────────────────────────────────────────────

pub(crate) fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(40),
        ])
        .split(area);

    let category_count = if app.totals.is_no_data() {
        0
    } else {
        app.totals.len()
    };

    render_card(
        f,
        cards[0],
        "Total Monthly Expenses",
        format_amount(app.totals.total()),
        theme::RED,
    );
    render_card(
        f,
        cards[1],
        "Number of Categories",
        category_count.to_string(),
        theme::ACCENT,
    );

    let largest = match app.largest() {
        Some((label, amount)) => format!("{} ({})", truncate(label, 20), format_amount(amount)),
        None => "—".into(),
    };
    render_card(f, cards[2], "Largest Category", largest, theme::YELLOW);
}

fn render_card(f: &mut Frame, area: Rect, title: &str, value: String, color: ratatui::style::Color) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(panel(title));

    f.render_widget(text, area);
}

// ── Charts ───────────────────────────────────────────────────

/// Share of the month per category, one proportion bar each.
pub(crate) fn render_distribution(f: &mut Frame, area: Rect, app: &App) {
    if app.totals.is_no_data() || app.totals.is_empty() {
        render_empty(f, area, "Monthly Expense Distribution", app);
        return;
    }

    let label_width = 16;
    let bar_width = (area.width as usize).saturating_sub(label_width + 12).max(4);

    let lines: Vec<Line> = app
        .rows()
        .enumerate()
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, row)| {
            let color = theme::series_color(i);
            let ratio = row
                .percent_of_total
                .and_then(|p| (p / Decimal::ONE_HUNDRED).to_f64())
                .unwrap_or(0.0);
            Line::from(vec![
                Span::styled(
                    format!("{:<label_width$}", truncate(row.category, label_width - 1)),
                    theme::normal_style(),
                ),
                Span::styled(progress_bar(ratio, bar_width), Style::default().fg(color)),
                Span::styled(
                    format!(" {:>7}", format_percent(row.percent_of_total)),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect();

    let chart = Paragraph::new(lines).block(panel("Monthly Expense Distribution"));
    f.render_widget(chart, area);
}

/// Horizontal bars of amount per category, largest at the top.
pub(crate) fn render_category_bars(f: &mut Frame, area: Rect, app: &App) {
    if app.totals.is_no_data() || app.totals.is_empty() {
        render_empty(f, area, "Monthly Expenses by Category", app);
        return;
    }

    let bars: Vec<Bar> = app
        .rows()
        .enumerate()
        .map(|(i, row)| {
            let val = row.amount.max(Decimal::ZERO).round().to_u64().unwrap_or(0);
            Bar::default()
                .value(val)
                .text_value(format_amount(row.amount))
                .label(Line::from(truncate(row.category, 12)))
                .style(Style::default().fg(theme::series_color(i)))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(theme::series_color(i))
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(panel("Monthly Expenses by Category"))
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(0)
        .label_style(theme::normal_style());

    f.render_widget(chart, area);
}

fn render_empty(f: &mut Frame, area: Rect, title: &str, app: &App) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "No expenses recorded for {} {}",
                app.period.month_name(),
                app.period.year()
            ),
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(panel(title));
    f.render_widget(msg, area);
}

// ── Detailed breakdown ───────────────────────────────────────

pub(crate) fn render_breakdown(f: &mut Frame, area: Rect, app: &App) {
    let header_cells = ["Category", "Amount", "Percentage"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .rows()
        .enumerate()
        .skip(app.row_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, row)| {
            let style = if i == app.row_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(truncate(row.category, 28)),
                Cell::from(format_amount(row.amount)),
                Cell::from(format_percent(row.percent_of_total)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(16),
        Constraint::Length(16),
        Constraint::Length(11),
    ];

    let table = Table::new(rows, widths).header(header).block(panel(&format!(
        "Detailed Breakdown ({})",
        app.rows().len()
    )));

    f.render_widget(table, area);
}
