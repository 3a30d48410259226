use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{budget_message, format_amount, format_percent};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Budget Analysis ", theme::title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(analysis) = app.analysis.as_ref() else {
        f.render_widget(
            Paragraph::new(Span::styled("Budget unavailable", theme::dim_style())).centered(),
            inner,
        );
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Limit / remaining / used
            Constraint::Length(1), // Gap
            Constraint::Length(1), // Gauge
            Constraint::Length(1), // Gap
            Constraint::Min(1),    // Message
        ])
        .split(inner);

    let color = theme::status_color(analysis.status);
    let remaining_color = if analysis.remaining < Decimal::ZERO {
        theme::RED
    } else {
        theme::GREEN
    };

    let figures = Paragraph::new(vec![
        figure_line("Budget Limit", format_amount(analysis.limit), theme::TEXT),
        figure_line(
            "Remaining Budget",
            format_amount(analysis.remaining),
            remaining_color,
        ),
        figure_line("Budget Used", format_percent(analysis.usage_percent), color),
    ]);
    f.render_widget(figures, chunks[0]);

    if analysis.has_limit() {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(color).bg(theme::SURFACE))
            .ratio(analysis.progress_ratio())
            .label(Span::styled(
                format_percent(analysis.usage_percent),
                Style::default()
                    .fg(theme::HEADER_BG)
                    .add_modifier(Modifier::BOLD),
            ));
        f.render_widget(gauge, chunks[2]);
    }

    let message_style = if analysis.has_limit() {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        theme::dim_style()
    };
    f.render_widget(
        Paragraph::new(Span::styled(budget_message(analysis), message_style)),
        chunks[4],
    );
}

fn figure_line(label: &str, value: String, color: ratatui::style::Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<18}"), theme::dim_style()),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}
