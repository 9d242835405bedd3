use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::summary::{chart_slices, format_amount, format_ratio, MASK};
use crate::ui::app::App;
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Min(10),   // Category chart
            Constraint::Length(1), // Last updated
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_category_chart(f, chunks[1], app);
    render_footer(f, chunks[2], app);
}

fn signed_color(amount: Decimal) -> Color {
    if amount >= Decimal::ZERO {
        theme::GREEN
    } else {
        theme::RED
    }
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let s = &app.summary;
    let hidden = app.options.hide_amounts;
    let asset_count = app.items.iter().filter(|i| !i.is_liability()).count();
    let liability_count = app.items.len() - asset_count;

    render_card(
        f,
        cards[0],
        "Total Assets",
        format_amount(s.total_assets, hidden),
        theme::GREEN,
        if app.options.exclude_fixed_assets {
            "excl. fixed".to_string()
        } else {
            format!("{asset_count} items")
        },
    );
    render_card(
        f,
        cards[1],
        "Total Liabilities",
        format_amount(s.total_liabilities, hidden),
        theme::RED,
        format!("{liability_count} items"),
    );
    render_card(
        f,
        cards[2],
        "Net Assets",
        format_amount(s.net_assets, hidden),
        signed_color(s.net_assets),
        String::new(),
    );

    let ratio_color = if s.debt_ratio > Decimal::ONE_HUNDRED {
        theme::RED
    } else if s.debt_ratio > Decimal::from(50) {
        theme::YELLOW
    } else {
        theme::GREEN
    };
    render_card(
        f,
        cards[3],
        "Debt Ratio",
        format_ratio(s.debt_ratio),
        ratio_color,
        "liabilities / assets".to_string(),
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    display: String,
    color: Color,
    subtitle: String,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            display,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn chart_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" By Category ", theme::title_style()))
}

fn render_category_chart(f: &mut Frame, area: Rect, app: &App) {
    let slices = chart_slices(&app.summary.by_category, app.summary.total_assets);
    if slices.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "Nothing recorded yet. Press a to add assets and liabilities",
            theme::dim_style(),
        )))
        .centered()
        .block(chart_block());
        f.render_widget(msg, area);
        return;
    }

    let hidden = app.options.hide_amounts;
    let bars: Vec<Bar> = slices
        .iter()
        .map(|slice| {
            let color = theme::category_color(slice.category);
            let text = if hidden {
                MASK.to_string()
            } else {
                format_ratio(slice.share)
            };
            Bar::default()
                .value(slice.amount.round().to_u64().unwrap_or(0))
                .text_value(text)
                .label(Line::from(slice.category.label()))
                .style(Style::default().fg(color))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(color)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let inner_width = area.width.saturating_sub(2);
    let bar_width = (inner_width / slices.len() as u16)
        .saturating_sub(2)
        .clamp(6, 18);

    let chart = BarChart::default()
        .block(chart_block())
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(2);

    f.render_widget(chart, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let updated = match app.summary.last_update {
        Some(ts) => ts
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        None => "never".to_string(),
    };
    let line = Line::from(vec![
        Span::styled(" Last updated: ", theme::dim_style()),
        Span::styled(updated, theme::normal_style()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
