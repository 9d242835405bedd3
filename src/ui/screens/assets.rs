use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::summary::format_amount;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" Assets & Liabilities ({}) ", app.items.len()),
            theme::title_style(),
        ));

    if app.items.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No items recorded", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Press a to walk through the categories and add some",
                theme::dim_style(),
            )),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Category", "Name", "Subcategory", "Amount", "Updated"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let hidden = app.options.hide_amounts;
    let rows: Vec<Row> = app
        .items
        .iter()
        .enumerate()
        .skip(app.item_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, item)| {
            let amount_style = if hidden {
                theme::masked_style()
            } else if item.is_liability() {
                theme::liability_style()
            } else {
                theme::asset_style()
            };

            let style = if i == app.item_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let sub = if item.is_custom() {
                format!("{} *", item.sub_category)
            } else {
                item.sub_category.clone()
            };

            Row::new(vec![
                Cell::from(Span::styled(
                    item.category.label(),
                    Style::default().fg(theme::category_color(item.category)),
                )),
                Cell::from(truncate(&item.name, 30)),
                Cell::from(truncate(&sub, 24)),
                Cell::from(Span::styled(format_amount(item.amount, hidden), amount_style)),
                Cell::from(
                    item.update_date
                        .with_timezone(&chrono::Local)
                        .format("%Y-%m-%d")
                        .to_string(),
                ),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Min(16),
        Constraint::Length(24),
        Constraint::Length(18),
        Constraint::Length(11),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}
