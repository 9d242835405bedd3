use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::models::AssetCategory;
use crate::summary::format_amount;
use crate::ui::app::App;
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Step progress + description
            Constraint::Min(6),    // Presets and staged drafts
        ])
        .split(area);

    render_progress(f, chunks[0], app);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    render_presets(f, cols[0], app);
    render_staged(f, cols[1], app);
}

fn render_progress(f: &mut Frame, area: Rect, app: &App) {
    let current = app.add_flow.current_category();

    let mut steps: Vec<Span> = Vec::new();
    for (i, category) in AssetCategory::all().iter().enumerate() {
        if i > 0 {
            steps.push(Span::styled(" > ", Style::default().fg(theme::OVERLAY)));
        }
        let staged = app.add_flow.drafts_for(*category).count();
        let label = if staged > 0 {
            format!("{} ({staged})", category.label())
        } else {
            category.label().to_string()
        };
        let style = if *category == current {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else if i < app.add_flow.step() {
            theme::normal_style()
        } else {
            theme::dim_style()
        };
        steps.push(Span::styled(label, style));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(
                " Step {}/{} ",
                app.add_flow.step() + 1,
                app.add_flow.step_count()
            ),
            theme::title_style(),
        ));

    let text = Paragraph::new(vec![
        Line::from(steps),
        Line::from(Span::styled(current.description(), theme::dim_style())),
    ])
    .block(block);
    f.render_widget(text, area);
}

fn render_presets(f: &mut Frame, area: Rect, app: &App) {
    let category = app.add_flow.current_category();
    let color = theme::category_color(category);
    let items: Vec<ListItem> = app
        .preset_options()
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let style = if i == app.preset_index {
                theme::selected_style()
            } else {
                theme::normal_style()
            };
            ListItem::new(Line::from(Span::styled(format!(" {name}"), style)))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(Span::styled(
                format!(" {} ", category.label()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(list, area);
}

fn render_staged(f: &mut Frame, area: Rect, app: &App) {
    let hidden = app.options.hide_amounts;
    let drafts = app.add_flow.drafts();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" Staged ({}) ", drafts.len()),
            theme::title_style(),
        ));

    if drafts.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Pick a preset and enter an amount",
                theme::dim_style(),
            )),
            Line::from(Span::styled(
                "Nothing is saved until the last step",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let lines: Vec<ListItem> = drafts
        .iter()
        .map(|d| {
            let amount_style = if d.category.is_liability() {
                theme::liability_style()
            } else {
                theme::asset_style()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {:<14}", d.category.label()), theme::dim_style()),
                Span::styled(format!("{:<24}", d.choice.name()), theme::normal_style()),
                Span::styled(format_amount(d.amount, hidden), amount_style),
            ]))
        })
        .collect();

    f.render_widget(List::new(lines).block(block), area);
}
