use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::theme;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], app);
    render_screen(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
    render_command_bar(f, chunks[3], app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let label = format!("{}:{s}", i + 1);
            if *s == app.screen {
                Line::from(Span::styled(
                    label,
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(label, theme::dim_style()))
            }
        })
        .collect();

    let mut flags = Vec::new();
    if app.options.hide_amounts {
        flags.push(Span::styled(" [hidden]", theme::masked_style()));
    }
    if app.options.exclude_fixed_assets {
        flags.push(Span::styled(" [excl. fixed]", theme::masked_style()));
    }

    let flags_width: u16 = flags.iter().map(|s| s.width() as u16).sum();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(flags_width + 1)])
        .split(area);

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(theme::OVERLAY)))
        .style(Style::default().bg(theme::HEADER_BG));
    f.render_widget(tabs, cols[0]);
    f.render_widget(
        Paragraph::new(Line::from(flags)).style(Style::default().bg(theme::HEADER_BG)),
        cols[1],
    );
}

fn render_screen(f: &mut Frame, area: Rect, app: &App) {
    match app.screen {
        Screen::Dashboard => super::screens::dashboard::render(f, area, app),
        Screen::Assets => super::screens::assets::render(f, area, app),
        Screen::Add => super::screens::add::render(f, area, app),
    }
}

fn mode_style(mode: InputMode) -> Style {
    let bg = match mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Command | InputMode::Editing => theme::GREEN,
        InputMode::Confirm => theme::RED,
    };
    Style::default()
        .fg(theme::HEADER_BG)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);

    let info = match app.screen {
        Screen::Add => format!(
            " Add | step {}/{} | {} staged",
            app.add_flow.step() + 1,
            app.add_flow.step_count(),
            app.add_flow.drafts().len()
        ),
        _ => format!(" {} | {} items", app.screen, app.summary.item_count),
    };

    let right = match app.screen {
        Screen::Dashboard => " h hide | x excl. fixed | a add | ? help ",
        Screen::Assets => " e edit | D delete | a add | ? help ",
        Screen::Add if app.add_flow.is_last_step() => {
            " Enter pick | u undo | p back | c save | Esc cancel "
        }
        Screen::Add => " Enter pick | u undo | n/p step | Esc cancel ",
    };

    let available = area.width as usize;
    let used = mode_label.len() + info.chars().count() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style(app.input_mode)),
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
        InputMode::Editing => {
            let prefix = app.prompt.as_ref().map(|p| p.prefix()).unwrap_or("> ");
            (
                Line::from(vec![
                    Span::styled(prefix, Style::default().fg(theme::GREEN)),
                    Span::styled(&app.command_input, theme::command_bar_style()),
                ]),
                Some((prefix.len() + app.command_input.chars().count()) as u16),
            )
        }
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(&app.confirm_message, Style::default().fg(theme::YELLOW)),
                Span::styled(" [y/N] ", Style::default().fg(theme::RED)),
            ]),
            None,
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

fn heading(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(theme::YELLOW)
            .add_modifier(Modifier::BOLD),
    ))
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let keys = [
        "  j/k or Up/Down   Move cursor           1-3        Switch tabs",
        "  Tab/Shift-Tab    Cycle tabs            g/G        Top/Bottom",
        "  Ctrl-d/u         Page Down/Up          Ctrl-q     Quit",
        "  h                Hide/show amounts     x          Exclude fixed assets",
        "  a                Add items             e (Assets) Edit selected",
        "  D (Assets)       Delete selected       :          Command mode",
        "  n/p (Add)        Next/Prev category    u (Add)    Undo last staged",
        "  c (Add)          Save staged items     Esc        Cancel/Back",
    ];

    let mut help_text = vec![
        Line::from(Span::styled(
            " AsseTUI Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading(" Keys"),
    ];
    help_text.extend(
        keys.iter()
            .map(|k| Line::from(Span::styled(*k, theme::normal_style()))),
    );
    help_text.push(Line::from(""));
    help_text.push(heading(" Commands"));

    // One line per command, keyed by its longest alias
    let mut cmd_lines: Vec<(&str, &str)> = Vec::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        match cmd_lines.iter_mut().find(|(_, d)| *d == cmd.description) {
            Some(entry) if entry.0.len() < name.len() => entry.0 = name,
            Some(_) => {}
            None => cmd_lines.push((name, cmd.description)),
        }
    }
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<16} {desc}"),
            theme::normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        theme::dim_style(),
    )));

    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 78.min(area.width.saturating_sub(4));
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
