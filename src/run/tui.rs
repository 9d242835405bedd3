use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::db::Database;
use crate::ui::app::{App, InputMode, Prompt, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(db: &mut Database) -> Result<()> {
    let mut app = App::new();
    app.refresh(db)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!(items = app.items.len(), "tui started");
    let result = run_app(&mut terminal, &mut app, db);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %format!("{e:#}"), "tui exited with error");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db: &mut Database,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // Tab bar, status bar, command bar and the table border/header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, db),
                InputMode::Command => handle_command_input(key, app, db),
                InputMode::Editing => handle_editing_input(key, app, db),
                InputMode::Confirm => handle_confirm_input(key, app, db),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, db: &mut Database) {
    if app.screen == Screen::Add && handle_add_input(key, app) {
        return;
    }

    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_up(app);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('1') => switch_screen(app, db, Screen::Dashboard),
        KeyCode::Char('2') => switch_screen(app, db, Screen::Assets),
        KeyCode::Char('3') | KeyCode::Char('a') => switch_screen(app, db, Screen::Add),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            switch_screen(app, db, screens[(idx + 1) % screens.len()]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, db, screens[prev]);
        }
        KeyCode::Char('h') => app.toggle_hidden(),
        KeyCode::Char('x') => app.toggle_exclude_fixed(),
        KeyCode::Char('e') | KeyCode::Enter if app.screen == Screen::Assets => {
            commands::begin_edit(app);
        }
        KeyCode::Char('D') if app.screen == Screen::Assets => commands::request_delete(app),
        KeyCode::Esc => app.status_message.clear(),
        KeyCode::Char('?') => app.show_help = true,
        _ => {}
    }
}

/// Keys owned by the add screen. Returns false to fall through to the
/// global bindings.
fn handle_add_input(key: event::KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Enter => commands::choose_preset(app),
        KeyCode::Char('n') | KeyCode::Right => {
            if app.add_flow.next() {
                app.preset_index = 0;
            } else {
                app.set_status("Last category. Press c to save");
            }
        }
        KeyCode::Char('p') | KeyCode::Left => {
            if app.add_flow.prev() {
                app.preset_index = 0;
            }
        }
        KeyCode::Char('u') if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            match app.add_flow.undo_last() {
                Some(draft) => app.set_status(format!("Dropped {}", draft.choice.name())),
                None => app.set_status("Nothing staged in this category"),
            }
        }
        KeyCode::Char('c') if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            commands::request_commit(app);
        }
        KeyCode::Esc => commands::request_discard(app),
        _ => return false,
    }
    true
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, db: &mut Database) {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            if let Err(e) = commands::handle_command(&input, app, db) {
                tracing::warn!(command = %input, error = %format!("{e:#}"), "command failed");
                app.set_status(format!("Error: {e:#}"));
            }
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => app.command_input.push(c),
        _ => {}
    }
}

fn handle_editing_input(key: event::KeyEvent, app: &mut App, db: &mut Database) {
    match key.code {
        KeyCode::Enter => submit_prompt(app, db),
        KeyCode::Esc => {
            app.command_input.clear();
            app.prompt = None;
            app.input_mode = InputMode::Normal;
            app.set_status("Cancelled");
        }
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
        }
        KeyCode::Char(c) => app.command_input.push(c),
        _ => {}
    }
}

/// Hand the edit line to whatever the active prompt is collecting. Invalid
/// input keeps the prompt open so it can be corrected.
fn submit_prompt(app: &mut App, db: &mut Database) {
    let input = std::mem::take(&mut app.command_input);
    let Some(prompt) = app.prompt.take() else {
        app.input_mode = InputMode::Normal;
        return;
    };

    match prompt {
        Prompt::CustomName => {
            let label = input.trim();
            if label.is_empty() {
                app.set_status("A name is required");
                app.prompt = Some(Prompt::CustomName);
            } else {
                app.prompt = Some(Prompt::Amount {
                    label: label.to_string(),
                });
            }
        }
        Prompt::Amount { label } => {
            if !commands::stage_draft(app, &label, &input) {
                app.command_input = input;
                app.prompt = Some(Prompt::Amount { label });
            }
        }
        Prompt::Edit { id } => commands::save_edit(app, db, id, &input),
    }

    if app.prompt.is_none() {
        app.input_mode = InputMode::Normal;
    }
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, db: &mut Database) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                commands::execute_pending(app, db, action);
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
        _ => {}
    }
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, db: &mut Database, screen: Screen) {
    if screen == Screen::Add {
        app.start_add_flow();
        let category = app.add_flow.current_category();
        app.set_status(format!("{}: {}", category.label(), category.description()));
        return;
    }
    app.screen = screen;
    commands::refresh_best_effort(app, db);
    app.set_status(format!("{screen}"));
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Assets => {
            let len = app.items.len();
            scroll_down(&mut app.item_index, &mut app.item_scroll, len, app.visible_rows);
        }
        Screen::Add => {
            if app.preset_index + 1 < app.preset_options().len() {
                app.preset_index += 1;
            }
        }
        Screen::Dashboard => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Assets => scroll_up(&mut app.item_index, &mut app.item_scroll),
        Screen::Add => app.preset_index = app.preset_index.saturating_sub(1),
        Screen::Dashboard => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Assets => scroll_to_top(&mut app.item_index, &mut app.item_scroll),
        Screen::Add => app.preset_index = 0,
        Screen::Dashboard => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    match app.screen {
        Screen::Assets => {
            let len = app.items.len();
            scroll_to_bottom(&mut app.item_index, &mut app.item_scroll, len, app.visible_rows);
        }
        Screen::Add => app.preset_index = app.preset_options().len().saturating_sub(1),
        Screen::Dashboard => {}
    }
}
