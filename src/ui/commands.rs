use std::collections::HashMap;
use std::sync::LazyLock;

use anyhow::Context;

use super::app::{App, InputMode, PendingAction, Prompt, Screen, CUSTOM_OPTION};
use crate::db::Database;
use crate::entry::{AddFlow, EditForm};
use crate::summary::format_amount;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit AsseTUI", cmd_quit, r);
    register_command!("quit", "Quit AsseTUI", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("l", "Go to Assets", cmd_assets, r);
    register_command!("assets", "Go to Assets", cmd_assets, r);
    register_command!(
        "add",
        "Start adding, or stage an item (e.g. :add 1000 Alipay)",
        cmd_add,
        r
    );
    register_command!("next", "Next category in the add flow", cmd_next, r);
    register_command!("prev", "Previous category in the add flow", cmd_prev, r);
    register_command!("undo", "Drop the last staged item of this step", cmd_undo, r);
    register_command!("done", "Save all staged items", cmd_done, r);
    register_command!("cancel", "Discard the add flow", cmd_cancel, r);
    register_command!(
        "edit",
        "Edit selected item (e.g. :edit amount=5000 name=Car)",
        cmd_edit,
        r
    );
    register_command!("delete", "Delete selected item", cmd_delete, r);
    register_command!("hide", "Toggle amount masking", cmd_hide, r);
    register_command!(
        "exclude-fixed",
        "Toggle fixed assets in totals",
        cmd_exclude_fixed,
        r
    );
    register_command!("x", "Toggle fixed assets in totals", cmd_exclude_fixed, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Shared actions ───────────────────────────────────────────

/// Validate and stage a draft under the current add step.
pub(crate) fn stage_draft(app: &mut App, label: &str, amount: &str) -> bool {
    match app.add_flow.add(label, amount) {
        Ok(draft) => {
            let msg = format!(
                "Staged {} {} under {}",
                draft.choice.name(),
                format_amount(draft.amount, app.options.hide_amounts),
                draft.category.label()
            );
            app.set_status(msg);
            true
        }
        Err(e) => {
            app.set_status(format!("{e:#}"));
            false
        }
    }
}

/// Act on the highlighted preset of the add screen.
pub(crate) fn choose_preset(app: &mut App) {
    let options = app.preset_options();
    let Some(choice) = options.get(app.preset_index).copied() else {
        return;
    };
    app.prompt = Some(if choice == CUSTOM_OPTION {
        Prompt::CustomName
    } else {
        Prompt::Amount {
            label: choice.to_string(),
        }
    });
    app.command_input.clear();
    app.input_mode = InputMode::Editing;
}

/// Open the edit line for the selected item, prefilled with its fields.
pub(crate) fn begin_edit(app: &mut App) {
    let Some(item) = app.selected_item() else {
        app.set_status("No item selected");
        return;
    };
    let (id, args) = (item.id, EditForm::from_item(item).to_args());
    app.command_input = args;
    app.prompt = Some(Prompt::Edit { id });
    app.input_mode = InputMode::Editing;
}

/// Apply `name=.. sub=.. amount=..` to the item and save it.
pub(crate) fn save_edit(app: &mut App, db: &mut Database, id: uuid::Uuid, args: &str) {
    let Some(mut item) = app.items.iter().find(|i| i.id == id).cloned() else {
        app.set_status("Item no longer exists");
        return;
    };
    let mut form = EditForm::from_item(&item);
    if let Err(e) = form.apply_args(args).and_then(|_| form.apply_to(&mut item)) {
        app.set_status(format!("{e:#}"));
        return;
    }
    let result = db
        .update_item(&item)
        .with_context(|| format!("Saving {}", item.name))
        .map(|_| format!("Updated {}", item.name));
    app.report_write("Edit", result);
    refresh_best_effort(app, db);
}

pub(crate) fn request_delete(app: &mut App) {
    let Some((id, name, amount)) = app
        .selected_item()
        .map(|i| (i.id, i.name.clone(), i.amount))
    else {
        app.set_status("No item selected");
        return;
    };
    app.confirm_message = format!(
        "Delete {name} ({})?",
        format_amount(amount, app.options.hide_amounts)
    );
    app.pending_action = Some(PendingAction::DeleteItem { id, name });
    app.input_mode = InputMode::Confirm;
}

pub(crate) fn request_commit(app: &mut App) {
    if !app.add_flow.is_last_step() {
        app.set_status("Walk through every category first (n for next)");
        return;
    }
    let count = app.add_flow.drafts().len();
    if count == 0 {
        app.add_flow = AddFlow::new();
        app.screen = Screen::Dashboard;
        app.set_status("Nothing staged");
        return;
    }
    app.confirm_message = format!("Save {count} staged item(s)?");
    app.pending_action = Some(PendingAction::CommitAdd);
    app.input_mode = InputMode::Confirm;
}

pub(crate) fn request_discard(app: &mut App) {
    if app.add_flow.is_empty() {
        app.add_flow = AddFlow::new();
        app.screen = Screen::Dashboard;
        return;
    }
    app.confirm_message = format!("Discard {} staged item(s)?", app.add_flow.drafts().len());
    app.pending_action = Some(PendingAction::DiscardAdd);
    app.input_mode = InputMode::Confirm;
}

/// Run a confirmed action.
pub(crate) fn execute_pending(app: &mut App, db: &mut Database, action: PendingAction) {
    match action {
        PendingAction::DeleteItem { id, name } => {
            let result = db
                .delete_item(id)
                .map(|_| format!("Deleted: {name}"));
            app.report_write("Delete", result);
        }
        PendingAction::CommitAdd => {
            let result = app.add_flow.commit(db);
            let saved = result.is_ok();
            app.report_write("Save", result.map(|n| format!("Saved {n} item(s)")));
            // A failed batch keeps the drafts on screen for another :done
            if saved {
                app.add_flow = AddFlow::new();
                app.screen = Screen::Dashboard;
                app.preset_index = 0;
            }
        }
        PendingAction::DiscardAdd => {
            app.add_flow = AddFlow::new();
            app.screen = Screen::Dashboard;
            app.set_status("Add flow discarded");
        }
    }
    refresh_best_effort(app, db);
}

pub(crate) fn refresh_best_effort(app: &mut App, db: &Database) {
    if let Err(e) = app.refresh(db) {
        tracing::warn!(error = %format!("{e:#}"), "refresh failed");
        app.set_status(format!("Reload failed: {e:#}"));
    }
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh(db)?;
    Ok(())
}

fn cmd_assets(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Assets;
    app.refresh(db)?;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Add {
        app.start_add_flow();
    }
    if args.is_empty() {
        let category = app.add_flow.current_category();
        app.set_status(format!("Adding {}: {}", category.label(), category.description()));
        return Ok(());
    }

    // First token is the amount, the rest is the preset or custom label
    let mut parts = args.splitn(2, ' ');
    let amount = parts.next().unwrap_or("");
    let label = parts.next().unwrap_or("").trim();
    stage_draft(app, label, amount);
    Ok(())
}

fn cmd_next(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Add {
        app.set_status("Not in the add flow (:add to start)");
    } else if app.add_flow.next() {
        app.preset_index = 0;
    } else {
        app.set_status("Last category. :done to save");
    }
    Ok(())
}

fn cmd_prev(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen == Screen::Add && app.add_flow.prev() {
        app.preset_index = 0;
    }
    Ok(())
}

fn cmd_undo(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Add {
        app.set_status("Not in the add flow (:add to start)");
        return Ok(());
    }
    match app.add_flow.undo_last() {
        Some(draft) => app.set_status(format!("Dropped {}", draft.choice.name())),
        None => app.set_status("Nothing staged in this category"),
    }
    Ok(())
}

fn cmd_done(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Add {
        app.set_status("Not in the add flow (:add to start)");
        return Ok(());
    }
    request_commit(app);
    Ok(())
}

fn cmd_cancel(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen == Screen::Add {
        request_discard(app);
    }
    Ok(())
}

fn cmd_edit(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Assets {
        app.set_status("Select an item on the Assets screen first");
        return Ok(());
    }
    if args.is_empty() {
        begin_edit(app);
        return Ok(());
    }
    let Some(id) = app.selected_item().map(|i| i.id) else {
        app.set_status("No item selected");
        return Ok(());
    };
    save_edit(app, db, id, args);
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Assets {
        app.set_status("Select an item on the Assets screen first");
        return Ok(());
    }
    request_delete(app);
    Ok(())
}

fn cmd_hide(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.toggle_hidden();
    Ok(())
}

fn cmd_exclude_fixed(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.toggle_exclude_fixed();
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
