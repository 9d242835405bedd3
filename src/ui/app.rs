use anyhow::Result;
use uuid::Uuid;

use crate::db::Database;
use crate::entry::AddFlow;
use crate::models::*;
use crate::summary::{Summary, ViewOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Assets,
    Add,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Assets, Self::Add]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Assets => write!(f, "Assets"),
            Self::Add => write!(f, "Add"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// What the edit line is currently collecting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Prompt {
    /// Amount for a new draft filed under `label`.
    Amount { label: String },
    /// Free-text label for a custom subcategory.
    CustomName,
    /// `name=.. sub=.. amount=..` for an existing item.
    Edit { id: Uuid },
}

impl Prompt {
    pub(crate) fn prefix(&self) -> &'static str {
        match self {
            Self::Amount { .. } => "amount> ",
            Self::CustomName => "name> ",
            Self::Edit { .. } => "edit> ",
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteItem { id: Uuid, name: String },
    CommitAdd,
    DiscardAdd,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Session display flags
    pub(crate) options: ViewOptions,

    // Snapshot + derived metrics
    pub(crate) items: Vec<AssetItem>,
    pub(crate) summary: Summary,

    // Assets list
    pub(crate) item_index: usize,
    pub(crate) item_scroll: usize,

    // Add flow
    pub(crate) add_flow: AddFlow,
    pub(crate) preset_index: usize,
    pub(crate) prompt: Option<Prompt>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        let options = ViewOptions::default();
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            options,

            items: Vec::new(),
            summary: Summary::compute(&[], options),

            item_index: 0,
            item_scroll: 0,

            add_flow: AddFlow::new(),
            preset_index: 0,
            prompt: None,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Reload the snapshot from the store and recompute everything derived.
    pub(crate) fn refresh(&mut self, db: &Database) -> Result<()> {
        self.items = db.get_items()?;
        self.recompute();
        if self.item_index >= self.items.len() {
            self.item_index = self.items.len().saturating_sub(1);
        }
        if self.item_scroll > self.item_index {
            self.item_scroll = self.item_index;
        }
        Ok(())
    }

    pub(crate) fn recompute(&mut self) {
        self.summary = Summary::compute(&self.items, self.options);
    }

    pub(crate) fn toggle_hidden(&mut self) {
        self.options.hide_amounts = !self.options.hide_amounts;
        self.recompute();
        self.set_status(if self.options.hide_amounts {
            "Amounts hidden"
        } else {
            "Amounts shown"
        });
    }

    pub(crate) fn toggle_exclude_fixed(&mut self) {
        self.options.exclude_fixed_assets = !self.options.exclude_fixed_assets;
        self.recompute();
        self.set_status(if self.options.exclude_fixed_assets {
            "Fixed assets excluded from totals"
        } else {
            "Fixed assets included in totals"
        });
    }

    pub(crate) fn selected_item(&self) -> Option<&AssetItem> {
        self.items.get(self.item_index)
    }

    /// Presets for the current add step, followed by the custom entry.
    pub(crate) fn preset_options(&self) -> Vec<&'static str> {
        let mut opts = self.add_flow.current_category().sub_categories().to_vec();
        opts.push(CUSTOM_OPTION);
        opts
    }

    pub(crate) fn start_add_flow(&mut self) {
        self.screen = Screen::Add;
        if self.add_flow.is_empty() {
            self.add_flow = AddFlow::new();
        }
        self.preset_index = 0;
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    /// Record the outcome of a write. Failures are logged and shown but never
    /// end the session.
    pub(crate) fn report_write(&mut self, what: &str, result: Result<String>) {
        match result {
            Ok(msg) => self.set_status(msg),
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "{what} failed");
                self.set_status(format!("{what} failed: {e:#}"));
            }
        }
    }
}

/// Trailing entry in the preset list that switches to a typed label.
pub(crate) const CUSTOM_OPTION: &str = "Custom…";
