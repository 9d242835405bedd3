//! Input validation and the add/edit flows that sit between the UI and the
//! store. Nothing is constructed until its input has been validated here.

use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::db::Database;
use crate::models::{AssetCategory, AssetItem, CUSTOM_SUB_CATEGORY};

/// Parse a user-entered decimal. Tolerates a leading currency symbol and
/// thousands separators.
pub(crate) fn parse_decimal(input: &str) -> Result<Decimal> {
    let cleaned = input.trim().replace(['¥', '￥', ','], "");
    if cleaned.is_empty() {
        bail!("Amount is required");
    }
    Decimal::from_str(&cleaned).with_context(|| format!("Not a number: '{}'", input.trim()))
}

/// Amounts for new items must be strictly positive.
pub(crate) fn parse_amount(input: &str) -> Result<Decimal> {
    let amount = parse_decimal(input)?;
    if amount <= Decimal::ZERO {
        bail!("Amount must be greater than zero (got {amount})");
    }
    Ok(amount)
}

/// Which subcategory a new item was filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SubCategoryChoice {
    Preset(&'static str),
    Custom(String),
}

impl SubCategoryChoice {
    /// A label matching one of the category's presets selects that preset;
    /// anything else becomes a custom label.
    pub(crate) fn resolve(category: AssetCategory, label: &str) -> Result<Self> {
        let label = label.trim();
        if label.is_empty() {
            bail!("Pick a preset or enter a name");
        }
        Ok(match category.find_preset(label) {
            Some(preset) => Self::Preset(preset),
            None => Self::Custom(label.to_string()),
        })
    }

    pub(crate) fn name(&self) -> &str {
        match self {
            Self::Preset(p) => p,
            Self::Custom(name) => name,
        }
    }

    pub(crate) fn sub_category(&self) -> &str {
        match self {
            Self::Preset(p) => p,
            Self::Custom(_) => CUSTOM_SUB_CATEGORY,
        }
    }
}

/// A validated item that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AssetDraft {
    pub(crate) category: AssetCategory,
    pub(crate) choice: SubCategoryChoice,
    pub(crate) amount: Decimal,
}

impl AssetDraft {
    pub(crate) fn new(category: AssetCategory, label: &str, amount_input: &str) -> Result<Self> {
        let choice = SubCategoryChoice::resolve(category, label)?;
        let amount = parse_amount(amount_input)?;
        Ok(Self {
            category,
            choice,
            amount,
        })
    }

    pub(crate) fn into_item(self) -> AssetItem {
        AssetItem::new(
            self.choice.name().to_string(),
            self.amount,
            self.category,
            self.choice.sub_category().to_string(),
        )
    }
}

/// The add flow: walk every category in catalog order, collecting zero or
/// more drafts per step, then commit them all at once.
#[derive(Debug, Clone, Default)]
pub(crate) struct AddFlow {
    step: usize,
    drafts: Vec<AssetDraft>,
}

impl AddFlow {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn step(&self) -> usize {
        self.step
    }

    pub(crate) fn step_count(&self) -> usize {
        AssetCategory::all().len()
    }

    pub(crate) fn current_category(&self) -> AssetCategory {
        AssetCategory::all()[self.step]
    }

    pub(crate) fn is_first_step(&self) -> bool {
        self.step == 0
    }

    pub(crate) fn is_last_step(&self) -> bool {
        self.step + 1 == self.step_count()
    }

    /// Returns false when already on the last step.
    pub(crate) fn next(&mut self) -> bool {
        if self.is_last_step() {
            return false;
        }
        self.step += 1;
        true
    }

    /// Returns false when already on the first step.
    pub(crate) fn prev(&mut self) -> bool {
        if self.is_first_step() {
            return false;
        }
        self.step -= 1;
        true
    }

    /// Validate and stage an item under the current step's category.
    pub(crate) fn add(&mut self, label: &str, amount_input: &str) -> Result<&AssetDraft> {
        let draft = AssetDraft::new(self.current_category(), label, amount_input)?;
        self.drafts.push(draft);
        let idx = self.drafts.len() - 1;
        Ok(&self.drafts[idx])
    }

    /// Drop the most recent draft of the current step.
    pub(crate) fn undo_last(&mut self) -> Option<AssetDraft> {
        let category = self.current_category();
        let pos = self.drafts.iter().rposition(|d| d.category == category)?;
        Some(self.drafts.remove(pos))
    }

    pub(crate) fn drafts(&self) -> &[AssetDraft] {
        &self.drafts
    }

    pub(crate) fn drafts_for(&self, category: AssetCategory) -> impl Iterator<Item = &AssetDraft> {
        self.drafts.iter().filter(move |d| d.category == category)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    pub(crate) fn to_items(&self) -> Vec<AssetItem> {
        self.drafts
            .iter()
            .cloned()
            .map(AssetDraft::into_item)
            .collect()
    }

    /// Write every staged draft in one batch. Returns how many were saved.
    /// The drafts stay staged; callers reset the flow once the save lands.
    pub(crate) fn commit(&self, db: &mut Database) -> Result<usize> {
        let items = self.to_items();
        db.insert_items_batch(&items)
            .context("Failed to save new assets")
    }
}

/// Editable copy of an item's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EditForm {
    pub(crate) name: String,
    pub(crate) sub_category: String,
    pub(crate) amount: String,
}

impl EditForm {
    pub(crate) fn from_item(item: &AssetItem) -> Self {
        Self {
            name: item.name.clone(),
            sub_category: item.sub_category.clone(),
            amount: item.amount.to_string(),
        }
    }

    /// Apply `key=value` assignments, e.g. `amount=5200 name=Family Car`.
    /// A value runs until the next word that starts with a field key, and
    /// keeps its inner spacing. Values cannot contain such a word.
    pub(crate) fn apply_args(&mut self, args: &str) -> Result<()> {
        let mut current: Option<(&str, usize)> = None;
        let mut assignments: Vec<(&str, &str)> = Vec::new();

        for (start, end) in word_spans(args) {
            let token = &args[start..end];
            let field = token
                .split_once('=')
                .filter(|(k, _)| Self::is_field(k));
            match (field, current) {
                (Some((key, _)), prev) => {
                    if let Some((k, from)) = prev {
                        assignments.push((k, args[from..start].trim()));
                    }
                    current = Some((key, start + key.len() + 1));
                }
                (None, Some(_)) => {}
                (None, None) => bail!("Expected name=, sub= or amount= before '{token}'"),
            }
        }
        if let Some((k, from)) = current {
            assignments.push((k, args[from..].trim()));
        }
        if assignments.is_empty() {
            bail!("Nothing to change. Use name=, sub= or amount=");
        }

        for (key, value) in assignments {
            self.set_field(key, value.to_string())?;
        }
        Ok(())
    }

    fn is_field(key: &str) -> bool {
        matches!(key, "name" | "sub" | "subcategory" | "amount")
    }

    pub(crate) fn set_field(&mut self, key: &str, value: String) -> Result<()> {
        match key {
            "name" => self.name = value,
            "sub" | "subcategory" => self.sub_category = value,
            "amount" => self.amount = value,
            other => bail!("Unknown field '{other}'"),
        }
        Ok(())
    }

    /// Render as the argument string `apply_args` understands.
    pub(crate) fn to_args(&self) -> String {
        format!(
            "name={} sub={} amount={}",
            self.name, self.sub_category, self.amount
        )
    }

    /// Name and subcategory must be non-empty; amount must be numeric.
    pub(crate) fn validate(&self) -> Result<(String, String, Decimal)> {
        let name = self.name.trim();
        let sub = self.sub_category.trim();
        if name.is_empty() {
            bail!("Name is required");
        }
        if sub.is_empty() {
            bail!("Subcategory is required");
        }
        let amount = parse_decimal(&self.amount)?;
        Ok((name.to_string(), sub.to_string(), amount))
    }

    /// Validate, then rewrite the item in place. The item is untouched on error.
    pub(crate) fn apply_to(&self, item: &mut AssetItem) -> Result<()> {
        let (name, sub, amount) = self.validate()?;
        item.apply_edit(name, sub, amount);
        Ok(())
    }
}

/// Byte ranges of the whitespace separated words in `s`.
fn word_spans(s: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, c) in s.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(from)) => {
                spans.push((from, i));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(from) = start {
        spans.push((from, s.len()));
    }
    spans
}
