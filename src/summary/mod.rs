//! Aggregation engine: pure reporting over a snapshot of asset items.
//!
//! Nothing here touches the store. Callers load the items, pass them in with
//! the session's [`ViewOptions`], and render whatever comes back.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::{AssetCategory, AssetItem};

/// Display token used whenever amounts are hidden.
pub(crate) const MASK: &str = "****";

/// Rendering used when a currency string cannot be produced.
pub(crate) const ZERO_DISPLAY: &str = "¥0.00";

const CURRENCY_SYMBOL: &str = "¥";

/// Per-session display preferences. Not persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ViewOptions {
    pub(crate) hide_amounts: bool,
    pub(crate) exclude_fixed_assets: bool,
}

/// Sums clamp at `Decimal::MAX`/`MIN` instead of overflowing.
fn saturating_sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, Decimal::saturating_add)
}

/// `part / whole` in percent. Zero when `whole` is not positive; saturates
/// when the quotient is out of range.
fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .map(|q| q.saturating_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX)
}

/// Sum of all non-liability items, optionally skipping fixed assets.
pub(crate) fn total_assets(items: &[AssetItem], exclude_fixed: bool) -> Decimal {
    saturating_sum(
        items
            .iter()
            .filter(|i| !i.is_liability())
            .filter(|i| !(exclude_fixed && i.category == AssetCategory::FixedAssets))
            .map(|i| i.amount),
    )
}

pub(crate) fn total_liabilities(items: &[AssetItem]) -> Decimal {
    saturating_sum(items.iter().filter(|i| i.is_liability()).map(|i| i.amount))
}

pub(crate) fn net_assets(items: &[AssetItem], exclude_fixed: bool) -> Decimal {
    total_assets(items, exclude_fixed).saturating_sub(total_liabilities(items))
}

/// Liabilities as a percentage of qualifying assets.
/// Zero when there are no qualifying assets.
pub(crate) fn debt_ratio(items: &[AssetItem], exclude_fixed: bool) -> Decimal {
    percent_of(total_liabilities(items), total_assets(items, exclude_fixed))
}

/// Per-category sums, one slot per catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategoryTotals {
    totals: [Decimal; AssetCategory::COUNT],
}

impl CategoryTotals {
    pub(crate) fn get(&self, category: AssetCategory) -> Decimal {
        self.totals[category.index()]
    }

    /// Iterate in catalog order. Always yields every category.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (AssetCategory, Decimal)> + '_ {
        AssetCategory::all().iter().map(|c| (*c, self.get(*c)))
    }

}

pub(crate) fn category_totals(items: &[AssetItem]) -> CategoryTotals {
    let mut totals = [Decimal::ZERO; AssetCategory::COUNT];
    for item in items {
        let slot = &mut totals[item.category.index()];
        *slot = slot.saturating_add(item.amount);
    }
    CategoryTotals { totals }
}

pub(crate) fn last_update_date(items: &[AssetItem]) -> Option<DateTime<Utc>> {
    items.iter().map(|i| i.update_date).max()
}

/// One bar of the category breakdown chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ChartSlice {
    pub(crate) category: AssetCategory,
    pub(crate) amount: Decimal,
    /// Share of qualifying total assets, in percent. Liabilities can exceed 100.
    pub(crate) share: Decimal,
}

/// Categories with a positive total, in catalog order. Shares are taken
/// against `total_assets`, so they follow the exclude-fixed toggle.
pub(crate) fn chart_slices(totals: &CategoryTotals, total_assets: Decimal) -> Vec<ChartSlice> {
    totals
        .iter()
        .filter(|(_, amount)| *amount > Decimal::ZERO)
        .map(|(category, amount)| ChartSlice {
            category,
            amount,
            share: percent_of(amount, total_assets),
        })
        .collect()
}

/// Everything the dashboard shows, computed in one pass over the options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) total_assets: Decimal,
    pub(crate) total_liabilities: Decimal,
    pub(crate) net_assets: Decimal,
    pub(crate) debt_ratio: Decimal,
    pub(crate) by_category: CategoryTotals,
    pub(crate) last_update: Option<DateTime<Utc>>,
    pub(crate) item_count: usize,
}

impl Summary {
    pub(crate) fn compute(items: &[AssetItem], options: ViewOptions) -> Self {
        let exclude = options.exclude_fixed_assets;
        Self {
            total_assets: total_assets(items, exclude),
            total_liabilities: total_liabilities(items),
            net_assets: net_assets(items, exclude),
            debt_ratio: debt_ratio(items, exclude),
            by_category: category_totals(items),
            last_update: last_update_date(items),
            item_count: items.len(),
        }
    }
}

/// Render an amount in the implicit currency, or the mask when hidden.
/// e.g. `1234567.891` → `"¥1,234,567.89"`
pub(crate) fn format_amount(value: Decimal, hidden: bool) -> String {
    if hidden {
        return MASK.to_string();
    }
    render_currency(value).unwrap_or_else(|| ZERO_DISPLAY.to_string())
}

fn render_currency(value: Decimal) -> Option<String> {
    let rounded = value.round_dp(2);
    let formatted = format!("{:.2}", rounded.abs());
    let (int_part, dec_part) = formatted.split_once('.')?;
    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let with_commas = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(std::str::from_utf8)
        .collect::<Result<Vec<_>, _>>()
        .ok()?
        .join(",");

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    Some(format!("{sign}{CURRENCY_SYMBOL}{with_commas}.{dec_part}"))
}

/// One-decimal percentage, e.g. `33.3%`.
pub(crate) fn format_ratio(ratio: Decimal) -> String {
    format!("{:.1}%", ratio.round_dp(1))
}

#[cfg(test)]
mod tests;
