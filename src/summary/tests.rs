#![allow(clippy::unwrap_used)]

use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{AssetCategory, AssetItem};

fn item(category: AssetCategory, amount: Decimal) -> AssetItem {
    let name = category.sub_categories()[0].to_string();
    AssetItem::new(name.clone(), amount, category, name)
}

/// The reference scenario: 1000 liquid, 5000 fixed, 2000 owed.
fn scenario() -> Vec<AssetItem> {
    vec![
        item(AssetCategory::LiquidAssets, dec!(1000)),
        item(AssetCategory::FixedAssets, dec!(5000)),
        item(AssetCategory::Liabilities, dec!(2000)),
    ]
}

fn mixed() -> Vec<AssetItem> {
    vec![
        item(AssetCategory::LiquidAssets, dec!(1200.50)),
        item(AssetCategory::LiquidAssets, dec!(99.50)),
        item(AssetCategory::FixedAssets, dec!(850000)),
        item(AssetCategory::FixedAssets, dec!(120000)),
        item(AssetCategory::Investments, dec!(30000.25)),
        item(AssetCategory::Receivables, dec!(500)),
        item(AssetCategory::Liabilities, dec!(600000)),
        item(AssetCategory::Liabilities, dec!(4321.09)),
    ]
}

// ── Reference scenario ────────────────────────────────────────

#[test]
fn test_scenario_totals() {
    let items = scenario();
    assert_eq!(total_assets(&items, false), dec!(6000));
    assert_eq!(total_assets(&items, true), dec!(1000));
    assert_eq!(total_liabilities(&items), dec!(2000));
    assert_eq!(net_assets(&items, false), dec!(4000));
    assert_eq!(net_assets(&items, true), dec!(-1000));
}

#[test]
fn test_scenario_debt_ratio() {
    let items = scenario();
    assert_eq!(debt_ratio(&items, false).round_dp(2), dec!(33.33));
    assert_eq!(debt_ratio(&items, true), dec!(200));
}

#[test]
fn test_scenario_category_totals() {
    let totals = category_totals(&scenario());
    assert_eq!(totals.get(AssetCategory::LiquidAssets), dec!(1000));
    assert_eq!(totals.get(AssetCategory::FixedAssets), dec!(5000));
    assert_eq!(totals.get(AssetCategory::Investments), Decimal::ZERO);
    assert_eq!(totals.get(AssetCategory::Receivables), Decimal::ZERO);
    assert_eq!(totals.get(AssetCategory::Liabilities), dec!(2000));
}

// ── Properties ────────────────────────────────────────────────

#[test]
fn test_excluding_fixed_removes_exactly_fixed_sum() {
    for items in [vec![], scenario(), mixed()] {
        let fixed: Decimal = items
            .iter()
            .filter(|i| i.category == AssetCategory::FixedAssets)
            .map(|i| i.amount)
            .sum();
        assert_eq!(total_assets(&items, false), total_assets(&items, true) + fixed);
    }
}

#[test]
fn test_net_is_assets_minus_liabilities() {
    for items in [vec![], scenario(), mixed()] {
        for exclude in [false, true] {
            assert_eq!(
                net_assets(&items, exclude),
                total_assets(&items, exclude) - total_liabilities(&items)
            );
        }
    }
}

#[test]
fn test_category_totals_cover_every_category() {
    for items in [vec![], scenario(), mixed()] {
        let totals = category_totals(&items);
        assert_eq!(totals.iter().count(), AssetCategory::COUNT);
        assert_eq!(
            totals.iter().map(|(_, amount)| amount).sum::<Decimal>(),
            total_assets(&items, false) + total_liabilities(&items)
        );
    }
}

#[test]
fn test_category_totals_iterate_in_catalog_order() {
    let order: Vec<AssetCategory> = category_totals(&mixed()).iter().map(|(c, _)| c).collect();
    assert_eq!(order, AssetCategory::all().to_vec());
}

#[test]
fn test_order_does_not_matter() {
    let items = mixed();
    let mut reversed = items.clone();
    reversed.reverse();
    assert_eq!(
        Summary::compute(&items, ViewOptions::default()),
        Summary::compute(&reversed, ViewOptions::default())
    );
}

// ── Edge cases ────────────────────────────────────────────────

#[test]
fn test_empty_input() {
    let items: Vec<AssetItem> = Vec::new();
    assert_eq!(total_assets(&items, false), Decimal::ZERO);
    assert_eq!(total_liabilities(&items), Decimal::ZERO);
    assert_eq!(net_assets(&items, false), Decimal::ZERO);
    assert_eq!(debt_ratio(&items, false), Decimal::ZERO);
    assert_eq!(debt_ratio(&items, true), Decimal::ZERO);
    assert!(last_update_date(&items).is_none());
}

#[test]
fn test_debt_ratio_zero_when_only_liabilities() {
    let items = vec![item(AssetCategory::Liabilities, dec!(15000))];
    assert_eq!(debt_ratio(&items, false), Decimal::ZERO);
    assert_eq!(net_assets(&items, false), dec!(-15000));
}

#[test]
fn test_debt_ratio_zero_when_only_fixed_assets_excluded() {
    let items = vec![
        item(AssetCategory::FixedAssets, dec!(300000)),
        item(AssetCategory::Liabilities, dec!(100000)),
    ];
    assert_eq!(debt_ratio(&items, true), Decimal::ZERO);
    assert_eq!(debt_ratio(&items, false).round_dp(2), dec!(33.33));
}

#[test]
fn test_last_update_date_is_max() {
    let base = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let mut items = mixed();
    for (i, it) in items.iter_mut().enumerate() {
        it.update_date = base + Duration::days(i as i64);
    }
    // Newest entry is not the last one in the slice
    items[2].update_date = base + Duration::days(100);
    assert_eq!(last_update_date(&items), Some(base + Duration::days(100)));
}

// ── Summary ───────────────────────────────────────────────────

#[test]
fn test_summary_compute_honors_exclude_fixed() {
    let items = scenario();
    let all = Summary::compute(&items, ViewOptions::default());
    assert_eq!(all.total_assets, dec!(6000));
    assert_eq!(all.net_assets, dec!(4000));
    assert_eq!(all.item_count, 3);

    let liquid_only = Summary::compute(
        &items,
        ViewOptions {
            hide_amounts: false,
            exclude_fixed_assets: true,
        },
    );
    assert_eq!(liquid_only.total_assets, dec!(1000));
    assert_eq!(liquid_only.total_liabilities, dec!(2000));
    // Category totals are never filtered
    assert_eq!(liquid_only.by_category, all.by_category);
}

// ── Chart slices ──────────────────────────────────────────────

#[test]
fn test_chart_slices_skip_empty_categories() {
    let items = scenario();
    let slices = chart_slices(&category_totals(&items), total_assets(&items, false));
    let cats: Vec<AssetCategory> = slices.iter().map(|s| s.category).collect();
    assert_eq!(
        cats,
        vec![
            AssetCategory::LiquidAssets,
            AssetCategory::FixedAssets,
            AssetCategory::Liabilities
        ]
    );
    assert_eq!(slices[1].amount, dec!(5000));
    assert_eq!(slices[0].share.round_dp(2), dec!(16.67));
    assert_eq!(slices[1].share.round_dp(2), dec!(83.33));
    assert_eq!(slices[2].share.round_dp(2), dec!(33.33));
}

#[test]
fn test_chart_slices_follow_exclude_fixed() {
    let items = scenario();
    let slices = chart_slices(&category_totals(&items), total_assets(&items, true));
    // Fixed assets still get a bar, measured against liquid funds only
    assert_eq!(slices[0].share, dec!(100));
    assert_eq!(slices[1].share, dec!(500));
    assert_eq!(slices[2].share, dec!(200));
}

#[test]
fn test_chart_slices_without_assets() {
    let items = vec![item(AssetCategory::Liabilities, dec!(900))];
    let slices = chart_slices(&category_totals(&items), total_assets(&items, false));
    assert_eq!(slices.len(), 1);
    assert_eq!(slices[0].share, Decimal::ZERO);
}

#[test]
fn test_chart_slices_empty() {
    assert!(chart_slices(&category_totals(&[]), Decimal::ZERO).is_empty());
}

// ── Large amounts ─────────────────────────────────────────────

#[test]
fn test_huge_liability_does_not_overflow_ratio() {
    let items = vec![
        item(AssetCategory::LiquidAssets, dec!(1)),
        item(
            AssetCategory::Liabilities,
            crate::entry::parse_amount("1000000000000000000000000000").unwrap(),
        ),
    ];
    assert_eq!(debt_ratio(&items, false), Decimal::MAX);
    let slices = chart_slices(&category_totals(&items), total_assets(&items, false));
    assert_eq!(slices[0].share, dec!(100));
    assert_eq!(slices[1].share, Decimal::MAX);
    assert_eq!(net_assets(&items, false), Decimal::ONE - dec!(1000000000000000000000000000));
}

#[test]
fn test_sums_saturate_instead_of_overflowing() {
    let big = dec!(50000000000000000000000000000);
    let items = vec![
        item(AssetCategory::Investments, big),
        item(AssetCategory::Investments, big),
        item(AssetCategory::Liabilities, big),
        item(AssetCategory::Liabilities, big),
    ];
    assert_eq!(total_assets(&items, false), Decimal::MAX);
    assert_eq!(total_liabilities(&items), Decimal::MAX);
    assert_eq!(category_totals(&items).get(AssetCategory::Investments), Decimal::MAX);
    assert_eq!(net_assets(&items, false), Decimal::ZERO);
    let summary = Summary::compute(&items, ViewOptions::default());
    assert_eq!(summary.debt_ratio, dec!(100));
    assert!(format_amount(summary.total_assets, false).starts_with("¥79,228,162,514"));
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_hidden_masks_everything() {
    for v in [dec!(0), dec!(1), dec!(-42.5), dec!(99999999999.99)] {
        assert_eq!(format_amount(v, true), "****");
    }
}

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(1234.56), false), "¥1,234.56");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(Decimal::ZERO, false), "¥0.00");
    assert_eq!(format_amount(Decimal::ZERO, false), ZERO_DISPLAY);
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-1000), false), "-¥1,000.00");
}

#[test]
fn test_format_amount_millions() {
    assert_eq!(format_amount(dec!(1234567.891), false), "¥1,234,567.89");
}

#[test]
fn test_format_amount_rounds_half_to_two_places() {
    assert_eq!(format_amount(dec!(0.5), false), "¥0.50");
    assert_eq!(format_amount(dec!(999.999), false), "¥1,000.00");
}

#[test]
fn test_format_amount_tiny_negative_has_no_sign() {
    assert_eq!(format_amount(dec!(-0.001), false), "¥0.00");
}

// ── format_ratio ──────────────────────────────────────────────

#[test]
fn test_format_ratio() {
    assert_eq!(format_ratio(debt_ratio(&scenario(), false)), "33.3%");
    assert_eq!(format_ratio(Decimal::ZERO), "0.0%");
    assert_eq!(format_ratio(dec!(200)), "200.0%");
}
