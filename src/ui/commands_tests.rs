#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::models::{AssetCategory, AssetItem};

fn setup() -> (App, Database) {
    let db = Database::open_in_memory().unwrap();
    let mut app = App::new();
    app.refresh(&db).unwrap();
    (app, db)
}

fn seed(db: &Database, name: &str, amount: rust_decimal::Decimal, category: AssetCategory) -> AssetItem {
    let item = AssetItem::new(name.into(), amount, category, name.into());
    db.insert_item(&item).unwrap();
    item
}

fn run(input: &str, app: &mut App, db: &mut Database) {
    handle_command(input, app, db).unwrap();
}

#[test]
fn test_levenshtein() {
    assert_eq!(levenshtein("", "abc"), 3);
    assert_eq!(levenshtein("hide", "hide"), 0);
    assert_eq!(levenshtein("delte", "delete"), 1);
}

#[test]
fn test_unknown_command_suggests() {
    let (mut app, mut db) = setup();
    run("asets", &mut app, &mut db);
    assert!(app.status_message.contains(":assets"));
}

#[test]
fn test_toggles_recompute_summary() {
    let (mut app, mut db) = setup();
    seed(&db, "Car", dec!(4000), AssetCategory::FixedAssets);
    seed(&db, "Alipay", dec!(1000), AssetCategory::LiquidAssets);
    app.refresh(&db).unwrap();
    assert_eq!(app.summary.total_assets, dec!(5000));

    run("x", &mut app, &mut db);
    assert!(app.options.exclude_fixed_assets);
    assert_eq!(app.summary.total_assets, dec!(1000));

    run("hide", &mut app, &mut db);
    assert!(app.options.hide_amounts);
    run("hide", &mut app, &mut db);
    assert!(!app.options.hide_amounts);
}

#[test]
fn test_add_flow_stages_and_commits() {
    let (mut app, mut db) = setup();
    run("add", &mut app, &mut db);
    assert_eq!(app.screen, Screen::Add);

    run("add 1,000 alipay", &mut app, &mut db);
    run("add 0 WeChat Pay", &mut app, &mut db);
    assert_eq!(app.add_flow.drafts().len(), 1);

    // Saving is only offered on the final step
    run("done", &mut app, &mut db);
    assert!(app.pending_action.is_none());

    for _ in 0..4 {
        run("next", &mut app, &mut db);
    }
    run("add 2000 Mortgage", &mut app, &mut db);
    run("done", &mut app, &mut db);
    assert!(matches!(app.pending_action, Some(PendingAction::CommitAdd)));

    let action = app.pending_action.take().unwrap();
    execute_pending(&mut app, &mut db, action);
    assert_eq!(app.screen, Screen::Dashboard);
    assert!(app.add_flow.is_empty());
    assert_eq!(app.items.len(), 2);
    assert_eq!(app.summary.total_liabilities, dec!(2000));
    assert_eq!(app.summary.debt_ratio, dec!(200));
}

#[test]
fn test_failed_save_keeps_drafts() {
    let (mut app, mut db) = setup();
    db.conn()
        .execute_batch(
            "CREATE TRIGGER block_insert BEFORE INSERT ON asset_items
             BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
        )
        .unwrap();

    run("add 1000 Alipay", &mut app, &mut db);
    for _ in 0..4 {
        run("next", &mut app, &mut db);
    }
    run("add 300 Credit Card", &mut app, &mut db);
    run("done", &mut app, &mut db);
    let action = app.pending_action.take().unwrap();
    execute_pending(&mut app, &mut db, action);

    assert_eq!(app.screen, Screen::Add);
    assert_eq!(app.add_flow.drafts().len(), 2);
    assert!(app.status_message.starts_with("Save failed"));
    assert!(db.get_items().unwrap().is_empty());

    // Same drafts go through once the store accepts writes again
    db.conn().execute_batch("DROP TRIGGER block_insert;").unwrap();
    run("done", &mut app, &mut db);
    let action = app.pending_action.take().unwrap();
    execute_pending(&mut app, &mut db, action);
    assert_eq!(app.screen, Screen::Dashboard);
    assert!(app.add_flow.is_empty());
    assert_eq!(app.items.len(), 2);
}

#[test]
fn test_undo_outside_add_flow_is_ignored() {
    let (mut app, mut db) = setup();
    run("add 1000 Alipay", &mut app, &mut db);
    run("d", &mut app, &mut db);
    assert_eq!(app.screen, Screen::Dashboard);

    run("undo", &mut app, &mut db);
    assert_eq!(app.add_flow.drafts().len(), 1);
    assert!(app.status_message.contains(":add to start"));

    run("add", &mut app, &mut db);
    run("undo", &mut app, &mut db);
    assert!(app.add_flow.is_empty());
}

#[test]
fn test_discard_leaves_store_untouched() {
    let (mut app, mut db) = setup();
    run("add 500 Alipay", &mut app, &mut db);
    run("cancel", &mut app, &mut db);
    let action = app.pending_action.take().unwrap();
    execute_pending(&mut app, &mut db, action);
    assert!(app.add_flow.is_empty());
    assert!(db.get_items().unwrap().is_empty());
}

#[test]
fn test_choose_custom_preset_opens_name_prompt() {
    let (mut app, _db) = setup();
    app.start_add_flow();
    app.preset_index = app.preset_options().len() - 1;
    choose_preset(&mut app);
    assert_eq!(app.prompt, Some(Prompt::CustomName));
    assert_eq!(app.input_mode, InputMode::Editing);

    app.preset_index = 0;
    choose_preset(&mut app);
    assert_eq!(
        app.prompt,
        Some(Prompt::Amount {
            label: "Bank Current Account".into()
        })
    );
}

#[test]
fn test_edit_selected_item() {
    let (mut app, mut db) = setup();
    let item = seed(&db, "Car", dec!(85000), AssetCategory::FixedAssets);
    app.refresh(&db).unwrap();
    app.screen = Screen::Assets;

    run("edit amount=80000 name=Family Car", &mut app, &mut db);
    let stored = db.get_item_by_id(item.id).unwrap().unwrap();
    assert_eq!(stored.name, "Family Car");
    assert_eq!(stored.amount, dec!(80000));
    assert!(stored.update_date > stored.creation_date);
    assert_eq!(app.items[0], stored);
}

#[test]
fn test_edit_rejects_bad_amount() {
    let (mut app, mut db) = setup();
    let item = seed(&db, "Car", dec!(85000), AssetCategory::FixedAssets);
    app.refresh(&db).unwrap();
    app.screen = Screen::Assets;

    run("edit amount=lots", &mut app, &mut db);
    assert_eq!(db.get_item_by_id(item.id).unwrap().unwrap(), item);
    assert!(!app.status_message.is_empty());
}

#[test]
fn test_begin_edit_prefills() {
    let (mut app, db) = setup();
    seed(&db, "Alipay", dec!(1000), AssetCategory::LiquidAssets);
    app.refresh(&db).unwrap();
    begin_edit(&mut app);
    assert_eq!(app.command_input, "name=Alipay sub=Alipay amount=1000");
    assert!(matches!(app.prompt, Some(Prompt::Edit { .. })));
}

#[test]
fn test_delete_requires_confirm() {
    let (mut app, mut db) = setup();
    seed(&db, "Mortgage", dec!(2000), AssetCategory::Liabilities);
    app.refresh(&db).unwrap();
    app.screen = Screen::Assets;

    run("delete", &mut app, &mut db);
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert_eq!(db.get_item_count().unwrap(), 1);

    let action = app.pending_action.take().unwrap();
    execute_pending(&mut app, &mut db, action);
    assert!(app.items.is_empty());
    assert_eq!(app.summary.total_liabilities, dec!(0));
}
