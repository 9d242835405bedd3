use anyhow::{bail, Result};

use crate::db::Database;
use crate::entry::{AssetDraft, EditForm};
use crate::models::{AssetCategory, AssetItem};
use crate::summary::{self, format_amount, format_ratio, Summary, ViewOptions};

pub(crate) fn as_cli(args: &[String], db: &mut Database) -> Result<()> {
    match args[1].as_str() {
        "summary" | "s" => cli_summary(&args[2..], db),
        "list" | "ls" => cli_list(&args[2..], db),
        "add" => cli_add(&args[2..], db).map(|_| ()),
        "edit" => cli_edit(&args[2..], db).map(|_| ()),
        "delete" | "rm" => cli_delete(&args[2..], db),
        "categories" => {
            cli_categories();
            Ok(())
        }
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("assetui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("AsseTUI - local-only household asset tracker");
    println!();
    println!("Usage: assetui [--db <path>] [command]");
    println!();
    println!("Commands:");
    println!("  (none)                          Launch interactive TUI");
    println!("  summary                         Print totals, net assets and debt ratio");
    println!("    --hide                        Mask all amounts");
    println!("    --exclude-fixed               Leave fixed assets out of the totals");
    println!("  list [--hide]                   List all assets and liabilities");
    println!("  add <category> <amount> <name>  Add an item (name may be a preset)");
    println!("  edit <id> [--name <n>] [--sub <s>] [--amount <a>]");
    println!("                                  Edit an item (id prefix is enough)");
    println!("  delete <id>                     Delete an item");
    println!("  categories                      Show categories and their presets");
    println!("  --help, -h                      Show this help");
    println!("  --version, -V                   Show version");
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn view_options(args: &[String]) -> ViewOptions {
    ViewOptions {
        hide_amounts: has_flag(args, "--hide"),
        exclude_fixed_assets: has_flag(args, "--exclude-fixed"),
    }
}

/// Resolve an id or unique id prefix to exactly one item.
pub(crate) fn resolve_item(db: &Database, id_prefix: &str) -> Result<AssetItem> {
    let prefix = id_prefix.trim();
    if prefix.is_empty() {
        bail!("An item id is required");
    }
    if !crate::db::is_id_prefix(prefix) {
        bail!("Item ids are hexadecimal (got '{prefix}')");
    }
    let mut matches = db.find_items_by_id_prefix(prefix)?;
    match matches.len() {
        0 => bail!("No item with id '{prefix}'"),
        1 => Ok(matches.remove(0)),
        n => bail!("Id prefix '{prefix}' is ambiguous ({n} matches)"),
    }
}

fn cli_summary(args: &[String], db: &mut Database) -> Result<()> {
    let options = view_options(args);
    let hidden = options.hide_amounts;
    let items = db.get_items()?;
    let s = Summary::compute(&items, options);

    println!("AsseTUI Summary");
    println!("{}", "─".repeat(44));
    println!(
        "  Total Assets:      {}{}",
        format_amount(s.total_assets, hidden),
        if options.exclude_fixed_assets {
            "  (excl. fixed)"
        } else {
            ""
        }
    );
    println!(
        "  Total Liabilities: {}",
        format_amount(s.total_liabilities, hidden)
    );
    println!("  Net Assets:        {}", format_amount(s.net_assets, hidden));
    println!("  Debt Ratio:        {}", format_ratio(s.debt_ratio));
    match s.last_update {
        Some(ts) => println!(
            "  Last Updated:      {}",
            ts.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M")
        ),
        None => println!("  Last Updated:      never"),
    }
    println!("  Items:             {}", s.item_count);

    let slices = summary::chart_slices(&s.by_category, s.total_assets);
    if !slices.is_empty() {
        println!();
        println!("By Category:");
        for (category, amount) in s.by_category.iter() {
            let share = slices
                .iter()
                .find(|sl| sl.category == category)
                .map(|sl| format_ratio(sl.share))
                .unwrap_or_else(|| "-".into());
            println!(
                "  {:<14} {:>18} {:>7}",
                category.label(),
                format_amount(amount, hidden),
                share
            );
        }
    }

    Ok(())
}

fn cli_list(args: &[String], db: &mut Database) -> Result<()> {
    let hidden = has_flag(args, "--hide");
    let items = db.get_items()?;
    if items.is_empty() {
        println!("No assets yet. Add one with: assetui add <category> <amount> <name>");
        return Ok(());
    }

    println!(
        "{:<9} {:<13} {:<24} {:<22} {:>16}  Updated",
        "ID", "Category", "Name", "Subcategory", "Amount"
    );
    println!("{}", "─".repeat(100));
    for item in &items {
        println!(
            "{:<9} {:<13} {:<24} {:<22} {:>16}  {}",
            item.short_id(),
            item.category.label(),
            crate::ui::util::truncate(&item.name, 24),
            crate::ui::util::truncate(&item.sub_category, 22),
            format_amount(item.amount, hidden),
            item.update_date
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d"),
        );
    }
    Ok(())
}

pub(crate) fn cli_add(args: &[String], db: &mut Database) -> Result<AssetItem> {
    if args.len() < 3 {
        bail!("Usage: assetui add <category> <amount> <name>");
    }
    let Some(category) = AssetCategory::parse(&args[0]) else {
        let keys: Vec<&str> = AssetCategory::all().iter().map(|c| c.storage_key()).collect();
        bail!("Unknown category '{}'. Use one of: {}", args[0], keys.join(", "));
    };
    let label = args[2..].join(" ");
    let item = AssetDraft::new(category, &label, &args[1])?.into_item();
    db.insert_item(&item)?;
    println!(
        "Added {} {} to {} (id {})",
        item.name,
        format_amount(item.amount, false),
        category.label(),
        item.short_id()
    );
    Ok(item)
}

pub(crate) fn cli_edit(args: &[String], db: &mut Database) -> Result<AssetItem> {
    let Some(id) = args.first() else {
        bail!("Usage: assetui edit <id> [--name <n>] [--sub <s>] [--amount <a>]");
    };
    let mut item = resolve_item(db, id)?;
    let mut form = EditForm::from_item(&item);
    let mut changed = false;
    for (flag, field) in [("--name", "name"), ("--sub", "sub"), ("--amount", "amount")] {
        if let Some(value) = flag_value(args, flag) {
            form.set_field(field, value.to_string())?;
            changed = true;
        }
    }
    if !changed {
        bail!("Nothing to change. Pass --name, --sub or --amount");
    }

    form.apply_to(&mut item)?;
    db.update_item(&item)?;
    println!(
        "Updated {}: {} {}",
        item.short_id(),
        item.name,
        format_amount(item.amount, false)
    );
    Ok(item)
}

fn cli_delete(args: &[String], db: &mut Database) -> Result<()> {
    let Some(id) = args.first() else {
        bail!("Usage: assetui delete <id>");
    };
    let item = resolve_item(db, id)?;
    db.delete_item(item.id)?;
    println!("Deleted {} ({})", item.name, item.short_id());
    Ok(())
}

fn cli_categories() {
    for category in AssetCategory::all() {
        println!("{} [{}]", category.label(), category.storage_key());
        println!("  {}", category.description());
        println!("  Presets: {}", category.sub_categories().join(", "));
        println!();
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
