mod schema;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use uuid::Uuid;

use crate::models::*;

const ITEM_COLUMNS: &str =
    "id, name, amount, category, sub_category, creation_date, update_date";

pub(crate) struct Database {
    conn: Connection,
}

/// A row exactly as stored, before decoding into an [`AssetItem`].
struct ItemRow {
    id: String,
    name: String,
    amount: String,
    category: String,
    sub_category: String,
    creation_date: String,
    update_date: String,
}

impl ItemRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            amount: row.get(2)?,
            category: row.get(3)?,
            sub_category: row.get(4)?,
            creation_date: row.get(5)?,
            update_date: row.get(6)?,
        })
    }

    fn into_item(self) -> Result<AssetItem> {
        let id = Uuid::parse_str(&self.id)
            .with_context(|| format!("Corrupt asset id: '{}'", self.id))?;
        let amount = Decimal::from_str(&self.amount)
            .with_context(|| format!("Corrupt amount '{}' for asset {id}", self.amount))?;
        let category = AssetCategory::parse(&self.category)
            .with_context(|| format!("Unknown category '{}' for asset {id}", self.category))?;
        Ok(AssetItem {
            id,
            name: self.name,
            amount,
            category,
            sub_category: self.sub_category,
            creation_date: parse_timestamp(&self.creation_date)?,
            update_date: parse_timestamp(&self.update_date)?,
        })
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)
        .with_context(|| format!("Corrupt timestamp: '{s}'"))?
        .with_timezone(&Utc))
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        tracing::info!(
            path = %path.display(),
            items = db.get_item_count()?,
            "opened asset store"
        );
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        // Check if schema_version table exists
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                tracing::info!(from_version, "applying schema migration");
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Writes ────────────────────────────────────────────────

    /// Fails if an item with the same id is already stored.
    pub(crate) fn insert_item(&self, item: &AssetItem) -> Result<()> {
        insert_on(&self.conn, item)?;
        tracing::debug!(id = %item.id, category = item.category.storage_key(), "inserted asset");
        Ok(())
    }

    /// Insert every item in one transaction. Nothing is written if any id
    /// already exists.
    pub(crate) fn insert_items_batch(&mut self, items: &[AssetItem]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        for item in items {
            insert_on(&tx, item)?;
        }
        tx.commit()?;
        tracing::debug!(count = items.len(), "inserted asset batch");
        Ok(items.len())
    }

    /// Persist the editable fields of an existing item. Fails if the id is
    /// not stored.
    pub(crate) fn update_item(&self, item: &AssetItem) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE asset_items SET name = ?1, sub_category = ?2, amount = ?3, update_date = ?4
             WHERE id = ?5",
            params![
                item.name,
                item.sub_category,
                item.amount.to_string(),
                format_timestamp(&item.update_date),
                item.id.to_string(),
            ],
        )?;
        if changed == 0 {
            bail!("Asset {} not found", item.id);
        }
        tracing::debug!(id = %item.id, "updated asset");
        Ok(())
    }

    /// Idempotent. Returns whether a row was removed.
    pub(crate) fn delete_item(&self, id: Uuid) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM asset_items WHERE id = ?1", params![id.to_string()])?;
        tracing::debug!(%id, removed, "deleted asset");
        Ok(removed > 0)
    }

    // ── Reads ─────────────────────────────────────────────────

    /// Full snapshot, grouped by category in catalog order, then by name.
    pub(crate) fn get_items(&self) -> Result<Vec<AssetItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {ITEM_COLUMNS} FROM asset_items"))?;
        let rows = stmt
            .query_map([], ItemRow::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let mut items = rows
            .into_iter()
            .map(ItemRow::into_item)
            .collect::<Result<Vec<_>>>()?;
        items.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        Ok(items)
    }

    pub(crate) fn get_item_by_id(&self, id: Uuid) -> Result<Option<AssetItem>> {
        let result = self.conn.query_row(
            &format!("SELECT {ITEM_COLUMNS} FROM asset_items WHERE id = ?1"),
            params![id.to_string()],
            ItemRow::from_row,
        );
        match result {
            Ok(row) => Ok(Some(row.into_item()?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Items whose id starts with `prefix` (as printed by the CLI).
    /// Only hex digits and hyphens can ever match.
    pub(crate) fn find_items_by_id_prefix(&self, prefix: &str) -> Result<Vec<AssetItem>> {
        let prefix = prefix.trim().to_lowercase();
        if !is_id_prefix(&prefix) {
            return Ok(Vec::new());
        }
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ITEM_COLUMNS} FROM asset_items \
             WHERE substr(id, 1, length(?1)) = ?1 ORDER BY id"
        ))?;
        let rows = stmt
            .query_map(params![prefix], ItemRow::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.into_iter().map(ItemRow::into_item).collect()
    }

    #[cfg(test)]
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    pub(crate) fn get_item_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM asset_items", [], |row| row.get(0))?)
    }
}

pub(crate) fn is_id_prefix(prefix: &str) -> bool {
    prefix.chars().all(|c| c.is_ascii_hexdigit() || c == '-')
}

fn insert_on(conn: &Connection, item: &AssetItem) -> Result<()> {
    let id = item.id.to_string();
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM asset_items WHERE id = ?1)",
        params![id],
        |row| row.get(0),
    )?;
    if exists {
        bail!("Asset {} already exists", item.id);
    }
    conn.execute(
        &format!("INSERT INTO asset_items ({ITEM_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
        params![
            id,
            item.name,
            item.amount.to_string(),
            item.category.storage_key(),
            item.sub_category,
            format_timestamp(&item.creation_date),
            format_timestamp(&item.update_date),
        ],
    )?;
    Ok(())
}
