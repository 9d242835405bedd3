pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS asset_items (
    id            TEXT PRIMARY KEY NOT NULL,
    name          TEXT NOT NULL,
    amount        TEXT NOT NULL,
    category      TEXT NOT NULL,
    sub_category  TEXT NOT NULL DEFAULT '',
    creation_date TEXT NOT NULL,
    update_date   TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_asset_items_category ON asset_items(category);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[
    // Future migrations go here:
    // (1, "ALTER TABLE asset_items ADD COLUMN notes TEXT NOT NULL DEFAULT '';"),
];
