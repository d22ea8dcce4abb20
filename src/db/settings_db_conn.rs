// src/db/settings_db_conn.rs
use rusqlite::{Connection, Result};
use std::{fs, path::Path};

pub const SETTINGS_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS settings (
        key        TEXT PRIMARY KEY,
        value      TEXT NOT NULL,
        category   TEXT NOT NULL DEFAULT 'GENERAL',
        updated_by TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE INDEX IF NOT EXISTS idx_settings_category ON settings(category);
"#;

pub fn open_settings_db_at<P: AsRef<Path>>(db_path: P) -> Result<Connection> {
    let db_path = db_path.as_ref();

    if let Some(parent) = db_path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let conn = Connection::open(db_path)?;

    conn.execute_batch(
        r#"
        PRAGMA journal_mode = WAL;
        PRAGMA busy_timeout = 5000;
        "#,
    )?;
    conn.execute_batch(SETTINGS_SCHEMA)?;

    Ok(conn)
}
