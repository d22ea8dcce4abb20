// src/db/settings_db_ops.rs
//! SQLite implementation of the settings store

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use super::settings_db_conn::{open_settings_db_at, SETTINGS_SCHEMA};
use super::{SettingCreate, SettingRecord, SettingUpdate, SettingsStore, SettingsTx};
use crate::enums::SettingCategory;
use crate::error::Result;

const SELECT_COLUMNS: &str = "key, value, category, updated_by, created_at, updated_at";

pub struct SqliteSettingsStore {
    conn: Mutex<Connection>,
}

impl SqliteSettingsStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(open_settings_db_at(path)?))
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SETTINGS_SCHEMA)?;
        Ok(Self::new(conn))
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SqliteSettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteSettingsStore").finish_non_exhaustive()
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<SettingRecord> {
    let category: String = row.get(2)?;
    let category = category
        .parse::<SettingCategory>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;
    Ok(SettingRecord {
        key: row.get(0)?,
        value: row.get(1)?,
        category,
        updated_by: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

/// Look up one setting by key
pub fn find_setting(conn: &Connection, key: &str) -> rusqlite::Result<Option<SettingRecord>> {
    conn.query_row(
        &format!("SELECT {SELECT_COLUMNS} FROM settings WHERE key = ?1"),
        [key],
        record_from_row,
    )
    .optional()
}

pub fn find_settings(
    conn: &Connection,
    category: Option<SettingCategory>,
) -> rusqlite::Result<Vec<SettingRecord>> {
    match category {
        Some(category) => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM settings WHERE category = ?1 ORDER BY key"
            ))?;
            let rows = stmt.query_map([category.as_str()], record_from_row)?;
            rows.collect()
        }
        None => {
            let mut stmt =
                conn.prepare(&format!("SELECT {SELECT_COLUMNS} FROM settings ORDER BY key"))?;
            let rows = stmt.query_map([], record_from_row)?;
            rows.collect()
        }
    }
}

/// Insert with `create`, or change value/updated_by with `update`
pub fn upsert_setting(
    conn: &Connection,
    key: &str,
    create: &SettingCreate<'_>,
    update: &SettingUpdate<'_>,
) -> rusqlite::Result<SettingRecord> {
    // Unknown keys take the create payload; existing rows keep their category
    let updated = conn.execute(
        r#"
        UPDATE settings
           SET value = ?2,
               updated_by = COALESCE(?3, updated_by),
               updated_at = datetime('now')
         WHERE key = ?1
        "#,
        params![key, update.value, update.updated_by],
    )?;
    if updated == 0 {
        conn.execute(
            r#"
            INSERT INTO settings (key, value, category, updated_by, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, datetime('now'), datetime('now'))
            "#,
            params![key, create.value, create.category.as_str(), create.updated_by],
        )?;
        debug!(key, category = %create.category, "created setting");
    }
    find_setting(conn, key)?.ok_or(rusqlite::Error::QueryReturnedNoRows)
}

impl SettingsTx for Connection {
    fn find_unique(&self, key: &str) -> Result<Option<SettingRecord>> {
        Ok(find_setting(self, key)?)
    }

    fn upsert(
        &self,
        key: &str,
        create: &SettingCreate<'_>,
        update: &SettingUpdate<'_>,
    ) -> Result<SettingRecord> {
        Ok(upsert_setting(self, key, create, update)?)
    }
}

impl SettingsStore for SqliteSettingsStore {
    fn find_unique(&self, key: &str) -> Result<Option<SettingRecord>> {
        Ok(find_setting(&self.lock(), key)?)
    }

    fn find_many(&self, category: Option<SettingCategory>) -> Result<Vec<SettingRecord>> {
        Ok(find_settings(&self.lock(), category)?)
    }

    fn upsert(
        &self,
        key: &str,
        create: &SettingCreate<'_>,
        update: &SettingUpdate<'_>,
    ) -> Result<SettingRecord> {
        let conn = self.lock();
        // UPDATE-then-INSERT must not interleave with another writer
        let tx = conn.unchecked_transaction()?;
        let record = upsert_setting(&tx, key, create, update)?;
        tx.commit()?;
        Ok(record)
    }

    fn transaction(&self, work: &mut dyn FnMut(&dyn SettingsTx) -> Result<()>) -> Result<()> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        // Dropping `tx` on the error path rolls back
        work(&*tx)?;
        tx.commit()?;
        Ok(())
    }
}
