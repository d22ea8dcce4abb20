// src/export/json.rs
use std::path::Path;

use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;

use crate::consts::REDACTED_VALUE;
use crate::crypto::is_sensitive_field;
use crate::error::Result;
use crate::manager::SettingsManager;

/// Build the export document straight from the store (bypassing the cache)
pub fn settings_snapshot(manager: &SettingsManager) -> Result<Value> {
    let records = manager.store().find_many(None)?;

    let settings: Vec<Value> = records
        .into_iter()
        .map(|record| {
            let value = if is_sensitive_field(&record.key) {
                REDACTED_VALUE.to_string()
            } else {
                record.value
            };
            json!({
                "key": record.key,
                "category": record.category,
                "value": value,
                "updated_by": record.updated_by,
                "updated_at": record.updated_at,
            })
        })
        .collect();

    Ok(json!({
        "export_format": "showcase-settings-v1",
        "exported_at": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        "exporter_version": env!("CARGO_PKG_VERSION"),
        "total_settings": settings.len(),
        "settings": settings,
    }))
}

/// Write the snapshot as pretty JSON; returns the number of settings exported
pub fn export_settings_json<P: AsRef<Path>>(manager: &SettingsManager, path: P) -> Result<usize> {
    let snapshot = settings_snapshot(manager)?;
    let total = snapshot["total_settings"].as_u64().unwrap_or_default() as usize;

    std::fs::write(path.as_ref(), serde_json::to_string_pretty(&snapshot)?)?;
    info!(total, path = %path.as_ref().display(), "exported settings");

    Ok(total)
}
