//! SQLite-backed settings store.
//!
//! # Invariants
//! - Each `AppSettings` field is one row of the `settings` table.
//! - Values are JSON-encoded; unknown keys are ignored on load.
//! - A save writes every field inside one transaction.

use super::{AppSettings, SettingsError, SettingsStore};
use log::{debug, info};
use rusqlite::{params, Connection};
use serde_json::{Map, Value};

/// Key-value settings store over an open, migrated connection.
pub struct SqliteSettingsStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSettingsStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SettingsStore for SqliteSettingsStore<'_> {
    fn load(&self) -> Result<AppSettings, SettingsError> {
        let mut merged = settings_to_map(&AppSettings::default())?;

        let mut stmt = self.conn.prepare("SELECT key, value FROM settings;")?;
        let mut rows = stmt.query([])?;
        let mut stored = 0usize;
        while let Some(row) = rows.next()? {
            let key: String = row.get(0)?;
            let raw: String = row.get(1)?;
            if !merged.contains_key(key.as_str()) {
                debug!("event=settings_load module=settings status=skipped key={key}");
                continue;
            }
            let value: Value = serde_json::from_str(&raw).map_err(|err| {
                SettingsError::InvalidData(format!("setting `{key}` is not valid JSON: {err}"))
            })?;
            merged.insert(key, value);
            stored += 1;
        }

        let settings: AppSettings = serde_json::from_value(Value::Object(merged))
            .map_err(|err| SettingsError::InvalidData(err.to_string()))?;
        info!("event=settings_load module=settings status=ok stored_keys={stored}");
        Ok(settings.normalized())
    }

    fn save(&self, settings: &AppSettings) -> Result<AppSettings, SettingsError> {
        let normalized = settings.normalized();
        normalized.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        for (key, value) in settings_to_map(&normalized)? {
            tx.execute(
                "INSERT INTO settings (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = (strftime('%s', 'now') * 1000);",
                params![key, value.to_string()],
            )?;
        }
        tx.commit()?;

        info!("event=settings_save module=settings status=ok");
        Ok(normalized)
    }

    fn reset(&self) -> Result<AppSettings, SettingsError> {
        self.conn.execute("DELETE FROM settings;", [])?;
        info!("event=settings_reset module=settings status=ok");
        Ok(AppSettings::default())
    }
}

fn settings_to_map(settings: &AppSettings) -> Result<Map<String, Value>, SettingsError> {
    match serde_json::to_value(settings) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(SettingsError::InvalidData(format!(
            "settings encoded as non-object `{other}`"
        ))),
        Err(source) => Err(SettingsError::Encode {
            key: "*".to_string(),
            source,
        }),
    }
}
