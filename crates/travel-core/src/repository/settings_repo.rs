//! Settings Repository
//!
//! Persists the single `AppSettings` row.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{AppSettings, DomainError, DomainResult, SortPreference, Theme};
use super::db::{db_err, not_initialized, SharedConnection};

#[derive(Clone)]
pub struct SettingsRepository {
    conn: SharedConnection,
}

impl SettingsRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Load settings, writing defaults on first access
    pub async fn load(&self) -> DomainResult<AppSettings> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        match read_settings(conn)? {
            Some(settings) => Ok(settings),
            None => {
                let defaults = AppSettings::default();
                write_settings(conn, &defaults)?;
                tracing::info!("initialized default settings");
                Ok(defaults)
            }
        }
    }

    pub async fn save(&self, settings: &AppSettings) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        write_settings(conn, settings)
    }

    /// Stamp the last successful spreadsheet sync
    pub async fn touch_last_sync(&self, at: DateTime<Utc>) -> DomainResult<AppSettings> {
        let mut settings = self.load().await?;
        settings.last_sync = Some(at);
        self.save(&settings).await?;
        Ok(settings)
    }
}

fn read_settings(conn: &Connection) -> DomainResult<Option<AppSettings>> {
    let row = conn
        .query_row(
            "SELECT admin_pin, theme, last_sync, sort_preference FROM settings WHERE id = 1",
            [],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<i64>>(2)?,
                    row.get::<_, String>(3)?,
                ))
            },
        )
        .optional()
        .map_err(db_err)?;

    let Some((admin_pin, theme, last_sync, sort_preference)) = row else {
        return Ok(None);
    };

    // A malformed or partial preference blob falls back to defaults
    let sort_preference: SortPreference = serde_json::from_str(&sort_preference).unwrap_or_default();

    Ok(Some(AppSettings {
        admin_pin,
        theme: Theme::parse(&theme).unwrap_or_default(),
        last_sync: last_sync.and_then(DateTime::<Utc>::from_timestamp_millis),
        sort_preference,
    }))
}

fn write_settings(conn: &Connection, settings: &AppSettings) -> DomainResult<()> {
    let sort_preference = serde_json::to_string(&settings.sort_preference)
        .map_err(|e| DomainError::Internal(e.to_string()))?;

    conn.execute(
        "INSERT OR REPLACE INTO settings (id, admin_pin, theme, last_sync, sort_preference) VALUES (1, ?1, ?2, ?3, ?4)",
        params![
            settings.admin_pin,
            settings.theme.as_str(),
            settings.last_sync.map(|t| t.timestamp_millis()),
            sort_preference,
        ],
    )
    .map_err(db_err)?;
    Ok(())
}
