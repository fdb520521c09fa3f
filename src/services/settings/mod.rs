//! Persistence for timeline view settings.
//! A single-row table mirrors [`TimelineSettings`]; defaults are seeded by
//! schema initialization.

use anyhow::{anyhow, Context, Result};
use rusqlite::params;

use crate::models::settings::TimelineSettings;
use crate::services::database::Database;

pub struct SettingsService<'a> {
    db: &'a Database,
}

impl<'a> SettingsService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Get the current settings
    pub fn get(&self) -> Result<TimelineSettings> {
        let conn = self.db.connection();

        let settings = conn
            .query_row(
                "SELECT first_hour, last_hour, snap_minutes, days_visible, hour_height, theme
                 FROM settings WHERE id = 1",
                [],
                |row| {
                    Ok(TimelineSettings {
                        first_hour: row.get::<_, i64>(0)? as u32,
                        last_hour: row.get::<_, i64>(1)? as u32,
                        snap_minutes: row.get::<_, i64>(2)? as u32,
                        days_visible: row.get::<_, i64>(3)? as u32,
                        hour_height: row.get::<_, f64>(4)? as f32,
                        theme: row.get(5)?,
                    })
                },
            )
            .context("Failed to load settings")?;

        Ok(settings)
    }

    /// Update settings
    pub fn update(&self, settings: &TimelineSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        let conn = self.db.connection();

        conn.execute(
            "UPDATE settings
             SET first_hour = ?1,
                 last_hour = ?2,
                 snap_minutes = ?3,
                 days_visible = ?4,
                 hour_height = ?5,
                 theme = ?6,
                 updated_at = CURRENT_TIMESTAMP
             WHERE id = 1",
            params![
                settings.first_hour as i64,
                settings.last_hour as i64,
                settings.snap_minutes as i64,
                settings.days_visible as i64,
                settings.hour_height as f64,
                settings.theme,
            ],
        )
        .context("Failed to update settings")?;

        Ok(())
    }
}
