use super::shared::map_event_row;
use super::EventService;
use crate::models::event::Event;
use anyhow::Result;
use chrono::{DateTime, Local};

impl<'a> EventService<'a> {
    /// List every event ordered by start date.
    pub fn list_all(&self) -> Result<Vec<Event>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, location, color, status,
                    start_datetime, end_datetime, created_at, updated_at
             FROM events
             ORDER BY start_datetime ASC",
        )?;

        let events = stmt
            .query_map([], map_event_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(events)
    }

    /// Find events whose time range overlaps `[start, end)`.
    ///
    /// Timestamps are stored as RFC 3339 TEXT, which compares
    /// lexicographically in chronological order for a fixed offset.
    pub fn find_by_date_range(
        &self,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Result<Vec<Event>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, location, color, status,
                    start_datetime, end_datetime, created_at, updated_at
             FROM events
             WHERE start_datetime < ? AND end_datetime > ?
             ORDER BY start_datetime ASC",
        )?;

        let events = stmt
            .query_map([end.to_rfc3339(), start.to_rfc3339()], map_event_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(events)
    }
}
