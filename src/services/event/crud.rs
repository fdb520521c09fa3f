use super::EventService;
use crate::models::event::Event;
use anyhow::{anyhow, Context, Result};
use chrono::Local;
use rusqlite::params;

impl<'a> EventService<'a> {
    /// Create a new event in the database.
    pub fn create(&self, mut event: Event) -> Result<Event> {
        event.validate().map_err(|e| anyhow!(e))?;

        let now = Local::now().to_rfc3339();

        self.conn
            .execute(
                "INSERT INTO events (
                    id, title, location, color, status,
                    start_datetime, end_datetime, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    event.id,
                    event.title,
                    event.location,
                    event.color,
                    event.status.as_str(),
                    event.start.to_rfc3339(),
                    event.end.to_rfc3339(),
                    &now,
                    &now,
                ],
            )
            .context("Failed to insert event")?;

        event.created_at = Some(Local::now());
        event.updated_at = Some(Local::now());

        Ok(event)
    }

    /// Retrieve an event by ID.
    pub fn get(&self, id: &str) -> Result<Option<Event>> {
        let result = self.conn.query_row(
            "SELECT id, title, location, color, status,
                    start_datetime, end_datetime, created_at, updated_at
             FROM events WHERE id = ?",
            [id],
            super::shared::map_event_row,
        );

        match result {
            Ok(event) => Ok(Some(event)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Update an existing event.
    pub fn update(&self, event: &Event) -> Result<()> {
        event.validate().map_err(|e| anyhow!(e))?;

        let rows_affected = self
            .conn
            .execute(
                "UPDATE events SET
                    title = ?, location = ?, color = ?, status = ?,
                    start_datetime = ?, end_datetime = ?, updated_at = ?
                 WHERE id = ?",
                params![
                    event.title,
                    event.location,
                    event.color,
                    event.status.as_str(),
                    event.start.to_rfc3339(),
                    event.end.to_rfc3339(),
                    Local::now().to_rfc3339(),
                    event.id,
                ],
            )
            .context("Failed to update event")?;

        if rows_affected == 0 {
            return Err(anyhow!("Event with id {} not found", event.id));
        }

        Ok(())
    }

    /// Delete an event by ID.
    pub fn delete(&self, id: &str) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM events WHERE id = ?", [id])
            .context("Failed to delete event")?;

        if rows_affected == 0 {
            return Err(anyhow!("Event with id {} not found", id));
        }

        Ok(())
    }
}
