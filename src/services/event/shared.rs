use chrono::{DateTime, Local};
use rusqlite::{self, Result, Row};

use crate::models::event::{Event, EventStatus};

pub(crate) fn to_local_datetime(value: String) -> Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

pub(crate) fn map_event_row(row: &Row<'_>) -> Result<Event> {
    Ok(Event {
        id: row.get(0)?,
        title: row.get(1)?,
        location: row.get(2)?,
        color: row.get(3)?,
        status: EventStatus::parse(&row.get::<_, String>(4)?),
        start: to_local_datetime(row.get::<_, String>(5)?)?,
        end: to_local_datetime(row.get::<_, String>(6)?)?,
        created_at: Some(to_local_datetime(row.get::<_, String>(7)?)?),
        updated_at: Some(to_local_datetime(row.get::<_, String>(8)?)?),
    })
}
