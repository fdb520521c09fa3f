//! Timeline event service entry point.
//! Provides database-backed CRUD and range queries organized across
//! focused submodules, and implements the [`EventStore`] boundary used by
//! the drag controller.

use anyhow::Result;
use chrono::{DateTime, Local};
use rusqlite::Connection;

use crate::models::event::Event;
use crate::services::store::EventStore;

pub mod crud;
pub mod queries;
mod shared;

/// Service for managing timeline events stored in SQLite.
pub struct EventService<'a> {
    pub(crate) conn: &'a Connection,
}

impl<'a> EventService<'a> {
    /// Create a new EventService with a database connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl EventStore for EventService<'_> {
    fn fetch_events(
        &self,
        range_start: DateTime<Local>,
        range_end: DateTime<Local>,
    ) -> Result<Vec<Event>> {
        self.find_by_date_range(range_start, range_end)
    }

    fn update_event(&self, event: &Event) -> Result<()> {
        self.update(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::{Event, EventStatus};
    use crate::services::database::Database;
    use chrono::{Duration, TimeZone};

    fn setup_test_db() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        db
    }

    fn monday_nine() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
    }

    fn sample_event() -> Event {
        let start = monday_nine();
        Event::new("Study block", start, start + Duration::hours(1)).unwrap()
    }

    #[test]
    fn test_create_event() {
        let db = setup_test_db();
        let service = EventService::new(db.connection());

        let event = sample_event();
        let created = service.create(event.clone()).unwrap();

        assert_eq!(created.id, event.id);
        assert_eq!(created.title, event.title);
        assert!(created.created_at.is_some());
        assert!(created.updated_at.is_some());
    }

    #[test]
    fn test_create_event_with_optional_fields() {
        let db = setup_test_db();
        let service = EventService::new(db.connection());

        let event = Event::builder()
            .title("Career fair")
            .location("Student union")
            .color("#FF5733")
            .status(EventStatus::Completed)
            .start(monday_nine())
            .end(monday_nine() + Duration::hours(3))
            .build()
            .unwrap();

        let created = service.create(event.clone()).unwrap();
        assert_eq!(created.location, event.location);
        assert_eq!(created.color, event.color);
        assert_eq!(created.status, EventStatus::Completed);

        let reloaded = service.get(&created.id).unwrap().unwrap();
        assert_eq!(reloaded.status, EventStatus::Completed);
        assert_eq!(reloaded.location, Some("Student union".to_string()));
    }

    #[test]
    fn test_get_nonexistent_event() {
        let db = setup_test_db();
        let service = EventService::new(db.connection());

        let result = service.get("missing-id");
        assert!(result.is_ok());
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_update_event() {
        let db = setup_test_db();
        let service = EventService::new(db.connection());

        let mut event = service.create(sample_event()).unwrap();
        event.title = "Moved study block".to_string();
        event.start = event.start + Duration::hours(2);
        event.end = event.end + Duration::hours(2);

        service.update(&event).unwrap();

        let updated = service.get(&event.id).unwrap().unwrap();
        assert_eq!(updated.title, "Moved study block");
        assert_eq!(updated.start, event.start);
        assert_eq!(updated.end, event.end);
    }

    #[test]
    fn test_update_nonexistent_event() {
        let db = setup_test_db();
        let service = EventService::new(db.connection());

        let event = sample_event();
        assert!(service.update(&event).is_err());
    }

    #[test]
    fn test_delete_event() {
        let db = setup_test_db();
        let service = EventService::new(db.connection());

        let created = service.create(sample_event()).unwrap();
        service.delete(&created.id).unwrap();

        assert!(service.get(&created.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_nonexistent_event() {
        let db = setup_test_db();
        let service = EventService::new(db.connection());

        assert!(service.delete("missing-id").is_err());
    }

    #[test]
    fn test_find_by_date_range() {
        let db = setup_test_db();
        let service = EventService::new(db.connection());

        let nine = monday_nine();

        let earlier = Event::new("Earlier", nine - Duration::days(2), nine - Duration::days(2) + Duration::hours(1)).unwrap();
        service.create(earlier).unwrap();

        let inside = Event::new("Inside", nine, nine + Duration::hours(1)).unwrap();
        service.create(inside).unwrap();

        let later = Event::new("Later", nine + Duration::days(2), nine + Duration::days(2) + Duration::hours(1)).unwrap();
        service.create(later).unwrap();

        let events = service
            .find_by_date_range(nine - Duration::hours(1), nine + Duration::hours(2))
            .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Inside");
    }

    #[test]
    fn test_find_by_date_range_excludes_touching_events() {
        let db = setup_test_db();
        let service = EventService::new(db.connection());

        let nine = monday_nine();
        let event = Event::new("Edge", nine, nine + Duration::hours(1)).unwrap();
        service.create(event).unwrap();

        // A range that starts exactly at the event's end must not match.
        let events = service
            .find_by_date_range(nine + Duration::hours(1), nine + Duration::hours(2))
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_store_trait_round_trip() {
        let db = setup_test_db();
        let service = EventService::new(db.connection());
        let store: &dyn EventStore = &service;

        let nine = monday_nine();
        let created = service.create(sample_event()).unwrap();

        let mut moved = created.clone();
        moved.start = nine + Duration::hours(3);
        moved.end = nine + Duration::hours(4);
        store.update_event(&moved).unwrap();

        let fetched = store
            .fetch_events(nine + Duration::hours(3), nine + Duration::hours(5))
            .unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].start, moved.start);
        assert_eq!(fetched[0].duration(), created.duration());
    }
}
