//! The event-store collaborator boundary.
//!
//! The layout engine and drag controller never talk to a concrete backend;
//! they go through [`EventStore`]. The production implementation is the
//! SQLite-backed [`EventService`](crate::services::event::EventService);
//! tests substitute a mock to pin down the call contract.

use anyhow::Result;
use chrono::{DateTime, Local};

use crate::models::event::Event;

/// Read/write access to the events owned by the surrounding application.
#[cfg_attr(test, mockall::automock)]
pub trait EventStore {
    /// Return all events whose time range overlaps `[range_start, range_end)`.
    fn fetch_events(
        &self,
        range_start: DateTime<Local>,
        range_end: DateTime<Local>,
    ) -> Result<Vec<Event>>;

    /// Persist new fields (including a rescheduled time range) for an
    /// existing event, identified by its id.
    fn update_event(&self, event: &Event) -> Result<()>;
}
