// Event module
// Timeline event model shared by the layout engine, the drag controller
// and the SQLite store.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation failures for [`Event`] construction and updates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventError {
    #[error("Event title cannot be empty")]
    EmptyTitle,
    #[error("Event end time must be after start time")]
    EndNotAfterStart,
    #[error("Color must be in hex format (#RRGGBB or #RGB)")]
    InvalidColor,
    #[error("Event {0} is required")]
    MissingField(&'static str),
}

/// Completion state of an event. Affects display styling only; the layout
/// engine and drag controller never consult it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Pending,
    Completed,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Pending => "pending",
            EventStatus::Completed => "completed",
        }
    }

    /// Parse the stored form; unknown values fall back to `Pending`.
    pub fn parse(value: &str) -> Self {
        match value {
            "completed" => EventStatus::Completed,
            _ => EventStatus::Pending,
        }
    }
}

/// A time-ranged event on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Opaque unique identifier (v4 UUID for locally created events).
    pub id: String,
    pub title: String,
    pub location: Option<String>,
    /// Hex display color (#RRGGBB), display-only.
    pub color: Option<String>,
    pub status: EventStatus,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub created_at: Option<DateTime<Local>>,
    pub updated_at: Option<DateTime<Local>>,
}

impl Event {
    /// Create a new pending event with a fresh identifier.
    ///
    /// # Arguments
    /// * `title` - Event title (required, non-empty)
    /// * `start` - Event start time
    /// * `end` - Event end time, must be after `start`
    pub fn new(
        title: impl Into<String>,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Result<Self, EventError> {
        let event = Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            location: None,
            color: None,
            status: EventStatus::Pending,
            start,
            end,
            created_at: None,
            updated_at: None,
        };
        event.validate()?;
        Ok(event)
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), EventError> {
        if self.title.trim().is_empty() {
            return Err(EventError::EmptyTitle);
        }

        if self.end <= self.start {
            return Err(EventError::EndNotAfterStart);
        }

        if let Some(ref color) = self.color {
            if !color.starts_with('#') || (color.len() != 7 && color.len() != 4) {
                return Err(EventError::InvalidColor);
            }
        }

        Ok(())
    }

    /// Get the duration of the event
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    /// True when the event's time range intersects `[range_start, range_end)`.
    pub fn overlaps_range(&self, range_start: DateTime<Local>, range_end: DateTime<Local>) -> bool {
        self.start < range_end && self.end > range_start
    }
}

/// Builder for creating events with optional fields
pub struct EventBuilder {
    title: Option<String>,
    location: Option<String>,
    color: Option<String>,
    status: EventStatus,
    start: Option<DateTime<Local>>,
    end: Option<DateTime<Local>>,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self {
            title: None,
            location: None,
            color: None,
            status: EventStatus::Pending,
            start: None,
            end: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the event color (hex format)
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }

    pub fn start(mut self, start: DateTime<Local>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: DateTime<Local>) -> Self {
        self.end = Some(end);
        self
    }

    /// Build the event
    pub fn build(self) -> Result<Event, EventError> {
        let event = Event {
            id: Uuid::new_v4().to_string(),
            title: self.title.ok_or(EventError::MissingField("title"))?,
            location: self.location,
            color: self.color,
            status: self.status,
            start: self.start.ok_or(EventError::MissingField("start time"))?,
            end: self.end.ok_or(EventError::MissingField("end time"))?,
            created_at: None,
            updated_at: None,
        };

        event.validate()?;
        Ok(event)
    }
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self::new()
    }
}
