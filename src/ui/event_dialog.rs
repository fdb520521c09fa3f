//! Create/edit dialog for a single event.
//!
//! Times are entered as plain `YYYY-MM-DD` / `HH:MM` text; parsing and the
//! model's own validation gate the save button, so the dialog can never
//! hand back an event with an inverted time range.

use chrono::{Local, NaiveDate, NaiveTime, TimeZone};
use uuid::Uuid;

use crate::models::event::{Event, EventStatus};

/// Mutable form state for the dialog.
pub struct EventDialogState {
    /// `Some` when editing an existing event, `None` when creating.
    pub event_id: Option<String>,
    pub title: String,
    pub location: String,
    pub color: String,
    pub completed: bool,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub error: Option<String>,
}

/// What the user chose in the dialog this frame.
pub enum EventDialogResult {
    Save(Event),
    Delete(String),
    Cancel,
}

impl EventDialogState {
    /// Fresh form for a new one-hour event at the given slot.
    pub fn for_new(date: NaiveDate, time: NaiveTime) -> Self {
        let end = (time + chrono::Duration::hours(1)).max(time);
        Self {
            event_id: None,
            title: String::new(),
            location: String::new(),
            color: String::new(),
            completed: false,
            date: date.format("%Y-%m-%d").to_string(),
            start_time: time.format("%H:%M").to_string(),
            end_time: end.format("%H:%M").to_string(),
            error: None,
        }
    }

    /// Form pre-filled from an existing event.
    pub fn for_event(event: &Event) -> Self {
        Self {
            event_id: Some(event.id.clone()),
            title: event.title.clone(),
            location: event.location.clone().unwrap_or_default(),
            color: event.color.clone().unwrap_or_default(),
            completed: event.status == EventStatus::Completed,
            date: event.start.format("%Y-%m-%d").to_string(),
            start_time: event.start.format("%H:%M").to_string(),
            end_time: event.end.format("%H:%M").to_string(),
            error: None,
        }
    }

    /// Build and validate an [`Event`] from the form fields.
    pub fn parse_event(&self) -> Result<Event, String> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| "Date must be YYYY-MM-DD".to_string())?;
        let start_time = NaiveTime::parse_from_str(self.start_time.trim(), "%H:%M")
            .map_err(|_| "Start time must be HH:MM".to_string())?;
        let end_time = NaiveTime::parse_from_str(self.end_time.trim(), "%H:%M")
            .map_err(|_| "End time must be HH:MM".to_string())?;

        let start = Local
            .from_local_datetime(&date.and_time(start_time))
            .single()
            .ok_or_else(|| "Ambiguous start time".to_string())?;
        let end = Local
            .from_local_datetime(&date.and_time(end_time))
            .single()
            .ok_or_else(|| "Ambiguous end time".to_string())?;

        let location = (!self.location.trim().is_empty()).then(|| self.location.trim().to_string());
        let color = (!self.color.trim().is_empty()).then(|| self.color.trim().to_string());

        let event = Event {
            id: self
                .event_id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: self.title.trim().to_string(),
            location,
            color,
            status: if self.completed {
                EventStatus::Completed
            } else {
                EventStatus::Pending
            },
            start,
            end,
            created_at: None,
            updated_at: None,
        };

        event.validate().map_err(|e| e.to_string())?;
        Ok(event)
    }
}

/// Render the dialog window. Returns `Some` when the user resolved it.
pub fn render_event_dialog(
    ctx: &egui::Context,
    state: &mut EventDialogState,
) -> Option<EventDialogResult> {
    let mut result = None;
    let title = if state.event_id.is_some() {
        "Edit Event"
    } else {
        "New Event"
    };

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            egui::Grid::new("event_dialog_grid")
                .num_columns(2)
                .spacing([8.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Title:");
                    ui.text_edit_singleline(&mut state.title);
                    ui.end_row();

                    ui.label("Location:");
                    ui.text_edit_singleline(&mut state.location);
                    ui.end_row();

                    ui.label("Color:");
                    ui.text_edit_singleline(&mut state.color);
                    ui.end_row();

                    ui.label("Date:");
                    ui.text_edit_singleline(&mut state.date);
                    ui.end_row();

                    ui.label("Start:");
                    ui.text_edit_singleline(&mut state.start_time);
                    ui.end_row();

                    ui.label("End:");
                    ui.text_edit_singleline(&mut state.end_time);
                    ui.end_row();

                    ui.label("Completed:");
                    ui.checkbox(&mut state.completed, "");
                    ui.end_row();
                });

            if let Some(ref error) = state.error {
                ui.colored_label(egui::Color32::from_rgb(220, 80, 80), error);
            }

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    match state.parse_event() {
                        Ok(event) => result = Some(EventDialogResult::Save(event)),
                        Err(message) => state.error = Some(message),
                    }
                }
                if ui.button("Cancel").clicked() {
                    result = Some(EventDialogResult::Cancel);
                }
                if let Some(ref id) = state.event_id {
                    if ui.button("🗑 Delete").clicked() {
                        result = Some(EventDialogResult::Delete(id.clone()));
                    }
                }
            });
        });

    result
}
