//! The week track: day columns over a scrollable hour grid.
//!
//! Renders events through the layout engine so concurrent events share a
//! column side by side, and feeds pointer input into the drag controller.
//! The track is allocated as a single rect; all hit-testing and drop math
//! goes through [`GridGeometry`] rather than per-cell widgets.

use chrono::{Local, NaiveDate, NaiveTime, Timelike};
use egui::{Color32, CursorIcon, Pos2, Rect, Sense, Stroke, Vec2};

use crate::layout::{layout_events, LayoutSlot};
use crate::models::event::Event;
use crate::models::settings::TimelineSettings;
use crate::services::store::EventStore;
use crate::ui::drag::{complete_drag, DragContext, DragManager, DropOutcome};
use crate::ui::event_rendering::{render_drop_preview, render_event_block};
use crate::ui::geometry::GridGeometry;
use crate::ui::{format_event_tooltip, parse_color};

/// Width of the hour-label gutter on the left of the track.
pub const TIME_LABEL_WIDTH: f32 = 50.0;

/// What the user did to the timeline this frame.
#[derive(Default)]
pub struct TimelineInteraction {
    /// Event that was clicked for editing.
    pub event_to_edit: Option<Event>,
    /// Event moved by a completed drag (already sent to the store).
    pub rescheduled: Option<Event>,
    /// Persistence failed for the rescheduled event; message for the user.
    pub persistence_error: Option<String>,
    /// Empty slot that was double-clicked to create a new event.
    pub create_at: Option<(NaiveDate, NaiveTime)>,
}

/// Render the timeline for the days starting at `first_day` and resolve
/// this frame's pointer input.
pub fn render_timeline(
    ui: &mut egui::Ui,
    first_day: NaiveDate,
    events: &[Event],
    settings: &TimelineSettings,
    store: &dyn EventStore,
) -> TimelineInteraction {
    let mut result = TimelineInteraction::default();

    let day_width = (ui.available_width() - TIME_LABEL_WIDTH) / settings.days_visible as f32;
    render_day_headers(ui, first_day, settings, day_width);

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 0.0;

                let track_height = settings.visible_hours() as f32 * settings.hour_height;
                let (gutter_rect, _) = ui.allocate_exact_size(
                    Vec2::new(TIME_LABEL_WIDTH, track_height),
                    Sense::hover(),
                );
                let (track_rect, response) = ui.allocate_exact_size(
                    Vec2::new(day_width * settings.days_visible as f32, track_height),
                    Sense::click_and_drag(),
                );

                let grid = GridGeometry::new(
                    track_rect.min,
                    track_rect.width(),
                    first_day,
                    settings,
                );

                draw_hour_gutter(ui, gutter_rect, &grid);
                draw_grid(ui, track_rect, &grid);

                // Layout pass: one track per day, slots recomputed fresh
                // from the current event collection.
                let mut hitboxes: Vec<(Rect, Event)> = Vec::new();
                let active_drag = DragManager::active(ui.ctx());
                let drag_source_id = active_drag
                    .as_ref()
                    .filter(|context| context.has_moved)
                    .map(|context| context.event_id.clone());

                for (day_index, day) in grid.days.iter().enumerate() {
                    let day_events: Vec<Event> = events
                        .iter()
                        .filter(|event| event.start.date_naive() == *day)
                        .cloned()
                        .collect();
                    let slots = layout_events(&day_events);

                    for (event, slot) in day_events.iter().zip(slots.iter()) {
                        let rect = grid.event_rect(day_index, event, slot);
                        if rect.height() <= 0.0 {
                            continue;
                        }
                        let is_drag_source =
                            drag_source_id.as_deref() == Some(event.id.as_str());
                        render_event_block(ui, rect, event, is_drag_source);
                        hitboxes.push((rect, event.clone()));
                    }
                }

                draw_current_time_indicator(ui, &grid);

                handle_pointer(
                    ui,
                    &response,
                    &grid,
                    events,
                    &hitboxes,
                    store,
                    &mut result,
                );
            });
        });

    result
}

fn render_day_headers(
    ui: &mut egui::Ui,
    first_day: NaiveDate,
    settings: &TimelineSettings,
    day_width: f32,
) {
    let today = Local::now().date_naive();

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        ui.add_space(TIME_LABEL_WIDTH);

        for i in 0..settings.days_visible {
            let day = first_day + chrono::Duration::days(i as i64);
            let label = day.format("%a %d").to_string();
            let (rect, _) =
                ui.allocate_exact_size(Vec2::new(day_width, 22.0), Sense::hover());

            if day == today {
                ui.painter().rect_filled(
                    rect,
                    3.0,
                    Color32::from_rgba_unmultiplied(100, 150, 200, 40),
                );
            }
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                label,
                egui::FontId::proportional(12.0),
                if day == today {
                    ui.visuals().strong_text_color()
                } else {
                    ui.visuals().text_color()
                },
            );
        }
    });
    ui.separator();
}

fn draw_hour_gutter(ui: &mut egui::Ui, gutter_rect: Rect, grid: &GridGeometry) {
    for hour in grid.first_hour..=grid.last_hour {
        let time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap();
        let y = grid.y_of_time(time);
        ui.painter().text(
            Pos2::new(gutter_rect.right() - 5.0, y),
            egui::Align2::RIGHT_CENTER,
            format!("{:02}:00", hour),
            egui::FontId::proportional(11.0),
            Color32::GRAY,
        );
    }
}

fn draw_grid(ui: &mut egui::Ui, track_rect: Rect, grid: &GridGeometry) {
    let today = Local::now().date_naive();
    let hour_line = ui.visuals().widgets.noninteractive.bg_stroke.color;
    let divider = hour_line.linear_multiply(0.6);

    // Today column tint
    if let Some(day_index) = grid.days.iter().position(|d| *d == today) {
        let x = grid.x_of_day(day_index);
        ui.painter().rect_filled(
            Rect::from_min_size(
                Pos2::new(x, track_rect.top()),
                Vec2::new(grid.day_width, track_rect.height()),
            ),
            0.0,
            Color32::from_rgba_unmultiplied(100, 150, 200, 12),
        );
    }

    // Horizontal hour lines
    for hour in grid.first_hour..=grid.last_hour {
        let time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap();
        let y = grid.y_of_time(time);
        ui.painter().line_segment(
            [
                Pos2::new(track_rect.left(), y),
                Pos2::new(track_rect.right(), y),
            ],
            Stroke::new(1.0, hour_line),
        );
    }

    // Vertical day dividers
    for day_index in 0..=grid.days.len() {
        let x = grid.origin.x + day_index as f32 * grid.day_width;
        ui.painter().line_segment(
            [
                Pos2::new(x, track_rect.top()),
                Pos2::new(x, track_rect.bottom()),
            ],
            Stroke::new(1.0, divider),
        );
    }
}

/// Draw the current time indicator line across today's column.
fn draw_current_time_indicator(ui: &mut egui::Ui, grid: &GridGeometry) {
    let now = Local::now();
    let Some(day_index) = grid.days.iter().position(|d| *d == now.date_naive()) else {
        return;
    };
    let time = now.time();
    if time.hour() < grid.first_hour || time.hour() > grid.last_hour {
        return;
    }

    let y = grid.y_of_time(time);
    let x_start = grid.x_of_day(day_index);
    let x_end = x_start + grid.day_width;

    let line_color = Color32::from_rgb(255, 100, 100);
    ui.painter()
        .circle_filled(Pos2::new(x_start - 4.0, y), 3.0, line_color);
    ui.painter().line_segment(
        [Pos2::new(x_start, y), Pos2::new(x_end, y)],
        Stroke::new(2.0, line_color),
    );
}

/// Route this frame's pointer input through the drag state machine.
#[allow(clippy::too_many_arguments)]
fn handle_pointer(
    ui: &mut egui::Ui,
    response: &egui::Response,
    grid: &GridGeometry,
    events: &[Event],
    hitboxes: &[(Rect, Event)],
    store: &dyn EventStore,
    result: &mut TimelineInteraction,
) {
    let pointer_pos = ui
        .ctx()
        .pointer_interact_pos()
        .or_else(|| ui.input(|i| i.pointer.hover_pos()));

    let hovered_event = pointer_pos.and_then(|pos| {
        hitboxes
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(rect, event)| (*rect, event.clone()))
    });

    // Escape aborts the session outright; no coordinates survive.
    if DragManager::is_active(ui.ctx()) && ui.input(|i| i.key_pressed(egui::Key::Escape)) {
        DragManager::cancel(ui.ctx());
        return;
    }

    // Pointer-down over an event opens a session (unconfirmed until the
    // pointer travels past the click threshold).
    if response.hovered() && ui.input(|i| i.pointer.primary_pressed()) {
        if let (Some(pos), Some((rect, event))) = (pointer_pos, hovered_event.as_ref()) {
            DragManager::begin(
                ui.ctx(),
                DragContext::from_event(event, pos, pos - rect.min),
            );
        }
    }

    if let Some(pos) = pointer_pos {
        if DragManager::is_active(ui.ctx()) {
            DragManager::update_pointer(ui.ctx(), pos);
        }
    }

    // Live preview of the snapped drop target while a drag is confirmed.
    if let Some(context) = DragManager::active(ui.ctx()) {
        if context.has_moved {
            ui.output_mut(|out| out.cursor_icon = CursorIcon::Grabbing);
            ui.ctx().request_repaint();

            if let Some((start, end)) = context.drop_times(grid) {
                if let Some(day_index) = grid.day_index_at(context.pointer_pos.x) {
                    let preview = Event {
                        start,
                        end,
                        ..events
                            .iter()
                            .find(|e| e.id == context.event_id)
                            .cloned()
                            .unwrap_or_else(|| placeholder_event(&context.event_id, start, end))
                    };
                    let slot = LayoutSlot {
                        left: 0.0,
                        width: 1.0 - crate::layout::TRACK_GAP,
                    };
                    let rect = grid.event_rect(day_index, &preview, &slot);
                    let color = preview
                        .color
                        .as_deref()
                        .and_then(parse_color)
                        .unwrap_or(Color32::from_rgb(120, 200, 120));
                    render_drop_preview(ui, rect, color);
                }
            }
        }
    } else if hovered_event.is_some() {
        ui.output_mut(|out| out.cursor_icon = CursorIcon::PointingHand);
    }

    // Tooltip for the hovered event while idle.
    if !DragManager::is_active(ui.ctx()) {
        if let Some((_, event)) = hovered_event.as_ref() {
            if response.hovered() {
                let tooltip = format_event_tooltip(event);
                response.clone().on_hover_ui_at_pointer(|ui| {
                    ui.label(tooltip);
                });
            }
        }
    }

    // Pointer-up resolves the session: click, reschedule, or no-op.
    if ui.input(|i| i.pointer.primary_released()) {
        if let Some(context) = DragManager::finish(ui.ctx()) {
            match complete_drag(context, grid, events, store) {
                DropOutcome::OpenEditor(event) => {
                    result.event_to_edit = Some(event);
                }
                DropOutcome::Rescheduled { event, persisted } => {
                    if !persisted {
                        result.persistence_error =
                            Some(format!("Failed to save \"{}\"", event.title));
                    }
                    result.rescheduled = Some(event);
                }
                DropOutcome::Rejected => {}
            }
        }
    }

    // Double-click on empty track space creates an event at that slot.
    if response.double_clicked() && hovered_event.is_none() {
        if let Some(slot) = pointer_pos.and_then(|pos| grid.slot_at(pos)) {
            result.create_at = Some(slot);
        }
    }
}

/// Stand-in used only for preview sizing when the dragged event vanished
/// from the collection mid-drag.
fn placeholder_event(
    id: &str,
    start: chrono::DateTime<Local>,
    end: chrono::DateTime<Local>,
) -> Event {
    Event {
        id: id.to_string(),
        title: String::new(),
        location: None,
        color: None,
        status: crate::models::event::EventStatus::Pending,
        start,
        end,
        created_at: None,
        updated_at: None,
    }
}
