//! Drag-and-drop rescheduling controller.
//!
//! A pointer-down on an event block opens a [`DragContext`]; pointer motion
//! beyond [`DRAG_THRESHOLD_PX`] confirms the gesture as a drag, and release
//! resolves it through [`complete_drag`] into exactly one of three
//! outcomes: open the editor (a click), reschedule through the event store
//! (a drag onto a valid slot), or a silent no-op (anything else). Escape
//! cancels the whole session without touching the store.

use chrono::{DateTime, Duration, Local};
use egui::{Context, Id, Pos2, Vec2};

use crate::models::event::Event;
use crate::services::store::EventStore;
use crate::ui::geometry::GridGeometry;

/// Pointer displacement (pixels) above which a press becomes a drag
/// instead of a click.
pub const DRAG_THRESHOLD_PX: f32 = 5.0;

/// State of one pointer-drag session over an event block.
#[derive(Clone, Debug)]
pub struct DragContext {
    pub event_id: String,
    pub original_start: DateTime<Local>,
    pub original_end: DateTime<Local>,
    /// Event length; invariant across a move (drag relocates, never resizes).
    pub duration: Duration,
    /// Where the pointer went down.
    pub press_pos: Pos2,
    /// Latest pointer position.
    pub pointer_pos: Pos2,
    /// Press offset from the event block's top-left corner, used to keep
    /// the block anchored under the pointer while previewing.
    pub pointer_offset: Vec2,
    /// True once displacement has exceeded the threshold; a session that
    /// never moves stays a click.
    pub has_moved: bool,
}

impl DragContext {
    pub fn from_event(event: &Event, press_pos: Pos2, pointer_offset: Vec2) -> Self {
        Self {
            event_id: event.id.clone(),
            original_start: event.start,
            original_end: event.end,
            duration: event.end - event.start,
            press_pos,
            pointer_pos: press_pos,
            pointer_offset,
            has_moved: false,
        }
    }

    /// Record a pointer move. Last position wins; the confirmed flag
    /// latches once the threshold is crossed and never resets.
    pub fn pointer_moved(&mut self, pos: Pos2) {
        self.pointer_pos = pos;
        if !self.has_moved && (pos - self.press_pos).length() > DRAG_THRESHOLD_PX {
            self.has_moved = true;
        }
    }

    /// A session that never crossed the threshold resolves as a click.
    pub fn is_click(&self) -> bool {
        !self.has_moved
    }

    /// The snapped start/end pair for the current pointer position, or
    /// `None` when the pointer is outside the droppable grid.
    pub fn drop_times(&self, grid: &GridGeometry) -> Option<(DateTime<Local>, DateTime<Local>)> {
        let (day, time) = grid.slot_at(self.pointer_pos)?;
        let start = day.and_time(time).and_local_timezone(Local).single()?;
        Some((start, start + self.duration))
    }
}

/// How a completed drag session resolved.
#[derive(Debug)]
pub enum DropOutcome {
    /// The event was moved; `persisted` is false when the store rejected
    /// the update (the visual position is not rolled back, the caller
    /// surfaces the failure).
    Rescheduled { event: Event, persisted: bool },
    /// The gesture never became a drag; the caller opens the edit dialog.
    OpenEditor(Event),
    /// Out-of-bounds drop, or the event vanished mid-drag. Nothing
    /// persisted, nothing to do.
    Rejected,
}

/// Resolve a finished drag session against the current event collection.
///
/// Issues at most one `update_event` call, and only for a confirmed drag
/// onto a valid target.
pub fn complete_drag(
    context: DragContext,
    grid: &GridGeometry,
    events: &[Event],
    store: &dyn EventStore,
) -> DropOutcome {
    let Some(event) = events.iter().find(|e| e.id == context.event_id) else {
        log::debug!("Dragged event {} no longer exists", context.event_id);
        return DropOutcome::Rejected;
    };

    if context.is_click() {
        return DropOutcome::OpenEditor(event.clone());
    }

    let Some((new_start, new_end)) = context.drop_times(grid) else {
        log::debug!("Drop target out of bounds for event {}", context.event_id);
        return DropOutcome::Rejected;
    };

    let mut moved = event.clone();
    moved.start = new_start;
    moved.end = new_end;

    let persisted = match store.update_event(&moved) {
        Ok(()) => true,
        Err(err) => {
            log::error!("Failed to move event {}: {}", moved.id, err);
            false
        }
    };

    DropOutcome::Rescheduled {
        event: moved,
        persisted,
    }
}

/// Owner of the single active [`DragContext`], stored in egui memory so
/// every widget of the frame sees the same session.
pub struct DragManager;

impl DragManager {
    fn storage_id() -> Id {
        Id::new("timeboard_event_drag_state")
    }

    /// Start a session. Any stale context from an interrupted drag is
    /// replaced; at most one event is ever in flight.
    pub fn begin(ctx: &Context, context: DragContext) {
        ctx.memory_mut(|mem| {
            mem.data.insert_persisted(Self::storage_id(), context);
        });
    }

    pub fn active(ctx: &Context) -> Option<DragContext> {
        ctx.memory_mut(|mem| mem.data.get_persisted::<DragContext>(Self::storage_id()))
    }

    pub fn is_active(ctx: &Context) -> bool {
        Self::active(ctx).is_some()
    }

    /// Feed the latest pointer position into the active session.
    pub fn update_pointer(ctx: &Context, pos: Pos2) {
        let id = Self::storage_id();
        ctx.memory_mut(|mem| {
            if let Some(mut state) = mem.data.get_persisted::<DragContext>(id) {
                state.pointer_moved(pos);
                mem.data.insert_persisted(id, state);
            }
        });
    }

    /// Take the session out of storage for resolution on pointer-up.
    pub fn finish(ctx: &Context) -> Option<DragContext> {
        let id = Self::storage_id();
        let mut result = None;
        ctx.memory_mut(|mem| {
            if let Some(current) = mem.data.get_persisted::<DragContext>(id) {
                result = Some(current);
                mem.data.remove::<DragContext>(id);
            }
        });
        result
    }

    /// Abort the session, discarding all pending coordinates.
    pub fn cancel(ctx: &Context) {
        ctx.memory_mut(|mem| {
            mem.data.remove::<DragContext>(Self::storage_id());
        });
    }
}
