//! Concurrency layout engine for the day track.
//!
//! Maps a collection of time-ranged events onto horizontal slots so that
//! overlapping events render side by side instead of on top of each other.
//! The engine is a pure function of its input: no UI types, no I/O, and
//! bit-identical output for identical input.

use chrono::{DateTime, Duration, Local};

use crate::models::event::Event;

/// Fraction of the track width kept free for visual separation.
pub const TRACK_GAP: f32 = 0.05;

/// Horizontal slot assigned to one event, as fractions of the track width.
///
/// Recomputed from scratch on every layout pass; never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutSlot {
    /// Offset from the left edge of the track, `0 <= left < 1`.
    pub left: f32,
    /// Occupied fraction of the track, `0 < width <= 1`.
    pub width: f32,
}

impl LayoutSlot {
    /// Right edge of the slot.
    pub fn right(&self) -> f32 {
        self.left + self.width
    }
}

/// Assign a [`LayoutSlot`] to every event of a single day track.
///
/// The returned vector is parallel to `events`. Events are placed into
/// columns greedily in start order: the first column whose previous
/// occupant has ended is reused, otherwise a new column opens. An event's
/// width is then sized by its sibling set (every event whose time range
/// intersects its own, across all columns), so the final widths reflect
/// the full concurrency discovered over the whole pass, not just what was
/// known when the event was first placed.
///
/// Events with `end <= start` are upstream data-integrity violations; they
/// are treated as lasting one minute for overlap testing only.
pub fn layout_events(events: &[Event]) -> Vec<LayoutSlot> {
    let spans: Vec<(DateTime<Local>, DateTime<Local>)> =
        events.iter().map(|event| effective_span(event)).collect();

    // Stable sort by start time; ties keep input order, which fixes
    // column-assignment priority between simultaneous events.
    let mut order: Vec<usize> = (0..events.len()).collect();
    order.sort_by_key(|&i| spans[i].0);

    // Greedy column reuse: each column remembers when it frees up.
    let mut column_ends: Vec<DateTime<Local>> = Vec::new();
    let mut column_of = vec![0usize; events.len()];
    for &i in &order {
        let (start, end) = spans[i];
        match column_ends.iter().position(|&busy_until| busy_until <= start) {
            Some(column) => {
                column_ends[column] = end;
                column_of[i] = column;
            }
            None => {
                column_ends.push(end);
                column_of[i] = column_ends.len() - 1;
            }
        }
    }

    // Sizing pass over the index-addressed records. Sibling counts are only
    // final once every event has been placed, so widths are written here
    // rather than during placement.
    let mut slots = vec![
        LayoutSlot {
            left: 0.0,
            width: 1.0 - TRACK_GAP,
        };
        events.len()
    ];
    for i in 0..events.len() {
        let siblings = (0..events.len())
            .filter(|&j| j != i && ranges_intersect(spans[i], spans[j]))
            .count();
        let width = (1.0 - TRACK_GAP) / (siblings + 1) as f32;
        slots[i] = LayoutSlot {
            left: column_of[i] as f32 * width,
            width,
        };
    }

    slots
}

/// The span used for overlap testing. Degenerate events are widened to one
/// minute; the event itself is never mutated.
fn effective_span(event: &Event) -> (DateTime<Local>, DateTime<Local>) {
    if event.end > event.start {
        (event.start, event.end)
    } else {
        (event.start, event.start + Duration::minutes(1))
    }
}

fn ranges_intersect(
    a: (DateTime<Local>, DateTime<Local>),
    b: (DateTime<Local>, DateTime<Local>),
) -> bool {
    a.0 < b.1 && a.1 > b.0
}
