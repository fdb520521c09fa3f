// Property-based tests for the concurrency layout engine

use chrono::{Duration, TimeZone};
use proptest::prelude::*;

use timeboard::layout::{layout_events, LayoutSlot, TRACK_GAP};
use timeboard::models::event::Event;

const EPSILON: f32 = 1e-4;

fn event_at_minutes(start_minute: i64, duration_minutes: i64) -> Event {
    let day_start = chrono::Local
        .with_ymd_and_hms(2025, 3, 10, 0, 0, 0)
        .unwrap();
    let start = day_start + Duration::minutes(start_minute);
    Event::new("Block", start, start + Duration::minutes(duration_minutes)).unwrap()
}

fn slots_disjoint(a: &LayoutSlot, b: &LayoutSlot) -> bool {
    a.left + a.width <= b.left + EPSILON || b.left + b.width <= a.left + EPSILON
}

proptest! {
    /// Two passes over the same input yield bit-identical slots.
    #[test]
    fn prop_layout_deterministic(
        starts in prop::collection::vec(0i64..1200, 0..12),
        durations in prop::collection::vec(15i64..240, 12),
    ) {
        let events: Vec<Event> = starts
            .iter()
            .zip(durations.iter())
            .map(|(&start, &duration)| event_at_minutes(start, duration))
            .collect();

        let first = layout_events(&events);
        let second = layout_events(&events);
        prop_assert_eq!(first, second);
    }

    /// Events with no time-overlapping sibling always span the full track.
    #[test]
    fn prop_isolated_events_get_full_width(
        gaps in prop::collection::vec(1i64..60, 1..10),
        durations in prop::collection::vec(15i64..60, 10),
    ) {
        // Build strictly separated events: each starts after the previous
        // one's end plus a positive gap.
        let mut cursor = 0i64;
        let mut events = Vec::new();
        for (gap, duration) in gaps.iter().zip(durations.iter()) {
            cursor += gap;
            events.push(event_at_minutes(cursor, *duration));
            cursor += duration;
        }

        for slot in layout_events(&events) {
            prop_assert!((slot.width - (1.0 - TRACK_GAP)).abs() < EPSILON);
            prop_assert!(slot.left.abs() < EPSILON);
        }
    }

    /// Every member of a mutually-overlapping cluster gets its own
    /// horizontal interval: no two concurrent events share pixels.
    #[test]
    fn prop_mutually_overlapping_cluster_has_disjoint_slots(
        starts in prop::collection::vec(0i64..60, 2..8),
    ) {
        // All events cover minute 60, so every pair overlaps.
        let events: Vec<Event> = starts
            .iter()
            .map(|&start| event_at_minutes(start, 61 - start + 30))
            .collect();

        let slots = layout_events(&events);

        for i in 0..slots.len() {
            for j in (i + 1)..slots.len() {
                prop_assert!(
                    slots_disjoint(&slots[i], &slots[j]),
                    "slots {} and {} overlap: {:?} vs {:?}",
                    i, j, slots[i], slots[j]
                );
            }
        }
    }

    /// Slots always stay inside the track.
    #[test]
    fn prop_slots_stay_inside_track(
        starts in prop::collection::vec(0i64..600, 0..10),
    ) {
        // Equal durations keep concurrency uniform within each cluster.
        let events: Vec<Event> = starts
            .iter()
            .map(|&start| event_at_minutes(start, 60))
            .collect();

        for slot in layout_events(&events) {
            prop_assert!(slot.left >= -EPSILON);
            prop_assert!(slot.width > 0.0);
            prop_assert!(slot.left + slot.width <= 1.0 + EPSILON);
        }
    }
}
