//! Pixel <-> calendar coordinate mapping for the week track.
//!
//! All drag-and-drop math funnels through [`GridGeometry`]: day column from
//! the horizontal pixel, snapped time-of-day from the vertical pixel, and
//! the inverse mapping used to place event rectangles. Out-of-bounds pixels
//! map to `None`; callers treat that as "not a drop target".

use chrono::{NaiveDate, NaiveTime, Timelike};
use egui::{Pos2, Rect, Vec2};

use crate::layout::LayoutSlot;
use crate::models::event::Event;
use crate::models::settings::TimelineSettings;

/// Geometry of the visible track area for one frame.
#[derive(Clone, Debug)]
pub struct GridGeometry {
    /// Top-left corner of the track (the 00-minute line of `first_hour`
    /// on the first visible day), in screen coordinates.
    pub origin: Pos2,
    /// Pixel width of one day column.
    pub day_width: f32,
    /// Pixel height of one hour.
    pub hour_height: f32,
    /// The visible days, leftmost first.
    pub days: Vec<NaiveDate>,
    /// First hour of the visible window (top edge of the track).
    pub first_hour: u32,
    /// Last hour (inclusive) at which a drop may land.
    pub last_hour: u32,
    /// Snap granularity for drop times, in minutes.
    pub snap_minutes: u32,
}

impl GridGeometry {
    /// Build the geometry for a run of consecutive days starting at
    /// `first_day`, sized to fit `track_width` pixels.
    pub fn new(
        origin: Pos2,
        track_width: f32,
        first_day: NaiveDate,
        settings: &TimelineSettings,
    ) -> Self {
        let days: Vec<NaiveDate> = (0..settings.days_visible)
            .map(|i| first_day + chrono::Duration::days(i as i64))
            .collect();
        Self {
            origin,
            day_width: track_width / days.len() as f32,
            hour_height: settings.hour_height,
            days,
            first_hour: settings.first_hour,
            last_hour: settings.last_hour,
            snap_minutes: settings.snap_minutes,
        }
    }

    /// Total pixel size of the track.
    pub fn track_size(&self) -> Vec2 {
        Vec2::new(
            self.day_width * self.days.len() as f32,
            self.hour_height * (self.last_hour - self.first_hour + 1) as f32,
        )
    }

    /// Day column index for a horizontal pixel, or `None` outside the track.
    pub fn day_index_at(&self, x: f32) -> Option<usize> {
        let relative = x - self.origin.x;
        if relative < 0.0 {
            return None;
        }
        let index = (relative / self.day_width).floor() as usize;
        (index < self.days.len()).then_some(index)
    }

    /// Snapped time-of-day for a vertical pixel, or `None` when the hour
    /// falls outside the visible `[first_hour, last_hour]` window.
    ///
    /// The minute is rounded to the nearest snap interval; rounding up to
    /// a full hour carries before the bounds check, so a pixel just shy of
    /// the next hour line resolves to that hour rather than minute 60.
    pub fn time_at(&self, y: f32) -> Option<NaiveTime> {
        let hour_float = (y - self.origin.y) / self.hour_height + self.first_hour as f32;
        let mut hour = hour_float.floor() as i64;
        let fraction = hour_float - hour_float.floor();

        let steps = (fraction * 60.0 / self.snap_minutes as f32).round() as u32;
        let mut minute = steps * self.snap_minutes;
        if minute >= 60 {
            hour += 1;
            minute = 0;
        }

        if hour < self.first_hour as i64 || hour > self.last_hour as i64 {
            return None;
        }

        NaiveTime::from_hms_opt(hour as u32, minute, 0)
    }

    /// Map a pointer position to a `(day, snapped time)` drop target.
    pub fn slot_at(&self, pos: Pos2) -> Option<(NaiveDate, NaiveTime)> {
        let day = self.days[self.day_index_at(pos.x)?];
        let time = self.time_at(pos.y)?;
        Some((day, time))
    }

    /// Vertical pixel of a time-of-day (unclamped; callers clip).
    pub fn y_of_time(&self, time: NaiveTime) -> f32 {
        let hours_from_top = time.hour() as f32 + time.minute() as f32 / 60.0
            - self.first_hour as f32;
        self.origin.y + hours_from_top * self.hour_height
    }

    /// Left pixel edge of a day column.
    pub fn x_of_day(&self, day_index: usize) -> f32 {
        self.origin.x + day_index as f32 * self.day_width
    }

    /// Screen rectangle for an event in a day column, horizontally placed
    /// by its layout slot and vertically clamped to the visible window.
    pub fn event_rect(&self, day_index: usize, event: &Event, slot: &LayoutSlot) -> Rect {
        let column_left = self.x_of_day(day_index);
        let left = column_left + slot.left * self.day_width;
        let width = slot.width * self.day_width;

        let track_bottom = self.origin.y + self.track_size().y;
        let top = self
            .y_of_time(event.start.time())
            .clamp(self.origin.y, track_bottom);
        let bottom = self
            .y_of_time(event.end.time())
            .clamp(self.origin.y, track_bottom);

        Rect::from_min_max(Pos2::new(left, top), Pos2::new(left + width, bottom.max(top)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use test_case::test_case;

    fn grid() -> GridGeometry {
        GridGeometry::new(
            Pos2::new(0.0, 0.0),
            700.0, // 7 days x 100 px
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            &TimelineSettings::default(),
        )
    }

    #[test]
    fn test_day_index_at_column_boundaries() {
        let grid = grid();
        assert_eq!(grid.day_index_at(0.0), Some(0));
        assert_eq!(grid.day_index_at(99.9), Some(0));
        assert_eq!(grid.day_index_at(100.0), Some(1));
        assert_eq!(grid.day_index_at(699.0), Some(6));
    }

    #[test_case(-1.0 ; "left of the track")]
    #[test_case(700.0 ; "right edge is exclusive")]
    #[test_case(900.0 ; "far right of the track")]
    fn test_day_index_rejects_out_of_bounds(x: f32) {
        assert_eq!(grid().day_index_at(x), None);
    }

    // hour 10 + 37 minutes sits 4 * 64 + 39.47 px below a first_hour of 6.
    #[test]
    fn test_time_snaps_to_nearest_interval() {
        let grid = grid();
        let y = (10.0 - 6.0 + 37.0 / 60.0) * 64.0;
        assert_eq!(
            grid.time_at(y),
            NaiveTime::from_hms_opt(10, 30, 0),
            "minute 37 must snap to 30 with a 15-minute interval"
        );
    }

    #[test_case(0.0, 6, 0 ; "top of track is first hour")]
    #[test_case(64.0, 7, 0 ; "one hour down")]
    #[test_case(64.0 + 7.0, 7, 0 ; "under half a snap step rounds down")]
    #[test_case(64.0 + 9.0, 7, 15 ; "past half a snap step rounds up")]
    #[test_case(64.0 * 2.0 - 4.0, 8, 0 ; "minute sixty carries into next hour")]
    fn test_time_at(y: f32, hour: u32, minute: u32) {
        assert_eq!(
            grid().time_at(y),
            NaiveTime::from_hms_opt(hour, minute, 0)
        );
    }

    #[test]
    fn test_time_rejects_above_first_hour() {
        assert_eq!(grid().time_at(-40.0), None);
    }

    #[test]
    fn test_time_rejects_below_last_hour() {
        // hour 23 with a [6, 22] window
        let y = (23.0 - 6.0) * 64.0;
        assert_eq!(grid().time_at(y), None);
    }

    #[test]
    fn test_last_hour_is_inclusive() {
        let y = (22.0 - 6.0) * 64.0;
        assert_eq!(grid().time_at(y), NaiveTime::from_hms_opt(22, 0, 0));
    }

    #[test]
    fn test_slot_at_combines_axes() {
        let grid = grid();
        let pos = Pos2::new(250.0, (9.0 - 6.0) * 64.0);
        let (day, time) = grid.slot_at(pos).unwrap();
        assert_eq!(day, NaiveDate::from_ymd_opt(2025, 3, 12).unwrap());
        assert_eq!(time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());

        assert_eq!(grid.slot_at(Pos2::new(-5.0, 100.0)), None);
        assert_eq!(grid.slot_at(Pos2::new(250.0, -100.0)), None);
    }

    #[test]
    fn test_y_of_time_round_trip() {
        let grid = grid();
        let time = NaiveTime::from_hms_opt(13, 15, 0).unwrap();
        assert_eq!(grid.time_at(grid.y_of_time(time)), Some(time));
    }

    #[test]
    fn test_track_size() {
        let size = grid().track_size();
        assert_eq!(size.x, 700.0);
        assert_eq!(size.y, 17.0 * 64.0);
    }
}
