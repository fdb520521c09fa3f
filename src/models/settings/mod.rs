// Settings module
// View configuration for the timeline: visible hour window, snap
// granularity and grid geometry defaults.

use serde::{Deserialize, Serialize};

/// User-configurable timeline settings, persisted in the settings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSettings {
    /// First hour of the visible day window (top of the track).
    pub first_hour: u32,
    /// Last hour (inclusive) at which a dragged event may start.
    pub last_hour: u32,
    /// Snap granularity for drag-rescheduling, in minutes.
    pub snap_minutes: u32,
    /// Number of day columns shown at once.
    pub days_visible: u32,
    /// Pixel height of one hour on the track.
    pub hour_height: f32,
    pub theme: String,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            first_hour: 6,
            last_hour: 22,
            snap_minutes: 15,
            days_visible: 7,
            hour_height: 64.0,
            theme: "light".to_string(),
        }
    }
}

impl TimelineSettings {
    /// Validate the settings
    pub fn validate(&self) -> Result<(), String> {
        if self.first_hour >= self.last_hour {
            return Err("First visible hour must be before the last".to_string());
        }
        if self.last_hour > 23 {
            return Err("Last visible hour must be at most 23".to_string());
        }
        if self.snap_minutes == 0 || self.snap_minutes > 60 || 60 % self.snap_minutes != 0 {
            return Err("Snap interval must divide an hour".to_string());
        }
        if self.days_visible == 0 || self.days_visible > 14 {
            return Err("Between 1 and 14 day columns are supported".to_string());
        }
        if !self.hour_height.is_finite() || self.hour_height < 16.0 {
            return Err("Hour height must be at least 16 pixels".to_string());
        }
        Ok(())
    }

    /// Number of hours drawn on the track, including the last hour's row.
    pub fn visible_hours(&self) -> u32 {
        self.last_hour - self.first_hour + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = TimelineSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.first_hour, 6);
        assert_eq!(settings.last_hour, 22);
        assert_eq!(settings.snap_minutes, 15);
    }

    #[test]
    fn test_visible_hours() {
        let settings = TimelineSettings::default();
        assert_eq!(settings.visible_hours(), 17);
    }

    #[test]
    fn test_rejects_inverted_hour_window() {
        let settings = TimelineSettings {
            first_hour: 22,
            last_hour: 6,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_snap_not_dividing_hour() {
        let settings = TimelineSettings {
            snap_minutes: 7,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_day_columns() {
        let settings = TimelineSettings {
            days_visible: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
