//! Timeline UI: the eframe host, the week track, and the drag controller.

use chrono::{Datelike, Duration, NaiveDate};
use egui::Color32;

use crate::models::event::Event;

pub mod app;
pub mod drag;
pub mod event_dialog;
pub mod event_rendering;
pub mod geometry;
pub mod timeline_view;
pub mod toast;

pub use app::TimelineApp;

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn get_week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date - Duration::days(offset)
}

/// Parse a hex color string to Color32.
///
/// # Arguments
/// * `hex` - A hex color string, optionally prefixed with '#' (e.g., "#FF5500")
///
/// # Returns
/// * `Some(Color32)` if parsing succeeds
/// * `None` if the input is empty or invalid
pub fn parse_color(hex: &str) -> Option<Color32> {
    if hex.is_empty() {
        return None;
    }

    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Color32::from_rgb(r, g, b))
}

/// Generate a tooltip string for an event: title, time range and location.
pub fn format_event_tooltip(event: &Event) -> String {
    let mut lines = Vec::new();

    lines.push(format!("📌 {}", event.title));

    let start_str = event.start.format("%H:%M").to_string();
    let end_str = event.end.format("%H:%M").to_string();
    let date_str = event.start.format("%A, %B %d").to_string();
    lines.push(format!("🕐 {} - {} ({})", start_str, end_str, date_str));

    if let Some(ref location) = event.location {
        if !location.is_empty() {
            lines.push(format!("📍 {}", location));
        }
    }

    lines.push("\n💡 Click to edit, drag to reschedule".to_string());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_week_start_sunday() {
        // Wednesday, Mar 12, 2025
        let date = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        let start = get_week_start(date, 0);
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());
    }

    #[test]
    fn test_get_week_start_monday() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        let start = get_week_start(date, 1);
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
    }

    #[test]
    fn test_parse_color_with_hash() {
        let color = parse_color("#FF5500").unwrap();
        assert_eq!(color, Color32::from_rgb(255, 85, 0));
    }

    #[test]
    fn test_parse_color_without_hash() {
        let color = parse_color("00FF00").unwrap();
        assert_eq!(color, Color32::from_rgb(0, 255, 0));
    }

    #[test]
    fn test_parse_color_invalid() {
        assert!(parse_color("").is_none());
        assert!(parse_color("FF5").is_none());
        assert!(parse_color("GGGGGG").is_none());
    }
}
