//! Event block rendering for the week track.
//!
//! Draws a single event inside its layout slot: coloured background with a
//! darker accent bar, truncated title, and the time range when the block is
//! tall enough. Completed events are dimmed; the block being dragged is
//! ghosted at its original position while the preview follows the pointer.

use egui::{Color32, Pos2, Rect, Stroke, Vec2};

use crate::models::event::{Event, EventStatus};
use crate::ui::parse_color;

const FALLBACK_COLOR: Color32 = Color32::from_rgb(100, 150, 200);

/// Fill colour for an event block, dimmed when completed.
pub fn event_fill_color(event: &Event) -> Color32 {
    let base_color = event
        .color
        .as_deref()
        .and_then(parse_color)
        .unwrap_or(FALLBACK_COLOR);

    if event.status == EventStatus::Completed {
        Color32::from_rgba_unmultiplied(
            (base_color.r() as f32 * 0.4) as u8,
            (base_color.g() as f32 * 0.4) as u8,
            (base_color.b() as f32 * 0.4) as u8,
            140,
        )
    } else {
        base_color
    }
}

/// Render one event block.
pub fn render_event_block(ui: &mut egui::Ui, rect: Rect, event: &Event, is_drag_source: bool) {
    let mut event_color = event_fill_color(event);
    if is_drag_source {
        event_color = event_color.linear_multiply(0.35);
    }

    let block = rect.shrink2(Vec2::new(1.0, 1.0));
    ui.painter().rect_filled(block, 2.0, event_color);

    // Accent bar on the left edge
    let bar_rect = Rect::from_min_size(block.min, Vec2::new(3.0, block.height()));
    ui.painter()
        .rect_filled(bar_rect, 2.0, event_color.linear_multiply(0.7));

    let text_color = if event.status == EventStatus::Completed {
        Color32::from_rgba_unmultiplied(255, 255, 255, 180)
    } else {
        Color32::WHITE
    };

    let mut title_text = String::new();
    if event.location.as_ref().map(|l| !l.is_empty()).unwrap_or(false) {
        title_text.push_str("📍");
    }
    title_text.push_str(&event.title);

    // Use egui's layout system to properly truncate text
    let font_id = egui::FontId::proportional(11.0);
    let available_width = (block.width() - 10.0).max(0.0);
    let layout_job =
        egui::text::LayoutJob::simple(title_text, font_id, text_color, available_width);
    let galley = ui.fonts(|f| f.layout_job(layout_job));
    ui.painter().galley(
        Pos2::new(block.left() + 6.0, block.top() + 3.0),
        galley,
        text_color,
    );

    // Time range, only when the block is tall enough to fit a second line
    if block.height() > 30.0 {
        let time_str = format!(
            "{} - {}",
            event.start.format("%H:%M"),
            event.end.format("%H:%M")
        );
        ui.painter().text(
            Pos2::new(block.left() + 6.0, block.top() + 17.0),
            egui::Align2::LEFT_TOP,
            time_str,
            egui::FontId::proportional(9.0),
            text_color,
        );
    }
}

/// Outline the snapped drop target while a drag is in flight.
pub fn render_drop_preview(ui: &mut egui::Ui, rect: Rect, color: Color32) {
    let highlight = rect.shrink2(Vec2::new(2.0, 1.0));
    ui.painter().rect_filled(
        highlight,
        2.0,
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), 45),
    );
    ui.painter()
        .rect_stroke(highlight, 2.0, Stroke::new(1.5, color));
}
