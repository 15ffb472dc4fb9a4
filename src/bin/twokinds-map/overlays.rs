//! Drawing functions for the hotspot and label layers.

use crate::colors;
use crate::coordinates::coordinate_to_screen;
use eframe::egui;
use twokinds_map::MapView;

/// Draws every hotspot marker. Markers opening `active_panel` are
/// highlighted.
pub fn draw_hotspots(
    painter: &egui::Painter,
    map_rect: egui::Rect,
    map: &MapView,
    active_panel: Option<&str>,
) {
    let radius = map.marker_radius_px() as f32;

    for hotspot in map.hotspots() {
        let pos = coordinate_to_screen(map, map_rect, [hotspot.x, hotspot.y]);

        if !map_rect.expand(radius).contains(pos) {
            continue;
        }

        let (fill, stroke) = if active_panel == Some(hotspot.panel_id.as_str()) {
            (colors::HOTSPOT_ACTIVE_FILL, colors::HOTSPOT_ACTIVE_STROKE)
        } else {
            (colors::HOTSPOT_FILL, colors::HOTSPOT_STROKE)
        };

        painter.circle(pos, radius, fill, egui::Stroke::new(1.25, stroke));
    }
}

/// Draws label overlays on the map.
pub fn draw_labels(painter: &egui::Painter, map_rect: egui::Rect, map: &MapView) {
    for label in map.labels() {
        let pos = coordinate_to_screen(map, map_rect, label.position);

        if !map_rect.expand(50.0).contains(pos) {
            continue;
        }

        let font_id = egui::FontId::proportional(label.size as f32);

        // Shadow
        painter.text(
            pos + egui::vec2(1.0, 1.0),
            egui::Align2::CENTER_CENTER,
            &label.text,
            font_id.clone(),
            colors::LABEL_SHADOW,
        );

        // Main text
        painter.text(
            pos,
            egui::Align2::CENTER_CENTER,
            &label.text,
            font_id,
            colors::LABEL_TEXT,
        );
    }
}
