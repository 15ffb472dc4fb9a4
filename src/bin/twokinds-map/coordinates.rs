//! Conversions between egui screen positions and map surface pixels.

use eframe::egui;
use twokinds_map::MapView;

/// Screen position of a map surface pixel.
pub fn to_screen(map_rect: egui::Rect, pixel: [f64; 2]) -> egui::Pos2 {
    map_rect.min + egui::vec2(pixel[0] as f32, pixel[1] as f32)
}

/// Map surface pixel under a screen position.
pub fn to_map_pixel(map_rect: egui::Rect, pos: egui::Pos2) -> [f64; 2] {
    let offset = pos - map_rect.min;
    [f64::from(offset.x), f64::from(offset.y)]
}

/// Screen position of a point in projection units.
pub fn coordinate_to_screen(map: &MapView, map_rect: egui::Rect, coord: [f64; 2]) -> egui::Pos2 {
    to_screen(map_rect, map.coordinate_to_pixel(coord))
}

/// Screen rectangle covered by the whole image.
///
/// The projection's `y` axis points up, so the top of the image is `max_y`.
pub fn image_rect(map: &MapView, map_rect: egui::Rect) -> egui::Rect {
    let extent = map.extent();
    egui::Rect::from_min_max(
        coordinate_to_screen(map, map_rect, [extent.min_x, extent.max_y]),
        coordinate_to_screen(map, map_rect, [extent.max_x, extent.min_y]),
    )
}
