//! Color constants for map overlays and the side panel.

use eframe::egui::Color32;

// Hotspot markers
pub const HOTSPOT_FILL: Color32 = Color32::from_rgba_premultiplied(102, 102, 102, 102);
pub const HOTSPOT_STROKE: Color32 = Color32::from_rgb(51, 153, 204);
pub const HOTSPOT_ACTIVE_FILL: Color32 = Color32::from_rgb(255, 196, 0);
pub const HOTSPOT_ACTIVE_STROKE: Color32 = Color32::from_rgb(139, 69, 19);

// Text colors
pub const LABEL_TEXT: Color32 = Color32::from_rgba_premultiplied(255, 255, 255, 220);
pub const LABEL_SHADOW: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 180);

// Side panel
pub const PANEL_EDGE: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 90);
