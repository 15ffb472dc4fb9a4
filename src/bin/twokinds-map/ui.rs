//! UI rendering methods for the map viewer.

use crate::TwoKindsMapApp;
use crate::assets::AssetLoadState;
use crate::colors;
use crate::constants::{
    DOUBLE_CLICK_ZOOM, KEYBOARD_PAN, PANEL_MARGIN, PANEL_MIN_CONTENT_WIDTH, ZOOM_STEP,
};
use crate::coordinates::{image_rect, to_map_pixel};
use crate::overlays::{draw_hotspots, draw_labels};
use eframe::egui;
use twokinds_map::{Hit, PanelContent};

impl TwoKindsMapApp {
    /// Handles keyboard shortcuts for zooming and panning.
    pub fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        let Some(viewer) = &mut self.viewer else {
            return;
        };
        let map = viewer.map_mut();

        ctx.input(|i| {
            if i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals) {
                map.zoom_by(ZOOM_STEP, None);
            }
            if i.key_pressed(egui::Key::Minus) {
                map.zoom_by(-ZOOM_STEP, None);
            }
            if i.key_pressed(egui::Key::Num0) {
                map.reset_view();
            }
            if i.key_pressed(egui::Key::ArrowLeft) {
                map.pan_by([KEYBOARD_PAN, 0.0]);
            }
            if i.key_pressed(egui::Key::ArrowRight) {
                map.pan_by([-KEYBOARD_PAN, 0.0]);
            }
            if i.key_pressed(egui::Key::ArrowUp) {
                map.pan_by([0.0, KEYBOARD_PAN]);
            }
            if i.key_pressed(egui::Key::ArrowDown) {
                map.pan_by([0.0, -KEYBOARD_PAN]);
            }
        });
    }

    /// Renders the bottom status bar with controls hint, open chapter and zoom.
    pub fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Click: Open chapter | Scroll: Zoom | Drag: Pan | +/-: Zoom | 0: Reset");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let Some(viewer) = &self.viewer else {
                        return;
                    };
                    ui.label(format!("Zoom {:.1}", viewer.map().zoom()));
                    if let Some(panel) = viewer
                        .menu_opened()
                        .and_then(|id| viewer.panels().get(id).ok())
                    {
                        ui.separator();
                        ui.label(&panel.content().title);
                    }
                });
            });
        });
    }

    /// Renders the map surface and the side panel next to it.
    pub fn show_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let Some(viewer) = &mut self.viewer else {
                    ui.centered_and_justified(|ui| {
                        ui.label("No map content.\nCheck assets/map.ron.");
                    });
                    return;
                };

                let area = ui.max_rect();
                viewer.window_resized([f64::from(area.width()), f64::from(area.height())]);

                let map_width = viewer.map().width() as f32;
                let map_rect =
                    egui::Rect::from_min_size(area.min, egui::vec2(map_width, area.height()));
                let panel_rect =
                    egui::Rect::from_min_max(egui::pos2(map_rect.right(), area.top()), area.max);

                self.show_map(ui, map_rect);
                self.show_panel(ui, panel_rect);
            });
    }

    /// Renders the base image and overlays, and handles pointer input.
    fn show_map(&mut self, ui: &mut egui::Ui, map_rect: egui::Rect) {
        let Some(viewer) = &mut self.viewer else {
            return;
        };

        let response = ui.interact(
            map_rect,
            ui.id().with("map_surface"),
            egui::Sense::click_and_drag(),
        );
        let pointer = response
            .interact_pointer_pos()
            .or(response.hover_pos())
            .map(|pos| to_map_pixel(map_rect, pos));

        // Handle zoom
        let scroll_delta = ui.input(|i| i.raw_scroll_delta.y);
        if scroll_delta != 0.0 && response.hovered() {
            let levels = if scroll_delta > 0.0 {
                ZOOM_STEP
            } else {
                -ZOOM_STEP
            };
            viewer.map_mut().zoom_by(levels, pointer);
        }

        // Handle drag panning
        if response.dragged() {
            let delta = response.drag_delta();
            viewer
                .map_mut()
                .pan_by([f64::from(delta.x), f64::from(delta.y)]);
        }

        if response.double_clicked() {
            viewer.map_mut().zoom_by(DOUBLE_CLICK_ZOOM, pointer);
        } else if response.clicked()
            && let Some(pixel) = pointer
            && let Err(err) = viewer.click(pixel)
        {
            log::warn!("click ignored: {err}");
        }

        if let Some(pixel) = pointer
            && matches!(viewer.map().hit_test(pixel), Hit::Hotspot(_))
        {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        let painter = ui.painter_at(map_rect);
        let map = viewer.map();

        match (&self.image, &self.texture) {
            (AssetLoadState::Ready, Some(texture)) => {
                painter.image(
                    texture.id(),
                    image_rect(map, map_rect),
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            (AssetLoadState::Error(msg), _) => {
                painter.text(
                    map_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    format!("Failed to load map: {msg}"),
                    egui::FontId::proportional(16.0),
                    ui.visuals().error_fg_color,
                );
            }
            _ => {
                ui.put(
                    egui::Rect::from_center_size(map_rect.center(), egui::vec2(24.0, 24.0)),
                    egui::Spinner::new(),
                );
            }
        }

        draw_labels(&painter, map_rect, map);
        draw_hotspots(&painter, map_rect, map, viewer.menu_opened());
    }

    /// Renders the open (or animating) panel in the space it currently takes.
    fn show_panel(&mut self, ui: &mut egui::Ui, panel_rect: egui::Rect) {
        let Some(viewer) = &mut self.viewer else {
            return;
        };
        let Some(content) = active_content(viewer) else {
            return;
        };
        if panel_rect.width() <= 0.0 {
            return;
        }

        let painter = ui.painter_at(panel_rect);
        painter.rect_filled(panel_rect, 0.0, ui.visuals().panel_fill);
        painter.line_segment(
            [panel_rect.left_top(), panel_rect.left_bottom()],
            egui::Stroke::new(1.0, colors::PANEL_EDGE),
        );

        if panel_rect.width() < PANEL_MIN_CONTENT_WIDTH {
            return;
        }

        let mut close_clicked = false;
        let mut child = ui.new_child(
            egui::UiBuilder::new()
                .max_rect(panel_rect.shrink(PANEL_MARGIN))
                .layout(egui::Layout::top_down(egui::Align::Min)),
        );
        child.set_clip_rect(panel_rect);

        child.horizontal(|ui| {
            ui.heading(&content.title);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                close_clicked = ui.button("Close").clicked();
            });
        });
        child.separator();

        egui::ScrollArea::vertical()
            .id_salt(("panel", content.id.as_str()))
            .auto_shrink([false, false])
            .show(&mut child, |ui| {
                for paragraph in &content.body {
                    ui.label(paragraph);
                    ui.add_space(6.0);
                }
            });

        if close_clicked && let Err(err) = viewer.close() {
            log::warn!("close ignored: {err}");
        }
    }
}

/// Content of the panel beside the map, if it takes any space.
fn active_content(viewer: &twokinds_map::Viewer) -> Option<PanelContent> {
    let (panel_id, width) = viewer.active_panel()?;
    if width <= 0.0 {
        return None;
    }
    let panel = viewer.panels().get(panel_id).ok()?;
    Some(panel.content().clone())
}
