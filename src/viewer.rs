//! The viewing session: one map, its panels and the controller between them.

use log::{debug, info};

use crate::MapContent;
use crate::error::Result;
use crate::map_view::{Hit, MapView};
use crate::panel::{PanelController, PanelState, Panels};
use crate::viewport_sync::ViewportSync;

/// Owns every piece of mutable state for the lifetime of the window.
#[derive(Debug, Clone)]
pub struct Viewer {
    map: MapView,
    panels: Panels,
    controller: PanelController,
    sync: ViewportSync,
}

impl Viewer {
    pub fn new(content: &MapContent) -> Self {
        let mut map = MapView::new(content.extent, content.max_zoom);
        map.add_hotspots(&content.hotspots);
        map.add_labels(&content.labels);

        info!(
            "viewer ready: {} hotspots, {} panels",
            content.hotspots.len(),
            content.panels.len()
        );

        Self {
            map,
            panels: Panels::new(&content.panels),
            controller: PanelController::new(),
            sync: ViewportSync::default(),
        }
    }

    pub fn map(&self) -> &MapView {
        &self.map
    }

    /// Direct access for pan and zoom interactions.
    pub fn map_mut(&mut self) -> &mut MapView {
        &mut self.map
    }

    pub fn panels(&self) -> &Panels {
        &self.panels
    }

    pub fn state(&self) -> PanelState {
        self.controller.state()
    }

    pub fn menu_opened(&self) -> Option<&str> {
        self.controller.menu_opened()
    }

    pub fn is_animating(&self) -> bool {
        self.controller.is_animating()
    }

    /// The panel beside the map and its current width, if any.
    pub fn active_panel(&self) -> Option<(&str, f64)> {
        let id = self.controller.active_panel()?;
        let width = self.panels.current_width(id).ok()?;
        Some((id, width))
    }

    pub fn window_size(&self) -> [f64; 2] {
        self.sync.window_size()
    }

    /// Handles a click at `pixel` on the map surface.
    ///
    /// Returns whether an animation started. Errors leave every piece of
    /// state as it was.
    pub fn click(&mut self, pixel: [f64; 2]) -> Result<bool> {
        match self.map.hit_test(pixel) {
            Hit::Hotspot(panel_id) => {
                let panel_id = panel_id.to_owned();
                self.activate(&panel_id)
            }
            Hit::Other => Ok(false),
            Hit::Empty => self.close(),
        }
    }

    /// Toggles panel `panel_id`: closes it when open, otherwise opens it in
    /// place of whatever panel is open.
    pub fn activate(&mut self, panel_id: &str) -> Result<bool> {
        if self.controller.menu_opened() == Some(panel_id) {
            return self.close();
        }
        let open_width = self.panels.open_width(panel_id)?;
        self.controller.open(panel_id, open_width, &self.panels, &self.map)
    }

    /// Closes the open panel, if any.
    pub fn close(&mut self) -> Result<bool> {
        self.controller.close(&self.panels, &self.map)
    }

    /// Advances the panel animation by one frame. Returns whether another
    /// frame is needed.
    pub fn tick(&mut self) -> bool {
        self.controller.tick(&mut self.panels, &mut self.map, &self.sync)
    }

    /// Lays the map out for a new window size beside the panel's current
    /// width, even mid-animation.
    pub fn window_resized(&mut self, window_size: [f64; 2]) {
        if self.sync.window_size() == window_size {
            return;
        }
        let panel_width = self.controller.active_width(&self.panels);
        debug!("resizing with panel at {panel_width}px");
        self.sync.notify_window_resized(&mut self.map, window_size, panel_width);
    }
}
