//! Keeps the visible map region steady while the side panel changes width.

use crate::extent::ViewExtent;
use crate::map_view::MapView;

/// Applies panel widths and window sizes to the map surface.
///
/// Holds only the window size; extents are always derived from the live
/// view of the [`MapView`] passed in.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportSync {
    window_size: [f64; 2],
}

impl ViewportSync {
    pub fn window_size(&self) -> [f64; 2] {
        self.window_size
    }

    /// Extent to show once the panel has grown by `pixel_delta` pixels
    /// (negative when it shrinks), keeping the left edge of the view fixed.
    ///
    /// Computed from the live view on every call: successive animation ticks
    /// compound on each other.
    pub fn extent_for_width_delta(map: &MapView, pixel_delta: f64) -> ViewExtent {
        scaled_extent(&map.calculate_extent(), map.width(), pixel_delta)
    }

    /// Shrinks or grows the map to the space left by a panel of
    /// `panel_width` pixels, then fits `target`.
    pub fn notify_panel_width_changed(
        &self,
        map: &mut MapView,
        panel_width: f64,
        target: &ViewExtent,
    ) {
        map.resize(map_width(self.window_size[0], panel_width));
        map.set_viewport_extent(target);
    }

    /// Records a new window size and lays the map out beside a panel that is
    /// currently `panel_width` pixels wide, keeping the visible region.
    ///
    /// Runs independently of any panel animation in flight.
    pub fn notify_window_resized(
        &mut self,
        map: &mut MapView,
        window_size: [f64; 2],
        panel_width: f64,
    ) {
        self.window_size = window_size;

        let had_size = map.size().iter().all(|&d| d > 0.0);
        let visible = map.calculate_extent();

        map.set_size([map_width(window_size[0], panel_width), window_size[1]]);

        if had_size {
            map.set_viewport_extent(&visible);
        }
        log::debug!(
            "window resized to {:.0}x{:.0}, map width {:.0}",
            window_size[0],
            window_size[1],
            map.width()
        );
    }
}

/// Scales `extent` for a map `map_width` pixels wide losing `pixel_delta`
/// pixels to the panel.
pub fn scaled_extent(extent: &ViewExtent, map_width: f64, pixel_delta: f64) -> ViewExtent {
    if map_width <= 0.0 {
        return *extent;
    }
    extent.scale_width_from_left(1.0 - pixel_delta / map_width)
}

fn map_width(window_width: f64, panel_width: f64) -> f64 {
    (window_width - panel_width).max(0.0)
}
