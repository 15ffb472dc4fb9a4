//! Pixel-projection map view: view state, fitting, resizing and hit testing.
//!
//! Coordinates follow the image projection: `x` grows to the right and `y`
//! grows upwards from the bottom-left corner of the image. Screen pixels are
//! relative to the top-left corner of the map surface, `y` growing downwards.

use crate::extent::ViewExtent;
use crate::{Hotspot, Label};

/// Radius of a hotspot marker in projection units.
pub const HOTSPOT_RADIUS: f64 = 2.0;

/// Markers never shrink below this on-screen radius, so they stay clickable
/// when zoomed out.
pub const MIN_MARKER_RADIUS_PX: f64 = 4.0;

/// Maximum zoom level when the content does not override it.
pub const DEFAULT_MAX_ZOOM: f64 = 10.0;

/// Zoom level the view starts at.
pub const INITIAL_ZOOM: f64 = 1.0;

const MIN_ZOOM: f64 = 0.0;

/// Zoom 0 shows the longest side of the extent across this many pixels.
const DEFAULT_TILE_SIZE: f64 = 256.0;

/// Approximate glyph advance relative to the font size, used to hit test labels.
const LABEL_CHAR_WIDTH: f64 = 0.55;

/// Result of a hit test on the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit<'a> {
    /// A hotspot marker was hit; carries its panel id.
    Hotspot(&'a str),
    /// A feature was hit, but it does not belong to the hotspot layer.
    Other,
    /// No feature under the pointer.
    Empty,
}

/// The map surface: projection extent, current view and overlay layers.
#[derive(Debug, Clone)]
pub struct MapView {
    extent: ViewExtent,
    max_resolution: f64,
    max_zoom: f64,
    center: [f64; 2],
    resolution: f64,
    size: [f64; 2],
    hotspots: Vec<Hotspot>,
    labels: Vec<Label>,
}

impl MapView {
    /// Creates a view over `extent`, centered on it at [`INITIAL_ZOOM`].
    ///
    /// The surface has no size until [`MapView::set_size`] or
    /// [`MapView::resize`] is called. A non-finite `max_zoom` falls back to
    /// [`DEFAULT_MAX_ZOOM`]; a negative one is raised to the minimum zoom.
    pub fn new(extent: ViewExtent, max_zoom: f64) -> Self {
        let max_zoom = if max_zoom.is_finite() {
            max_zoom.max(MIN_ZOOM)
        } else {
            DEFAULT_MAX_ZOOM
        };
        let max_resolution = extent.width().max(extent.height()) / DEFAULT_TILE_SIZE;
        Self {
            extent,
            max_resolution,
            max_zoom,
            center: extent.center(),
            resolution: max_resolution / 2f64.powf(INITIAL_ZOOM),
            size: [0.0, 0.0],
            hotspots: Vec::new(),
            labels: Vec::new(),
        }
    }

    pub fn extent(&self) -> ViewExtent {
        self.extent
    }

    pub fn size(&self) -> [f64; 2] {
        self.size
    }

    pub fn width(&self) -> f64 {
        self.size[0]
    }

    pub fn center(&self) -> [f64; 2] {
        self.center
    }

    /// Projection units per screen pixel.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn zoom(&self) -> f64 {
        MIN_ZOOM + (self.max_resolution / self.resolution).log2()
    }

    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    pub fn hotspots(&self) -> &[Hotspot] {
        &self.hotspots
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Adds hotspot markers on top of the existing ones.
    pub fn add_hotspots(&mut self, hotspots: &[Hotspot]) {
        self.hotspots.extend_from_slice(hotspots);
    }

    pub fn add_labels(&mut self, labels: &[Label]) {
        self.labels.extend_from_slice(labels);
    }

    /// Sets both surface dimensions in pixels.
    pub fn set_size(&mut self, size: [f64; 2]) {
        self.size = [size[0].max(0.0), size[1].max(0.0)];
        self.constrain();
    }

    /// Sets the surface width in pixels, keeping the height.
    ///
    /// Must happen before [`MapView::set_viewport_extent`] whenever the width
    /// changed, as fitting depends on the current size.
    pub fn resize(&mut self, pixel_width: f64) {
        self.set_size([pixel_width, self.size[1]]);
    }

    /// The region of projection space currently visible.
    pub fn calculate_extent(&self) -> ViewExtent {
        let half_w = self.resolution * self.size[0] / 2.0;
        let half_h = self.resolution * self.size[1] / 2.0;
        ViewExtent::new(
            self.center[0] - half_w,
            self.center[1] - half_h,
            self.center[0] + half_w,
            self.center[1] + half_h,
        )
    }

    /// Fits the view to `target` immediately, without easing.
    pub fn set_viewport_extent(&mut self, target: &ViewExtent) {
        if self.size[0] <= 0.0 || self.size[1] <= 0.0 {
            self.center = target.center();
            self.constrain();
            return;
        }
        self.resolution = (target.width() / self.size[0]).max(target.height() / self.size[1]);
        self.center = target.center();
        self.constrain();
    }

    /// Returns the view to its initial center and zoom.
    pub fn reset_view(&mut self) {
        self.center = self.extent.center();
        self.resolution = self.max_resolution / 2f64.powf(INITIAL_ZOOM);
        self.constrain();
    }

    /// Moves the view so that content follows a pointer drag of `delta` pixels.
    pub fn pan_by(&mut self, delta: [f64; 2]) {
        self.center[0] -= delta[0] * self.resolution;
        self.center[1] += delta[1] * self.resolution;
        self.constrain();
    }

    /// Zooms by `levels` (positive zooms in), keeping the coordinate under
    /// `anchor` at the same screen pixel. Without an anchor, zooms about the
    /// center of the surface.
    pub fn zoom_by(&mut self, levels: f64, anchor: Option<[f64; 2]>) {
        let anchor_coord = anchor.map(|pixel| (pixel, self.pixel_to_coordinate(pixel)));

        self.resolution /= 2f64.powf(levels);
        self.constrain_resolution();

        if let Some((pixel, coord)) = anchor_coord {
            self.center = [
                coord[0] - (pixel[0] - self.size[0] / 2.0) * self.resolution,
                coord[1] + (pixel[1] - self.size[1] / 2.0) * self.resolution,
            ];
        }
        self.constrain_center();
    }

    pub fn coordinate_to_pixel(&self, coord: [f64; 2]) -> [f64; 2] {
        [
            (coord[0] - self.center[0]) / self.resolution + self.size[0] / 2.0,
            (self.center[1] - coord[1]) / self.resolution + self.size[1] / 2.0,
        ]
    }

    pub fn pixel_to_coordinate(&self, pixel: [f64; 2]) -> [f64; 2] {
        [
            self.center[0] + (pixel[0] - self.size[0] / 2.0) * self.resolution,
            self.center[1] - (pixel[1] - self.size[1] / 2.0) * self.resolution,
        ]
    }

    /// On-screen radius of a hotspot marker at the current resolution.
    pub fn marker_radius_px(&self) -> f64 {
        (HOTSPOT_RADIUS / self.resolution).max(MIN_MARKER_RADIUS_PX)
    }

    /// Finds what lies under a screen pixel.
    ///
    /// Hotspots are tested top-most first (the last one added wins). Labels
    /// only matter when no hotspot is hit. The base image never counts as a
    /// feature.
    pub fn hit_test(&self, pixel: [f64; 2]) -> Hit<'_> {
        let radius = self.marker_radius_px();
        let hotspot = self.hotspots.iter().rev().find(|hotspot| {
            let [x, y] = self.coordinate_to_pixel([hotspot.x, hotspot.y]);
            (x - pixel[0]).hypot(y - pixel[1]) <= radius
        });
        if let Some(hotspot) = hotspot {
            return Hit::Hotspot(&hotspot.panel_id);
        }

        let label_hit = self.labels.iter().any(|label| {
            let [x, y] = self.coordinate_to_pixel(label.position);
            let half_w = label.text.chars().count() as f64 * label.size * LABEL_CHAR_WIDTH / 2.0;
            let half_h = label.size / 2.0;
            (x - pixel[0]).abs() <= half_w && (y - pixel[1]).abs() <= half_h
        });
        if label_hit { Hit::Other } else { Hit::Empty }
    }

    fn constrain(&mut self) {
        self.constrain_resolution();
        self.constrain_center();
    }

    /// Clamps to the zoom range, then caps the resolution so the view never
    /// shows space outside the extent.
    fn constrain_resolution(&mut self) {
        let min_resolution = self.max_resolution / 2f64.powf(self.max_zoom - MIN_ZOOM);
        let mut resolution = self.resolution.clamp(min_resolution, self.max_resolution);

        if self.size[0] > 0.0 && self.size[1] > 0.0 {
            let x_resolution = self.extent.width() / self.size[0];
            let y_resolution = self.extent.height() / self.size[1];
            resolution = resolution.min(x_resolution.min(y_resolution));
        }

        self.resolution = resolution;
    }

    fn constrain_center(&mut self) {
        let extent = self.extent;
        let half_w = self.resolution * self.size[0] / 2.0;
        let half_h = self.resolution * self.size[1] / 2.0;
        let [cx, cy] = extent.center();

        self.center[0] = if extent.width() <= half_w * 2.0 {
            cx
        } else {
            self.center[0].clamp(extent.min_x + half_w, extent.max_x - half_w)
        };
        self.center[1] = if extent.height() <= half_h * 2.0 {
            cy
        } else {
            self.center[1].clamp(extent.min_y + half_h, extent.max_y - half_h)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn world() -> MapView {
        let mut map = MapView::new(ViewExtent::new(0.0, 0.0, 800.0, 950.0), DEFAULT_MAX_ZOOM);
        map.set_size([1000.0, 700.0]);
        map
    }

    fn hotspot(x: f64, y: f64, panel_id: &str) -> Hotspot {
        Hotspot {
            x,
            y,
            panel_id: panel_id.to_owned(),
        }
    }

    #[test]
    fn starts_centered() {
        let map = MapView::new(ViewExtent::new(0.0, 0.0, 800.0, 950.0), DEFAULT_MAX_ZOOM);
        assert_eq!(map.center(), [400.0, 475.0]);
        assert!((map.zoom() - INITIAL_ZOOM).abs() < EPSILON);
    }

    #[test]
    fn resolution_is_capped_to_extent() {
        let map = world();
        // 800 / 1000 is tighter than 950 / 700.
        assert!((map.resolution() - 0.8).abs() < EPSILON);
        let visible = map.calculate_extent();
        assert!(visible.min_x >= -EPSILON && visible.max_x <= 800.0 + EPSILON);
        assert!(visible.min_y >= -EPSILON && visible.max_y <= 950.0 + EPSILON);
    }

    #[test]
    fn zoom_never_exceeds_max() {
        let mut map = world();
        map.zoom_by(50.0, None);
        assert!((map.zoom() - DEFAULT_MAX_ZOOM).abs() < 1e-6);
    }

    #[test]
    fn pixel_coordinate_conversion_is_consistent() {
        let mut map = world();
        map.zoom_by(2.0, None);
        let coord = [412.0, 233.5];
        let pixel = map.coordinate_to_pixel(coord);
        let back = map.pixel_to_coordinate(pixel);
        assert!((back[0] - coord[0]).abs() < EPSILON);
        assert!((back[1] - coord[1]).abs() < EPSILON);
    }

    #[test]
    fn y_axis_points_up() {
        let map = world();
        let top = map.pixel_to_coordinate([500.0, 0.0]);
        let bottom = map.pixel_to_coordinate([500.0, 700.0]);
        assert!(top[1] > bottom[1]);
    }

    #[test]
    fn fit_keeps_left_edge_when_narrowed() {
        let mut map = world();
        map.zoom_by(1.0, None);
        let before = map.calculate_extent();
        let narrowed = before.scale_width_from_left(0.7);
        map.resize(700.0);
        map.set_viewport_extent(&narrowed);
        let after = map.calculate_extent();
        assert!(after.max_edge_difference(&narrowed) < 1e-6);
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let mut map = world();
        map.zoom_by(2.0, None);
        let anchor = [300.0, 200.0];
        let coord = map.pixel_to_coordinate(anchor);
        map.zoom_by(1.0, Some(anchor));
        let moved = map.coordinate_to_pixel(coord);
        assert!((moved[0] - anchor[0]).abs() < 1e-6);
        assert!((moved[1] - anchor[1]).abs() < 1e-6);
    }

    #[test]
    fn pan_is_clamped_to_extent() {
        let mut map = world();
        map.zoom_by(2.0, None);
        map.pan_by([1.0e6, -1.0e6]);
        let visible = map.calculate_extent();
        assert!((visible.min_x - 0.0).abs() < 1e-6);
        assert!((visible.min_y - 0.0).abs() < 1e-6);
    }

    #[test]
    fn reset_restores_initial_view() {
        let mut map = world();
        let initial = map.calculate_extent();
        map.zoom_by(3.0, Some([10.0, 10.0]));
        map.reset_view();
        assert!(map.calculate_extent().max_edge_difference(&initial) < EPSILON);
    }

    #[test]
    fn hit_test_finds_hotspot() {
        let mut map = world();
        map.add_hotspots(&[hotspot(392.5, 442.5, "ch1"), hotspot(375.4, 474.5, "ch2")]);
        let pixel = map.coordinate_to_pixel([392.5, 442.5]);
        assert_eq!(map.hit_test(pixel), Hit::Hotspot("ch1"));
        let near = [pixel[0] + MIN_MARKER_RADIUS_PX - 0.5, pixel[1]];
        assert_eq!(map.hit_test(near), Hit::Hotspot("ch1"));
        assert_eq!(map.hit_test([5.0, 5.0]), Hit::Empty);
    }

    #[test]
    fn hit_test_prefers_topmost_hotspot() {
        let mut map = world();
        map.add_hotspots(&[hotspot(400.0, 400.0, "below"), hotspot(400.5, 400.0, "above")]);
        let pixel = map.coordinate_to_pixel([400.0, 400.0]);
        assert_eq!(map.hit_test(pixel), Hit::Hotspot("above"));
    }

    #[test]
    fn labels_are_features_but_not_hotspots() {
        let mut map = world();
        map.add_labels(&[Label {
            position: [200.0, 800.0],
            text: "Northern Reach".to_owned(),
            size: 14.0,
        }]);
        let pixel = map.coordinate_to_pixel([200.0, 800.0]);
        assert_eq!(map.hit_test(pixel), Hit::Other);

        map.add_hotspots(&[hotspot(200.0, 800.0, "ch9")]);
        assert_eq!(map.hit_test(pixel), Hit::Hotspot("ch9"));
    }

    #[test]
    fn marker_radius_grows_with_zoom() {
        let mut map = world();
        assert_eq!(map.marker_radius_px(), MIN_MARKER_RADIUS_PX);
        map.zoom_by(DEFAULT_MAX_ZOOM, None);
        assert!(map.marker_radius_px() > MIN_MARKER_RADIUS_PX);
    }

    #[test]
    fn negative_max_zoom_is_raised_to_min_zoom() {
        let mut map = MapView::new(ViewExtent::new(0.0, 0.0, 800.0, 950.0), -1.0);
        assert_eq!(map.max_zoom(), MIN_ZOOM);

        // Zooming in is pinned to zoom 0, leaving only the cap to the extent width.
        map.set_size([1000.0, 700.0]);
        map.zoom_by(3.0, None);
        assert!((map.resolution() - 800.0 / 1000.0).abs() < EPSILON);
    }

    #[test]
    fn non_finite_max_zoom_falls_back_to_default() {
        for max_zoom in [f64::NAN, f64::INFINITY] {
            let mut map = MapView::new(ViewExtent::new(0.0, 0.0, 800.0, 950.0), max_zoom);
            assert_eq!(map.max_zoom(), DEFAULT_MAX_ZOOM);

            map.set_size([1000.0, 700.0]);
            map.zoom_by(DEFAULT_MAX_ZOOM * 2.0, None);
            assert!((map.zoom() - DEFAULT_MAX_ZOOM).abs() < EPSILON);
        }
    }
}
