pub mod error;
pub mod extent;
pub mod map_view;
pub mod panel;
pub mod viewer;
pub mod viewport_sync;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub use error::{Result, ViewerError};
pub use extent::ViewExtent;
pub use map_view::{Hit, MapView};
pub use panel::{PanelController, PanelState, Panels};
pub use viewer::Viewer;
pub use viewport_sync::ViewportSync;

/// Everything the viewer shows: the base image, its hotspots and the
/// chapter panels they open.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapContent {
    /// Window title
    pub title: String,
    /// Path of the base image inside the embedded assets
    pub image_path: String,
    /// Image extent in projection units [minX, minY, maxX, maxY]
    pub extent: ViewExtent,
    /// Maximum zoom level
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f64,
    /// Clickable points, in drawing order
    pub hotspots: Vec<Hotspot>,
    /// Side panels referenced by the hotspots
    pub panels: Vec<PanelContent>,
    /// Decorative labels drawn on their own layer
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<Label>,
}

fn default_max_zoom() -> f64 {
    map_view::DEFAULT_MAX_ZOOM
}

/// A clickable point on the map opening one panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    /// Position in projection units (y grows upwards)
    pub x: f64,
    pub y: f64,
    /// Id of the panel this hotspot opens
    pub panel_id: String,
}

/// Content of a side panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelContent {
    /// Unique panel id referenced by hotspots
    pub id: String,
    /// Heading shown at the top of the panel
    pub title: String,
    /// Width of the panel when open, in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_width: Option<f64>,
    /// Paragraphs of body text
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body: Vec<String>,
}

/// A text label on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    /// Position [x, y] in projection units
    pub position: [f64; 2],
    /// Label text
    pub text: String,
    /// Font size in screen pixels
    #[serde(default = "default_label_size")]
    pub size: f64,
}

fn default_label_size() -> f64 {
    14.0
}

/// A problem found in a [`MapContent`].
#[derive(Debug, Clone, PartialEq)]
pub enum ContentIssue {
    InvalidExtent(ViewExtent),
    InvalidMaxZoom(f64),
    DuplicatePanel(String),
    InvalidPanelWidth(ViewerError),
    UnknownPanel { hotspot: usize, panel_id: String },
    HotspotOutsideExtent { hotspot: usize, position: [f64; 2] },
}

impl ContentIssue {
    /// Whether the map itself cannot be shown. Other issues only affect
    /// single hotspots or panels.
    pub fn blocks_viewer(&self) -> bool {
        matches!(self, Self::InvalidExtent(_) | Self::InvalidMaxZoom(_))
    }
}

impl fmt::Display for ContentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidExtent(extent) => write!(f, "invalid image extent {extent:?}"),
            Self::InvalidMaxZoom(zoom) => write!(f, "max zoom must be positive, got {zoom}"),
            Self::DuplicatePanel(id) => write!(f, "panel '{id}' is declared more than once"),
            Self::InvalidPanelWidth(err) => write!(f, "{err}"),
            Self::UnknownPanel { hotspot, panel_id } => {
                write!(f, "hotspot #{hotspot} opens unknown panel '{panel_id}'")
            }
            Self::HotspotOutsideExtent { hotspot, position } => write!(
                f,
                "hotspot #{hotspot} at [{}, {}] lies outside the image",
                position[0], position[1]
            ),
        }
    }
}

impl MapContent {
    /// Parses content from RON.
    pub fn from_ron(source: &str) -> std::result::Result<Self, ron::de::SpannedError> {
        ron::from_str(source)
    }

    /// Lists every problem that would make a click fail or a hotspot
    /// unreachable. An empty list means the content is usable as is.
    pub fn validate(&self) -> Vec<ContentIssue> {
        let mut issues = Vec::new();

        if !self.extent.is_valid() {
            issues.push(ContentIssue::InvalidExtent(self.extent));
        }
        if !(self.max_zoom.is_finite() && self.max_zoom > 0.0) {
            issues.push(ContentIssue::InvalidMaxZoom(self.max_zoom));
        }

        let mut seen = HashSet::new();
        for panel in &self.panels {
            if !seen.insert(panel.id.as_str()) {
                issues.push(ContentIssue::DuplicatePanel(panel.id.clone()));
            }
        }

        let panels = Panels::new(&self.panels);
        for panel in panels.iter() {
            if let Err(err) = panel.open_width() {
                issues.push(ContentIssue::InvalidPanelWidth(err));
            }
        }

        for (index, hotspot) in self.hotspots.iter().enumerate() {
            if !seen.contains(hotspot.panel_id.as_str()) {
                issues.push(ContentIssue::UnknownPanel {
                    hotspot: index,
                    panel_id: hotspot.panel_id.clone(),
                });
            }
            if !self.extent.contains([hotspot.x, hotspot.y]) {
                issues.push(ContentIssue::HotspotOutsideExtent {
                    hotspot: index,
                    position: [hotspot.x, hotspot.y],
                });
            }
        }

        issues
    }
}
