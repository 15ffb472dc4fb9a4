use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in projection units.
///
/// Serialized as `[min_x, min_y, max_x, max_y]`, the same order the content
/// file uses for the image extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct ViewExtent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl ViewExtent {
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> [f64; 2] {
        [
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        ]
    }

    /// Whether `point` lies inside the extent (edges included).
    pub fn contains(&self, point: [f64; 2]) -> bool {
        point[0] >= self.min_x
            && point[0] <= self.max_x
            && point[1] >= self.min_y
            && point[1] <= self.max_y
    }

    /// True when both dimensions are positive and every edge is finite.
    pub fn is_valid(&self) -> bool {
        [self.min_x, self.min_y, self.max_x, self.max_y]
            .iter()
            .all(|v| v.is_finite())
            && self.width() > 0.0
            && self.height() > 0.0
    }

    /// Returns a copy whose width is multiplied by `factor`, keeping the left
    /// edge where it is. The vertical range is untouched.
    pub fn scale_width_from_left(&self, factor: f64) -> Self {
        Self {
            max_x: self.width() * factor + self.min_x,
            ..*self
        }
    }

    /// Largest absolute difference between matching edges.
    pub fn max_edge_difference(&self, other: &Self) -> f64 {
        [
            self.min_x - other.min_x,
            self.min_y - other.min_y,
            self.max_x - other.max_x,
            self.max_y - other.max_y,
        ]
        .iter()
        .fold(0.0_f64, |acc, d| acc.max(d.abs()))
    }
}

impl From<[f64; 4]> for ViewExtent {
    fn from([min_x, min_y, max_x, max_y]: [f64; 4]) -> Self {
        Self::new(min_x, min_y, max_x, max_y)
    }
}

impl From<ViewExtent> for [f64; 4] {
    fn from(extent: ViewExtent) -> Self {
        [extent.min_x, extent.min_y, extent.max_x, extent.max_y]
    }
}
