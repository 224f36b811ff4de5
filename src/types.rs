//! Core types for the bubble canvas.
//!
//! Boxes live in image pixel space. Screen-space values only appear at the
//! input boundary and are converted through [`crate::viewport::Viewport`].

use serde::{Deserialize, Serialize};

/// A 2D point. Whether it is in screen or image space is given by context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Shorthand constructor for [`Point`]
#[inline]
pub fn point(x: f32, y: f32) -> Point {
    Point { x, y }
}

impl Point {
    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        point(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        point(self.x + rhs.x, self.y + rhs.y)
    }
}

// ============================================================================
// Bounding Box
// ============================================================================

/// Axis-aligned rectangle in image pixel space.
///
/// Committed boxes satisfy `x1 <= x2`, `y1 <= y2` and are at least the configured
/// minimum size on both axes. Transient boxes (mid-gesture) may be smaller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Box spanning two arbitrary corners, normalized so `x1 <= x2` and `y1 <= y2`
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x1: a.x.min(b.x),
            y1: a.y.min(b.y),
            x2: a.x.max(b.x),
            y2: a.y.max(b.y),
        }
    }

    /// Zero-size box at a point
    pub fn at_point(p: Point) -> Self {
        Self::new(p.x, p.y, p.x, p.y)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        (self.x1 + self.x2) / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        (self.y1 + self.y2) / 2.0
    }

    /// Returns a copy with `x1 <= x2` and `y1 <= y2`
    pub fn normalized(&self) -> Self {
        Self {
            x1: self.x1.min(self.x2),
            y1: self.y1.min(self.y2),
            x2: self.x1.max(self.x2),
            y2: self.y1.max(self.y2),
        }
    }

    pub fn is_normalized(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    /// True when the box is normalized and both sides reach `min_size`
    pub fn meets_min_size(&self, min_size: f32) -> bool {
        self.is_normalized() && self.width() >= min_size && self.height() >= min_size
    }

    /// Inclusive containment test
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x1 && p.x <= self.x2 && p.y >= self.y1 && p.y <= self.y2
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x1 + dx, self.y1 + dy, self.x2 + dx, self.y2 + dy)
    }

    /// Area of the intersection with `other`, zero when they only touch or are apart
    pub fn intersection_area(&self, other: &BoundingBox) -> f32 {
        let iw = self.x2.min(other.x2) - self.x1.max(other.x1);
        let ih = self.y2.min(other.y2) - self.y1.max(other.y1);
        if iw > 0.0 && ih > 0.0 { iw * ih } else { 0.0 }
    }

    /// Signed vertical overlap; negative when there is a gap
    pub fn vertical_overlap(&self, other: &BoundingBox) -> f32 {
        self.y2.min(other.y2) - self.y1.max(other.y1)
    }
}

/// Panel rectangle `[x1, y1, x2, y2]` from a panel-detection collaborator
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelRect(pub [f32; 4]);

impl PanelRect {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self([x1, y1, x2, y2])
    }

    pub fn to_box(self) -> BoundingBox {
        let [x1, y1, x2, y2] = self.0;
        BoundingBox::new(x1, y1, x2, y2)
    }
}

impl From<PanelRect> for BoundingBox {
    fn from(panel: PanelRect) -> Self {
        panel.to_box()
    }
}

// ============================================================================
// Detected Items
// ============================================================================

/// Text styling carried with a bubble for downstream typesetting
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProperties {
    pub font_family: String,
    pub font_size: f32,
    pub font_weight: String,
    pub font_style: String,
    pub text_decoration: String,
    pub color: String,
    pub stroke_color: String,
    pub stroke_width: f32,
}

impl Default for TextProperties {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 24.0,
            font_weight: "bold".to_string(),
            font_style: "normal".to_string(),
            text_decoration: "none".to_string(),
            color: "#000000".to_string(),
            stroke_color: "#FFFFFF".to_string(),
            stroke_width: 2.0,
        }
    }
}

/// A detected speech bubble.
///
/// `id` is the 1-based position in display order. It is reassigned whenever items
/// are removed or reordered, so it is not a stable identity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedItem {
    pub id: u32,
    #[serde(rename = "box")]
    pub bbox: BoundingBox,
    pub ocr_text: Option<String>,
    pub translation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_properties: Option<TextProperties>,
}

impl DetectedItem {
    pub fn new(id: u32, bbox: BoundingBox) -> Self {
        Self {
            id,
            bbox,
            ocr_text: None,
            translation: None,
            text_properties: Some(TextProperties::default()),
        }
    }
}
