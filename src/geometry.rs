//! Box geometry - handle hit testing, resize, move, and draw construction.
//!
//! Everything here is a pure function over image-space values. Screen-space
//! constants enter only through the `scale` argument of [`hit_tolerance`].

use crate::types::{BoundingBox, Point, point};

/// One of the eight resize handles on a selected box
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
}

/// Which box edges a handle drags
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edges {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl Edges {
    const fn new(left: bool, right: bool, top: bool, bottom: bool) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }
}

/// Handle-to-edges lookup table, corners first
const HANDLE_EDGES: [(Handle, Edges); 8] = [
    (Handle::TopLeft, Edges::new(true, false, true, false)),
    (Handle::TopRight, Edges::new(false, true, true, false)),
    (Handle::BottomLeft, Edges::new(true, false, false, true)),
    (Handle::BottomRight, Edges::new(false, true, false, true)),
    (Handle::Top, Edges::new(false, false, true, false)),
    (Handle::Bottom, Edges::new(false, false, false, true)),
    (Handle::Left, Edges::new(true, false, false, false)),
    (Handle::Right, Edges::new(false, true, false, false)),
];

/// Mouse cursor shown for a position on the canvas
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorStyle {
    Grab,
    Grabbing,
    Move,
    Crosshair,
    ResizeNwse,
    ResizeNesw,
    ResizeNs,
    ResizeEw,
}

impl Handle {
    /// All handles in hit-test order: corners, then edge midpoints
    pub const ALL: [Handle; 8] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
        Handle::Top,
        Handle::Bottom,
        Handle::Left,
        Handle::Right,
    ];

    pub fn edges(self) -> Edges {
        HANDLE_EDGES
            .iter()
            .find(|(handle, _)| *handle == self)
            .map(|(_, edges)| *edges)
            .unwrap_or(Edges::new(false, false, false, false))
    }

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Self::TopLeft | Self::TopRight | Self::BottomLeft | Self::BottomRight
        )
    }

    /// Centre of this handle on `bbox`
    pub fn position(self, bbox: &BoundingBox) -> Point {
        let mid_x = bbox.center_x();
        let mid_y = bbox.center_y();
        match self {
            Self::TopLeft => point(bbox.x1, bbox.y1),
            Self::TopRight => point(bbox.x2, bbox.y1),
            Self::BottomLeft => point(bbox.x1, bbox.y2),
            Self::BottomRight => point(bbox.x2, bbox.y2),
            Self::Top => point(mid_x, bbox.y1),
            Self::Bottom => point(mid_x, bbox.y2),
            Self::Left => point(bbox.x1, mid_y),
            Self::Right => point(bbox.x2, mid_y),
        }
    }

    pub fn cursor(self) -> CursorStyle {
        match self {
            Self::TopLeft | Self::BottomRight => CursorStyle::ResizeNwse,
            Self::TopRight | Self::BottomLeft => CursorStyle::ResizeNesw,
            Self::Top | Self::Bottom => CursorStyle::ResizeNs,
            Self::Left | Self::Right => CursorStyle::ResizeEw,
        }
    }
}

/// Image-space side of the handle hit zone.
///
/// Constant in screen space: `max(handle_size, floor)` screen pixels at any zoom.
#[inline]
pub fn hit_tolerance(handle_size: f32, floor: f32, scale: f32) -> f32 {
    handle_size.max(floor) / scale
}

/// Find the handle of `bbox` under an image-space point.
///
/// Corners are tested before edge midpoints since they are more specific.
pub fn handle_at(p: Point, bbox: &BoundingBox, tolerance: f32) -> Option<Handle> {
    let half = tolerance / 2.0;
    Handle::ALL.into_iter().find(|handle| {
        let c = handle.position(bbox);
        (p.x - c.x).abs() <= half && (p.y - c.y).abs() <= half
    })
}

/// Span of one axis when one edge follows the pointer and the other stays fixed.
///
/// The result is ordered, and at least `min_size` long on the pointer's side.
fn drag_span(pointer: f32, fixed: f32, min_size: f32) -> (f32, f32) {
    if pointer >= fixed {
        (fixed, pointer.max(fixed + min_size))
    } else {
        (pointer.min(fixed - min_size), fixed)
    }
}

/// Resize `initial` by dragging `handle` to the image-space `pointer`.
///
/// Only the edges the handle owns move. Dragging past the opposite edge flips the
/// box; the dragged axis never shrinks below `min_size`.
pub fn resize_box(
    initial: &BoundingBox,
    handle: Handle,
    pointer: Point,
    min_size: f32,
) -> BoundingBox {
    let edges = handle.edges();
    let mut out = *initial;

    if edges.left {
        (out.x1, out.x2) = drag_span(pointer.x, initial.x2, min_size);
    } else if edges.right {
        (out.x1, out.x2) = drag_span(pointer.x, initial.x1, min_size);
    }

    if edges.top {
        (out.y1, out.y2) = drag_span(pointer.y, initial.y2, min_size);
    } else if edges.bottom {
        (out.y1, out.y2) = drag_span(pointer.y, initial.y1, min_size);
    }

    out.normalized()
}

/// Translate `initial` by the pointer displacement since the gesture started
pub fn move_box(initial: &BoundingBox, start: Point, current: Point) -> BoundingBox {
    initial.translated(current.x - start.x, current.y - start.y)
}

/// Shift `bbox` so it lies within `[0, width] x [0, height]`.
///
/// A box larger than the image is pinned to the top-left edge.
pub fn clamp_into(bbox: &BoundingBox, width: f32, height: f32) -> BoundingBox {
    fn shift(lo: f32, hi: f32, limit: f32) -> f32 {
        if lo < 0.0 || hi - lo > limit {
            -lo
        } else if hi > limit {
            limit - hi
        } else {
            0.0
        }
    }
    bbox.translated(shift(bbox.x1, bbox.x2, width), shift(bbox.y1, bbox.y2, height))
}

/// Box being drawn from the press point to the current point
pub fn draw_box(start: Point, current: Point) -> BoundingBox {
    BoundingBox::from_corners(start, current)
}
