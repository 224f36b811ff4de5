//! Interaction state machine - one gesture at a time, from pointer-down to pointer-up.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Masking     (mask mode + image loaded, or secondary button in mask mode)
//! Idle -> Drawing     (primary down in edit + add mode)
//! Idle -> Resizing    (primary down on a handle of the selected box)
//! Idle -> Moving      (primary down on a box body, topmost wins)
//! Idle -> Panning     (middle down, or primary down on empty space)
//!
//! Any -> Idle         (pointer up - commits or discards the gesture)
//! ```

use crate::geometry::Handle;
use crate::types::{BoundingBox, Point};

/// The active pointer gesture and the transient data it needs.
///
/// Points are in image space except for `Panning`, which works on screen
/// deltas.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    /// No gesture in progress
    #[default]
    Idle,

    /// Dragging out a new box
    Drawing {
        /// Image point of the pointer-down
        start: Point,
        /// Normalized box from `start` to the latest pointer position
        current: BoundingBox,
    },

    /// Translating an existing box
    Moving {
        item_id: u32,
        initial_box: BoundingBox,
        /// Image point of the pointer-down
        initial_pointer: Point,
        /// Set once a move event arrives
        current: Option<BoundingBox>,
    },

    /// Dragging one handle of the selected box
    Resizing {
        item_id: u32,
        handle: Handle,
        initial_box: BoundingBox,
        /// Set once a move event arrives
        current: Option<BoundingBox>,
    },

    /// Dragging the viewport
    Panning {
        /// Screen point of the pointer-down
        origin: Point,
        /// Last screen point seen, for delta calculation
        last: Point,
        /// A short press-release clears the selection
        click_deselects: bool,
    },

    /// Painting or erasing the mask
    Masking {
        erase: bool,
        /// Brush diameter fixed for the whole stroke
        brush_size: f32,
        /// Last image point dabbed
        last: Point,
    },
}

impl InteractionState {
    /// Returns true if the state is Idle
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    pub fn is_moving(&self) -> bool {
        matches!(self, Self::Moving { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, Self::Resizing { .. })
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }

    pub fn is_masking(&self) -> bool {
        matches!(self, Self::Masking { .. })
    }

    /// Reset to Idle state
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    /// Start drawing a zero-size box at `start`
    pub fn start_drawing(&mut self, start: Point) {
        *self = Self::Drawing {
            start,
            current: BoundingBox::at_point(start),
        };
    }

    pub fn start_moving(&mut self, item_id: u32, initial_box: BoundingBox, initial_pointer: Point) {
        *self = Self::Moving {
            item_id,
            initial_box,
            initial_pointer,
            current: None,
        };
    }

    pub fn start_resizing(&mut self, item_id: u32, handle: Handle, initial_box: BoundingBox) {
        *self = Self::Resizing {
            item_id,
            handle,
            initial_box,
            current: None,
        };
    }

    pub fn start_panning(&mut self, origin: Point, click_deselects: bool) {
        *self = Self::Panning {
            origin,
            last: origin,
            click_deselects,
        };
    }

    pub fn start_masking(&mut self, erase: bool, brush_size: f32, at: Point) {
        *self = Self::Masking {
            erase,
            brush_size,
            last: at,
        };
    }

    /// Get the item ID being moved or resized, if any
    pub fn active_item_id(&self) -> Option<u32> {
        match self {
            Self::Moving { item_id, .. } | Self::Resizing { item_id, .. } => Some(*item_id),
            _ => None,
        }
    }

    /// Transient geometry of the item being moved or resized
    pub fn transient_box(&self) -> Option<BoundingBox> {
        match self {
            Self::Moving { current, .. } | Self::Resizing { current, .. } => *current,
            _ => None,
        }
    }

    /// Get the in-progress draw box, if drawing
    pub fn drawing_box(&self) -> Option<BoundingBox> {
        match self {
            Self::Drawing { current, .. } => Some(*current),
            _ => None,
        }
    }

    /// Get the active resize handle
    pub fn resize_handle(&self) -> Option<Handle> {
        match self {
            Self::Resizing { handle, .. } => Some(*handle),
            _ => None,
        }
    }

    /// Whether the current masking gesture erases
    pub fn is_erasing(&self) -> bool {
        matches!(self, Self::Masking { erase: true, .. })
    }
}
