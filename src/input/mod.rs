//! Pointer and wheel input handling for the bubble canvas.
//!
//! ## Architecture
//!
//! [`InteractionController`] owns the viewport, the mask raster, and the undo
//! stack. The host feeds it pointer events in arrival order; committed
//! geometry flows out through the [`BubbleStore`] it is handed on each call.
//!
//! ## Modules
//!
//! - `state` - Interaction state enum and helper methods
//! - `controller` - Controller struct, image lifecycle, undo, cursor feedback
//! - `mouse_down` - Pointer down (gesture selection priority chain)
//! - `drag` - Pointer move (dispatch on the active gesture)
//! - `mouse_up` - Pointer up (commit or discard)
//! - `transform` - Wheel zoom, keyboard pan and zoom steps

mod controller;
mod drag;
mod mouse_down;
mod mouse_up;
mod state;
mod transform;

pub use controller::InteractionController;
pub use state::InteractionState;

use crate::constants::DEFAULT_BRUSH_SIZE;
use crate::types::{BoundingBox, DetectedItem, Point};
use serde::{Deserialize, Serialize};

/// Mouse button that started a gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

/// A pointer press in screen coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub position: Point,
    pub button: PointerButton,
}

impl PointerEvent {
    pub fn new(position: Point, button: PointerButton) -> Self {
        Self { position, button }
    }

    pub fn primary(position: Point) -> Self {
        Self::new(position, PointerButton::Primary)
    }
}

/// Mode flags owned by the surrounding UI
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorModes {
    pub edit_mode: bool,
    /// Add-bubble mode; only honoured in edit mode
    pub adding: bool,
    pub mask_mode: bool,
    pub erase_mode: bool,
    /// Brush diameter in image pixels
    pub brush_size: f32,
}

impl Default for EditorModes {
    fn default() -> Self {
        Self {
            edit_mode: false,
            adding: false,
            mask_mode: false,
            erase_mode: false,
            brush_size: DEFAULT_BRUSH_SIZE,
        }
    }
}

/// What a finished gesture did
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureOutcome {
    /// Pointer up without an active gesture
    None,
    /// A new box was handed to the store
    Added(BoundingBox),
    /// An existing box took new geometry
    Updated { item_id: u32, bbox: BoundingBox },
    /// The gesture ended below the minimum size or its item is gone
    Discarded,
    /// Move or resize released without any pointer movement
    Unchanged,
    /// A click on empty space cleared the selection
    Deselected,
    Panned,
    Painted,
}

/// The item list the controller reads hit-test targets from and commits into.
///
/// Calls are direct and synchronous; the controller never keeps a reference
/// between events.
pub trait BubbleStore {
    /// Items in display order; later items draw on top
    fn items(&self) -> &[DetectedItem];

    fn selected_id(&self) -> Option<u32>;

    fn select(&mut self, id: Option<u32>);

    /// Append a new bubble with the next id
    fn add_bubble(&mut self, bbox: BoundingBox);

    /// Replace the geometry of an item; false if the id does not exist
    fn update_bubble(&mut self, id: u32, bbox: BoundingBox) -> bool;

    fn item(&self, id: u32) -> Option<&DetectedItem> {
        self.items().iter().find(|item| item.id == id)
    }

    /// Topmost item whose body contains the image-space point
    fn topmost_at(&self, p: Point) -> Option<u32> {
        self.items().iter().rev().find(|item| item.bbox.contains(p)).map(|item| item.id)
    }
}
