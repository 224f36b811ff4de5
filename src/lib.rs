//! Bubbleboard - the canvas core of a manga bubble editor.
//!
//! Bubbles are rectangles over a page image. The user draws, moves, and
//! resizes them through a pointer state machine, paints an inpainting mask
//! over the page, and gets detection batches back in manga reading order.
//!
//! ## Modules
//!
//! - `input` - pointer state machine ([`input::InteractionController`]) and the
//!   [`input::BubbleStore`] seam
//! - `items` - [`items::ItemList`], the default bubble store
//! - `geometry` - handle hit testing, resize/move/draw box construction
//! - `viewport` - screen/image transform, zoom-to-cursor, pan
//! - `mask` - mask raster, snapshot export, inpaint merge-back
//! - `history` - bounded undo stack
//! - `reading_order` - panel-aware right-to-left bubble ordering
//! - `render` - scene building and tiny-skia rasterization
//!
//! Hosts drive everything from one thread: pointer events go to the
//! controller in arrival order and the canvas is redrawn between them.

pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod history;
pub mod input;
pub mod items;
pub mod logging;
pub mod mask;
pub mod perf;
pub mod reading_order;
pub mod render;
pub mod spatial_index;
pub mod types;
pub mod viewport;

pub use config::{EditorConfig, SortConfig};
pub use error::{CanvasError, CanvasResult};
pub use input::{
    BubbleStore, EditorModes, GestureOutcome, InteractionController, PointerButton, PointerEvent,
};
pub use items::ItemList;
pub use types::{BoundingBox, DetectedItem, PanelRect, Point, TextProperties};
