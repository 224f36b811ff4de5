//! Editor-wide constants.
//!
//! Centralizes the tunable numbers of the canvas editor. Every value here is the
//! default for a field of [`crate::config::EditorConfig`]; code reads the config,
//! not these constants directly.

// ============================================================================
// Box Geometry
// ============================================================================

/// Minimum committed box dimension on either axis, in image pixels
pub const MIN_BOX_SIZE: f32 = 8.0;

/// Side of a drawn selection handle in screen pixels
pub const HANDLE_SIZE: f32 = 10.0;

/// Floor for the handle hit zone in screen pixels
pub const HIT_TOLERANCE_FLOOR: f32 = 12.0;

/// Screen distance below which an empty-space press/release counts as a click
pub const CLICK_THRESHOLD: f32 = 5.0;

// ============================================================================
// Zoom & Pan
// ============================================================================

/// Minimum viewport scale
pub const MIN_SCALE: f32 = 0.1;

/// Maximum viewport scale
pub const MAX_SCALE: f32 = 10.0;

/// Default viewport scale
pub const DEFAULT_SCALE: f32 = 1.0;

/// Scale change per unit of wheel delta
pub const ZOOM_SENSITIVITY: f32 = 0.001;

// ============================================================================
// History
// ============================================================================

/// Maximum undo entries to keep
pub const MAX_UNDO_ENTRIES: usize = 200;

// ============================================================================
// Mask
// ============================================================================

/// Default brush diameter in image pixels
pub const DEFAULT_BRUSH_SIZE: f32 = 20.0;

/// Context margin added around the painted region of a mask snapshot
pub const MASK_CROP_PADDING: u32 = 16;

/// Opacity of the red mask preview
pub const MASK_OVERLAY_OPACITY: f32 = 0.7;

/// Flattened grey level above which a crop pixel is treated as masked
pub const MASK_WHITE_THRESHOLD: u8 = 200;

/// Dab spacing as a fraction of brush diameter
pub const BRUSH_DAB_SPACING: f32 = 0.25;

// ============================================================================
// Reading Order
// ============================================================================

/// Vertical overlap (relative to the shorter box) at which two boxes share a row
pub const ROW_OVERLAP_RATIO: f32 = 0.35;

/// Centre/edge differences below this are ties
pub const SORT_EPSILON: f32 = 1e-6;

// ============================================================================
// Colors (RGBA)
// ============================================================================

/// Outline of an unselected box
pub const BOX_COLOR: [u8; 4] = [0x3b, 0x82, 0xf6, 0xff];

/// Outline, badge, and handles of the selected box
pub const SELECTED_COLOR: [u8; 4] = [0xff, 0x3e, 0x00, 0xff];

/// Outline of a box being drawn
pub const DRAWING_COLOR: [u8; 4] = [0x10, 0xb9, 0x81, 0xff];

/// Tint of the mask preview
pub const MASK_TINT: [u8; 4] = [0xff, 0x00, 0x00, 0xff];

/// Outline of the brush preview circle
pub const BRUSH_OUTLINE_COLOR: [u8; 4] = [0xff, 0xff, 0xff, 0xc0];

// ============================================================================
// Stroke Widths (screen pixels)
// ============================================================================

/// Outline width of an unselected box
pub const BOX_LINE_WIDTH: f32 = 1.5;

/// Outline width of the selected box
pub const SELECTED_LINE_WIDTH: f32 = 3.0;

/// Outline width of a box being drawn
pub const DRAWING_LINE_WIDTH: f32 = 2.0;

/// Id badge font size floor in screen pixels
pub const LABEL_FONT_SIZE: f32 = 16.0;
