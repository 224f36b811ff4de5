//! Interaction controller - owns the viewport, mask, and undo stack for one image.

use super::{BubbleStore, EditorModes, InteractionState};
use crate::config::EditorConfig;
use crate::error::{CanvasError, CanvasResult};
use crate::geometry::{self, CursorStyle};
use crate::history::UndoStack;
use crate::mask::{MaskLayer, MaskSnapshot};
use crate::types::Point;
use crate::viewport::Viewport;
use image::RgbaImage;
use tracing::debug;

/// Pointer-driven editor core for the active image.
///
/// The mask raster is only mutated from here; renderers and exporters read it
/// through [`InteractionController::mask`] or [`InteractionController::mask_snapshot`].
#[derive(Debug)]
pub struct InteractionController {
    pub(super) config: EditorConfig,
    pub(super) viewport: Viewport,
    pub(super) modes: EditorModes,
    pub(super) state: InteractionState,
    pub(super) mask: Option<MaskLayer>,
    pub(super) undo: UndoStack,
    pub(super) image_size: Option<(u32, u32)>,
    /// Last screen position seen, for the brush preview
    pub(super) last_pointer: Option<Point>,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::with_valid_config(EditorConfig::default())
    }
}

impl InteractionController {
    /// Controller for `config`, rejected with [`CanvasError::InvalidConfig`] if
    /// any value is unusable.
    pub fn new(config: EditorConfig) -> CanvasResult<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: EditorConfig) -> Self {
        let modes = EditorModes {
            brush_size: config.default_brush_size,
            ..EditorModes::default()
        };
        Self {
            undo: UndoStack::new(config.undo_capacity),
            config,
            viewport: Viewport::default(),
            modes,
            state: InteractionState::Idle,
            mask: None,
            image_size: None,
            last_pointer: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Current viewport, for overlays that must align with the canvas
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn modes(&self) -> EditorModes {
        self.modes
    }

    /// Replace the UI mode flags.
    ///
    /// Takes effect on the next pointer-down; a gesture in progress keeps the
    /// modes it started with.
    pub fn set_modes(&mut self, modes: EditorModes) {
        self.modes = modes;
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn mask(&self) -> Option<&MaskLayer> {
        self.mask.as_ref()
    }

    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.image_size
    }

    /// Last pointer position in screen space
    pub fn last_pointer(&self) -> Option<Point> {
        self.last_pointer
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Image-space side of a handle's hit zone at the current zoom
    pub fn hit_tolerance(&self) -> f32 {
        geometry::hit_tolerance(
            self.config.handle_size,
            self.config.hit_tolerance_floor,
            self.viewport.scale,
        )
    }

    // ========================================================================
    // Image lifecycle
    // ========================================================================

    /// Switch to a newly loaded image of `width` x `height` pixels.
    ///
    /// Allocates a fresh mask, drops any gesture in progress, and clears undo.
    /// The viewport resets to `{1, 0, 0}` unless `keep_viewport` is set.
    pub fn load_image(&mut self, width: u32, height: u32, keep_viewport: bool) -> CanvasResult<()> {
        let mask = MaskLayer::new(width, height)?;
        self.mask = Some(mask);
        self.image_size = Some((width, height));
        self.state.reset();
        self.undo.clear();
        if !keep_viewport {
            self.viewport.reset();
        }
        debug!(width, height, keep_viewport, "Image loaded");
        Ok(())
    }

    /// Forget the active image and its mask
    pub fn unload_image(&mut self) {
        self.mask = None;
        self.image_size = None;
        self.state.reset();
        self.undo.clear();
    }

    /// Wipe every mask stroke
    pub fn clear_mask(&mut self) {
        if let Some(mask) = self.mask.as_mut() {
            mask.clear();
            debug!("Mask cleared");
        }
    }

    /// Crop of the painted mask region and the matching part of `source`.
    ///
    /// `Ok(None)` when nothing is painted. `source` must have the image's
    /// dimensions.
    pub fn mask_snapshot(&self, source: &RgbaImage) -> CanvasResult<Option<MaskSnapshot>> {
        let mask = self.mask.as_ref().ok_or(CanvasError::NoImage)?;
        mask.snapshot(source, self.config.mask_crop_padding)
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Escape: leave add mode.
    ///
    /// Returns false when add mode is off, or when a draw gesture has already
    /// started (it resolves on pointer-up).
    pub fn cancel_add(&mut self) -> bool {
        if !self.modes.adding || self.state.is_drawing() {
            return false;
        }
        self.modes.adding = false;
        debug!("Add mode cancelled");
        true
    }

    /// Restore the geometry saved before the most recent move or resize.
    ///
    /// No-op (returns false) on an empty stack, while a gesture is in progress,
    /// or when the saved item no longer exists.
    pub fn undo<S: BubbleStore + ?Sized>(&mut self, store: &mut S) -> bool {
        if !self.state.is_idle() {
            return false;
        }
        let Some(entry) = self.undo.pop() else {
            return false;
        };
        let restored = store.update_bubble(entry.item_id, entry.previous);
        debug!(item_id = entry.item_id, restored, remaining = self.undo.len(), "Undo");
        restored
    }

    /// Cursor to show for a screen position
    pub fn cursor_at<S: BubbleStore + ?Sized>(&self, screen: Point, store: &S) -> CursorStyle {
        if self.state.is_panning() {
            return CursorStyle::Grabbing;
        }
        if let Some(handle) = self.state.resize_handle() {
            return handle.cursor();
        }
        if self.state.is_moving() {
            return CursorStyle::Move;
        }
        let masking = self.modes.mask_mode && self.mask.is_some();
        if masking || (self.modes.edit_mode && self.modes.adding) {
            return CursorStyle::Crosshair;
        }
        if self.modes.edit_mode {
            let p = self.viewport.screen_to_image(screen);
            let tolerance = self.hit_tolerance();
            let selected = store.selected_id().and_then(|id| store.item(id));
            if let Some(handle) =
                selected.and_then(|item| geometry::handle_at(p, &item.bbox, tolerance))
            {
                return handle.cursor();
            }
            if store.topmost_at(p).is_some() {
                return CursorStyle::Move;
            }
        }
        CursorStyle::Grab
    }
}
