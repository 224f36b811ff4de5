//! Editor configuration.
//!
//! All interaction heuristics (hit tolerances, click threshold, row-overlap ratio)
//! are plain values here so hosts can tune them per page style. Missing fields
//! fall back to the defaults in [`crate::constants`].

use crate::constants::{
    CLICK_THRESHOLD, DEFAULT_BRUSH_SIZE, HANDLE_SIZE, HIT_TOLERANCE_FLOOR, MASK_CROP_PADDING,
    MASK_OVERLAY_OPACITY, MAX_SCALE, MAX_UNDO_ENTRIES, MIN_BOX_SIZE, MIN_SCALE,
    ROW_OVERLAP_RATIO, ZOOM_SENSITIVITY,
};
use crate::error::{CanvasError, CanvasResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tuning for the reading-order sorter
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SortConfig {
    /// Vertical overlap, as a fraction of the shorter box, at which two boxes share a row
    pub row_overlap_ratio: f32,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            row_overlap_ratio: ROW_OVERLAP_RATIO,
        }
    }
}

/// Configuration for the canvas controller, mask layer, and renderer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub min_box_size: f32,
    pub handle_size: f32,
    pub hit_tolerance_floor: f32,
    pub click_threshold: f32,
    pub zoom_sensitivity: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub undo_capacity: usize,
    pub default_brush_size: f32,
    pub mask_crop_padding: u32,
    pub mask_overlay_opacity: f32,
    /// Keep moved boxes inside the image. Off by default: boxes may be dragged past the edge.
    pub clamp_move_to_image: bool,
    pub reading_order: SortConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_box_size: MIN_BOX_SIZE,
            handle_size: HANDLE_SIZE,
            hit_tolerance_floor: HIT_TOLERANCE_FLOOR,
            click_threshold: CLICK_THRESHOLD,
            zoom_sensitivity: ZOOM_SENSITIVITY,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            undo_capacity: MAX_UNDO_ENTRIES,
            default_brush_size: DEFAULT_BRUSH_SIZE,
            mask_crop_padding: MASK_CROP_PADDING,
            mask_overlay_opacity: MASK_OVERLAY_OPACITY,
            clamp_move_to_image: false,
            reading_order: SortConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config. Unknown fields are ignored, missing ones defaulted.
    pub fn from_json_str(json: &str) -> CanvasResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json).inspect_err(|e| {
            tracing::warn!("Rejected editor config {:?}: {}", path, e);
        })?;
        tracing::debug!("Loaded editor config from {:?}", path);
        Ok(config)
    }

    /// Check that every value is usable
    pub fn validate(&self) -> CanvasResult<()> {
        fn positive(name: &str, value: f32) -> CanvasResult<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(CanvasError::InvalidConfig(format!("{name} must be positive, got {value}")))
            }
        }

        positive("minBoxSize", self.min_box_size)?;
        positive("handleSize", self.handle_size)?;
        positive("hitToleranceFloor", self.hit_tolerance_floor)?;
        positive("zoomSensitivity", self.zoom_sensitivity)?;
        positive("minScale", self.min_scale)?;
        positive("defaultBrushSize", self.default_brush_size)?;

        if !(self.click_threshold.is_finite() && self.click_threshold >= 0.0) {
            return Err(CanvasError::InvalidConfig(format!(
                "clickThreshold must be non-negative, got {}",
                self.click_threshold
            )));
        }
        if !(self.max_scale.is_finite() && self.max_scale >= self.min_scale) {
            return Err(CanvasError::InvalidConfig(format!(
                "maxScale ({}) must be >= minScale ({})",
                self.max_scale, self.min_scale
            )));
        }
        if self.undo_capacity == 0 {
            return Err(CanvasError::InvalidConfig("undoCapacity must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.mask_overlay_opacity) {
            return Err(CanvasError::InvalidConfig(format!(
                "maskOverlayOpacity must be within [0, 1], got {}",
                self.mask_overlay_opacity
            )));
        }
        let ratio = self.reading_order.row_overlap_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(CanvasError::InvalidConfig(format!(
                "readingOrder.rowOverlapRatio must be within (0, 1], got {ratio}"
            )));
        }
        Ok(())
    }
}
