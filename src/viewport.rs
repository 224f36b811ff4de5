//! Viewport transform - screen/image coordinate conversion, zoom, and pan.
//!
//! Screen coordinates are relative to the canvas element's top-left corner.
//! `screen = image * scale + offset`.

use crate::constants::DEFAULT_SCALE;
use crate::types::{Point, point};
use serde::{Deserialize, Serialize};

/// Current view of the image: `{scale, offsetX, offsetY}`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl Viewport {
    pub fn new(scale: f32, offset_x: f32, offset_y: f32) -> Self {
        Self {
            scale,
            offset_x,
            offset_y,
        }
    }

    /// Convert a screen position to image pixel space
    #[inline]
    pub fn screen_to_image(&self, screen: Point) -> Point {
        point(
            (screen.x - self.offset_x) / self.scale,
            (screen.y - self.offset_y) / self.scale,
        )
    }

    /// Convert an image position to screen space
    #[inline]
    pub fn image_to_screen(&self, image: Point) -> Point {
        point(
            image.x * self.scale + self.offset_x,
            image.y * self.scale + self.offset_y,
        )
    }

    /// Convert a screen-space length to image space
    #[inline]
    pub fn screen_len_to_image(&self, len: f32) -> f32 {
        len / self.scale
    }

    /// Set the scale to `new_scale` while keeping the image point under `cursor` fixed.
    pub fn zoom_to(&mut self, new_scale: f32, cursor: Point) {
        let wx = (cursor.x - self.offset_x) / self.scale;
        let wy = (cursor.y - self.offset_y) / self.scale;
        self.offset_x = cursor.x - wx * new_scale;
        self.offset_y = cursor.y - wy * new_scale;
        self.scale = new_scale;
    }

    /// Zoom for a wheel event.
    ///
    /// `new_scale = clamp(scale * (1 - delta * sensitivity), min, max)`.
    /// Returns false when the clamped scale did not change.
    pub fn zoom_wheel(
        &mut self,
        delta: f32,
        cursor: Point,
        sensitivity: f32,
        min_scale: f32,
        max_scale: f32,
    ) -> bool {
        let new_scale = (self.scale * (1.0 - delta * sensitivity)).clamp(min_scale, max_scale);
        if new_scale == self.scale {
            return false;
        }
        self.zoom_to(new_scale, cursor);
        true
    }

    /// Move the view by a screen-space delta, 1:1
    #[inline]
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
