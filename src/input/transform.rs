//! Canvas transformations - wheel zoom and keyboard pan/zoom steps.

use super::InteractionController;
use crate::types::Point;
use tracing::trace;

impl InteractionController {
    /// Zoom around the cursor for a wheel event.
    ///
    /// Positive `delta_y` (scrolling down) zooms out. Returns false when the
    /// scale is already at the clamp in that direction.
    pub fn handle_wheel(&mut self, cursor: Point, delta_y: f32) -> bool {
        let changed = self.viewport.zoom_wheel(
            delta_y,
            cursor,
            self.config.zoom_sensitivity,
            self.config.min_scale,
            self.config.max_scale,
        );
        if changed {
            trace!(scale = self.viewport.scale, "Wheel zoom");
        }
        changed
    }

    /// Multiply the scale by `factor` around a screen point, within the scale clamp
    pub fn zoom_at(&mut self, factor: f32, cursor: Point) -> bool {
        if !(factor > 0.0) {
            return false;
        }
        let new_scale =
            (self.viewport.scale * factor).clamp(self.config.min_scale, self.config.max_scale);
        if new_scale == self.viewport.scale {
            return false;
        }
        self.viewport.zoom_to(new_scale, cursor);
        trace!(scale = new_scale, "Zoom step");
        true
    }

    /// Pan by a screen-space delta
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.viewport.pan(dx, dy);
    }

    /// Back to scale 1 with the image at the origin
    pub fn reset_viewport(&mut self) {
        self.viewport.reset();
    }
}
