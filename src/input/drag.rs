//! Pointer move - dispatch on the active gesture.
//!
//! Moves arrive at display rate. Idle moves only record the pointer for the
//! brush preview.

use super::{InteractionController, InteractionState};
use crate::geometry;
use crate::profile_scope;
use crate::types::Point;
use tracing::trace;

impl InteractionController {
    /// Returns true when something visible changed and the canvas needs a redraw.
    pub fn handle_pointer_move(&mut self, position: Point) -> bool {
        profile_scope!("handle_pointer_move");

        self.last_pointer = Some(position);
        let image_pos = self.viewport.screen_to_image(position);
        let min_size = self.config.min_box_size;

        match &mut self.state {
            InteractionState::Idle => self.modes.mask_mode,
            InteractionState::Drawing { start, current } => {
                *current = geometry::draw_box(*start, image_pos);
                true
            }
            InteractionState::Moving {
                initial_box,
                initial_pointer,
                current,
                ..
            } => {
                let mut moved = geometry::move_box(initial_box, *initial_pointer, image_pos);
                if self.config.clamp_move_to_image {
                    if let Some((w, h)) = self.image_size {
                        moved = geometry::clamp_into(&moved, w as f32, h as f32);
                    }
                }
                *current = Some(moved);
                true
            }
            InteractionState::Resizing {
                handle,
                initial_box,
                current,
                ..
            } => {
                *current = Some(geometry::resize_box(initial_box, *handle, image_pos, min_size));
                true
            }
            InteractionState::Panning { last, .. } => {
                let delta = position - *last;
                self.viewport.pan(delta.x, delta.y);
                *last = position;
                trace!(dx = delta.x, dy = delta.y, "Pan");
                true
            }
            InteractionState::Masking {
                erase,
                brush_size,
                last,
            } => {
                if let Some(mask) = self.mask.as_mut() {
                    mask.stroke(*last, image_pos, *brush_size, *erase);
                }
                *last = image_pos;
                true
            }
        }
    }
}
