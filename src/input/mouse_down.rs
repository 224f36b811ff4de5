//! Pointer down - picks the gesture for this press.
//!
//! Priority for the primary button, first match wins:
//!
//! ```text
//! 1. mask mode (image loaded)          -> Masking, dab at the press point
//! 2. edit + add mode                   -> Drawing
//! 3. edit, handle of the selected box  -> Resizing (undo pushed first)
//! 4. edit, box body (topmost)          -> Moving   (selects, undo pushed first)
//! 5. otherwise                         -> Panning  (a click deselects)
//! ```
//!
//! The middle button always pans. The secondary button erases in mask mode,
//! whatever the erase flag says, and is ignored otherwise.

use super::{BubbleStore, InteractionController, PointerButton, PointerEvent};
use crate::geometry;
use crate::profile_scope;
use crate::types::Point;
use tracing::{debug, trace};

impl InteractionController {
    pub fn handle_pointer_down<S: BubbleStore + ?Sized>(
        &mut self,
        event: PointerEvent,
        store: &mut S,
    ) {
        profile_scope!("handle_pointer_down");

        if !self.state.is_idle() {
            trace!(button = ?event.button, "Pointer down during active gesture ignored");
            return;
        }

        self.last_pointer = Some(event.position);
        let image_pos = self.viewport.screen_to_image(event.position);
        let masking = self.modes.mask_mode && self.mask.is_some();

        match event.button {
            PointerButton::Middle => {
                self.state.start_panning(event.position, false);
                return;
            }
            PointerButton::Secondary => {
                if masking {
                    self.begin_masking(image_pos, true);
                }
                return;
            }
            PointerButton::Primary => {}
        }

        if masking {
            self.begin_masking(image_pos, self.modes.erase_mode);
            return;
        }

        if self.modes.edit_mode {
            if self.modes.adding {
                self.state.start_drawing(image_pos);
                debug!(x = image_pos.x, y = image_pos.y, "Drawing started");
                return;
            }
            if self.try_begin_resize(image_pos, store) || self.try_begin_move(image_pos, store) {
                return;
            }
        }

        self.state.start_panning(event.position, true);
    }

    fn begin_masking(&mut self, at: Point, erase: bool) {
        let brush_size = self.modes.brush_size;
        if let Some(mask) = self.mask.as_mut() {
            mask.dab(at, brush_size, erase);
        }
        self.state.start_masking(erase, brush_size, at);
        trace!(erase, brush_size, "Masking started");
    }

    fn try_begin_resize<S: BubbleStore + ?Sized>(&mut self, p: Point, store: &S) -> bool {
        let Some((item_id, bbox)) = store
            .selected_id()
            .and_then(|id| store.item(id))
            .map(|item| (item.id, item.bbox))
        else {
            return false;
        };
        let Some(handle) = geometry::handle_at(p, &bbox, self.hit_tolerance()) else {
            return false;
        };

        self.undo.push(item_id, bbox);
        self.state.start_resizing(item_id, handle, bbox);
        debug!(item_id, ?handle, "Resize started");
        true
    }

    fn try_begin_move<S: BubbleStore + ?Sized>(&mut self, p: Point, store: &mut S) -> bool {
        let Some((item_id, bbox)) = store
            .topmost_at(p)
            .and_then(|id| store.item(id))
            .map(|item| (item.id, item.bbox))
        else {
            return false;
        };

        self.undo.push(item_id, bbox);
        store.select(Some(item_id));
        self.state.start_moving(item_id, bbox, p);
        debug!(item_id, "Move started");
        true
    }
}
