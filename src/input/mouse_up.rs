//! Pointer up - commit or discard the gesture, then return to Idle.

use super::{BubbleStore, GestureOutcome, InteractionController, InteractionState};
use crate::types::{BoundingBox, Point};
use tracing::debug;

impl InteractionController {
    /// Finish the active gesture.
    ///
    /// Geometry is committed only if it meets the minimum box size; smaller
    /// results are dropped without touching the store.
    pub fn handle_pointer_up<S: BubbleStore + ?Sized>(
        &mut self,
        position: Point,
        store: &mut S,
    ) -> GestureOutcome {
        self.last_pointer = Some(position);
        let min_size = self.config.min_box_size;

        match std::mem::take(&mut self.state) {
            InteractionState::Idle => GestureOutcome::None,
            InteractionState::Drawing { current, .. } => {
                if current.meets_min_size(min_size) {
                    store.add_bubble(current);
                    debug!(?current, "Bubble added");
                    GestureOutcome::Added(current)
                } else {
                    debug!(
                        width = current.width(),
                        height = current.height(),
                        "Drawn box below minimum size"
                    );
                    GestureOutcome::Discarded
                }
            }
            InteractionState::Moving { item_id, current, .. }
            | InteractionState::Resizing { item_id, current, .. } => match current {
                Some(bbox) => commit_update(store, item_id, bbox, min_size),
                None => GestureOutcome::Unchanged,
            },
            InteractionState::Panning {
                origin,
                click_deselects,
                ..
            } => {
                if click_deselects && origin.distance(position) < self.config.click_threshold {
                    store.select(None);
                    debug!("Click on empty space, selection cleared");
                    GestureOutcome::Deselected
                } else {
                    GestureOutcome::Panned
                }
            }
            InteractionState::Masking { .. } => GestureOutcome::Painted,
        }
    }
}

fn commit_update<S: BubbleStore + ?Sized>(
    store: &mut S,
    item_id: u32,
    bbox: BoundingBox,
    min_size: f32,
) -> GestureOutcome {
    if !bbox.meets_min_size(min_size) {
        debug!(item_id, "Edited box below minimum size, discarded");
        return GestureOutcome::Discarded;
    }
    if store.update_bubble(item_id, bbox) {
        debug!(item_id, ?bbox, "Bubble updated");
        GestureOutcome::Updated { item_id, bbox }
    } else {
        debug!(item_id, "Edited item no longer exists");
        GestureOutcome::Discarded
    }
}
