//! Item list - detected bubbles in display order, with selection and hit testing.
//!
//! Ids are 1-based display positions. Every removal or reorder renumbers the
//! list, so an id held across such a change may point at a different bubble
//! (or at nothing).

use crate::config::SortConfig;
use crate::input::BubbleStore;
use crate::reading_order::sort_reading_order;
use crate::spatial_index::SpatialIndex;
use crate::types::{BoundingBox, DetectedItem, PanelRect, Point};
use tracing::debug;

/// Owned bubble list implementing [`BubbleStore`]
#[derive(Default)]
pub struct ItemList {
    items: Vec<DetectedItem>,
    selected: Option<u32>,
    index: SpatialIndex,
}

impl std::fmt::Debug for ItemList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemList")
            .field("items", &self.items)
            .field("selected", &self.selected)
            .finish()
    }
}

impl ItemList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items with ids `1..=n` in the given order, default text properties
    pub fn from_boxes(boxes: impl IntoIterator<Item = BoundingBox>) -> Self {
        let items = boxes
            .into_iter()
            .zip(1u32..)
            .map(|(bbox, id)| DetectedItem::new(id, bbox))
            .collect();
        Self::from_items(items)
    }

    /// Take items as-is and renumber them by position
    pub fn from_items(items: Vec<DetectedItem>) -> Self {
        let mut list = Self {
            items,
            selected: None,
            index: SpatialIndex::new(),
        };
        list.reindex();
        list
    }

    /// Order a detection batch for reading and number it
    pub fn from_detection(
        bubbles: &[BoundingBox],
        panels: &[PanelRect],
        config: &SortConfig,
    ) -> Self {
        let ordered = sort_reading_order(bubbles, panels, config);
        debug!(bubbles = ordered.len(), panels = panels.len(), "Detection batch ordered");
        Self::from_boxes(ordered)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_mut(&mut self, id: u32) -> Option<&mut DetectedItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub fn into_items(self) -> Vec<DetectedItem> {
        self.items
    }

    /// Remove an item and renumber the rest. Clears the selection if it pointed at it.
    pub fn remove(&mut self, id: u32) -> Option<DetectedItem> {
        let pos = self.position(id)?;
        let removed = self.items.remove(pos);
        self.selected = match self.selected {
            Some(sel) if sel == id => None,
            Some(sel) if sel > id => Some(sel - 1),
            other => other,
        };
        self.reindex();
        debug!(id, remaining = self.items.len(), "Bubble removed");
        Some(removed)
    }

    /// Move the item at display position `from` to position `to` (both 0-based)
    /// and renumber. The selection follows the moved item.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from >= self.items.len() || to >= self.items.len() {
            return false;
        }
        let selected_pos = self.selected.and_then(|id| self.position(id));
        let item = self.items.remove(from);
        self.items.insert(to, item);
        self.selected = selected_pos.map(|pos| {
            let new_pos = if pos == from {
                to
            } else if from < pos && pos <= to {
                pos - 1
            } else if to <= pos && pos < from {
                pos + 1
            } else {
                pos
            };
            new_pos as u32 + 1
        });
        self.reindex();
        true
    }

    /// Drop every item and the selection
    pub fn clear(&mut self) {
        self.items.clear();
        self.selected = None;
        self.index.clear();
    }

    fn position(&self, id: u32) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn reindex(&mut self) {
        for (i, item) in self.items.iter_mut().enumerate() {
            item.id = i as u32 + 1;
        }
        self.index.rebuild(self.items.iter().map(|item| (item.id, item.bbox)));
    }
}

impl BubbleStore for ItemList {
    fn items(&self) -> &[DetectedItem] {
        &self.items
    }

    fn selected_id(&self) -> Option<u32> {
        self.selected
    }

    fn select(&mut self, id: Option<u32>) {
        self.selected = id.filter(|id| self.position(*id).is_some());
    }

    /// Appends with id `len + 1` and selects the new bubble
    fn add_bubble(&mut self, bbox: BoundingBox) {
        let id = self.items.len() as u32 + 1;
        self.items.push(DetectedItem::new(id, bbox));
        self.index.insert(id, bbox);
        self.selected = Some(id);
    }

    fn update_bubble(&mut self, id: u32, bbox: BoundingBox) -> bool {
        let Some(item) = self.item_mut(id) else {
            return false;
        };
        item.bbox = bbox;
        self.index.insert(id, bbox);
        true
    }

    fn item(&self, id: u32) -> Option<&DetectedItem> {
        // Ids are positions, so this is a direct lookup
        let item = self.items.get(id.checked_sub(1)? as usize)?;
        (item.id == id).then_some(item)
    }

    fn topmost_at(&self, p: Point) -> Option<u32> {
        self.index.topmost_at(p.x, p.y)
    }
}
