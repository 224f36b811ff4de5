//! Spatial Index Module
//!
//! R-tree based spatial indexing for bubble hit testing on the canvas.
//! Point queries are O(log n); the topmost hit is the candidate with the
//! highest display id, since later items are painted over earlier ones.

use crate::types::BoundingBox;
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

/// A spatial entry representing a bubble's bounding box.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub item_id: u32,
    pub bbox: BoundingBox,
}

impl SpatialEntry {
    pub fn new(item_id: u32, bbox: BoundingBox) -> Self {
        Self {
            item_id,
            bbox: bbox.normalized(),
        }
    }

    #[inline]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.bbox.x1 && x <= self.bbox.x2 && y >= self.bbox.y1 && y <= self.bbox.y2
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.bbox.x1, self.bbox.y1], [self.bbox.x2, self.bbox.y2])
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.item_id == other.item_id
    }
}

/// Spatial index for bubbles using an R-tree.
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<u32, SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, item_id: u32, bbox: BoundingBox) {
        if let Some(old_entry) = self.entries.remove(&item_id) {
            self.tree.remove(&old_entry);
        }

        let entry = SpatialEntry::new(item_id, bbox);
        self.tree.insert(entry);
        self.entries.insert(item_id, entry);
    }

    pub fn remove(&mut self, item_id: u32) -> bool {
        if let Some(entry) = self.entries.remove(&item_id) {
            self.tree.remove(&entry);
            true
        } else {
            false
        }
    }

    /// Query all items that contain the given image-space point.
    pub fn query_point(&self, x: f32, y: f32) -> Vec<u32> {
        let point_envelope = AABB::from_point([x, y]);

        self.tree
            .locate_in_envelope_intersecting(&point_envelope)
            .filter(|entry| entry.contains_point(x, y))
            .map(|entry| entry.item_id)
            .collect()
    }

    /// The topmost (highest id) item containing the point
    pub fn topmost_at(&self, x: f32, y: f32) -> Option<u32> {
        self.query_point(x, y).into_iter().max()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rebuild<I>(&mut self, items: I)
    where
        I: Iterator<Item = (u32, BoundingBox)>,
    {
        let entries: Vec<SpatialEntry> =
            items.map(|(id, bbox)| SpatialEntry::new(id, bbox)).collect();

        self.entries = entries.iter().map(|e| (e.item_id, *e)).collect();
        self.tree = RTree::bulk_load(entries);
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.entries.clear();
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
