//! Bounded undo stack of pre-gesture box geometry.
//!
//! An entry is pushed right before a move or resize gesture mutates anything.
//! There is no redo.

use crate::types::BoundingBox;
use std::collections::VecDeque;

/// Geometry of an item before a gesture changed it
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UndoEntry {
    pub item_id: u32,
    pub previous: BoundingBox,
}

/// LIFO of [`UndoEntry`] that drops the oldest entry once full
#[derive(Debug)]
pub struct UndoStack {
    entries: VecDeque<UndoEntry>,
    capacity: usize,
}

impl UndoStack {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    pub fn push(&mut self, item_id: u32, previous: BoundingBox) {
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(UndoEntry { item_id, previous });
    }

    /// Pop the most recent entry; `None` on an empty stack
    pub fn pop(&mut self) -> Option<UndoEntry> {
        self.entries.pop_back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
