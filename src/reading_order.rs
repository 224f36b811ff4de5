//! Manga reading order.
//!
//! Orders detected bubbles the way a manga page is read: panel by panel, and
//! inside each panel right-to-left along rows, rows top-to-bottom.
//!
//! ## Algorithm
//!
//! ```text
//! 1. panels sorted with the row-aware comparator
//! 2. each bubble -> panel with the largest intersection area (none -> orphan)
//! 3. bubbles of each panel, in panel order, sorted with the same comparator
//! 4. orphans sorted the same way and appended last
//! ```
//!
//! With no panels every bubble is an orphan, so the same comparator orders the
//! whole page. The older column-grouping strategy is not used anywhere.

use crate::config::SortConfig;
use crate::constants::SORT_EPSILON;
use crate::profile_scope;
use crate::types::{BoundingBox, PanelRect};
use std::cmp::Ordering;

/// Height used for the overlap ratio; floored at one pixel
#[inline]
fn row_height(b: &BoundingBox) -> f32 {
    b.height().max(1.0)
}

/// Right-to-left, row-aware ordering of two rectangles.
///
/// Boxes whose vertical overlap reaches `row_overlap_ratio` of the shorter
/// height share a row and are ordered by centre-x descending. Otherwise (or on
/// a centre-x tie) the higher box comes first; remaining ties go right first.
pub fn compare_rtl(a: &BoundingBox, b: &BoundingBox, row_overlap_ratio: f32) -> Ordering {
    let min_height = row_height(a).min(row_height(b));
    let same_row = a.vertical_overlap(b) / min_height >= row_overlap_ratio;

    let dx = b.center_x() - a.center_x();
    if same_row && dx.abs() > SORT_EPSILON {
        return sign(dx);
    }

    let dy = a.y1 - b.y1;
    if dy.abs() > SORT_EPSILON {
        return sign(dy);
    }

    sign(dx)
}

fn sign(v: f32) -> Ordering {
    if v > SORT_EPSILON {
        Ordering::Greater
    } else if v < -SORT_EPSILON {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}

/// Stable insertion sort.
///
/// The row comparator is not transitive on every layout, so a library sort could
/// detect an inconsistent order. Insertion sort accepts any comparator, and on
/// input it already produced it performs no moves.
fn insertion_sort_by<T>(items: &mut [T], mut cmp: impl FnMut(&T, &T) -> Ordering) {
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && cmp(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Sort boxes with [`compare_rtl`]
pub fn sort_rtl(boxes: &mut [BoundingBox], config: &SortConfig) {
    insertion_sort_by(boxes, |a, b| compare_rtl(a, b, config.row_overlap_ratio));
}

/// Index of the panel with the largest intersection area, `None` for an orphan.
///
/// Ties keep the first panel.
pub fn assign_panel(bubble: &BoundingBox, panels: &[BoundingBox]) -> Option<usize> {
    let mut best = None;
    let mut best_area = 0.0;
    for (i, panel) in panels.iter().enumerate() {
        let area = bubble.intersection_area(panel);
        if area > best_area {
            best_area = area;
            best = Some(i);
        }
    }
    best
}

/// Order bubbles for reading. Never drops a bubble.
pub fn sort_reading_order(
    bubbles: &[BoundingBox],
    panels: &[PanelRect],
    config: &SortConfig,
) -> Vec<BoundingBox> {
    profile_scope!("sort_reading_order");

    let mut panel_boxes: Vec<BoundingBox> = panels.iter().map(|p| p.to_box()).collect();
    sort_rtl(&mut panel_boxes, config);

    let mut groups: Vec<Vec<BoundingBox>> = vec![Vec::new(); panel_boxes.len()];
    let mut orphans = Vec::new();
    for bubble in bubbles {
        match assign_panel(bubble, &panel_boxes) {
            Some(i) => groups[i].push(*bubble),
            None => orphans.push(*bubble),
        }
    }

    let mut out = Vec::with_capacity(bubbles.len());
    for mut group in groups {
        sort_rtl(&mut group, config);
        out.extend(group);
    }
    if !orphans.is_empty() {
        tracing::debug!(
            orphans = orphans.len(),
            panels = panels.len(),
            "Bubbles outside every panel"
        );
    }
    sort_rtl(&mut orphans, config);
    out.extend(orphans);
    out
}
