//! Undo Integration Tests

use crate::helpers::{TestEditorBuilder, box_of, drag};
use bubbleboard::input::PointerEvent;
use bubbleboard::types::{BoundingBox, point};
use bubbleboard::{BubbleStore, EditorConfig};

#[test]
fn test_undo_resize_restores_exact_geometry() {
    let original = BoundingBox::new(10.25, 10.5, 60.75, 60.125);
    let (mut editor, mut items) = TestEditorBuilder::new()
        .edit_mode()
        .with_box(original.x1, original.y1, original.x2, original.y2)
        .selected(1)
        .with_viewport(1.7, 3.3, -9.1)
        .build();

    let corner = editor.viewport().image_to_screen(point(original.x2, original.y2));
    drag(&mut editor, &mut items, (corner.x, corner.y), (corner.x + 73.0, corner.y + 41.0));
    assert_ne!(box_of(&items, 1), original);

    assert!(editor.undo(&mut items));
    assert_eq!(box_of(&items, 1), original);
}

#[test]
fn test_undo_move() {
    let (mut editor, mut items) = TestEditorBuilder::new()
        .edit_mode()
        .with_box(10.0, 10.0, 60.0, 60.0)
        .build();

    drag(&mut editor, &mut items, (20.0, 20.0), (120.0, 90.0));
    assert!(editor.undo(&mut items));

    assert_eq!(box_of(&items, 1), BoundingBox::new(10.0, 10.0, 60.0, 60.0));
}

#[test]
fn test_undo_is_lifo_across_items() {
    let (mut editor, mut items) = TestEditorBuilder::new()
        .edit_mode()
        .with_box(10.0, 10.0, 60.0, 60.0)
        .with_box(200.0, 10.0, 260.0, 60.0)
        .build();

    drag(&mut editor, &mut items, (20.0, 20.0), (30.0, 20.0));
    drag(&mut editor, &mut items, (210.0, 20.0), (210.0, 40.0));
    drag(&mut editor, &mut items, (40.0, 20.0), (50.0, 20.0));
    assert_eq!(editor.undo_len(), 3);

    assert!(editor.undo(&mut items));
    assert_eq!(box_of(&items, 1), BoundingBox::new(20.0, 10.0, 70.0, 60.0));
    assert!(editor.undo(&mut items));
    assert_eq!(box_of(&items, 2), BoundingBox::new(200.0, 10.0, 260.0, 60.0));
    assert!(editor.undo(&mut items));
    assert_eq!(box_of(&items, 1), BoundingBox::new(10.0, 10.0, 60.0, 60.0));
}

#[test]
fn test_undo_on_empty_stack_is_noop() {
    let (mut editor, mut items) = TestEditorBuilder::new().with_box(10.0, 10.0, 60.0, 60.0).build();

    assert!(!editor.undo(&mut items));
    assert_eq!(box_of(&items, 1), BoundingBox::new(10.0, 10.0, 60.0, 60.0));
}

#[test]
fn test_undo_for_removed_item_is_noop() {
    let (mut editor, mut items) = TestEditorBuilder::new()
        .edit_mode()
        .with_box(10.0, 10.0, 60.0, 60.0)
        .with_box(200.0, 10.0, 260.0, 60.0)
        .build();

    drag(&mut editor, &mut items, (210.0, 20.0), (230.0, 20.0));
    items.remove(2);

    assert!(!editor.undo(&mut items));
    assert_eq!(editor.undo_len(), 0);
    assert_eq!(box_of(&items, 1), BoundingBox::new(10.0, 10.0, 60.0, 60.0));
}

#[test]
fn test_undo_ignored_mid_gesture() {
    let (mut editor, mut items) = TestEditorBuilder::new()
        .edit_mode()
        .with_box(10.0, 10.0, 60.0, 60.0)
        .build();

    editor.handle_pointer_down(PointerEvent::primary(point(20.0, 20.0)), &mut items);
    editor.handle_pointer_move(point(40.0, 20.0));

    assert!(!editor.undo(&mut items));
    assert_eq!(editor.undo_len(), 1);
}

#[test]
fn test_undo_capacity_drops_oldest() {
    let config = EditorConfig {
        undo_capacity: 2,
        ..EditorConfig::default()
    };
    let (mut editor, mut items) = TestEditorBuilder::new()
        .with_config(config)
        .edit_mode()
        .with_box(10.0, 10.0, 60.0, 60.0)
        .build();

    for step in 0..3 {
        let x = 20.0 + step as f32 * 10.0;
        drag(&mut editor, &mut items, (x, 20.0), (x + 10.0, 20.0));
    }
    assert_eq!(editor.undo_len(), 2);

    assert!(editor.undo(&mut items));
    assert!(editor.undo(&mut items));
    assert!(!editor.undo(&mut items));
    // The first move is beyond reach
    assert_eq!(box_of(&items, 1), BoundingBox::new(20.0, 10.0, 70.0, 60.0));
}

#[test]
fn test_image_change_clears_undo() {
    let (mut editor, mut items) = TestEditorBuilder::new()
        .edit_mode()
        .with_box(10.0, 10.0, 60.0, 60.0)
        .build();

    drag(&mut editor, &mut items, (20.0, 20.0), (30.0, 20.0));
    editor.load_image(640, 480, false).expect("image loads");

    assert_eq!(editor.undo_len(), 0);
    assert!(!editor.undo(&mut items));
    assert_eq!(items.selected_id(), Some(1));
}
