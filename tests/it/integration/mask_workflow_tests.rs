//! Mask Painting and Export Workflow Tests
//!
//! Paint through the controller, then snapshot, encode, and merge an
//! inpainted crop back into the page.

use crate::helpers::{TestEditorBuilder, drag_with, gradient_image, solid_image};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bubbleboard::CanvasError;
use bubbleboard::input::{GestureOutcome, PointerButton, PointerEvent};
use bubbleboard::mask::apply_inpainted;
use bubbleboard::types::point;
use image::Rgba;

#[test]
fn test_single_dab_bounds_match_brush() {
    let (mut editor, mut items) = TestEditorBuilder::new().mask_mode(20.0).build();

    let outcome = drag_with(&mut editor, &mut items, PointerButton::Primary, &[(50.0, 50.0)]);
    assert_eq!(outcome, GestureOutcome::Painted);

    let bounds = editor.mask().and_then(|m| m.painted_bounds()).expect("mask painted");
    assert!(bounds.x.abs_diff(40) <= 1, "{bounds:?}");
    assert!(bounds.y.abs_diff(40) <= 1, "{bounds:?}");
    assert!(bounds.right().abs_diff(60) <= 1, "{bounds:?}");
    assert!(bounds.bottom().abs_diff(60) <= 1, "{bounds:?}");
}

#[test]
fn test_stroke_follows_zoomed_viewport() {
    let (mut editor, mut items) = TestEditorBuilder::new()
        .mask_mode(10.0)
        .with_viewport(2.0, 0.0, 0.0)
        .build();

    drag_with(
        &mut editor,
        &mut items,
        PointerButton::Primary,
        &[(100.0, 100.0), (300.0, 100.0)],
    );

    let mask = editor.mask().expect("image loaded");
    for x in [50, 75, 100, 125, 150] {
        assert_eq!(mask.coverage(x, 50), 255, "gap at x={x}");
    }
    assert_eq!(mask.coverage(50, 80), 0);
}

#[test]
fn test_mask_mode_beats_box_editing() {
    let (mut editor, mut items) = TestEditorBuilder::new()
        .edit_mode()
        .mask_mode(20.0)
        .with_box(10.0, 10.0, 60.0, 60.0)
        .build();

    editor.handle_pointer_down(PointerEvent::primary(point(30.0, 30.0)), &mut items);
    assert!(editor.state().is_masking());
    editor.handle_pointer_up(point(30.0, 30.0), &mut items);
    assert_eq!(editor.undo_len(), 0);
    assert_eq!(items.len(), 1);
}

#[test]
fn test_erase_mode_removes_paint() {
    let (mut editor, mut items) = TestEditorBuilder::new().mask_mode(20.0).build();
    drag_with(&mut editor, &mut items, PointerButton::Primary, &[(50.0, 50.0)]);

    let mut modes = editor.modes();
    modes.erase_mode = true;
    modes.brush_size = 40.0;
    editor.set_modes(modes);
    drag_with(&mut editor, &mut items, PointerButton::Primary, &[(50.0, 50.0)]);

    assert!(editor.mask().is_some_and(|m| m.is_empty()));
}

#[test]
fn test_secondary_button_always_erases() {
    let (mut editor, mut items) = TestEditorBuilder::new().mask_mode(20.0).build();
    drag_with(&mut editor, &mut items, PointerButton::Primary, &[(50.0, 50.0)]);

    editor.handle_pointer_down(
        PointerEvent::new(point(50.0, 50.0), PointerButton::Secondary),
        &mut items,
    );
    assert!(editor.state().is_erasing());
    editor.handle_pointer_up(point(50.0, 50.0), &mut items);

    assert_eq!(editor.mask().map(|m| m.coverage(50, 50)), Some(0));
}

#[test]
fn test_erase_flag_with_secondary_still_erases() {
    let (mut editor, mut items) = TestEditorBuilder::new().mask_mode(20.0).erase_mode().build();

    editor.handle_pointer_down(
        PointerEvent::new(point(50.0, 50.0), PointerButton::Secondary),
        &mut items,
    );
    assert!(editor.state().is_erasing());
}

#[test]
fn test_mask_mode_without_image_pans() {
    let (mut editor, mut items) = TestEditorBuilder::new().without_image().mask_mode(20.0).build();

    let outcome = drag_with(
        &mut editor,
        &mut items,
        PointerButton::Primary,
        &[(50.0, 50.0), (80.0, 50.0)],
    );

    assert_eq!(outcome, GestureOutcome::Panned);
    assert!(editor.mask().is_none());
}

#[test]
fn test_snapshot_of_empty_mask_is_none() {
    let (editor, _items) = TestEditorBuilder::new().with_image_size(64, 64).build();

    let snapshot = editor.mask_snapshot(&gradient_image(64, 64)).expect("dimensions match");
    assert!(snapshot.is_none());
}

#[test]
fn test_snapshot_without_image_is_error() {
    let (editor, _items) = TestEditorBuilder::new().without_image().build();

    let err = editor.mask_snapshot(&gradient_image(8, 8)).unwrap_err();
    assert!(matches!(err, CanvasError::NoImage));
}

#[test]
fn test_snapshot_rejects_wrong_source_size() {
    let (editor, _items) = TestEditorBuilder::new().with_image_size(64, 64).build();

    let err = editor.mask_snapshot(&gradient_image(32, 64)).unwrap_err();
    assert!(matches!(err, CanvasError::DimensionMismatch { .. }));
}

#[test]
fn test_snapshot_crops_with_padding() {
    let (mut editor, mut items) = TestEditorBuilder::new()
        .with_image_size(200, 200)
        .mask_mode(20.0)
        .build();
    drag_with(&mut editor, &mut items, PointerButton::Primary, &[(100.0, 100.0)]);

    let source = gradient_image(200, 200);
    let snapshot = editor.mask_snapshot(&source).expect("valid").expect("painted");
    let bounds = editor.mask().and_then(|m| m.painted_bounds()).expect("painted");

    assert_eq!(snapshot.region.x, bounds.x - 16);
    assert_eq!(snapshot.region.right(), bounds.right() + 16);
    assert_eq!(snapshot.mask.dimensions(), (snapshot.region.width, snapshot.region.height));
    assert_eq!(snapshot.image.dimensions(), snapshot.mask.dimensions());

    // Crop corner is outside the stroke; crop centre is inside
    assert_eq!(snapshot.mask.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
    let (cx, cy) = (100 - snapshot.region.x, 100 - snapshot.region.y);
    assert_eq!(snapshot.mask.get_pixel(cx, cy), &Rgba([255, 255, 255, 255]));
    assert_eq!(snapshot.image.get_pixel(cx, cy), source.get_pixel(100, 100));
}

#[test]
fn test_payload_is_base64_png_of_crop() {
    let (mut editor, mut items) = TestEditorBuilder::new()
        .with_image_size(120, 120)
        .mask_mode(16.0)
        .build();
    drag_with(&mut editor, &mut items, PointerButton::Primary, &[(60.0, 60.0)]);

    let snapshot = editor
        .mask_snapshot(&gradient_image(120, 120))
        .expect("valid")
        .expect("painted");
    let payload = snapshot.to_payload().expect("encodes");

    for encoded in [&payload.mask_png, &payload.image_png] {
        let bytes = STANDARD.decode(encoded).expect("valid base64");
        let decoded = image::load_from_memory(&bytes).expect("valid png");
        assert_eq!(decoded.width(), payload.region.width);
        assert_eq!(decoded.height(), payload.region.height);
    }
}

#[test]
fn test_inpainted_crop_merges_only_under_mask() {
    let (mut editor, mut items) = TestEditorBuilder::new()
        .with_image_size(100, 100)
        .mask_mode(20.0)
        .build();
    drag_with(&mut editor, &mut items, PointerButton::Primary, &[(50.0, 50.0)]);

    let mut page = gradient_image(100, 100);
    let untouched = page.clone();
    let snapshot = editor.mask_snapshot(&page).expect("valid").expect("painted");
    let inpainted = solid_image(snapshot.region.width, snapshot.region.height, [255, 0, 0, 255]);

    apply_inpainted(&mut page, &snapshot, &inpainted).expect("sizes match");

    assert_eq!(page.get_pixel(50, 50), &Rgba([255, 0, 0, 255]));
    // Inside the padded crop but outside the brush
    let corner = (snapshot.region.x, snapshot.region.y);
    assert_eq!(page.get_pixel(corner.0, corner.1), untouched.get_pixel(corner.0, corner.1));
    assert_eq!(page.get_pixel(0, 0), untouched.get_pixel(0, 0));
}

#[test]
fn test_inpainted_crop_of_wrong_size_is_rejected() {
    let (mut editor, mut items) = TestEditorBuilder::new()
        .with_image_size(100, 100)
        .mask_mode(20.0)
        .build();
    drag_with(&mut editor, &mut items, PointerButton::Primary, &[(50.0, 50.0)]);

    let mut page = gradient_image(100, 100);
    let snapshot = editor.mask_snapshot(&page).expect("valid").expect("painted");
    let wrong = solid_image(3, 3, [0, 0, 0, 255]);

    let err = apply_inpainted(&mut page, &snapshot, &wrong).unwrap_err();
    assert!(matches!(err, CanvasError::DimensionMismatch { .. }));
}

#[test]
fn test_brush_size_is_fixed_for_the_stroke() {
    let (mut editor, mut items) = TestEditorBuilder::new().mask_mode(10.0).build();

    editor.handle_pointer_down(PointerEvent::primary(point(50.0, 50.0)), &mut items);
    let mut modes = editor.modes();
    modes.brush_size = 60.0;
    editor.set_modes(modes);
    editor.handle_pointer_move(point(52.0, 50.0));
    editor.handle_pointer_up(point(52.0, 50.0), &mut items);

    let mask = editor.mask().expect("image loaded");
    assert_eq!(mask.coverage(51, 50), 255);
    assert_eq!(mask.coverage(51, 70), 0);

    // The next stroke picks up the new size
    drag_with(&mut editor, &mut items, PointerButton::Primary, &[(200.0, 150.0)]);
    let mask = editor.mask().expect("image loaded");
    assert_eq!(mask.coverage(200, 170), 255);
}

#[test]
fn test_unload_image_drops_mask_and_undo() {
    let (mut editor, mut items) = TestEditorBuilder::new()
        .edit_mode()
        .with_box(10.0, 10.0, 60.0, 60.0)
        .build();
    drag_with(
        &mut editor,
        &mut items,
        PointerButton::Primary,
        &[(20.0, 20.0), (30.0, 20.0)],
    );
    assert_eq!(editor.undo_len(), 1);

    editor.unload_image();

    assert!(editor.mask().is_none());
    assert_eq!(editor.image_size(), None);
    assert_eq!(editor.undo_len(), 0);
    let err = editor.mask_snapshot(&gradient_image(8, 8)).unwrap_err();
    assert!(matches!(err, CanvasError::NoImage));
}

#[test]
fn test_clear_mask() {
    let (mut editor, mut items) = TestEditorBuilder::new().mask_mode(20.0).build();
    drag_with(&mut editor, &mut items, PointerButton::Primary, &[(50.0, 50.0)]);

    editor.clear_mask();

    assert!(editor.mask().is_some_and(|m| m.is_empty()));
}

#[test]
fn test_image_change_resets_mask_and_viewport() {
    let (mut editor, mut items) = TestEditorBuilder::new()
        .mask_mode(20.0)
        .with_viewport(3.0, 40.0, 40.0)
        .build();
    drag_with(&mut editor, &mut items, PointerButton::Primary, &[(200.0, 200.0)]);

    editor.load_image(800, 600, false).expect("image loads");
    let mask = editor.mask().expect("mask allocated");
    assert!(mask.is_empty());
    assert_eq!((mask.width(), mask.height()), (800, 600));
    assert_eq!(editor.viewport().scale, 1.0);
    assert_eq!(editor.viewport().offset_x, 0.0);

    editor.set_viewport(bubbleboard::viewport::Viewport::new(2.0, 5.0, 5.0));
    editor.load_image(800, 600, true).expect("image loads");
    assert_eq!(editor.viewport().scale, 2.0);
}

#[test]
fn test_zero_sized_image_is_rejected() {
    let (mut editor, _items) = TestEditorBuilder::new().build();

    let err = editor.load_image(0, 600, false).unwrap_err();
    assert!(matches!(err, CanvasError::EmptyImage { .. }));
}
