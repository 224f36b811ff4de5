//! Geometry and viewport tests through the public API.

use crate::helpers::assert_valid_box;
use bubbleboard::geometry::{Handle, draw_box, handle_at, hit_tolerance, resize_box};
use bubbleboard::types::{BoundingBox, point};
use bubbleboard::viewport::Viewport;

#[test]
fn test_tolerance_halves_when_scale_doubles() {
    for scale in [0.1, 0.25, 0.5, 1.0, 3.0, 7.5] {
        let here = hit_tolerance(10.0, 12.0, scale);
        let doubled = hit_tolerance(10.0, 12.0, scale * 2.0);
        assert_eq!(doubled, here / 2.0, "scale {scale}");
    }
}

#[test]
fn test_handle_size_above_floor_wins() {
    assert_eq!(hit_tolerance(20.0, 12.0, 1.0), 20.0);
}

#[test]
fn test_handle_zone_tracks_zoom() {
    let bbox = BoundingBox::new(100.0, 100.0, 200.0, 200.0);
    // 5 screen px from the corner stays inside the 6 px half-zone at any zoom
    for scale in [0.5, 1.0, 4.0] {
        let vp = Viewport::new(scale, 13.0, -7.0);
        let corner = vp.image_to_screen(point(200.0, 200.0));
        let near = vp.screen_to_image(point(corner.x + 5.0, corner.y - 5.0));
        let far = vp.screen_to_image(point(corner.x + 7.0, corner.y));
        let tol = hit_tolerance(10.0, 12.0, scale);
        assert_eq!(handle_at(near, &bbox, tol), Some(Handle::BottomRight), "scale {scale}");
        assert_eq!(handle_at(far, &bbox, tol), None, "scale {scale}");
    }
}

#[test]
fn test_resize_output_is_always_valid() {
    let initial = BoundingBox::new(50.0, 50.0, 150.0, 120.0);
    let pointers = [-100.0, 0.0, 49.0, 51.0, 55.0, 100.0, 119.0, 121.0, 149.0, 151.0, 400.0];

    for handle in Handle::ALL {
        for &x in &pointers {
            for &y in &pointers {
                let r = resize_box(&initial, handle, point(x, y), 8.0);
                assert_valid_box(&r, 8.0);
            }
        }
    }
}

#[test]
fn test_resize_leaves_unowned_edges() {
    let initial = BoundingBox::new(50.0, 50.0, 150.0, 120.0);

    let r = resize_box(&initial, Handle::Left, point(10.0, 500.0), 8.0);
    assert_eq!((r.y1, r.y2, r.x2), (50.0, 120.0, 150.0));

    let r = resize_box(&initial, Handle::Bottom, point(-500.0, 200.0), 8.0);
    assert_eq!((r.x1, r.x2, r.y1), (50.0, 150.0, 50.0));
}

#[test]
fn test_draw_box_is_normalized_in_every_direction() {
    let start = point(100.0, 100.0);
    for (dx, dy) in [(30.0, 20.0), (-30.0, 20.0), (30.0, -20.0), (-30.0, -20.0)] {
        let b = draw_box(start, point(100.0 + dx, 100.0 + dy));
        assert!(b.is_normalized());
        assert_eq!((b.width(), b.height()), (30.0, 20.0));
    }
}

#[test]
fn test_screen_image_inverse() {
    let vp = Viewport::new(2.5, -40.0, 12.0);
    let p = point(37.5, 80.0);
    assert_eq!(vp.screen_to_image(vp.image_to_screen(p)), p);
    assert_eq!(vp.screen_len_to_image(25.0), 10.0);
}
