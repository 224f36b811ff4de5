//! Software rasterizer for scenes, built on tiny-skia.
//!
//! The image-to-screen transform is applied once for the whole scene. Glyphs
//! are not rasterized: badges are drawn as filled plates and `Text`
//! primitives are skipped, leaving typesetting to the host.

use super::scene::{Primitive, Scene, build_scene};
use crate::error::{CanvasError, CanvasResult};
use crate::input::{BubbleStore, InteractionController};
use crate::mask::MaskLayer;
use crate::profile_scope;
use crate::types::BoundingBox;
use tiny_skia::{FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke, Transform};

/// Badge width per character, relative to the font size
const GLYPH_WIDTH_RATIO: f32 = 0.6;

/// Badge height relative to the font size
const BADGE_TEXT_HEIGHT_RATIO: f32 = 0.8;

/// Badge padding in screen pixels
const BADGE_PADDING: f32 = 8.0;

/// Rasterize the current frame into a new `width` x `height` pixmap
pub fn render<S: BubbleStore + ?Sized>(
    controller: &InteractionController,
    store: &S,
    width: u32,
    height: u32,
) -> CanvasResult<Pixmap> {
    let mut target = Pixmap::new(width, height).ok_or(CanvasError::EmptyImage { width, height })?;
    let scene = build_scene(controller, store);
    paint(&scene, controller.mask(), &mut target);
    Ok(target)
}

/// Paint `scene` over `target`. `mask` is only read for `MaskOverlay`.
pub fn paint(scene: &Scene, mask: Option<&MaskLayer>, target: &mut Pixmap) {
    profile_scope!("paint_scene");

    let vp = scene.viewport;
    let transform = Transform::from_row(vp.scale, 0.0, 0.0, vp.scale, vp.offset_x, vp.offset_y);
    let mut skipped = 0usize;

    for primitive in &scene.primitives {
        match primitive {
            Primitive::MaskOverlay { tint, opacity } => {
                let Some(mask) = mask else {
                    skipped += 1;
                    continue;
                };
                let tinted = mask.tinted(*tint);
                let pixmap_paint = PixmapPaint {
                    opacity: *opacity,
                    quality: FilterQuality::Nearest,
                    ..PixmapPaint::default()
                };
                target.draw_pixmap(0, 0, tinted.as_ref(), &pixmap_paint, transform, None);
            }
            Primitive::BoxOutline { bbox, color, width } => {
                stroke_rect(target, bbox, *color, *width, transform);
            }
            Primitive::Label {
                bbox,
                text,
                color,
                font_size,
            } => {
                let pad = BADGE_PADDING / vp.scale;
                let plate = BoundingBox::new(
                    bbox.x1,
                    bbox.y1,
                    bbox.x1 + text.chars().count() as f32 * font_size * GLYPH_WIDTH_RATIO + pad,
                    bbox.y1 + font_size * BADGE_TEXT_HEIGHT_RATIO + pad,
                );
                fill_rect(target, &plate, *color, transform);
            }
            Primitive::Text { .. } => skipped += 1,
            Primitive::Handle { rect, color } => fill_rect(target, rect, *color, transform),
            Primitive::BrushOutline {
                center,
                radius,
                color,
                width,
            } => {
                let Some(path) = PathBuilder::from_circle(center.x, center.y, *radius) else {
                    continue;
                };
                let stroke = Stroke {
                    width: *width,
                    ..Stroke::default()
                };
                target.stroke_path(&path, &solid(*color), &stroke, transform, None);
            }
        }
    }

    tracing::trace!(primitives = scene.len(), skipped, "Scene painted");
}

fn solid(color: [u8; 4]) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.anti_alias = true;
    let [r, g, b, a] = color;
    paint.set_color_rgba8(r, g, b, a);
    paint
}

fn to_rect(bbox: &BoundingBox) -> Option<Rect> {
    let b = bbox.normalized();
    Rect::from_ltrb(b.x1, b.y1, b.x2, b.y2)
}

fn fill_rect(target: &mut Pixmap, bbox: &BoundingBox, color: [u8; 4], transform: Transform) {
    if let Some(rect) = to_rect(bbox) {
        target.fill_rect(rect, &solid(color), transform, None);
    }
}

fn stroke_rect(
    target: &mut Pixmap,
    bbox: &BoundingBox,
    color: [u8; 4],
    width: f32,
    transform: Transform,
) {
    let Some(rect) = to_rect(bbox) else {
        return;
    };
    let path = PathBuilder::from_rect(rect);
    let stroke = Stroke {
        width,
        ..Stroke::default()
    };
    target.stroke_path(&path, &solid(color), &stroke, transform, None);
}
