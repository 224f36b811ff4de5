//! Mask layer - freeform raster marking pixels for inpainting.
//!
//! Strokes are stored as opaque white on a transparent background at the image's
//! native size. Painting composites source-over; erasing composites
//! destination-out so pixels are removed rather than painted black.
//!
//! ## Export
//!
//! ```text
//! painted bounds (alpha > 0) --pad--> crop region
//!   crop of the raster flattened on black, binarized  -> mask
//!   crop of the source image                          -> image
//! ```
//!
//! The inpainting collaborator never receives a full page for a small edit.

use crate::constants::{BRUSH_DAB_SPACING, MASK_WHITE_THRESHOLD};
use crate::error::{CanvasError, CanvasResult};
use crate::profile_scope;
use crate::types::{Point, point};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, Rgba, RgbaImage, imageops};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use tiny_skia::{BlendMode, Color, ColorU8, FillRule, Paint, PathBuilder, Pixmap, Transform};

/// Half-open pixel rectangle `[x, x + width) x [y, y + height)`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Grow by `padding` on every side, clipped to `[0, max_w) x [0, max_h)`
    pub fn padded(&self, padding: u32, max_w: u32, max_h: u32) -> Self {
        let x = self.x.saturating_sub(padding);
        let y = self.y.saturating_sub(padding);
        let right = self.right().saturating_add(padding).min(max_w);
        let bottom = self.bottom().saturating_add(padding).min(max_h);
        Self {
            x,
            y,
            width: right - x,
            height: bottom - y,
        }
    }
}

/// One raster per displayed image
#[derive(Clone)]
pub struct MaskLayer {
    pixmap: Pixmap,
}

impl std::fmt::Debug for MaskLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaskLayer")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl MaskLayer {
    /// Allocate a transparent mask at the image's native size
    pub fn new(width: u32, height: u32) -> CanvasResult<Self> {
        let pixmap = Pixmap::new(width, height).ok_or(CanvasError::EmptyImage { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Read-only view of the raw stroke raster (premultiplied RGBA)
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Paint or erase one circular dab of diameter `brush_size`
    pub fn dab(&mut self, center: Point, brush_size: f32, erase: bool) {
        profile_scope!("mask_dab");

        let radius = brush_size / 2.0;
        if !(radius > 0.0) {
            return;
        }
        let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) else {
            return;
        };

        let mut paint = Paint::default();
        paint.anti_alias = true;
        paint.set_color(Color::WHITE);
        paint.blend_mode = if erase {
            BlendMode::DestinationOut
        } else {
            BlendMode::SourceOver
        };
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    /// Dab along the segment `from -> to`, excluding `from` which the previous
    /// event already painted.
    pub fn stroke(&mut self, from: Point, to: Point, brush_size: f32, erase: bool) {
        let spacing = (brush_size * BRUSH_DAB_SPACING).max(1.0);
        let steps = (from.distance(to) / spacing).ceil().max(1.0) as usize;
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            let p = point(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
            self.dab(p, brush_size, erase);
        }
    }

    pub fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    pub fn is_empty(&self) -> bool {
        self.pixmap.pixels().iter().all(|p| p.alpha() == 0)
    }

    /// Bounding box of non-transparent pixels, `None` if nothing is painted
    pub fn painted_bounds(&self) -> Option<PixelRect> {
        profile_scope!("mask_bounds");

        let width = self.width() as usize;
        let (mut min_x, mut min_y) = (usize::MAX, usize::MAX);
        let (mut max_x, mut max_y) = (0usize, 0usize);
        let mut any = false;

        for (i, px) in self.pixmap.pixels().iter().enumerate() {
            if px.alpha() == 0 {
                continue;
            }
            let (x, y) = (i % width, i / width);
            any = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        any.then(|| PixelRect {
            x: min_x as u32,
            y: min_y as u32,
            width: (max_x - min_x + 1) as u32,
            height: (max_y - min_y + 1) as u32,
        })
    }

    /// Stroke coverage (0..=255) at a pixel; out of range reads as 0
    #[inline]
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        self.pixmap.pixel(x, y).map(|p| p.alpha()).unwrap_or(0)
    }

    /// Flatten onto an opaque black background: white strokes, black elsewhere
    pub fn flatten(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            let v = self.coverage(x, y);
            Rgba([v, v, v, 255])
        })
    }

    /// Stroke raster recoloured with `tint`, for on-canvas preview
    pub fn tinted(&self, tint: [u8; 4]) -> Pixmap {
        let mut out = self.pixmap.clone();
        let [r, g, b, a] = tint;
        for px in out.pixels_mut() {
            let alpha = ((px.alpha() as u16 * a as u16) / 255) as u8;
            *px = ColorU8::from_rgba(r, g, b, alpha).premultiply();
        }
        out
    }

    /// Crop the painted region (plus `padding`) from the mask and from `source`.
    ///
    /// Returns `Ok(None)` when nothing is painted, so an all-black mask is never
    /// handed to the inpainting collaborator.
    pub fn snapshot(&self, source: &RgbaImage, padding: u32) -> CanvasResult<Option<MaskSnapshot>> {
        let size = (self.width(), self.height());
        if source.dimensions() != size {
            return Err(CanvasError::DimensionMismatch {
                expected: size,
                actual: source.dimensions(),
            });
        }

        let Some(bounds) = self.painted_bounds() else {
            tracing::debug!("Mask snapshot requested with no painted pixels");
            return Ok(None);
        };
        let region = bounds.padded(padding, size.0, size.1);

        let mut white = 0usize;
        let mask = RgbaImage::from_fn(region.width, region.height, |x, y| {
            let v = if self.coverage(region.x + x, region.y + y) > MASK_WHITE_THRESHOLD {
                white += 1;
                255
            } else {
                0
            };
            Rgba([v, v, v, 255])
        });
        if white == 0 {
            tracing::debug!(?bounds, "Mask strokes too faint to export");
            return Ok(None);
        }

        let image =
            imageops::crop_imm(source, region.x, region.y, region.width, region.height).to_image();
        tracing::debug!(?region, white, "Mask snapshot taken");
        Ok(Some(MaskSnapshot {
            region,
            source_size: size,
            mask,
            image,
        }))
    }
}

/// Cropped mask/image pair for one inpainting request
#[derive(Clone, Debug)]
pub struct MaskSnapshot {
    /// Crop rectangle in source image pixels
    pub region: PixelRect,
    /// Size of the full source image
    pub source_size: (u32, u32),
    /// Black background, white strokes, opaque
    pub mask: RgbaImage,
    /// Matching crop of the source image
    pub image: RgbaImage,
}

/// Wire form of a [`MaskSnapshot`]: base64 PNGs plus the crop rectangle
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InpaintPayload {
    pub region: PixelRect,
    pub mask_png: String,
    pub image_png: String,
}

impl MaskSnapshot {
    pub fn to_payload(&self) -> CanvasResult<InpaintPayload> {
        Ok(InpaintPayload {
            region: self.region,
            mask_png: encode_png_base64(&self.mask)?,
            image_png: encode_png_base64(&self.image)?,
        })
    }

    /// True if the crop pixel is part of the mask
    #[inline]
    pub fn is_masked(&self, x: u32, y: u32) -> bool {
        self.mask.get_pixel_checked(x, y).is_some_and(|p| p[0] == 255)
    }
}

fn encode_png_base64(img: &RgbaImage) -> CanvasResult<String> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(STANDARD.encode(bytes))
}

/// Write an inpainted crop back into the full image, only where the mask is white
pub fn apply_inpainted(
    target: &mut RgbaImage,
    snapshot: &MaskSnapshot,
    result: &RgbaImage,
) -> CanvasResult<()> {
    if target.dimensions() != snapshot.source_size {
        return Err(CanvasError::DimensionMismatch {
            expected: snapshot.source_size,
            actual: target.dimensions(),
        });
    }
    let crop_size = (snapshot.region.width, snapshot.region.height);
    if result.dimensions() != crop_size {
        return Err(CanvasError::DimensionMismatch {
            expected: crop_size,
            actual: result.dimensions(),
        });
    }

    let mut replaced = 0usize;
    for (x, y, px) in result.enumerate_pixels() {
        if snapshot.is_masked(x, y) {
            target.put_pixel(snapshot.region.x + x, snapshot.region.y + y, *px);
            replaced += 1;
        }
    }
    tracing::debug!(replaced, region = ?snapshot.region, "Merged inpainted crop");
    Ok(())
}
