//! Scene building - turns controller and store state into a display list.
//!
//! Primitives are in image space. Line widths and handle sizes are already
//! divided by the viewport scale so they come out constant on screen.
//!
//! In mask mode only the red mask preview and the brush outline are shown;
//! boxes, badges, and handles are hidden.

use crate::constants::{
    BOX_COLOR, BOX_LINE_WIDTH, BRUSH_OUTLINE_COLOR, DRAWING_COLOR, DRAWING_LINE_WIDTH,
    LABEL_FONT_SIZE, MASK_TINT, SELECTED_COLOR, SELECTED_LINE_WIDTH,
};
use crate::geometry::Handle;
use crate::input::{BubbleStore, InteractionController, InteractionState};
use crate::profile_scope;
use crate::types::{BoundingBox, DetectedItem, Point, TextProperties};
use crate::viewport::Viewport;

/// One thing to draw
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// The mask raster, tinted, blended over the image at `opacity`
    MaskOverlay { tint: [u8; 4], opacity: f32 },
    /// Rectangle outline
    BoxOutline {
        bbox: BoundingBox,
        color: [u8; 4],
        width: f32,
    },
    /// Filled id badge at a box's top-left corner
    Label {
        bbox: BoundingBox,
        text: String,
        color: [u8; 4],
        font_size: f32,
    },
    /// Translated text laid out inside a box; glyph shaping is left to the host
    Text {
        bbox: BoundingBox,
        text: String,
        properties: TextProperties,
    },
    /// Filled square resize handle
    Handle { rect: BoundingBox, color: [u8; 4] },
    /// Brush preview circle
    BrushOutline {
        center: Point,
        radius: f32,
        color: [u8; 4],
        width: f32,
    },
}

/// Display list for one frame
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub viewport: Viewport,
    pub primitives: Vec<Primitive>,
}

impl Scene {
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

/// Build the display list for the current frame
pub fn build_scene<S: BubbleStore + ?Sized>(
    controller: &InteractionController,
    store: &S,
) -> Scene {
    profile_scope!("build_scene");

    let viewport = controller.viewport();
    let scale = viewport.scale;
    let modes = controller.modes();
    let mut primitives = Vec::new();

    if modes.mask_mode {
        if controller.mask().is_some() {
            primitives.push(Primitive::MaskOverlay {
                tint: MASK_TINT,
                opacity: controller.config().mask_overlay_opacity,
            });
        }
        let brush_size = match controller.state() {
            InteractionState::Masking { brush_size, .. } => *brush_size,
            _ => modes.brush_size,
        };
        if let Some(screen) = controller.last_pointer() {
            primitives.push(Primitive::BrushOutline {
                center: viewport.screen_to_image(screen),
                radius: brush_size / 2.0,
                color: BRUSH_OUTLINE_COLOR,
                width: 1.0 / scale,
            });
        }
        return Scene { viewport, primitives };
    }

    let state = controller.state();
    let active = state.active_item_id().zip(state.transient_box());
    let shown_box = |item: &DetectedItem| match active {
        Some((id, bbox)) if id == item.id => bbox,
        _ => item.bbox,
    };
    let selected = store.selected_id();

    for item in store.items() {
        let bbox = shown_box(item);
        let is_selected = selected == Some(item.id);
        let color = if is_selected { SELECTED_COLOR } else { BOX_COLOR };
        let width = if is_selected { SELECTED_LINE_WIDTH } else { BOX_LINE_WIDTH };
        primitives.push(Primitive::BoxOutline {
            bbox,
            color,
            width: width / scale,
        });

        match (&item.translation, modes.edit_mode) {
            (Some(text), true) => primitives.push(Primitive::Text {
                bbox,
                text: text.clone(),
                properties: item.text_properties.clone().unwrap_or_default(),
            }),
            _ => primitives.push(Primitive::Label {
                bbox,
                text: item.id.to_string(),
                color,
                font_size: LABEL_FONT_SIZE / scale,
            }),
        }
    }

    if modes.edit_mode {
        if let Some(item) = selected.and_then(|id| store.item(id)) {
            let bbox = shown_box(item);
            let half = controller.config().handle_size / scale / 2.0;
            for handle in Handle::ALL {
                let c = handle.position(&bbox);
                primitives.push(Primitive::Handle {
                    rect: BoundingBox::new(c.x - half, c.y - half, c.x + half, c.y + half),
                    color: SELECTED_COLOR,
                });
            }
        }
    }

    if let Some(bbox) = state.drawing_box() {
        primitives.push(Primitive::BoxOutline {
            bbox,
            color: DRAWING_COLOR,
            width: DRAWING_LINE_WIDTH / scale,
        });
    }

    tracing::trace!(primitives = primitives.len(), "Scene built");
    Scene { viewport, primitives }
}
