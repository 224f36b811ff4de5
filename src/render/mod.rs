//! Rendering - display list building and software rasterization.
//!
//! - `scene` - builds a [`Scene`] of image-space primitives from controller and store state
//! - `raster` - paints a scene into a tiny-skia pixmap

pub mod raster;
pub mod scene;

pub use raster::{paint, render};
pub use scene::{Primitive, Scene, build_scene};
