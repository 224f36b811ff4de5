//! Error types for the canvas core
//!
//! Geometry that is too small and empty masks are not errors; they are reported
//! through `bool`/`Option` returns at the call site.

use thiserror::Error;

/// Errors that can occur in canvas operations
#[derive(Error, Debug)]
pub enum CanvasError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// A configuration value is out of range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Rasters cannot be allocated with a zero dimension
    #[error("Image has zero size: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    /// Two rasters that must line up pixel for pixel do not
    #[error("Dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Operation needs a loaded image
    #[error("No image loaded")]
    NoImage,
}

/// Result type alias for canvas operations
pub type CanvasResult<T> = Result<T, CanvasError>;
