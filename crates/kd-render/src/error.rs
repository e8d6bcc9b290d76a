//! Rasterization error types.

use thiserror::Error;

/// Errors that can occur while flattening or encoding a drawing.
#[derive(Error, Debug)]
pub enum RasterError {
    /// The requested raster dimensions cannot back a pixel surface.
    #[error("cannot allocate a {width}x{height} raster surface")]
    BadDimensions { width: u32, height: u32 },

    /// A supplied background picture could not be decoded.
    #[error("background image decode failed: {0}")]
    Decode(#[from] image::ImageError),

    /// PNG encoding of the flattened surface failed.
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}
