//! The background layer beneath all strokes.
//!
//! A backdrop is a solid fill plus an optional externally supplied picture
//! (e.g. from a gallery picker), scaled to cover the surface. It sits
//! below every stroke and is not part of the undo model.

use crate::error::RasterError;
use kd_core::Color;
use std::fmt;
use std::sync::Arc;
use tiny_skia::{ColorU8, Pixmap};

/// A decoded background picture, ready to composite.
///
/// The pixel data is shared, so cloning a backdrop into an export snapshot
/// is cheap.
#[derive(Clone)]
pub struct BackdropImage {
    pixels: Arc<Pixmap>,
}

impl fmt::Debug for BackdropImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackdropImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl BackdropImage {
    /// Decode an encoded image (PNG, JPEG) into premultiplied RGBA pixels.
    pub fn decode(bytes: &[u8]) -> Result<Self, RasterError> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();

        let mut pixmap =
            Pixmap::new(width, height).ok_or(RasterError::BadDimensions { width, height })?;
        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgba.pixels()) {
            let [r, g, b, a] = src.0;
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }

        log::debug!("decoded {width}x{height} backdrop image");
        Ok(Self {
            pixels: Arc::new(pixmap),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub(crate) fn pixmap(&self) -> &Pixmap {
        &self.pixels
    }
}

/// Solid fill plus optional picture. Defaults to plain white.
#[derive(Debug, Clone)]
pub struct Backdrop {
    pub color: Color,
    pub image: Option<BackdropImage>,
}

impl Default for Backdrop {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            image: None,
        }
    }
}

impl Backdrop {
    pub fn solid(color: Color) -> Self {
        Self {
            color,
            image: None,
        }
    }
}
