//! Flattening a drawing into a single opaque raster for export.

use crate::backdrop::Backdrop;
use crate::error::RasterError;
use crate::paint;
use kd_core::Stroke;
use tiny_skia::Pixmap;

/// An immutable copy of everything needed to rasterize a drawing.
///
/// Taken on the interactive context and handed to the export task, so
/// concurrent pointer input and the in-flight export cannot touch each
/// other's data.
#[derive(Debug, Clone)]
pub struct SceneSnapshot {
    pub width: u32,
    pub height: u32,
    pub backdrop: Backdrop,
    /// Committed strokes bottom-to-top, active stroke (if any) last.
    pub strokes: Vec<Stroke>,
}

/// Composite the snapshot into an opaque raster.
///
/// Pure function of the snapshot: identical input yields a bit-identical
/// surface. The backdrop color is forced opaque so the export never
/// carries transparency.
pub fn flatten(snapshot: &SceneSnapshot) -> Result<Pixmap, RasterError> {
    let mut pixmap =
        Pixmap::new(snapshot.width, snapshot.height).ok_or(RasterError::BadDimensions {
            width: snapshot.width,
            height: snapshot.height,
        })?;

    let backdrop = Backdrop {
        color: snapshot.backdrop.color.opaque(),
        image: snapshot.backdrop.image.clone(),
    };
    paint::render(&mut pixmap, &backdrop, &snapshot.strokes);
    Ok(pixmap)
}

/// Encode a flattened surface as a PNG byte stream.
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, RasterError> {
    pixmap
        .encode_png()
        .map_err(|e| RasterError::Encode(e.to_string()))
}
