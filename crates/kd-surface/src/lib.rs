pub mod events;
pub mod export;
pub mod surface;

pub use events::PointerEvent;
pub use export::{ExportError, ExportTask, PNG_MIME, SavedFile, ShareSink, export_file_name};
pub use surface::DrawingSurface;

// Re-export the model and render types that appear in this crate's API,
// so adapters don't need direct kd-core/kd-render dependencies.
pub use kd_core::{Brush, Color, DrawingState, Point, Smoothing, Stroke};
pub use kd_render::{Backdrop, BackdropImage, RasterError, SceneSnapshot};
