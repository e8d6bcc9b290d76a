//! Asynchronous PNG export.
//!
//! Export must not block the event-processing context: the caller takes a
//! snapshot on the interactive side, and the flatten + encode + write run
//! on the blocking pool. The outcome comes back through the task handle —
//! there is no ambient progress state to dismiss, and no retry. Aborting
//! the task between stages cancels the export.

use kd_render::{RasterError, SceneSnapshot, encode_png, flatten};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tokio::task::{self, JoinHandle};

/// MIME type handed to share collaborators.
pub const PNG_MIME: &str = "image/png";

/// File name for an export taken at the given Unix timestamp.
pub fn export_file_name(unix_seconds: u64) -> String {
    format!("KidsDrawingApp_{unix_seconds}.png")
}

/// Successful export: where the PNG landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub path: PathBuf,
}

/// Why an export failed. Surfaced to the user as a notification; the task
/// completes in this state and any progress indicator is dismissed.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Raster(#[from] RasterError),

    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("share hand-off failed: {0}")]
    Share(#[source] io::Error),

    #[error("export was cancelled")]
    Cancelled,
}

/// A collaborator that can hand a finished file to another app or service.
pub trait ShareSink: Send + Sync {
    fn send(&self, file: &Path, mime: &str) -> io::Result<()>;
}

/// Handle to an in-flight export.
#[derive(Debug)]
pub struct ExportTask {
    handle: JoinHandle<Result<SavedFile, ExportError>>,
}

impl ExportTask {
    /// Abort the export. A cancelled task reports `ExportError::Cancelled`
    /// from [`ExportTask::outcome`].
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Wait for the export to finish and take its result.
    pub async fn outcome(self) -> Result<SavedFile, ExportError> {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(join) if join.is_cancelled() => Err(ExportError::Cancelled),
            Err(join) => std::panic::resume_unwind(join.into_panic()),
        }
    }
}

/// Flatten `snapshot` and write it under `dir` as
/// `KidsDrawingApp_<unix-seconds>.png`.
///
/// Must be called from within a tokio runtime.
pub fn save(snapshot: SceneSnapshot, dir: impl Into<PathBuf>) -> ExportTask {
    spawn(snapshot, dir.into(), None)
}

/// Like [`save`], then hand the written file to `sink` as `image/png`.
pub fn share(snapshot: SceneSnapshot, dir: impl Into<PathBuf>, sink: Arc<dyn ShareSink>) -> ExportTask {
    spawn(snapshot, dir.into(), Some(sink))
}

fn spawn(snapshot: SceneSnapshot, dir: PathBuf, sink: Option<Arc<dyn ShareSink>>) -> ExportTask {
    ExportTask {
        handle: tokio::spawn(run(snapshot, dir, sink)),
    }
}

async fn run(
    snapshot: SceneSnapshot,
    dir: PathBuf,
    sink: Option<Arc<dyn ShareSink>>,
) -> Result<SavedFile, ExportError> {
    let bytes = run_blocking(move || -> Result<Vec<u8>, ExportError> {
        let pixmap = flatten(&snapshot)?;
        Ok(encode_png(&pixmap)?)
    })
    .await?;

    let path = dir.join(export_file_name(unix_seconds_now()));
    let saved = {
        let path = path.clone();
        run_blocking(move || match std::fs::write(&path, &bytes) {
            Ok(()) => Ok(SavedFile { path }),
            Err(source) => Err(ExportError::Write { path, source }),
        })
        .await?
    };

    log::info!("drawing exported to {}", saved.path.display());

    if let Some(sink) = sink {
        let shared = {
            let path = saved.path.clone();
            run_blocking(move || sink.send(&path, PNG_MIME)).await
        };
        shared.map_err(ExportError::Share)?;
    }

    Ok(saved)
}

/// Run blocking work off the async path, forwarding panics.
async fn run_blocking<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    match task::spawn_blocking(f).await {
        Ok(value) => value,
        Err(join) => std::panic::resume_unwind(join.into_panic()),
    }
}

fn unix_seconds_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
