//! Stroke history: the undo-visible drawing state.
//!
//! Linear undo/redo over whole strokes — two stacks, nothing fancier.
//! Undo pops the newest committed stroke onto the redo buffer; committing
//! a fresh stroke invalidates the forward history. This is deliberately
//! not a command tree; the drawing is small, interactive input.

use crate::model::{Brush, Point, Stroke};

/// The committed / redo-buffer / active triple that a drawing surface owns.
///
/// Committed strokes are ordered bottom-to-top (insertion order = z-order).
/// `active` is populated only between a pointer-down and the matching
/// pointer-up. All mutators return whether anything changed, so callers
/// can decide what to repaint.
#[derive(Debug, Clone, Default)]
pub struct DrawingState {
    committed: Vec<Stroke>,
    redo_buffer: Vec<Stroke>,
    active: Option<Stroke>,
}

impl DrawingState {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Stroke lifecycle ────────────────────────────────────────────────

    /// Begin a new active stroke at the pointer-down position.
    /// Returns `false` (and leaves state untouched) if a stroke is
    /// already active.
    pub fn begin(&mut self, brush: Brush, at: Point) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(Stroke::start(brush, at));
        true
    }

    /// Append a point to the active stroke. `false` if none is active.
    pub fn extend(&mut self, p: Point) -> bool {
        match self.active.as_mut() {
            Some(stroke) => {
                stroke.push(p);
                true
            }
            None => false,
        }
    }

    /// Finalize the active stroke: append it to the committed history and
    /// clear the redo buffer. `false` if no stroke is active.
    pub fn commit(&mut self) -> bool {
        match self.active.take() {
            Some(stroke) => {
                log::trace!(
                    "commit stroke #{} ({} points)",
                    self.committed.len(),
                    stroke.points().len()
                );
                self.committed.push(stroke);
                self.redo_buffer.clear();
                true
            }
            None => false,
        }
    }

    // ─── Undo / redo ─────────────────────────────────────────────────────

    /// Move the newest committed stroke to the redo buffer.
    /// No-op (returns `false`) when the history is empty.
    pub fn undo(&mut self) -> bool {
        match self.committed.pop() {
            Some(stroke) => {
                self.redo_buffer.push(stroke);
                true
            }
            None => false,
        }
    }

    /// Restore the most recently undone stroke.
    /// No-op (returns `false`) when the redo buffer is empty.
    pub fn redo(&mut self) -> bool {
        match self.redo_buffer.pop() {
            Some(stroke) => {
                self.committed.push(stroke);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_buffer.is_empty()
    }

    /// Drop everything: committed history, redo buffer, and any active
    /// stroke. The explicit whole-canvas reset.
    pub fn clear(&mut self) {
        self.committed.clear();
        self.redo_buffer.clear();
        self.active = None;
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    /// Committed strokes, bottom-to-top.
    pub fn committed(&self) -> &[Stroke] {
        &self.committed
    }

    /// The in-progress stroke, if a gesture is underway.
    pub fn active(&self) -> Option<&Stroke> {
        self.active.as_ref()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_buffer.len()
    }

    /// Immutable copy of everything that would render right now:
    /// committed strokes bottom-to-top, then the active stroke on top.
    /// This is the hand-off for export, so concurrent pointer input
    /// cannot touch the in-flight copy.
    pub fn snapshot(&self) -> Vec<Stroke> {
        let mut strokes = self.committed.clone();
        strokes.extend(self.active.clone());
        strokes
    }
}
