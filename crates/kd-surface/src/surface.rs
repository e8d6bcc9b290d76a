//! The drawing surface: pointer protocol, brush state, and repaint hints.
//!
//! `DrawingSurface` is a pure state+render component. A platform adapter
//! forwards pointer events and reads `take_damage()` to decide what to
//! repaint; nothing here inherits from or calls into a UI toolkit.
//!
//! The pointer protocol is defensive: the input layer is not
//! contractually glitch-free, so a down-while-active or a move/up with no
//! active stroke is absorbed as a logged no-op, never an error.

use kd_core::{Brush, Color, DrawingState, Point, Smoothing};
use kd_render::{Backdrop, BackdropImage, RasterError, SceneSnapshot};
use kurbo::Rect;
use tiny_skia::Pixmap;

/// Owns the stroke history, the current brush, and the background layer
/// for one drawing screen.
#[derive(Debug)]
pub struct DrawingSurface {
    width: u32,
    height: u32,
    brush: Brush,
    state: DrawingState,
    backdrop: Backdrop,
    /// Region touched since the last `take_damage()`, in surface space.
    damage: Option<Rect>,
}

impl DrawingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            brush: Brush::default(),
            state: DrawingState::new(),
            backdrop: Backdrop::default(),
            damage: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    // ─── Brush configuration ─────────────────────────────────────────────

    pub fn brush(&self) -> Brush {
        self.brush
    }

    /// Set the brush color from a specification string (named or hex).
    ///
    /// Applies to the *next* stroke only. Unparseable input keeps the
    /// prior color — this is a cosmetic control, not a correctness path.
    /// Parsed colors are forced fully opaque.
    pub fn set_brush_color(&mut self, spec: &str) {
        match Color::parse(spec) {
            Some(color) => self.brush.color = color.opaque(),
            None => log::warn!("ignoring unparseable brush color {spec:?}"),
        }
    }

    /// Set the stroke width for the next stroke. Must be positive and
    /// finite; anything else keeps the prior width.
    pub fn set_brush_width(&mut self, px: f32) {
        if px.is_finite() && px > 0.0 {
            self.brush.width = px;
        } else {
            log::warn!("ignoring non-positive brush width {px}");
        }
    }

    pub fn set_smoothing(&mut self, smoothing: Smoothing) {
        self.brush.smoothing = smoothing;
    }

    // ─── Background layer ────────────────────────────────────────────────

    /// Replace the solid background fill. Not part of the undo model.
    pub fn set_background_color(&mut self, color: Color) {
        self.backdrop.color = color;
        self.mark_all_damaged();
    }

    /// Put an externally supplied picture beneath all strokes.
    pub fn set_background_image(&mut self, image: BackdropImage) {
        self.backdrop.image = Some(image);
        self.mark_all_damaged();
    }

    // ─── Pointer protocol ────────────────────────────────────────────────

    /// Begin a stroke with the current brush at the touch position.
    pub fn on_pointer_down(&mut self, p: Point) {
        if self.state.begin(self.brush, p) {
            self.add_damage(self.state.active().map(|s| s.bounds()));
        } else {
            log::debug!("pointer down while a stroke is active; ignored");
        }
    }

    /// Grow the active stroke. A move with no active stroke can occur at
    /// event-stream edges and is absorbed.
    pub fn on_pointer_move(&mut self, p: Point) {
        if self.state.extend(p) {
            self.add_damage(self.state.active().map(|s| s.last_segment_bounds()));
        } else {
            log::debug!("pointer move with no active stroke; ignored");
        }
    }

    /// Finalize the active stroke into the committed history.
    pub fn on_pointer_up(&mut self) {
        if self.state.commit() {
            self.mark_all_damaged();
        } else {
            log::debug!("pointer up with no active stroke; ignored");
        }
    }

    // ─── History ─────────────────────────────────────────────────────────

    /// Undo the newest committed stroke. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        let changed = self.state.undo();
        if changed {
            self.mark_all_damaged();
        }
        changed
    }

    /// Restore the most recently undone stroke.
    pub fn redo(&mut self) -> bool {
        let changed = self.state.redo();
        if changed {
            self.mark_all_damaged();
        }
        changed
    }

    pub fn can_undo(&self) -> bool {
        self.state.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.state.can_redo()
    }

    /// Wipe the canvas: history, redo buffer, and any active stroke.
    pub fn clear(&mut self) {
        self.state.clear();
        self.mark_all_damaged();
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    /// Hand the accumulated dirty region to the repaint adapter.
    ///
    /// Returns at-least coverage of everything touched since the previous
    /// take, clipped to the surface, or `None` when nothing changed.
    pub fn take_damage(&mut self) -> Option<Rect> {
        let surface = Rect::new(0.0, 0.0, self.width as f64, self.height as f64);
        self.damage.take().map(|r| r.intersect(surface))
    }

    /// Paint the full surface: backdrop, committed strokes bottom-to-top,
    /// then the active stroke on top.
    pub fn render_to(&self, pixmap: &mut Pixmap) {
        kd_render::render(
            pixmap,
            &self.backdrop,
            self.state.committed().iter().chain(self.state.active()),
        );
    }

    /// Flatten the current state into an opaque raster of the given size.
    /// Pure with respect to the surface; does not mutate anything.
    pub fn flatten_to_raster(&self, width: u32, height: u32) -> Result<Pixmap, RasterError> {
        kd_render::flatten(&SceneSnapshot {
            width,
            height,
            backdrop: self.backdrop.clone(),
            strokes: self.state.snapshot(),
        })
    }

    /// Immutable copy of the surface contents for the export task.
    pub fn export_snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            width: self.width,
            height: self.height,
            backdrop: self.backdrop.clone(),
            strokes: self.state.snapshot(),
        }
    }

    fn add_damage(&mut self, region: Option<Rect>) {
        if let Some(r) = region {
            self.damage = Some(match self.damage {
                Some(acc) => acc.union(r),
                None => r,
            });
        }
    }

    fn mark_all_damaged(&mut self) {
        self.damage = Some(Rect::new(0.0, 0.0, self.width as f64, self.height as f64));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brush_color_applies_to_next_stroke_only() {
        let mut surface = DrawingSurface::new(100, 100);
        surface.on_pointer_down(Point::new(1.0, 1.0));
        surface.set_brush_color("#FF0000");
        surface.on_pointer_up();

        // The stroke begun before the change keeps its color
        assert_eq!(surface.state().committed()[0].color, Color::BLACK);

        surface.on_pointer_down(Point::new(2.0, 2.0));
        surface.on_pointer_up();
        assert_eq!(
            surface.state().committed()[1].color,
            Color::rgb(255, 0, 0)
        );
    }

    #[test]
    fn brush_color_is_forced_opaque() {
        let mut surface = DrawingSurface::new(100, 100);
        surface.set_brush_color("#80FF0000");
        assert_eq!(surface.brush().color, Color::rgb(255, 0, 0));
    }

    #[test]
    fn invalid_width_keeps_prior_value() {
        let mut surface = DrawingSurface::new(100, 100);
        surface.set_brush_width(Brush::MEDIUM);
        surface.set_brush_width(0.0);
        surface.set_brush_width(-3.0);
        surface.set_brush_width(f32::NAN);
        assert_eq!(surface.brush().width, Brush::MEDIUM);
    }

    #[test]
    fn move_damage_covers_new_segment() {
        let mut surface = DrawingSurface::new(200, 200);
        surface.set_brush_width(10.0);
        surface.on_pointer_down(Point::new(20.0, 20.0));
        let _ = surface.take_damage();

        surface.on_pointer_move(Point::new(60.0, 20.0));
        let damage = surface.take_damage().expect("move must damage");
        // Segment (20,20) → (60,20) padded by half the width
        assert!(damage.x0 <= 15.0 && damage.x1 >= 65.0);
        assert!(damage.y0 <= 15.0 && damage.y1 >= 25.0);
        // And regional, not the whole surface
        assert!(damage.x1 < 200.0);
    }

    #[test]
    fn damage_is_clipped_to_surface() {
        let mut surface = DrawingSurface::new(50, 50);
        surface.set_brush_width(20.0);
        surface.on_pointer_down(Point::new(0.0, 0.0));
        let damage = surface.take_damage().expect("down must damage");
        assert!(damage.x0 >= 0.0 && damage.y0 >= 0.0);
        assert!(damage.x1 <= 50.0 && damage.y1 <= 50.0);
    }

    #[test]
    fn take_damage_drains() {
        let mut surface = DrawingSurface::new(50, 50);
        surface.on_pointer_down(Point::new(10.0, 10.0));
        assert!(surface.take_damage().is_some());
        assert!(surface.take_damage().is_none());
    }

    #[test]
    fn undo_redo_mark_full_surface() {
        let mut surface = DrawingSurface::new(50, 50);
        surface.on_pointer_down(Point::new(10.0, 10.0));
        surface.on_pointer_up();
        let _ = surface.take_damage();

        assert!(surface.undo());
        let damage = surface.take_damage().unwrap();
        assert_eq!(damage, Rect::new(0.0, 0.0, 50.0, 50.0));

        // No-op undo leaves no damage behind
        assert!(!surface.undo());
        assert!(surface.take_damage().is_none());
    }
}
