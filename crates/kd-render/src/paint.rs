//! Stroke list → pixels.
//!
//! Back-to-front painter's composite: clear to the backdrop, then stroke
//! every path in order with round caps and joins. No spatial partitioning;
//! stroke counts are interactive hand-drawn input, not mass data.

use crate::backdrop::Backdrop;
use kd_core::Stroke;
use kurbo::{BezPath, PathEl};
use tiny_skia::{
    FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Transform,
};

/// Paint the backdrop and a bottom-to-top stroke list onto `pixmap`.
///
/// Call with the committed strokes followed by the active stroke (if any),
/// so the in-progress gesture lands on top.
pub fn render<'a>(
    pixmap: &mut Pixmap,
    backdrop: &Backdrop,
    strokes: impl IntoIterator<Item = &'a Stroke>,
) {
    draw_backdrop(pixmap, backdrop);
    let mut count = 0usize;
    for stroke in strokes {
        draw_stroke(pixmap, stroke);
        count += 1;
    }
    log::trace!("rendered {count} strokes");
}

fn draw_backdrop(pixmap: &mut Pixmap, backdrop: &Backdrop) {
    pixmap.fill(to_skia_color(backdrop.color));

    if let Some(image) = &backdrop.image {
        // Scale the picture to cover the whole surface.
        let sx = pixmap.width() as f32 / image.width() as f32;
        let sy = pixmap.height() as f32 / image.height() as f32;
        pixmap.draw_pixmap(
            0,
            0,
            image.pixmap().as_ref(),
            &PixmapPaint {
                quality: tiny_skia::FilterQuality::Bilinear,
                ..PixmapPaint::default()
            },
            Transform::from_scale(sx, sy),
            None,
        );
    }
}

fn draw_stroke(pixmap: &mut Pixmap, stroke: &Stroke) {
    let mut paint = Paint::default();
    paint.set_color_rgba8(stroke.color.r, stroke.color.g, stroke.color.b, stroke.color.a);
    paint.anti_alias = true;

    // A gesture that never left its starting pixel has a zero-length path;
    // stroking would produce no coverage, so draw the round cap directly.
    if stroke.is_dot() || zero_extent(stroke) {
        let p = stroke.points()[0];
        let mut pb = PathBuilder::new();
        pb.push_circle(p.x, p.y, stroke.width / 2.0);
        if let Some(dot) = pb.finish() {
            pixmap.fill_path(&dot, &paint, FillRule::Winding, Transform::identity(), None);
        }
        return;
    }

    let Some(path) = to_skia_path(&stroke.path()) else {
        return;
    };
    let outline = tiny_skia::Stroke {
        width: stroke.width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..tiny_skia::Stroke::default()
    };
    pixmap.stroke_path(&path, &paint, &outline, Transform::identity(), None);
}

/// All captured points coincide (taps can report duplicate move coordinates).
fn zero_extent(stroke: &Stroke) -> bool {
    let first = stroke.points()[0];
    stroke.points().iter().all(|p| *p == first)
}

fn to_skia_path(bez: &BezPath) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for el in bez.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => pb.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => pb.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

fn to_skia_color(c: kd_core::Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
}
