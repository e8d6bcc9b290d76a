//! Stroke data model for KD drawings.
//!
//! A drawing is an ordered list of strokes. Each stroke is one continuous
//! pointer-down-to-up gesture: an ordered run of surface-local points plus
//! the brush attributes that were current when the gesture started. The
//! attributes are fixed at creation; after a stroke is committed only list
//! membership changes, never point data.

use kurbo::{BezPath, Rect, Shape};
use serde::{Deserialize, Serialize};

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × u8 so rasterized output is bit-exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a color specification: `#RGB`, `#RRGGBB`, `#AARRGGBB`, or a
    /// named constant. The `#` prefix is optional for the hex forms.
    pub fn parse(spec: &str) -> Option<Self> {
        Self::from_name(spec).or_else(|| Self::from_hex(spec))
    }

    /// Parse a hex color string: `#RGB`, `#RRGGBB`, `#AARRGGBB`.
    /// Eight-digit values carry alpha in the leading byte.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        match bytes.len() {
            3 => {
                let r = hex_val(bytes[0])?;
                let g = hex_val(bytes[1])?;
                let b = hex_val(bytes[2])?;
                Some(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = hex_val(bytes[0])? << 4 | hex_val(bytes[1])?;
                let g = hex_val(bytes[2])? << 4 | hex_val(bytes[3])?;
                let b = hex_val(bytes[4])? << 4 | hex_val(bytes[5])?;
                Some(Self::rgb(r, g, b))
            }
            8 => {
                let a = hex_val(bytes[0])? << 4 | hex_val(bytes[1])?;
                let r = hex_val(bytes[2])? << 4 | hex_val(bytes[3])?;
                let g = hex_val(bytes[4])? << 4 | hex_val(bytes[5])?;
                let b = hex_val(bytes[6])? << 4 | hex_val(bytes[7])?;
                Some(Self::rgba(r, g, b, a))
            }
            _ => None,
        }
    }

    /// Resolve a named color constant (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let c = match name.to_ascii_lowercase().as_str() {
            "black" => Self::rgb(0x00, 0x00, 0x00),
            "white" => Self::rgb(0xFF, 0xFF, 0xFF),
            "red" => Self::rgb(0xFF, 0x00, 0x00),
            "green" => Self::rgb(0x00, 0xFF, 0x00),
            "blue" => Self::rgb(0x00, 0x00, 0xFF),
            "yellow" => Self::rgb(0xFF, 0xFF, 0x00),
            "cyan" | "aqua" => Self::rgb(0x00, 0xFF, 0xFF),
            "magenta" | "fuchsia" => Self::rgb(0xFF, 0x00, 0xFF),
            "gray" | "grey" => Self::rgb(0x88, 0x88, 0x88),
            "lightgray" | "lightgrey" => Self::rgb(0xCC, 0xCC, 0xCC),
            "darkgray" | "darkgrey" => Self::rgb(0x44, 0x44, 0x44),
            "lime" => Self::rgb(0x00, 0xFF, 0x00),
            "maroon" => Self::rgb(0x80, 0x00, 0x00),
            "navy" => Self::rgb(0x00, 0x00, 0x80),
            "olive" => Self::rgb(0x80, 0x80, 0x00),
            "purple" => Self::rgb(0x80, 0x00, 0x80),
            "silver" => Self::rgb(0xC0, 0xC0, 0xC0),
            "teal" => Self::rgb(0x00, 0x80, 0x80),
            _ => return None,
        };
        Some(c)
    }

    /// The same color with full alpha. Brush colors are always opaque.
    pub const fn opaque(self) -> Self {
        Self { a: 255, ..self }
    }

    /// Emit as shortest valid hex string (`#RRGGBB`, or `#AARRGGBB` when
    /// translucent).
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
        }
    }
}

// ─── Points ──────────────────────────────────────────────────────────────

/// A 2D coordinate in surface-local space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Midpoint between two captured points; the anchor for quadratic
    /// smoothing.
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl From<Point> for kurbo::Point {
    fn from(p: Point) -> Self {
        kurbo::Point::new(p.x as f64, p.y as f64)
    }
}

// ─── Brush ───────────────────────────────────────────────────────────────

/// How captured points are joined into a render path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Smoothing {
    /// Straight line segments between consecutive points.
    #[default]
    Segments,
    /// Quadratic curves through consecutive midpoints, with the captured
    /// point as control. Smoother corners, same point data.
    Quadratic,
}

/// Brush configuration stamped onto the *next* stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    pub color: Color,
    pub width: f32,
    pub smoothing: Smoothing,
}

impl Brush {
    /// Width presets offered by the brush-size picker.
    pub const SMALL: f32 = 10.0;
    pub const MEDIUM: f32 = 20.0;
    pub const LARGE: f32 = 30.0;
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: Self::SMALL,
            smoothing: Smoothing::default(),
        }
    }
}

// ─── Stroke ──────────────────────────────────────────────────────────────

/// One continuous drawing gesture: at least one point, in drawing order,
/// plus brush attributes fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    points: Vec<Point>,
    pub color: Color,
    pub width: f32,
    pub smoothing: Smoothing,
}

impl Stroke {
    /// Start a stroke at the pointer-down position.
    pub fn start(brush: Brush, at: Point) -> Self {
        Self {
            points: vec![at],
            color: brush.color,
            width: brush.width,
            smoothing: brush.smoothing,
        }
    }

    /// Append a captured point. Only valid while the stroke is active;
    /// committed strokes are never extended.
    pub(crate) fn push(&mut self, p: Point) {
        self.points.push(p);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// A stroke that never moved renders as a dot.
    pub fn is_dot(&self) -> bool {
        self.points.len() == 1
    }

    /// Derive the render-ready path from the captured points.
    ///
    /// `Segments` emits line segments; `Quadratic` emits quadratic curves
    /// ending at consecutive midpoints with the captured point as control,
    /// then a final line to the last point. A single-point stroke yields a
    /// bare move-to; the renderer draws it as a dot.
    pub fn path(&self) -> BezPath {
        let mut bez = BezPath::new();
        bez.move_to(self.points[0]);

        match self.smoothing {
            Smoothing::Segments => {
                for &p in &self.points[1..] {
                    bez.line_to(p);
                }
            }
            Smoothing::Quadratic => {
                if self.points.len() == 2 {
                    bez.line_to(self.points[1]);
                } else {
                    for w in self.points[1..].windows(2) {
                        bez.quad_to(w[0], w[0].midpoint(w[1]));
                    }
                    if let Some(&last) = self.points.last() {
                        bez.line_to(last);
                    }
                }
            }
        }

        bez
    }

    /// Bounding box of the whole stroked outline (path bounds inflated by
    /// half the width).
    pub fn bounds(&self) -> Rect {
        let pad = (self.width / 2.0) as f64;
        if self.is_dot() {
            let c: kurbo::Point = self.points[0].into();
            Rect::from_center_size(c, (0.0, 0.0)).inflate(pad, pad)
        } else {
            self.path().bounding_box().inflate(pad, pad)
        }
    }

    /// Bounding box of the most recently appended segment, inflated by
    /// half the width. Used for incremental repaint during a drag.
    pub fn last_segment_bounds(&self) -> Rect {
        let pad = (self.width / 2.0) as f64;
        let n = self.points.len();
        if n < 2 {
            return self.bounds();
        }
        Rect::from_points(self.points[n - 2], self.points[n - 1]).inflate(pad, pad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    #[test]
    fn color_parse_hex_forms() {
        assert_eq!(Color::from_hex("#F00"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(Color::from_hex("#6C5CE7"), Some(Color::rgb(0x6C, 0x5C, 0xE7)));
        // Eight digits: alpha leads
        assert_eq!(
            Color::from_hex("#80FF0000"),
            Some(Color::rgba(255, 0, 0, 0x80))
        );
        assert_eq!(Color::from_hex("112233"), Some(Color::rgb(0x11, 0x22, 0x33)));
    }

    #[test]
    fn color_parse_rejects_garbage() {
        assert_eq!(Color::parse("not-a-color"), None);
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#GGHHII"), None);
    }

    #[test]
    fn color_named_and_hex_agree() {
        assert_eq!(Color::parse("red"), Color::parse("#FF0000"));
        assert_eq!(Color::parse("Teal"), Some(Color::rgb(0x00, 0x80, 0x80)));
    }

    #[test]
    fn color_hex_roundtrip() {
        let c = Color::from_hex("#6C5CE7").unwrap();
        assert_eq!(c.to_hex(), "#6C5CE7");

        let translucent = Color::from_hex("#80FF0000").unwrap();
        assert_eq!(translucent.to_hex(), "#80FF0000");
        assert_eq!(translucent.opaque().to_hex(), "#FF0000");
    }

    #[test]
    fn segments_path_is_polyline() {
        let mut s = Stroke::start(Brush::default(), Point::new(10.0, 10.0));
        s.push(Point::new(20.0, 10.0));
        s.push(Point::new(20.0, 20.0));

        let els: Vec<PathEl> = s.path().into_iter().collect();
        assert_eq!(els.len(), 3);
        assert!(matches!(els[0], PathEl::MoveTo(_)));
        assert!(matches!(els[1], PathEl::LineTo(_)));
        assert!(matches!(els[2], PathEl::LineTo(_)));
    }

    #[test]
    fn quadratic_path_curves_through_midpoints() {
        let brush = Brush {
            smoothing: Smoothing::Quadratic,
            ..Brush::default()
        };
        let mut s = Stroke::start(brush, Point::new(0.0, 0.0));
        s.push(Point::new(10.0, 0.0));
        s.push(Point::new(10.0, 10.0));

        let els: Vec<PathEl> = s.path().into_iter().collect();
        // move, quad (control = captured point, end = midpoint), final line
        assert!(matches!(els[1], PathEl::QuadTo(c, e)
            if c == kurbo::Point::new(10.0, 0.0) && e == kurbo::Point::new(10.0, 5.0)));
        assert!(matches!(els.last(), Some(PathEl::LineTo(p))
            if *p == kurbo::Point::new(10.0, 10.0)));
    }

    #[test]
    fn two_point_quadratic_degrades_to_line() {
        let brush = Brush {
            smoothing: Smoothing::Quadratic,
            ..Brush::default()
        };
        let mut s = Stroke::start(brush, Point::new(0.0, 0.0));
        s.push(Point::new(5.0, 5.0));

        let els: Vec<PathEl> = s.path().into_iter().collect();
        assert_eq!(els.len(), 2);
        assert!(matches!(els[1], PathEl::LineTo(_)));
    }

    #[test]
    fn bounds_cover_stroke_width() {
        let brush = Brush {
            width: 20.0,
            ..Brush::default()
        };
        let mut s = Stroke::start(brush, Point::new(50.0, 50.0));
        s.push(Point::new(100.0, 50.0));

        let b = s.bounds();
        assert_eq!(b.x0, 40.0);
        assert_eq!(b.x1, 110.0);
        assert_eq!(b.y0, 40.0);
        assert_eq!(b.y1, 60.0);
    }

    #[test]
    fn dot_stroke_has_nonempty_bounds() {
        let s = Stroke::start(Brush::default(), Point::new(5.0, 5.0));
        assert!(s.is_dot());
        let b = s.bounds();
        assert_eq!(b.width(), Brush::SMALL as f64);
        assert_eq!(b.height(), Brush::SMALL as f64);
    }

    #[test]
    fn last_segment_bounds_track_newest_points() {
        let mut s = Stroke::start(Brush::default(), Point::new(0.0, 0.0));
        s.push(Point::new(100.0, 0.0));
        s.push(Point::new(100.0, 30.0));

        let b = s.last_segment_bounds();
        // Covers only the (100,0) → (100,30) segment plus half-width pad
        assert_eq!(b.x0, 95.0);
        assert_eq!(b.x1, 105.0);
        assert_eq!(b.y0, -5.0);
        assert_eq!(b.y1, 35.0);
    }
}
