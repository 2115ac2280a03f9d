//! Thin immediate-mode helpers over the Skia canvas.
//!
//! Painters do their arithmetic in `f64` (the precision the choreography was authored in) and
//! narrow to Skia's `f32` only here, at the draw call.

use crate::systems::assets::FontBook;
use crate::types::Color;
use skia_safe::{gradient_shader, Canvas, Paint, PaintStyle, Path, Point, Rect, TileMode};

pub fn fill(color: Color) -> Paint {
    let mut paint = Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(PaintStyle::Fill);
    paint.set_color4f(color.to_color4f(), None);
    paint
}

pub fn stroke(color: Color, width: f64) -> Paint {
    let mut paint = fill(color);
    paint.set_style(PaintStyle::Stroke);
    paint.set_stroke_width(width as f32);
    paint
}

/// Linear gradient between two points. Stops are `(offset, color)` pairs.
pub fn linear_gradient(from: (f64, f64), to: (f64, f64), stops: &[(f32, Color)]) -> Paint {
    let colors: Vec<skia_safe::Color> = stops.iter().map(|(_, c)| c.to_skia()).collect();
    let positions: Vec<f32> = stops.iter().map(|(p, _)| *p).collect();
    let shader = gradient_shader::linear(
        (point(from.0, from.1), point(to.0, to.1)),
        colors.as_slice(),
        Some(positions.as_slice()),
        TileMode::Clamp,
        None,
        None,
    );
    with_shader(shader, stops)
}

/// Radial gradient around `center`. Offsets are fractions of `radius`.
pub fn radial_gradient(center: (f64, f64), radius: f64, stops: &[(f32, Color)]) -> Paint {
    let colors: Vec<skia_safe::Color> = stops.iter().map(|(_, c)| c.to_skia()).collect();
    let positions: Vec<f32> = stops.iter().map(|(p, _)| *p).collect();
    let shader = gradient_shader::radial(
        point(center.0, center.1),
        radius as f32,
        colors.as_slice(),
        Some(positions.as_slice()),
        TileMode::Clamp,
        None,
        None,
    );
    with_shader(shader, stops)
}

fn with_shader(shader: Option<skia_safe::Shader>, stops: &[(f32, Color)]) -> Paint {
    // A degenerate gradient (zero length) yields no shader; fall back to its first stop.
    let fallback = stops.first().map(|(_, c)| *c).unwrap_or(Color::TRANSPARENT);
    let mut paint = fill(fallback);
    if shader.is_some() {
        paint.set_shader(shader);
    }
    paint
}

pub fn point(x: f64, y: f64) -> Point {
    Point::new(x as f32, y as f32)
}

pub fn rect(x: f64, y: f64, w: f64, h: f64) -> Rect {
    Rect::from_xywh(x as f32, y as f32, w as f32, h as f32)
}

pub fn draw_rect(canvas: &Canvas, x: f64, y: f64, w: f64, h: f64, paint: &Paint) {
    canvas.draw_rect(rect(x, y, w, h), paint);
}

/// Axis-aligned ellipse rotated by `rotation` radians about its center.
pub fn draw_ellipse(
    canvas: &Canvas,
    center: (f64, f64),
    radii: (f64, f64),
    rotation: f64,
    paint: &Paint,
) {
    let (rx, ry) = radii;
    canvas.save();
    canvas.translate(point(center.0, center.1));
    if rotation != 0.0 {
        canvas.rotate(rotation.to_degrees() as f32, None);
    }
    canvas.draw_oval(rect(-rx, -ry, rx * 2.0, ry * 2.0), paint);
    canvas.restore();
}

pub fn draw_circle(canvas: &Canvas, center: (f64, f64), radius: f64, paint: &Paint) {
    canvas.draw_circle(point(center.0, center.1), radius as f32, paint);
}

/// Closed polygon through `points`.
pub fn polygon(points: &[(f64, f64)]) -> Path {
    let mut path = Path::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(point(first.0, first.1));
        for p in rest {
            path.line_to(point(p.0, p.1));
        }
        path.close();
    }
    path
}

/// Open quadratic curve from `start` through control `ctrl` to `end`.
pub fn quad_curve(start: (f64, f64), ctrl: (f64, f64), end: (f64, f64)) -> Path {
    let mut path = Path::new();
    path.move_to(point(start.0, start.1));
    path.quad_to(point(ctrl.0, ctrl.1), point(end.0, end.1));
    path
}

/// Text centered horizontally and vertically on `center`. Skipped when no font is available.
pub fn draw_text_centered(
    canvas: &Canvas,
    fonts: &FontBook,
    text: &str,
    size: f64,
    center: (f64, f64),
    paint: &Paint,
) {
    let Some(font) = fonts.font(size as f32) else {
        return;
    };
    let (width, _bounds) = font.measure_str(text, Some(paint));
    let (_spacing, metrics) = font.metrics();
    let x = center.0 as f32 - width / 2.0;
    let y = center.1 as f32 - (metrics.ascent + metrics.descent) / 2.0;
    canvas.draw_str(text, (x, y), &font, paint);
}
