//! Frame-wide compositing pass drawn over every scene: drifting dust, then the vignette.

use super::paint::{draw_circle, draw_rect, fill, radial_gradient};
use super::{H, W};
use crate::types::Color;
use skia_safe::Canvas;

pub const DUST_PARTICLES: usize = 50;

/// Inner edge of the vignette as a fraction of the surface height (fully clear inside it).
const VIGNETTE_INNER: f64 = 0.25;
/// Outer edge of the vignette as a fraction of the surface height (full darkness from here).
const VIGNETTE_OUTER: f64 = 0.68;

/// Position, radius and alpha of dust particle `i` at global progress `t`.
///
/// Deterministic in `(i, t)`. `x` uses a truncated remainder and may go slightly negative,
/// which only pushes the particle off the left edge.
pub fn dust_particle(i: usize, t: f64) -> ((f64, f64), f64, f64) {
    let fi = i as f64;
    let x = (fi * 97.0 + (t * 3.0 + fi).sin() * 120.0) % W;
    let progress = (t * 0.2 + fi * 0.02) % 1.0;
    let y = progress * H;
    let size = 2.0 + (i % 4) as f64;
    let alpha = 0.1 + 0.1 * (t * 10.0 + fi).sin();
    ((x, y), size, alpha)
}

/// Draws the 50 dust motes. `t` is elapsed over the total running time.
pub fn dust(canvas: &Canvas, t: f64) {
    for i in 0..DUST_PARTICLES {
        let (center, size, alpha) = dust_particle(i, t);
        draw_circle(
            canvas,
            center,
            size,
            &fill(Color::rgba8(255, 255, 255, alpha as f32)),
        );
    }
}

/// Darkens the edges with a centered radial falloff.
pub fn vignette(canvas: &Canvas) {
    let outer = H * VIGNETTE_OUTER;
    let paint = radial_gradient(
        (W / 2.0, H / 2.0),
        outer,
        &[
            ((VIGNETTE_INNER / VIGNETTE_OUTER) as f32, Color::TRANSPARENT),
            (1.0, Color::rgba8(0, 0, 0, 0.65)),
        ],
    );
    draw_rect(canvas, 0.0, 0.0, W, H, &paint);
}
