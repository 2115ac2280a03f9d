//! Scenes 1 and 2: inside the room. Blistering wallpaper, the bed, lightning at the window,
//! and the whisper rings drifting over it all.

use super::paint::{draw_ellipse, draw_rect, fill, linear_gradient, quad_curve, stroke};
use super::{H, W};
use crate::types::Color;
use skia_safe::Canvas;
use std::f64::consts::PI;

const WALLPAPER_STRIPS: usize = 12;
const WHISPER_RINGS: usize = 6;

pub fn interior(canvas: &Canvas, t: f64) {
    draw_rect(canvas, 0.0, 0.0, W, H, &fill(Color::rgb8(0x05, 0x03, 0x08)));

    let wall = linear_gradient(
        (0.0, H * 0.2),
        (0.0, H * 0.7),
        &[
            (0.0, Color::rgb8(0x10, 0x11, 0x25)),
            (1.0, Color::rgb8(0x04, 0x03, 0x0a)),
        ],
    );
    draw_rect(canvas, W * 0.1, H * 0.25, W * 0.8, H * 0.55, &wall);

    // Peeling wallpaper
    let peel = stroke(
        Color::rgba8(255, 120, 150, (0.08 + 0.12 * (t * PI * 6.0).sin()) as f32),
        1.5,
    );
    for i in 0..WALLPAPER_STRIPS {
        let i = i as f64;
        let x = W * (0.18 + 0.05 * i);
        let height = H * (0.05 + 0.1 * (t * (i + 1.0)).sin());
        canvas.draw_path(
            &quad_curve(
                (x, H * 0.3),
                (x + 12.0, H * 0.35 + height),
                (x + 24.0, H * 0.42),
            ),
            &peel,
        );
    }

    // Bed
    draw_rect(
        canvas,
        W * 0.12,
        H * 0.58,
        W * 0.76,
        H * 0.18,
        &fill(Color::rgb8(0x09, 0x04, 0x0d)),
    );
    draw_rect(
        canvas,
        W * 0.12,
        H * 0.53,
        W * 0.76,
        H * 0.07,
        &fill(Color::rgb8(0x18, 0x12, 0x27)),
    );

    let lightning = ((t + 0.1) * PI * 8.0).sin().max(0.0);
    draw_rect(
        canvas,
        W * 0.3,
        H * 0.28,
        W * 0.4,
        H * 0.2,
        &fill(Color::rgba8(180, 200, 255, (0.05 + lightning * 0.4) as f32)),
    );
}

pub fn whispers(canvas: &Canvas, t: f64) {
    for i in 0..WHISPER_RINGS {
        let i = i as f64;
        let opacity = 0.05 + 0.02 * i + ((t + i) * 6.0).sin() * 0.01;
        let radius = W * (0.1 + i * 0.06);
        draw_ellipse(
            canvas,
            (
                W * 0.6 + (t * 12.0 + i).sin() * 20.0,
                H * 0.45 + (t * 8.0 + i).cos() * 16.0,
            ),
            (radius, radius * 0.6),
            (t * 2.0).sin() * 0.2,
            &stroke(Color::rgba8(255, 190, 255, opacity as f32), 2.0),
        );
    }
}
