//! Scene 3: the mirror, and the thing smiling out of it.

use super::paint::{draw_ellipse, draw_rect, fill, linear_gradient, quad_curve, stroke};
use super::{H, W};
use crate::types::Color;
use skia_safe::Canvas;
use std::f64::consts::PI;

pub fn reflection(canvas: &Canvas, t: f64) {
    draw_rect(canvas, 0.0, 0.0, W, H, &fill(Color::rgb8(0x03, 0x01, 0x05)));

    let mirror_x = W * 0.2;
    let mirror_y = H * 0.18;
    let mirror_width = W * 0.6;
    let mirror_height = H * 0.45;

    // Frame
    draw_rect(
        canvas,
        mirror_x - 20.0,
        mirror_y - 16.0,
        mirror_width + 40.0,
        mirror_height + 32.0,
        &fill(Color::rgb8(0x1a, 0x0f, 0x1f)),
    );

    let glass = linear_gradient(
        (mirror_x, mirror_y),
        (mirror_x + mirror_width, mirror_y + mirror_height),
        &[
            (0.0, Color::rgb8(0x2c, 0x29, 0x48)),
            (0.5, Color::rgb8(0x0d, 0x0b, 0x16)),
            (1.0, Color::rgb8(0x16, 0x14, 0x32)),
        ],
    );
    draw_rect(canvas, mirror_x, mirror_y, mirror_width, mirror_height, &glass);

    let center_x = mirror_x + mirror_width / 2.0;
    let face_y = mirror_y + mirror_height * 0.35;
    let face_width = mirror_width * 0.38;
    let face_height = mirror_height * 0.65;
    draw_ellipse(
        canvas,
        (center_x, face_y),
        (face_width, face_height),
        0.0,
        &fill(Color::rgba8(35, 31, 66, (0.8 + 0.1 * (t * 4.0).sin()) as f32)),
    );

    let grin = 0.3 + 0.4 * (t * PI * 5.0).sin().powi(2);
    let smile_width = face_width * 0.8;
    let smile_height = 30.0 + (t * 6.0).sin() * 10.0;
    let mouth_y = face_y + face_height * 0.35;
    canvas.draw_path(
        &quad_curve(
            (center_x - smile_width / 2.0, mouth_y),
            (center_x, mouth_y + smile_height),
            (center_x + smile_width / 2.0, mouth_y),
        ),
        &stroke(Color::rgba8(255, 60, 90, grin as f32), 6.0),
    );

    let eyes = fill(Color::rgba8(
        255,
        240,
        220,
        (0.5 + 0.3 * (t * 12.0).sin()) as f32,
    ));
    let eye_offset = face_width * 0.25;
    let eye_y = face_y - face_height * 0.1;
    for x in [center_x - eye_offset, center_x + eye_offset] {
        draw_ellipse(canvas, (x, eye_y), (18.0, 26.0), 0.0, &eyes);
    }
}
