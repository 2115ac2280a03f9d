//! Scene 4: running down a corridor that keeps stretching, the door flashing ahead.

use super::paint::{draw_rect, fill, polygon, stroke};
use super::{H, W};
use crate::types::Color;
use skia_safe::Canvas;
use std::f64::consts::PI;

const CORRIDOR_FRAMES: usize = 12;

pub fn escape(canvas: &Canvas, t: f64) {
    draw_rect(canvas, 0.0, 0.0, W, H, &fill(Color::rgb8(0x05, 0x03, 0x0a)));

    let stretch = 1.0 + t * 1.5;
    let center_x = W / 2.0 + (t * PI * 6.0).sin() * 30.0;
    let center_y = H * 0.4;

    for i in 0..CORRIDOR_FRAMES {
        let i = i as f64;
        let factor = 1.0 + i * 0.15 * stretch;
        let opacity = 0.08 + i * 0.03;
        canvas.draw_path(
            &polygon(&[
                (center_x - W * 0.45 * factor, center_y - H * 0.1 * factor),
                (center_x, center_y - H * 0.2 * factor),
                (center_x + W * 0.45 * factor, center_y - H * 0.1 * factor),
                (center_x, center_y + H * 0.6 * factor),
            ]),
            &stroke(Color::rgba8(255, 90, 120, opacity as f32), 2.0),
        );
    }

    let flash = ((t + 0.2) * PI * 10.0).sin().max(0.0);
    draw_rect(
        canvas,
        center_x - 80.0,
        H * 0.25,
        160.0,
        H * 0.3,
        &fill(Color::rgba8(255, 80, 120, (flash * 0.4) as f32)),
    );
}
