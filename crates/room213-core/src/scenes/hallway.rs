//! Scene 0: the corridor and the door to room 213.

use super::paint::{
    draw_circle, draw_ellipse, draw_rect, draw_text_centered, fill, linear_gradient, polygon,
    stroke,
};
use super::{H, W};
use crate::systems::assets::FontBook;
use crate::types::Color;
use skia_safe::Canvas;
use std::f64::consts::PI;

/// Draws floor, walls and the flickering ceiling light. Returns the door's perspective scale.
pub fn hallway(canvas: &Canvas, t: f64) -> f64 {
    let perspective = 0.6 + t * 0.4;
    draw_rect(canvas, 0.0, 0.0, W, H, &fill(Color::rgb8(0x06, 0x06, 0x08)));

    let floor = linear_gradient(
        (0.0, H * 0.6),
        (0.0, H),
        &[
            (0.0, Color::rgb8(0x1a, 0x14, 0x24)),
            (1.0, Color::rgb8(0x05, 0x01, 0x09)),
        ],
    );
    canvas.draw_path(
        &polygon(&[
            (W * (0.2 - t * 0.1), H * 0.6),
            (W * (0.8 + t * 0.1), H * 0.6),
            (W, H),
            (0.0, H),
        ]),
        &floor,
    );

    let walls = linear_gradient(
        (0.0, 0.0),
        (0.0, H * 0.6),
        &[
            (0.0, Color::rgb8(0x1c, 0x1b, 0x3a)),
            (1.0, Color::rgb8(0x09, 0x05, 0x12)),
        ],
    );
    canvas.draw_path(
        &polygon(&[
            (0.0, 0.0),
            (W * (0.2 - t * 0.05), H * 0.6),
            (W * (0.8 + t * 0.05), H * 0.6),
            (W, 0.0),
        ]),
        &walls,
    );

    let flicker = 0.8 + (t * PI * 4.0).sin() * 0.2;
    draw_ellipse(
        canvas,
        (W / 2.0, H * 0.15),
        (W * 0.18, H * 0.05),
        0.0,
        &fill(Color::rgba8(255, 240, 210, (0.2 + flicker * 0.3) as f32)),
    );

    perspective
}

/// Draws the door, its pulsing number plaque and the trembling handle.
pub fn door(canvas: &Canvas, fonts: &FontBook, t: f64, perspective: f64) {
    let door_width = W * 0.26 * perspective;
    let door_height = H * 0.38 * perspective;
    let door_x = (W - door_width) / 2.0;
    let door_y = H * 0.25;

    let panel = linear_gradient(
        (door_x, door_y),
        (door_x + door_width, door_y + door_height),
        &[
            (0.0, Color::rgb8(0x29, 0x12, 0x1f)),
            (0.5, Color::rgb8(0x3a, 0x15, 0x28)),
            (1.0, Color::rgb8(0x20, 0x0b, 0x17)),
        ],
    );
    draw_rect(canvas, door_x, door_y, door_width, door_height, &panel);
    draw_rect(
        canvas,
        door_x,
        door_y,
        door_width,
        door_height,
        &stroke(Color::rgb8(0x6f, 0x2d, 0x47), 6.0 * perspective),
    );

    let plaque_width = door_width * 0.32;
    let plaque_height = door_height * 0.12;
    let plaque_x = door_x + (door_width - plaque_width) / 2.0;
    let plaque_y = door_y + door_height * 0.25;

    draw_rect(
        canvas,
        plaque_x,
        plaque_y,
        plaque_width,
        plaque_height,
        &fill(Color::rgb8(0x16, 0x19, 0x24)),
    );
    let glow = 0.4 + 0.6 * (t * PI * 3.0).sin().powi(2);
    draw_rect(
        canvas,
        plaque_x,
        plaque_y,
        plaque_width,
        plaque_height,
        &stroke(Color::rgba8(255, 80, 120, glow as f32), 4.0 * perspective),
    );

    draw_text_centered(
        canvas,
        fonts,
        "213",
        34.0 * perspective,
        (plaque_x + plaque_width / 2.0, plaque_y + plaque_height / 2.0),
        &fill(Color::rgb8(0xff, 0x41, 0x5f)),
    );

    let handle_radius = 10.0 * perspective;
    let handle_x = door_x + door_width * (0.75 + 0.02 * (t * 12.0).sin());
    let handle_y = door_y + door_height * 0.6;
    draw_circle(
        canvas,
        (handle_x, handle_y),
        handle_radius,
        &fill(Color::rgb8(0xf1, 0xdf, 0x93)),
    );
}
