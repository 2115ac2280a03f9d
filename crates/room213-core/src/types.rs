//! # Types Module
//!
//! Shared data types used across the engine.
//!
//! ## Responsibilities
//! - **Canvas constants**: the fixed 720x1280 portrait surface and the 60 second running time.
//! - **Color**: RGBA color representation with Skia conversion.
//! - **TimeSpan**: right-open millisecond intervals used by scenes and narration.

use serde::{Deserialize, Serialize};
use skia_safe::Color4f;

/// Logical width of the drawing surface in pixels.
pub const CANVAS_WIDTH: f32 = 720.0;
/// Logical height of the drawing surface in pixels.
pub const CANVAS_HEIGHT: f32 = 1280.0;
/// Running time of the vignette in milliseconds.
pub const TOTAL_DURATION_MS: f64 = 60_000.0;

/// Surface size as integer dimensions, for allocating raster surfaces.
pub const CANVAS_SIZE: (i32, i32) = (CANVAS_WIDTH as i32, CANVAS_HEIGHT as i32);

/// Represents a RGBA color in float format (0.0 - 1.0).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channels, the `#rrggbb` form.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, 1.0)
    }

    /// Color from 8-bit channels and a float alpha, the `rgba(r, g, b, a)` form.
    ///
    /// Alpha is clamped to `[0, 1]` (NaN becomes 0) the way CSS clamps out-of-range values.
    pub fn rgba8(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        let a = if alpha.is_nan() {
            0.0
        } else {
            alpha.clamp(0.0, 1.0)
        };
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a,
        }
    }

    /// Converts to Skia's `Color` struct (u8 based).
    pub fn to_skia(&self) -> skia_safe::Color {
        skia_safe::Color::from_argb(
            (self.a * 255.0).round() as u8,
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
        )
    }

    /// Converts to Skia's `Color4f` struct (float based).
    pub fn to_color4f(&self) -> Color4f {
        Color4f::new(self.r, self.g, self.b, self.a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// A right-open interval `[start_ms, end_ms)` on the playback clock.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start_ms: f64,
    pub end_ms: f64,
}

impl TimeSpan {
    pub const fn new(start_ms: f64, end_ms: f64) -> Self {
        Self { start_ms, end_ms }
    }

    /// Start is inclusive, end is exclusive.
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start_ms && t < self.end_ms
    }

    pub fn duration(&self) -> f64 {
        self.end_ms - self.start_ms
    }

    /// Normalized position of `t` inside the span, clamped to `[0, 1]`.
    ///
    /// A zero-length span divides by 1 instead of 0.
    pub fn local_progress(&self, t: f64) -> f64 {
        let span = self.duration();
        let denom = if span == 0.0 { 1.0 } else { span };
        ((t - self.start_ms) / denom).clamp(0.0, 1.0)
    }
}
