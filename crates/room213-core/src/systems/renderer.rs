//! # Renderer System
//!
//! Handles visual output via Skia raster surfaces.
//!
//! ## Key Functions
//! - `render_frame`: Debug helper for single-frame rendering at an elapsed time.
//! - `frame_surface`: Allocates a canvas-sized N32 premultiplied surface.
//! - `read_rgba`: Reads a surface back as tightly packed RGBA8.
//! - `snapshot_png`: Encodes the current surface contents to a PNG file.
//!
//! ## See Also
//! - `export::frames` for the full export loop (`render_export`).

use crate::errors::RenderError;
use crate::hud;
use crate::playback::PlaybackSnapshot;
use crate::storyboard::{ActiveScene, Storyboard};
use crate::types::{CANVAS_SIZE, TOTAL_DURATION_MS};
use skia_safe::{AlphaType, ColorType, ImageInfo, Surface};
use std::path::Path;
use tracing::debug;

/// Allocates a raster surface the size of the vignette's canvas.
pub fn frame_surface() -> Result<Surface, RenderError> {
    skia_safe::surfaces::raster_n32_premul(CANVAS_SIZE).ok_or(RenderError::SurfaceFailure)
}

/// Renders a single frame at `elapsed_ms` to the provided canvas.
///
/// The elapsed time is clamped to the running time first, so out-of-range requests render the
/// first or last frame instead of failing.
pub fn render_frame(
    storyboard: &Storyboard,
    elapsed_ms: f64,
    canvas: &skia_safe::Canvas,
) -> ActiveScene {
    let elapsed = elapsed_ms.clamp(0.0, TOTAL_DURATION_MS);
    let active = storyboard.draw(canvas, elapsed);
    debug!(
        elapsed,
        scene = active.kind.label(),
        progress = active.progress,
        "[Frame] render complete"
    );
    active
}

/// Like [`render_frame`], with the timecode pill and progress bar drawn on top.
pub fn render_frame_with_hud(
    storyboard: &Storyboard,
    snapshot: &PlaybackSnapshot,
    canvas: &skia_safe::Canvas,
) -> ActiveScene {
    let active = render_frame(storyboard, snapshot.elapsed_ms, canvas);
    hud::draw_hud(canvas, storyboard.fonts(), snapshot);
    active
}

/// Reads the surface back as unpremultiplied RGBA8, row-major with no padding.
pub fn read_rgba(surface: &mut Surface) -> Result<Vec<u8>, RenderError> {
    let (width, height) = (surface.width(), surface.height());
    let info = ImageInfo::new(
        (width, height),
        ColorType::RGBA8888,
        AlphaType::Unpremul,
        None,
    );
    let row_bytes = width as usize * 4;
    let mut pixels = vec![0u8; row_bytes * height as usize];
    if surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
        Ok(pixels)
    } else {
        Err(RenderError::ReadbackFailure)
    }
}

/// Writes the surface's current contents to `path` as a PNG.
pub fn snapshot_png(surface: &mut Surface, path: &Path) -> Result<(), RenderError> {
    let (width, height) = (surface.width() as u32, surface.height() as u32);
    let pixels = read_rgba(surface)?;
    let image = image::RgbaImage::from_raw(width, height, pixels).ok_or_else(|| {
        RenderError::EncodeFailure {
            frame: 0,
            reason: "pixel buffer does not match surface size".to_string(),
        }
    })?;
    image.save(path).map_err(|e| RenderError::EncodeFailure {
        frame: 0,
        reason: e.to_string(),
    })
}
