//! # Frame Export
//!
//! Renders a full run to a PNG sequence plus a narration cue sheet.
//!
//! ## Responsibilities
//! - **Frame Loop**: Drives a real `PlaybackDriver` with a synthetic clock until it finishes.
//! - **Readback**: Copies every frame off the raster surface.
//! - **Encoding**: PNG-encodes frames in parallel, one bounded batch at a time.
//! - **Cue Sheet**: Records when each narration segment was dispatched.
//!
//! ## Key Functions
//! - `render_export`: Main export entry point.

use crate::config::ExportConfig;
use crate::errors::RenderError;
use crate::hud;
use crate::playback::{PlaybackDriver, PlaybackSession, TickOutcome};
use crate::script::NARRATIVE_SCRIPT;
use crate::storyboard::Storyboard;
use crate::systems::renderer::{frame_surface, read_rgba};
use crate::types::{CANVAS_SIZE, TOTAL_DURATION_MS};
use anyhow::{anyhow, Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

pub const CUE_SHEET_NAME: &str = "narration.json";

/// One narration dispatch as it happened during the export run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrationCue {
    pub index: usize,
    pub start_ms: f64,
    /// Driver elapsed time on the tick that dispatched the segment.
    pub dispatched_at_ms: f64,
    pub frame: u64,
    pub text: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub out_dir: PathBuf,
    pub frames: u64,
    pub cue_sheet: PathBuf,
    pub cues: Vec<NarrationCue>,
}

pub fn frame_file_name(index: u64) -> String {
    format!("frame_{:05}.png", index)
}

/// Renders the whole vignette into `config.out_dir`.
///
/// Frame `i` is ticked at `i * 1000 / fps` ms, so a 30 fps export writes 1801 frames: the last
/// one at exactly 60 s.
#[instrument(level = "info", skip(storyboard, config), fields(fps = config.fps, out_dir = %config.out_dir.display()))]
pub fn render_export(storyboard: Storyboard, config: &ExportConfig) -> Result<ExportSummary> {
    if config.fps == 0 {
        return Err(anyhow!("fps must be positive"));
    }
    std::fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("Failed to create {}", config.out_dir.display()))?;

    let storyboard = storyboard.with_transition(config.transition());
    let mut driver = PlaybackDriver::new(storyboard, PlaybackSession::silent());
    let mut surface = frame_surface()?;
    let batch_size = config.batch_size.max(1);
    let mut batch: Vec<(u64, Vec<u8>)> = Vec::with_capacity(batch_size);
    let mut cues = Vec::new();

    let mut request = driver.play();
    let mut frame: u64 = 0;
    loop {
        let timestamp = config.frame_timestamp_ms(frame);
        let outcome = driver.tick(request, timestamp, Some(surface.canvas()));
        let report = outcome
            .report()
            .ok_or_else(|| anyhow!("Driver dropped frame {} mid-export", frame))?;

        if config.hud {
            hud::draw_hud(surface.canvas(), driver.storyboard().fonts(), &report.snapshot);
        }
        for &index in &report.dispatched {
            let segment = &NARRATIVE_SCRIPT[index];
            debug!(segment = index, frame, "cue");
            cues.push(NarrationCue {
                index,
                start_ms: segment.start_ms,
                dispatched_at_ms: report.snapshot.elapsed_ms,
                frame,
                text: segment.text,
            });
        }

        batch.push((frame, read_rgba(&mut surface)?));
        if batch.len() >= batch_size {
            write_batch(&config.out_dir, &mut batch)?;
        }

        frame += 1;
        if let TickOutcome::Finished(_) = outcome {
            break;
        }
        request = driver
            .pending_frame()
            .ok_or_else(|| anyhow!("No frame scheduled after frame {}", frame - 1))?;
    }
    write_batch(&config.out_dir, &mut batch)?;

    let cue_sheet = config.out_dir.join(CUE_SHEET_NAME);
    let json = serde_json::to_string_pretty(&cues)?;
    std::fs::write(&cue_sheet, json)
        .with_context(|| format!("Failed to write {}", cue_sheet.display()))?;

    info!(
        frames = frame,
        cues = cues.len(),
        duration_ms = TOTAL_DURATION_MS,
        "Export complete"
    );
    Ok(ExportSummary {
        out_dir: config.out_dir.clone(),
        frames: frame,
        cue_sheet,
        cues,
    })
}

/// Encodes and writes the buffered frames in parallel, leaving `batch` empty.
fn write_batch(out_dir: &Path, batch: &mut Vec<(u64, Vec<u8>)>) -> Result<(), RenderError> {
    if batch.is_empty() {
        return Ok(());
    }
    let (width, height) = (CANVAS_SIZE.0 as u32, CANVAS_SIZE.1 as u32);
    debug!(frames = batch.len(), "Encoding batch");
    std::mem::take(batch)
        .into_par_iter()
        .try_for_each(|(index, pixels)| {
            let image = image::RgbaImage::from_raw(width, height, pixels).ok_or_else(|| {
                RenderError::EncodeFailure {
                    frame: index as usize,
                    reason: "pixel buffer does not match canvas size".to_string(),
                }
            })?;
            image
                .save(out_dir.join(frame_file_name(index)))
                .map_err(|e| RenderError::EncodeFailure {
                    frame: index as usize,
                    reason: e.to_string(),
                })
        })
}
