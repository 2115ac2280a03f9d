//! Shared helpers for integration tests.

#![allow(dead_code)]

use room213_core::{FontBook, PlaybackDriver, PlaybackSession, Storyboard, TickOutcome};
use room213_tts::backends::RecordingSpeech;
use std::sync::Arc;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// A driver wired to a recording backend, plus a handle onto that backend's log.
pub fn recording_driver() -> (PlaybackDriver, RecordingSpeech) {
    init_tracing();
    let speech = RecordingSpeech::new();
    let session = PlaybackSession::new(Some(Arc::new(speech.clone())));
    let driver = PlaybackDriver::new(Storyboard::new(FontBook::empty()), session);
    (driver, speech)
}

/// Plays a fresh run and ticks it at each timestamp, without a surface.
pub fn run_ticks(driver: &mut PlaybackDriver, timestamps: &[f64]) -> Vec<TickOutcome> {
    let mut request = driver.play();
    let mut outcomes = Vec::new();
    for &timestamp in timestamps {
        let outcome = driver.tick(request, timestamp, None);
        let finished = outcome.is_finished();
        outcomes.push(outcome);
        match driver.pending_frame() {
            Some(next) if !finished => request = next,
            _ => break,
        }
    }
    outcomes
}

/// RGBA of pixel `(x, y)` in a tightly packed canvas-sized buffer.
pub fn pixel_at(pixels: &[u8], width: usize, x: usize, y: usize) -> [u8; 4] {
    let i = (y * width + x) * 4;
    [pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]
}
