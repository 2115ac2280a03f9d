//! # HUD
//!
//! The viewer-facing readouts around the canvas: the play/stop affordance, the timecode, the
//! progress bar and the transcript. Text readouts are plain strings so any front end can show
//! them; [`draw_hud`] paints the timecode pill and progress bar onto a frame.

use crate::playback::{PlaybackPhase, PlaybackSnapshot};
use crate::scenes::paint::{draw_text_centered, fill, linear_gradient, rect, stroke};
use crate::script::NARRATIVE_SCRIPT;
use crate::systems::assets::FontBook;
use crate::types::{Color, CANVAS_HEIGHT, CANVAS_WIDTH, TOTAL_DURATION_MS};
use serde::Serialize;
use skia_safe::{Canvas, RRect};

// Page layout measured on the 420px-wide player, scaled up to canvas pixels.
const INSET: f32 = 34.0;
const BAR_HEIGHT: f32 = 10.0;
const PILL_TOP: f32 = 24.0;
const PILL_RIGHT: f32 = 31.0;
const PILL_WIDTH: f32 = 168.0;
const PILL_HEIGHT: f32 = 42.0;
const PILL_TEXT_SIZE: f64 = 23.0;

/// The single control offered in each phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlAffordance {
    Start,
    Replay,
    Stop,
}

impl ControlAffordance {
    pub fn for_phase(phase: PlaybackPhase) -> Self {
        match phase {
            PlaybackPhase::Idle => ControlAffordance::Start,
            PlaybackPhase::Playing => ControlAffordance::Stop,
            PlaybackPhase::Finished => ControlAffordance::Replay,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ControlAffordance::Start => "Enter Room 213",
            ControlAffordance::Replay => "Replay Room 213",
            ControlAffordance::Stop => "Leave the Room",
        }
    }
}

fn whole_seconds(ms: f64) -> u64 {
    (ms.max(0.0) / 1000.0).floor() as u64
}

/// `"07s / 60s"`: elapsed seconds, floored and zero-padded.
pub fn format_timecode(elapsed_ms: f64) -> String {
    format!(
        "{:02}s / {}s",
        whole_seconds(elapsed_ms),
        whole_seconds(TOTAL_DURATION_MS)
    )
}

pub fn progress_percent(elapsed_ms: f64) -> f64 {
    (elapsed_ms / TOTAL_DURATION_MS).clamp(0.0, 1.0) * 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptLine {
    pub index: usize,
    /// Start time label, e.g. `"14s"`.
    pub timestamp: String,
    pub text: &'static str,
    pub active: bool,
}

impl std::fmt::Display for TranscriptLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let marker = if self.active { ">" } else { " " };
        write!(f, "{} {}  {}", marker, self.timestamp, self.text)
    }
}

/// The whole script, with `active` marking the caption being spoken.
pub fn transcript_lines(active: Option<usize>) -> Vec<TranscriptLine> {
    NARRATIVE_SCRIPT
        .iter()
        .enumerate()
        .map(|(index, segment)| TranscriptLine {
            index,
            timestamp: format!("{:02}s", whole_seconds(segment.start_ms)),
            text: segment.text,
            active: active == Some(index),
        })
        .collect()
}

/// Paints the timecode pill (top right) and the progress bar (bottom) over a rendered frame.
pub fn draw_hud(canvas: &Canvas, fonts: &FontBook, snapshot: &PlaybackSnapshot) {
    let pill = rect(
        (CANVAS_WIDTH - PILL_RIGHT - PILL_WIDTH) as f64,
        PILL_TOP as f64,
        PILL_WIDTH as f64,
        PILL_HEIGHT as f64,
    );
    let pill_shape = RRect::new_rect_xy(&pill, PILL_HEIGHT / 2.0, PILL_HEIGHT / 2.0);
    canvas.draw_rrect(&pill_shape, &fill(Color::rgba8(6, 4, 12, 0.6)));
    canvas.draw_rrect(&pill_shape, &stroke(Color::rgba8(255, 92, 130, 0.3), 1.7));
    draw_text_centered(
        canvas,
        fonts,
        &format_timecode(snapshot.elapsed_ms),
        PILL_TEXT_SIZE,
        (pill.center_x() as f64, pill.center_y() as f64),
        &fill(Color::rgb8(0xf5, 0xe9, 0xee)),
    );

    let track_width = CANVAS_WIDTH - 2.0 * INSET;
    let top = CANVAS_HEIGHT - INSET - BAR_HEIGHT;
    let radius = BAR_HEIGHT / 2.0;
    let track = rect(
        INSET as f64,
        top as f64,
        track_width as f64,
        BAR_HEIGHT as f64,
    );
    let track_shape = RRect::new_rect_xy(&track, radius, radius);
    canvas.draw_rrect(&track_shape, &fill(Color::rgba8(255, 255, 255, 0.08)));

    let filled = track_width * snapshot.progress.clamp(0.0, 1.0) as f32;
    if filled > 0.0 {
        let bar = rect(INSET as f64, top as f64, filled as f64, BAR_HEIGHT as f64);
        let gradient = linear_gradient(
            (INSET as f64, 0.0),
            ((INSET + filled) as f64, 0.0),
            &[
                (0.0, Color::rgb8(0xff, 0x30, 0x5f)),
                (1.0, Color::rgb8(0xff, 0x8a, 0x6b)),
            ],
        );
        // Clip to the track so a short fill keeps the track's rounded ends.
        canvas.save();
        canvas.clip_rrect(&track_shape, None, true);
        canvas.draw_rect(bar, &gradient);
        canvas.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timecode_is_floored_and_padded() {
        assert_eq!(format_timecode(0.0), "00s / 60s");
        assert_eq!(format_timecode(7_999.0), "07s / 60s");
        assert_eq!(format_timecode(60_000.0), "60s / 60s");
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(progress_percent(-5.0), 0.0);
        assert_eq!(progress_percent(30_000.0), 50.0);
        assert_eq!(progress_percent(90_000.0), 100.0);
    }

    #[test]
    fn affordances_follow_phase() {
        assert_eq!(
            ControlAffordance::for_phase(PlaybackPhase::Idle).label(),
            "Enter Room 213"
        );
        assert_eq!(
            ControlAffordance::for_phase(PlaybackPhase::Finished).label(),
            "Replay Room 213"
        );
        assert_eq!(
            ControlAffordance::for_phase(PlaybackPhase::Playing).label(),
            "Leave the Room"
        );
    }

    #[test]
    fn transcript_marks_one_line() {
        let lines = transcript_lines(Some(2));
        assert_eq!(lines.len(), 7);
        assert_eq!(lines.iter().filter(|l| l.active).count(), 1);
        assert_eq!(lines[2].timestamp, "14s");
        assert!(lines[2].to_string().starts_with("> 14s  Inside"));
        assert!(transcript_lines(None).iter().all(|l| !l.active));
    }
}
