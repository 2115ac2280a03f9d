//! Export and realtime playback settings, loadable from JSON.
//!
//! Every field has a default, so a config file only needs the keys it changes.

use crate::animation::EasingType;
use crate::systems::transitions::TransitionSettings;
use anyhow::{Context, Result};
use room213_tts::backends::BackendKind;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub out_dir: PathBuf,
    pub fps: u32,
    /// Paint the timecode pill and progress bar onto every frame.
    pub hud: bool,
    pub crossfade_ms: f64,
    pub easing: EasingType,
    /// Frames held in memory between readback and PNG encoding.
    pub batch_size: usize,
    pub font_path: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("room213_frames"),
            fps: 30,
            hud: false,
            crossfade_ms: 0.0,
            easing: EasingType::Linear,
            batch_size: 24,
            font_path: None,
        }
    }
}

impl ExportConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref())
    }

    pub fn transition(&self) -> TransitionSettings {
        TransitionSettings {
            crossfade_ms: self.crossfade_ms.max(0.0),
            easing: self.easing,
        }
    }

    /// Timestamp fed to the driver for frame `index`.
    pub fn frame_timestamp_ms(&self, index: u64) -> f64 {
        index as f64 * 1000.0 / self.fps.max(1) as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub refresh_hz: u32,
    pub speech: BackendKind,
    /// Synthesizer command for the `process` backend.
    pub speech_program: String,
    /// Simulates pressing stop after this much wall time.
    pub stop_after_ms: Option<u64>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            refresh_hz: 60,
            speech: BackendKind::Silent,
            speech_program: "espeak-ng".to_string(),
            stop_after_ms: None,
        }
    }
}

impl PlaybackConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref())
    }

    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.refresh_hz.max(1) as f64)
    }
}
