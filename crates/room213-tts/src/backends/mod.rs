pub mod log;
pub mod process;
pub mod recording;
pub mod silent;

pub use log::LogSpeech;
pub use process::ProcessSpeech;
pub use recording::RecordingSpeech;
pub use silent::SilentSpeech;

use crate::SpeechBackend;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    #[default]
    Silent,
    Log,
    Process,
}

/// Builds a backend, degrading to [`SilentSpeech`] when the requested one cannot start.
pub fn create_backend(kind: BackendKind, program: &str) -> Arc<dyn SpeechBackend> {
    match kind {
        BackendKind::Silent => Arc::new(SilentSpeech),
        BackendKind::Log => Arc::new(LogSpeech::new()),
        BackendKind::Process => match ProcessSpeech::spawn(program) {
            Ok(backend) => Arc::new(backend),
            Err(e) => {
                warn!("Narration disabled, {} unavailable: {}", program, e);
                Arc::new(SilentSpeech)
            }
        },
    }
}
