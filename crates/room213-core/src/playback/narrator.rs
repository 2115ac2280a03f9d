//! Fires each narration segment once its start time has passed.

use super::session::PlaybackSession;
use crate::script::NarrativeSegment;
use room213_tts::{SpeechParams, Utterance};
use tracing::{info, warn};

/// Delivery used for every line: slightly low and slow.
pub const NARRATION_PARAMS: SpeechParams = SpeechParams {
    pitch: 0.95,
    rate: 0.92,
    volume: 0.98,
};

pub struct Narrator;

impl Narrator {
    /// Speaks every segment with `start_ms <= elapsed_ms` not yet spoken this run.
    ///
    /// Segments are visited in table order, so a large clock jump still delivers the skipped
    /// lines in start order. Returns the indices dispatched by this call. Without a backend the
    /// segments are still marked, keeping the transcript state consistent.
    pub fn dispatch_due(
        session: &mut PlaybackSession,
        script: &[NarrativeSegment],
        elapsed_ms: f64,
    ) -> Vec<usize> {
        let mut dispatched = Vec::new();
        for (index, segment) in script.iter().enumerate() {
            if segment.start_ms > elapsed_ms || !session.mark_spoken(index) {
                continue;
            }
            dispatched.push(index);

            let Some(backend) = session.backend() else {
                continue;
            };
            let utterance = Utterance::new(segment.text, NARRATION_PARAMS)
                .with_voice(session.voice());
            info!(
                segment = index,
                at_ms = elapsed_ms,
                voice = utterance.voice.as_ref().map(|v| v.name.as_str()),
                "Dispatching narration"
            );
            if let Err(e) = backend.speak(utterance) {
                warn!(segment = index, "Narration failed on {}: {}", backend.name(), e);
            }
        }
        dispatched
    }
}
