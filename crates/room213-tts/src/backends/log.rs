use crate::{SpeechBackend, TtsResult, Utterance, Voice, VoicesListener};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

/// Prints narration as `tracing` events instead of audio.
#[derive(Debug, Default)]
pub struct LogSpeech {
    spoken: AtomicUsize,
}

impl LogSpeech {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpeechBackend for LogSpeech {
    fn voices(&self) -> Vec<Voice> {
        Vec::new()
    }

    fn on_voices_changed(&self, _listener: VoicesListener) {}

    fn speak(&self, utterance: Utterance) -> TtsResult<()> {
        let n = self.spoken.fetch_add(1, Ordering::Relaxed) + 1;
        info!(
            target: "room213::narration",
            line = n,
            rate = utterance.params.rate,
            pitch = utterance.params.pitch,
            "\u{201c}{}\u{201d}",
            utterance.text
        );
        Ok(())
    }

    fn cancel(&self) {
        info!(target: "room213::narration", "narration cancelled");
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
