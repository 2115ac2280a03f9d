use crate::{SpeechBackend, TtsResult, Utterance, Voice, VoicesListener};

/// Stand-in for a missing speech capability. Accepts everything, says nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSpeech;

impl SpeechBackend for SilentSpeech {
    fn voices(&self) -> Vec<Voice> {
        Vec::new()
    }

    fn on_voices_changed(&self, _listener: VoicesListener) {}

    fn speak(&self, _utterance: Utterance) -> TtsResult<()> {
        Ok(())
    }

    fn cancel(&self) {}

    fn name(&self) -> &'static str {
        "silent"
    }
}
