use room213_tts::{SpeechBackend, Voice, VoiceCache};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Per-run narration state plus the session-wide voice choice.
///
/// The spoken set is reset on every play and stop. The voice cache outlives runs: it is
/// refreshed from the backend's catalog whenever that catalog changes.
pub struct PlaybackSession {
    backend: Option<Arc<dyn SpeechBackend>>,
    spoken: BTreeSet<usize>,
    voices: VoiceCache,
}

impl PlaybackSession {
    /// Attaches a speech backend. `None` means silent playback.
    pub fn new(backend: Option<Arc<dyn SpeechBackend>>) -> Self {
        let voices = VoiceCache::new();
        match &backend {
            Some(backend) => {
                // Listener first, so a catalog landing between the two calls is not missed.
                let listener_cache = voices.clone();
                backend.on_voices_changed(Box::new(move |catalog: &[Voice]| {
                    listener_cache.refresh(catalog);
                }));
                voices.refresh(&backend.voices());
                info!(backend = backend.name(), "Speech backend attached");
            }
            None => info!("No speech backend, narration disabled"),
        }
        Self {
            backend,
            spoken: BTreeSet::new(),
            voices,
        }
    }

    pub fn silent() -> Self {
        Self::new(None)
    }

    pub fn backend(&self) -> Option<&Arc<dyn SpeechBackend>> {
        self.backend.as_ref()
    }

    pub fn has_speech(&self) -> bool {
        self.backend.is_some()
    }

    /// The voice narration currently uses, if the catalog offered one.
    pub fn voice(&self) -> Option<Voice> {
        self.voices.get()
    }

    pub fn voice_cache(&self) -> &VoiceCache {
        &self.voices
    }

    pub fn spoken(&self) -> &BTreeSet<usize> {
        &self.spoken
    }

    pub fn is_spoken(&self, index: usize) -> bool {
        self.spoken.contains(&index)
    }

    /// Returns `false` if the segment was already spoken this run.
    pub(crate) fn mark_spoken(&mut self, index: usize) -> bool {
        self.spoken.insert(index)
    }

    pub fn cancel_speech(&self) {
        if let Some(backend) = &self.backend {
            backend.cancel();
        }
    }

    /// Forgets what was spoken and silences the backend.
    pub fn reset(&mut self) {
        debug!(spoken = self.spoken.len(), "narration session reset");
        self.spoken.clear();
        self.cancel_speech();
    }
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::silent()
    }
}
