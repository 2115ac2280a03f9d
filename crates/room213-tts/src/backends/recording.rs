use crate::{SpeechBackend, TtsError, TtsResult, Utterance, Voice, VoicesListener};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Recorded {
    voices: Vec<Voice>,
    listeners: Vec<VoicesListener>,
    spoken: Vec<Utterance>,
    cancels: usize,
    fail_speak: bool,
}

/// In-memory backend that records every call.
///
/// Clones share the same log, so a test can keep one handle while the driver owns another.
#[derive(Clone, Default)]
pub struct RecordingSpeech {
    inner: Arc<Mutex<Recorded>>,
}

impl RecordingSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a catalog already loaded.
    pub fn with_voices(voices: Vec<Voice>) -> Self {
        let backend = Self::new();
        if let Ok(mut inner) = backend.inner.lock() {
            inner.voices = voices;
        }
        backend
    }

    /// Replaces the catalog and notifies listeners, like a late `voiceschanged` event.
    pub fn set_voices(&self, voices: Vec<Voice>) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.voices = voices;
            let Recorded {
                voices, listeners, ..
            } = &*inner;
            for listener in listeners {
                listener(voices);
            }
        }
    }

    /// Makes subsequent `speak` calls fail.
    pub fn fail_speak(&self, fail: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.fail_speak = fail;
        }
    }

    pub fn spoken(&self) -> Vec<Utterance> {
        self.inner
            .lock()
            .map(|inner| inner.spoken.clone())
            .unwrap_or_default()
    }

    pub fn spoken_texts(&self) -> Vec<String> {
        self.spoken().into_iter().map(|u| u.text).collect()
    }

    pub fn cancel_count(&self) -> usize {
        self.inner.lock().map(|inner| inner.cancels).unwrap_or(0)
    }

    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.spoken.clear();
            inner.cancels = 0;
        }
    }
}

impl SpeechBackend for RecordingSpeech {
    fn voices(&self) -> Vec<Voice> {
        self.inner
            .lock()
            .map(|inner| inner.voices.clone())
            .unwrap_or_default()
    }

    fn on_voices_changed(&self, listener: VoicesListener) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.listeners.push(listener);
        }
    }

    fn speak(&self, utterance: Utterance) -> TtsResult<()> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|e| TtsError::Backend(e.to_string()))?;
        if inner.fail_speak {
            return Err(TtsError::Backend("recording backend told to fail".into()));
        }
        inner.spoken.push(utterance);
        Ok(())
    }

    fn cancel(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.cancels += 1;
        }
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
