//! # Room 213 Speech
//!
//! Narration backends for the Room 213 vignette.
//!
//! The playback driver never talks to a synthesizer directly. It hands an [`Utterance`] to a
//! [`SpeechBackend`] and moves on: speaking is fire-and-forget, cancellation drops everything
//! queued or in flight, and the voice catalog arrives whenever the backend gets around to it.
//!
//! ## Backends
//! - [`backends::SilentSpeech`]: no catalog, no sound. Used when narration is unavailable.
//! - [`backends::LogSpeech`]: captions emitted as `tracing` events.
//! - [`backends::RecordingSpeech`]: in-memory fake that records every call.
//! - [`backends::ProcessSpeech`]: an external synthesizer command (`espeak-ng` by default).

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod backends;
pub mod voices;

pub use voices::{select_preferred_voice, VoiceCache};

#[derive(Error, Debug)]
pub enum TtsError {
    #[error("Speech backend unavailable: {0}")]
    Unavailable(String),
    #[error("Failed to spawn synthesizer: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("Speech worker channel closed")]
    ChannelClosed,
    #[error("Backend error: {0}")]
    Backend(String),
}

pub type TtsResult<T> = Result<T, TtsError>;

/// A voice advertised by a backend's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub name: String,
    /// BCP 47 style language tag, e.g. `en-US`.
    pub lang: String,
    #[serde(default)]
    pub default: bool,
}

impl Voice {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
            default: false,
        }
    }
}

/// Delivery parameters, on the Web Speech scale (`1.0` is neutral for pitch and rate).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeechParams {
    pub pitch: f32,
    pub rate: f32,
    pub volume: f32,
}

impl Default for SpeechParams {
    fn default() -> Self {
        Self {
            pitch: 1.0,
            rate: 1.0,
            volume: 1.0,
        }
    }
}

/// One request to speak a piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub params: SpeechParams,
    pub voice: Option<Voice>,
}

impl Utterance {
    pub fn new(text: impl Into<String>, params: SpeechParams) -> Self {
        Self {
            text: text.into(),
            params,
            voice: None,
        }
    }

    pub fn with_voice(mut self, voice: Option<Voice>) -> Self {
        self.voice = voice;
        self
    }

    /// Language of the utterance, taken from its voice.
    pub fn lang(&self) -> Option<&str> {
        self.voice.as_ref().map(|v| v.lang.as_str())
    }
}

/// Callback fired whenever a backend's voice catalog changes. May fire more than once.
pub type VoicesListener = Box<dyn Fn(&[Voice]) + Send + Sync>;

/// An external, independently scheduled speech capability.
pub trait SpeechBackend: Send + Sync {
    /// The voices currently known. May be empty until the catalog has loaded.
    fn voices(&self) -> Vec<Voice>;

    /// Registers a listener for catalog updates.
    fn on_voices_changed(&self, listener: VoicesListener);

    /// Queues an utterance and returns immediately.
    fn speak(&self, utterance: Utterance) -> TtsResult<()>;

    /// Drops every queued utterance and interrupts the one in progress.
    fn cancel(&self);

    /// Returns the backend name (e.g. "silent", "espeak-ng").
    fn name(&self) -> &'static str;
}
