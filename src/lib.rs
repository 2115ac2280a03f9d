//! # Room 213
//!
//! Facade over the workspace crates:
//!
//! *   [`core`]: storyboard, scene painters, playback driver, HUD and export.
//! *   [`tts`]: speech backends and voice selection.
//!
//! The most used types are re-exported at the top level.

pub use room213_core as core;
pub use room213_tts as tts;

pub use room213_core::{
    ActiveScene, DefaultFontLoader, ExportConfig, FontBook, FrameRequest, PlaybackConfig,
    PlaybackDriver, PlaybackPhase, PlaybackSession, PlaybackSnapshot, SceneKind, Storyboard,
    TickOutcome, TickReport, NARRATIVE_SCRIPT, SCENE_TABLE, TOTAL_DURATION_MS,
};
pub use room213_tts::{SpeechBackend, SpeechParams, Utterance, Voice, VoiceCache};
