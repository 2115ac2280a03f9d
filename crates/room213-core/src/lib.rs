//! # Room 213 Core
//!
//! `room213-core` renders *Room 213*, a fixed 60 second vertical (720x1280) horror vignette,
//! and schedules its whispered narration.
//!
//! It combines a hardcoded storyboard of procedural [Skia](https://skia.org/) painters with a
//! timestamp-driven playback driver that picks the active scene, draws it, and hands each
//! narration segment to a speech backend exactly once per run.
//!
//! ## Core Features
//!
//! *   **Deterministic Frames**: Every painter is a pure function of progress; replays and
//!     offline export match live playback pixel for pixel.
//! *   **Host-Driven Clock**: The driver never sleeps or reads the time. The host feeds it
//!     timestamps, so realtime playback and synthetic-clock export share one code path.
//! *   **Cancellable Ticks**: Stop and replay invalidate any frame already queued.
//! *   **Pluggable Speech**: Narration goes through `room213_tts::SpeechBackend`; with no
//!     backend the vignette plays silently.
//! *   **PNG Export**: Parallel PNG sequence plus a narration cue sheet.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use room213_core::{DefaultFontLoader, FontBook, PlaybackDriver, PlaybackSession, Storyboard};
//!
//! let storyboard = Storyboard::new(FontBook::load(&DefaultFontLoader));
//! let mut driver = PlaybackDriver::new(storyboard, PlaybackSession::silent());
//! let mut surface = room213_core::systems::renderer::frame_surface().unwrap();
//!
//! let mut request = driver.play();
//! for timestamp in [0.0, 16.7, 33.4] {
//!     let outcome = driver.tick(request, timestamp, Some(surface.canvas()));
//!     match driver.pending_frame() {
//!         Some(next) if !outcome.is_finished() => request = next,
//!         _ => break,
//!     }
//! }
//! ```

/// Shared data structures: colors, time spans and canvas constants.
pub mod types;

pub mod errors;

/// Easing curves for optional scene cross-fades.
pub mod animation;

/// Right-open interval lookup and partition checks.
pub mod timeline;

pub mod script;

/// Procedural painters for each shot, plus the dust and vignette overlay.
pub mod scenes;

pub mod storyboard;

/// Core systems (fonts, rendering, transitions).
pub mod systems;

/// The playback state machine and narration dispatch.
pub mod playback;

pub mod hud;

pub mod config;

/// PNG sequence export.
pub mod export;

pub use config::{ExportConfig, PlaybackConfig};
pub use errors::{RenderError, TimelineError};
pub use playback::{
    FrameRequest, PlaybackDriver, PlaybackPhase, PlaybackSession, PlaybackSnapshot, TickOutcome,
    TickReport,
};
pub use scenes::SceneKind;
pub use script::{NarrativeSegment, NARRATIVE_SCRIPT};
pub use storyboard::{ActiveScene, Scene, Storyboard, SCENE_TABLE};
pub use systems::assets::FontBook;
pub use types::{Color, TimeSpan, CANVAS_HEIGHT, CANVAS_WIDTH, TOTAL_DURATION_MS};

use tracing::{debug, instrument};

/// Environment variable naming a font file to use for on-canvas text.
pub const FONT_ENV_VAR: &str = "ROOM213_FONT";

/// A trait for abstracting where font bytes come from.
///
/// This allows embedding the vignette where fonts are bundled into the binary or fetched from
/// an archive instead of read from disk.
pub trait FontLoader: Send + Sync {
    /// Returns the bytes of the preferred font, or `None` to fall back to system fonts.
    fn load_font(&self) -> Option<Vec<u8>>;
}

/// The default implementation of `FontLoader` using the local filesystem.
pub struct DefaultFontLoader;

impl FontLoader for DefaultFontLoader {
    /// Checks the `ROOM213_FONT` environment variable, then `assets/fonts/FiraSans-Regular.ttf`.
    #[instrument(level = "debug", skip(self))]
    fn load_font(&self) -> Option<Vec<u8>> {
        if let Ok(path) = std::env::var(FONT_ENV_VAR) {
            match std::fs::read(&path) {
                Ok(bytes) => return Some(bytes),
                Err(e) => debug!("{} set to {} but unreadable: {}", FONT_ENV_VAR, path, e),
            }
        }
        std::fs::read("assets/fonts/FiraSans-Regular.ttf").ok()
    }
}

/// Loads fonts from a fixed path, e.g. one given on the command line.
pub struct PathFontLoader(pub std::path::PathBuf);

impl FontLoader for PathFontLoader {
    fn load_font(&self) -> Option<Vec<u8>> {
        std::fs::read(&self.0).ok()
    }
}
