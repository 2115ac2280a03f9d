//! The scene table: five time-boxed shots partitioning the 60 second running time.

use crate::errors::TimelineError;
use crate::scenes::{hallway, overlay, SceneKind};
use crate::systems::assets::FontBook;
use crate::systems::transitions::TransitionSettings;
use crate::timeline::{find_active_or_last, validate_partition, Timed};
use crate::types::{Color, TimeSpan, TOTAL_DURATION_MS};
use serde::Serialize;
use skia_safe::canvas::SaveLayerRec;
use skia_safe::{Canvas, Paint};

/// A storyboard entry. Boundaries are independent of the narration segments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scene {
    pub start_ms: f64,
    pub end_ms: f64,
    pub kind: SceneKind,
}

impl Timed for Scene {
    fn span(&self) -> TimeSpan {
        TimeSpan::new(self.start_ms, self.end_ms)
    }
}

pub const SCENE_TABLE: [Scene; 5] = [
    Scene {
        start_ms: 0.0,
        end_ms: 12_000.0,
        kind: SceneKind::Hallway,
    },
    Scene {
        start_ms: 12_000.0,
        end_ms: 24_000.0,
        kind: SceneKind::InteriorWhispers,
    },
    Scene {
        start_ms: 24_000.0,
        end_ms: 36_000.0,
        kind: SceneKind::InteriorStutter,
    },
    Scene {
        start_ms: 36_000.0,
        end_ms: 48_000.0,
        kind: SceneKind::Reflection,
    },
    Scene {
        start_ms: 48_000.0,
        end_ms: TOTAL_DURATION_MS,
        kind: SceneKind::Escape,
    },
];

/// The scene resolved for an elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActiveScene {
    pub index: usize,
    pub kind: SceneKind,
    /// Local progress inside the scene, clamped to `[0, 1]`.
    pub progress: f64,
}

/// Scene table plus the rendering resources the painters need.
#[derive(Clone)]
pub struct Storyboard {
    scenes: Vec<Scene>,
    fonts: FontBook,
    transition: TransitionSettings,
}

impl Storyboard {
    pub fn new(fonts: FontBook) -> Self {
        Self {
            scenes: SCENE_TABLE.to_vec(),
            fonts,
            transition: TransitionSettings::default(),
        }
    }

    pub fn with_transition(mut self, transition: TransitionSettings) -> Self {
        self.transition = transition;
        self
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    pub fn transition(&self) -> &TransitionSettings {
        &self.transition
    }

    /// Checks that the scenes tile `[0, 60000)` with no gaps or overlaps.
    pub fn validate(&self) -> Result<(), TimelineError> {
        validate_partition(&self.scenes, TOTAL_DURATION_MS)
    }

    /// Finds the scene for `elapsed_ms` and its local progress.
    ///
    /// Past the end of the table (clock overshoot, or exactly the total) the last scene is
    /// returned; progress is clamped either way.
    pub fn resolve(&self, elapsed_ms: f64) -> ActiveScene {
        let index = find_active_or_last(&self.scenes, elapsed_ms).unwrap_or(0);
        let scene = &self.scenes[index];
        ActiveScene {
            index,
            kind: scene.kind,
            progress: scene.span().local_progress(elapsed_ms),
        }
    }

    /// Draws the full frame for `elapsed_ms`: the active scene, then dust and vignette.
    pub fn draw(&self, canvas: &Canvas, elapsed_ms: f64) -> ActiveScene {
        let active = self.resolve(elapsed_ms);
        canvas.clear(Color::TRANSPARENT.to_skia());

        match self.transition.crossfade(&self.scenes, &active, elapsed_ms) {
            Some(fade) => {
                fade.from.kind.draw(canvas, &self.fonts, 1.0);
                let mut paint = Paint::default();
                paint.set_alpha_f(fade.alpha);
                canvas.save_layer(&SaveLayerRec::default().paint(&paint));
                active.kind.draw(canvas, &self.fonts, active.progress);
                canvas.restore();
            }
            None => active.kind.draw(canvas, &self.fonts, active.progress),
        }

        overlay::dust(canvas, elapsed_ms / TOTAL_DURATION_MS);
        overlay::vignette(canvas);
        active
    }

    /// The still shown before the first play: dark backdrop, the closed door, the vignette.
    pub fn draw_poster(&self, canvas: &Canvas) {
        canvas.clear(Color::rgb8(0x05, 0x03, 0x0a).to_skia());
        hallway::door(canvas, &self.fonts, 0.0, 0.6);
        overlay::vignette(canvas);
    }
}
