//! # Scenes
//!
//! Procedural painters for the five shots of the vignette.
//!
//! Every painter is a pure function of its progress argument: no clocks, no randomness, no
//! retained state. Drawing the same progress twice yields the same pixels, which is what makes
//! replays and offline export identical to live playback.
//!
//! ## Painters
//! - [`hallway::hallway`] + [`hallway::door`]: the corridor and room 213's door.
//! - [`interior::interior`] + [`interior::whispers`]: the breathing room and whisper rings.
//! - [`reflection::reflection`]: the mirror.
//! - [`escape::escape`]: the stretching corridor.
//! - [`overlay`]: dust and vignette, composited over every frame.

pub mod escape;
pub mod hallway;
pub mod interior;
pub mod overlay;
pub mod paint;
pub mod reflection;

use crate::systems::assets::FontBook;
use crate::types::{CANVAS_HEIGHT, CANVAS_WIDTH};
use serde::Serialize;
use skia_safe::Canvas;

pub(crate) const W: f64 = CANVAS_WIDTH as f64;
pub(crate) const H: f64 = CANVAS_HEIGHT as f64;

/// Which composition of painters a storyboard entry draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// Corridor approach; the door grows as the perspective opens up.
    Hallway,
    /// The room settling in, whispers at normal speed.
    InteriorWhispers,
    /// The lights stutter, whispers racing at 1.8x.
    InteriorStutter,
    Reflection,
    Escape,
}

impl SceneKind {
    /// Draws this scene at local `progress` in `[0, 1]`.
    pub fn draw(self, canvas: &Canvas, fonts: &FontBook, progress: f64) {
        let t = progress.clamp(0.0, 1.0);
        match self {
            SceneKind::Hallway => {
                let perspective = hallway::hallway(canvas, t);
                hallway::door(canvas, fonts, t, perspective);
            }
            SceneKind::InteriorWhispers => {
                interior::interior(canvas, t * 0.7);
                interior::whispers(canvas, t);
            }
            SceneKind::InteriorStutter => {
                interior::interior(canvas, t);
                interior::whispers(canvas, t * 1.8);
            }
            SceneKind::Reflection => reflection::reflection(canvas, t),
            SceneKind::Escape => escape::escape(canvas, t),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SceneKind::Hallway => "hallway",
            SceneKind::InteriorWhispers => "interior/whispers",
            SceneKind::InteriorStutter => "interior/stutter",
            SceneKind::Reflection => "reflection",
            SceneKind::Escape => "escape",
        }
    }
}
