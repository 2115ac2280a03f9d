//! # Transitions System
//!
//! Scene changes are hard cuts by default. A positive `crossfade_ms` layers the incoming scene
//! over the outgoing one (held at its final frame) for the first part of the new scene.

use crate::animation::EasingType;
use crate::storyboard::{ActiveScene, Scene};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionSettings {
    /// Length of the cross-fade into each scene after the first. `0` means hard cuts.
    #[serde(default)]
    pub crossfade_ms: f64,
    #[serde(default)]
    pub easing: EasingType,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            crossfade_ms: 0.0,
            easing: EasingType::Linear,
        }
    }
}

/// A cross-fade in progress: draw `from` at its last frame, then the active scene at `alpha`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossfade {
    pub from: Scene,
    pub alpha: f32,
}

impl TransitionSettings {
    pub fn is_hard_cut(&self) -> bool {
        self.crossfade_ms <= 0.0
    }

    /// Returns the fade to apply at `elapsed_ms`, if any.
    pub fn crossfade(
        &self,
        scenes: &[Scene],
        active: &ActiveScene,
        elapsed_ms: f64,
    ) -> Option<Crossfade> {
        if self.is_hard_cut() || active.index == 0 {
            return None;
        }
        let since_cut = elapsed_ms - scenes[active.index].start_ms;
        if !(0.0..self.crossfade_ms).contains(&since_cut) {
            return None;
        }
        let linear = (since_cut / self.crossfade_ms) as f32;
        Some(Crossfade {
            from: scenes[active.index - 1],
            alpha: self.easing.eval(linear),
        })
    }
}
