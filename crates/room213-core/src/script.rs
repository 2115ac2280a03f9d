//! The narration script: seven captions, spoken once each as the clock passes their start.

use crate::timeline::{find_active, Timed};
use crate::types::TimeSpan;
use serde::Serialize;

/// A time-boxed caption and utterance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NarrativeSegment {
    pub start_ms: f64,
    pub end_ms: f64,
    pub text: &'static str,
}

impl Timed for NarrativeSegment {
    fn span(&self) -> TimeSpan {
        TimeSpan::new(self.start_ms, self.end_ms)
    }
}

pub const NARRATIVE_SCRIPT: [NarrativeSegment; 7] = [
    NarrativeSegment {
        start_ms: 0.0,
        end_ms: 7_000.0,
        text: "I should have asked for any room but 213. The hallway smells like rain-soaked carpet, and every footstep echoes like someone is following me.",
    },
    NarrativeSegment {
        start_ms: 7_000.0,
        end_ms: 14_000.0,
        text: "The brass numbers glow dull red. Two. One. Three. The keycard shakes in my hand, but somehow the lock still clicks open.",
    },
    NarrativeSegment {
        start_ms: 14_000.0,
        end_ms: 24_000.0,
        text: "Inside, the air is still. The wallpaper lifts in tiny blisters, breathing. Each breath reminds me I'm alone\u{2014}at least, I want to believe I am.",
    },
    NarrativeSegment {
        start_ms: 24_000.0,
        end_ms: 34_000.0,
        text: "The lights stutter. For a heartbeat, everything goes black, and in the dark something whispers right beside my ear.",
    },
    NarrativeSegment {
        start_ms: 34_000.0,
        end_ms: 44_000.0,
        text: "When the lights return, my reflection is already staring back from the mirror. But it's smiling, and I'm not.",
    },
    NarrativeSegment {
        start_ms: 44_000.0,
        end_ms: 52_000.0,
        text: "It raises a hand I haven't moved, beckoning me closer. I can hear a hotel lullaby, sung through gritted teeth.",
    },
    NarrativeSegment {
        start_ms: 52_000.0,
        end_ms: 60_000.0,
        text: "I run. The hallway stretches forever, but the door keeps appearing ahead. Room 213 follows me\u{2014}no matter where I go.",
    },
];

/// The caption to highlight at `elapsed_ms`; `None` once the clock reaches the end.
pub fn active_segment_index(elapsed_ms: f64) -> Option<usize> {
    find_active(&NARRATIVE_SCRIPT, elapsed_ms)
}
