//! Preferred-voice selection and the session-wide voice slot.

use crate::Voice;
use std::sync::{Arc, Mutex};
use tracing::debug;

const NATURAL_MARKERS: [&str; 3] = ["alloy", "neural", "natural"];

/// Picks the narration voice from a catalog.
///
/// Priority: a voice whose name mentions `alloy`, `neural` or `natural` (any case), then an
/// English-named voice tagged `en*`, then whatever comes first.
pub fn select_preferred_voice(available: &[Voice]) -> Option<Voice> {
    available
        .iter()
        .find(|voice| {
            let name = voice.name.to_lowercase();
            NATURAL_MARKERS.iter().any(|marker| name.contains(marker))
        })
        .or_else(|| {
            available.iter().find(|voice| {
                voice.name.to_lowercase().contains("english") && voice.lang.starts_with("en")
            })
        })
        .or_else(|| available.first())
        .cloned()
}

/// Shared slot holding the currently preferred voice.
///
/// Cloning yields a handle onto the same slot, so a catalog listener registered with a backend
/// can keep it current while the narrator reads from it.
#[derive(Clone, Default, Debug)]
pub struct VoiceCache {
    slot: Arc<Mutex<Option<Voice>>>,
}

impl VoiceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-runs selection against a fresh catalog. Idempotent for an unchanged catalog.
    pub fn refresh(&self, available: &[Voice]) -> Option<Voice> {
        let picked = select_preferred_voice(available);
        debug!(
            voices = available.len(),
            picked = picked.as_ref().map(|v| v.name.as_str()),
            "voice catalog refreshed"
        );
        if let Ok(mut slot) = self.slot.lock() {
            *slot = picked.clone();
        }
        picked
    }

    pub fn get(&self) -> Option<Voice> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    pub fn clear(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Voice> {
        vec![
            Voice::new("Fred", "en-US"),
            Voice::new("Google UK English Female", "en-GB"),
            Voice::new("Microsoft Aria Online (Natural) - English", "en-US"),
        ]
    }

    #[test]
    fn natural_voice_wins() {
        let picked = select_preferred_voice(&catalog()).unwrap();
        assert_eq!(picked.name, "Microsoft Aria Online (Natural) - English");
    }

    #[test]
    fn english_voice_needs_english_tag() {
        let voices = vec![
            Voice::new("Thomas", "fr-FR"),
            Voice::new("English (Caribbean)", "fr-FR"),
            Voice::new("English (America)", "en-US"),
        ];
        let picked = select_preferred_voice(&voices).unwrap();
        assert_eq!(picked.name, "English (America)");
    }

    #[test]
    fn falls_back_to_first_then_none() {
        let voices = vec![Voice::new("Thomas", "fr-FR"), Voice::new("Anna", "de-DE")];
        assert_eq!(select_preferred_voice(&voices).unwrap().name, "Thomas");
        assert!(select_preferred_voice(&[]).is_none());
    }

    #[test]
    fn cache_is_shared_between_clones() {
        let cache = VoiceCache::new();
        let listener_side = cache.clone();
        listener_side.refresh(&catalog());
        assert_eq!(cache.get().map(|v| v.lang), Some("en-US".to_string()));
        listener_side.refresh(&[]);
        assert!(cache.get().is_none());
    }
}
