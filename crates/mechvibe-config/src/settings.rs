//! User-facing playback settings.

use mechvibe_core::ProfileId;
use mechvibe_synth::{RecommendedSettings, profiles};
use serde::{Deserialize, Serialize};

/// Playback settings supplied by the embedding application.
///
/// Missing fields take their defaults when deserializing, so a config file
/// only needs to mention what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master switch; when false keystrokes are ignored.
    pub enabled: bool,
    /// Master volume in [0, 1].
    pub volume: f32,
    /// Active switch profile.
    pub current_switch: ProfileId,
    /// Playback-rate multiplier.
    pub pitch: f32,
    /// Random pitch jitter depth in [0, 1].
    pub pitch_variation: f32,
    /// Pan keys by their position on the board.
    pub stereo_panning: bool,
    /// Let consecutive sounds ring over each other.
    pub overlap: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 0.7,
            current_switch: ProfileId::Tactile,
            pitch: 1.0,
            pitch_variation: 0.1,
            stereo_panning: false,
            overlap: true,
        }
    }
}

impl Settings {
    /// Default settings switched to `profile` with its recommended values.
    pub fn recommended_for(profile: ProfileId) -> Self {
        Self {
            current_switch: profile,
            ..Self::default()
        }
        .with_recommended(&profiles::builtin(profile).recommended)
    }

    /// Apply a profile's recommended volume, pitch, jitter and overlap.
    #[must_use]
    pub fn with_recommended(mut self, recommended: &RecommendedSettings) -> Self {
        self.volume = recommended.volume;
        self.pitch = recommended.pitch;
        self.pitch_variation = recommended.pitch_variation;
        self.overlap = recommended.overlap;
        self
    }

    /// Builder-style profile switch.
    #[must_use]
    pub fn with_switch(mut self, profile: ProfileId) -> Self {
        self.current_switch = profile;
        self
    }

    /// Builder-style volume change.
    #[must_use]
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }
}
