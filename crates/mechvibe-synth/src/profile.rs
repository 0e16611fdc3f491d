//! Switch profile data model.
//!
//! A [`SwitchProfile`] is plain data: everything that distinguishes a linear
//! switch from a typewriter lives in these records, and one shared render
//! function interprets them. Adding a profile means adding data, never a new
//! code path in the synthesizer.
//!
//! Profiles are serde-serializable so they can be dumped to TOML, tuned by
//! hand and loaded back.

use mechvibe_core::{Adsr, EnvelopeShape, KeyCategory, ProfileId, Waveform};
use serde::{Deserialize, Serialize};

/// A complete switch personality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchProfile {
    /// Profile identifier.
    pub id: ProfileId,
    /// Display metadata.
    pub metadata: ProfileMetadata,
    /// Synthesis parameters shared by every key.
    pub base: BaseConfig,
    /// Per-category adjustments.
    pub adjustments: KeyAdjustments,
    /// Settings the profile sounds best with.
    pub recommended: RecommendedSettings,
}

impl SwitchProfile {
    /// Adjustment for `category`, falling back to the default entry.
    pub fn adjustment(&self, category: KeyCategory) -> &KeyAdjustment {
        self.adjustments.get(category)
    }
}

/// Human-facing description of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileMetadata {
    /// Display name.
    pub name: String,
    /// One-line summary.
    pub description: String,
    /// Paragraph-length description.
    pub long_description: String,
    /// Icon identifier.
    pub icon: String,
    /// Accent color as `#rrggbb`.
    pub color: String,
}

/// Parameters of the sound body, envelope, noise and filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseConfig {
    /// What generates the body of the sound.
    pub body: Body,
    /// Base frequency in Hz before per-key multipliers and jitter.
    pub base_frequency_hz: f32,
    /// Envelope times.
    pub envelope: Adsr,
    /// Envelope curve family.
    #[serde(default)]
    pub envelope_shape: EnvelopeShape,
    /// Noise amount in [0, 1].
    pub noise_amount: f32,
    /// How the noise term is mixed into a tonal body.
    #[serde(default)]
    pub noise_blend: NoiseBlend,
    /// Cutoff of the simulated low-pass, in Hz.
    pub filter_cutoff_hz: f32,
    /// Exponent multiplier of the low-pass tail.
    #[serde(default = "unit_slope")]
    pub filter_slope: f32,
    /// Optional burst layered over the first milliseconds.
    #[serde(default)]
    pub transient: Option<Transient>,
    /// Per-channel gains and delay.
    pub stereo: StereoImage,
}

fn unit_slope() -> f32 {
    1.0
}

/// Mixing rule for the noise term of a tonal body.
///
/// With `n` the profile noise amount, `s` the key's noise scale and `u`
/// uniform in [-1, 1]:
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseBlend {
    /// `a = n·s`, then `signal·(1 − a) + u·a·a`.
    #[default]
    KeyScaled,
    /// `signal·(1 − n) + u·n·s·n`: the dry weight ignores the key scale.
    ProfileDry,
}

/// Source of the sound body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Body {
    /// A single waveform at the keystroke frequency.
    Tonal {
        /// Waveform of the body.
        waveform: Waveform,
    },
    /// Layered thud, metal ring, impact noise, spring and paper rustle.
    Mechanical(MechanicalBody),
}

/// Layers of a struck-mechanism body.
///
/// The thud frequency and intensity scale with the key's
/// [`KeyAdjustment::transient_scale`]; the metal ring sits at a fixed ratio
/// above the thud and the spring at a fixed ratio of the keystroke frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MechanicalBody {
    /// Thud frequency in Hz.
    pub thud_hz: f32,
    /// Thud amplitude.
    pub thud_intensity: f32,
    /// Thud exponential decay rate (1/s).
    pub thud_decay: f32,
    /// Metal ring frequency as a multiple of the thud frequency.
    pub metal_ratio: f32,
    /// Metal ring amplitude.
    pub metal_vibration: f32,
    /// Metal ring decay rate (1/s).
    pub metal_decay: f32,
    /// Impact noise decay rate (1/s).
    pub impact_decay: f32,
    /// Spring frequency as a multiple of the keystroke frequency.
    pub spring_ratio: f32,
    /// Spring amplitude.
    pub spring_level: f32,
    /// Spring decay rate (1/s).
    pub spring_decay: f32,
    /// Mix weights of the four layers.
    pub mix: MechanicalMix,
    /// Optional paper rustle window.
    #[serde(default)]
    pub paper: Option<PaperRustle>,
}

/// Mix weights for [`MechanicalBody`] layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MechanicalMix {
    /// Thud weight.
    pub thud: f32,
    /// Metal ring weight.
    pub metal: f32,
    /// Impact noise weight.
    pub impact: f32,
    /// Spring weight.
    pub spring: f32,
}

/// Decaying noise added strictly between `start` and `end` seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaperRustle {
    /// Window start in seconds (exclusive).
    pub start: f32,
    /// Window end in seconds (exclusive).
    pub end: f32,
    /// Noise level at the window start.
    pub level: f32,
    /// Decay rate (1/s) measured from the window start.
    pub decay: f32,
}

/// A short additive burst near the start of the sound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transient {
    /// Burst shape.
    pub kind: TransientKind,
    /// Burst sine frequency in Hz.
    pub frequency_hz: f32,
    /// Burst length in seconds.
    pub duration: f32,
    /// Burst amplitude.
    pub intensity: f32,
    /// Dry/wet ratio while the burst is active.
    pub blend: Blend,
}

/// Envelope of a [`Transient`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum TransientKind {
    /// Linearly falling bump.
    Bump,
    /// Fast linear rise over `attack`, then linear fall.
    Click {
        /// Rise time in seconds.
        attack: f32,
    },
}

/// Dry/wet weights used while a transient is active.
///
/// The ratios are tuned per profile by ear and are deliberately not derived
/// from one another.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Blend {
    /// Weight of the body signal.
    pub dry: f32,
    /// Weight of the transient.
    pub wet: f32,
}

/// Left and right gain pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelGains {
    /// Left channel gain.
    pub left: f32,
    /// Right channel gain.
    pub right: f32,
}

/// Right-channel delay: the right channel replays the left one late.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelDelay {
    /// Delay in seconds.
    pub seconds: f32,
}

/// Stereo width illusion.
///
/// Tonal profiles lean slightly right with left 0.9 / right 0.95.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StereoImage {
    /// Gains applied to the whole sound.
    pub gains: ChannelGains,
    /// Gains used instead while the transient is active.
    #[serde(default)]
    pub transient_gains: Option<ChannelGains>,
    /// Optional inter-channel delay.
    #[serde(default)]
    pub right_delay: Option<ChannelDelay>,
}

/// Per-category multipliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyAdjustment {
    /// Volume multiplier.
    pub volume: f32,
    /// Frequency multiplier applied to the base frequency.
    pub frequency_multiplier: f32,
    /// Sound length in seconds.
    pub duration: f32,
    /// Multiplier on the profile noise amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise_scale: Option<f32>,
    /// Multiplier on the transient (or thud) frequency and intensity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transient_scale: Option<f32>,
    /// Short description of the key's character.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl KeyAdjustment {
    /// Adjustment with only volume, frequency and duration set.
    pub fn new(volume: f32, frequency_multiplier: f32, duration: f32) -> Self {
        Self {
            volume,
            frequency_multiplier,
            duration,
            noise_scale: None,
            transient_scale: None,
            description: None,
        }
    }

    /// Set the noise multiplier.
    #[must_use]
    pub fn with_noise(mut self, scale: f32) -> Self {
        self.noise_scale = Some(scale);
        self
    }

    /// Set the transient multiplier.
    #[must_use]
    pub fn with_transient(mut self, scale: f32) -> Self {
        self.transient_scale = Some(scale);
        self
    }

    /// Set the description.
    #[must_use]
    pub fn describe(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }

    /// Effective noise multiplier (1.0 when unset).
    pub fn noise_scale(&self) -> f32 {
        self.noise_scale.unwrap_or(1.0)
    }

    /// Effective transient multiplier (1.0 when unset).
    pub fn transient_scale(&self) -> f32 {
        self.transient_scale.unwrap_or(1.0)
    }
}

/// One category-specific entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyOverride {
    /// Category the entry applies to.
    pub category: KeyCategory,
    /// The adjustment.
    #[serde(flatten)]
    pub adjustment: KeyAdjustment,
}

/// Default adjustment plus category-specific overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyAdjustments {
    /// Used for any category without an override.
    pub default: KeyAdjustment,
    /// Overrides, at most one per category.
    #[serde(default)]
    pub keys: Vec<KeyOverride>,
}

impl KeyAdjustments {
    /// Start from a default adjustment.
    pub fn new(default: KeyAdjustment) -> Self {
        Self {
            default,
            keys: Vec::new(),
        }
    }

    /// Add or replace the override for `category`.
    #[must_use]
    pub fn with(mut self, category: KeyCategory, adjustment: KeyAdjustment) -> Self {
        self.set(category, adjustment);
        self
    }

    /// Add or replace the override for `category`.
    ///
    /// Setting [`KeyCategory::Default`] replaces the default entry.
    pub fn set(&mut self, category: KeyCategory, adjustment: KeyAdjustment) {
        if category == KeyCategory::Default {
            self.default = adjustment;
            return;
        }
        match self.keys.iter_mut().find(|k| k.category == category) {
            Some(existing) => existing.adjustment = adjustment,
            None => self.keys.push(KeyOverride {
                category,
                adjustment,
            }),
        }
    }

    /// Adjustment for `category`, or the default one.
    pub fn get(&self, category: KeyCategory) -> &KeyAdjustment {
        self.keys
            .iter()
            .find(|k| k.category == category)
            .map_or(&self.default, |k| &k.adjustment)
    }

    /// Whether `category` has its own entry.
    pub fn has_override(&self, category: KeyCategory) -> bool {
        self.keys.iter().any(|k| k.category == category)
    }
}

/// Settings a profile is tuned for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendedSettings {
    /// Master volume.
    pub volume: f32,
    /// Playback-rate multiplier.
    pub pitch: f32,
    /// Pitch jitter depth.
    pub pitch_variation: f32,
    /// Whether consecutive sounds may overlap.
    pub overlap: bool,
}
