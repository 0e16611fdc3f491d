//! Clicky switch: sawtooth body with a sharp 880 Hz click.

use mechvibe_core::{Adsr, EnvelopeShape, KeyCategory, ProfileId, Waveform};

use crate::profile::{
    BaseConfig, Blend, Body, ChannelGains, KeyAdjustment, KeyAdjustments, NoiseBlend,
    ProfileMetadata, RecommendedSettings, StereoImage, SwitchProfile, Transient, TransientKind,
};

/// Build the clicky profile.
pub fn profile() -> SwitchProfile {
    SwitchProfile {
        id: ProfileId::Clicky,
        metadata: ProfileMetadata {
            name: "Clicky".to_string(),
            description: "Loud & satisfying".to_string(),
            long_description: "Clicky switches provide both tactile feedback and an audible \
                               click sound. Perfect for typists who love satisfying auditory \
                               feedback."
                .to_string(),
            icon: "bullseye".to_string(),
            color: "#f59e0b".to_string(),
        },
        base: BaseConfig {
            body: Body::Tonal {
                waveform: Waveform::Sawtooth,
            },
            base_frequency_hz: 220.0,
            envelope: Adsr::new(0.001, 0.03, 0.1, 0.1),
            envelope_shape: EnvelopeShape::Linear,
            noise_amount: 0.3,
            noise_blend: NoiseBlend::KeyScaled,
            filter_cutoff_hz: 3000.0,
            filter_slope: 1.0,
            transient: Some(Transient {
                kind: TransientKind::Click { attack: 0.001 },
                frequency_hz: 880.0,
                duration: 0.01,
                intensity: 0.5,
                blend: Blend { dry: 0.6, wet: 0.4 },
            }),
            // The click leans right while it sounds
            stereo: StereoImage {
                gains: ChannelGains {
                    left: 0.9,
                    right: 0.9,
                },
                transient_gains: Some(ChannelGains {
                    left: 0.95,
                    right: 1.05,
                }),
                right_delay: None,
            },
        },
        adjustments: KeyAdjustments::new(KeyAdjustment::new(1.0, 1.0, 0.3).with_transient(1.0))
            .with(
                KeyCategory::Spacebar,
                KeyAdjustment::new(1.4, 0.7, 0.5)
                    .with_noise(0.15)
                    .with_transient(1.3)
                    .describe("Loud clicky thock"),
            )
            .with(
                KeyCategory::Enter,
                KeyAdjustment::new(1.3, 1.2, 0.4)
                    .with_noise(0.45)
                    .with_transient(1.2)
                    .describe("Sharp clicky return"),
            )
            .with(
                KeyCategory::Backspace,
                KeyAdjustment::new(1.0, 0.9, 0.35)
                    .with_noise(0.24)
                    .with_transient(1.0)
                    .describe("Clicky delete"),
            )
            .with(
                KeyCategory::Shift,
                KeyAdjustment::new(0.9, 1.1, 0.34)
                    .with_transient(1.0)
                    .describe("Clicky shift"),
            )
            .with(
                KeyCategory::Tab,
                KeyAdjustment::new(0.95, 1.05, 0.36)
                    .with_transient(1.0)
                    .describe("Clicky slide"),
            )
            .with(
                KeyCategory::Capslock,
                KeyAdjustment::new(1.0, 1.15, 0.35)
                    .with_transient(1.1)
                    .describe("Clicky toggle"),
            )
            .with(
                KeyCategory::Modifier,
                KeyAdjustment::new(0.8, 0.95, 0.3)
                    .with_transient(0.8)
                    .describe("Clicky modifier"),
            )
            .with(
                KeyCategory::Digit,
                KeyAdjustment::new(1.05, 1.05, 0.33)
                    .with_transient(1.0)
                    .describe("Clicky numbers"),
            )
            .with(
                KeyCategory::Fkey,
                KeyAdjustment::new(0.9, 1.1, 0.31)
                    .with_transient(0.9)
                    .describe("Clicky functions"),
            ),
        recommended: RecommendedSettings {
            volume: 0.9,
            pitch: 1.0,
            pitch_variation: 0.2,
            overlap: true,
        },
    }
}
