//! Tactile switch: triangle body with a bump in the first 20 ms.

use mechvibe_core::{Adsr, EnvelopeShape, KeyCategory, ProfileId, Waveform};

use crate::profile::{
    BaseConfig, Blend, Body, ChannelGains, KeyAdjustment, KeyAdjustments, NoiseBlend,
    ProfileMetadata, RecommendedSettings, StereoImage, SwitchProfile, Transient, TransientKind,
};

/// Build the tactile profile.
pub fn profile() -> SwitchProfile {
    SwitchProfile {
        id: ProfileId::Tactile,
        metadata: ProfileMetadata {
            name: "Tactile".to_string(),
            description: "Bumpy feedback".to_string(),
            long_description: "Tactile switches provide a noticeable bump during the keystroke, \
                               giving satisfying feedback without being too loud. Great for \
                               typing and programming."
                .to_string(),
            icon: "mountain".to_string(),
            color: "#10b981".to_string(),
        },
        base: BaseConfig {
            body: Body::Tonal {
                waveform: Waveform::Triangle,
            },
            base_frequency_hz: 180.0,
            envelope: Adsr::new(0.001, 0.05, 0.2, 0.15),
            envelope_shape: EnvelopeShape::Linear,
            noise_amount: 0.2,
            noise_blend: NoiseBlend::KeyScaled,
            filter_cutoff_hz: 2500.0,
            filter_slope: 1.0,
            transient: Some(Transient {
                kind: TransientKind::Bump,
                frequency_hz: 240.0,
                duration: 0.02,
                intensity: 0.3,
                blend: Blend { dry: 0.7, wet: 0.3 },
            }),
            stereo: StereoImage {
                gains: ChannelGains {
                    left: 0.9,
                    right: 0.95,
                },
                transient_gains: None,
                right_delay: None,
            },
        },
        adjustments: KeyAdjustments::new(KeyAdjustment::new(1.0, 1.0, 0.3).with_transient(1.0))
            .with(
                KeyCategory::Spacebar,
                KeyAdjustment::new(1.3, 0.7, 0.45)
                    .with_noise(0.1)
                    .with_transient(1.2)
                    .describe("Heavy thock with bump"),
            )
            .with(
                KeyCategory::Enter,
                KeyAdjustment::new(1.2, 1.2, 0.38)
                    .with_noise(0.3)
                    .with_transient(1.1)
                    .describe("Sharp tactile return"),
            )
            .with(
                KeyCategory::Backspace,
                KeyAdjustment::new(0.95, 0.9, 0.3)
                    .with_noise(0.16)
                    .with_transient(0.9)
                    .describe("Tactile delete"),
            )
            .with(
                KeyCategory::Shift,
                KeyAdjustment::new(0.85, 1.1, 0.32)
                    .with_transient(1.0)
                    .describe("Tactile shift"),
            )
            .with(
                KeyCategory::Tab,
                KeyAdjustment::new(0.9, 1.05, 0.35)
                    .with_transient(1.0)
                    .describe("Tactile slide"),
            )
            .with(
                KeyCategory::Capslock,
                KeyAdjustment::new(0.95, 1.15, 0.33)
                    .with_transient(1.1)
                    .describe("Tactile toggle"),
            )
            .with(
                KeyCategory::Modifier,
                KeyAdjustment::new(0.75, 0.95, 0.25)
                    .with_transient(0.8)
                    .describe("Tactile modifier"),
            )
            .with(
                KeyCategory::Digit,
                KeyAdjustment::new(1.0, 1.05, 0.31)
                    .with_transient(1.0)
                    .describe("Tactile numbers"),
            )
            .with(
                KeyCategory::Fkey,
                KeyAdjustment::new(0.85, 1.1, 0.28)
                    .with_transient(0.9)
                    .describe("Tactile functions"),
            ),
        recommended: RecommendedSettings {
            volume: 0.8,
            pitch: 1.0,
            pitch_variation: 0.15,
            overlap: true,
        },
    }
}
