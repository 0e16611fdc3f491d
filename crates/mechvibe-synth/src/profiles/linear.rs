//! Linear switch: smooth sine thock, no bump, no click.

use mechvibe_core::{Adsr, EnvelopeShape, KeyCategory, ProfileId, Waveform};

use crate::profile::{
    BaseConfig, Body, ChannelGains, KeyAdjustment, KeyAdjustments, NoiseBlend, ProfileMetadata,
    RecommendedSettings, StereoImage, SwitchProfile,
};

/// Build the linear profile.
pub fn profile() -> SwitchProfile {
    SwitchProfile {
        id: ProfileId::Linear,
        metadata: ProfileMetadata {
            name: "Linear".to_string(),
            description: "Smooth & quiet typing".to_string(),
            long_description: "Linear switches provide a smooth keystroke with no tactile bump \
                               or audible click. Perfect for fast typing and gaming."
                .to_string(),
            icon: "wave-square".to_string(),
            color: "#6366f1".to_string(),
        },
        base: BaseConfig {
            body: Body::Tonal {
                waveform: Waveform::Sine,
            },
            base_frequency_hz: 120.0,
            envelope: Adsr::new(0.001, 0.1, 0.3, 0.2),
            envelope_shape: EnvelopeShape::Linear,
            noise_amount: 0.1,
            noise_blend: NoiseBlend::ProfileDry,
            filter_cutoff_hz: 2000.0,
            filter_slope: 1.0,
            transient: None,
            stereo: StereoImage {
                gains: ChannelGains {
                    left: 0.9,
                    right: 0.95,
                },
                transient_gains: None,
                right_delay: None,
            },
        },
        adjustments: KeyAdjustments::new(KeyAdjustment::new(1.0, 1.0, 0.3))
            .with(
                KeyCategory::Spacebar,
                KeyAdjustment::new(1.2, 0.7, 0.4)
                    .with_noise(0.05)
                    .describe("Deep thock"),
            )
            .with(
                KeyCategory::Enter,
                KeyAdjustment::new(1.1, 1.2, 0.35)
                    .with_noise(0.15)
                    .describe("Sharp return"),
            )
            .with(
                KeyCategory::Backspace,
                KeyAdjustment::new(0.9, 0.9, 0.25)
                    .with_noise(0.08)
                    .describe("Soft delete"),
            )
            .with(
                KeyCategory::Shift,
                KeyAdjustment::new(0.8, 1.1, 0.28).describe("Subtle shift"),
            )
            .with(
                KeyCategory::Tab,
                KeyAdjustment::new(0.85, 1.05, 0.32).describe("Tab slide"),
            )
            .with(
                KeyCategory::Capslock,
                KeyAdjustment::new(0.9, 1.15, 0.3).describe("Toggle click"),
            )
            .with(
                KeyCategory::Modifier,
                KeyAdjustment::new(0.7, 0.95, 0.2).describe("Modifier"),
            )
            .with(
                KeyCategory::Digit,
                KeyAdjustment::new(0.95, 1.05, 0.28).describe("Number keys"),
            )
            .with(
                KeyCategory::Fkey,
                KeyAdjustment::new(0.8, 1.1, 0.25).describe("Function keys"),
            ),
        recommended: RecommendedSettings {
            volume: 0.7,
            pitch: 1.0,
            pitch_variation: 0.1,
            overlap: true,
        },
    }
}
