//! Typewriter: layered mechanical strike with a delayed right channel.

use mechvibe_core::{Adsr, EnvelopeShape, KeyCategory, ProfileId};

use crate::profile::{
    BaseConfig, Body, ChannelDelay, ChannelGains, KeyAdjustment, KeyAdjustments, MechanicalBody,
    MechanicalMix, NoiseBlend, PaperRustle, ProfileMetadata, RecommendedSettings, StereoImage,
    SwitchProfile,
};

/// Build the typewriter profile.
pub fn profile() -> SwitchProfile {
    SwitchProfile {
        id: ProfileId::Typewriter,
        metadata: ProfileMetadata {
            name: "Typewriter".to_string(),
            description: "Vintage mechanical".to_string(),
            long_description: "Vintage typewriter sound with mechanical keypress, carriage \
                               return simulation, and paper-like noise. Perfect for nostalgic \
                               typing experiences."
                .to_string(),
            icon: "keyboard".to_string(),
            color: "#8b5cf6".to_string(),
        },
        base: BaseConfig {
            body: Body::Mechanical(MechanicalBody {
                thud_hz: 80.0,
                thud_intensity: 0.3,
                thud_decay: 10.0,
                metal_ratio: 3.0,
                metal_vibration: 0.2,
                metal_decay: 15.0,
                impact_decay: 30.0,
                spring_ratio: 0.5,
                spring_level: 0.3,
                spring_decay: 8.0,
                mix: MechanicalMix {
                    thud: 0.4,
                    metal: 0.2,
                    impact: 0.3,
                    spring: 0.1,
                },
                paper: Some(PaperRustle {
                    start: 0.05,
                    end: 0.2,
                    level: 0.1,
                    decay: 20.0,
                }),
            }),
            base_frequency_hz: 100.0,
            envelope: Adsr::new(0.005, 0.3, 0.4, 0.5),
            envelope_shape: EnvelopeShape::Mechanical,
            noise_amount: 0.4,
            noise_blend: NoiseBlend::KeyScaled,
            filter_cutoff_hz: 1500.0,
            filter_slope: 2.0,
            transient: None,
            stereo: StereoImage {
                gains: ChannelGains {
                    left: 1.0,
                    right: 0.9,
                },
                transient_gains: None,
                right_delay: Some(ChannelDelay { seconds: 0.002 }),
            },
        },
        adjustments: KeyAdjustments::new(KeyAdjustment::new(1.0, 1.0, 0.6).with_transient(1.0))
            .with(
                KeyCategory::Spacebar,
                KeyAdjustment::new(1.5, 0.7, 0.8)
                    .with_noise(0.2)
                    .with_transient(1.5)
                    .describe("Heavy typewriter space"),
            )
            .with(
                KeyCategory::Enter,
                KeyAdjustment::new(1.4, 1.2, 0.7)
                    .with_noise(0.6)
                    .with_transient(1.3)
                    .describe("Carriage return"),
            )
            .with(
                KeyCategory::Backspace,
                KeyAdjustment::new(1.1, 0.9, 0.65)
                    .with_noise(0.32)
                    .with_transient(1.1)
                    .describe("Typewriter correction"),
            )
            .with(
                KeyCategory::Shift,
                KeyAdjustment::new(0.95, 1.1, 0.62)
                    .with_transient(1.0)
                    .describe("Shift lever"),
            )
            .with(
                KeyCategory::Tab,
                KeyAdjustment::new(1.0, 1.05, 0.64)
                    .with_transient(1.0)
                    .describe("Tab mechanism"),
            )
            .with(
                KeyCategory::Capslock,
                KeyAdjustment::new(1.05, 1.15, 0.63)
                    .with_transient(1.1)
                    .describe("Caps lock lever"),
            )
            .with(
                KeyCategory::Modifier,
                KeyAdjustment::new(0.85, 0.95, 0.55)
                    .with_transient(0.9)
                    .describe("Modifier lever"),
            )
            .with(
                KeyCategory::Digit,
                KeyAdjustment::new(1.1, 1.05, 0.61)
                    .with_transient(1.0)
                    .describe("Typewriter numbers"),
            )
            .with(
                KeyCategory::Fkey,
                KeyAdjustment::new(0.95, 1.1, 0.59)
                    .with_transient(0.95)
                    .describe("Typewriter functions"),
            ),
        recommended: RecommendedSettings {
            volume: 0.8,
            pitch: 0.9,
            pitch_variation: 0.25,
            overlap: false,
        },
    }
}
