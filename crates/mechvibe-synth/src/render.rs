//! Keystroke synthesis.
//!
//! [`render`] turns a [`SwitchProfile`], a [`KeyCategory`] and a pitch
//! variation depth into a [`RenderedBuffer`]. Every sample is evaluated
//! directly from its time `t = i / sample_rate`:
//!
//! ```text
//! body(t) ─► transient blend ─► noise blend ─► × envelope × volume ─► × low-pass tail ─► × channel gain
//! ```
//!
//! Randomness enters in exactly two places, the per-render pitch jitter and
//! the noise terms, and both draw from the caller's [`RandomSource`]. With
//! [`Silence`](mechvibe_core::Silence) the output is fully deterministic.

use mechvibe_core::{
    Adsr, EnvelopeShape, KeyCategory, ProfileId, RandomSource, bump_envelope, click_envelope,
    envelope, exp_decay, lowpass_decay, sine,
};

use crate::buffer::{BufferOrigin, RenderedBuffer};
use crate::error::{Result, SynthError};
use crate::profile::{
    BaseConfig, Body, ChannelGains, KeyAdjustment, MechanicalBody, NoiseBlend, StereoImage,
    SwitchProfile, Transient, TransientKind,
};

/// Options for [`render_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Pitch jitter depth; the frequency is scaled by `1 + u·pitch_variation`
    /// with `u` uniform in [-1, 1].
    pub pitch_variation: f32,
    /// Multiply the key's volume into the samples. When false the volume is
    /// recorded on the buffer and applied at playback instead.
    pub bake_volume: bool,
}

impl RenderOptions {
    /// Options with no jitter and baked volume.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            pitch_variation: 0.0,
            bake_volume: true,
        }
    }

    /// Set the pitch jitter depth.
    #[must_use]
    pub fn pitch_variation(mut self, depth: f32) -> Self {
        self.pitch_variation = depth;
        self
    }

    /// Leave the key volume out of the samples.
    #[must_use]
    pub fn deferred_volume(mut self) -> Self {
        self.bake_volume = false;
        self
    }
}

/// Number of frames for a sound of `duration` seconds: `round(rate · duration)`.
pub fn frame_count(sample_rate: u32, duration: f32) -> usize {
    (f64::from(sample_rate) * f64::from(duration)).round() as usize
}

/// Render a keystroke sound with the key volume baked in.
///
/// Categories without their own adjustment use the profile's default entry.
///
/// # Errors
///
/// [`SynthError::InvalidParameter`] if `sample_rate` is zero, the key's
/// duration is not a positive finite number, or `pitch_variation` is
/// negative or not finite.
///
/// ```rust
/// use mechvibe_core::{KeyCategory, ProfileId, Silence};
/// use mechvibe_synth::{profiles, render};
///
/// let linear = profiles::builtin(ProfileId::Linear);
/// let buffer = render(&linear, KeyCategory::Spacebar, 0.0, 44100, &mut Silence).unwrap();
/// assert_eq!(buffer.frames(), 17640);
/// ```
pub fn render(
    profile: &SwitchProfile,
    category: KeyCategory,
    pitch_variation: f32,
    sample_rate: u32,
    rng: &mut dyn RandomSource,
) -> Result<RenderedBuffer> {
    render_with(
        profile,
        category,
        RenderOptions::new(sample_rate).pitch_variation(pitch_variation),
        rng,
    )
}

/// Render a keystroke sound with explicit options.
pub fn render_with(
    profile: &SwitchProfile,
    category: KeyCategory,
    options: RenderOptions,
    rng: &mut dyn RandomSource,
) -> Result<RenderedBuffer> {
    let adjustment = profile.adjustment(category);
    validate(&options, adjustment)?;

    let sample_rate = options.sample_rate as f32;
    let frames = frame_count(options.sample_rate, adjustment.duration);
    let jitter = 1.0 + rng.bipolar() * options.pitch_variation;
    let frequency = profile.base.base_frequency_hz * adjustment.frequency_multiplier * jitter;

    let voice = Voice {
        base: &profile.base,
        adjustment,
        frequency,
        duration: adjustment.duration,
        sample_rate,
        volume: if options.bake_volume {
            adjustment.volume
        } else {
            1.0
        },
    };
    let stereo = &profile.base.stereo;
    let transient = profile.base.transient.as_ref();

    let left: Vec<f32> = (0..frames)
        .map(|i| {
            let t = i as f32 / sample_rate;
            voice.sample(t, rng) * channel_gains(stereo, transient, t).left
        })
        .collect();

    let right: Vec<f32> = match stereo.right_delay {
        Some(delay) => {
            // The right channel replays the left one late, attenuated
            let offset = (sample_rate * delay.seconds).floor() as usize;
            let gain = stereo.gains.right;
            (0..frames)
                .map(|i| {
                    if i >= offset {
                        left[i - offset] * gain
                    } else {
                        voice.sample(i as f32 / sample_rate, rng) * gain
                    }
                })
                .collect()
        }
        None => (0..frames)
            .map(|i| {
                let t = i as f32 / sample_rate;
                voice.sample(t, rng) * channel_gains(stereo, transient, t).right
            })
            .collect(),
    };

    tracing::debug!(
        profile = %profile.id,
        category = %category,
        frames,
        frequency,
        "rendered keystroke"
    );

    let buffer = RenderedBuffer::from_channels(
        profile.id,
        category,
        options.sample_rate,
        left,
        right,
        BufferOrigin::Synthesized,
    );
    Ok(if options.bake_volume {
        buffer
    } else {
        buffer.with_volume_multiplier(adjustment.volume)
    })
}

fn validate(options: &RenderOptions, adjustment: &KeyAdjustment) -> Result<()> {
    if options.sample_rate == 0 {
        return Err(SynthError::invalid("sample_rate", options.sample_rate));
    }
    if !(adjustment.duration.is_finite() && adjustment.duration > 0.0) {
        return Err(SynthError::invalid("duration", adjustment.duration));
    }
    if !(options.pitch_variation.is_finite() && options.pitch_variation >= 0.0) {
        return Err(SynthError::invalid(
            "pitch_variation",
            options.pitch_variation,
        ));
    }
    Ok(())
}

fn channel_gains(stereo: &StereoImage, transient: Option<&Transient>, t: f32) -> ChannelGains {
    match (stereo.transient_gains, transient) {
        (Some(gains), Some(tr)) if t < tr.duration => gains,
        _ => stereo.gains,
    }
}

/// Per-render constants for evaluating samples.
struct Voice<'a> {
    base: &'a BaseConfig,
    adjustment: &'a KeyAdjustment,
    frequency: f32,
    duration: f32,
    sample_rate: f32,
    volume: f32,
}

impl Voice<'_> {
    #[inline]
    fn sample(&self, t: f32, rng: &mut dyn RandomSource) -> f32 {
        let base = self.base;
        let level = envelope(t, &base.envelope, self.duration, base.envelope_shape);
        let raw = match &base.body {
            Body::Tonal { waveform } => {
                let body = waveform.sample(self.frequency, t);
                self.noisy(self.with_transient(body, t), rng)
            }
            Body::Mechanical(mechanical) => self.mechanical(mechanical, t, rng),
        };
        raw * level
            * self.volume
            * lowpass_decay(t, base.filter_cutoff_hz, self.sample_rate, base.filter_slope)
    }

    fn with_transient(&self, body: f32, t: f32) -> f32 {
        let Some(tr) = &self.base.transient else {
            return body;
        };
        if t >= tr.duration {
            return body;
        }
        let scale = self.adjustment.transient_scale();
        let shape = match tr.kind {
            TransientKind::Bump => bump_envelope(t, tr.duration),
            TransientKind::Click { attack } => click_envelope(t, attack, tr.duration),
        };
        let burst = sine(tr.frequency_hz * scale, t) * tr.intensity * scale * shape;
        body * tr.blend.dry + burst * tr.blend.wet
    }

    fn noisy(&self, signal: f32, rng: &mut dyn RandomSource) -> f32 {
        let profile = self.base.noise_amount;
        let keyed = profile * self.adjustment.noise_scale();
        let noise = rng.bipolar() * keyed;
        match self.base.noise_blend {
            NoiseBlend::KeyScaled => signal * (1.0 - keyed) + noise * keyed,
            NoiseBlend::ProfileDry => signal * (1.0 - profile) + noise * profile,
        }
    }

    fn mechanical(&self, m: &MechanicalBody, t: f32, rng: &mut dyn RandomSource) -> f32 {
        let scale = self.adjustment.transient_scale();
        let thud_hz = m.thud_hz * scale;

        let thud = sine(thud_hz, t) * m.thud_intensity * scale * exp_decay(t, m.thud_decay);
        let metal = sine(thud_hz * m.metal_ratio, t) * m.metal_vibration * exp_decay(t, m.metal_decay);
        let impact = rng.bipolar()
            * self.base.noise_amount
            * self.adjustment.noise_scale()
            * exp_decay(t, m.impact_decay);
        let spring =
            sine(self.frequency * m.spring_ratio, t) * exp_decay(t, m.spring_decay) * m.spring_level;

        let mut sample =
            thud * m.mix.thud + metal * m.mix.metal + impact * m.mix.impact + spring * m.mix.spring;

        if let Some(paper) = m.paper
            && t > paper.start
            && t < paper.end
        {
            sample += rng.bipolar() * paper.level * exp_decay(t - paper.start, paper.decay);
        }
        sample
    }
}

/// Envelope of the emergency tone.
const EMERGENCY_ENVELOPE: Adsr = Adsr::new(0.001, 0.099, 0.3, 0.1);
/// Sine/noise weights of the emergency tone.
const EMERGENCY_SINE_MIX: f32 = 0.8;
const EMERGENCY_NOISE_MIX: f32 = 0.2;
const EMERGENCY_NOISE_LEVEL: f32 = 0.1;
const EMERGENCY_LEFT_GAIN: f32 = 0.9;

/// Frequency and duration of the emergency tone for `category`.
pub fn emergency_tone_params(category: KeyCategory) -> (f32, f32) {
    match category {
        KeyCategory::Spacebar => (80.0, 0.4),
        KeyCategory::Enter => (180.0, 0.3),
        KeyCategory::Backspace => (120.0, 0.3),
        _ => (150.0, 0.3),
    }
}

/// Render the minimal tone used when nothing else can be produced.
///
/// A plain sine with a little noise, independent of any profile data so
/// it works even when the registry is missing the requested profile. The
/// buffer is tagged with `profile` for bookkeeping only.
pub fn emergency_tone(
    profile: ProfileId,
    category: KeyCategory,
    sample_rate: u32,
    rng: &mut dyn RandomSource,
) -> Result<RenderedBuffer> {
    if sample_rate == 0 {
        return Err(SynthError::invalid("sample_rate", sample_rate));
    }
    let (frequency, duration) = emergency_tone_params(category);
    let frames = frame_count(sample_rate, duration);
    let sr = sample_rate as f32;

    let mut channel = |gain: f32| -> Vec<f32> {
        (0..frames)
            .map(|i| {
                let t = i as f32 / sr;
                let level = envelope(t, &EMERGENCY_ENVELOPE, duration, EnvelopeShape::Linear);
                let noise = rng.bipolar() * EMERGENCY_NOISE_LEVEL;
                (sine(frequency, t) * EMERGENCY_SINE_MIX + noise * EMERGENCY_NOISE_MIX)
                    * level
                    * gain
            })
            .collect()
    };
    let left = channel(EMERGENCY_LEFT_GAIN);
    let right = channel(1.0);

    Ok(RenderedBuffer::from_channels(
        profile,
        category,
        sample_rate,
        left,
        right,
        BufferOrigin::Emergency,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::builtin;
    use mechvibe_core::{Silence, Xorshift32};

    #[test]
    fn test_frame_count_rounds() {
        assert_eq!(frame_count(44100, 0.4), 17640);
        assert_eq!(frame_count(22050, 0.33), 7277);
        assert_eq!(frame_count(48000, 0.59), 28320);
    }

    #[test]
    fn test_invalid_sample_rate() {
        let p = builtin(ProfileId::Linear);
        let err = render(&p, KeyCategory::Default, 0.0, 0, &mut Silence).unwrap_err();
        assert!(matches!(
            err,
            SynthError::InvalidParameter {
                name: "sample_rate",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_duration() {
        let mut p = builtin(ProfileId::Linear);
        p.adjustments.default.duration = 0.0;
        let err = render(&p, KeyCategory::Default, 0.0, 48000, &mut Silence).unwrap_err();
        assert!(matches!(
            err,
            SynthError::InvalidParameter {
                name: "duration",
                ..
            }
        ));

        p.adjustments.default.duration = f32::NAN;
        assert!(render(&p, KeyCategory::Default, 0.0, 48000, &mut Silence).is_err());
    }

    #[test]
    fn test_invalid_pitch_variation() {
        let p = builtin(ProfileId::Tactile);
        assert!(render(&p, KeyCategory::Default, -0.1, 48000, &mut Silence).is_err());
        assert!(render(&p, KeyCategory::Default, f32::INFINITY, 48000, &mut Silence).is_err());
    }

    #[test]
    fn test_silent_render_is_deterministic() {
        let p = builtin(ProfileId::Clicky);
        let a = render(&p, KeyCategory::Enter, 0.0, 48000, &mut Silence).unwrap();
        let b = render(&p, KeyCategory::Enter, 0.0, 48000, &mut Silence).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_noise_makes_renders_differ() {
        let p = builtin(ProfileId::Tactile);
        let mut rng = Xorshift32::new(1);
        let a = render(&p, KeyCategory::Default, 0.1, 48000, &mut rng).unwrap();
        let b = render(&p, KeyCategory::Default, 0.1, 48000, &mut rng).unwrap();
        assert_eq!(a.frames(), b.frames());
        assert_ne!(a.left(), b.left());
    }

    #[test]
    fn test_deferred_volume_matches_baked_when_scaled() {
        let p = builtin(ProfileId::Linear);
        let baked = render(&p, KeyCategory::Spacebar, 0.0, 44100, &mut Silence).unwrap();
        let deferred = render_with(
            &p,
            KeyCategory::Spacebar,
            RenderOptions::new(44100).deferred_volume(),
            &mut Silence,
        )
        .unwrap();

        assert_eq!(baked.volume_multiplier(), 1.0);
        assert_eq!(deferred.volume_multiplier(), 1.2);
        for (b, d) in baked.left().iter().zip(deferred.left()) {
            assert!((b - d * 1.2).abs() < 1e-6);
        }
    }

    #[test]
    fn test_typewriter_right_channel_is_delayed_left() {
        let p = builtin(ProfileId::Typewriter);
        let mut rng = Xorshift32::new(9);
        let buf = render(&p, KeyCategory::Default, 0.0, 48000, &mut rng).unwrap();
        let offset = 96; // 2 ms at 48 kHz
        for i in offset..buf.frames() {
            assert!((buf.right()[i] - buf.left()[i - offset] * 0.9).abs() < 1e-7);
        }
    }

    #[test]
    fn test_clicky_click_leans_right() {
        let p = builtin(ProfileId::Clicky);
        let buf = render(&p, KeyCategory::Default, 0.0, 48000, &mut Silence).unwrap();
        // Inside the click window the right gain is 1.05 vs 0.95 on the left
        let i = 240; // 5 ms
        let ratio = buf.right()[i] / buf.left()[i];
        assert!((ratio - 1.05 / 0.95).abs() < 1e-4, "ratio {ratio}");
        // After the click both channels use 0.9
        let i = 4800;
        assert!((buf.right()[i] - buf.left()[i]).abs() < 1e-7);
    }

    /// Ratio of the rendered left sample to the noiseless dry body at frame `i`.
    fn dry_weight(p: &SwitchProfile, category: KeyCategory, i: usize) -> f32 {
        let sr = 48000;
        let buf = render(p, category, 0.0, sr, &mut Silence).unwrap();
        let adj = p.adjustment(category);
        let t = i as f32 / sr as f32;
        let Body::Tonal { waveform } = &p.base.body else {
            panic!("{} has no tonal body", p.id);
        };
        let body = waveform.sample(p.base.base_frequency_hz * adj.frequency_multiplier, t);
        let level = envelope(t, &p.base.envelope, adj.duration, p.base.envelope_shape);
        let tail = lowpass_decay(t, p.base.filter_cutoff_hz, sr as f32, p.base.filter_slope);
        buf.left()[i] / (body * level * adj.volume * tail * p.base.stereo.gains.left)
    }

    #[test]
    fn test_linear_dry_weight_ignores_key_noise_scale() {
        let p = builtin(ProfileId::Linear);
        assert_eq!(p.base.noise_blend, NoiseBlend::ProfileDry);
        // 50 ms in, well past the attack
        for category in [
            KeyCategory::Spacebar,
            KeyCategory::Enter,
            KeyCategory::Backspace,
            KeyCategory::Default,
        ] {
            let w = dry_weight(&p, category, 2400);
            assert!((w - 0.9).abs() < 1e-4, "{category}: dry weight {w}");
        }
    }

    #[test]
    fn test_tactile_dry_weight_follows_key_noise_scale() {
        let p = builtin(ProfileId::Tactile);
        assert_eq!(p.base.noise_blend, NoiseBlend::KeyScaled);
        let w = dry_weight(&p, KeyCategory::Spacebar, 2400);
        assert!((w - (1.0 - 0.2 * 0.1)).abs() < 1e-4, "dry weight {w}");
    }

    #[test]
    fn test_tonal_profiles_share_gain_rule() {
        for id in [ProfileId::Linear, ProfileId::Tactile] {
            let gains = builtin(id).base.stereo.gains;
            assert_eq!((gains.left, gains.right), (0.9, 0.95), "{id}");
        }
    }

    #[test]
    fn test_emergency_tone() {
        let tone = emergency_tone(ProfileId::Linear, KeyCategory::Spacebar, 44100, &mut Silence)
            .unwrap();
        assert_eq!(tone.frames(), 17640);
        assert_eq!(tone.origin(), BufferOrigin::Emergency);
        assert_eq!(tone.left()[0], 0.0);
        assert!(tone.is_finite());
        for i in 1..tone.frames() {
            assert!((tone.left()[i] - tone.right()[i] * 0.9).abs() < 1e-6);
        }

        let other = emergency_tone(ProfileId::Linear, KeyCategory::Tab, 44100, &mut Silence)
            .unwrap();
        assert_eq!(other.frames(), 13230);
        assert!(emergency_tone(ProfileId::Linear, KeyCategory::Tab, 0, &mut Silence).is_err());
    }
}
