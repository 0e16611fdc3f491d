//! Amplitude envelopes evaluated as pure functions of time.
//!
//! Keystroke sounds are short one-shots with a known duration, so the
//! envelope is computed directly from `t` and the total duration rather than
//! by stepping a gate-driven state machine. The release phase is anchored to
//! the *end* of the sound: it occupies the last `release` seconds.
//!
//! Two shapes are provided:
//!
//! - [`EnvelopeShape::Linear`]: piecewise-linear attack, decay to sustain,
//!   flat sustain, linear release.
//! - [`EnvelopeShape::Mechanical`]: quadratic attack and a wobble riding on
//!   decay, sustain and release, imitating a struck mechanism that keeps
//!   ringing.
//!
//! The transient helpers ([`bump_envelope`], [`click_envelope`],
//! [`exp_decay`]) shape the short bursts layered over the first milliseconds.

use core::f32::consts::PI;
use libm::{expf, sinf};
use serde::{Deserialize, Serialize};

/// Attack/decay/release times in seconds plus sustain level.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Adsr {
    /// Attack time in seconds.
    pub attack: f32,
    /// Decay time in seconds.
    pub decay: f32,
    /// Sustain level (0.0 to 1.0).
    pub sustain: f32,
    /// Release time in seconds, measured back from the end of the sound.
    pub release: f32,
}

impl Adsr {
    /// Create a new set of envelope times.
    pub const fn new(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack,
            decay,
            sustain,
            release,
        }
    }
}

/// Envelope curve family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeShape {
    /// Piecewise-linear ADSR.
    #[default]
    Linear,
    /// Quadratic attack with sinusoidal wobble on the later stages.
    Mechanical,
}

/// Sustain wobble rate for the mechanical shape, in radians per second.
const MECHANICAL_SUSTAIN_WOBBLE: f32 = 20.0;

/// Evaluate the envelope at `t` seconds into a sound lasting `duration` seconds.
///
/// Stages are tested in order (attack, decay, sustain, release), so when the
/// sound is shorter than `attack + decay + release` the earlier stages win
/// and the release picks up wherever decay ends. The result never goes below
/// zero.
///
/// ```rust
/// use mechvibe_core::{Adsr, EnvelopeShape, envelope};
///
/// let adsr = Adsr::new(0.001, 0.1, 0.3, 0.2);
/// assert_eq!(envelope(0.0, &adsr, 0.3, EnvelopeShape::Linear), 0.0);
/// assert!((envelope(0.001, &adsr, 0.3, EnvelopeShape::Linear) - 1.0).abs() < 1e-4);
/// ```
pub fn envelope(t: f32, adsr: &Adsr, duration: f32, shape: EnvelopeShape) -> f32 {
    let level = match shape {
        EnvelopeShape::Linear => linear(t, adsr, duration),
        EnvelopeShape::Mechanical => mechanical(t, adsr, duration),
    };
    level.max(0.0)
}

fn linear(t: f32, adsr: &Adsr, duration: f32) -> f32 {
    let Adsr {
        attack,
        decay,
        sustain,
        release,
    } = *adsr;

    if t < attack {
        t / attack
    } else if t < attack + decay {
        1.0 - (t - attack) / decay * (1.0 - sustain)
    } else if t < duration - release {
        sustain
    } else if release > 0.0 {
        sustain * (1.0 - (t - (duration - release)) / release)
    } else {
        0.0
    }
}

fn mechanical(t: f32, adsr: &Adsr, duration: f32) -> f32 {
    let Adsr {
        attack,
        decay,
        sustain,
        release,
    } = *adsr;

    if t < attack {
        let x = t / attack;
        x * x
    } else if t < attack + decay {
        let progress = (t - attack) / decay;
        (1.0 - progress * (1.0 - sustain)) * (0.8 + 0.2 * sinf(progress * PI * 2.0))
    } else if t < duration - release {
        sustain * (0.9 + 0.1 * sinf(t * MECHANICAL_SUSTAIN_WOBBLE))
    } else if release > 0.0 {
        let progress = (t - (duration - release)) / release;
        sustain * (1.0 - progress) * (0.8 + 0.2 * sinf(progress * PI))
    } else {
        0.0
    }
}

/// Linearly falling bump: 1 at `t = 0`, 0 at `t = duration` and after.
#[inline]
pub fn bump_envelope(t: f32, duration: f32) -> f32 {
    if t < duration {
        1.0 - t / duration
    } else {
        0.0
    }
}

/// Short attack/decay burst: rises over `attack`, falls to 0 at `duration`.
#[inline]
pub fn click_envelope(t: f32, attack: f32, duration: f32) -> f32 {
    if t < attack {
        t / attack
    } else if t < duration {
        1.0 - (t - attack) / (duration - attack)
    } else {
        0.0
    }
}

/// Exponential decay `e^(-t·rate)`.
#[inline]
pub fn exp_decay(t: f32, rate: f32) -> f32 {
    expf(-t * rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINEAR_SWITCH: Adsr = Adsr::new(0.001, 0.1, 0.3, 0.2);
    const TYPEWRITER: Adsr = Adsr::new(0.005, 0.3, 0.4, 0.5);

    #[test]
    fn test_linear_stages() {
        let d = 0.4;
        assert_eq!(envelope(0.0, &LINEAR_SWITCH, d, EnvelopeShape::Linear), 0.0);
        // Halfway up the attack
        let mid_attack = envelope(0.0005, &LINEAR_SWITCH, d, EnvelopeShape::Linear);
        assert!((mid_attack - 0.5).abs() < 1e-4);
        // End of decay lands on sustain
        let end_decay = envelope(0.1009, &LINEAR_SWITCH, d, EnvelopeShape::Linear);
        assert!((end_decay - 0.3).abs() < 0.01);
        // Flat sustain
        assert_eq!(envelope(0.15, &LINEAR_SWITCH, d, EnvelopeShape::Linear), 0.3);
        // Release halfway
        let mid_release = envelope(0.3, &LINEAR_SWITCH, d, EnvelopeShape::Linear);
        assert!((mid_release - 0.15).abs() < 1e-4);
    }

    #[test]
    fn test_short_sound_skips_sustain() {
        // duration == release: the sustain window is empty
        let d = 0.2;
        let after_decay = envelope(0.15, &LINEAR_SWITCH, d, EnvelopeShape::Linear);
        let expected = 0.3 * (1.0 - 0.15 / 0.2);
        assert!((after_decay - expected).abs() < 1e-4);
    }

    #[test]
    fn test_zero_release_is_silent_after_end() {
        let adsr = Adsr::new(0.001, 0.01, 0.5, 0.0);
        assert_eq!(envelope(0.5, &adsr, 0.5, EnvelopeShape::Linear), 0.0);
    }

    #[test]
    fn test_mechanical_attack_is_quadratic() {
        let half = envelope(0.0025, &TYPEWRITER, 0.6, EnvelopeShape::Mechanical);
        assert!((half - 0.25).abs() < 1e-4);
        assert_eq!(envelope(0.0, &TYPEWRITER, 0.6, EnvelopeShape::Mechanical), 0.0);
    }

    #[test]
    fn test_envelopes_bounded() {
        for shape in [EnvelopeShape::Linear, EnvelopeShape::Mechanical] {
            for adsr in [LINEAR_SWITCH, TYPEWRITER] {
                for i in 0..6000 {
                    let t = i as f32 / 10000.0;
                    let e = envelope(t, &adsr, 0.6, shape);
                    assert!((0.0..=1.5).contains(&e), "{shape:?} t={t}: {e}");
                }
            }
        }
    }

    #[test]
    fn test_bump_envelope() {
        assert_eq!(bump_envelope(0.0, 0.02), 1.0);
        assert!((bump_envelope(0.01, 0.02) - 0.5).abs() < 1e-6);
        assert_eq!(bump_envelope(0.02, 0.02), 0.0);
        assert_eq!(bump_envelope(1.0, 0.02), 0.0);
    }

    #[test]
    fn test_click_envelope() {
        assert_eq!(click_envelope(0.0, 0.001, 0.01), 0.0);
        assert!((click_envelope(0.001, 0.001, 0.01) - 1.0).abs() < 1e-6);
        assert!((click_envelope(0.0055, 0.001, 0.01) - 0.5).abs() < 1e-4);
        assert_eq!(click_envelope(0.02, 0.001, 0.01), 0.0);
    }

    #[test]
    fn test_exp_decay() {
        assert_eq!(exp_decay(0.0, 30.0), 1.0);
        assert!((exp_decay(0.1, 10.0) - (-1.0f32).exp()).abs() < 1e-6);
    }
}
