//! Base waveforms as pure functions of frequency and time.
//!
//! Unlike a phase-accumulating oscillator these are evaluated directly at
//! `t` seconds, so a buffer can be rendered in any order and two channels
//! sampled at the same `t` see exactly the same body.

use core::f32::consts::PI;
use libm::{asinf, floorf, sinf};
use serde::{Deserialize, Serialize};

/// Waveform used for the tonal body of a keystroke.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    /// Pure sine.
    #[default]
    Sine,
    /// Triangle derived from the arcsine of a sine.
    Triangle,
    /// Sign of a sine.
    Square,
    /// Rising ramp centered on zero.
    Sawtooth,
}

impl Waveform {
    /// Evaluate the waveform at `t` seconds for frequency `freq_hz`.
    #[inline]
    pub fn sample(self, freq_hz: f32, t: f32) -> f32 {
        match self {
            Waveform::Sine => sine(freq_hz, t),
            Waveform::Triangle => triangle(freq_hz, t),
            Waveform::Square => square(freq_hz, t),
            Waveform::Sawtooth => sawtooth(freq_hz, t),
        }
    }
}

/// `sin(2π·f·t)`.
#[inline]
pub fn sine(freq_hz: f32, t: f32) -> f32 {
    sinf(2.0 * PI * freq_hz * t)
}

/// Triangle wave in [-1, 1]: `asin(sin(2π·f·t)) · 2/π`.
#[inline]
pub fn triangle(freq_hz: f32, t: f32) -> f32 {
    // asin of a value rounded slightly past ±1 is NaN
    asinf(sine(freq_hz, t).clamp(-1.0, 1.0)) * (2.0 / PI)
}

/// Square wave: the sign of the sine, 0 exactly at zero crossings.
#[inline]
pub fn square(freq_hz: f32, t: f32) -> f32 {
    let s = sine(freq_hz, t);
    if s > 0.0 {
        1.0
    } else if s < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Sawtooth wave: `2·(t·f − floor(t·f + 0.5))`, in [-1, 1).
#[inline]
pub fn sawtooth(freq_hz: f32, t: f32) -> f32 {
    let x = t * freq_hz;
    2.0 * (x - floorf(x + 0.5))
}
