//! Low-pass tail simulation.

use libm::expf;

/// Gain of the simulated one-pole low-pass at `t` seconds.
///
/// `exp(-t · cutoff / sample_rate · slope)`. This is not a frequency-domain
/// filter: it darkens the sound by pulling the tail down over time, which is
/// what gives the rendered keystrokes their muffled decay. `slope` is 1.0 for
/// most profiles; the typewriter uses 2.0.
///
/// The gain depends on the sample rate, so the same profile rendered at
/// 22.05 kHz decays faster than at 48 kHz.
///
/// ```rust
/// use mechvibe_core::lowpass_decay;
///
/// assert_eq!(lowpass_decay(0.0, 2000.0, 44100.0, 1.0), 1.0);
/// assert!(lowpass_decay(0.3, 2000.0, 44100.0, 1.0) < 1.0);
/// ```
#[inline]
pub fn lowpass_decay(t: f32, cutoff_hz: f32, sample_rate: f32, slope: f32) -> f32 {
    expf(-t * cutoff_hz / sample_rate * slope)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decay_is_monotonic() {
        let mut prev = 1.0;
        for i in 1..100 {
            let g = lowpass_decay(i as f32 * 0.01, 3000.0, 48000.0, 1.0);
            assert!(g < prev);
            prev = g;
        }
    }

    #[test]
    fn test_slope_doubles_exponent() {
        let one = lowpass_decay(0.5, 1500.0, 44100.0, 1.0);
        let two = lowpass_decay(0.5, 1500.0, 44100.0, 2.0);
        assert!((two - one * one).abs() < 1e-6);
    }
}
