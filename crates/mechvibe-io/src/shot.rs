//! One playing sound: the ephemeral source → pan → gain chain.
//!
//! A [`Shot`] reads its buffer with linear interpolation, so a playback rate
//! other than 1.0 (pitch setting, pitch jitter, or a sample recorded at a
//! different rate than the output) simply changes the read step. Dropping a
//! shot releases it from the sink's live count.

use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use mechvibe_synth::RenderedBuffer;

/// Per-shot playback parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotParams {
    /// Linear gain applied after panning.
    pub gain: f32,
    /// Stereo position in [-1, 1]; `None` bypasses the panner.
    pub pan: Option<f32>,
    /// Playback-rate multiplier (1.0 = original pitch and length).
    pub rate: f32,
    /// Stop every other sounding shot when this one starts.
    pub exclusive: bool,
}

impl Default for ShotParams {
    fn default() -> Self {
        Self {
            gain: 1.0,
            pan: None,
            rate: 1.0,
            exclusive: false,
        }
    }
}

/// Equal-power stereo panning of a stereo frame.
///
/// Negative positions fold part of the right channel into the left and
/// attenuate the right; positive positions do the mirror image. A position of
/// 0 leaves the frame untouched.
#[inline]
pub fn pan_stereo(left: f32, right: f32, pan: f32) -> (f32, f32) {
    let pan = if pan.is_finite() { pan.clamp(-1.0, 1.0) } else { 0.0 };
    if pan <= 0.0 {
        let x = (pan + 1.0) * FRAC_PI_2;
        (left + right * x.cos(), right * x.sin())
    } else {
        let x = pan * FRAC_PI_2;
        (left * x.cos(), right + left * x.sin())
    }
}

struct LiveGuard(Arc<AtomicUsize>);

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

/// A buffer being played.
pub struct Shot {
    buffer: Arc<RenderedBuffer>,
    position: f64,
    step: f64,
    gain: f32,
    pan: Option<f32>,
    exclusive: bool,
    live: Option<LiveGuard>,
}

impl Shot {
    /// Prepare `buffer` for playback on an output running at `output_rate`.
    pub fn new(buffer: Arc<RenderedBuffer>, params: ShotParams, output_rate: u32) -> Self {
        let rate = if params.rate.is_finite() && params.rate > 0.0 {
            f64::from(params.rate)
        } else {
            1.0
        };
        let step = if output_rate == 0 || buffer.sample_rate() == 0 {
            rate
        } else {
            rate * f64::from(buffer.sample_rate()) / f64::from(output_rate)
        };
        Self {
            buffer,
            position: 0.0,
            step,
            gain: params.gain,
            pan: params.pan,
            exclusive: params.exclusive,
            live: None,
        }
    }

    pub(crate) fn track(&mut self, live: &Arc<AtomicUsize>) {
        live.fetch_add(1, Ordering::AcqRel);
        self.live = Some(LiveGuard(Arc::clone(live)));
    }

    pub(crate) fn release(&mut self) {
        self.live = None;
    }

    /// The buffer being played.
    pub fn buffer(&self) -> &Arc<RenderedBuffer> {
        &self.buffer
    }

    /// Source frames advanced per output frame.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Whether this shot silences the others when it starts.
    pub fn is_exclusive(&self) -> bool {
        self.exclusive
    }

    /// Whether the read position has passed the last frame.
    pub fn is_finished(&self) -> bool {
        self.position >= self.buffer.frames() as f64
    }

    /// Output frames left until the shot ends.
    pub fn remaining_frames(&self) -> usize {
        let left = self.buffer.frames() as f64 - self.position;
        if left <= 0.0 {
            0
        } else {
            (left / self.step).ceil() as usize
        }
    }

    /// Next output frame, or `None` once finished.
    #[inline]
    pub fn next_frame(&mut self) -> Option<(f32, f32)> {
        if self.is_finished() {
            return None;
        }
        let index = self.position as usize;
        let frac = (self.position - index as f64) as f32;
        let (l0, r0) = self.buffer.frame(index);
        let (mut l, mut r) = if frac > 0.0 {
            let (l1, r1) = self.buffer.frame(index + 1);
            (l0 + (l1 - l0) * frac, r0 + (r1 - r0) * frac)
        } else {
            (l0, r0)
        };
        if let Some(pan) = self.pan {
            (l, r) = pan_stereo(l, r, pan);
        }
        self.position += self.step;
        Some((l * self.gain, r * self.gain))
    }
}

impl std::fmt::Debug for Shot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shot")
            .field("profile", &self.buffer.profile())
            .field("category", &self.buffer.category())
            .field("position", &self.position)
            .field("step", &self.step)
            .field("gain", &self.gain)
            .field("pan", &self.pan)
            .field("exclusive", &self.exclusive)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mechvibe_core::{KeyCategory, ProfileId};
    use mechvibe_synth::BufferOrigin;

    fn ramp(frames: usize, sample_rate: u32) -> Arc<RenderedBuffer> {
        let left: Vec<f32> = (0..frames).map(|i| i as f32).collect();
        let right: Vec<f32> = (0..frames).map(|i| -(i as f32)).collect();
        Arc::new(RenderedBuffer::from_channels(
            ProfileId::Tactile,
            KeyCategory::Default,
            sample_rate,
            left,
            right,
            BufferOrigin::Sample,
        ))
    }

    fn drain(mut shot: Shot) -> Vec<(f32, f32)> {
        std::iter::from_fn(|| shot.next_frame()).collect()
    }

    #[test]
    fn test_unity_playback_copies_buffer() {
        let frames = drain(Shot::new(ramp(4, 48000), ShotParams::default(), 48000));
        assert_eq!(frames, vec![(0.0, 0.0), (1.0, -1.0), (2.0, -2.0), (3.0, -3.0)]);
    }

    #[test]
    fn test_gain_scales_both_channels() {
        let params = ShotParams {
            gain: 0.5,
            ..ShotParams::default()
        };
        let frames = drain(Shot::new(ramp(3, 48000), params, 48000));
        assert_eq!(frames[2], (1.0, -1.0));
    }

    #[test]
    fn test_double_rate_halves_length() {
        let params = ShotParams {
            rate: 2.0,
            ..ShotParams::default()
        };
        let shot = Shot::new(ramp(8, 48000), params, 48000);
        assert_eq!(shot.remaining_frames(), 4);
        let frames = drain(shot);
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[1], (2.0, -2.0));
    }

    #[test]
    fn test_resamples_to_output_rate() {
        // 24 kHz material on a 48 kHz output: half-step with interpolation
        let shot = Shot::new(ramp(4, 24000), ShotParams::default(), 48000);
        assert_eq!(shot.step(), 0.5);
        let frames = drain(shot);
        assert_eq!(frames.len(), 8);
        assert!((frames[1].0 - 0.5).abs() < 1e-6);
        assert!((frames[3].1 + 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_rate_falls_back_to_unity() {
        let params = ShotParams {
            rate: f32::NAN,
            ..ShotParams::default()
        };
        assert_eq!(Shot::new(ramp(4, 48000), params, 48000).step(), 1.0);
    }

    #[test]
    fn test_center_pan_is_transparent() {
        let (l, r) = pan_stereo(0.4, -0.2, 0.0);
        assert!((l - 0.4).abs() < 1e-6);
        assert!((r + 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_hard_pan_moves_everything() {
        let (l, r) = pan_stereo(0.5, 0.5, -1.0);
        assert!((l - 1.0).abs() < 1e-6);
        assert!(r.abs() < 1e-6);

        let (l, r) = pan_stereo(0.5, 0.5, 1.0);
        assert!(l.abs() < 1e-6);
        assert!((r - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_key_position_pan_tilts_image() {
        let (l, r) = pan_stereo(1.0, 1.0, -0.3);
        assert!(l > r);
        let (l, r) = pan_stereo(1.0, 1.0, 0.3);
        assert!(r > l);
    }

    #[test]
    fn test_live_count_released_on_drop() {
        let live = Arc::new(AtomicUsize::new(0));
        let mut shot = Shot::new(ramp(2, 48000), ShotParams::default(), 48000);
        shot.track(&live);
        assert_eq!(live.load(Ordering::Acquire), 1);
        drop(shot);
        assert_eq!(live.load(Ordering::Acquire), 0);
    }
}
