//! Immutable rendered stereo buffers.

use mechvibe_core::{KeyCategory, ProfileId};

/// Where a buffer's samples came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferOrigin {
    /// Rendered from a switch profile.
    Synthesized,
    /// Decoded from a recorded sample file.
    Sample,
    /// The minimal fallback tone.
    Emergency,
}

/// A stereo keystroke sound.
///
/// Created once and never mutated: the cache and the mixer share it through
/// `Arc<RenderedBuffer>`. Channels are stored planar, both with exactly
/// [`frames`](Self::frames) samples.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedBuffer {
    profile: ProfileId,
    category: KeyCategory,
    sample_rate: u32,
    left: Vec<f32>,
    right: Vec<f32>,
    volume_multiplier: f32,
    origin: BufferOrigin,
}

impl RenderedBuffer {
    /// Wrap two equal-length channels.
    ///
    /// The shorter channel is zero-padded if lengths differ.
    pub fn from_channels(
        profile: ProfileId,
        category: KeyCategory,
        sample_rate: u32,
        mut left: Vec<f32>,
        mut right: Vec<f32>,
        origin: BufferOrigin,
    ) -> Self {
        let frames = left.len().max(right.len());
        left.resize(frames, 0.0);
        right.resize(frames, 0.0);
        Self {
            profile,
            category,
            sample_rate,
            left,
            right,
            volume_multiplier: 1.0,
            origin,
        }
    }

    /// Record a volume multiplier still to be applied at playback.
    #[must_use]
    pub fn with_volume_multiplier(mut self, multiplier: f32) -> Self {
        self.volume_multiplier = multiplier;
        self
    }

    /// Profile the buffer was made for.
    pub fn profile(&self) -> ProfileId {
        self.profile
    }

    /// Category the buffer was made for.
    pub fn category(&self) -> KeyCategory {
        self.category
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Frames per channel.
    pub fn frames(&self) -> usize {
        self.left.len()
    }

    /// Always 2.
    pub fn channels(&self) -> usize {
        2
    }

    /// Left channel samples.
    pub fn left(&self) -> &[f32] {
        &self.left
    }

    /// Right channel samples.
    pub fn right(&self) -> &[f32] {
        &self.right
    }

    /// Frame `index` as `(left, right)`, or silence past the end.
    #[inline]
    pub fn frame(&self, index: usize) -> (f32, f32) {
        match (self.left.get(index), self.right.get(index)) {
            (Some(&l), Some(&r)) => (l, r),
            _ => (0.0, 0.0),
        }
    }

    /// Gain not baked into the samples; 1.0 when fully baked.
    pub fn volume_multiplier(&self) -> f32 {
        self.volume_multiplier
    }

    /// Origin of the samples.
    pub fn origin(&self) -> BufferOrigin {
        self.origin
    }

    /// Length in seconds.
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f32 / self.sample_rate as f32
    }

    /// Bytes held by the sample data (`frames × channels × 4`).
    pub fn memory_bytes(&self) -> usize {
        self.frames() * self.channels() * std::mem::size_of::<f32>()
    }

    /// Whether every sample is finite.
    pub fn is_finite(&self) -> bool {
        self.left
            .iter()
            .chain(self.right.iter())
            .all(|s| s.is_finite())
    }

    /// Largest absolute sample value across both channels.
    pub fn peak(&self) -> f32 {
        self.left
            .iter()
            .chain(self.right.iter())
            .fold(0.0f32, |acc, s| acc.max(s.abs()))
    }

    /// Consume into `(left, right)` channel vectors.
    pub fn into_channels(self) -> (Vec<f32>, Vec<f32>) {
        (self.left, self.right)
    }
}
