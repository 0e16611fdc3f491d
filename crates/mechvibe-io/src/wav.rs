//! WAV reading and writing.

use std::io::{Cursor, Read};
use std::path::Path;

use hound::{SampleFormat, WavReader, WavWriter};
use mechvibe_synth::RenderedBuffer;

use crate::Result;

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample (16, 24 or 32; 32 is written as float).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Planar stereo samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StereoSamples {
    /// Left channel.
    pub left: Vec<f32>,
    /// Right channel.
    pub right: Vec<f32>,
}

impl StereoSamples {
    /// Wrap two channels.
    pub fn new(left: Vec<f32>, right: Vec<f32>) -> Self {
        Self { left, right }
    }

    /// Duplicate a mono signal to both channels.
    pub fn from_mono(mono: Vec<f32>) -> Self {
        Self {
            right: mono.clone(),
            left: mono,
        }
    }

    /// Frames per channel.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Returns true if there are no frames.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }
}

fn read_stereo<R: Read>(reader: WavReader<R>) -> Result<(StereoSamples, WavSpec)> {
    let spec = WavSpec::from(reader.spec());
    let channels = usize::from(spec.channels.max(1));

    let samples: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample.clamp(1, 32) - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let stereo = if channels == 1 {
        StereoSamples::from_mono(samples)
    } else {
        // Extra channels beyond the first two are dropped
        let (left, right) = samples
            .chunks_exact(channels)
            .map(|frame| (frame[0], frame[1]))
            .unzip();
        StereoSamples::new(left, right)
    };

    Ok((stereo, spec))
}

/// Read a WAV file as stereo. Mono files are duplicated to both channels.
pub fn read_wav_stereo<P: AsRef<Path>>(path: P) -> Result<(StereoSamples, WavSpec)> {
    read_stereo(WavReader::open(path)?)
}

/// Decode an in-memory WAV file as stereo.
pub fn decode_wav_stereo(bytes: &[u8]) -> Result<(StereoSamples, WavSpec)> {
    read_stereo(WavReader::new(Cursor::new(bytes))?)
}

/// Write stereo samples to a WAV file. `spec.channels` is forced to 2.
pub fn write_wav_stereo<P: AsRef<Path>>(
    path: P,
    samples: &StereoSamples,
    spec: WavSpec,
) -> Result<()> {
    write_planar(path, &samples.left, &samples.right, spec)
}

/// Write a rendered buffer, including its deferred volume, to a stereo WAV file.
pub fn write_buffer<P: AsRef<Path>>(
    path: P,
    buffer: &RenderedBuffer,
    bits_per_sample: u16,
) -> Result<()> {
    let gain = buffer.volume_multiplier();
    let left: Vec<f32> = buffer.left().iter().map(|s| s * gain).collect();
    let right: Vec<f32> = buffer.right().iter().map(|s| s * gain).collect();
    let spec = WavSpec {
        channels: 2,
        sample_rate: buffer.sample_rate(),
        bits_per_sample,
    };
    write_planar(path, &left, &right, spec)
}

fn write_planar<P: AsRef<Path>>(path: P, left: &[f32], right: &[f32], spec: WavSpec) -> Result<()> {
    let spec = WavSpec { channels: 2, ..spec };
    let mut writer = WavWriter::create(path, hound::WavSpec::from(spec))?;

    if spec.bits_per_sample == 32 {
        for (l, r) in left.iter().zip(right.iter()) {
            writer.write_sample(*l)?;
            writer.write_sample(*r)?;
        }
    } else {
        let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
        for (l, r) in left.iter().zip(right.iter()) {
            writer.write_sample((*l * max_val).clamp(-max_val, max_val - 1.0) as i32)?;
            writer.write_sample((*r * max_val).clamp(-max_val, max_val - 1.0) as i32)?;
        }
    }

    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mechvibe_core::{KeyCategory, ProfileId, Silence};
    use mechvibe_synth::{BufferOrigin, profiles, render};
    use tempfile::NamedTempFile;

    #[test]
    fn test_stereo_roundtrip_f32() {
        let left: Vec<f32> = (0..1000).map(|i| (i as f32 / 1000.0).sin()).collect();
        let right: Vec<f32> = (0..1000).map(|i| (i as f32 / 1000.0).cos()).collect();
        let samples = StereoSamples::new(left.clone(), right.clone());

        let file = NamedTempFile::new().unwrap();
        write_wav_stereo(file.path(), &samples, WavSpec::default()).unwrap();

        let (loaded, spec) = read_wav_stereo(file.path()).unwrap();
        assert_eq!(spec.sample_rate, 48000);
        assert_eq!(loaded.len(), 1000);
        for (a, b) in left.iter().zip(loaded.left.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
        for (a, b) in right.iter().zip(loaded.right.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_i16_precision() {
        let left: Vec<f32> = (0..200).map(|i| (i as f32 / 50.0).sin() * 0.9).collect();
        let samples = StereoSamples::from_mono(left.clone());
        let spec = WavSpec {
            sample_rate: 44100,
            bits_per_sample: 16,
            ..WavSpec::default()
        };

        let file = NamedTempFile::new().unwrap();
        write_wav_stereo(file.path(), &samples, spec).unwrap();
        let (loaded, loaded_spec) = read_wav_stereo(file.path()).unwrap();

        assert_eq!(loaded_spec.bits_per_sample, 16);
        for (a, b) in left.iter().zip(loaded.right.iter()) {
            assert!((a - b).abs() < 0.001);
        }
    }

    #[test]
    fn test_decode_mono_bytes() {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 22050,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut bytes = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut bytes, spec).unwrap();
            for v in [0i16, 16384, -16384] {
                writer.write_sample(v).unwrap();
            }
            writer.finalize().unwrap();
        }

        let (stereo, spec) = decode_wav_stereo(bytes.get_ref()).unwrap();
        assert_eq!(spec.sample_rate, 22050);
        assert_eq!(stereo.left, vec![0.0, 0.5, -0.5]);
        assert_eq!(stereo.left, stereo.right);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode_wav_stereo(b"not a wav file").is_err());
    }

    #[test]
    fn test_write_buffer_applies_deferred_volume() {
        let buffer = render(
            &profiles::builtin(ProfileId::Linear),
            KeyCategory::Enter,
            0.0,
            22050,
            &mut Silence,
        )
        .unwrap();
        let deferred = RenderedBuffer::from_channels(
            buffer.profile(),
            buffer.category(),
            buffer.sample_rate(),
            buffer.left().to_vec(),
            buffer.right().to_vec(),
            BufferOrigin::Synthesized,
        )
        .with_volume_multiplier(0.5);

        let file = NamedTempFile::new().unwrap();
        write_buffer(file.path(), &deferred, 32).unwrap();
        let (loaded, spec) = read_wav_stereo(file.path()).unwrap();

        assert_eq!(spec.channels, 2);
        assert_eq!(loaded.len(), buffer.frames());
        let i = buffer.frames() / 8;
        assert!((loaded.left[i] - buffer.left()[i] * 0.5).abs() < 1e-6);
    }
}
