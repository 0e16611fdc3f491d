//! Audio output and keystroke dispatch for mechvibe.
//!
//! This crate provides:
//!
//! - **Output sink**: [`OutputSink`] owns the master gain and hands out a
//!   [`Mixer`] that sums the playing [`Shot`]s on the audio thread
//! - **Backends**: [`AudioBackend`] with the cpal implementation
//!   [`CpalBackend`] and the pull-driven [`ManualBackend`]
//! - **Samples**: [`SampleProvider`] for recorded banks and WAV I/O helpers
//! - **Dispatch**: [`Dispatcher`] turns keystrokes into scheduled shots
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use mechvibe_config::Config;
//! use mechvibe_io::{BackendStreamConfig, CpalBackend, Dispatcher, OutputSink};
//! use mechvibe_synth::SoundCache;
//!
//! let config = Config::default();
//! let sink = OutputSink::start(&CpalBackend::new(), &BackendStreamConfig::default())?;
//! let cache = Arc::new(SoundCache::new(sink.sample_rate()));
//! let dispatcher = Dispatcher::new(Arc::new(sink), cache, config.settings, &config.engine);
//!
//! dispatcher.play_key(" ", "Space", None);
//! ```

pub mod backend;
mod cpal_backend;
mod devices;
mod dispatcher;
mod manual;
mod samples;
mod shot;
mod sink;
mod wav;

pub use backend::{AudioBackend, BackendStreamConfig, ErrorCallback, OutputCallback, StreamHandle};
pub use cpal_backend::CpalBackend;
pub use devices::{AudioDevice, default_output_device, find_output_device, list_devices};
pub use dispatcher::{
    AudioMode, Dispatcher, PlayOptions, PlayOutcome, ShotInfo, SwitchState, TEST_SEQUENCE,
    TEST_SEQUENCE_SPACING, category_gain,
};
pub use manual::ManualBackend;
pub use samples::{DirectorySampleProvider, LoadError, SampleBank, SampleProvider, sample_file_name};
pub use shot::{Shot, ShotParams, pan_stereo};
pub use sink::{MAX_SHOTS, Mixer, OutputSink, SinkState};
pub use wav::{
    StereoSamples, WavSpec, decode_wav_stereo, read_wav_stereo, write_buffer, write_wav_stereo,
};

use mechvibe_synth::SynthError;

/// Error types for audio output and dispatch.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Audio stream setup or runtime error.
    #[error("Audio stream error: {0}")]
    Stream(String),

    /// No audio device available on the system.
    #[error("No audio device available")]
    NoDevice,

    /// The requested audio device was not found.
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A recorded sample could not be fetched or decoded.
    #[error("Sample unavailable: {0}")]
    ResourceUnavailable(#[from] LoadError),

    /// The output sink cannot accept new sounds.
    #[error("Output unavailable: sink is {0}")]
    OutputUnavailable(SinkState),

    /// Synthesis failed.
    #[error("Synthesis error: {0}")]
    Synth(#[from] SynthError),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
