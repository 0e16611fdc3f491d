//! Pluggable audio output abstraction.
//!
//! The [`AudioBackend`] trait keeps the output sink independent of any platform
//! audio API. [`CpalBackend`](crate::CpalBackend) drives real hardware;
//! [`ManualBackend`](crate::ManualBackend) lets the caller pull buffers
//! itself, for offline rendering and deterministic tests.
//!
//! ```text
//!   Dispatcher ──► OutputSink ──► Mixer (moved into the callback)
//!                                   │
//!                          AudioBackend::build_output_stream
//!                         ┌─────────┴─────────┐
//!                         ▼                   ▼
//!                    CpalBackend         ManualBackend
//! ```
//!
//! Callbacks are boxed closures so the trait stays object-safe, and streams
//! come back as a type-erased [`StreamHandle`] that stops playback on drop.

use crate::{AudioDevice, Result};

/// Configuration for building an output stream.
#[derive(Debug, Clone)]
pub struct BackendStreamConfig {
    /// Requested sample rate in Hz.
    pub sample_rate: u32,
    /// Preferred buffer size in frames.
    pub buffer_size: u32,
    /// Number of output channels.
    pub channels: u16,
    /// Device name or index (system default if `None`).
    pub device_name: Option<String>,
}

impl Default for BackendStreamConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            buffer_size: 512,
            channels: 2,
            device_name: None,
        }
    }
}

impl From<&mechvibe_config::EngineConfig> for BackendStreamConfig {
    fn from(engine: &mechvibe_config::EngineConfig) -> Self {
        Self {
            sample_rate: engine.sample_rate,
            buffer_size: engine.buffer_size,
            channels: 2,
            device_name: engine.output_device.clone(),
        }
    }
}

/// Type-erased stream handle.
///
/// The stream is active while this handle exists; dropping it stops playback.
pub struct StreamHandle {
    _inner: Box<dyn Send>,
}

impl StreamHandle {
    /// Wrap a backend-specific stream object.
    pub fn new<T: Send + 'static>(stream: T) -> Self {
        Self {
            _inner: Box::new(stream),
        }
    }
}

impl std::fmt::Debug for StreamHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamHandle").finish_non_exhaustive()
    }
}

/// Audio output callback.
///
/// Called on the audio thread with an interleaved buffer
/// (`[L0, R0, L1, R1, ...]` for stereo) that must be filled completely.
/// Implementations must not block.
pub type OutputCallback = Box<dyn FnMut(&mut [f32]) + Send>;

/// Stream error callback, receiving a human-readable message.
pub type ErrorCallback = Box<dyn FnMut(&str) + Send>;

/// Output side of a platform audio API.
pub trait AudioBackend: Send {
    /// Human-readable backend name (e.g. "cpal", "manual").
    fn name(&self) -> &str;

    /// List available output devices.
    fn list_devices(&self) -> Result<Vec<AudioDevice>>;

    /// The default output device, if any.
    fn default_output_device(&self) -> Result<Option<AudioDevice>>;

    /// Build and start an output stream.
    ///
    /// The returned [`StreamHandle`] keeps the stream alive.
    fn build_output_stream(
        &self,
        config: &BackendStreamConfig,
        callback: OutputCallback,
        error_callback: ErrorCallback,
    ) -> Result<StreamHandle>;

    /// Sample rate the backend will actually run `config` at.
    fn actual_sample_rate(&self, config: &BackendStreamConfig) -> u32 {
        config.sample_rate
    }
}
