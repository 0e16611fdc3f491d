//! Pull-driven backend for offline rendering and tests.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::backend::{AudioBackend, BackendStreamConfig, ErrorCallback, OutputCallback, StreamHandle};
use crate::{AudioDevice, Result};

struct ActiveStream {
    id: u64,
    channels: usize,
    callback: OutputCallback,
    error_callback: ErrorCallback,
}

#[derive(Default)]
struct Slot {
    next_id: u64,
    stream: Option<ActiveStream>,
}

/// Backend whose "hardware" is the caller.
///
/// Streams built on it do nothing until [`pull`](Self::pull) asks for audio.
/// Clones share the same stream slot, so a test can keep one clone while the
/// sink owns the stream.
#[derive(Clone, Default)]
pub struct ManualBackend {
    slot: Arc<Mutex<Slot>>,
}

impl ManualBackend {
    /// Create a backend with no stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a stream is currently attached.
    pub fn is_streaming(&self) -> bool {
        self.slot.lock().stream.is_some()
    }

    /// Render `frames` frames through the attached stream.
    ///
    /// Returns interleaved samples, or silence when no stream is attached.
    pub fn pull(&self, frames: usize) -> Vec<f32> {
        let mut slot = self.slot.lock();
        match slot.stream.as_mut() {
            Some(stream) => {
                let mut buffer = vec![0.0; frames * stream.channels];
                (stream.callback)(&mut buffer);
                buffer
            }
            None => vec![0.0; frames * 2],
        }
    }

    /// Report a stream error, as a device unplug would.
    pub fn fail(&self, message: &str) {
        if let Some(stream) = self.slot.lock().stream.as_mut() {
            (stream.error_callback)(message);
        }
    }
}

struct ManualStreamGuard {
    id: u64,
    slot: Arc<Mutex<Slot>>,
}

impl Drop for ManualStreamGuard {
    fn drop(&mut self) {
        let mut slot = self.slot.lock();
        if slot.stream.as_ref().is_some_and(|s| s.id == self.id) {
            slot.stream = None;
        }
    }
}

impl AudioBackend for ManualBackend {
    fn name(&self) -> &'static str {
        "manual"
    }

    fn list_devices(&self) -> Result<Vec<AudioDevice>> {
        Ok(Vec::new())
    }

    fn default_output_device(&self) -> Result<Option<AudioDevice>> {
        Ok(None)
    }

    fn build_output_stream(
        &self,
        config: &BackendStreamConfig,
        callback: OutputCallback,
        error_callback: ErrorCallback,
    ) -> Result<StreamHandle> {
        let mut slot = self.slot.lock();
        slot.next_id += 1;
        let id = slot.next_id;
        slot.stream = Some(ActiveStream {
            id,
            channels: usize::from(config.channels.max(1)),
            callback,
            error_callback,
        });
        tracing::debug!(channels = config.channels, "manual stream attached");

        Ok(StreamHandle::new(ManualStreamGuard {
            id,
            slot: Arc::clone(&self.slot),
        }))
    }
}
