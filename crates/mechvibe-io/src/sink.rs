//! The shared output graph: master gain, mute, and the audio-thread mixer.
//!
//! [`OutputSink`] is the control side, shared by every dispatch call.
//! [`Mixer`] is the audio side, moved into the backend's output callback.
//! They talk through bounded channels of [`Shot`]s and a few atomics, so the
//! audio thread never waits on a lock and never allocates or frees:
//!
//! ```text
//!  schedule(shot) ──► crossbeam channel ──► Mixer::render ──► device
//!  set_master_gain / mute ──► atomics ─────────┘
//!  reclaim() ◄── spent channel ◄── finished / evicted shots
//! ```
//!
//! Finished shots travel back to the control side, which drops them (and
//! with them possibly the last reference to a buffer) on its own thread.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicU32, AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use parking_lot::Mutex;

use crate::backend::{AudioBackend, BackendStreamConfig, StreamHandle};
use crate::shot::Shot;
use crate::{Error, Result};

/// Shots the mixer sounds at once; the oldest gives way beyond this.
pub const MAX_SHOTS: usize = 64;

/// Capacity of the schedule and spent queues.
const SHOT_QUEUE: usize = 256;

/// Lifecycle state of the output sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SinkState {
    /// Accepting new sounds.
    Running = 0,
    /// Paused by the caller; new sounds are refused until resumed.
    Suspended = 1,
    /// The backend reported an error; the next keystroke resumes.
    Interrupted = 2,
    /// Shut down for good.
    Closed = 3,
}

impl SinkState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => SinkState::Running,
            1 => SinkState::Suspended,
            2 => SinkState::Interrupted,
            _ => SinkState::Closed,
        }
    }
}

impl fmt::Display for SinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SinkState::Running => "running",
            SinkState::Suspended => "suspended",
            SinkState::Interrupted => "interrupted",
            SinkState::Closed => "closed",
        })
    }
}

struct SinkShared {
    state: AtomicU8,
    master_gain: AtomicU32,
    muted: AtomicBool,
    /// Milliseconds after `epoch` until which output is muted; 0 for none.
    mute_until_ms: AtomicU64,
    epoch: Instant,
    live: Arc<AtomicUsize>,
}

impl SinkShared {
    fn state(&self) -> SinkState {
        SinkState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn set_state(&self, state: SinkState) {
        self.state.store(state as u8, Ordering::Release);
    }

    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    fn is_muted(&self) -> bool {
        if self.muted.load(Ordering::Acquire) {
            return true;
        }
        let until = self.mute_until_ms.load(Ordering::Acquire);
        until != 0 && self.now_ms() < until
    }

    fn output_gain(&self) -> f32 {
        if self.is_muted() {
            0.0
        } else {
            f32::from_bits(self.master_gain.load(Ordering::Acquire))
        }
    }

    fn interrupt(&self, message: &str) {
        let swapped = self.state.compare_exchange(
            SinkState::Running as u8,
            SinkState::Interrupted as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
        tracing::warn!(
            error = message,
            interrupted = swapped.is_ok(),
            "output stream error"
        );
    }
}

/// Control handle for the output graph.
pub struct OutputSink {
    shared: Arc<SinkShared>,
    tx: Sender<Shot>,
    spent: Receiver<Shot>,
    sample_rate: u32,
    stream: Mutex<Option<StreamHandle>>,
}

impl OutputSink {
    /// Create a sink and its mixer without attaching any backend.
    ///
    /// The caller is responsible for driving [`Mixer::render`].
    pub fn new(sample_rate: u32) -> (Self, Mixer) {
        let shared = Arc::new(SinkShared {
            state: AtomicU8::new(SinkState::Running as u8),
            master_gain: AtomicU32::new(1.0f32.to_bits()),
            muted: AtomicBool::new(false),
            mute_until_ms: AtomicU64::new(0),
            epoch: Instant::now(),
            live: Arc::new(AtomicUsize::new(0)),
        });
        let (tx, rx) = bounded(SHOT_QUEUE);
        let (spent_tx, spent) = bounded(SHOT_QUEUE);
        let mixer = Mixer {
            rx,
            spent: spent_tx,
            shots: Vec::with_capacity(MAX_SHOTS),
            shared: Arc::clone(&shared),
            sample_rate,
        };
        let sink = Self {
            shared,
            tx,
            spent,
            sample_rate,
            stream: Mutex::new(None),
        };
        (sink, mixer)
    }

    /// Open an output stream on `backend` and run the mixer inside it.
    pub fn start(backend: &dyn AudioBackend, config: &BackendStreamConfig) -> Result<Self> {
        let sample_rate = backend.actual_sample_rate(config);
        let (sink, mut mixer) = Self::new(sample_rate);
        let channels = usize::from(config.channels.max(1));
        let shared = Arc::clone(&sink.shared);

        let handle = backend.build_output_stream(
            config,
            Box::new(move |data: &mut [f32]| mixer.render(data, channels)),
            Box::new(move |message: &str| shared.interrupt(message)),
        )?;
        *sink.stream.lock() = Some(handle);

        tracing::info!(
            backend = backend.name(),
            sample_rate,
            channels,
            "output sink started"
        );
        Ok(sink)
    }

    /// Output sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SinkState {
        self.shared.state()
    }

    /// Whether a backend stream is attached.
    pub fn has_stream(&self) -> bool {
        self.stream.lock().is_some()
    }

    /// Queue a shot for immediate playback.
    ///
    /// Shots the mixer has handed back are dropped first.
    pub fn schedule(&self, mut shot: Shot) -> Result<()> {
        self.reclaim();
        let state = self.state();
        if state != SinkState::Running {
            return Err(Error::OutputUnavailable(state));
        }
        shot.track(&self.shared.live);
        match self.tx.try_send(shot) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(Error::Stream("shot queue full".to_string())),
            Err(TrySendError::Disconnected(_)) => {
                self.shared.set_state(SinkState::Closed);
                Err(Error::OutputUnavailable(SinkState::Closed))
            }
        }
    }

    /// Drop the shots the mixer has finished with. Returns how many.
    pub fn reclaim(&self) -> usize {
        self.spent.try_iter().count()
    }

    /// Shots queued or sounding.
    pub fn active_shots(&self) -> usize {
        self.shared.live.load(Ordering::Acquire)
    }

    /// Set the master gain (clamped to [0, 1]).
    pub fn set_master_gain(&self, gain: f32) {
        let gain = if gain.is_finite() { gain.clamp(0.0, 1.0) } else { 0.0 };
        self.shared
            .master_gain
            .store(gain.to_bits(), Ordering::Release);
    }

    /// Current master gain, ignoring mute.
    pub fn master_gain(&self) -> f32 {
        f32::from_bits(self.shared.master_gain.load(Ordering::Acquire))
    }

    /// Silence the output until [`unmute`](Self::unmute).
    pub fn mute(&self) {
        self.shared.muted.store(true, Ordering::Release);
    }

    /// Restore the master gain, cancelling any timed mute.
    pub fn unmute(&self) {
        self.shared.muted.store(false, Ordering::Release);
        self.shared.mute_until_ms.store(0, Ordering::Release);
    }

    /// Silence the output for `duration`, then restore it.
    pub fn mute_for(&self, duration: Duration) {
        let until = self.shared.now_ms() + (duration.as_millis() as u64).max(1);
        self.shared.mute_until_ms.store(until, Ordering::Release);
        tracing::debug!(millis = duration.as_millis() as u64, "temporary mute");
    }

    /// Whether the output is currently silenced.
    pub fn is_muted(&self) -> bool {
        self.shared.is_muted()
    }

    /// Stop accepting new sounds. Sounds already playing run to completion.
    pub fn suspend(&self) {
        if matches!(self.state(), SinkState::Running | SinkState::Interrupted) {
            self.shared.set_state(SinkState::Suspended);
            tracing::info!("output sink suspended");
        }
    }

    /// Accept new sounds again.
    pub fn resume(&self) -> Result<()> {
        match self.state() {
            SinkState::Closed => Err(Error::OutputUnavailable(SinkState::Closed)),
            SinkState::Running => Ok(()),
            previous => {
                self.shared.set_state(SinkState::Running);
                tracing::info!(from = %previous, "output sink resumed");
                Ok(())
            }
        }
    }

    /// Close the sink and release the backend stream.
    pub fn close(&self) {
        self.shared.set_state(SinkState::Closed);
        self.stream.lock().take();
        tracing::info!("output sink closed");
    }
}

impl fmt::Debug for OutputSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputSink")
            .field("sample_rate", &self.sample_rate)
            .field("state", &self.state())
            .field("master_gain", &self.master_gain())
            .field("muted", &self.is_muted())
            .field("active_shots", &self.active_shots())
            .finish_non_exhaustive()
    }
}

/// Audio-thread half of the output graph.
pub struct Mixer {
    rx: Receiver<Shot>,
    spent: Sender<Shot>,
    shots: Vec<Shot>,
    shared: Arc<SinkShared>,
    sample_rate: u32,
}

impl Mixer {
    /// Output sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Shots currently sounding.
    pub fn active(&self) -> usize {
        self.shots.len()
    }

    /// Fill an interleaved buffer of `channels` channels.
    ///
    /// Mono outputs get the average of left and right; channels past the
    /// second are silent. At most [`MAX_SHOTS`] shots sound at once.
    pub fn render(&mut self, out: &mut [f32], channels: usize) {
        while let Ok(shot) = self.rx.try_recv() {
            if shot.is_exclusive() {
                while let Some(old) = self.shots.pop() {
                    self.retire(old);
                }
            } else if self.shots.len() >= MAX_SHOTS {
                let oldest = self.shots.remove(0);
                self.retire(oldest);
            }
            self.shots.push(shot);
        }

        let gain = self.shared.output_gain();
        for frame in out.chunks_mut(channels.max(1)) {
            let (mut l, mut r) = (0.0f32, 0.0f32);
            for shot in &mut self.shots {
                if let Some((sl, sr)) = shot.next_frame() {
                    l += sl;
                    r += sr;
                }
            }
            l *= gain;
            r *= gain;

            match frame {
                [mono] => *mono = 0.5 * (l + r),
                [fl, fr, rest @ ..] => {
                    *fl = l;
                    *fr = r;
                    rest.fill(0.0);
                }
                [] => {}
            }
        }

        let mut i = 0;
        while i < self.shots.len() {
            if self.shots[i].is_finished() {
                let done = self.shots.remove(i);
                self.retire(done);
            } else {
                i += 1;
            }
        }
    }

    /// Release a shot from the live count and hand it back for dropping.
    fn retire(&self, mut shot: Shot) {
        shot.release();
        // Dropped here only when the control side is gone or not collecting
        let _ = self.spent.try_send(shot);
    }
}

impl fmt::Debug for Mixer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mixer")
            .field("sample_rate", &self.sample_rate)
            .field("active", &self.shots.len())
            .finish_non_exhaustive()
    }
}
