//! Keystroke dispatch.
//!
//! [`Dispatcher::play`] runs on the caller's keystroke path and never fails:
//! every problem degrades to a [`PlayOutcome`] and a log line. Each call
//!
//! 1. drops the request if the same category fired less than the throttle
//!    interval ago,
//! 2. resolves a buffer through the fallback chain: recorded sample (exact
//!    category, then the bank's `key.wav`), synthesized exact category,
//!    synthesized default category, emergency tone,
//! 3. schedules a [`Shot`] carrying the per-category gain, pan and playback
//!    rate on the [`OutputSink`].
//!
//! ## Profile switches
//!
//! A settings change that names a new profile starts a background load:
//!
//! ```text
//! Idle ──► Loading(profile) ──► bank decoded ─────────────► Idle (real samples)
//!                         └──► failed / timed out ──► prewarm ──► Idle (synthesis)
//! ```
//!
//! Until the load resolves, keystrokes keep playing the previous profile.
//! Each switch carries a generation number so a slow, superseded load can
//! never replace a newer one. Once a switch resolves, the previous profile's
//! cached buffers are dropped.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use crossbeam_channel::{Receiver, Sender, unbounded};
use mechvibe_config::{EngineConfig, Settings};
use mechvibe_core::{
    EntropySource, KeyCategory, ProfileId, RandomSource, classify, key_position_pan,
};
use mechvibe_synth::{BufferOrigin, RenderedBuffer, SoundCache, emergency_tone};
use parking_lot::{Mutex, RwLock};

use crate::samples::{SampleBank, SampleProvider};
use crate::shot::{Shot, ShotParams};
use crate::sink::{OutputSink, SinkState};
use crate::Error;

/// Keys of the audible self-test, with their codes.
pub const TEST_SEQUENCE: [(&str, &str); 5] = [
    ("A", "KeyA"),
    ("S", "KeyS"),
    ("D", "KeyD"),
    (" ", "Space"),
    ("Enter", "Enter"),
];

/// Spacing of the self-test keys.
pub const TEST_SEQUENCE_SPACING: Duration = Duration::from_millis(150);

/// Extra gain applied per category at playback.
pub fn category_gain(category: KeyCategory) -> f32 {
    match category {
        KeyCategory::Spacebar => 1.2,
        KeyCategory::Enter => 1.1,
        KeyCategory::Backspace => 0.9,
        _ => 1.0,
    }
}

/// Per-request playback options.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayOptions {
    /// Stereo position in [-1, 1]; `None` plays unpanned.
    pub pan: Option<f32>,
    /// Caller's keystroke time in milliseconds. When absent the dispatcher's
    /// own monotonic clock is used. Do not mix the two on one dispatcher.
    pub timestamp_ms: Option<u64>,
}

impl PlayOptions {
    /// Options stamped with the caller's keystroke time.
    pub fn at(timestamp_ms: u64) -> Self {
        Self {
            timestamp_ms: Some(timestamp_ms),
            ..Self::default()
        }
    }

    /// Builder-style pan position.
    #[must_use]
    pub fn with_pan(mut self, pan: f32) -> Self {
        self.pan = Some(pan);
        self
    }
}

/// What was scheduled for a keystroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotInfo {
    /// Profile the buffer belongs to.
    pub profile: ProfileId,
    /// Category that was requested.
    pub requested: KeyCategory,
    /// Category of the buffer actually played.
    pub category: KeyCategory,
    /// Where the buffer came from.
    pub origin: BufferOrigin,
    /// Shot gain (buffer volume × category gain).
    pub gain: f32,
    /// Playback rate.
    pub rate: f32,
    /// Pan position, if panned.
    pub pan: Option<f32>,
}

/// Result of a play request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayOutcome {
    /// A shot was queued on the sink.
    Scheduled(ShotInfo),
    /// Dropped by the per-category anti-spam interval.
    Throttled,
    /// Sounds are switched off in the settings.
    Disabled,
    /// The sink refused new sounds.
    OutputUnavailable(SinkState),
    /// Nothing could be produced.
    Silent,
}

impl PlayOutcome {
    /// Whether a shot was queued.
    pub fn is_scheduled(&self) -> bool {
        matches!(self, PlayOutcome::Scheduled(_))
    }
}

/// Where the active profile's sounds come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioMode {
    /// Recorded samples.
    Real,
    /// Procedural synthesis.
    Synthetic,
}

impl fmt::Display for AudioMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AudioMode::Real => "real",
            AudioMode::Synthetic => "synthetic",
        })
    }
}

/// Profile-switch progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchState {
    /// No switch in progress.
    Idle,
    /// Loading the given profile; the previous one still plays.
    Loading(ProfileId),
}

struct ActiveSound {
    profile: ProfileId,
    bank: Option<Arc<SampleBank>>,
}

struct PendingSwitch {
    generation: u64,
    profile: ProfileId,
    started: Instant,
}

struct LoadDone {
    generation: u64,
    profile: ProfileId,
    bank: Option<SampleBank>,
}

/// Turns keystrokes into scheduled sounds.
pub struct Dispatcher {
    sink: Arc<OutputSink>,
    cache: Arc<SoundCache>,
    provider: Option<Arc<dyn SampleProvider>>,
    settings: RwLock<Settings>,
    throttle_ms: u64,
    load_timeout: Duration,
    last_trigger: Mutex<HashMap<KeyCategory, u64>>,
    active: ArcSwap<ActiveSound>,
    pending: Mutex<Option<PendingSwitch>>,
    generation: AtomicU64,
    done_tx: Sender<LoadDone>,
    done_rx: Receiver<LoadDone>,
    rng: Mutex<Box<dyn RandomSource>>,
    epoch: Instant,
}

impl Dispatcher {
    /// Dispatcher playing `settings.current_switch` through synthesis.
    ///
    /// Attach a [`SampleProvider`] and call [`reload`](Self::reload) to use
    /// recorded samples.
    pub fn new(
        sink: Arc<OutputSink>,
        cache: Arc<SoundCache>,
        settings: Settings,
        engine: &EngineConfig,
    ) -> Self {
        sink.set_master_gain(settings.volume);
        cache.set_pitch_variation(settings.pitch_variation);
        let (done_tx, done_rx) = unbounded();
        Self {
            active: ArcSwap::from_pointee(ActiveSound {
                profile: settings.current_switch,
                bank: None,
            }),
            sink,
            cache,
            provider: None,
            settings: RwLock::new(settings),
            throttle_ms: engine.throttle_ms,
            load_timeout: engine.load_timeout(),
            last_trigger: Mutex::new(HashMap::new()),
            pending: Mutex::new(None),
            generation: AtomicU64::new(0),
            done_tx,
            done_rx,
            rng: Mutex::new(Box::new(EntropySource::new())),
            epoch: Instant::now(),
        }
    }

    /// Use `provider` for recorded samples.
    #[must_use]
    pub fn with_sample_provider(mut self, provider: Arc<dyn SampleProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Replace the random source used for pitch jitter and emergency noise.
    #[must_use]
    pub fn with_rng(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    /// The output sink.
    pub fn sink(&self) -> &Arc<OutputSink> {
        &self.sink
    }

    /// The synthesized-sound cache.
    pub fn cache(&self) -> &Arc<SoundCache> {
        &self.cache
    }

    /// Current settings.
    pub fn settings(&self) -> Settings {
        self.settings.read().clone()
    }

    /// Profile keystrokes currently play.
    pub fn active_profile(&self) -> ProfileId {
        self.active.load().profile
    }

    /// Whether the active profile plays recorded samples.
    pub fn audio_mode(&self) -> AudioMode {
        if self.active.load().bank.is_some() {
            AudioMode::Real
        } else {
            AudioMode::Synthetic
        }
    }

    /// Whether a recorded bank is loaded for `profile`.
    pub fn has_real_audio(&self, profile: ProfileId) -> bool {
        let active = self.active.load();
        active.profile == profile && active.bank.is_some()
    }

    /// Profile-switch progress.
    pub fn switch_state(&self) -> SwitchState {
        match self.pending.lock().as_ref() {
            Some(p) => SwitchState::Loading(p.profile),
            None => SwitchState::Idle,
        }
    }

    /// Apply new settings from the settings provider.
    ///
    /// Volume and pitch take effect immediately; a new profile starts a
    /// background switch.
    pub fn apply_settings(&self, settings: Settings) {
        self.sink.set_master_gain(settings.volume);
        self.cache.set_pitch_variation(settings.pitch_variation);
        let profile = settings.current_switch;
        *self.settings.write() = settings;

        let target = self
            .pending
            .lock()
            .as_ref()
            .map_or_else(|| self.active_profile(), |p| p.profile);
        if profile != target {
            self.begin_switch(profile);
        }
    }

    /// Reload the current profile, picking up new or changed recordings.
    pub fn reload(&self) {
        let profile = self.settings.read().current_switch;
        self.begin_switch(profile);
    }

    /// Block until no switch is pending, up to `timeout`.
    ///
    /// Returns true if the dispatcher is idle.
    pub fn wait_for_switch(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.poll();
            if self.pending.lock().is_none() {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let wait = (deadline - now).min(Duration::from_millis(10));
            if let Ok(done) = self.done_rx.recv_timeout(wait) {
                self.finish_switch(done.generation, done.profile, done.bank);
            }
        }
    }

    /// Apply finished loads, expire a load that ran past its timeout and drop
    /// shots the mixer is done with.
    pub fn poll(&self) {
        while let Ok(done) = self.done_rx.try_recv() {
            self.finish_switch(done.generation, done.profile, done.bank);
        }

        let expired = self
            .pending
            .lock()
            .as_ref()
            .filter(|p| p.started.elapsed() >= self.load_timeout)
            .map(|p| (p.generation, p.profile));
        if let Some((generation, profile)) = expired {
            tracing::warn!(
                profile = %profile,
                timeout_ms = self.load_timeout.as_millis() as u64,
                "sample bank load timed out, using synthesis"
            );
            self.finish_switch(generation, profile, None);
        }

        self.sink.reclaim();
    }

    /// Play the sound for a raw key event.
    ///
    /// With stereo panning enabled the key's board position sets the pan.
    pub fn play_key(&self, label: &str, code: &str, timestamp_ms: Option<u64>) -> PlayOutcome {
        let category = classify(label, code);
        let pan = self
            .settings
            .read()
            .stereo_panning
            .then(|| key_position_pan(label, code));
        self.play(category, PlayOptions { pan, timestamp_ms })
    }

    /// Play the sound for `category`.
    pub fn play(&self, category: KeyCategory, options: PlayOptions) -> PlayOutcome {
        self.poll();
        let settings = self.settings();
        if !settings.enabled {
            return PlayOutcome::Disabled;
        }

        match self.sink.state() {
            SinkState::Running => {}
            SinkState::Interrupted => {
                // Implicit resume; this keystroke is dropped
                let resumed = self.sink.resume().is_ok();
                tracing::info!(resumed, "resuming interrupted output");
                return PlayOutcome::OutputUnavailable(SinkState::Interrupted);
            }
            state => return PlayOutcome::OutputUnavailable(state),
        }

        let now = options
            .timestamp_ms
            .unwrap_or_else(|| self.epoch.elapsed().as_millis() as u64);
        {
            let mut last = self.last_trigger.lock();
            if let Some(&previous) = last.get(&category)
                && now.saturating_sub(previous) < self.throttle_ms
            {
                tracing::trace!(category = %category, "throttled");
                return PlayOutcome::Throttled;
            }
            last.insert(category, now);
        }

        let Some(buffer) = self.resolve(category) else {
            return PlayOutcome::Silent;
        };

        let jitter = if settings.pitch_variation > 0.0 {
            1.0 + self.rng.lock().bipolar() * settings.pitch_variation
        } else {
            1.0
        };
        let params = ShotParams {
            gain: buffer.volume_multiplier() * category_gain(category),
            pan: options.pan,
            rate: settings.pitch * jitter,
            exclusive: !settings.overlap,
        };
        let info = ShotInfo {
            profile: buffer.profile(),
            requested: category,
            category: buffer.category(),
            origin: buffer.origin(),
            gain: params.gain,
            rate: params.rate,
            pan: params.pan,
        };

        match self
            .sink
            .schedule(Shot::new(buffer, params, self.sink.sample_rate()))
        {
            Ok(()) => {
                tracing::debug!(
                    profile = %info.profile,
                    category = %category,
                    origin = ?info.origin,
                    gain = info.gain,
                    rate = info.rate,
                    "shot scheduled"
                );
                PlayOutcome::Scheduled(info)
            }
            Err(Error::OutputUnavailable(state)) => PlayOutcome::OutputUnavailable(state),
            Err(e) => {
                tracing::warn!(error = %e, "failed to schedule shot");
                PlayOutcome::Silent
            }
        }
    }

    /// Play the self-test sequence (A, S, D, Space, Enter), 150 ms apart.
    ///
    /// Blocks for the length of the sequence.
    pub fn play_test_sequence(&self) -> Vec<PlayOutcome> {
        TEST_SEQUENCE
            .iter()
            .enumerate()
            .map(|(i, (label, code))| {
                if i > 0 {
                    thread::sleep(TEST_SEQUENCE_SPACING);
                }
                self.play_key(label, code, None)
            })
            .collect()
    }

    /// Walk the fallback chain for `category`.
    fn resolve(&self, category: KeyCategory) -> Option<Arc<RenderedBuffer>> {
        let active = self.active.load();
        let profile = active.profile;

        if let Some(bank) = &active.bank
            && let Some(buffer) = bank.resolve(category)
        {
            return Some(buffer);
        }

        match self.cache.get(profile, category) {
            Ok(buffer) => return Some(buffer),
            Err(e) => {
                tracing::warn!(profile = %profile, category = %category, error = %e, "synthesis failed");
            }
        }

        if category != KeyCategory::Default {
            match self.cache.get(profile, KeyCategory::Default) {
                Ok(buffer) => return Some(buffer),
                Err(e) => {
                    tracing::warn!(profile = %profile, error = %e, "default synthesis failed");
                }
            }
        }

        let mut rng = self.rng.lock();
        match emergency_tone(profile, category, self.sink.sample_rate(), &mut **rng) {
            Ok(buffer) => {
                tracing::warn!(profile = %profile, category = %category, "playing emergency tone");
                Some(Arc::new(buffer))
            }
            Err(e) => {
                tracing::warn!(error = %e, "emergency tone failed");
                None
            }
        }
    }

    fn begin_switch(&self, profile: ProfileId) {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        *self.pending.lock() = Some(PendingSwitch {
            generation,
            profile,
            started: Instant::now(),
        });
        tracing::info!(profile = %profile, generation, "profile switch started");

        let provider = self.provider.clone();
        let cache = Arc::clone(&self.cache);
        let done_tx = self.done_tx.clone();
        let spawned = thread::Builder::new()
            .name("mechvibe-loader".to_string())
            .spawn(move || {
                let bank = provider.and_then(|p| match SampleBank::load(p.as_ref(), profile) {
                    Ok(bank) => Some(bank),
                    Err(e) => {
                        tracing::warn!(profile = %profile, error = %e, "no usable sample bank, using synthesis");
                        None
                    }
                });
                if bank.is_none() {
                    cache.prewarm(profile);
                }
                // The dispatcher may be gone by now
                let _ = done_tx.send(LoadDone {
                    generation,
                    profile,
                    bank,
                });
            });

        if let Err(e) = spawned {
            tracing::warn!(error = %e, "loader thread unavailable, switching to synthesis");
            self.finish_switch(generation, profile, None);
        }
    }

    fn finish_switch(&self, generation: u64, profile: ProfileId, bank: Option<SampleBank>) {
        {
            let mut pending = self.pending.lock();
            if pending.as_ref().map(|p| p.generation) != Some(generation) {
                tracing::debug!(profile = %profile, generation, "stale profile load dropped");
                return;
            }
            *pending = None;
        }

        let mode = if bank.is_some() {
            AudioMode::Real
        } else {
            AudioMode::Synthetic
        };
        let previous = self.active.swap(Arc::new(ActiveSound {
            profile,
            bank: bank.map(Arc::new),
        }));
        if previous.profile != profile {
            self.cache.invalidate(Some(previous.profile));
        }
        tracing::info!(
            profile = %profile,
            previous = %previous.profile,
            mode = %mode,
            "profile switch completed"
        );
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("active_profile", &self.active_profile())
            .field("audio_mode", &self.audio_mode())
            .field("switch_state", &self.switch_state())
            .field("sink", &self.sink)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::Mixer;
    use mechvibe_core::{Silence, Xorshift32};

    fn settings() -> Settings {
        Settings {
            pitch_variation: 0.0,
            ..Settings::default()
        }
    }

    fn dispatcher(settings: Settings) -> (Dispatcher, Mixer) {
        let (sink, mixer) = OutputSink::new(48000);
        let cache = SoundCache::new(48000).with_rng_factory(Arc::new(|| Box::new(Silence)));
        let dispatcher = Dispatcher::new(
            Arc::new(sink),
            Arc::new(cache),
            settings,
            &EngineConfig::default(),
        )
        .with_rng(Box::new(Silence));
        (dispatcher, mixer)
    }

    #[test]
    fn test_category_gain() {
        assert_eq!(category_gain(KeyCategory::Spacebar), 1.2);
        assert_eq!(category_gain(KeyCategory::Enter), 1.1);
        assert_eq!(category_gain(KeyCategory::Backspace), 0.9);
        assert_eq!(category_gain(KeyCategory::Shift), 1.0);
        assert_eq!(category_gain(KeyCategory::Default), 1.0);
    }

    #[test]
    fn test_new_applies_volume() {
        let (d, _mixer) = dispatcher(settings().with_volume(0.4));
        assert_eq!(d.sink().master_gain(), 0.4);
        assert_eq!(d.active_profile(), ProfileId::Tactile);
        assert_eq!(d.audio_mode(), AudioMode::Synthetic);
        assert_eq!(d.switch_state(), SwitchState::Idle);
    }

    #[test]
    fn test_throttle_per_category() {
        let (d, _mixer) = dispatcher(settings());
        assert!(d.play(KeyCategory::Default, PlayOptions::at(1000)).is_scheduled());
        assert_eq!(
            d.play(KeyCategory::Default, PlayOptions::at(1005)),
            PlayOutcome::Throttled
        );
        // Other categories keep their own clock
        assert!(d.play(KeyCategory::Enter, PlayOptions::at(1005)).is_scheduled());
        assert!(d.play(KeyCategory::Default, PlayOptions::at(1015)).is_scheduled());
        assert_eq!(d.sink().active_shots(), 3);
    }

    #[test]
    fn test_throttled_request_does_not_extend_window() {
        let (d, _mixer) = dispatcher(settings());
        assert!(d.play(KeyCategory::Tab, PlayOptions::at(0)).is_scheduled());
        assert_eq!(d.play(KeyCategory::Tab, PlayOptions::at(9)), PlayOutcome::Throttled);
        assert!(d.play(KeyCategory::Tab, PlayOptions::at(10)).is_scheduled());
    }

    #[test]
    fn test_disabled() {
        let (d, _mixer) = dispatcher(Settings {
            enabled: false,
            ..settings()
        });
        assert_eq!(
            d.play(KeyCategory::Default, PlayOptions::default()),
            PlayOutcome::Disabled
        );
        assert_eq!(d.sink().active_shots(), 0);
    }

    #[test]
    fn test_suspended_sink_rejects() {
        let (d, _mixer) = dispatcher(settings());
        d.sink().suspend();
        assert_eq!(
            d.play(KeyCategory::Default, PlayOptions::at(0)),
            PlayOutcome::OutputUnavailable(SinkState::Suspended)
        );
        d.sink().resume().unwrap();
        assert!(d.play(KeyCategory::Default, PlayOptions::at(0)).is_scheduled());
    }

    #[test]
    fn test_shot_info_for_synthesized_spacebar() {
        let (d, _mixer) = dispatcher(Settings {
            pitch: 1.5,
            ..settings()
        });
        let PlayOutcome::Scheduled(info) = d.play(KeyCategory::Spacebar, PlayOptions::at(0))
        else {
            panic!("expected a scheduled shot");
        };
        assert_eq!(info.profile, ProfileId::Tactile);
        assert_eq!(info.requested, KeyCategory::Spacebar);
        assert_eq!(info.category, KeyCategory::Spacebar);
        assert_eq!(info.origin, BufferOrigin::Synthesized);
        assert_eq!(info.rate, 1.5);
        assert_eq!(info.pan, None);

        let buffer = d.cache().get(ProfileId::Tactile, KeyCategory::Spacebar).unwrap();
        assert!((info.gain - buffer.volume_multiplier() * 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_pitch_jitter_stays_in_range() {
        let (d, _mixer) = dispatcher(Settings {
            pitch: 2.0,
            pitch_variation: 0.25,
            ..settings()
        });
        let d = d.with_rng(Box::new(Xorshift32::new(99)));
        let mut rates = Vec::new();
        for i in 0..32u64 {
            if let PlayOutcome::Scheduled(info) = d.play(KeyCategory::Default, PlayOptions::at(i * 20)) {
                rates.push(info.rate);
            }
        }
        assert_eq!(rates.len(), 32);
        assert!(rates.iter().all(|r| (1.5..=2.5).contains(r)), "{rates:?}");
        assert!(rates.iter().any(|&r| r != rates[0]));
    }

    #[test]
    fn test_play_key_pans_only_when_enabled() {
        let (d, _mixer) = dispatcher(settings());
        let PlayOutcome::Scheduled(info) = d.play_key("q", "KeyQ", Some(0)) else {
            panic!("expected a scheduled shot");
        };
        assert_eq!(info.pan, None);

        let (d, _mixer) = dispatcher(Settings {
            stereo_panning: true,
            ..settings()
        });
        let PlayOutcome::Scheduled(info) = d.play_key("q", "KeyQ", Some(0)) else {
            panic!("expected a scheduled shot");
        };
        assert_eq!(info.pan, Some(key_position_pan("q", "KeyQ")));
        assert!(info.pan.unwrap() < 0.0);
    }

    #[test]
    fn test_overlap_off_keeps_one_voice() {
        let (d, mut mixer) = dispatcher(Settings {
            overlap: false,
            ..settings()
        });
        d.play(KeyCategory::Default, PlayOptions::at(0));
        d.play(KeyCategory::Enter, PlayOptions::at(0));
        let mut out = vec![0.0; 128];
        mixer.render(&mut out, 2);
        assert_eq!(mixer.active(), 1);

        let (d, mut mixer) = dispatcher(settings());
        d.play(KeyCategory::Default, PlayOptions::at(0));
        d.play(KeyCategory::Enter, PlayOptions::at(0));
        mixer.render(&mut out, 2);
        assert_eq!(mixer.active(), 2);
    }

    #[test]
    fn test_switch_without_samples_goes_synthetic() {
        let (d, _mixer) = dispatcher(settings());
        d.play(KeyCategory::Default, PlayOptions::at(0));
        assert!(d.cache().peek(ProfileId::Tactile, KeyCategory::Default).is_some());

        d.apply_settings(settings().with_switch(ProfileId::Clicky));
        assert!(d.wait_for_switch(Duration::from_secs(5)));
        assert_eq!(d.active_profile(), ProfileId::Clicky);
        assert_eq!(d.audio_mode(), AudioMode::Synthetic);
        assert!(!d.has_real_audio(ProfileId::Clicky));
        assert!(d.cache().peek(ProfileId::Tactile, KeyCategory::Default).is_none());
        // Prewarmed during the switch
        assert!(d.cache().peek(ProfileId::Clicky, KeyCategory::Enter).is_some());
    }

    #[test]
    fn test_same_profile_settings_do_not_switch() {
        let (d, _mixer) = dispatcher(settings());
        d.apply_settings(settings().with_volume(0.2));
        assert_eq!(d.switch_state(), SwitchState::Idle);
        assert_eq!(d.sink().master_gain(), 0.2);
    }

    #[test]
    fn test_audio_mode_display() {
        assert_eq!(AudioMode::Real.to_string(), "real");
        assert_eq!(AudioMode::Synthetic.to_string(), "synthetic");
    }
}
